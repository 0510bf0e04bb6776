//! Display DTOs for the store domain.
//!
//! Bilingual fields are projected into a single `name`/`description` using
//! the explicit request locale; the raw variants stay in the models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::common::Locale;
use crate::domains::store::models::category::Category;
use crate::domains::store::models::listing::Listing;

#[derive(Debug, Clone, Serialize)]
pub struct ListingData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: String,
    pub seller_id: String,
    pub is_active: bool,
    pub is_featured: bool,
    pub view_count: i32,
    pub published_at: DateTime<Utc>,
}

impl ListingData {
    pub fn project(listing: Listing, locale: Locale) -> Self {
        Self {
            id: listing.id.to_string(),
            name: locale.pick(&listing.name_uz, &listing.name_ru).to_string(),
            slug: listing.slug,
            description: locale
                .pick(&listing.description_uz, &listing.description_ru)
                .to_string(),
            price: listing.price,
            category_id: listing.category_id.to_string(),
            seller_id: listing.seller_id.to_string(),
            is_active: listing.is_active,
            is_featured: listing.is_featured,
            view_count: listing.view_count,
            published_at: listing.published_at,
        }
    }

    pub fn project_all(listings: Vec<Listing>, locale: Locale) -> Vec<Self> {
        listings
            .into_iter()
            .map(|listing| Self::project(listing, locale))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<String>,
    pub sort_order: i32,
}

impl CategoryData {
    pub fn project(category: Category, locale: Locale) -> Self {
        Self {
            id: category.id.to_string(),
            name: locale.pick(&category.name_uz, &category.name_ru).to_string(),
            slug: category.slug,
            parent_id: category.parent_id.map(|id| id.to_string()),
            sort_order: category.sort_order,
        }
    }
}

/// Category with its nested children.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTreeData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
    pub children: Vec<CategoryTreeData>,
}

impl CategoryTreeData {
    /// Assemble the forest of root categories from a flat fetch. One pass
    /// groups by parent, recursion attaches descendants; a child whose
    /// parent is inactive (absent from the slice) is omitted with its
    /// subtree.
    pub fn build_forest(categories: Vec<Category>, locale: Locale) -> Vec<CategoryTreeData> {
        let mut by_parent: HashMap<Option<Uuid>, Vec<Category>> = HashMap::new();
        for category in categories {
            by_parent.entry(category.parent_id).or_default().push(category);
        }

        fn attach(
            parent: Option<Uuid>,
            by_parent: &mut HashMap<Option<Uuid>, Vec<Category>>,
            locale: Locale,
        ) -> Vec<CategoryTreeData> {
            let Some(nodes) = by_parent.remove(&parent) else {
                return Vec::new();
            };
            nodes
                .into_iter()
                .map(|category| {
                    let children = attach(Some(category.id), by_parent, locale);
                    CategoryTreeData {
                        id: category.id.to_string(),
                        name: locale
                            .pick(&category.name_uz, &category.name_ru)
                            .to_string(),
                        slug: category.slug,
                        sort_order: category.sort_order,
                        children,
                    }
                })
                .collect()
        }

        attach(None, &mut by_parent, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, parent_id: Option<Uuid>) -> Category {
        Category {
            id: Uuid::new_v4(),
            name_uz: name.to_string(),
            name_ru: format!("{}-ru", name),
            slug: name.to_string(),
            parent_id,
            is_active: true,
            sort_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_forest_nests_children() {
        let root = category("electronics", None);
        let child = category("phones", Some(root.id));
        let grandchild = category("smartphones", Some(child.id));
        let other_root = category("furniture", None);

        let forest = CategoryTreeData::build_forest(
            vec![root, child, grandchild, other_root],
            Locale::Uz,
        );

        assert_eq!(forest.len(), 2);
        let electronics = forest.iter().find(|c| c.name == "electronics").unwrap();
        assert_eq!(electronics.children.len(), 1);
        assert_eq!(electronics.children[0].name, "phones");
        assert_eq!(electronics.children[0].children[0].name, "smartphones");
    }

    #[test]
    fn test_build_forest_locale_projection() {
        let forest = CategoryTreeData::build_forest(vec![category("books", None)], Locale::Ru);
        assert_eq!(forest[0].name, "books-ru");
    }

    #[test]
    fn test_orphan_subtree_is_dropped() {
        // Parent filtered out (inactive) - child must not surface as a root
        let missing_parent = Uuid::new_v4();
        let orphan = category("orphan", Some(missing_parent));
        let forest = CategoryTreeData::build_forest(vec![orphan], Locale::Uz);
        assert!(forest.is_empty());
    }

    #[test]
    fn test_listing_projection_picks_locale() {
        let listing = Listing {
            id: Uuid::new_v4(),
            name_uz: "Telefon".to_string(),
            name_ru: "Телефон".to_string(),
            slug: "telefon".to_string(),
            description_uz: "Yangi".to_string(),
            description_ru: "Новый".to_string(),
            price: Decimal::new(150000, 2),
            category_id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            is_active: true,
            is_featured: false,
            view_count: 3,
            published_at: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let ru = ListingData::project(listing.clone(), Locale::Ru);
        assert_eq!(ru.name, "Телефон");
        assert_eq!(ru.description, "Новый");

        let uz = ListingData::project(listing, Locale::Uz);
        assert_eq!(uz.name, "Telefon");
    }
}
