//! URL slug generation with store-level uniqueness.

use sqlx::PgPool;

/// Lowercase, ASCII-alphanumeric slug; runs of other characters collapse to
/// a single hyphen. Empty input (or input with no usable characters) falls
/// back to "item".
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut last_was_hyphen = true; // suppress leading hyphen

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}

/// Slugify `value` and append `-2`, `-3`, ... until the slug is free in
/// `table`. `table` must be a compile-time constant, never user input.
pub async fn generate_unique_slug(
    table: &'static str,
    value: &str,
    pool: &PgPool,
) -> sqlx::Result<String> {
    let base = slugify(value);
    let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE slug = $1)", table);

    let mut candidate = base.clone();
    let mut counter = 1u32;
    loop {
        let (exists,): (bool,) = sqlx::query_as(&query)
            .bind(&candidate)
            .fetch_one(pool)
            .await?;
        if !exists {
            return Ok(candidate);
        }
        counter += 1;
        candidate = format!("{}-{}", base, counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Yangi Telefon"), "yangi-telefon");
        assert_eq!(slugify("iPhone 15 Pro Max"), "iphone-15-pro-max");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify("  hello --- world!!  "), "hello-world");
        assert_eq!(slugify("a/b\\c"), "a-b-c");
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(slugify("Телефон 15"), "15");
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(slugify(""), "item");
        assert_eq!(slugify("!!!"), "item");
        assert_eq!(slugify("Телефон"), "item");
    }
}
