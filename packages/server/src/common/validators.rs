//! Boundary input checks: phone format, free-text sanitization, upload guards.
//!
//! Applied before anything is persisted. Free text is rejected rather than
//! stripped so the caller sees exactly what was wrong.

use lazy_static::lazy_static;
use regex::Regex;

/// Upload size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Content types accepted for image uploads.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

lazy_static! {
    // E.164-like: plus sign followed by 1-15 digits
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+\d{1,15}$").unwrap();

    static ref HTML_TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();

    static ref SCRIPT_REGEXES: Vec<Regex> = vec![
        Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap(),
        Regex::new(r"(?i)javascript:").unwrap(),
        Regex::new(r"(?i)vbscript:").unwrap(),
        Regex::new(r"(?i)onload\s*=").unwrap(),
        Regex::new(r"(?i)onerror\s*=").unwrap(),
        Regex::new(r"(?i)eval\s*\(").unwrap(),
    ];
}

/// Validate phone number format (`+` followed by 1-15 digits).
pub fn validate_phone_number(phone: &str) -> Result<(), &'static str> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err("Phone number must be in format +1234567890")
    }
}

/// Reject markup and script patterns in free-text fields.
pub fn validate_free_text(value: &str) -> Result<(), &'static str> {
    if SCRIPT_REGEXES.iter().any(|re| re.is_match(value)) {
        return Err("Script content is not allowed");
    }
    if HTML_TAG_REGEX.is_match(value) {
        return Err("HTML tags are not allowed");
    }
    Ok(())
}

/// Validate an upload against the size ceiling and allowed content types.
pub fn validate_upload(size_bytes: u64, content_type: &str) -> Result<(), &'static str> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err("File size cannot exceed 10MB");
    }
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err("Only JPEG, PNG, GIF, and WebP images are allowed");
    }
    Ok(())
}
