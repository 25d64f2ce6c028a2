use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating employee usernames
    /// Must start with a letter and contain only letters, digits, dots, hyphens and underscores
    /// - Valid: "operateur", "j.dupont", "tech_02"
    /// - Invalid: "2tech", "_admin", "jean dupont", "op@site"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9._-]*$").unwrap();
}

/// A text field counts as filled only when it holds something besides whitespace
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
