//! URL slug derivation for school names.

use rand::Rng;

/// Derives a URL slug from a display name.
///
/// Lowercases, drops everything but letters, digits, spaces, and hyphens,
/// then collapses runs of separators into single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_sep = true; // trims leading separators

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
            last_was_sep = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !last_was_sep {
            slug.push('-');
            last_was_sep = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Random 8-hex-digit suffix appended to a slug on collision.
pub fn random_suffix() -> String {
    let n: u32 = rand::thread_rng().r#gen();
    format!("{n:08x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_slugging() {
        assert_eq!(slugify("Green Valley School"), "green-valley-school");
        assert_eq!(slugify("  Lycée   Voltaire  "), "lycée-voltaire");
        assert_eq!(slugify("St. Mary's #1!"), "st-marys-1");
    }

    #[test]
    fn separators_collapse() {
        assert_eq!(slugify("a - b __ c"), "a-b-c");
        assert_eq!(slugify("---x---"), "x");
    }

    #[test]
    fn punctuation_only_name_yields_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn suffix_is_eight_hex_digits() {
        let s = random_suffix();
        assert_eq!(s.len(), 8);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
