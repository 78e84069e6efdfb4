use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Url slug derived from a title: lower-case, runs of other characters collapsed to `-`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALNUM
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("Intro to Rust!"), "intro-to-rust");
        assert_eq!(slugify("--A  B--"), "a-b");
        assert_eq!(slugify("Ownership & Borrowing 101"), "ownership-borrowing-101");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Rust"), "caf-rust");
        assert_eq!(slugify("!!!"), "");
    }
}
