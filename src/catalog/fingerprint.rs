use sha2::{Digest, Sha256};

/// SHA-256 over the names fed in order with no separator, rendered as lowercase hex.
pub fn fingerprint<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut hasher = Sha256::new();
    for name in names {
        hasher.update(name.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_sha256_of_nothing() {
        assert_eq!(
            fingerprint(Vec::<&str>::new()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_no_separator_between_names() {
        assert_eq!(fingerprint(["ab", "c"]), fingerprint(["abc"]));
        assert_eq!(fingerprint(["a", "bc"]), fingerprint(["abc"]));
    }

    #[test]
    fn test_order_matters() {
        assert_ne!(fingerprint(["a", "b"]), fingerprint(["b", "a"]));
    }

    #[test]
    fn test_lowercase_hex() {
        let id = fingerprint(["pods"]);
        assert_eq!(id.len(), 64);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
