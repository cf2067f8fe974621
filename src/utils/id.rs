use rand::Rng;

/// Generate a document id: 12 random bytes as 24 lowercase hex characters
pub fn new_id() -> String {
    let mut bytes = [0u8; 12];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Check that `id` has the shape produced by [`new_id`]
pub fn is_valid_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), 24);
        assert!(is_valid_id(&id));
        assert_eq!(id, id.to_lowercase());
    }

    #[test]
    fn test_new_ids_differ() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn test_invalid_ids() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("xyz"));
        assert!(!is_valid_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
    }
}
