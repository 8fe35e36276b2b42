//! Canonical serialization for deterministic hashing.
//!
//! Plans and policies are hashed through their JSON form. Field order follows
//! struct declaration order and every map in hashed data is a `BTreeMap`, so
//! the same value always produces the same bytes.

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
///
/// Returns an empty buffer if the value cannot be represented as JSON, which
/// only happens for maps with non-string keys.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

/// Compute the canonical xxh64 hash of a serializable value.
pub fn canonical_hash<T: Serialize + ?Sized>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute the canonical hash as a 16-character hex string.
pub fn canonical_hash_hex<T: Serialize + ?Sized>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Student;

    #[test]
    fn test_determinism() {
        let s = Student::new("Asha", "21A01", "CSE", "98480");
        assert_eq!(canonical_hash(&s), canonical_hash(&s.clone()));
    }

    #[test]
    fn test_hex_width() {
        let hex = canonical_hash_hex(&vec!["a", "b"]);
        assert_eq!(hex.len(), 16);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(canonical_hash(&["a", "b"]), canonical_hash(&["b", "a"]));
    }
}
