//! Content hashing of source files

use sha1::{Digest, Sha1};

/// Hex-encoded SHA-1 of the given bytes.
///
/// Computed once per source file and copied onto every opinion parsed from it.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha1::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            content_hash(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            content_hash(b""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_hash_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
                let first = content_hash(&bytes);
                prop_assert_eq!(first.len(), 40);
                prop_assert_eq!(first, content_hash(&bytes));
            }
        }
    }
}
