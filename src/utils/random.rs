//! Random identifier generation
//!
//! Identifiers produced here are meant for display and log correlation. They
//! are not suitable as security tokens.

use rand::{thread_rng, Rng};
use uuid::{Builder, Uuid};

/// Generate a new GUID string
///
/// Returns an upper-case, hyphenated 8-4-4-4-12 identifier. The third group
/// always falls in `4000..=4FFF` and the fourth in `8000..=BFFF`.
///
/// # Example
/// ```rust,ignore
/// let id = guid();
/// println!("Generated ID: {}", id); // e.g., "3F2504E0-4F89-41D3-9A0C-0305E82C3301"
/// ```
pub fn guid() -> String {
    guid_from_rng(&mut thread_rng())
}

/// Generate a GUID from a caller-provided random source
pub fn guid_from_rng<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.gen();
    let uuid: Uuid = Builder::from_random_bytes(bytes).into_uuid();
    uuid.hyphenated().to_string().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn group(id: &str, index: usize) -> u16 {
        let part = id.split('-').nth(index).unwrap();
        u16::from_str_radix(&part[..4], 16).unwrap()
    }

    #[test]
    fn test_guid_format() {
        for _ in 0..200 {
            let id = guid();
            let groups: Vec<&str> = id.split('-').collect();

            assert_eq!(id.len(), 36);
            assert_eq!(
                groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
                vec![8, 4, 4, 4, 12]
            );
            assert!(id
                .chars()
                .all(|c| c == '-' || c.is_ascii_digit() || ('A'..='F').contains(&c)));
            assert!((0x4000..=0x4FFF).contains(&group(&id, 2)));
            assert!((0x8000..=0xBFFF).contains(&group(&id, 3)));
        }
    }

    #[test]
    fn test_guid_from_seeded_rng_is_repeatable() {
        let first = guid_from_rng(&mut StdRng::seed_from_u64(7));
        let second = guid_from_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert_ne!(guid(), guid());
    }
}
