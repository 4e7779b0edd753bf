//! UUID-backed identifier generator.

use uuid::Uuid;

use crate::message::ports::IdGenerator;

/// Crockford base32 alphabet, lower-cased.
const CROCKFORD: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

/// Number of base32 characters needed for 128 bits.
const SHORT_ID_LEN: u32 = 26;

/// Generates identifiers from random (v4) UUIDs.
///
/// Long identifiers are hyphenated UUIDs. Short identifiers carry the same
/// 128 random bits as 26 lower-case Crockford base32 characters, so they
/// never contain `-`.
///
/// # Examples
///
/// ```
/// use umf::message::adapters::UuidIdGenerator;
/// use umf::message::ports::IdGenerator;
///
/// let ids = UuidIdGenerator;
/// assert_eq!(ids.long_id().len(), 36);
/// assert_eq!(ids.short_id().len(), 26);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn long_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn short_id(&self) -> String {
        encode_base32(Uuid::new_v4().as_u128())
    }
}

fn encode_base32(value: u128) -> String {
    (0..SHORT_ID_LEN)
        .rev()
        .filter_map(|group| {
            let index = usize::try_from((value >> (group * 5)) & 0x1f).ok()?;
            CROCKFORD.get(index).copied().map(char::from)
        })
        .collect()
}
