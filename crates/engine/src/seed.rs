//! Seed provisioning: the only boundary where external randomness may enter.
//!
//! The reducer and everything downstream of [`crate::rng`] are pure. Fresh
//! seeds are minted here, once, at new-run time, from an injectable entropy
//! source.

use rand::Rng;

/// Characters a generated seed draws from.
const SEED_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
/// Length of a generated seed.
pub const SEED_LENGTH: usize = 8;
/// Prefix that marks a daily-challenge seed.
pub const DAILY_SEED_PREFIX: &str = "daily-";

/// Generate a fresh seed from the supplied entropy source.
///
/// Generic over [`rand::Rng`] so tests can inject a seeded generator; the
/// production path is [`generate_seed`].
pub fn generate_seed_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SEED_LENGTH)
        .map(|_| {
            let byte: u8 = rng.gen();
            SEED_ALPHABET[usize::from(byte) % SEED_ALPHABET.len()] as char
        })
        .collect()
}

/// Generate a fresh seed from OS entropy.
pub fn generate_seed() -> String {
    generate_seed_with(&mut rand::thread_rng())
}

/// The deterministic seed for a calendar date's daily challenge.
pub fn daily_seed(date: &str) -> String {
    format!("{DAILY_SEED_PREFIX}{date}")
}

/// Recover the date from a daily seed, if it carries the prefix.
pub fn daily_date_from_seed(seed: &str) -> Option<&str> {
    seed.strip_prefix(DAILY_SEED_PREFIX)
}
