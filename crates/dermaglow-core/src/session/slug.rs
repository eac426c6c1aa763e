//! Human-shareable session slugs.
//!
//! Six random base-36 characters, giving ~2.2 billion values. Uniqueness is
//! enforced by the store's constraint, not by this generator; a collision
//! surfaces as a creation conflict.

use rand::Rng;

/// Length of a generated slug.
pub const SLUG_LEN: usize = 6;

/// Generate a random base-36 slug.
pub fn generate_slug() -> String {
    let mut rng = rand::rng();
    (0..SLUG_LEN)
        .map(|_| {
            let digit = rng.random_range(0..36u32);
            char::from_digit(digit, 36).unwrap()
        })
        .collect()
}
