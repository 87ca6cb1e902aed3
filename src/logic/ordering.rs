//! Entry ordering: seeded entrants sort ascending, unseeded fields are shuffled.

use crate::models::{Registration, RegistrationId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Order active registrations for bracket entry.
///
/// If any registration carries a seed, sort ascending by seed with unseeded
/// entries last (keeping their registration order). If no registration has a
/// seed, shuffle with the caller's rng.
pub fn order_registrations(
    registrations: &[Registration],
    rng: &mut impl Rng,
) -> Vec<RegistrationId> {
    let mut active: Vec<&Registration> =
        registrations.iter().filter(|r| r.is_active()).collect();
    if active.iter().any(|r| r.seed.is_some()) {
        // Stable sort: unseeded entries keep their relative order at the back.
        active.sort_by_key(|r| r.seed.unwrap_or(u32::MAX));
    } else {
        active.shuffle(rng);
    }
    active.iter().map(|r| r.id).collect()
}
