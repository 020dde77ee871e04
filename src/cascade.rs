//! Unlock cascade
//!
//! Re-derives `unlocked` flags from `completed` flags so that:
//! - the first location is always unlocked
//! - a completed location always has an unlocked successor
//!
//! The pass only ever sets flags to `true`, so running it twice is a no-op.

use crate::catalog::Location;

/// Restore the cascade invariants in place.
///
/// Returns the number of locations whose `unlocked` flag had to be forced.
pub fn repair(locations: &mut [Location]) -> usize {
    let mut forced = 0;

    if let Some(first) = locations.first_mut() {
        if !first.unlocked {
            first.unlocked = true;
            forced += 1;
        }
    }

    for i in 1..locations.len() {
        if locations[i - 1].completed && !locations[i].unlocked {
            locations[i].unlocked = true;
            forced += 1;
        }
    }

    forced
}

/// Check both cascade invariants without modifying anything
pub fn holds(locations: &[Location]) -> bool {
    let first_unlocked = locations.first().is_none_or(|l| l.unlocked);
    first_unlocked
        && locations
            .windows(2)
            .all(|pair| !pair[0].completed || pair[1].unlocked)
}
