//! Pairwise collision handling.
//!
//! Orbs never really touch: when two come closer than the configured distance
//! both are pushed outward by half the overlap, reverse direction, and get
//! opposite angle nudges so they separate on the next frames.

use planetoid_config::OrbConfig;

use crate::orb::OrbEntity;

/// Resolve every overlapping pair once. Returns the number of collisions.
///
/// Pairs are visited in population order `(i, j)` with `i < j`; the first orb
/// of a pair is nudged forward by `collision_nudge` and the second backward.
/// Coincident orbs (distance exactly zero) are skipped.
pub fn resolve_collisions(orbs: &mut [OrbEntity], config: &OrbConfig) -> usize {
    let min_distance = config.collision_distance;
    let mut collisions = 0;

    for i in 0..orbs.len() {
        let (head, tail) = orbs.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            let d = a.position().distance(b.position());
            if !(d > 0.0 && d < min_distance) {
                continue;
            }
            let push = (min_distance - d) * 0.5;
            a.deflect(push, config.collision_nudge, config);
            b.deflect(push, -config.collision_nudge, config);
            tracing::trace!(a = %a.id(), b = %b.id(), distance = d, "collision");
            collisions += 1;
        }
    }
    collisions
}
