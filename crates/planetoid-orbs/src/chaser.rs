//! Chaser assignment and steering.
//!
//! A chaser never controls its angle or radius directly. It only retargets its
//! orbital plane so the plane contains both itself and its quarry, and keeps a
//! minimum cruise speed so it visibly closes the gap.

use glam::Vec3;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::orb::{OrbEntity, OrbId, OrbRole};

/// Cross products shorter than this are too unstable to steer by.
pub const STEER_EPSILON: f32 = 1e-4;

/// Pick a random live orb other than `orbs[exclude]`.
pub fn pick_target<R: Rng + ?Sized>(
    orbs: &[OrbEntity],
    exclude: usize,
    rng: &mut R,
) -> Option<OrbId> {
    let candidates: Vec<OrbId> = orbs
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != exclude)
        .map(|(_, o)| o.id())
        .collect();
    candidates.choose(rng).copied()
}

/// Number of chasers for a population of `n`: a `fraction` of it, at least
/// one when there is anyone to chase, never everyone's quarry vanishing.
pub fn chaser_count(n: usize, fraction: f32) -> usize {
    if n < 2 || fraction <= 0.0 {
        return 0;
    }
    ((n as f32 * fraction).round() as usize).clamp(1, n)
}

/// Clear every role, then mark a random subset of chasers with distinct targets.
///
/// Returns the number of chasers assigned.
pub fn assign_chasers<R: Rng + ?Sized>(
    orbs: &mut [OrbEntity],
    fraction: f32,
    rng: &mut R,
) -> usize {
    for orb in orbs.iter_mut() {
        orb.role = OrbRole::Wanderer;
    }

    let count = chaser_count(orbs.len(), fraction);
    let mut indices: Vec<usize> = (0..orbs.len()).collect();
    indices.shuffle(rng);

    for &i in indices.iter().take(count) {
        let target = pick_target(orbs, i, rng);
        orbs[i].role = OrbRole::Chaser { target };
    }

    tracing::debug!(
        population = orbs.len(),
        chasers = count,
        "chasers assigned"
    );
    count
}

/// Steer every chaser toward its target's current position.
///
/// Chasers whose target no longer exists have the target cleared and fly as
/// ordinary orbs. Returns how many chasers were steered this frame.
pub fn steer_chasers(orbs: &mut [OrbEntity], min_speed: f32) -> usize {
    let positions: Vec<(OrbId, Vec3)> = orbs.iter().map(|o| (o.id(), o.position())).collect();
    let mut steered = 0;

    for (i, orb) in orbs.iter_mut().enumerate() {
        let OrbRole::Chaser {
            target: Some(target),
        } = orb.role
        else {
            continue;
        };
        let Some(&(_, target_pos)) = positions.iter().find(|(id, _)| *id == target) else {
            tracing::debug!(orb = %orb.id(), %target, "chase target gone");
            orb.role = OrbRole::Chaser { target: None };
            continue;
        };

        let cross = positions[i].1.cross(target_pos);
        if cross.length() > STEER_EPSILON {
            orb.target_plane_normal = cross.normalize();
        }
        orb.target_angular_speed = orb.target_angular_speed.max(min_speed);
        steered += 1;
    }
    steered
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetoid_config::OrbConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn population(n: u32, seed: u64) -> (Vec<OrbEntity>, ChaCha8Rng) {
        let config = OrbConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let orbs = (0..n)
            .map(|i| OrbEntity::spawn(OrbId(i), &config, &mut rng))
            .collect();
        (orbs, rng)
    }

    #[test]
    fn test_chaser_count_rules() {
        assert_eq!(chaser_count(0, 0.3), 0);
        assert_eq!(chaser_count(1, 0.3), 0);
        assert_eq!(chaser_count(2, 0.3), 1);
        assert_eq!(chaser_count(10, 0.3), 3);
        assert_eq!(chaser_count(20, 0.3), 6);
        assert_eq!(chaser_count(5, 0.0), 0);
        assert_eq!(chaser_count(4, 1.0), 4);
    }

    #[test]
    fn test_assigned_targets_are_distinct_live_orbs() {
        let (mut orbs, mut rng) = population(10, 1);
        let n = assign_chasers(&mut orbs, 0.3, &mut rng);
        assert_eq!(n, 3);
        assert_eq!(orbs.iter().filter(|o| o.is_chaser()).count(), 3);
        for orb in orbs.iter().filter(|o| o.is_chaser()) {
            let target = orb.chase_target().unwrap();
            assert_ne!(target, orb.id());
            assert!(orbs.iter().any(|o| o.id() == target));
        }
    }

    #[test]
    fn test_reassignment_clears_previous_roles() {
        let (mut orbs, mut rng) = population(6, 2);
        assign_chasers(&mut orbs, 1.0, &mut rng);
        assert!(orbs.iter().all(|o| o.is_chaser()));
        assign_chasers(&mut orbs, 0.0, &mut rng);
        assert!(orbs.iter().all(|o| !o.is_chaser()));
    }

    #[test]
    fn test_steering_sets_plane_through_both_orbs() {
        let (mut orbs, _) = population(2, 3);
        orbs[0].role = OrbRole::Chaser {
            target: Some(orbs[1].id()),
        };
        orbs[0].target_angular_speed = 0.1;

        assert_eq!(steer_chasers(&mut orbs, 1.4), 1);
        let n = orbs[0].target_plane_normal;
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.dot(orbs[0].position().normalize()).abs() < 1e-4);
        assert!(n.dot(orbs[1].position().normalize()).abs() < 1e-4);
        assert_eq!(orbs[0].target_angular_speed, 1.4);
    }

    #[test]
    fn test_collinear_positions_keep_previous_target_plane() {
        let (mut orbs, _) = population(2, 4);
        orbs[1].plane_normal = orbs[0].plane_normal;
        orbs[1].angle = orbs[0].angle;
        orbs[1].wobble_phase = orbs[0].wobble_phase;
        orbs[1].radius = orbs[0].radius;
        orbs[1].height = orbs[0].height;
        let config = OrbConfig::default();
        orbs[1].refresh_render_values(&config);
        orbs[0].refresh_render_values(&config);

        let before = orbs[0].target_plane_normal;
        orbs[0].role = OrbRole::Chaser {
            target: Some(orbs[1].id()),
        };
        steer_chasers(&mut orbs, 1.4);
        assert_eq!(orbs[0].target_plane_normal, before);
    }

    #[test]
    fn test_missing_target_is_cleared() {
        let (mut orbs, _) = population(2, 5);
        orbs[0].role = OrbRole::Chaser {
            target: Some(OrbId(999)),
        };
        let before = orbs[0].target_plane_normal;
        assert_eq!(steer_chasers(&mut orbs, 1.4), 0);
        assert_eq!(orbs[0].role, OrbRole::Chaser { target: None });
        assert_eq!(orbs[0].target_plane_normal, before);
    }

    #[test]
    fn test_pick_target_alone_is_none() {
        let (orbs, mut rng) = population(1, 6);
        assert_eq!(pick_target(&orbs, 0, &mut rng), None);
    }
}
