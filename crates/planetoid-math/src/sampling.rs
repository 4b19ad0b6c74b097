//! Direction sampling and normalisation with fallbacks.

use glam::Vec3;
use rand::Rng;

const MIN_LENGTH_SQUARED: f32 = 1e-12;

/// Normalise `v`, or return `fallback` when `v` is zero-length or not finite.
#[must_use]
pub fn unit_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq.is_finite() && len_sq > MIN_LENGTH_SQUARED {
        v / len_sq.sqrt()
    } else {
        fallback
    }
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.random::<f32>() * std::f32::consts::TAU;
    let z = 1.0 - 2.0 * rng.random::<f32>();
    let r = (1.0 - z * z).max(0.0).sqrt();
    unit_or(Vec3::new(r * theta.cos(), r * theta.sin(), z), Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_unit_vectors_are_unit_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_random_unit_vectors_cover_both_hemispheres() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let ups = (0..500)
            .filter(|_| random_unit_vector(&mut rng).y > 0.0)
            .count();
        assert!(ups > 150 && ups < 350, "ups = {ups}");
    }

    #[test]
    fn test_unit_or_fallback() {
        assert_eq!(unit_or(Vec3::ZERO, Vec3::Z), Vec3::Z);
        assert_eq!(unit_or(Vec3::new(0.0, 3.0, 0.0), Vec3::Z), Vec3::Y);
        assert_eq!(unit_or(Vec3::splat(f32::INFINITY), Vec3::X), Vec3::X);
    }
}
