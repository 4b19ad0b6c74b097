//! Orbit position kernel.
//!
//! An orbit is described by a unit plane normal, an angular phase within the
//! plane, a radius, and a height offset along the normal. The kernel turns those
//! scalars into a world-space position. It is pure and may be evaluated at any
//! time, including while the plane normal is mid-transition.

use glam::Vec3;

use crate::sampling::unit_or;

/// Above this `|normal . up|` the up axis is too close to the normal to be a
/// stable helper and the X axis is used instead.
const VERTICAL_THRESHOLD: f32 = 0.9;

/// Orthonormal frame of an orbital plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBasis {
    /// In-plane axis at `angle = 0`.
    pub right: Vec3,
    /// In-plane axis at `angle = pi/2`. Satisfies `right x forward = normal`.
    pub forward: Vec3,
    /// Unit plane normal.
    pub normal: Vec3,
}

/// Build the in-plane basis for `plane_normal`.
///
/// Zero or non-finite normals fall back to +Y, so the result is always finite.
#[must_use]
pub fn orbit_basis(plane_normal: Vec3) -> OrbitBasis {
    let normal = unit_or(plane_normal, Vec3::Y);
    let helper = if normal.dot(Vec3::Y).abs() > VERTICAL_THRESHOLD {
        Vec3::X
    } else {
        Vec3::Y
    };

    // Gram-Schmidt: project the helper onto the plane.
    let projected = helper - normal * normal.dot(helper);
    let right = unit_or(projected, normal.any_orthonormal_vector());
    let forward = normal.cross(right);

    OrbitBasis {
        right,
        forward,
        normal,
    }
}

/// World position of an orbiting body.
///
/// `right * cos(angle) * radius + forward * sin(angle) * radius + normal * height`
#[must_use]
pub fn orbit_position(angle: f32, radius: f32, height: f32, plane_normal: Vec3) -> Vec3 {
    let basis = orbit_basis(plane_normal);
    let (sin, cos) = angle.sin_cos();
    basis.right * (cos * radius) + basis.forward * (sin * radius) + basis.normal * height
}
