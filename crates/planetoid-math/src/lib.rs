//! Orbit position kernel, exponential smoothing, and sampling helpers shared by
//! the planetoid camera and orb simulation.

mod ease;
mod orbit;
mod sampling;

pub use ease::{ease, ease_factor};
pub use orbit::{OrbitBasis, orbit_basis, orbit_position};
pub use sampling::{random_unit_vector, unit_or};
