use crate::models::spacecraft::SpacecraftProperties;
use nalgebra as na;

pub struct SimpleSat;

impl SimpleSat {
    pub const MASS: f64 = 100.0; // kg

    pub fn inertia_tensor() -> na::Matrix3<f64> {
        na::Matrix3::new(10.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 10.0)
    }

    /// Nominal regulation weight profile: (attitude, rate, control effort).
    pub fn nominal_lqr_weights() -> (na::Vector3<f64>, na::Vector3<f64>, na::Vector3<f64>) {
        (
            na::Vector3::new(0.2, 0.2, 0.2),
            na::Vector3::new(0.9, 0.9, 0.9),
            na::Vector3::new(0.5, 0.5, 0.5),
        )
    }
}

impl SpacecraftProperties for SimpleSat {
    fn mass(&self) -> f64 {
        Self::MASS
    }

    fn inertia_tensor(&self) -> na::Matrix3<f64> {
        Self::inertia_tensor()
    }
}
