use nalgebra as na;

pub trait SpacecraftProperties {
    fn mass(&self) -> f64;
    fn inertia_tensor(&self) -> na::Matrix3<f64>;
}
