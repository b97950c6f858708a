use crate::constants::SINGULARITY_TOLERANCE;
use crate::gnc::control::lqr_errors::LqrErrors;
use nalgebra as na;

/// Linearized attitude-error dynamics for a rigid spacecraft.
///
/// State: x = [phi; e_w] with phi the small-angle attitude error (rad) and
/// e_w the angular-rate error (rad/s). The model encodes
///   phi_dot = e_w
///   e_w_dot = J^-1 * tau
/// assuming zero reference angular velocity and neglecting the gyroscopic
/// coupling w x (Jw). Gains designed against it are therefore only locally
/// valid for small attitude and rate errors about the reference.
#[derive(Debug, Clone)]
pub struct StateSpaceModel {
    pub a: na::Matrix6<f64>,
    pub b: na::Matrix6x3<f64>,
}

impl StateSpaceModel {
    /// Builds the error-state model from the body-frame inertia tensor
    /// (kg·m²). Fails with `SingularMatrix` when the determinant is
    /// numerically zero relative to the tensor's norm.
    pub fn from_inertia(inertia: &na::Matrix3<f64>) -> Result<Self, LqrErrors> {
        let det = inertia.determinant();
        if det.abs() <= SINGULARITY_TOLERANCE * inertia.norm().powi(3) {
            return Err(LqrErrors::SingularMatrix);
        }
        let inertia_inv = inertia.try_inverse().ok_or(LqrErrors::SingularMatrix)?;

        // phi_dot = e_w
        let mut a = na::Matrix6::zeros();
        a.fixed_view_mut::<3, 3>(0, 3)
            .copy_from(&na::Matrix3::identity());

        // e_w_dot = J^-1 * tau
        let mut b = na::Matrix6x3::zeros();
        b.fixed_view_mut::<3, 3>(3, 0).copy_from(&inertia_inv);

        Ok(StateSpaceModel { a, b })
    }
}

/// Diagonal quadratic cost for the regulation problem:
/// integral of x^T Q x + u^T R u.
#[derive(Debug, Clone)]
pub struct CostWeights {
    pub q: na::Matrix6<f64>,
    pub r: na::Matrix3<f64>,
}

impl CostWeights {
    /// Q = diag(attitude, rate) (6 entries), R = diag(control) (3 entries).
    pub fn from_axis_weights(
        attitude: &na::Vector3<f64>,
        rate: &na::Vector3<f64>,
        control: &na::Vector3<f64>,
    ) -> Self {
        let mut q_diagonal = na::Vector6::zeros();
        q_diagonal.fixed_rows_mut::<3>(0).copy_from(attitude);
        q_diagonal.fixed_rows_mut::<3>(3).copy_from(rate);

        CostWeights {
            q: na::Matrix6::from_diagonal(&q_diagonal),
            r: na::Matrix3::from_diagonal(control),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra as na;

    #[test]
    fn model_has_double_integrator_structure() {
        let model = StateSpaceModel::from_inertia(&na::Matrix3::identity()).unwrap();

        let mut expected_a = na::Matrix6::zeros();
        expected_a
            .fixed_view_mut::<3, 3>(0, 3)
            .copy_from(&na::Matrix3::identity());
        assert_abs_diff_eq!(model.a, expected_a, epsilon = 1e-15);

        let mut expected_b = na::Matrix6x3::zeros();
        expected_b
            .fixed_view_mut::<3, 3>(3, 0)
            .copy_from(&na::Matrix3::identity());
        assert_abs_diff_eq!(model.b, expected_b, epsilon = 1e-15);
    }

    #[test]
    fn inverse_inertia_enters_the_input_block() {
        let inertia = na::Matrix3::from_diagonal(&na::Vector3::new(2.0, 4.0, 5.0));
        let model = StateSpaceModel::from_inertia(&inertia).unwrap();

        let lower = model.b.fixed_view::<3, 3>(3, 0);
        let expected = na::Matrix3::from_diagonal(&na::Vector3::new(0.5, 0.25, 0.2));
        assert_abs_diff_eq!(lower.into_owned(), expected, epsilon = 1e-12);
    }

    #[test]
    fn singular_inertia_is_rejected() {
        let inertia = na::Matrix3::from_diagonal(&na::Vector3::new(1.0, 0.0, 1.0));
        let err = StateSpaceModel::from_inertia(&inertia).unwrap_err();
        assert_eq!(err, LqrErrors::SingularMatrix);
    }

    #[test]
    fn weights_land_on_the_diagonals() {
        let weights = CostWeights::from_axis_weights(
            &na::Vector3::new(0.2, 0.3, 0.4),
            &na::Vector3::new(0.9, 0.8, 0.7),
            &na::Vector3::new(0.5, 0.6, 0.7),
        );

        let q_diagonal = na::Vector6::new(0.2, 0.3, 0.4, 0.9, 0.8, 0.7);
        assert_abs_diff_eq!(
            weights.q,
            na::Matrix6::from_diagonal(&q_diagonal),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            weights.r,
            na::Matrix3::from_diagonal(&na::Vector3::new(0.5, 0.6, 0.7)),
            epsilon = 1e-15
        );
    }
}
