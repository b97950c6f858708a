use crate::constants::{
    DEFINITENESS_TOLERANCE, RANK_TOLERANCE, SINGULARITY_TOLERANCE, SYMMETRY_TOLERANCE,
};
use crate::gnc::control::lqr_errors::LqrErrors;
use crate::models::state_space::{CostWeights, StateSpaceModel};
use crate::numerics::riccati::solve_care;
use nalgebra as na;

/// Validated parameters for an LQR attitude-regulation design.
///
/// Construction performs every well-posedness check on the inertia tensor and
/// the three per-axis weight vectors; a value of this type is immutable and
/// always safe to hand to `synthesize_gain`. Wrong-length weight vectors are
/// unrepresentable, the remaining rules are checked here.
#[derive(Debug, Clone)]
pub struct LqrDesign {
    inertia: na::Matrix3<f64>,
    attitude_weights: na::Vector3<f64>,
    rate_weights: na::Vector3<f64>,
    control_weights: na::Vector3<f64>,
}

impl LqrDesign {
    pub fn new(
        inertia: na::Matrix3<f64>,
        attitude_weights: na::Vector3<f64>,
        rate_weights: na::Vector3<f64>,
        control_weights: na::Vector3<f64>,
    ) -> Result<Self, LqrErrors> {
        validate_inertia(&inertia)?;
        validate_weight_vector("attitude", &attitude_weights, false)?;
        validate_weight_vector("rate", &rate_weights, false)?;
        validate_weight_vector("control", &control_weights, true)?;

        Ok(Self {
            inertia,
            attitude_weights,
            rate_weights,
            control_weights,
        })
    }

    #[allow(dead_code)]
    pub fn inertia(&self) -> &na::Matrix3<f64> {
        &self.inertia
    }

    #[allow(dead_code)]
    pub fn attitude_weights(&self) -> &na::Vector3<f64> {
        &self.attitude_weights
    }

    #[allow(dead_code)]
    pub fn rate_weights(&self) -> &na::Vector3<f64> {
        &self.rate_weights
    }

    #[allow(dead_code)]
    pub fn control_weights(&self) -> &na::Vector3<f64> {
        &self.control_weights
    }

    /// Runs the synthesis pipeline: error-state model, stabilizability
    /// guard, Riccati solve, gain assembly. Deterministic; a failure is
    /// returned as-is, never retried.
    pub fn synthesize_gain(&self) -> Result<na::Matrix3x6<f64>, LqrErrors> {
        let model = StateSpaceModel::from_inertia(&self.inertia)?;
        check_stabilizable(&model)?;
        let weights = CostWeights::from_axis_weights(
            &self.attitude_weights,
            &self.rate_weights,
            &self.control_weights,
        );
        let p = solve_care(&model.a, &model.b, &weights.q, &weights.r)?;
        assemble_gain(&model.b, &weights.r, &p)
    }
}

fn validate_inertia(inertia: &na::Matrix3<f64>) -> Result<(), LqrErrors> {
    let norm = inertia.norm();
    if !norm.is_finite() {
        return Err(LqrErrors::InvalidInertia("entries must be finite".to_string()));
    }

    let asymmetry = (inertia - inertia.transpose()).norm();
    if asymmetry > SYMMETRY_TOLERANCE * norm {
        return Err(LqrErrors::InvalidInertia(format!(
            "tensor is not symmetric (relative asymmetry {:.3e})",
            asymmetry / norm
        )));
    }

    // A singular tensor is reported as such rather than as indefiniteness
    if inertia.determinant().abs() <= SINGULARITY_TOLERANCE * norm.powi(3) {
        return Err(LqrErrors::SingularMatrix);
    }

    let symmetric_part = (inertia + inertia.transpose()) * 0.5;
    let smallest_eigenvalue = symmetric_part.symmetric_eigen().eigenvalues.min();
    if smallest_eigenvalue <= DEFINITENESS_TOLERANCE * norm {
        return Err(LqrErrors::InvalidInertia(format!(
            "tensor is not positive definite (smallest eigenvalue {:.3e})",
            smallest_eigenvalue
        )));
    }

    Ok(())
}

fn validate_weight_vector(
    name: &str,
    weights: &na::Vector3<f64>,
    strictly_positive: bool,
) -> Result<(), LqrErrors> {
    for (axis, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() {
            return Err(LqrErrors::InvalidWeights(format!(
                "{} weight for axis {} is not finite",
                name, axis
            )));
        }
        if strictly_positive && weight <= 0.0 {
            return Err(LqrErrors::InvalidWeights(format!(
                "{} weight for axis {} must be strictly positive, got {}",
                name, axis, weight
            )));
        }
        if weight < 0.0 {
            return Err(LqrErrors::InvalidWeights(format!(
                "{} weight for axis {} must be non-negative, got {}",
                name, axis, weight
            )));
        }
    }
    Ok(())
}

/// Controllability of (A, B) via the rank of [B, AB, ..., A^5 B]. Full rank
/// is guaranteed analytically whenever the inertia tensor is invertible, so
/// a failure here means the model is numerically degenerate.
pub fn check_stabilizable(model: &StateSpaceModel) -> Result<(), LqrErrors> {
    let mut controllability = na::SMatrix::<f64, 6, 18>::zeros();
    let mut block = model.b;
    for power in 0..6 {
        controllability
            .fixed_view_mut::<6, 3>(0, 3 * power)
            .copy_from(&block);
        block = model.a * block;
    }

    let cutoff = RANK_TOLERANCE * controllability.norm().max(1.0);
    if controllability.rank(cutoff) < 6 {
        return Err(LqrErrors::UnstabilizableSystem);
    }
    Ok(())
}

/// K = R^-1 B^T P, shape 3x6. Row i commands torque about axis i; columns
/// 0-2 weigh the attitude error, columns 3-5 the rate error. The inversion
/// cannot fail for weights that passed validation.
pub fn assemble_gain(
    b: &na::Matrix6x3<f64>,
    r: &na::Matrix3<f64>,
    p: &na::Matrix6<f64>,
) -> Result<na::Matrix3x6<f64>, LqrErrors> {
    let r_inv = r.try_inverse().ok_or(LqrErrors::SingularMatrix)?;
    Ok(r_inv * b.transpose() * p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra as na;
    use test_case::test_case;

    fn unit_weights() -> na::Vector3<f64> {
        na::Vector3::new(1.0, 1.0, 1.0)
    }

    #[test_case(
        na::Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0)
        => matches LqrErrors::InvalidInertia(_);
        "indefinite tensor"
    )]
    #[test_case(
        na::Matrix3::new(1.0, 0.5, 0.0, -0.5, 1.0, 0.0, 0.0, 0.0, 1.0)
        => matches LqrErrors::InvalidInertia(_);
        "asymmetric tensor"
    )]
    #[test_case(
        na::Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0)
        => matches LqrErrors::SingularMatrix;
        "singular tensor"
    )]
    #[test_case(
        na::Matrix3::from_element(f64::NAN)
        => matches LqrErrors::InvalidInertia(_);
        "non-finite tensor"
    )]
    fn ill_posed_inertia_is_rejected(inertia: na::Matrix3<f64>) -> LqrErrors {
        LqrDesign::new(inertia, unit_weights(), unit_weights(), unit_weights()).unwrap_err()
    }

    #[test_case(na::Vector3::new(-1.0, 1.0, 1.0); "negative control weight")]
    #[test_case(na::Vector3::new(0.0, 1.0, 1.0); "zero control weight")]
    #[test_case(na::Vector3::new(f64::NAN, 1.0, 1.0); "non-finite control weight")]
    fn inadmissible_control_weights_are_rejected(control: na::Vector3<f64>) {
        let err = LqrDesign::new(
            na::Matrix3::identity() * 10.0,
            unit_weights(),
            unit_weights(),
            control,
        )
        .unwrap_err();
        assert!(matches!(err, LqrErrors::InvalidWeights(_)));
    }

    #[test]
    fn negative_attitude_weight_is_rejected() {
        let err = LqrDesign::new(
            na::Matrix3::identity() * 10.0,
            na::Vector3::new(1.0, -0.1, 1.0),
            unit_weights(),
            unit_weights(),
        )
        .unwrap_err();
        assert!(matches!(err, LqrErrors::InvalidWeights(_)));
    }

    #[test]
    fn zero_attitude_weights_are_admissible() {
        // Rate damping only: Q is positive semi-definite, not definite
        let design = LqrDesign::new(
            na::Matrix3::identity() * 10.0,
            na::Vector3::zeros(),
            unit_weights(),
            unit_weights(),
        );
        assert!(design.is_ok());
    }

    #[test]
    fn stabilizability_guard_accepts_an_invertible_inertia() {
        let model = StateSpaceModel::from_inertia(&na::Matrix3::identity()).unwrap();
        assert!(check_stabilizable(&model).is_ok());
    }

    #[test]
    fn stabilizability_guard_rejects_a_dead_input() {
        let model = StateSpaceModel::from_inertia(&na::Matrix3::identity()).unwrap();
        let degenerate = StateSpaceModel {
            a: model.a,
            b: na::Matrix6x3::zeros(),
        };
        let err = check_stabilizable(&degenerate).unwrap_err();
        assert_eq!(err, LqrErrors::UnstabilizableSystem);
    }
}
