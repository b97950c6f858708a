use crate::gnc::control::lqr_design::LqrDesign;
use crate::gnc::control::lqr_errors::LqrErrors;
use nalgebra as na;

/// Linear state-feedback attitude controller.
///
/// Holds the 3x6 gain K and evaluates tau = -K * [attitude_error; rate_error]
/// at each control update. Reference tracking, actuator saturation and the
/// nonlinear propagation itself belong to the simulation engine consuming
/// these torques.
pub struct LqrAttitudeController {
    gain: na::Matrix3x6<f64>,
}

impl LqrAttitudeController {
    pub fn new(gain: na::Matrix3x6<f64>) -> Self {
        Self { gain }
    }

    /// Synthesizes the gain for a validated design and wraps it.
    pub fn from_design(design: &LqrDesign) -> Result<Self, LqrErrors> {
        Ok(Self::new(design.synthesize_gain()?))
    }

    pub fn gain(&self) -> &na::Matrix3x6<f64> {
        &self.gain
    }

    pub fn compute_control_torque(
        &self,
        attitude_error: &na::Vector3<f64>,
        rate_error: &na::Vector3<f64>,
    ) -> na::Vector3<f64> {
        let mut error_state = na::Vector6::zeros();
        error_state.fixed_rows_mut::<3>(0).copy_from(attitude_error);
        error_state.fixed_rows_mut::<3>(3).copy_from(rate_error);

        -(self.gain * error_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra as na;

    fn unit_design() -> LqrDesign {
        let ones = na::Vector3::new(1.0, 1.0, 1.0);
        LqrDesign::new(na::Matrix3::identity(), ones, ones, ones).unwrap()
    }

    #[test]
    fn zero_error_commands_zero_torque() {
        let controller = LqrAttitudeController::from_design(&unit_design()).unwrap();
        let torque =
            controller.compute_control_torque(&na::Vector3::zeros(), &na::Vector3::zeros());
        assert_abs_diff_eq!(torque, na::Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn torque_opposes_the_error() {
        let controller = LqrAttitudeController::from_design(&unit_design()).unwrap();

        // Unit inertia with unit weights gives attitude gain 1, rate gain
        // sqrt(3) on each decoupled axis.
        let attitude_error = na::Vector3::new(0.1, 0.0, 0.0);
        let rate_error = na::Vector3::new(0.2, 0.0, 0.0);
        let torque = controller.compute_control_torque(&attitude_error, &rate_error);

        let expected_x = -(0.1 + 3.0_f64.sqrt() * 0.2);
        assert_abs_diff_eq!(torque[0], expected_x, epsilon = 1e-4);
        assert_abs_diff_eq!(torque[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(torque[2], 0.0, epsilon = 1e-6);
    }
}
