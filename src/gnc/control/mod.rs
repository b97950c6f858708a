pub mod attitude_controller;
pub mod lqr_design;
pub mod lqr_errors;
