mod config;
mod constants;
mod gnc;
mod models;
mod numerics;

use config::spacecraft::SimpleSat;
use csv::Writer;
use gnc::control::attitude_controller::LqrAttitudeController;
use gnc::control::lqr_design::LqrDesign;
use hifitime::Epoch;
use models::spacecraft::SpacecraftProperties;
use models::StateSpaceModel;
use nalgebra as na;
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    static SPACECRAFT: SimpleSat = SimpleSat;
    let run_epoch = Epoch::now().expect("Failed to get current time");
    println!(
        "Gain design for {:.1} kg spacecraft started at {}",
        SPACECRAFT.mass(),
        run_epoch
    );

    let inertia = SPACECRAFT.inertia_tensor();
    let (attitude_weights, rate_weights, control_weights) = SimpleSat::nominal_lqr_weights();

    // Create output directory if it doesn't exist
    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;

    // Create CSV writer
    let file = File::create(output_dir.join("gain_design.csv"))?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(&[
        "Control Weight Scale",
        "K Attitude X",
        "K Attitude Y",
        "K Attitude Z",
        "K Rate X",
        "K Rate Y",
        "K Rate Z",
        "Slowest Pole Re (1/s)",
    ])?;

    // Sweep the control-effort weight: cheap torque gives stiff gains,
    // expensive torque gives soft ones.
    for scale in [0.1, 0.5, 1.0, 5.0, 10.0] {
        let design = LqrDesign::new(
            inertia,
            attitude_weights,
            rate_weights,
            control_weights * scale,
        )?;
        let gain = design.synthesize_gain()?;

        let model = StateSpaceModel::from_inertia(&inertia)?;
        let closed_loop = model.a - model.b * gain;
        let slowest_pole = closed_loop
            .complex_eigenvalues()
            .iter()
            .map(|eigenvalue| eigenvalue.re)
            .fold(f64::NEG_INFINITY, f64::max);

        writer.write_record(&[
            &scale.to_string(),
            &gain[(0, 0)].to_string(),
            &gain[(1, 1)].to_string(),
            &gain[(2, 2)].to_string(),
            &gain[(0, 3)].to_string(),
            &gain[(1, 4)].to_string(),
            &gain[(2, 5)].to_string(),
            &slowest_pole.to_string(),
        ])?;
    }

    writer.flush()?;
    println!("Gain design data has been written to output/gain_design.csv");

    // Commanded torque for the nominal design at a representative error
    let design = LqrDesign::new(inertia, attitude_weights, rate_weights, control_weights)?;
    let controller = LqrAttitudeController::from_design(&design)?;
    println!("Nominal gain matrix K = {:.4}", controller.gain());

    let attitude_error = na::Vector3::new(0.1, -0.06, 0.04); // rad, small-angle
    let rate_error = na::Vector3::new(0.1, -0.05, 0.02); // rad/s
    let torque = controller.compute_control_torque(&attitude_error, &rate_error);
    println!(
        "Commanded torque at the reference error: [{:.4}, {:.4}, {:.4}] N⋅m",
        torque[0], torque[1], torque[2]
    );

    Ok(())
}
