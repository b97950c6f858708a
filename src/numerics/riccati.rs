use crate::constants::{
    CARE_RESIDUAL_TOLERANCE, IMAGINARY_AXIS_TOLERANCE, RANK_TOLERANCE, SCHUR_ITERATION_LIMIT,
    SIGN_CONVERGENCE_TOLERANCE, SIGN_ITERATION_LIMIT, SUBSPACE_CONDITION_LIMIT,
};
use crate::gnc::control::lqr_errors::LqrErrors;
use nalgebra as na;

type Matrix12 = na::SMatrix<f64, 12, 12>;

/// Solves the continuous algebraic Riccati equation
///   A^T P + P A - P B R^-1 B^T P + Q = 0
/// for the stabilizing symmetric solution P.
///
/// The solution is extracted from the stable invariant subspace of the 12x12
/// Hamiltonian H = [[A, -B R^-1 B^T], [-Q, -A^T]]. The spectrum of H is
/// screened first: exactly six eigenvalues must lie strictly in the open left
/// half-plane and none may sit on the imaginary axis, otherwise the problem
/// admits no reliable stabilizing solution. The subspace basis itself comes
/// from the Newton iteration for the matrix sign of H, which converges
/// quadratically and keeps its accuracy when stable eigenvalues repeat (as
/// they do for axis-symmetric spacecraft, where eigenvector-by-eigenvector
/// extraction degenerates). Stacking the basis as [X1; X2] gives
/// P = X2 * X1^-1, which is then symmetrized and checked against the
/// residual of the equation.
///
/// Failure modes:
///   `UnstabilizableSystem` - eigenvalues on or within tolerance of the
///     imaginary axis, or a stable eigenvalue count other than six.
///   `NumericalConvergence` - iteration caps exhausted, an ill-conditioned
///     subspace basis, or a residual above tolerance.
pub fn solve_care(
    a: &na::Matrix6<f64>,
    b: &na::Matrix6x3<f64>,
    q: &na::Matrix6<f64>,
    r: &na::Matrix3<f64>,
) -> Result<na::Matrix6<f64>, LqrErrors> {
    let r_inv = r.try_inverse().ok_or(LqrErrors::SingularMatrix)?;
    let g = b * r_inv * b.transpose();

    let mut hamiltonian = Matrix12::zeros();
    hamiltonian.fixed_view_mut::<6, 6>(0, 0).copy_from(a);
    hamiltonian.fixed_view_mut::<6, 6>(0, 6).copy_from(&(-g));
    hamiltonian.fixed_view_mut::<6, 6>(6, 0).copy_from(&(-q));
    hamiltonian
        .fixed_view_mut::<6, 6>(6, 6)
        .copy_from(&(-a.transpose()));

    check_dichotomy(&hamiltonian)?;

    let sign = matrix_sign(&hamiltonian)?;

    // Columns spanning the stable invariant subspace: the range of the
    // spectral projector (I - sign(H)) / 2.
    let projector = (Matrix12::identity() - sign) * 0.5;
    let svd = projector.svd(true, false);
    let basis = svd.u.ok_or_else(|| {
        LqrErrors::NumericalConvergence("projector decomposition failed".to_string())
    })?;
    if svd.singular_values[5] <= RANK_TOLERANCE * svd.singular_values[0] {
        return Err(LqrErrors::NumericalConvergence(
            "stable subspace is rank deficient".to_string(),
        ));
    }

    let x1 = basis.fixed_view::<6, 6>(0, 0).into_owned();
    let x2 = basis.fixed_view::<6, 6>(6, 0).into_owned();

    let x1_singular_values = x1.singular_values();
    if x1_singular_values[5] <= 0.0
        || x1_singular_values[0] / x1_singular_values[5] > SUBSPACE_CONDITION_LIMIT
    {
        return Err(LqrErrors::NumericalConvergence(
            "subspace basis is ill-conditioned".to_string(),
        ));
    }
    let x1_inv = x1.try_inverse().ok_or_else(|| {
        LqrErrors::NumericalConvergence("subspace basis is not invertible".to_string())
    })?;

    let p = x2 * x1_inv;
    let p = (p + p.transpose()) * 0.5;

    // Substitute P back into the equation, scaled by the problem magnitude.
    let residual = a.transpose() * p + p * a - p * g * p + q;
    let scale = q.norm() + p.norm().powi(2) * b.norm().powi(2) / r.norm();
    if residual.norm() > CARE_RESIDUAL_TOLERANCE * scale {
        return Err(LqrErrors::NumericalConvergence(format!(
            "residual norm {:.3e} exceeds tolerance",
            residual.norm()
        )));
    }

    Ok(p)
}

/// Requires the Hamiltonian spectrum to split six/six about the imaginary
/// axis with a margin. Eigenvalues near the axis indicate marginal
/// stabilizability or detectability, where the stable subspace is not
/// numerically trustworthy.
fn check_dichotomy(hamiltonian: &Matrix12) -> Result<(), LqrErrors> {
    let schur = na::linalg::Schur::try_new(*hamiltonian, f64::EPSILON, SCHUR_ITERATION_LIMIT)
        .ok_or_else(|| {
            LqrErrors::NumericalConvergence("Hamiltonian spectrum did not converge".to_string())
        })?;
    let eigenvalues = schur.complex_eigenvalues();

    let margin = IMAGINARY_AXIS_TOLERANCE * hamiltonian.norm().max(1.0);
    if eigenvalues.iter().any(|lambda| lambda.re.abs() <= margin) {
        return Err(LqrErrors::UnstabilizableSystem);
    }
    let stable = eigenvalues.iter().filter(|lambda| lambda.re < 0.0).count();
    if stable != 6 {
        return Err(LqrErrors::UnstabilizableSystem);
    }
    Ok(())
}

/// Newton iteration for sign(H) with determinant scaling:
///   Z <- (mu Z + (mu Z)^-1) / 2,  mu = |det Z|^(-1/12).
/// Quadratically convergent whenever no eigenvalue lies on the imaginary
/// axis, which `check_dichotomy` has already established.
fn matrix_sign(hamiltonian: &Matrix12) -> Result<Matrix12, LqrErrors> {
    let mut z = *hamiltonian;
    for _ in 0..SIGN_ITERATION_LIMIT {
        let z_inv = z.try_inverse().ok_or_else(|| {
            LqrErrors::NumericalConvergence("sign iterate became singular".to_string())
        })?;
        let mu = z.determinant().abs().powf(-1.0 / 12.0);
        let z_next = (z * mu + z_inv / mu) * 0.5;
        let step = (z_next - z).norm();
        z = z_next;
        if step <= SIGN_CONVERGENCE_TOLERANCE * z.norm() {
            return Ok(z);
        }
    }
    Err(LqrErrors::NumericalConvergence(
        "matrix sign iteration exceeded its cap".to_string(),
    ))
}
