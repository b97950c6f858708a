// Numerical tolerances for the gain-synthesis pipeline. Relative tolerances
// are scaled by the norm of the matrix under test.
pub const SYMMETRY_TOLERANCE: f64 = 1e-10; // Relative inertia asymmetry bound
pub const DEFINITENESS_TOLERANCE: f64 = 1e-12; // Relative smallest-eigenvalue margin
pub const SINGULARITY_TOLERANCE: f64 = 1e-12; // Relative determinant threshold
pub const RANK_TOLERANCE: f64 = 1e-10; // Singular-value cutoff for rank checks

// Riccati solver settings
pub const IMAGINARY_AXIS_TOLERANCE: f64 = 1e-9; // Hamiltonian eigenvalue margin about the imaginary axis
pub const CARE_RESIDUAL_TOLERANCE: f64 = 1e-8; // Relative residual bound on the solved equation
pub const SUBSPACE_CONDITION_LIMIT: f64 = 1e12; // Condition-number cap for the subspace basis inversion
pub const SCHUR_ITERATION_LIMIT: usize = 200; // QR iteration cap for the 12x12 spectrum
pub const SIGN_ITERATION_LIMIT: usize = 100; // Newton iteration cap for the matrix sign function
pub const SIGN_CONVERGENCE_TOLERANCE: f64 = 1e-12; // Relative step size declaring sign convergence
