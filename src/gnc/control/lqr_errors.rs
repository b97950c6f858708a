use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum LqrErrors {
    InvalidInertia(String),
    InvalidWeights(String),
    SingularMatrix,
    UnstabilizableSystem,
    NumericalConvergence(String),
}

impl fmt::Display for LqrErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LqrErrors::InvalidInertia(msg) => write!(f, "Invalid inertia tensor: {}", msg),
            LqrErrors::InvalidWeights(msg) => write!(f, "Invalid cost weights: {}", msg),
            LqrErrors::SingularMatrix => write!(f, "Inertia tensor is singular"),
            LqrErrors::UnstabilizableSystem => {
                write!(f, "Error-state model is not stabilizable")
            }
            LqrErrors::NumericalConvergence(msg) => {
                write!(f, "Riccati solve did not converge: {}", msg)
            }
        }
    }
}

impl Error for LqrErrors {}
