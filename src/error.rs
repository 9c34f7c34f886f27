use thiserror::Error;

use crate::types::Var;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A variable was read at a point where no path defines it.
    #[error("variable {var} is not defined at this point")]
    UndefinedVariable { var: Var },

    /// A CFG edge names a node past the virtual exit.
    #[error("node index {index} is out of range (graph has {len} nodes plus the exit)")]
    NodeOutOfRange { index: usize, len: usize },
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
