/// Errors from combination evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Combination size outside the playable [2, 5] window.
    InvalidSize(usize),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSize(n) => write!(f, "invalid combination size: {}", n),
        }
    }
}

impl std::error::Error for EvalError {}
