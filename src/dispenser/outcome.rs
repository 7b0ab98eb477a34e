use std::fmt::Display;

use super::error::PreparationError;

/// Final result of one preparation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparationOutcome {
    Prepared { beverage: String },
    Failed(PreparationError),
}

impl PreparationOutcome {
    pub fn beverage(&self) -> &str {
        match self {
            Self::Prepared { beverage } => beverage,
            Self::Failed(error) => error.beverage(),
        }
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self, Self::Prepared { .. })
    }

    pub fn error(&self) -> Option<&PreparationError> {
        match self {
            Self::Prepared { .. } => None,
            Self::Failed(error) => Some(error),
        }
    }
}

impl From<PreparationError> for PreparationOutcome {
    fn from(error: PreparationError) -> Self {
        Self::Failed(error)
    }
}

impl Display for PreparationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prepared { beverage } => write!(f, "beverage {} is prepared", beverage),
            Self::Failed(error) => write!(f, "{}", error),
        }
    }
}
