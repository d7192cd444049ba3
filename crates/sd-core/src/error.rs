use thiserror::Error;

/// Errors originating from the core: rejected before any computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A dithering parameter is outside its valid domain.
    #[error("Paramètre invalide : {name} = {value}")]
    InvalidParameter {
        /// Parameter name as exposed on the CLI/config.
        name: &'static str,
        /// Offending value, rendered for display.
        value: String,
    },

    /// The input grid is empty or not rectangular.
    #[error("Grille d'entrée invalide : {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidParameter`].
    pub(crate) fn param(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}
