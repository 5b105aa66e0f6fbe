use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors raised while constructing circuit inputs.
///
/// Inputs are validated once, at construction, so that malformed values
/// (zero voltage, a power factor above one, NaN ambient temperature) never
/// reach the selection algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// A numeric input violated its constraint.
    #[error("invalid {field}: {source}")]
    Invalid {
        /// Name of the offending input.
        field: &'static str,

        /// The violated constraint.
        #[source]
        source: ConstraintError,
    },

    /// Only single-phase and three-phase circuits are supported.
    #[error("unsupported phase count {0}, expected 1 or 3")]
    UnsupportedPhases(u8),
}

impl InputError {
    /// Returns a closure tagging a [`ConstraintError`] with the field it came from.
    pub(crate) fn field(field: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::Invalid { field, source }
    }
}
