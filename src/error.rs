//! Error types for set operations.
//!
//! Every fallible operation on a [`Set`](crate::Set) returns [`SetError`].
//! Errors are reported at the point of detection; a failed mutating call
//! leaves the receiver exactly as it was when the error was raised before
//! any mutation (frozen checks and argument-shape checks always run first).

/// Represents an attempt to mutate a frozen set.
///
/// # Examples
///
/// ```rust
/// use ordset::FrozenStateError;
///
/// let error = FrozenStateError { type_name: "Set" };
/// assert_eq!(format!("{error}"), "can't modify frozen Set");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrozenStateError {
    /// The display name of the frozen collection.
    pub type_name: &'static str,
}

impl std::fmt::Display for FrozenStateError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "can't modify frozen {}", self.type_name)
    }
}

impl std::error::Error for FrozenStateError {}

/// Represents an operand of the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// The source exposes neither a bulk nor a per-element iteration entry point.
    NotEnumerable,
    /// Flattening reached a set that is already being expanded.
    RecursiveSet,
}

impl std::fmt::Display for ArgumentError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEnumerable => formatter.write_str("value must be enumerable"),
            Self::RecursiveSet => formatter.write_str("tried to flatten recursive Set"),
        }
    }
}

impl std::error::Error for ArgumentError {}

/// Represents errors that can occur when working with sets.
///
/// # Examples
///
/// ```rust
/// use ordset::{ArgumentError, SetError};
///
/// let error = SetError::from(ArgumentError::RecursiveSet);
/// assert!(error.is_argument_error());
/// assert_eq!(format!("{error}"), "tried to flatten recursive Set");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// A mutating call was made on a frozen set.
    FrozenState(FrozenStateError),
    /// An operand had the wrong shape.
    Argument(ArgumentError),
    /// A nested set could not be read because it is mutably borrowed.
    Borrowed,
}

impl SetError {
    /// Returns `true` for [`SetError::FrozenState`].
    #[must_use]
    pub const fn is_frozen_error(&self) -> bool {
        matches!(self, Self::FrozenState(_))
    }

    /// Returns `true` for [`SetError::Argument`].
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(self, Self::Argument(_))
    }
}

impl std::fmt::Display for SetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrozenState(error) => write!(formatter, "{error}"),
            Self::Argument(error) => write!(formatter, "{error}"),
            Self::Borrowed => formatter.write_str("nested set is already mutably borrowed"),
        }
    }
}

impl std::error::Error for SetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FrozenState(error) => Some(error),
            Self::Argument(error) => Some(error),
            Self::Borrowed => None,
        }
    }
}

impl From<FrozenStateError> for SetError {
    fn from(error: FrozenStateError) -> Self {
        Self::FrozenState(error)
    }
}

impl From<ArgumentError> for SetError {
    fn from(error: ArgumentError) -> Self {
        Self::Argument(error)
    }
}
