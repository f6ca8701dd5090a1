//! Common error infrastructure for tactics-core.
//!
//! The simulation itself never raises errors to callers during a tick: an
//! unreachable destination, an unregistered state or a lost target all
//! degrade to a safe default (stay idle, skip the action, retry next tick).
//! Errors in this module are reserved for match *construction*: building
//! grids, registering agents and validating catalogues.

use crate::agent::AgentId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: unknown weapon name, spawn inside a wall
    Validation,

    /// Unexpected state inconsistency; indicates a bug in the caller.
    ///
    /// Examples: agent id that was never registered
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Common trait for all tactics-core errors.
pub trait SimError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Errors raised while building a tile grid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("tile grid must contain at least one row and one column")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
}

/// Errors raised while assembling a [`crate::World`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("agent {0} does not exist")]
    UnknownAgent(AgentId),

    #[error("weapon `{0}` is not in the catalogue")]
    UnknownWeapon(String),

    #[error("weapon catalogue does not contain its default weapon `{0}`")]
    MissingDefaultWeapon(String),

    #[error("agent name `{0}` is already registered")]
    DuplicateName(String),

    #[error("spawn point ({x}, {y}) for `{name}` is not on a walkable tile")]
    UnwalkableSpawn { name: String, x: f32, y: f32 },

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl SimError for CoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAgent(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAgent(_) => "UNKNOWN_AGENT",
            Self::UnknownWeapon(_) => "UNKNOWN_WEAPON",
            Self::MissingDefaultWeapon(_) => "MISSING_DEFAULT_WEAPON",
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::UnwalkableSpawn { .. } => "UNWALKABLE_SPAWN",
            Self::Grid(_) => "INVALID_GRID",
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
