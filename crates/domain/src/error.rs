//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HeatHubError`] via `#[from]` (or an explicit `From` impl for adapter
//! errors that are boxed into [`HeatHubError::Storage`]).

use std::fmt;

/// Boxed error used for collaborator and adapter sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// External collaborator a cycle talks to.
///
/// Also used as the `device` column of persisted log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collaborator {
    /// Room-thermostat gateway.
    Gateway,
    /// Cloud-connected wireless button.
    Button,
    /// Cloud-controlled boiler.
    Boiler,
}

impl Collaborator {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::Button => "button",
            Self::Boiler => "boiler",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Collaborator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gateway" => Ok(Self::Gateway),
            "button" => Ok(Self::Button),
            "boiler" => Ok(Self::Boiler),
            other => Err(ValidationError::UnknownCollaborator(other.to_string())),
        }
    }
}

/// Top-level error for heathub operations.
#[derive(Debug, thiserror::Error)]
pub enum HeatHubError {
    /// A collaborator could not be reached.
    #[error("{collaborator} is unreachable")]
    Connectivity {
        /// Which collaborator failed.
        collaborator: Collaborator,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },

    /// A collaborator rejected our credentials. Not retriable without
    /// operator intervention.
    #[error("authentication with {collaborator} failed")]
    Authentication {
        /// Which collaborator failed.
        collaborator: Collaborator,
        /// Underlying error.
        #[source]
        source: BoxError,
    },

    /// A multi-step boiler write stopped half way.
    #[error(transparent)]
    PartialWrite(#[from] PartialWriteError),

    /// A collaborator answered with a malformed document.
    #[error("malformed {collaborator} response")]
    DataShape {
        /// Which collaborator answered.
        collaborator: Collaborator,
        /// What was wrong with the document.
        #[source]
        source: DataShapeError,
    },

    /// Domain validation failed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Persistence layer failure.
    #[error("storage error")]
    Storage(#[source] BoxError),
}

impl HeatHubError {
    /// Shorthand for [`HeatHubError::Connectivity`].
    pub fn connectivity(collaborator: Collaborator, source: impl Into<BoxError>) -> Self {
        Self::Connectivity {
            collaborator,
            source: source.into(),
        }
    }

    /// Shorthand for [`HeatHubError::Authentication`].
    pub fn authentication(collaborator: Collaborator, source: impl Into<BoxError>) -> Self {
        Self::Authentication {
            collaborator,
            source: source.into(),
        }
    }

    /// Shorthand for [`HeatHubError::DataShape`].
    #[must_use]
    pub fn data_shape(collaborator: Collaborator, source: DataShapeError) -> Self {
        Self::DataShape {
            collaborator,
            source,
        }
    }

    /// Whether the error only degrades a single signal instead of aborting
    /// the cycle.
    #[must_use]
    pub fn is_degradable(&self) -> bool {
        matches!(self, Self::DataShape { .. })
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The button working duration must be finite and strictly positive.
    #[error("working duration must be a positive number of minutes, got {0}")]
    InvalidWorkingDuration(f64),

    /// A temperature value is NaN or infinite.
    #[error("{field} must be a finite temperature, got {value}")]
    NonFiniteTemperature {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Quiet-hours bounds must differ.
    #[error("quiet hours start and end must differ")]
    EmptyQuietHours,

    /// A flag key must not be empty.
    #[error("flag key must not be empty")]
    EmptyFlagKey,

    /// Unrecognised collaborator name.
    #[error("unknown collaborator `{0}`")]
    UnknownCollaborator(String),

    /// Unrecognised log severity name.
    #[error("unknown severity `{0}`")]
    UnknownSeverity(String),
}

/// A record looked up by key does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    /// Kind of record (e.g. `"Flag"`).
    pub entity: &'static str,
    /// The key that was looked up.
    pub id: String,
}

/// A collaborator response lacks the fields we need.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataShapeError {
    /// A required field is absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A field is present with the wrong type.
    #[error("field `{field}` should be {expected}")]
    WrongType {
        /// JSON path of the field.
        field: String,
        /// Expected type description.
        expected: &'static str,
    },

    /// A timestamp cannot be represented.
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

/// One of the boiler writes issued by the command dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStep {
    /// Manual room-temperature target.
    RoomTemperature,
    /// Manual-override flag.
    OverrideStatus,
    /// Manual-override temperature.
    OverrideTemperature,
}

impl fmt::Display for WriteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RoomTemperature => "room temperature",
            Self::OverrideStatus => "override status",
            Self::OverrideTemperature => "override temperature",
        })
    }
}

/// A clock-mode write sequence failed after at least one write succeeded.
///
/// The boiler is left with `completed` applied and everything from `failed`
/// onward missing.
#[derive(Debug, thiserror::Error)]
#[error("boiler write sequence stopped at {failed} after {} successful write(s)", .completed.len())]
pub struct PartialWriteError {
    /// Writes that were acknowledged, in issue order.
    pub completed: Vec<WriteStep>,
    /// The write that failed.
    pub failed: WriteStep,
    /// Why it failed.
    #[source]
    pub source: Box<HeatHubError>,
}
