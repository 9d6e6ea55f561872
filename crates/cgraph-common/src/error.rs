//! Error taxonomy for graph construction and content operations.
//!
//! Every error is fatal to the call that raised it. Messages are fixed per
//! kind so consumers can match on them.

use crate::types::AxisId;
use thiserror::Error;

/// Result type alias for cgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Application-wide error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The `axis` block or one of its mandatory axes is absent.
    #[error("Invalid Input: Axis data is missing")]
    MissingAxis,

    /// An axis has no lower or upper limit.
    #[error("Invalid Input: Axis lower/upper limits are missing for {0}")]
    MissingAxisLimits(AxisId),

    /// An axis lower limit is greater than its upper limit.
    #[error("Invalid Input: Axis lower limit exceeds upper limit for {0}")]
    InvalidAxisLimits(AxisId),

    /// The container selector is absent or blank.
    #[error("Invalid Input: Container selector (bindTo) is missing")]
    MissingBindTo,

    /// The container selector did not resolve to an element.
    #[error("Invalid Input: Container {0} could not be resolved")]
    ContainerNotFound(String),

    /// Content was supplied without a key.
    #[error("Invalid Input: Unique key is missing")]
    MissingKey,

    /// Content was supplied without a values array.
    #[error("Invalid Input: Data points are missing")]
    MissingValues,

    /// Content key collides with an already registered content.
    #[error("Invalid Input: Content key {0} is not unique")]
    NonUniqueKey(String),

    /// A data point x value does not match the x axis type.
    #[error("Invalid Input: Data point x value does not match axis type")]
    AxisTypeMismatch,

    /// A time-series value is not an ISO-8601 date.
    #[error("Invalid Input: {0} is not a valid ISO-8601 date")]
    InvalidDateFormat(String),

    /// A dateline descriptor lacks its value, color, or shape.
    #[error("Invalid Input: Dateline is missing value, color or shape")]
    InvalidDatelineInput,

    /// An eventline descriptor lacks its value or color.
    #[error("Invalid Input: Eventline is missing value or color")]
    InvalidEventlineInput,

    /// A region starts after it ends.
    #[error("Invalid Input: Region start exceeds end")]
    InvalidRegion,

    /// The referenced content is not registered with this graph.
    #[error("Invalid object")]
    InvalidObject,

    /// An axis label is required but absent.
    #[error("Invalid Input: Label text is missing for {0} axis")]
    MissingLabel(AxisId),

    /// Legend click pass-through is on but no handler was registered.
    #[error("Invalid Usage: Legend click pass-through requires an on-click handler")]
    LegendHandlerMissing,

    /// The operation is not permitted in the graph's current lifecycle state.
    #[error("Invalid Usage: {op} is not allowed while the graph is {state}")]
    InvalidState {
        /// Operation that was attempted.
        op: &'static str,
        /// Lifecycle state the graph was in.
        state: String,
    },

    /// Configuration text could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(String),
}

impl GraphError {
    /// Create a new parse error from any displayable source.
    pub fn parse(source: impl std::fmt::Display) -> Self {
        Self::Parse(source.to_string())
    }

    /// Create a new lifecycle error.
    pub fn invalid_state(op: &'static str, state: impl std::fmt::Display) -> Self {
        Self::InvalidState {
            op,
            state: state.to_string(),
        }
    }

    /// Whether the error describes malformed consumer input rather than API misuse.
    pub const fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Self::LegendHandlerMissing | Self::InvalidState { .. } | Self::Parse(_)
        )
    }
}
