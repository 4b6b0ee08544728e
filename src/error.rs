//! Error types for the pose coaching library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A joint name outside the landmark vocabulary
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    /// A pose name missing from the registry
    #[error("Unknown pose: {0}")]
    UnknownPose(String),

    /// A registered pose with no joint triples to evaluate
    #[error("Pose '{0}' has no joint triples configured")]
    EmptyJointConfig(String),

    /// An empty joint triple slice passed straight to a comparison
    #[error("No joint triples configured")]
    NoJointTriples,

    /// A configured joint is absent from a landmark set
    #[error("Joint '{joint}' required by the joint configuration is missing from the {set} landmark set")]
    MissingJoint {
        /// Name of the missing joint
        joint: String,
        /// Which landmark set lacked it ("user" or "reference")
        set: String,
    },

    /// User and reference landmarks use different coordinate conventions
    #[error("Coordinate space mismatch: user landmarks are {user}, reference landmarks are {reference}")]
    CoordinateSpaceMismatch {
        /// Coordinate space of the user set
        user: String,
        /// Coordinate space of the reference set
        reference: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
