//! Error types for construction, asset loading and the frame host.

use alloc::string::String;
use thiserror::Error;

/// Degenerate parameters rejected when a spring, chain or drag target is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Spring frequency must be positive and finite.
    #[error("spring frequency must be positive and finite")]
    InvalidFrequency,
    /// Spring half-life must be positive and finite.
    #[error("spring half-life must be positive and finite")]
    InvalidHalfLife,
    /// Wrap modulus must be positive and finite.
    #[error("wrap modulus must be positive and finite")]
    InvalidWrap,
    /// A chain needs at least two bodies to carry a link.
    #[error("chain needs at least 2 bodies, got {count}")]
    TooFewElements { count: usize },
    /// Rest length came out zero, negative or non-finite.
    #[error("link rest length must be positive")]
    DegenerateLink,
    /// Link stiffness must be in (0, 1].
    #[error("stiffness must be in (0, 1]")]
    InvalidStiffness,
    /// Body radius must be non-negative and finite.
    #[error("body radius must be non-negative")]
    InvalidRadius,
    /// Air drag must be in [0, 1].
    #[error("drag must be in [0, 1]")]
    InvalidDrag,
    /// Body index is out of range for its chain.
    #[error("body index {index} out of bounds (count: {count})")]
    BodyOutOfBounds { index: usize, count: usize },
    /// No chain with this id lives in the world.
    #[error("unknown chain id {0}")]
    UnknownChain(usize),
}

/// A resource that could not be loaded.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to load `{path}`: {reason}")]
pub struct AssetError {
    pub path: String,
    pub reason: String,
}

impl AssetError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AssetError { path: path.into(), reason: reason.into() }
    }
}

/// Reasons the frame host refuses a lifecycle transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// `run` was called while loads are still in flight.
    #[error("{outstanding} resource load(s) still pending")]
    ResourcesPending { outstanding: usize },
    /// A load failed; startup is aborted.
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// `run` was called twice.
    #[error("frame loop is already running")]
    AlreadyRunning,
    /// The sketch already finished.
    #[error("sketch already finished")]
    Finished,
}
