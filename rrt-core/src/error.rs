use crate::types::VertexId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RrtError {
    #[error("invalid bounds for dimension {dim}: [{min}, {max}]")]
    InvalidBounds { dim: usize, min: f64, max: f64 },

    #[error("configuration space must have at least one dimension")]
    EmptySpace,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vertex already present in tree as {existing}")]
    DuplicateVertex { existing: VertexId },

    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),

    #[error("vertex {child} already has a parent edge")]
    ParentAlreadySet { child: VertexId },

    #[error("vertex {0} is not connected to the root")]
    DetachedParent(VertexId),

    #[error("stop threshold {0} must be positive and finite")]
    InvalidStopThreshold(f64),

    #[error("step {step} must be positive and strictly below stop threshold {stop_threshold}")]
    InvalidStepConfiguration { step: f64, stop_threshold: f64 },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RrtError>;
