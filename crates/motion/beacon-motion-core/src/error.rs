//! Construction-time errors. Runtime misuse (bad indices, missing capabilities) is
//! absorbed by the components and never surfaces here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("page json parse error: {0}")]
    PageParse(String),

    #[error("invalid visibility threshold {threshold} for `{node}` (expected 0.0..=1.0)")]
    InvalidThreshold { node: String, threshold: f32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("empty node key in {context}")]
    EmptyNodeKey { context: &'static str },

    #[error("engine is already mounted")]
    AlreadyMounted,
}
