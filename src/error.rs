//! Error types for the engine and the content store

use thiserror::Error;

use crate::types::{ElementId, Track};

/// Errors raised while driving a story
///
/// Only `ContentIndex` ever leaves the engine. The other two are
/// recovered where they occur and only logged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("{track} index {index} is out of range (length {len})")]
    ContentIndex { track: Track, index: usize, len: usize },

    #[error("timed segment {index} has no delay, using {default_ms}ms")]
    MissingTimerConfig { index: usize, default_ms: u64 },

    #[error("animation target {element:?} is not displayed, treating fade as complete")]
    AnimationTargetMissing { element: ElementId },
}

impl EngineError {
    pub fn content_index(track: Track, index: usize, len: usize) -> Self {
        Self::ContentIndex { track, index, len }
    }
}

/// Errors raised while loading or checking story content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("story content is not valid JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("story content failed validation: {}", .problems.join("; "))]
    Invalid { problems: Vec<String> },
}

impl From<serde_json::Error> for ContentError {
    fn from(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
