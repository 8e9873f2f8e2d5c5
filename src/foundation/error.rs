/// Convenience result type used across Typeflow.
pub type TypeflowResult<T> = Result<T, TypeflowError>;

/// Top-level error taxonomy used by compiler and playback APIs.
#[derive(thiserror::Error, Debug)]
pub enum TypeflowError {
    /// Lexical or structural problems in the tagged source text.
    #[error("markup error: {0}")]
    Markup(String),

    /// Semantic problems found while compiling the tag stream.
    #[error("compile error: {0}")]
    Compile(String),

    /// Illegal operations against the playback engine.
    #[error("playback error: {0}")]
    Playback(String),

    /// Wrapped lower-level error from collaborators.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TypeflowError {
    /// Build a [`TypeflowError::Markup`] value.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    /// Build a [`TypeflowError::Compile`] value.
    pub fn compile(msg: impl Into<String>) -> Self {
        Self::Compile(msg.into())
    }

    /// Build a [`TypeflowError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
