//! Error types for the prefixer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefixerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown browser requirement '{requirement}': {message}")]
    Resolution { requirement: String, message: String },

    #[error("Unknown browser '{name}'")]
    UnknownBrowser { name: String },

    /// Malformed stylesheet. `css` keeps the untouched input for diagnostics.
    #[error("{file}:{line}:{column}: {message}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
        message: String,
        css: String,
    },

    /// A broken internal invariant, not a problem with the user's CSS.
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

pub type Result<T> = std::result::Result<T, PrefixerError>;

impl PrefixerError {
    pub fn parse(
        file: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
        css: impl Into<String>,
    ) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            column,
            message: message.into(),
            css: css.into(),
        }
    }

    pub fn resolution(requirement: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            requirement: requirement.into(),
            message: message.into(),
        }
    }

    pub fn unknown_browser(name: impl Into<String>) -> Self {
        Self::UnknownBrowser { name: name.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error describes a mistake in the user's input rather than in the engine
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }

    /// The source line the error points at, if this is a parse error
    pub fn source_line(&self) -> Option<&str> {
        match self {
            Self::Parse { line, css, .. } => css.lines().nth(line.saturating_sub(1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = PrefixerError::parse("style.css", 3, 7, "Missing '}'", "a {\n\n  color: red");
        assert_eq!(err.to_string(), "style.css:3:7: Missing '}'");
        assert_eq!(err.source_line(), Some("  color: red"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_internal_error_is_not_user_error() {
        let err = PrefixerError::internal("declaration without parent rule");
        assert!(!err.is_user_error());
        assert!(err.source_line().is_none());
    }
}
