use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the thumbnail compositor
#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("{program} exited with {}", exit_description(.code))]
    CommandFailed { program: String, code: Option<i32> },

    #[error("Failed to launch {program}: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Non-fatal conditions raised while planning a render.
///
/// These never abort the pipeline; they are logged and carried on the
/// final [`RenderReport`](crate::composition::RenderReport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    #[error("Font file {} not found, falling back to the default font", .path.display())]
    MissingFont { path: PathBuf },

    #[error("Embed image {} not found, skipping the embed step", .path.display())]
    MissingEmbedImage { path: PathBuf },

    #[error("No header, title, caption or embed image given; output will be a resized copy of the background")]
    NothingToDraw,
}

/// Convenience type alias for Results using CompositorError
pub type Result<T> = std::result::Result<T, CompositorError>;

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl CompositorError {
    /// Exit code reported by the external tool, if this is a command failure
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::SpawnError { program, .. } => {
                format!(
                    "Could not run '{}'. Please check ImageMagick is installed and on your PATH, or pass --program.",
                    program
                )
            }
            Self::CommandFailed { program, code } => {
                format!(
                    "'{}' failed ({}). See its output above for details.",
                    program,
                    exit_description(code)
                )
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message_includes_code() {
        let err = CompositorError::CommandFailed {
            program: "convert".to_string(),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "convert exited with exit code 1");
        assert_eq!(err.exit_code(), Some(1));
    }

    #[test]
    fn test_signal_termination_has_no_code() {
        let err = CompositorError::CommandFailed {
            program: "convert".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn test_spawn_error_user_message_names_program() {
        let err = CompositorError::SpawnError {
            program: "magick".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.user_message().contains("'magick'"));
        assert_eq!(err.exit_code(), None);
    }
}
