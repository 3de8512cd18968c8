//! Error types shared across camstream crates.

/// Exit code for validation, resolution, and launch failures.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code when the launched pipeline or player is interrupted (Ctrl+C).
pub const EXIT_INTERRUPTED: i32 = 2;

/// Top-level error type for camstream operations.
///
/// Every variant is terminal for the current invocation: either one complete
/// command is produced and launched, or none is.
#[derive(Debug, thiserror::Error)]
pub enum CamstreamError {
    #[error("Invalid value '{value}' for option '{field}' (allowed: {allowed})")]
    InvalidOption {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Unsupported option combination: {message}")]
    UnsupportedCombination { message: String },

    #[error("{player} not found. {hint}")]
    PlayerNotFound { player: String, hint: String },

    #[error(
        "No player found. Install either ffplay, mpv, or mplayer and make sure it is in your PATH."
    )]
    NoPlayerAvailable,

    #[error("{player} cannot auto detect format. Specify a format using --format")]
    AmbiguousFormat { player: String },

    #[error("Launch error: {message}")]
    Launch { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CamstreamError.
pub type CamstreamResult<T> = Result<T, CamstreamError>;

impl CamstreamError {
    pub fn invalid_option(
        field: impl Into<String>,
        value: impl ToString,
        allowed: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            field: field.into(),
            value: value.to_string(),
            allowed: allowed.into(),
        }
    }

    pub fn unsupported_combination(msg: impl Into<String>) -> Self {
        Self::UnsupportedCombination {
            message: msg.into(),
        }
    }

    pub fn player_not_found(player: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::PlayerNotFound {
            player: player.into(),
            hint: hint.into(),
        }
    }

    pub fn ambiguous_format(player: impl Into<String>) -> Self {
        Self::AmbiguousFormat {
            player: player.into(),
        }
    }

    pub fn launch(msg: impl Into<String>) -> Self {
        Self::Launch {
            message: msg.into(),
        }
    }

    /// Process exit code reported when this error ends an invocation.
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_names_field_and_domain() {
        let err = CamstreamError::invalid_option("quality", 0, "1-99");
        let msg = err.to_string();
        assert!(msg.contains("quality"));
        assert!(msg.contains("'0'"));
        assert!(msg.contains("1-99"));
    }

    #[test]
    fn test_player_not_found_carries_install_hint() {
        let err = CamstreamError::player_not_found("mpv", "Install mpv and ensure it is in your PATH.");
        assert_eq!(
            err.to_string(),
            "mpv not found. Install mpv and ensure it is in your PATH."
        );
    }

    #[test]
    fn test_failures_share_exit_code_distinct_from_interrupt() {
        let errors = [
            CamstreamError::invalid_option("port", 0, "1-65535"),
            CamstreamError::unsupported_combination("missing encoder"),
            CamstreamError::NoPlayerAvailable,
            CamstreamError::ambiguous_format("mplayer"),
            CamstreamError::launch("spawn failed"),
        ];
        for err in &errors {
            assert_eq!(err.exit_code(), EXIT_FAILURE);
            assert_ne!(err.exit_code(), EXIT_INTERRUPTED);
        }
    }
}
