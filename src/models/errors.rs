use thiserror::Error;

/// Errors raised by colony operations.
///
/// Everything except `Io`, `Config` and `ShutDown` is a user-input mismatch: the terminal
/// renders it as an error line and keeps going.
#[derive(Debug, Error)]
pub enum ColonyError {
    /// First token did not match any command in the table
    #[error("Command not recognized: {0}")]
    UnknownCommand(String),

    /// A command was issued without its required argument
    #[error("{hint}")]
    MissingArgument { command: &'static str, hint: &'static str },

    /// Expendable id outside the roster
    #[error("Invalid expendable ID: {0}")]
    InvalidExpendable(String),

    /// Expendable exists but can no longer act
    #[error("Mickey #{0} has already been terminated.")]
    ExpendableTerminated(u32),

    /// Wrong override or termination code
    #[error("Invalid override code: {0}")]
    AuthorizationDenied(String),

    /// A deployment or alert form field could not be parsed
    #[error("Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// The engine was shut down and takes no more input
    #[error("Colony console is shut down")]
    ShutDown,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error on the console streams or config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using ColonyError
pub type ColonyResult<T> = Result<T, ColonyError>;

impl ColonyError {
    /// True for errors caused by what the operator typed.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            ColonyError::Config(_) | ColonyError::Io(_) | ColonyError::ShutDown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_message_names_the_input() {
        let err = ColonyError::UnknownCommand("jump".to_string());
        assert_eq!(err.to_string(), "Command not recognized: jump");
        assert!(err.is_user_error());
    }

    #[test]
    fn io_errors_are_not_user_errors() {
        let err: ColonyError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(!err.is_user_error());
    }

    #[test]
    fn shut_down_is_not_a_user_error() {
        assert!(!ColonyError::ShutDown.is_user_error());
    }

    #[test]
    fn missing_argument_displays_hint() {
        let err = ColonyError::MissingArgument {
            command: "override",
            hint: "Override code required.",
        };
        assert_eq!(err.to_string(), "Override code required.");
    }
}
