use crate::ticket::TicketPayload;
use std::path::PathBuf;
use thiserror::Error;

/// Outcome the transport reports for the previously sent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Ok,
    Error,
    ServerExit,
}

/// Validation verdict for one command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingCode {
    Ok,
    Error,
    Object,
    UpdateObject,
    Script,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request {
    command: String,
    argument: String,
    payload: Option<TicketPayload>,
}

impl Request {
    pub fn new(command: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            argument: argument.into(),
            payload: None,
        }
    }

    pub fn with_payload(
        command: impl Into<String>,
        argument: impl Into<String>,
        payload: TicketPayload,
    ) -> Self {
        Self {
            command: command.into(),
            argument: argument.into(),
            payload: Some(payload),
        }
    }

    /// Sentinel returned when a script chain is aborted: nothing is sent this cycle.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    pub fn payload(&self) -> Option<&TicketPayload> {
        self.payload.as_ref()
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input stream closed")]
    Closed,
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("command '{0}' not found, type 'help' for a list")]
    NotFound(String),
    #[error("usage: '{0}'")]
    Usage(String),
    #[error("empty command")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("script file '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("script '{}' is already running, scripts cannot call themselves", .0.display())]
    Recursive(PathBuf),
    #[error("failed to open script '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScriptError {
    /// Whether the error must unwind the whole script chain.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScriptError::Recursive(_))
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid {field} in script: {reason}")]
    InvalidInScript { field: &'static str, reason: String },
    #[error(transparent)]
    Input(#[from] InputError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("too many failed attempts to read input")]
    InputExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_is_a_sentinel() {
        assert!(Request::empty().is_empty());
        assert!(!Request::new("show", "").is_empty());
        assert!(Request::new("show", "").payload().is_none());
    }

    #[test]
    fn only_recursion_is_fatal_for_scripts() {
        assert!(!ScriptError::NotFound("a.txt".into()).is_fatal());
        assert!(ScriptError::Recursive("a.txt".into()).is_fatal());
    }

    #[test]
    fn command_errors_render_user_notices() {
        assert_eq!(
            CommandError::Usage("update <ID> {element}".into()).to_string(),
            "usage: 'update <ID> {element}'"
        );
        assert_eq!(
            CommandError::NotFound("frob".into()).to_string(),
            "command 'frob' not found, type 'help' for a list"
        );
    }
}
