use crate::config::Config;
use crate::console::Console;
use crate::logger::log_debug;
use crate::session::builder::ObjectBuilder;
use crate::session::input::InputSource;
use crate::session::models::{
    BuildError, InputError, ProcessingCode, Request, ResponseCode, SessionError,
};
use crate::session::{script, validator};

/// Produces one request per call from terminal or script input.
pub struct Session {
    source: InputSource,
    console: Console,
    max_input_attempts: u32,
    input_failures: u32,
}

impl Session {
    pub fn new(source: InputSource, console: Console, max_input_attempts: u32) -> Self {
        Self {
            source,
            console,
            max_input_attempts: max_input_attempts.max(1),
            input_failures: 0,
        }
    }

    pub fn from_config(config: &Config, console: Console) -> Self {
        Self::new(InputSource::stdin(console), console, config.max_input_attempts)
    }

    pub fn is_scripted(&self) -> bool {
        self.source.is_scripted()
    }

    pub fn script_depth(&self) -> usize {
        self.source.depth()
    }

    /// Run one cycle. `previous` is the server's answer to the last request.
    ///
    /// Returns [`Request::empty`] when a script chain was aborted, and
    /// [`SessionError::InputExhausted`] when the terminal can no longer be read.
    pub fn handle(&mut self, previous: ResponseCode) -> Result<Request, SessionError> {
        let mut previous = previous;
        self.input_failures = 0;
        loop {
            if self.source.is_scripted()
                && matches!(previous, ResponseCode::Error | ResponseCode::ServerExit)
            {
                return Ok(self.abort("the server rejected the previous script command"));
            }

            let line = match self.source.next_line() {
                Ok(line) => line,
                Err(e) if self.source.is_scripted() => {
                    return Ok(self.abort(&format!("failed to read script: {}", e)));
                }
                Err(e) => {
                    self.input_failed(e)?;
                    continue;
                }
            };

            let (name, argument) = split_command(&line);
            if name.is_empty() {
                continue;
            }

            let code = validator::validate(name, argument, &self.console);
            log_debug(&format!(
                "[session] '{}' '{}' -> {:?} (depth {})",
                name,
                argument,
                code,
                self.source.depth()
            ));
            let scripted = self.source.is_scripted();
            if code == ProcessingCode::Error && !scripted {
                continue;
            }
            if scripted && (previous == ResponseCode::Error || code == ProcessingCode::Error) {
                return Ok(self.abort(&format!("invalid command '{}' in script", line.trim())));
            }

            match code {
                ProcessingCode::Object | ProcessingCode::UpdateObject => {
                    let built = {
                        let mut builder = ObjectBuilder::new(&mut self.source, &self.console);
                        if code == ProcessingCode::Object {
                            builder.build_for_create()
                        } else {
                            builder.build_for_update()
                        }
                    };
                    match built {
                        Ok(payload) => {
                            log_debug(&format!(
                                "[session] payload with {} field(s) set, complete: {}",
                                payload.set_count(),
                                payload.is_complete()
                            ));
                            return Ok(Request::with_payload(name, argument, payload));
                        }
                        Err(e) if scripted => return Ok(self.abort(&e.to_string())),
                        Err(BuildError::Input(e)) => {
                            self.input_failed(e)?;
                            continue;
                        }
                        Err(e) => {
                            self.console.error(&e.to_string());
                            continue;
                        }
                    }
                }
                ProcessingCode::Script => match script::enter(&mut self.source, argument, &self.console) {
                    Ok(()) => {
                        // The last server answer belongs to the command before the script.
                        previous = ResponseCode::Ok;
                    }
                    Err(e) if e.is_fatal() => return Ok(self.abort(&e.to_string())),
                    Err(e) => self.console.error(&e.to_string()),
                },
                _ => return Ok(Request::new(name, argument)),
            }
        }
    }

    fn input_failed(&mut self, err: InputError) -> Result<(), SessionError> {
        self.console.line("");
        self.console.error(&format!("failed to read command: {}", err));
        self.input_failures += 1;
        log_debug(&format!(
            "[session] input failure {}/{}: {}",
            self.input_failures, self.max_input_attempts, err
        ));
        if self.input_failures >= self.max_input_attempts {
            self.console.error("too many failed input attempts");
            self.source.drain();
            return Err(SessionError::InputExhausted);
        }
        Ok(())
    }

    /// Unwind every running script back to the terminal.
    fn abort(&mut self, reason: &str) -> Request {
        self.console.error(reason);
        let chain = self.source.frame_names().join(" > ");
        let closed = self.source.drain();
        self.console.error("script execution aborted");
        log_debug(&format!(
            "[session] abort: {} ({} frame(s) closed: {})",
            reason, closed, chain
        ));
        Request::empty()
    }
}

/// Split a raw line into command name and argument, both trimmed.
pub fn split_command(line: &str) -> (&str, &str) {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim();
    (cmd, rest)
}
