use crate::console::Console;
use crate::logger::log_debug;
use crate::session::{Request, ResponseCode, Session, SessionError};
use crate::ticket::TicketPayload;
use anyhow::Result;

/// Delivers a request to the collection service and reports how it went.
pub trait Transport {
    fn send(&mut self, request: &Request) -> Result<ResponseCode>;
}

/// Stand-in for the network client: prints each request instead of sending it.
#[derive(Debug)]
pub struct DryRunTransport {
    console: Console,
    sent: usize,
}

impl DryRunTransport {
    pub fn new(console: Console) -> Self {
        Self { console, sent: 0 }
    }

    #[allow(dead_code)]
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl Transport for DryRunTransport {
    fn send(&mut self, request: &Request) -> Result<ResponseCode> {
        self.sent += 1;
        self.console.notice(&describe(request));
        Ok(match request.command() {
            "server_exit" => ResponseCode::ServerExit,
            _ => ResponseCode::Ok,
        })
    }
}

/// How the request/response loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientExit {
    /// `exit` was sent, or the server shut down outside a script.
    Finished,
    /// The terminal could not be read; the caller exits the process.
    InputExhausted,
}

/// Feed each response code back into the session until the client is done.
pub fn run<T: Transport>(session: &mut Session, transport: &mut T) -> Result<ClientExit> {
    let mut code = ResponseCode::Ok;
    loop {
        let request = match session.handle(code) {
            Ok(r) => r,
            Err(SessionError::InputExhausted) => return Ok(ClientExit::InputExhausted),
        };
        if request.is_empty() {
            code = ResponseCode::Ok;
            continue;
        }
        code = transport.send(&request)?;
        log_debug(&format!(
            "[transport] {} '{}' -> {:?}",
            request.command(),
            request.argument(),
            code
        ));
        if request.command() == "exit" {
            return Ok(ClientExit::Finished);
        }
        if code == ResponseCode::ServerExit && !session.is_scripted() {
            return Ok(ClientExit::Finished);
        }
    }
}

pub fn describe(request: &Request) -> String {
    let mut out = format!("-> {}", request.command());
    if !request.argument().is_empty() {
        out.push(' ');
        out.push_str(request.argument());
    }
    if let Some(payload) = request.payload() {
        out.push(' ');
        out.push_str(&describe_payload(payload));
    }
    out
}

fn describe_payload(p: &TicketPayload) -> String {
    fn slot<T>(v: Option<&T>, fmt: impl Fn(&T) -> String) -> String {
        v.map(fmt).unwrap_or_else(|| "-".to_string())
    }
    format!(
        "{{name: {}, coordinates: {}, price: {}, type: {}, person: {}, discount: {}}}",
        slot(p.name.as_option(), |n| format!("{:?}", n)),
        slot(p.coordinates.as_option(), |c| format!("({}, {})", c.x, c.y)),
        slot(p.price.as_option(), |v| v.to_string()),
        slot(p.ticket_type.as_option(), |t| t.to_string()),
        slot(p.person.as_option(), |h| format!(
            "{{height: {}, passport: {}}}",
            h.height, h.passport_id
        )),
        slot(p.discount.as_option(), |d| d.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input::InputSource;
    use crate::ticket::Field;
    use std::io::Cursor;

    /// Answers from a fixed list and records what it received.
    struct Scripted {
        answers: Vec<ResponseCode>,
        seen: Vec<String>,
    }

    impl Transport for Scripted {
        fn send(&mut self, request: &Request) -> Result<ResponseCode> {
            self.seen.push(request.command().to_string());
            Ok(if self.answers.is_empty() {
                ResponseCode::Ok
            } else {
                self.answers.remove(0)
            })
        }
    }

    fn session(input: &str) -> Session {
        let console = Console::plain();
        let source = InputSource::new(Box::new(Cursor::new(input.to_string())), console);
        Session::new(source, console, 1)
    }

    #[test]
    fn loop_stops_after_exit() {
        let mut s = session("show\nexit\nclear\n");
        let mut t = DryRunTransport::new(Console::plain());
        assert_eq!(run(&mut s, &mut t).unwrap(), ClientExit::Finished);
        assert_eq!(t.sent(), 2);
    }

    #[test]
    fn loop_reports_closed_terminal() {
        let mut s = session("show\n");
        let mut t = DryRunTransport::new(Console::plain());
        assert_eq!(run(&mut s, &mut t).unwrap(), ClientExit::InputExhausted);
    }

    #[test]
    fn server_error_inside_script_skips_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "remove_by_id 1\nclear\n").unwrap();
        let mut s = session(&format!("execute_script {}\nexit\n", path.display()));
        let mut t = Scripted {
            answers: vec![ResponseCode::Error],
            seen: Vec::new(),
        };
        assert_eq!(run(&mut s, &mut t).unwrap(), ClientExit::Finished);
        assert_eq!(t.seen, vec!["remove_by_id", "exit"]);
    }

    #[test]
    fn server_exit_ends_interactive_session() {
        let mut s = session("server_exit\nshow\n");
        let mut t = DryRunTransport::new(Console::plain());
        assert_eq!(run(&mut s, &mut t).unwrap(), ClientExit::Finished);
        assert_eq!(t.sent(), 1);
    }

    #[test]
    fn describe_marks_unset_fields() {
        let payload = TicketPayload {
            price: Field::Set(19.99),
            ..TicketPayload::default()
        };
        let text = describe(&Request::with_payload("update", "7", payload));
        assert_eq!(
            text,
            "-> update 7 {name: -, coordinates: -, price: 19.99, type: -, person: -, discount: -}"
        );
    }
}
