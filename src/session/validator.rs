//! Command syntax checks: name lookup and argument arity.

use crate::console::Console;
use crate::session::models::{CommandError, ProcessingCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The argument must be empty.
    None,
    /// The argument must be present.
    Required,
}

/// Fixed contract of one known command.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub verdict: ProcessingCode,
    /// Argument template shown in usage notices, e.g. `<ID>`.
    pub template: Option<&'static str>,
    pub summary: &'static str,
}

const fn plain(name: &'static str, summary: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        arity: Arity::None,
        verdict: ProcessingCode::Ok,
        template: None,
        summary,
    }
}

const fn element(name: &'static str, summary: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        arity: Arity::None,
        verdict: ProcessingCode::Object,
        template: Some("{element}"),
        summary,
    }
}

const fn with_arg(name: &'static str, template: &'static str, summary: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        arity: Arity::Required,
        verdict: ProcessingCode::Ok,
        template: Some(template),
        summary,
    }
}

static COMMANDS: &[CommandSpec] = &[
    plain("help", "show the list of commands"),
    plain("info", "show collection type, size and creation date"),
    plain("show", "print every ticket in the collection"),
    element("add", "add a new ticket"),
    CommandSpec {
        name: "update",
        arity: Arity::Required,
        verdict: ProcessingCode::UpdateObject,
        template: Some("<ID> {element}"),
        summary: "change fields of the ticket with the given id",
    },
    with_arg("remove_by_id", "<ID>", "remove the ticket with the given id"),
    plain("clear", "remove every ticket"),
    plain("save", "save the collection to its file"),
    CommandSpec {
        name: "execute_script",
        arity: Arity::Required,
        verdict: ProcessingCode::Script,
        template: Some("<file_name>"),
        summary: "run commands from a script file",
    },
    plain("exit", "end the session"),
    element("add_if_max", "add a ticket if it is greater than every other one"),
    element("remove_greater", "remove every ticket greater than the given one"),
    plain("history", "show the last commands"),
    with_arg(
        "filter_contains_name",
        "<name>",
        "show tickets whose name contains the substring",
    ),
    with_arg(
        "filter_less_than_price",
        "<price>",
        "show tickets cheaper than the given price",
    ),
    plain(
        "print_field_ascending_discount",
        "print every discount in ascending order",
    ),
    plain("server_exit", "shut the server down"),
];

pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.name == name)
}

#[allow(dead_code)]
pub fn all_commands() -> &'static [CommandSpec] {
    COMMANDS
}

/// Pure arity check for `name` with `argument`.
pub fn check(name: &str, argument: &str) -> Result<ProcessingCode, CommandError> {
    if name.is_empty() {
        return Err(CommandError::Empty);
    }
    let spec = find_command(name).ok_or_else(|| CommandError::NotFound(name.to_string()))?;
    let arity_ok = match spec.arity {
        Arity::None => argument.is_empty(),
        Arity::Required => !argument.is_empty(),
    };
    if !arity_ok {
        return Err(CommandError::Usage(usage(spec)));
    }
    Ok(spec.verdict)
}

/// Like [`check`], but reports the failure on the console and folds it into
/// [`ProcessingCode::Error`]. Empty names fail silently.
pub fn validate(name: &str, argument: &str, console: &Console) -> ProcessingCode {
    match check(name, argument) {
        Ok(code) => code,
        Err(CommandError::Empty) => ProcessingCode::Error,
        Err(e) => {
            console.line(&e.to_string());
            ProcessingCode::Error
        }
    }
}

pub fn usage(spec: &CommandSpec) -> String {
    match spec.template {
        Some(t) => format!("{} {}", spec.name, t),
        None => spec.name.to_string(),
    }
}

pub fn help_lines() -> Vec<String> {
    let width = COMMANDS.iter().map(|c| usage(c).len()).max().unwrap_or(0);
    COMMANDS
        .iter()
        .map(|c| format!("  {:<width$}  - {}", usage(c), c.summary, width = width))
        .collect()
}
