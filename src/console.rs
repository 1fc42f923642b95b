use crossterm::style::{Color, Stylize};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub notice: Color,
    pub error: Color,
    pub prompt: Color,
    pub echo: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            notice: Color::Cyan,
            error: Color::Red,
            prompt: Color::Green,
            echo: Color::DarkGrey,
        }
    }
}

/// Terminal output for the session: notices, errors, prompts and replayed
/// script lines.
#[derive(Clone, Copy, Debug)]
pub struct Console {
    theme: Theme,
    color: bool,
}

impl Console {
    pub const PROMPT: &'static str = "$ ";

    pub fn new(color: bool) -> Self {
        Self {
            theme: Theme::default(),
            color,
        }
    }

    #[allow(dead_code)]
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn line(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn notice(&self, msg: &str) {
        println!("{}", self.paint(msg, self.theme.notice));
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.paint(&format!("error: {}", msg), self.theme.error));
    }

    /// Print `text` without a newline and flush so it shows before a blocking read.
    pub fn prompt(&self, text: &str) {
        print!("{}", self.paint(text, self.theme.prompt));
        let _ = io::stdout().flush();
    }

    /// Echo a line replayed from a script so the transcript reads like typed input.
    pub fn echo(&self, line: &str) {
        println!(
            "{}{}",
            self.paint(Self::PROMPT, self.theme.prompt),
            self.paint(line, self.theme.echo)
        );
    }

    fn paint(&self, msg: &str, color: Color) -> String {
        if self.color {
            msg.with(color).to_string()
        } else {
            msg.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_console_leaves_text_untouched() {
        let console = Console::plain();
        assert_eq!(console.paint("hello", Color::Red), "hello");
    }

    #[test]
    fn colored_console_keeps_text() {
        // NO_COLOR in the environment may suppress the escape codes.
        let console = Console::new(true);
        let painted = console.paint("hello", Color::Red);
        assert!(painted.contains("hello"));
    }
}
