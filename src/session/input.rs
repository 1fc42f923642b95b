use crate::console::Console;
use crate::logger::log_debug;
use crate::session::models::InputError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One running script: its resolved identity and the open reader.
///
/// The reader is owned by the frame, so popping or draining the frame closes
/// the file.
#[derive(Debug)]
pub struct ScriptFrame {
    identity: PathBuf,
    name: String,
    reader: BufReader<File>,
}

impl ScriptFrame {
    pub fn open(identity: PathBuf, name: impl Into<String>) -> io::Result<Self> {
        let file = File::open(&identity)?;
        Ok(Self {
            identity,
            name: name.into(),
            reader: BufReader::new(file),
        })
    }

    pub fn identity(&self) -> &Path {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn is_exhausted(&mut self) -> Result<bool, InputError> {
        Ok(self.reader.fill_buf()?.is_empty())
    }
}

/// Line source for the session: the interactive stream at the bottom and a
/// stack of script frames above it. Reads always come from the top.
pub struct InputSource {
    interactive: Box<dyn BufRead>,
    frames: Vec<ScriptFrame>,
    console: Console,
}

impl InputSource {
    pub fn new(interactive: Box<dyn BufRead>, console: Console) -> Self {
        Self {
            interactive,
            frames: Vec::new(),
            console,
        }
    }

    pub fn stdin(console: Console) -> Self {
        Self::new(Box::new(BufReader::new(io::stdin())), console)
    }

    pub fn is_scripted(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn contains(&self, identity: &Path) -> bool {
        self.frames.iter().any(|f| f.identity() == identity)
    }

    pub fn frame_names(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.name()).collect()
    }

    pub fn push_script(&mut self, frame: ScriptFrame) {
        log_debug(&format!(
            "[input] push '{}' (depth {})",
            frame.identity().display(),
            self.frames.len() + 1
        ));
        self.frames.push(frame);
    }

    pub fn pop_script(&mut self) -> Option<ScriptFrame> {
        let frame = self.frames.pop()?;
        log_debug(&format!(
            "[input] pop '{}' (depth {})",
            frame.identity().display(),
            self.frames.len()
        ));
        Some(frame)
    }

    /// Pop and close every script frame, returning how many were open.
    pub fn drain(&mut self) -> usize {
        let mut closed = 0;
        while self.pop_script().is_some() {
            closed += 1;
        }
        closed
    }

    /// Next command line. Exhausted scripts are popped first and reading
    /// resumes from whatever sits below them.
    pub fn next_line(&mut self) -> Result<String, InputError> {
        self.pop_exhausted()?;
        match self.frames.last_mut() {
            Some(frame) => {
                let line = read_line(&mut frame.reader)?.ok_or(InputError::Closed)?;
                if !line.trim().is_empty() {
                    self.console.echo(&line);
                }
                Ok(line)
            }
            None => {
                self.console.prompt(Console::PROMPT);
                read_line(self.interactive.as_mut())?.ok_or(InputError::Closed)
            }
        }
    }

    /// Next line for a payload field. Never leaves the current script, so an
    /// object cannot be assembled from two different files.
    pub fn read_field_line(&mut self, prompt: &str) -> Result<String, InputError> {
        match self.frames.last_mut() {
            Some(frame) => {
                let line = read_line(&mut frame.reader)?.ok_or(InputError::Closed)?;
                self.console.echo(&line);
                Ok(line)
            }
            None => {
                self.console.prompt(prompt);
                read_line(self.interactive.as_mut())?.ok_or(InputError::Closed)
            }
        }
    }

    fn pop_exhausted(&mut self) -> Result<(), InputError> {
        while let Some(frame) = self.frames.last_mut() {
            if !frame.is_exhausted()? {
                break;
            }
            if let Some(done) = self.pop_script() {
                let resumed = match self.frames.last() {
                    Some(parent) => format!("script '{}'", parent.name()),
                    None => "interactive input".to_string(),
                };
                self.console.notice(&format!(
                    "script '{}' finished, returning to {}",
                    done.name(),
                    resumed
                ));
            }
        }
        Ok(())
    }
}

fn read_line<R: BufRead + ?Sized>(reader: &mut R) -> Result<Option<String>, InputError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(len);
    Ok(Some(line))
}
