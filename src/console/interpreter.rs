use super::command::{Command, Target, UpdateArgs};
use super::{help, parser};
use crate::core::{HbnbError, Result};
use crate::models::{ClassName, Record};
use crate::storage::Storage;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Whether the session continues after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Command interpreter over a store, writing results to `out`.
///
/// User mistakes are printed to `out` and the session continues; only
/// storage I/O and encoding failures come back as `Err`.
pub struct Console<S: Storage, W: Write> {
    storage: S,
    out: W,
    prompt: Option<String>,
}

impl<S: Storage, W: Write> Console<S, W> {
    /// Batch console: no prompt is echoed.
    pub fn new(storage: S, out: W) -> Self {
        Self {
            storage,
            out,
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (S, W) {
        (self.storage, self.out)
    }

    /// Read and execute lines until `quit`, `EOF` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(self.out, "{}", prompt)?;
                self.out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                if self.prompt.is_some() {
                    writeln!(self.out)?;
                }
                break;
            }

            if self.onecmd(&line)? == Control::Exit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Terminal session with line editing and history. Ctrl-C drops the
    /// current line; Ctrl-D ends the session like `EOF`.
    pub fn run_editor(&mut self, prompt: &str) -> Result<()> {
        let mut editor = DefaultEditor::new()?;
        loop {
            let line = match editor.readline(prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    writeln!(self.out)?;
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            if !line.trim().is_empty() {
                editor.add_history_entry(line.as_str())?;
            }
            if self.onecmd(&line)? == Control::Exit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Execute a single line.
    pub fn onecmd(&mut self, line: &str) -> Result<Control> {
        let command = parser::parse(line);
        debug!(?command, "Dispatching");

        match self.execute(command) {
            Ok(control) => Ok(control),
            Err(err) if err.is_user_facing() => {
                writeln!(self.out, "{}", err)?;
                Ok(Control::Continue)
            }
            Err(err) => Err(err),
        }
    }

    fn execute(&mut self, command: Command) -> Result<Control> {
        match command {
            Command::Empty => {}
            Command::Create(target) => self.create(&target)?,
            Command::Show(target) => self.show(&target)?,
            Command::All(target) => self.all(&target)?,
            Command::Count(target) => self.count(&target)?,
            Command::Destroy(target) => self.destroy(&target)?,
            Command::Update(target, args) => self.update(&target, args)?,
            Command::Help(topic) => self.help(topic.as_deref())?,
            Command::Quit => return Ok(Control::Exit),
            Command::Unknown(line) => return Err(HbnbError::UnrecognizedCommand(line)),
        }
        Ok(Control::Continue)
    }

    fn create(&mut self, target: &Target) -> Result<()> {
        let class = resolve_class(target)?;
        let record = Record::new(class);
        let id = record.id().to_string();
        self.storage.add(record);
        self.storage.save()?;
        writeln!(self.out, "{}", id)?;
        Ok(())
    }

    fn show(&mut self, target: &Target) -> Result<()> {
        let record = lookup(&self.storage, target)?;
        writeln!(self.out, "{}", record)?;
        Ok(())
    }

    fn all(&mut self, target: &Target) -> Result<()> {
        let class = match target.class.as_deref() {
            Some(name) => Some(name.parse::<ClassName>()?),
            None => None,
        };
        let shown: Vec<String> = self
            .storage
            .all(class)
            .into_iter()
            .map(|record| record.to_string())
            .collect();
        writeln!(self.out, "{}", serde_json::to_string(&shown)?)?;
        Ok(())
    }

    fn count(&mut self, target: &Target) -> Result<()> {
        let class = resolve_class(target)?;
        writeln!(self.out, "{}", self.storage.count(class))?;
        Ok(())
    }

    fn destroy(&mut self, target: &Target) -> Result<()> {
        let key = lookup(&self.storage, target)?.key();
        self.storage.delete(&key);
        self.storage.save()?;
        Ok(())
    }

    fn update(&mut self, target: &Target, args: UpdateArgs) -> Result<()> {
        let (class, id) = {
            let record = lookup(&self.storage, target)?;
            (record.class(), record.id().to_string())
        };
        let record = self
            .storage
            .get_mut(class, &id)
            .ok_or(HbnbError::UnknownInstance)?;

        let mut changed = false;
        for (name, value) in args.assignments {
            if record.set(&name, value) {
                changed = true;
            } else {
                warn!("Ignoring update of protected attribute '{}' on {}", name, record.key());
            }
        }

        if changed {
            record.touch();
            self.storage.save()?;
        }

        match args.missing {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn help(&mut self, topic: Option<&str>) -> Result<()> {
        match topic {
            None => writeln!(self.out, "\n{}\n", help::overview())?,
            Some(topic) => match help::describe(topic) {
                Some(text) => writeln!(self.out, "{}", text)?,
                None => writeln!(self.out, "*** No help on {}", topic)?,
            },
        }
        Ok(())
    }
}

/// Checks 1-2: class name given, class known.
fn resolve_class(target: &Target) -> Result<ClassName> {
    target
        .class
        .as_deref()
        .ok_or(HbnbError::MissingClassName)?
        .parse()
}

/// Checks 1-4: class name given, class known, id given, instance exists.
fn lookup<'s, S: Storage>(storage: &'s S, target: &Target) -> Result<&'s Record> {
    let class = resolve_class(target)?;
    let id = target.id.as_deref().ok_or(HbnbError::MissingIdentifier)?;
    storage.get(class, id).ok_or(HbnbError::UnknownInstance)
}
