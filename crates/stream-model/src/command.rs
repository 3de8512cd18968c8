//! External command vocabulary.
//!
//! Compilers never spawn anything; they describe what to run as
//! [`Invocation`]s and [`ProcessChain`]s and leave execution to a launcher.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// One external program with its argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether `arg` appears verbatim in the argument vector.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// The argument following `flag`, if any.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|idx| self.args.get(idx + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Processes connected stdout to stdin, like a shell pipeline.
///
/// Always holds at least one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProcessChain {
    processes: Vec<Invocation>,
}

impl ProcessChain {
    pub fn new(first: Invocation) -> Self {
        Self {
            processes: vec![first],
        }
    }

    /// Append a process reading the previous one's stdout.
    pub fn pipe(mut self, next: Invocation) -> Self {
        self.processes.push(next);
        self
    }

    pub fn processes(&self) -> &[Invocation] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// The process whose exit status stands for the whole chain.
    pub fn last(&self) -> &Invocation {
        // non-empty by construction
        &self.processes[self.processes.len() - 1]
    }
}

impl fmt::Display for ProcessChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, process) in self.processes.iter().enumerate() {
            if idx > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{process}")?;
        }
        Ok(())
    }
}

/// Quote an argument for display as a POSIX shell word.
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    if arg.is_empty() {
        return Cow::Borrowed("''");
    }

    let plain = arg.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '@' | '%' | '+' | '!')
    });
    if plain {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', "'\\''")))
    }
}
