//! # Font Process
//!
//! Runs external font tools as plain processes.
//!
//! A tool call is an [`Invocation`]: a program name plus an argument list.
//! Arguments are handed to the operating system one by one and never pass
//! through a shell, so file names with spaces, quotes or `$` are safe.
//!
//! ## Example
//!
//! ```no_run
//! use font_process::{Invocation, SystemRunner, ToolRunner};
//!
//! let invocation = Invocation::new("pyftsubset")
//!     .arg("Foo.ttf")
//!     .arg("--flavor=woff2");
//! let output = SystemRunner.run(&invocation).unwrap();
//! let output = output.into_result(&invocation).unwrap();
//! println!("{}", output.stdout);
//! ```

mod error;

use std::{fmt, process::Command};

use log::debug;

pub use error::{Result, ToolError};

/// A single external tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
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
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// A successful run with the given standard output.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Apply the failure rule shared by all font tools: a non-zero exit or
    /// anything written to stderr is a failure.
    pub fn into_result(self, invocation: &Invocation) -> Result<Self> {
        if !self.success {
            return Err(ToolError::Failed {
                program: invocation.program.clone(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            });
        }
        if !self.stderr.trim().is_empty() {
            return Err(ToolError::Stderr {
                program: invocation.program.clone(),
                stderr: self.stderr.trim().to_string(),
            });
        }
        Ok(self)
    }
}

/// Something that can execute an [`Invocation`].
///
/// Implementations are shared across worker threads.
pub trait ToolRunner: Sync {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput>;

    /// Run and apply [`ToolOutput::into_result`].
    fn run_checked(&self, invocation: &Invocation) -> Result<ToolOutput> {
        self.run(invocation)?.into_result(invocation)
    }
}

/// Runs invocations with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        debug!("exec: {invocation}");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
