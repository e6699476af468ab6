//! Tagged error type for every failure the orchestrator can report.

use std::{fmt::Display, result};

use font_process::ToolError;

/// What went wrong, tagged by where it went wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad invocation or configuration.
    #[error("{0}")]
    Application(String),

    /// `varLib.instancer` failed.
    #[error("{0}")]
    Instancer(#[source] ToolError),

    /// `pyftsubset` failed.
    #[error("{0}")]
    Subsetting(#[source] ToolError),

    /// `ttLib.woff2 compress` failed.
    #[error("{0}")]
    Compression(#[source] ToolError),

    /// Anything else, including filesystem failures.
    #[error("{0}")]
    Unknown(String),
}

/// The tag of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Application,
    Instancer,
    Subsetting,
    Compression,
    Unknown,
}

impl ErrorKind {
    /// Prefix shown to the user so they can tell which tool failed.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Application => "Application error",
            ErrorKind::Instancer => "varLib.instancer error",
            ErrorKind::Subsetting => "pyftsubset error",
            ErrorKind::Compression => "ttLib.woff2 error",
            ErrorKind::Unknown => "Unknown Error",
        }
    }
}

impl Error {
    pub fn application(message: impl Into<String>) -> Self {
        Error::Application(message.into())
    }

    pub fn unknown<E: Display>(e: E) -> Self {
        Error::Unknown(e.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Application(_) => ErrorKind::Application,
            Error::Instancer(_) => ErrorKind::Instancer,
            Error::Subsetting(_) => ErrorKind::Subsetting,
            Error::Compression(_) => ErrorKind::Compression,
            Error::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
