//! Fontbatch CLI library.

pub mod args;
pub mod cli;

use std::{ffi::OsString, process::ExitCode};

use clap::Parser;
use fontbatch_core::{Reporter, require_files, resolve};
use log::debug;

use crate::{
    args::{known_long_flags, split_args},
    cli::Cli,
};

/// Parse `args` (program name first) and run to completion.
///
/// Fails only when no input file was given.
pub fn run<I>(args: I) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
{
    let known = known_long_flags();
    let split = split_args(args, |name| known.contains(name));
    debug!("leftover flags: {:?}", split.leftovers);

    let cli = Cli::parse_from(split.known);
    let reporter = Reporter::default();

    if let Err(e) = require_files(&cli.files) {
        reporter.report(e);
        return ExitCode::FAILURE;
    }

    let request = cli.into_request(&split.leftovers, &reporter);
    match resolve(request, &reporter) {
        Ok(settings) => {
            let summary = fontbatch_core::run(&settings, &reporter);
            debug!(
                "instanced {}, compressed {}, subset {}, {} errors",
                summary.instanced,
                summary.compressed,
                summary.subset,
                summary.errors.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            reporter.report(e);
            ExitCode::FAILURE
        }
    }
}
