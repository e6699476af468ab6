//! Task orchestration: which tools run, on what, and in which order.
//!
//! Three shapes of run exist:
//!
//! - instancing and subsetting: every file is instanced into the output
//!   directory, then each instance is subsetted once per flavor. Instances are
//!   deleted after all subsetting across all files has settled.
//! - instancing only: every instance is compressed to WOFF2 and deleted as
//!   soon as its compression settles.
//! - subsetting only: the original files are subsetted once per flavor.
//!
//! Files run in parallel, as do the flavors of one file. A failed unit is
//! reported and counted as settled; it never stops its siblings.

mod steps;

use std::{env, path::PathBuf};

use font_instancer::Instancer;
use font_process::{SystemRunner, ToolRunner};
use font_subsetter::Subsetter;
use font_woff2::Woff2Compressor;

use crate::{
    config::{FONTTOOLS_ENV, PYFTSUBSET_ENV},
    error::Error,
    progress::{Stage, StageCount},
    report::{Diagnostic, Reporter},
    settings::Settings,
};

const NO_AXES_MESSAGE: &str = "Please provide axes for varLib.instancer.\n\
    For example: --wght 400:700, --wght drop, and or --opsz 20.\n\
    Type fonttools varLib.instancer --help for more details.";

const NOTHING_TO_DO_MESSAGE: &str = "Nothing to do, exiting.";

/// Program names of the external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPrograms {
    /// Hosts `varLib.instancer` and `ttLib.woff2`.
    pub fonttools: String,
    pub pyftsubset: String,
}

impl Default for ToolPrograms {
    fn default() -> Self {
        Self {
            fonttools: font_instancer::FONTTOOLS.to_string(),
            pyftsubset: font_subsetter::PYFTSUBSET.to_string(),
        }
    }
}

impl ToolPrograms {
    /// Defaults, overridden by `FONTBATCH_FONTTOOLS` and `FONTBATCH_PYFTSUBSET`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str| env::var(key).ok().filter(|value| !value.trim().is_empty());
        Self {
            fonttools: read(FONTTOOLS_ENV).unwrap_or(defaults.fonttools),
            pyftsubset: read(PYFTSUBSET_ENV).unwrap_or(defaults.pyftsubset),
        }
    }
}

/// What a run did.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files instanced successfully.
    pub instanced: usize,
    /// Instances compressed successfully.
    pub compressed: usize,
    /// Subsetting units (file and flavor) that succeeded.
    pub subset: usize,
    /// Intermediate files removed.
    pub deleted: Vec<PathBuf>,
    /// Final bar readings, in the order the bars were added.
    pub stages: Vec<StageCount>,
    /// Everything the reporter saw, settings resolution included.
    pub errors: Vec<Diagnostic>,
}

impl RunSummary {
    pub fn stage(&self, stage: Stage) -> Option<StageCount> {
        self.stages.iter().copied().find(|count| count.stage == stage)
    }
}

/// Drives the external tools for one set of [`Settings`].
pub struct Orchestrator<'a, R: ToolRunner> {
    settings: &'a Settings,
    runner: &'a R,
    reporter: &'a Reporter,
    instancer: Instancer,
    subsetter: Subsetter,
    compressor: Woff2Compressor,
}

impl<'a, R: ToolRunner> Orchestrator<'a, R> {
    pub fn new(settings: &'a Settings, runner: &'a R, reporter: &'a Reporter) -> Self {
        Self::with_programs(settings, runner, reporter, ToolPrograms::default())
    }

    pub fn with_programs(
        settings: &'a Settings,
        runner: &'a R,
        reporter: &'a Reporter,
        programs: ToolPrograms,
    ) -> Self {
        let instancer = Instancer::new(&programs.fonttools).with_axes(&settings.axis_loc);
        let subsetter = Subsetter::new()
            .with_program(programs.pyftsubset)
            .with_layout_features(settings.layout_features.clone())
            .with_unicodes(settings.unicodes.clone());
        let compressor = Woff2Compressor::new(programs.fonttools);

        Self {
            settings,
            runner,
            reporter,
            instancer,
            subsetter,
            compressor,
        }
    }

    /// Run every scheduled unit to completion.
    pub fn run(&self) -> RunSummary {
        let settings = self.settings;
        let mut summary = RunSummary::default();

        if settings.verbose {
            self.reporter.println(settings.to_string());
        }

        match (settings.run_instancing, settings.run_subsetting) {
            (true, run_subsetting) if settings.axis_loc.is_empty() => {
                self.reporter.report(Error::application(NO_AXES_MESSAGE));
                if run_subsetting {
                    self.run_subsetting_only(&mut summary);
                }
            }
            (true, true) => self.run_both(&mut summary),
            (true, false) => self.run_instancing_only(&mut summary),
            (false, true) => self.run_subsetting_only(&mut summary),
            (false, false) => self.reporter.report(Error::application(NOTHING_TO_DO_MESSAGE)),
        }

        if settings.verbose && (settings.run_instancing || settings.run_subsetting) {
            self.list_output_directory();
        }
        self.reporter.println("Program exits.");

        summary.errors = self.reporter.diagnostics();
        summary
    }
}

/// Run `settings` with the real tools, honouring the program overrides.
pub fn run(settings: &Settings, reporter: &Reporter) -> RunSummary {
    Orchestrator::with_programs(settings, &SystemRunner, reporter, ToolPrograms::from_env()).run()
}
