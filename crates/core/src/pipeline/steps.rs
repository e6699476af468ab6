//! The individual units of work and the three run shapes built from them.

use std::{
    fs::{self, read_dir, remove_file},
    io,
    path::{Path, PathBuf},
    sync::{
        Once,
        atomic::{AtomicUsize, Ordering},
    },
};

use font_instancer::instanced_file_name;
use font_process::ToolRunner;
use font_subsetter::{Flavor, subset_file_name};
use font_woff2::compressed_path;
use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;

use super::{Orchestrator, RunSummary};
use crate::{
    error::Error,
    paths::{file_stem, human_size, to_portable_path},
    progress::{Stage, StageCount},
};

/// Outcome of one file in the instancing-only run.
#[derive(Debug, Default)]
struct CompressOutcome {
    instanced: bool,
    compressed: bool,
    deleted: Option<PathBuf>,
}

impl<R: ToolRunner> Orchestrator<'_, R> {
    pub(super) fn run_both(&self, summary: &mut RunSummary) {
        let files = &self.settings.files;
        let flavors = &self.settings.flavors;
        let progress = self.reporter.progress();

        self.reporter.println("varLib.instancer started working.");
        let instancing = progress.add(Stage::Instancing, files.len());
        let subsetting = progress.add(Stage::Subsetting, files.len() * flavors.len());

        let instancing_settled = AtomicUsize::new(0);
        let subset = AtomicUsize::new(0);
        let subsetting_started = Once::new();

        let intermediates: Vec<PathBuf> = files
            .par_iter()
            .filter_map(|file| {
                let instance = self.instance_file(file, &instancing);
                if instancing_settled.fetch_add(1, Ordering::AcqRel) + 1 == files.len() {
                    self.reporter.println("varLib.instancer completed the work.");
                }

                let Some(instance) = instance else {
                    subsetting.dec_length(flavors.len() as u64);
                    return None;
                };

                subsetting_started.call_once(|| self.reporter.println("pyftsubset started working."));
                let done = flavors
                    .par_iter()
                    .filter(|&&flavor| self.subset_file(&instance, flavor, &subsetting))
                    .count();
                subset.fetch_add(done, Ordering::Relaxed);

                Some(instance)
            })
            .collect();

        summary.stages = vec![
            StageCount::settle(Stage::Instancing, &instancing),
            StageCount::settle(Stage::Subsetting, &subsetting),
        ];
        self.reporter.println("pyftsubset completed the work.");

        summary.instanced = intermediates.len();
        summary.subset = subset.into_inner();
        summary.deleted = self.delete_intermediates(&intermediates);
        if !summary.deleted.is_empty() {
            self.reporter.println("Deleted the intermediate varLib.instancer files.");
        }
    }

    pub(super) fn run_instancing_only(&self, summary: &mut RunSummary) {
        let files = &self.settings.files;
        let progress = self.reporter.progress();

        self.reporter.println("varLib.instancer started working.");
        let instancing = progress.add(Stage::Instancing, files.len());
        let compression = progress.add(Stage::Compression, files.len());

        let outcomes: Vec<CompressOutcome> = files
            .par_iter()
            .map(|file| {
                let Some(instance) = self.instance_file(file, &instancing) else {
                    compression.dec_length(1);
                    return CompressOutcome::default();
                };

                let compressed = self.compress_file(&instance, &compression);
                let deleted = self.delete_file(&instance).then_some(instance);
                CompressOutcome {
                    instanced: true,
                    compressed,
                    deleted,
                }
            })
            .collect();

        summary.stages = vec![
            StageCount::settle(Stage::Instancing, &instancing),
            StageCount::settle(Stage::Compression, &compression),
        ];
        self.reporter.println("varLib.instancer completed the work.");

        for outcome in outcomes {
            summary.instanced += usize::from(outcome.instanced);
            summary.compressed += usize::from(outcome.compressed);
            summary.deleted.extend(outcome.deleted);
        }
    }

    pub(super) fn run_subsetting_only(&self, summary: &mut RunSummary) {
        let files = &self.settings.files;
        let flavors = &self.settings.flavors;

        self.reporter.println("pyftsubset started working.");
        let subsetting = self
            .reporter
            .progress()
            .add(Stage::Subsetting, files.len() * flavors.len());

        summary.subset = files
            .par_iter()
            .map(|file| {
                flavors
                    .par_iter()
                    .filter(|&&flavor| self.subset_file(file, flavor, &subsetting))
                    .count()
            })
            .sum();

        summary.stages = vec![StageCount::settle(Stage::Subsetting, &subsetting)];
        self.reporter.println("pyftsubset completed the work.");
    }

    /// Instance one file into the output directory.
    fn instance_file(&self, file: &Path, bar: &ProgressBar) -> Option<PathBuf> {
        let name = instanced_file_name(
            &file_stem(file),
            self.instancer.axes(),
            self.settings.append_axes,
        );
        let output = self.settings.output_directory.join(name);
        let invocation = self
            .instancer
            .invocation(&to_portable_path(file), &to_portable_path(&output));

        let produced = match self.runner.run_checked(&invocation) {
            Ok(result) => {
                self.echo(&result.stdout);
                debug!("instanced {}", output.display());
                Some(output)
            }
            Err(e) => {
                self.reporter.report(Error::Instancer(e));
                None
            }
        };

        bar.inc(1);
        produced
    }

    /// Subset one file into one flavor. Returns whether it succeeded.
    fn subset_file(&self, file: &Path, flavor: Flavor, bar: &ProgressBar) -> bool {
        let name = subset_file_name(&file_stem(file), self.settings.suffix.as_deref(), flavor);
        let output = self.settings.output_directory.join(name);
        let invocation =
            self.subsetter
                .invocation(&to_portable_path(file), &to_portable_path(&output), flavor);

        let succeeded = match self.runner.run_checked(&invocation) {
            Ok(result) => {
                self.echo(&result.stdout);
                debug!("subset {}", output.display());
                true
            }
            Err(e) => {
                self.reporter.report(Error::Subsetting(e));
                false
            }
        };

        bar.inc(1);
        succeeded
    }

    /// Compress an instance to WOFF2 next to itself.
    fn compress_file(&self, file: &Path, bar: &ProgressBar) -> bool {
        let invocation = self.compressor.invocation(&to_portable_path(file));

        let succeeded = match self.runner.run_checked(&invocation) {
            Ok(result) => {
                self.echo(&result.stdout);
                debug!("compressed {}", compressed_path(file).display());
                true
            }
            Err(e) => {
                self.reporter.report(Error::Compression(e));
                false
            }
        };

        bar.inc(1);
        succeeded
    }

    fn delete_intermediates(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        files
            .iter()
            .filter(|file| self.delete_file(file))
            .cloned()
            .collect()
    }

    fn delete_file(&self, file: &Path) -> bool {
        match remove_file(file) {
            Ok(()) => {
                debug!("deleted {}", file.display());
                true
            }
            Err(e) => {
                self.reporter.report(Error::unknown(format!(
                    "Failed to delete {}: {e}",
                    file.display()
                )));
                false
            }
        }
    }

    pub(super) fn list_output_directory(&self) {
        let dir = &self.settings.output_directory;
        match listing(dir) {
            Ok(lines) => {
                let mut text = format!("Contents of {}", to_portable_path(dir));
                for line in lines {
                    text.push('\n');
                    text.push_str(&line);
                }
                self.reporter.println(text);
            }
            Err(e) => self.reporter.report(Error::unknown(format!(
                "Failed to list {}: {e}",
                dir.display()
            ))),
        }
    }

    fn echo(&self, stdout: &str) {
        let stdout = stdout.trim_end();
        if !stdout.trim().is_empty() {
            self.reporter.println(stdout);
        }
    }
}

/// One line per entry, sorted by name.
fn listing(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = read_dir(dir)?.collect::<io::Result<Vec<fs::DirEntry>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    entries
        .iter()
        .map(|entry| {
            let metadata = entry.metadata()?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let name = if metadata.is_dir() { format!("{name}/") } else { name };
            Ok(format!("{:>10}  {name}", human_size(metadata.len())))
        })
        .collect()
}
