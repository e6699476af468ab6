//! CLI definitions.

use std::path::PathBuf;

use clap::Parser;
use font_subsetter::parse_flavors;
use fontbatch_core::{
    Error, PartialSettings, Reporter, Selection, SettingsRequest, axis_loc_from_pairs,
};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "fontbatch", version)]
#[command(about = "Instance and subset fonts in batch with fonttools")]
#[command(after_help = "Axis limitations are passed as four-letter flags: \
    --wght 400:700, --opsz drop, --wdth 100.")]
pub struct Cli {
    /// Font files to process
    pub files: Vec<PathBuf>,

    /// JSON file with option values; command line flags take priority
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print settings and a listing of the output directory [default]
    #[arg(long, overrides_with = "no_verbose")]
    verbose: bool,
    #[arg(long, overrides_with = "verbose", hide = true)]
    no_verbose: bool,

    /// Subset with pyftsubset [default]
    #[arg(long, overrides_with = "no_pyftsubset")]
    pyftsubset: bool,
    #[arg(long, overrides_with = "pyftsubset", hide = true)]
    no_pyftsubset: bool,

    /// Limit axes with fonttools varLib.instancer [default]
    #[arg(long, overrides_with = "no_varlibinstancer")]
    varlibinstancer: bool,
    #[arg(long, overrides_with = "varlibinstancer", hide = true)]
    no_varlibinstancer: bool,

    /// Append the limited axis tags to instanced file names: Foo[wght].ttf
    #[arg(long, alias = "replace-name", overrides_with = "no_append_axes")]
    append_axes: bool,
    #[arg(long, alias = "no-replace-name", overrides_with = "append_axes", hide = true)]
    no_append_axes: bool,

    /// Appended to subsetted file names: Foo-SUFFIX.woff2
    #[arg(long)]
    pub suffix: Option<String>,

    /// Where results go [default: output]
    #[arg(long, value_name = "DIR")]
    pub output_directory: Option<PathBuf>,

    /// Output flavors, comma or space separated, or "*" for all [default: woff2]
    #[arg(long, value_name = "LIST")]
    pub flavors: Option<String>,

    /// Layout features to keep, or "*" for all [default: *]
    #[arg(long, value_name = "LIST")]
    pub layout_features: Option<String>,

    /// Unicodes to keep, or "*" for all [default: *]
    #[arg(long, value_name = "LIST")]
    pub unicodes: Option<String>,
}

/// `Some(true)` for `--x`, `Some(false)` for `--no-x`, `None` when absent.
fn flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Cli {
    pub fn verbose(&self) -> Option<bool> {
        flag(self.verbose, self.no_verbose)
    }

    pub fn pyftsubset(&self) -> Option<bool> {
        flag(self.pyftsubset, self.no_pyftsubset)
    }

    pub fn varlibinstancer(&self) -> Option<bool> {
        flag(self.varlibinstancer, self.no_varlibinstancer)
    }

    pub fn append_axes(&self) -> Option<bool> {
        flag(self.append_axes, self.no_append_axes)
    }

    /// Turn parsed flags and leftover pairs into a settings request.
    ///
    /// Unusable values are reported and treated as not given.
    pub fn into_request(self, leftovers: &[(String, Value)], reporter: &Reporter) -> SettingsRequest {
        let flavors = self.flavors.as_deref().and_then(|text| {
            parse_flavors(text)
                .map_err(|e| reporter.report(Error::application(format!("Ignoring --flavors: {e}"))))
                .ok()
        });
        let axis_loc = axis_loc_from_pairs(
            leftovers.iter().map(|(key, value)| (key.as_str(), value)),
            "options",
            reporter,
        );

        let cli = PartialSettings {
            verbose: self.verbose(),
            run_subsetting: self.pyftsubset(),
            run_instancing: self.varlibinstancer(),
            append_axes: self.append_axes(),
            suffix: self.suffix,
            output_directory: self.output_directory,
            flavors,
            layout_features: self.layout_features.as_deref().map(Selection::parse),
            unicodes: self.unicodes.as_deref().map(Selection::parse),
            axis_loc,
        };

        SettingsRequest {
            files: self.files,
            config: self.config,
            cli,
        }
    }
}
