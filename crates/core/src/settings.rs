//! Resolves command line, configuration file and defaults into [`Settings`].
//!
//! Every key comes from exactly one source: the command line if it set the
//! key, else the configuration file, else the built-in default. Axis
//! limitations are the one exception; they are merged per axis tag with the
//! command line winning.

use std::{
    env,
    fmt,
    fs::create_dir,
    io,
    path::{Path, PathBuf},
};

use font_instancer::{AxisLimit, to_axis_limit};
use font_subsetter::{Flavor, Selection, parse_flavors};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use crate::{
    config::{
        ConfigFile, DEFAULT_APPEND_AXES, DEFAULT_FLAVORS, DEFAULT_OUTPUT_DIRECTORY,
        DEFAULT_PYFTSUBSET, DEFAULT_VAR_LIB_INSTANCER, DEFAULT_VERBOSE,
    },
    error::{Error, Result},
    paths::{normalize_input_path, to_portable_path},
    report::Reporter,
};

const NO_FILES_MESSAGE: &str = "Please provide a file argument, for example: fontbatch Foo.ttf. \
     Type fontbatch --help for more details.";

/// Fully resolved options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub verbose: bool,
    pub run_subsetting: bool,
    pub run_instancing: bool,
    pub append_axes: bool,
    pub suffix: Option<String>,
    /// Always absolute.
    pub output_directory: PathBuf,
    pub flavors: Vec<Flavor>,
    pub layout_features: Selection,
    pub unicodes: Selection,
    pub axis_loc: Vec<AxisLimit>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files: Vec<String> = self.files.iter().map(|p| to_portable_path(p)).collect();
        let flavors: Vec<&str> = self.flavors.iter().map(|f| f.as_str()).collect();
        let axes: Vec<String> = self.axis_loc.iter().map(ToString::to_string).collect();

        writeln!(f, "files: {}", files.join(", "))?;
        writeln!(f, "verbose: {}", self.verbose)?;
        writeln!(f, "pyftsubset: {}", self.run_subsetting)?;
        writeln!(f, "varLibInstancer: {}", self.run_instancing)?;
        writeln!(f, "appendAxes: {}", self.append_axes)?;
        writeln!(f, "suffix: {}", self.suffix.as_deref().unwrap_or(""))?;
        writeln!(f, "outputDirectory: {}", to_portable_path(&self.output_directory))?;
        writeln!(f, "flavors: {}", flavors.join(", "))?;
        writeln!(f, "layoutFeatures: {}", self.layout_features.to_arg())?;
        writeln!(f, "unicodes: {}", self.unicodes.to_arg())?;
        write!(f, "axisLoc: {}", axes.join(" "))
    }
}

/// Options from a single source. `None` means the source did not set it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSettings {
    pub verbose: Option<bool>,
    pub run_subsetting: Option<bool>,
    pub run_instancing: Option<bool>,
    pub append_axes: Option<bool>,
    pub suffix: Option<String>,
    pub output_directory: Option<PathBuf>,
    pub flavors: Option<Vec<Flavor>>,
    pub layout_features: Option<Selection>,
    pub unicodes: Option<Selection>,
    pub axis_loc: Vec<AxisLimit>,
}

impl PartialSettings {
    /// Fill every key `self` leaves unset from `lower`.
    pub fn or(self, lower: PartialSettings) -> PartialSettings {
        PartialSettings {
            verbose: self.verbose.or(lower.verbose),
            run_subsetting: self.run_subsetting.or(lower.run_subsetting),
            run_instancing: self.run_instancing.or(lower.run_instancing),
            append_axes: self.append_axes.or(lower.append_axes),
            suffix: self.suffix.or(lower.suffix),
            output_directory: self.output_directory.or(lower.output_directory),
            flavors: self.flavors.or(lower.flavors),
            layout_features: self.layout_features.or(lower.layout_features),
            unicodes: self.unicodes.or(lower.unicodes),
            axis_loc: merge_axis_loc(&lower.axis_loc, &self.axis_loc),
        }
    }

    /// Convert a parsed configuration file, reporting what cannot be used.
    pub fn from_config(config: &ConfigFile, reporter: &Reporter) -> PartialSettings {
        let ignored = config.ignored_keys();
        if !ignored.is_empty() {
            reporter.report(Error::application(format!(
                "Ignoring unknown keys in the config file: {}",
                ignored.join(", ")
            )));
        }

        let flavors = config.flavors.as_ref().and_then(|list| {
            parse_flavors(&list.joined())
                .map_err(|e| {
                    reporter.report(Error::application(format!(
                        "Ignoring flavors in the config file: {e}"
                    )))
                })
                .ok()
        });

        let axis_loc = match config.axis_pairs() {
            Some(pairs) => axis_loc_from_pairs(pairs, "axisLoc entries in the config file", reporter),
            None => {
                reporter.report(Error::application(
                    "Ignoring axisLoc in the config file: expected an object or an array of objects",
                ));
                Vec::new()
            }
        };

        PartialSettings {
            verbose: config.verbose,
            run_subsetting: config.pyftsubset,
            run_instancing: config.var_lib_instancer,
            append_axes: config.append_axes,
            suffix: config.suffix.clone(),
            output_directory: config.output_directory.clone(),
            flavors,
            layout_features: config
                .layout_features
                .as_ref()
                .map(|list| Selection::parse(&list.joined())),
            unicodes: config
                .unicodes
                .as_ref()
                .map(|list| Selection::parse(&list.joined())),
            axis_loc,
        }
    }
}

/// Keep the valid axis limitations among `pairs` and report the rest.
///
/// `source` names where the pairs came from in the report.
pub fn axis_loc_from_pairs<'a, I>(pairs: I, source: &str, reporter: &Reporter) -> Vec<AxisLimit>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut limits = Vec::new();
    let mut ignored = Vec::new();
    for (key, value) in pairs {
        match to_axis_limit(key, value) {
            Some(limit) => limits.push(limit),
            None => ignored.push(key),
        }
    }

    if !ignored.is_empty() {
        reporter.report(Error::application(format!(
            "Ignoring invalid {source}: {}",
            ignored.join(", ")
        )));
    }
    limits
}

/// Merge two axis lists; `higher` wins per tag.
///
/// A tag keeps the position of its first appearance.
pub fn merge_axis_loc(lower: &[AxisLimit], higher: &[AxisLimit]) -> Vec<AxisLimit> {
    let mut merged: IndexMap<String, AxisLimit> = IndexMap::new();
    for limit in lower.iter().chain(higher) {
        merged.insert(limit.tag.as_str().to_string(), limit.clone());
    }
    merged.into_values().collect()
}

/// Apply defaults to layered options. Does not touch the filesystem.
pub fn merge(files: Vec<PathBuf>, cli: PartialSettings, config: PartialSettings, cwd: &Path) -> Settings {
    let merged = cli.or(config);

    let output_directory = merged
        .output_directory
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));

    Settings {
        files: files.iter().map(|file| normalize_input_path(file)).collect(),
        verbose: merged.verbose.unwrap_or(DEFAULT_VERBOSE),
        run_subsetting: merged.run_subsetting.unwrap_or(DEFAULT_PYFTSUBSET),
        run_instancing: merged.run_instancing.unwrap_or(DEFAULT_VAR_LIB_INSTANCER),
        append_axes: merged.append_axes.unwrap_or(DEFAULT_APPEND_AXES),
        suffix: merged.suffix.filter(|suffix| !suffix.is_empty()),
        output_directory: cwd.join(output_directory),
        flavors: merged.flavors.unwrap_or_else(default_flavors),
        layout_features: merged.layout_features.unwrap_or(Selection::All),
        unicodes: merged.unicodes.unwrap_or(Selection::All),
        axis_loc: merged.axis_loc,
    }
}

fn default_flavors() -> Vec<Flavor> {
    DEFAULT_FLAVORS
        .iter()
        .filter_map(|flavor| flavor.parse().ok())
        .collect()
}

/// What the command line asked for, before any file is read.
#[derive(Debug, Clone, Default)]
pub struct SettingsRequest {
    pub files: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub cli: PartialSettings,
}

/// Fails when there is nothing to work on.
pub fn require_files(files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        return Err(Error::application(NO_FILES_MESSAGE));
    }
    Ok(())
}

/// [`resolve_in`] relative to the process working directory.
pub fn resolve(request: SettingsRequest, reporter: &Reporter) -> Result<Settings> {
    let cwd = working_directory(env::current_dir(), reporter);
    resolve_in(request, &cwd, reporter)
}

/// An unreadable working directory is reported; paths then stay relative.
fn working_directory(cwd: io::Result<PathBuf>, reporter: &Reporter) -> PathBuf {
    cwd.unwrap_or_else(|e| {
        reporter.report(Error::unknown(format!(
            "Cannot read the working directory: {e}"
        )));
        PathBuf::new()
    })
}

/// Resolve a request and make sure the output directory exists.
///
/// The only error is an empty file list, checked before anything else.
/// Every other problem is reported and resolution carries on.
pub fn resolve_in(request: SettingsRequest, cwd: &Path, reporter: &Reporter) -> Result<Settings> {
    require_files(&request.files)?;

    let config = match &request.config {
        Some(path) => load_config(&cwd.join(path), reporter),
        None => PartialSettings::default(),
    };

    let settings = merge(request.files, request.cli, config, cwd);
    ensure_output_directory(&settings.output_directory, reporter);
    Ok(settings)
}

fn load_config(path: &Path, reporter: &Reporter) -> PartialSettings {
    match ConfigFile::load(path) {
        Ok(config) => {
            debug!("loaded config {}", path.display());
            PartialSettings::from_config(&config, reporter)
        }
        Err(e) => {
            reporter.report(Error::application(format!(
                "{e:#}\nIgnoring the config file, using command line values and defaults."
            )));
            PartialSettings::default()
        }
    }
}

/// Create the last path segment only; a missing parent is an error.
fn ensure_output_directory(dir: &Path, reporter: &Reporter) {
    if dir.is_dir() {
        return;
    }
    match create_dir(dir) {
        Ok(()) => debug!("created {}", dir.display()),
        Err(e) => reporter.report(Error::unknown(format!(
            "Failed to create output directory {}: {e}",
            dir.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn limit(tag: &str, value: &str) -> AxisLimit {
        AxisLimit::parse(tag, value).unwrap()
    }

    #[test]
    fn test_defaults_only() {
        let cwd = Path::new("/work");
        let settings = merge(
            vec!["Foo.ttf".into()],
            PartialSettings::default(),
            PartialSettings::default(),
            cwd,
        );

        assert!(settings.verbose);
        assert!(settings.run_subsetting);
        assert!(settings.run_instancing);
        assert!(!settings.append_axes);
        assert_eq!(settings.suffix, None);
        assert_eq!(settings.output_directory, PathBuf::from("/work/output"));
        assert_eq!(settings.flavors, [Flavor::Woff2]);
        assert_eq!(settings.layout_features, Selection::All);
        assert_eq!(settings.unicodes, Selection::All);
        assert!(settings.axis_loc.is_empty());
    }

    #[test]
    fn test_cli_only_changes_given_keys() {
        let cli = PartialSettings {
            run_subsetting: Some(false),
            suffix: Some("en".into()),
            ..Default::default()
        };
        let defaults = merge(
            vec!["Foo.ttf".into()],
            PartialSettings::default(),
            PartialSettings::default(),
            Path::new("/w"),
        );
        let settings = merge(vec!["Foo.ttf".into()], cli, PartialSettings::default(), Path::new("/w"));

        assert_eq!(
            settings,
            Settings {
                run_subsetting: false,
                suffix: Some("en".into()),
                ..defaults
            }
        );
    }

    #[test]
    fn test_cli_beats_config_beats_default() {
        let cli = PartialSettings {
            verbose: Some(false),
            flavors: Some(vec![Flavor::Woff]),
            ..Default::default()
        };
        let config = PartialSettings {
            verbose: Some(true),
            append_axes: Some(true),
            flavors: Some(vec![Flavor::Woff, Flavor::Woff2]),
            unicodes: Some(Selection::parse("U+0000-00FF")),
            ..Default::default()
        };

        let settings = merge(vec!["a.ttf".into()], cli, config, Path::new("/w"));
        assert!(!settings.verbose);
        assert!(settings.append_axes);
        assert_eq!(settings.flavors, [Flavor::Woff]);
        assert_eq!(settings.unicodes.to_arg(), "U+0000-00FF");
        assert_eq!(settings.layout_features, Selection::All);
    }

    #[test]
    fn test_empty_cli_suffix_overrides_config() {
        let cli = PartialSettings {
            suffix: Some(String::new()),
            ..Default::default()
        };
        let config = PartialSettings {
            suffix: Some("latin".into()),
            ..Default::default()
        };
        let settings = merge(vec!["a.ttf".into()], cli, config, Path::new("/w"));
        assert_eq!(settings.suffix, None);
    }

    #[test]
    fn test_axis_loc_merges_per_tag() {
        let config = [limit("wght", "100:900"), limit("opsz", "drop")];
        let cli = [limit("wght", "400"), limit("wdth", "75:100")];

        let merged: Vec<String> = merge_axis_loc(&config, &cli)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(merged, ["wght=400", "opsz=drop", "wdth=75:100"]);
    }

    #[test]
    fn test_absolute_output_directory_kept() {
        let cli = PartialSettings {
            output_directory: Some("/elsewhere/dist".into()),
            ..Default::default()
        };
        let settings = merge(vec!["a.ttf".into()], cli, PartialSettings::default(), Path::new("/w"));
        assert_eq!(settings.output_directory, PathBuf::from("/elsewhere/dist"));
    }

    #[test]
    fn test_from_config_reports_unusable_values() {
        let reporter = Reporter::hidden();
        let config = ConfigFile::from_json(
            r#"{
                "flavors": "woff,ttf",
                "axisLoc": [{"wght": "400:700"}, {"opsz": true}],
                "colour": "red"
            }"#,
        )
        .unwrap();

        let partial = PartialSettings::from_config(&config, &reporter);
        assert_eq!(partial.flavors, None);
        assert_eq!(partial.axis_loc, [limit("wght", "400:700")]);
        assert_eq!(reporter.count(ErrorKind::Application), 3);
    }

    #[test]
    fn test_empty_files_fail_first() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::hidden();
        let request = SettingsRequest {
            config: Some("missing.json".into()),
            ..Default::default()
        };

        let err = resolve_in(request, dir.path(), &reporter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert!(reporter.diagnostics().is_empty());
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_unreadable_config_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
        let reporter = Reporter::hidden();
        let request = SettingsRequest {
            files: vec!["Foo.ttf".into()],
            config: Some("broken.json".into()),
            cli: PartialSettings {
                verbose: Some(false),
                ..Default::default()
            },
        };

        let settings = resolve_in(request, dir.path(), &reporter).unwrap();
        assert!(!settings.verbose);
        assert!(settings.output_directory.is_dir());
        assert_eq!(reporter.count(ErrorKind::Application), 1);
        assert!(reporter.diagnostics()[0].message.contains("Ignoring the config file"));
    }

    #[test]
    fn test_output_directory_created_shallow() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::hidden();
        let request = SettingsRequest {
            files: vec!["Foo.ttf".into()],
            config: None,
            cli: PartialSettings {
                output_directory: Some("deep/nested".into()),
                ..Default::default()
            },
        };

        let settings = resolve_in(request, dir.path(), &reporter).unwrap();
        assert!(!settings.output_directory.exists());
        assert_eq!(reporter.count(ErrorKind::Unknown), 1);
    }

    #[test]
    fn test_unreadable_working_directory_is_reported() {
        let reporter = Reporter::hidden();
        let cwd = working_directory(Err(io::Error::other("removed")), &reporter);

        assert_eq!(cwd, PathBuf::new());
        assert_eq!(reporter.count(ErrorKind::Unknown), 1);
        assert!(reporter.diagnostics()[0].message.contains("removed"));

        let settings = merge(
            vec!["Foo.ttf".into()],
            PartialSettings::default(),
            PartialSettings::default(),
            &cwd,
        );
        assert_eq!(settings.output_directory, PathBuf::from("output"));
    }

    #[test]
    fn test_readable_working_directory_is_used() {
        let reporter = Reporter::hidden();
        let cwd = working_directory(Ok(PathBuf::from("/work")), &reporter);
        assert_eq!(cwd, PathBuf::from("/work"));
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_display_lists_every_key() {
        let settings = merge(
            vec!["Foo.ttf".into()],
            PartialSettings {
                axis_loc: vec![limit("wght", "400:700")],
                ..Default::default()
            },
            PartialSettings::default(),
            Path::new("/w"),
        );
        let dump = settings.to_string();
        assert!(dump.contains("files: Foo.ttf"));
        assert!(dump.contains("flavors: woff2"));
        assert!(dump.contains("axisLoc: wght=400:700"));
    }
}
