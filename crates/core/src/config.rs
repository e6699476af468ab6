//! Built-in defaults and the JSON configuration file.

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Binary name used in application diagnostics.
pub const APPLICATION_NAME: &str = "fontbatch";

/// Output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";

pub const DEFAULT_VERBOSE: bool = true;
pub const DEFAULT_PYFTSUBSET: bool = true;
pub const DEFAULT_VAR_LIB_INSTANCER: bool = true;
pub const DEFAULT_APPEND_AXES: bool = false;

/// Flavors written when nothing else is asked for.
pub const DEFAULT_FLAVORS: &[&str] = &["woff2"];

/// Environment variable overriding the `fonttools` program.
pub const FONTTOOLS_ENV: &str = "FONTBATCH_FONTTOOLS";

/// Environment variable overriding the `pyftsubset` program.
pub const PYFTSUBSET_ENV: &str = "FONTBATCH_PYFTSUBSET";

/// A list given either as one string (`"woff,woff2"`) or as an array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    One(String),
    Many(Vec<String>),
}

impl StringList {
    /// Flatten to a single comma-separated string.
    pub fn joined(&self) -> String {
        match self {
            StringList::One(text) => text.clone(),
            StringList::Many(items) => items.join(","),
        }
    }
}

/// Contents of a `--config` file.
///
/// Keys mirror the long option names. Anything else lands in `ignored`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigFile {
    pub verbose: Option<bool>,
    pub pyftsubset: Option<bool>,
    pub var_lib_instancer: Option<bool>,
    #[serde(alias = "replaceName")]
    pub append_axes: Option<bool>,
    pub suffix: Option<String>,
    pub output_directory: Option<PathBuf>,
    pub flavors: Option<StringList>,
    pub layout_features: Option<StringList>,
    pub unicodes: Option<StringList>,
    pub axis_loc: Option<Value>,
    #[serde(flatten)]
    pub ignored: Map<String, Value>,
}

impl ConfigFile {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Configuration is not a valid JSON object")
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse configuration {}", path.display()))
    }

    /// Names of keys that are not configuration options.
    pub fn ignored_keys(&self) -> Vec<&str> {
        self.ignored.keys().map(String::as_str).collect()
    }

    /// Flatten `axisLoc` into key/value pairs.
    ///
    /// Accepts `[{"wght": "400:700"}, {"opsz": "drop"}]` as well as
    /// `{"wght": "400:700", "opsz": "drop"}`. Returns `None` when the field is
    /// present but has neither shape.
    pub fn axis_pairs(&self) -> Option<Vec<(&str, &Value)>> {
        match &self.axis_loc {
            None | Some(Value::Null) => Some(Vec::new()),
            Some(Value::Object(map)) => Some(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            Some(Value::Array(entries)) => {
                let mut pairs = Vec::new();
                for entry in entries {
                    let Value::Object(map) = entry else {
                        return None;
                    };
                    pairs.extend(map.iter().map(|(k, v)| (k.as_str(), v)));
                }
                Some(pairs)
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        let config = ConfigFile::from_json(
            r#"{
                "verbose": false,
                "pyftsubset": true,
                "varLibInstancer": false,
                "appendAxes": true,
                "suffix": "latin",
                "outputDirectory": "dist",
                "flavors": ["woff", "woff2"],
                "layoutFeatures": "kern,liga",
                "unicodes": "*"
            }"#,
        )
        .unwrap();

        assert_eq!(config.verbose, Some(false));
        assert_eq!(config.pyftsubset, Some(true));
        assert_eq!(config.var_lib_instancer, Some(false));
        assert_eq!(config.append_axes, Some(true));
        assert_eq!(config.suffix.as_deref(), Some("latin"));
        assert_eq!(config.output_directory, Some(PathBuf::from("dist")));
        assert_eq!(
            config.flavors,
            Some(StringList::Many(vec!["woff".into(), "woff2".into()]))
        );
        assert_eq!(config.layout_features.as_ref().unwrap().joined(), "kern,liga");
        assert!(config.ignored_keys().is_empty());
    }

    #[test]
    fn test_replace_name_alias() {
        let config = ConfigFile::from_json(r#"{"replaceName": true}"#).unwrap();
        assert_eq!(config.append_axes, Some(true));
    }

    #[test]
    fn test_unknown_keys_are_collected() {
        let config = ConfigFile::from_json(r#"{"verbose": true, "colour": "red", "jobs": 4}"#)
            .unwrap();
        let mut ignored = config.ignored_keys();
        ignored.sort();
        assert_eq!(ignored, ["colour", "jobs"]);
    }

    #[test]
    fn test_axis_loc_as_array() {
        let config =
            ConfigFile::from_json(r#"{"axisLoc": [{"wght": "400:700"}, {"opsz": "drop"}]}"#)
                .unwrap();
        let pairs = config.axis_pairs().unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["wght", "opsz"]);
    }

    #[test]
    fn test_axis_loc_as_object() {
        let config = ConfigFile::from_json(r#"{"axisLoc": {"wght": 400}}"#).unwrap();
        let pairs = config.axis_pairs().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, &Value::from(400));
    }

    #[test]
    fn test_axis_loc_with_wrong_shape() {
        let config = ConfigFile::from_json(r#"{"axisLoc": "wght=400"}"#).unwrap();
        assert!(config.axis_pairs().is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ConfigFile::from_json("{ not json").is_err());
        assert!(ConfigFile::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = ConfigFile::load(Path::new("/definitely/missing/fontbatch.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/missing/fontbatch.json"));
    }
}
