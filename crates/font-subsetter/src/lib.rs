//! Font subsetting through `pyftsubset` with builder pattern.
//!
//! This crate provides a high-level interface for building `pyftsubset`
//! calls. It does no file I/O and never runs the tool itself: it produces an
//! [`Invocation`] for a [`font_process::ToolRunner`] to execute.
//!
//! # Example
//!
//! ```
//! use font_subsetter::{Flavor, Selection, Subsetter};
//!
//! let invocation = Subsetter::new()
//!     .with_unicodes(Selection::parse("U+00-FF, U+2009"))
//!     .with_layout_features(Selection::All)
//!     .invocation("Foo.ttf", "out/Foo.woff2", Flavor::Woff2);
//!
//! assert_eq!(
//!     invocation.to_string(),
//!     "pyftsubset Foo.ttf --output-file=out/Foo.woff2 --flavor=woff2 \
//!      --layout-features=* --unicodes=U+00-FF,U+2009"
//! );
//! ```

mod selection;

use std::{fmt, str::FromStr};

use font_process::Invocation;

pub use selection::Selection;

/// Default subsetting program.
pub const PYFTSUBSET: &str = "pyftsubset";

/// Output container format passed to `--flavor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Woff,
    Woff2,
}

impl Flavor {
    /// Every flavor `pyftsubset` can write.
    pub const ALL: [Flavor; 2] = [Flavor::Woff, Flavor::Woff2];

    /// Both the `--flavor` value and the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            Flavor::Woff => "woff",
            Flavor::Woff2 => "woff2",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown flavor {0:?} (expected woff or woff2)")]
pub struct UnknownFlavor(pub String);

impl FromStr for Flavor {
    type Err = UnknownFlavor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "woff" => Ok(Flavor::Woff),
            "woff2" => Ok(Flavor::Woff2),
            _ => Err(UnknownFlavor(s.to_string())),
        }
    }
}

/// Parse a flavor list such as `woff,woff2` or `woff woff2`.
///
/// `*` or `all` selects every flavor. Duplicates are dropped, first
/// occurrence wins.
pub fn parse_flavors(text: &str) -> Result<Vec<Flavor>, UnknownFlavor> {
    match Selection::parse(text) {
        Selection::All => Ok(Flavor::ALL.to_vec()),
        Selection::Items(items) => {
            let mut flavors = Vec::new();
            for item in items {
                let flavor: Flavor = item.parse()?;
                if !flavors.contains(&flavor) {
                    flavors.push(flavor);
                }
            }
            Ok(flavors)
        }
    }
}

/// Builder for a `pyftsubset` call.
#[derive(Debug, Clone)]
pub struct Subsetter {
    program: String,
    layout_features: Selection,
    unicodes: Selection,
}

impl Default for Subsetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsetter {
    /// Keeps all layout features and all unicodes.
    pub fn new() -> Self {
        Self {
            program: PYFTSUBSET.to_string(),
            layout_features: Selection::All,
            unicodes: Selection::All,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_layout_features(mut self, features: Selection) -> Self {
        self.layout_features = features;
        self
    }

    pub fn with_unicodes(mut self, unicodes: Selection) -> Self {
        self.unicodes = unicodes;
        self
    }

    pub fn invocation(&self, input: &str, output: &str, flavor: Flavor) -> Invocation {
        Invocation::new(&self.program)
            .arg(input)
            .arg(format!("--output-file={output}"))
            .arg(format!("--flavor={flavor}"))
            .arg(format!("--layout-features={}", self.layout_features.to_arg()))
            .arg(format!("--unicodes={}", self.unicodes.to_arg()))
    }
}

/// File name for a subsetted font: `stem[-suffix].flavor`.
pub fn subset_file_name(stem: &str, suffix: Option<&str>, flavor: Flavor) -> String {
    match suffix.filter(|s| !s.is_empty()) {
        Some(suffix) => format!("{stem}-{suffix}.{flavor}"),
        None => format!("{stem}.{flavor}"),
    }
}
