//! # Font Instancer
//!
//! Axis limitations and `fonttools varLib.instancer` calls.
//!
//! ## Example
//!
//! ```
//! use font_instancer::{AxisLimit, Instancer};
//!
//! let axes = [AxisLimit::parse("wght", "400:700").unwrap()];
//! let invocation = Instancer::new("fonttools")
//!     .with_axes(&axes)
//!     .invocation("Foo.ttf", "out/Foo.ttf");
//! assert_eq!(
//!     invocation.to_string(),
//!     "fonttools varLib.instancer --quiet --output=out/Foo.ttf Foo.ttf wght=400:700"
//! );
//! ```

mod axis;
mod error;
mod extract;

pub use axis::{AxisLimit, AxisTag, Coordinate, Limitation};
pub use error::AxisError;
pub use extract::{extract_axis_loc, to_axis_limit};

use font_process::Invocation;

/// Default program that hosts the `varLib.instancer` subcommand.
pub const FONTTOOLS: &str = "fonttools";

/// Builder for a `varLib.instancer` call.
#[derive(Debug, Clone)]
pub struct Instancer {
    program: String,
    quiet: bool,
    axes: Vec<AxisLimit>,
}

impl Default for Instancer {
    fn default() -> Self {
        Self::new(FONTTOOLS)
    }
}

impl Instancer {
    /// A quiet instancer with no axes.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            quiet: true,
            axes: Vec::new(),
        }
    }

    pub fn with_axes(mut self, axes: &[AxisLimit]) -> Self {
        self.axes.extend_from_slice(axes);
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn axes(&self) -> &[AxisLimit] {
        &self.axes
    }

    /// The `tag=value` arguments, one per axis.
    pub fn axis_args(&self) -> Vec<String> {
        self.axes.iter().map(ToString::to_string).collect()
    }

    pub fn invocation(&self, input: &str, output: &str) -> Invocation {
        let mut invocation = Invocation::new(&self.program).arg("varLib.instancer");
        if self.quiet {
            invocation = invocation.arg("--quiet");
        }
        invocation
            .arg(format!("--output={output}"))
            .arg(input)
            .args(self.axis_args())
    }
}

/// File name for an instanced font.
///
/// With `append_axes`, the limited axis tags are listed in brackets:
/// `Foo[wght,opsz].ttf`. Otherwise the name is just `Foo.ttf`.
pub fn instanced_file_name(stem: &str, axes: &[AxisLimit], append_axes: bool) -> String {
    if !append_axes || axes.is_empty() {
        return format!("{stem}.ttf");
    }

    let tags: Vec<&str> = axes.iter().map(|axis| axis.tag.as_str()).collect();
    format!("{stem}[{}].ttf", tags.join(","))
}
