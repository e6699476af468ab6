//! WOFF2 compression through `fonttools ttLib.woff2 compress`.
//!
//! The tool writes its result next to the input, replacing the extension
//! with `.woff2`. [`compressed_path`] predicts that location.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//!
//! use font_woff2::{Woff2Compressor, compressed_path};
//!
//! let invocation = Woff2Compressor::default().invocation("out/Foo[wght].ttf");
//! assert_eq!(invocation.args, ["ttLib.woff2", "compress", "out/Foo[wght].ttf"]);
//! assert_eq!(
//!     compressed_path(Path::new("out/Foo[wght].ttf")),
//!     Path::new("out/Foo[wght].woff2")
//! );
//! ```

use std::path::{Path, PathBuf};

use font_process::Invocation;

/// Default program that hosts the `ttLib.woff2` subcommand.
pub const FONTTOOLS: &str = "fonttools";

/// Builder for a `ttLib.woff2 compress` call.
#[derive(Debug, Clone)]
pub struct Woff2Compressor {
    program: String,
}

impl Default for Woff2Compressor {
    fn default() -> Self {
        Self::new(FONTTOOLS)
    }
}

impl Woff2Compressor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn invocation(&self, input: &str) -> Invocation {
        Invocation::new(&self.program)
            .args(["ttLib.woff2", "compress"])
            .arg(input)
    }
}

/// Where `ttLib.woff2 compress` writes its output for `input`.
pub fn compressed_path(input: &Path) -> PathBuf {
    input.with_extension("woff2")
}
