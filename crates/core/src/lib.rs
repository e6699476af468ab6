//! Fontbatch Core - settings resolution and orchestration of the font tools.

pub mod config;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod settings;

pub use error::{Error, ErrorKind, Result};
pub use pipeline::{Orchestrator, RunSummary, ToolPrograms, run};
pub use progress::{Progress, Stage, StageCount};
pub use report::{Diagnostic, Reporter};
pub use settings::{
    PartialSettings, Settings, SettingsRequest, axis_loc_from_pairs, require_files, resolve,
    resolve_in,
};
pub use font_instancer::{AxisLimit, Coordinate, Limitation};
pub use font_process::{Invocation, SystemRunner, ToolOutput, ToolRunner};
pub use font_subsetter::{Flavor, Selection};
