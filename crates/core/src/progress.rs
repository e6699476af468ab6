//! Progress bars for the three tool stages.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// A stage whose settled units are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Instancing,
    Compression,
    Subsetting,
}

impl Stage {
    fn template(self) -> &'static str {
        match self {
            Stage::Instancing => "varLib.instancer: {bar:40} {pos}/{len} files done.",
            Stage::Compression => "ttLib.woff2: {bar:40} {pos}/{len} files compressed.",
            Stage::Subsetting => "pyftsubset: {bar:40} {pos}/{len} files done.",
        }
    }
}

/// Where a stage's bar stood once all of its units settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCount {
    pub stage: Stage,
    pub position: u64,
    pub length: u64,
}

impl StageCount {
    /// Read `bar`, then finish it.
    ///
    /// Finishing moves the position to the length, so the reading comes first.
    pub fn settle(stage: Stage, bar: &ProgressBar) -> Self {
        let count = Self {
            stage,
            position: bar.position(),
            length: bar.length().unwrap_or_default(),
        };
        bar.finish();
        count
    }

    pub fn is_complete(&self) -> bool {
        self.position == self.length
    }
}

/// Shared renderer for every bar of a run.
///
/// Cloning is cheap; clones draw to the same place.
#[derive(Debug, Clone)]
pub struct Progress {
    multi: MultiProgress,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Draws to stderr when it is a terminal.
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
        }
    }

    /// Never draws. Bars still count.
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    pub fn add(&self, stage: Stage, total: usize) -> ProgressBar {
        let style = ProgressStyle::with_template(stage.template())
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        self.multi
            .add(ProgressBar::new(total as u64).with_style(style))
    }

    /// Run `f` with the bars cleared, so printed lines do not tear them.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.multi.suspend(f)
    }
}
