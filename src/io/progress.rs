//! Multi-puzzle progress tracking with automatic batching for large sets

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::algorithm::assembler::AssemblyObserver;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

/// Display state of one puzzle in the rolling window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PuzzleState {
    name: String,
    filled: usize,
    cells: usize,
}

/// Coordinates progress display for batch solving
///
/// Small batches get one bar per puzzle; larger batches add a batch bar and
/// keep only the most recent puzzles visible.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    puzzle_bars: Vec<ProgressBar>,
    puzzle_states: Vec<PuzzleState>,
    // Puzzle index shown by each bar, oldest first
    visible: Vec<usize>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{pos:>4}/{len:4} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            puzzle_bars: Vec::new(),
            puzzle_states: Vec::new(),
            visible: Vec::new(),
        }
    }

    /// Create bars for a batch of `puzzle_count` puzzles
    pub fn initialize(&mut self, puzzle_count: usize) {
        if puzzle_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(puzzle_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..puzzle_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(CELL_STYLE.clone());
            self.puzzle_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Start tracking a puzzle with `cells` grid cells to fill
    pub fn start_puzzle(&mut self, index: usize, path: &Path, cells: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.puzzle_states.len() {
            self.puzzle_states.resize(index + 1, PuzzleState::default());
        }
        if let Some(state) = self.puzzle_states.get_mut(index) {
            *state = PuzzleState {
                name,
                filled: 0,
                cells,
            };
        }
        self.update_bars();
    }

    /// Report how many cells of a puzzle are currently filled
    ///
    /// Called on every placement and retraction, so only the puzzle's own
    /// bar is touched.
    pub fn update_cells(&mut self, index: usize, filled: usize) {
        let Some(state) = self.puzzle_states.get_mut(index) else {
            return;
        };
        state.filled = filled;
        if let Some(bar) = self.bar_for(index) {
            bar.set_position(filled as u64);
        }
    }

    /// Filled and total cells of a started puzzle
    pub fn puzzle_status(&self, index: usize) -> Option<(usize, usize)> {
        self.puzzle_states
            .get(index)
            .filter(|state| !state.name.is_empty())
            .map(|state| (state.filled, state.cells))
    }

    /// Puzzle indices currently shown by the per-puzzle bars, oldest first
    pub fn visible_puzzles(&self) -> &[usize] {
        &self.visible
    }

    /// Run `f` with the bars hidden so its terminal output stays intact
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.multi_progress.suspend(f)
    }

    /// Mark a puzzle as finished and advance the batch bar
    pub fn complete_puzzle(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.puzzle_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.filled = state.cells;
        }
        self.update_bars();
    }

    /// Observer forwarding assembly progress of one puzzle to its bar
    pub const fn observer(&mut self, index: usize) -> PuzzleProgress<'_> {
        PuzzleProgress {
            manager: self,
            index,
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn bar_for(&self, index: usize) -> Option<&ProgressBar> {
        let slot = self.visible.iter().position(|&shown| shown == index)?;
        self.puzzle_bars.get(slot)
    }

    // Shows the most recent puzzles, oldest first
    fn update_bars(&mut self) {
        let active: Vec<usize> = self
            .puzzle_states
            .iter()
            .enumerate()
            .filter(|(_, state)| !state.name.is_empty())
            .map(|(index, _)| index)
            .collect();
        let start = active
            .len()
            .saturating_sub(self.puzzle_bars.len().min(MAX_INDIVIDUAL_PROGRESS_BARS));
        self.visible = active.get(start..).unwrap_or_default().to_vec();

        for (bar, state) in self
            .puzzle_bars
            .iter()
            .zip(self.visible.iter().filter_map(|&i| self.puzzle_states.get(i)))
        {
            bar.set_length(state.cells as u64);
            bar.set_position(state.filled as u64);
            bar.set_prefix(state.name.clone());
        }

        for bar in self.puzzle_bars.iter().skip(self.visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_prefix(String::new());
        }
    }
}

/// Assembly observer bound to one puzzle of a [`ProgressManager`]
pub struct PuzzleProgress<'a> {
    manager: &'a mut ProgressManager,
    index: usize,
}

impl AssemblyObserver for PuzzleProgress<'_> {
    fn placed(&mut self, filled: usize, _total: usize) {
        self.manager.update_cells(self.index, filled);
    }

    fn retracted(&mut self, filled: usize, _total: usize) {
        self.manager.update_cells(self.index, filled);
    }
}
