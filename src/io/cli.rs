//! Command-line interface for solving and generating tile puzzles

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::algorithm::executor::{corner_product_only, solve};
use crate::io::configuration::{
    DEFAULT_DENSITY, DEFAULT_GRID_SIDE, DEFAULT_MONSTERS, DEFAULT_SEED, DEFAULT_TILE_SIDE,
    INPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{PuzzleError, Result, WithContext};
use crate::io::image::export_scan_as_png;
use crate::io::input::load_tile_set;
use crate::io::progress::ProgressManager;
use crate::spatial::synthesis::{PuzzleSpec, generate};

#[derive(Parser, Debug)]
#[command(name = "jigtile")]
#[command(
    author,
    version,
    about = "Assemble jigsaw tiles into an image and measure its roughness"
)]
/// Command-line arguments for the puzzle tool
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and all logging below errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve a puzzle file or every puzzle in a directory
    Solve(SolveArgs),
    /// Write a randomly generated puzzle
    Generate(GenerateArgs),
}

/// Arguments of `jigtile solve`
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Puzzle text file or directory of puzzle files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Write the composite image as `<stem>_image.png` next to each puzzle
    #[arg(short, long)]
    pub export: bool,

    /// Only compute the corner product from border uniqueness
    #[arg(short, long, conflicts_with = "export")]
    pub corners_only: bool,
}

/// Arguments of `jigtile generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// File to write the puzzle to
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Tiles along each side of the grid
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIDE)]
    pub grid_side: usize,

    /// Pixels along each side of a tile
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIDE)]
    pub tile_side: usize,

    /// Sea monsters hidden in the image
    #[arg(short, long, default_value_t = DEFAULT_MONSTERS)]
    pub monsters: usize,

    /// Fraction of lit background pixels
    #[arg(short, long, default_value_t = DEFAULT_DENSITY)]
    pub density: f64,
}

impl GenerateArgs {
    /// Generator parameters described by these arguments
    pub const fn spec(&self) -> PuzzleSpec {
        PuzzleSpec {
            grid_side: self.grid_side,
            tile_side: self.tile_side,
            monsters: self.monsters,
            density: self.density,
        }
    }
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Execute the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns the first error raised while reading, solving or writing
    pub fn run(self) -> Result<()> {
        let show_progress = self.should_show_progress();
        match self.command {
            Command::Solve(args) => FileProcessor::new(args, show_progress).process(),
            Command::Generate(args) => run_generate(&args),
        }
    }
}

/// Outcome of solving one puzzle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleReport {
    /// Puzzle file
    pub path: PathBuf,
    /// Product of the corner tile ids
    pub corner_id_product: u64,
    /// Highest roughness, absent with `--corners-only`
    pub max_roughness: Option<usize>,
    /// Whether a sea monster was found, absent with `--corners-only`
    pub pattern_found: Option<bool>,
    /// Wall time spent on the puzzle
    pub elapsed: Duration,
}

impl PuzzleReport {
    /// Print the report to standard output
    // Results are the tool's output, not diagnostics
    #[allow(clippy::print_stdout)]
    pub fn print(&self) {
        println!("{}", self.path.display());
        println!("  corner id product: {}", self.corner_id_product);
        if let Some(roughness) = self.max_roughness {
            println!("  max roughness:     {roughness}");
        }
        if self.pattern_found == Some(false) {
            println!("  (no sea monster in any orientation)");
        }
    }
}

/// Solves every puzzle under a target path with progress tracking
pub struct FileProcessor {
    args: SolveArgs,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a processor for the given solve arguments
    pub fn new(args: SolveArgs, show_progress: bool) -> Self {
        let progress_manager = show_progress.then(ProgressManager::new);
        Self {
            args,
            progress_manager,
        }
    }

    /// Solve every collected puzzle and print its report
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid or any puzzle fails
    pub fn process(&mut self) -> Result<()> {
        self.process_with(PuzzleReport::print)
    }

    /// Solve every collected puzzle, handing each report to `emit` as soon
    /// as its puzzle is done
    ///
    /// Reports of puzzles solved before a failure have already been emitted
    /// when the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid or any puzzle fails
    pub fn process_with<F: FnMut(&PuzzleReport)>(&mut self, mut emit: F) -> Result<()> {
        let files = self.collect_files()?;
        if files.is_empty() {
            warn!(path = %self.args.target.display(), "no puzzle files found");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            let report = self.process_file(file, index)?;
            match self.progress_manager {
                Some(ref pm) => pm.suspend(|| emit(&report)),
                None => emit(&report),
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        Ok(())
    }

    /// Progress display, absent when running quietly
    pub const fn progress(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    /// Puzzle files named by the target, sorted when it is a directory
    ///
    /// # Errors
    ///
    /// Returns an error if the target does not exist or cannot be listed
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.args.target;
        if target.is_file() {
            return Ok(vec![target.clone()]);
        }
        if !target.is_dir() {
            return Err(PuzzleError::FileSystem {
                path: target.clone(),
                operation: "locate target",
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "target must be a puzzle file or directory",
                ),
            });
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(target).with_path(target, "list directory")? {
            let path = entry.with_path(target, "list directory")?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(INPUT_EXTENSION)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<PuzzleReport> {
        let start_time = Instant::now();
        let tiles = load_tile_set(input_path)?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_puzzle(index, input_path, tiles.len());
        }

        if self.args.corners_only {
            let corner_id_product = corner_product_only(&tiles)?;
            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_puzzle(index);
            }
            return Ok(PuzzleReport {
                path: input_path.to_path_buf(),
                corner_id_product,
                max_roughness: None,
                pattern_found: None,
                elapsed: start_time.elapsed(),
            });
        }

        let solution = match self.progress_manager {
            Some(ref mut pm) => solve(&tiles, &mut pm.observer(index))?,
            None => solve(&tiles, &mut ())?,
        };

        let pattern_found = solution.survey().pattern_found();
        if !pattern_found {
            warn!(
                puzzle = %input_path.display(),
                "no sea monster found in any orientation, reporting roughness 0"
            );
        }

        if self.args.export {
            let output_path = Self::get_output_path(input_path);
            export_scan_as_png(
                solution.composite(),
                solution.survey().best(),
                &output_path,
            )?;
            info!(path = %output_path.display(), "image exported");
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_puzzle(index);
        }

        Ok(PuzzleReport {
            path: input_path.to_path_buf(),
            corner_id_product: solution.corner_id_product(),
            max_roughness: Some(solution.max_roughness()),
            pattern_found: Some(pattern_found),
            elapsed: start_time.elapsed(),
        })
    }

    /// Path of the exported PNG for a puzzle file
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let puzzle = generate(&args.spec(), args.seed)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }
    fs::write(&args.output, puzzle.to_text()).with_path(&args.output, "write puzzle")?;

    info!(
        path = %args.output.display(),
        tiles = puzzle.tiles().len(),
        monsters = puzzle.monsters().len(),
        "puzzle written"
    );
    Ok(())
}
