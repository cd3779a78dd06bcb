//! Pattern matching over the eight orientations of a composite image
//!
//! A pattern is a sparse set of lit offsets inside a bounding box. Scanning
//! tests every anchor where the box fits and marks the pixels of each full
//! match. Overlapping matches mark shared pixels once.

use bitvec::prelude::*;
use tracing::{debug, instrument};

use crate::analysis::compositor::CompositeImage;
use crate::io::configuration::{OFF_PIXEL, ON_PIXEL};
use crate::io::error::{PuzzleError, Result};
use crate::spatial::orientation::Orientation;

/// Rows of the sea monster; spaces are don't-care cells
pub const SEA_MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

/// Lit offsets within a bounding box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    offsets: Vec<(usize, usize)>,
    height: usize,
    width: usize,
}

impl Pattern {
    /// Build a pattern from text rows
    ///
    /// `#` marks a required lit pixel; spaces and `.` are ignored. Rows may
    /// differ in length, the box is as wide as the longest row.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::MalformedImage`] if a row contains another
    /// character or the pattern has no lit pixel
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut offsets = Vec::new();
        let mut width = 0;

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            width = width.max(line.chars().count());
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    ON_PIXEL => offsets.push((row, col)),
                    ' ' | OFF_PIXEL => {}
                    _ => {
                        return Err(PuzzleError::MalformedImage {
                            reason: format!("pattern row {} contains '{ch}'", row + 1),
                        });
                    }
                }
            }
        }

        if offsets.is_empty() {
            return Err(PuzzleError::MalformedImage {
                reason: "pattern has no lit pixels".to_string(),
            });
        }

        Ok(Self {
            offsets,
            height: rows.len(),
            width,
        })
    }

    /// The sea monster pattern
    ///
    /// # Errors
    ///
    /// Never fails for the built-in rows; the signature matches [`Pattern::new`]
    pub fn sea_monster() -> Result<Self> {
        Self::new(&SEA_MONSTER)
    }

    /// Lit offsets relative to the top-left of the box
    pub fn offsets(&self) -> &[(usize, usize)] {
        &self.offsets
    }

    /// Number of lit offsets
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false for a constructed pattern
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Bounding box height
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Bounding box width
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether the pattern matches with its box anchored at (row, col)
    pub fn matches_at(&self, image: &CompositeImage, row: usize, col: usize) -> bool {
        self.offsets
            .iter()
            .all(|&(dr, dc)| image.get(row + dr, col + dc) == Some(true))
    }
}

/// Result of scanning one orientation of an image
#[derive(Debug, Clone)]
pub struct OrientationScan {
    orientation: Orientation,
    anchors: Vec<(usize, usize)>,
    on_pixels: usize,
    marks: BitVec,
    width: usize,
}

impl OrientationScan {
    /// Orientation of the image that was scanned
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Top-left corners of every match, in row-major scan order
    pub fn anchors(&self) -> &[(usize, usize)] {
        &self.anchors
    }

    /// Number of matches found
    pub fn matches(&self) -> usize {
        self.anchors.len()
    }

    /// Lit pixels in the image
    pub const fn on_pixels(&self) -> usize {
        self.on_pixels
    }

    /// Distinct pixels covered by at least one match
    pub fn marked_count(&self) -> usize {
        self.marks.count_ones()
    }

    /// Whether a pixel of the oriented image belongs to a match
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        col < self.width && self.marks.get(row * self.width + col).as_deref() == Some(&true)
    }

    /// Lit pixels not covered by any match, `None` when nothing matched
    pub fn roughness(&self) -> Option<usize> {
        (!self.anchors.is_empty()).then(|| self.on_pixels - self.marked_count())
    }

    /// Roughness with "no match" reported as zero
    pub fn legacy_roughness(&self) -> usize {
        self.roughness().unwrap_or(0)
    }
}

/// Scan one orientation of `image` for `pattern`
pub fn scan(image: &CompositeImage, pattern: &Pattern, orientation: Orientation) -> OrientationScan {
    let oriented = image.oriented(orientation);
    let (height, width) = (oriented.height(), oriented.width());
    let mut marks = bitvec![0; height * width];
    let mut anchors = Vec::new();

    if pattern.height() <= height && pattern.width() <= width {
        for row in 0..=height - pattern.height() {
            for col in 0..=width - pattern.width() {
                if !pattern.matches_at(&oriented, row, col) {
                    continue;
                }
                anchors.push((row, col));
                for &(dr, dc) in pattern.offsets() {
                    marks.set((row + dr) * width + col + dc, true);
                }
            }
        }
    }

    OrientationScan {
        orientation,
        anchors,
        on_pixels: oriented.on_count(),
        marks,
        width,
    }
}

/// Scans of all eight orientations of an image
#[derive(Debug, Clone)]
pub struct RoughnessSurvey {
    scans: Vec<OrientationScan>,
}

impl RoughnessSurvey {
    /// Every scan in [`Orientation::ALL`] order
    pub fn scans(&self) -> &[OrientationScan] {
        &self.scans
    }

    /// The matching orientation with the highest roughness
    ///
    /// Ties go to the earliest orientation. `None` when the pattern appears in
    /// no orientation.
    pub fn best(&self) -> Option<&OrientationScan> {
        self.scans
            .iter()
            .filter_map(|scan| scan.roughness().map(|roughness| (roughness, scan)))
            .reduce(|best, next| if next.0 > best.0 { next } else { best })
            .map(|(_, scan)| scan)
    }

    /// Whether any orientation contains the pattern
    pub fn pattern_found(&self) -> bool {
        self.best().is_some()
    }

    /// Highest roughness over all orientations, zero when nothing matched
    pub fn max_roughness(&self) -> usize {
        self.scans
            .iter()
            .map(OrientationScan::legacy_roughness)
            .max()
            .unwrap_or(0)
    }
}

/// Scan every orientation of `image`
#[instrument(skip_all, fields(height = image.height(), width = image.width()))]
pub fn survey(image: &CompositeImage, pattern: &Pattern) -> RoughnessSurvey {
    let scans: Vec<OrientationScan> = Orientation::ALL
        .iter()
        .map(|&orientation| scan(image, pattern, orientation))
        .collect();
    for scan in &scans {
        debug!(
            orientation = %scan.orientation(),
            matches = scan.matches(),
            roughness = scan.legacy_roughness(),
            "orientation scanned"
        );
    }
    RoughnessSurvey { scans }
}

/// Highest roughness of `image` over all orientations
pub fn max_roughness(image: &CompositeImage, pattern: &Pattern) -> usize {
    survey(image, pattern).max_roughness()
}
