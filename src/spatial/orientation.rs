//! Flip and rotation transforms forming the dihedral group of the square
//!
//! Every orientation is stored as "reflect about the horizontal axis (optional),
//! then rotate clockwise by a number of quarter turns". The same transforms are
//! applied to single tiles and to the whole composite image.

use std::fmt;

use ndarray::{Array2, Axis};

/// Mirror axis for [`Orientation::from_flip`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flip {
    /// Leave the grid unchanged
    None,
    /// Mirror about the horizontal axis (row order reversed)
    Horizontal,
    /// Mirror about the vertical axis (each row reversed)
    Vertical,
}

/// Clockwise rotation for [`Orientation::from_rotation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation
    Deg0,
    /// Quarter turn clockwise
    Deg90,
    /// Half turn
    Deg180,
    /// Three quarter turns clockwise
    Deg270,
}

impl Rotation {
    /// Number of clockwise quarter turns
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }
}

/// One element of the dihedral group of the square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation {
    reflected: bool,
    quarter_turns: u8,
}

impl Orientation {
    /// The identity transform
    pub const IDENTITY: Self = Self {
        reflected: false,
        quarter_turns: 0,
    };

    /// All eight orientations: four rotations, then the same four after a horizontal flip
    pub const ALL: [Self; 8] = [
        Self::new(false, 0),
        Self::new(false, 1),
        Self::new(false, 2),
        Self::new(false, 3),
        Self::new(true, 0),
        Self::new(true, 1),
        Self::new(true, 2),
        Self::new(true, 3),
    ];

    /// Build an orientation from a reflection flag and clockwise quarter turns
    pub const fn new(reflected: bool, quarter_turns: u8) -> Self {
        Self {
            reflected,
            quarter_turns: quarter_turns % 4,
        }
    }

    /// Orientation performing a single flip
    pub const fn from_flip(flip: Flip) -> Self {
        match flip {
            Flip::None => Self::IDENTITY,
            Flip::Horizontal => Self::new(true, 0),
            // Mirroring columns equals mirroring rows followed by a half turn
            Flip::Vertical => Self::new(true, 2),
        }
    }

    /// Orientation performing a single rotation
    pub const fn from_rotation(rotation: Rotation) -> Self {
        Self::new(false, rotation.quarter_turns())
    }

    /// Look up an orientation by its position in [`Orientation::ALL`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this orientation in [`Orientation::ALL`]
    pub const fn index(self) -> usize {
        self.reflected as usize * 4 + self.quarter_turns as usize
    }

    /// Whether a horizontal flip is applied before rotating
    pub const fn is_reflected(self) -> bool {
        self.reflected
    }

    /// Clockwise quarter turns applied after the optional flip
    pub const fn quarter_turns(self) -> u8 {
        self.quarter_turns
    }

    /// The orientation equivalent to applying `self` and then `next`
    #[must_use]
    pub const fn then(self, next: Self) -> Self {
        // A flip conjugates rotation into its inverse: F R^k = R^-k F
        let carried = if next.reflected {
            (4 - self.quarter_turns) % 4
        } else {
            self.quarter_turns
        };
        Self::new(
            self.reflected ^ next.reflected,
            next.quarter_turns + carried,
        )
    }

    /// The orientation undoing `self`
    #[must_use]
    pub const fn inverse(self) -> Self {
        if self.reflected {
            self
        } else {
            Self::new(false, 4 - self.quarter_turns)
        }
    }

    /// Apply this orientation to a grid, producing a new grid
    pub fn apply<T: Clone>(self, grid: &Array2<T>) -> Array2<T> {
        let mut view = grid.view();
        if self.reflected {
            view.invert_axis(Axis(0));
        }
        for _ in 0..self.quarter_turns {
            // Clockwise: new[i][j] = old[rows - 1 - j][i]
            view = view.reversed_axes();
            view.invert_axis(Axis(1));
        }
        view.as_standard_layout().into_owned()
    }
}

impl From<Flip> for Orientation {
    fn from(flip: Flip) -> Self {
        Self::from_flip(flip)
    }
}

impl From<Rotation> for Orientation {
    fn from(rotation: Rotation) -> Self {
        Self::from_rotation(rotation)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degrees = u16::from(self.quarter_turns) * 90;
        if self.reflected {
            write!(f, "flip+rot{degrees}")
        } else {
            write!(f, "rot{degrees}")
        }
    }
}

/// Mirror a grid about the given axis
pub fn flip<T: Clone>(grid: &Array2<T>, flip: Flip) -> Array2<T> {
    Orientation::from_flip(flip).apply(grid)
}

/// Rotate a grid clockwise
pub fn rotate<T: Clone>(grid: &Array2<T>, rotation: Rotation) -> Array2<T> {
    Orientation::from_rotation(rotation).apply(grid)
}
