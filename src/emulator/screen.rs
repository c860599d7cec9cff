//! The 64x32 monochrome display surface.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

type Cells = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Cells = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// A grid of on/off cells, stored row-major.
///
/// It can only be cleared or have single cells toggled. Coordinates
/// are reduced modulo the grid size first, so a sprite hanging off an
/// edge wraps around cell by cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    cells: Cells,
}

impl Screen {
    pub fn new() -> Screen {
        Screen { cells: EMPTY_SCREEN }
    }

    pub fn clear(&mut self) {
        self.cells = EMPTY_SCREEN;
    }

    /// Flip the cell at `(x, y)`, returning whether it was on before,
    /// i.e. whether this toggle erased it.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let cell = &mut self.cells[y % SCREEN_HEIGHT][x % SCREEN_WIDTH];
        let was_on = *cell;
        *cell = !was_on;
        was_on
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y % SCREEN_HEIGHT][x % SCREEN_WIDTH]
    }

    pub fn row(&self, y: usize) -> &[bool; SCREEN_WIDTH] {
        &self.cells[y % SCREEN_HEIGHT]
    }

    /// Every cell as `(x, y, on)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, on)| (x, y, *on))
        })
    }

    pub fn lit(&self) -> usize {
        self.cells().filter(|(_, _, on)| *on).count()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for on in row.iter() {
                write!(f, "{}", if *on { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Screen {{ lit: {} }}", self.lit())
    }
}
