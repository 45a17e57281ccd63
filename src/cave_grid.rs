//! Binary occupancy grid and its cellular-automaton generator.
//!
//! Cells are stored row-major (`x + y * width`). The border ring is always
//! Wall: the generator forces it, and smoothing keeps it because cells
//! outside the grid count as Wall.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{CaveError, CaveResult};
use crate::seed::CaveSeed;

/// Smallest legal grid side: a border ring needs at least two cells.
pub const MIN_GRID_SIDE: usize = 2;
/// Number of smoothing passes applied when the caller has no preference.
pub const DEFAULT_SMOOTHING_ITERATIONS: u32 = 5;
/// Neighbour count above which a cell becomes Wall, below which it becomes Floor.
const SMOOTHING_THRESHOLD: u8 = 4;

/// 8-connected neighbour offsets.
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Floor,
}

impl Cell {
    #[inline]
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Grid with a Wall border and every interior cell set to `interior`.
    pub fn walled(width: usize, height: usize, interior: Cell) -> CaveResult<Self> {
        check_dimensions(width, height)?;
        let mut cells = vec![interior; width * height];
        for y in 0..height {
            for x in 0..width {
                if is_border(x, y, width, height) {
                    cells[x + y * width] = Cell::Wall;
                }
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parses rows of `#` (Wall) and `.` (Floor). Row `i` becomes `y = i`.
    ///
    /// Every row must have the same length and the border must be Wall.
    pub fn from_ascii(rows: &[&str]) -> CaveResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(CaveError::invalid_parameter(
                    "rows",
                    format!("row {y} has {} cells, expected {width}", row.chars().count()),
                ));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Floor,
                    other => {
                        return Err(CaveError::invalid_parameter(
                            "rows",
                            format!("unexpected character {other:?} at ({x}, {y})"),
                        ))
                    }
                };
                if cell == Cell::Floor && is_border(x, y, width, height) {
                    return Err(CaveError::invalid_parameter(
                        "rows",
                        format!("border cell ({x}, {y}) must be Wall"),
                    ));
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Cell at `(x, y)`. Panics when out of bounds, like slice indexing;
    /// use [`Grid::try_get`] for untrusted positions.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Cell at `(x, y)`, or `InvalidParameter` when out of bounds.
    pub fn try_get(&self, x: usize, y: usize) -> CaveResult<Cell> {
        self.check_position(x, y)?;
        Ok(self.get(x, y))
    }

    fn check_position(&self, x: usize, y: usize) -> CaveResult<()> {
        if x >= self.width || y >= self.height {
            return Err(CaveError::invalid_parameter(
                "position",
                format!("({x}, {y}) is outside {}x{}", self.width, self.height),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_wall()
    }

    #[inline]
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        is_border(x, y, self.width, self.height)
    }

    /// Sets an interior cell. Border cells stay Wall; writing one is an error.
    pub fn set_interior(&mut self, x: usize, y: usize, cell: Cell) -> CaveResult<()> {
        self.check_position(x, y)?;
        if self.is_border(x, y) {
            return Err(CaveError::invalid_parameter(
                "position",
                format!("({x}, {y}) is a border cell"),
            ));
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    /// Number of Wall cells among the 8 neighbours; out-of-bounds counts as Wall.
    pub fn surrounding_wall_count(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for (dx, dy) in NEIGHBORS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            let inside =
                nx >= 0 && ny >= 0 && (nx as usize) < self.width && (ny as usize) < self.height;
            if !inside || self.is_wall(nx as usize, ny as usize) {
                count += 1;
            }
        }
        count
    }

    /// One smoothing pass read entirely from `self`, written into a new grid.
    #[must_use]
    pub fn smoothed(&self) -> Grid {
        let mut cells = self.cells.clone();
        cells
            .par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let walls = self.surrounding_wall_count(x, y);
                    if walls > SMOOTHING_THRESHOLD {
                        *cell = Cell::Wall;
                    } else if walls < SMOOTHING_THRESHOLD {
                        *cell = Cell::Floor;
                    }
                }
            });

        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

impl fmt::Display for Grid {
    /// Same `#`/`.` layout `from_ascii` reads, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = if self.is_wall(x, y) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[inline]
fn is_border(x: usize, y: usize, width: usize, height: usize) -> bool {
    x == 0 || y == 0 || x == width - 1 || y == height - 1
}

fn check_dimensions(width: usize, height: usize) -> CaveResult<()> {
    if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
        return Err(CaveError::InvalidDimension { width, height });
    }
    Ok(())
}

pub(crate) fn check_fill_percent(fill_percent: u32) -> CaveResult<()> {
    if fill_percent > 100 {
        return Err(CaveError::invalid_parameter(
            "fill_percent",
            format!("must be in 0..=100, got {fill_percent}"),
        ));
    }
    Ok(())
}

/// Random Wall/Floor fill: border forced Wall, interior Wall with
/// probability `fill_percent / 100`. Cells are drawn column by column.
fn random_fill(width: usize, height: usize, seed: CaveSeed, fill_percent: u32) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
    let mut cells = vec![Cell::Wall; width * height];

    for x in 0..width {
        for y in 0..height {
            if is_border(x, y, width, height) {
                continue;
            }
            if rng.gen_range(0..100) >= fill_percent {
                cells[x + y * width] = Cell::Floor;
            }
        }
    }

    Grid {
        width,
        height,
        cells,
    }
}

/// Generates a cave grid: seeded random fill followed by
/// `smoothing_iterations` snapshot smoothing passes.
pub fn generate_grid(
    width: usize,
    height: usize,
    seed: impl Into<CaveSeed>,
    fill_percent: u32,
    smoothing_iterations: u32,
) -> CaveResult<Grid> {
    check_dimensions(width, height)?;
    check_fill_percent(fill_percent)?;
    let seed = seed.into();

    let mut grid = random_fill(width, height, seed, fill_percent);
    debug!(
        width,
        height,
        seed = seed.value(),
        fill_percent,
        walls = grid.wall_count(),
        "Filled cave grid"
    );

    for _ in 0..smoothing_iterations {
        grid = grid.smoothed();
    }
    debug!(
        smoothing_iterations,
        walls = grid.wall_count(),
        "Smoothed cave grid"
    );

    Ok(grid)
}
