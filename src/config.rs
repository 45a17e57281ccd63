//! Generation parameters and the one-call grid + mesh entry point.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cave_grid::{
    check_fill_percent, generate_grid, Grid, DEFAULT_SMOOTHING_ITERATIONS, MIN_GRID_SIDE,
};
use crate::error::{CaveError, CaveResult};
use crate::marching_squares::check_cell_size;
use crate::mesh::{generate_mesh, CaveMesh};
use crate::seed::CaveSeed;
use crate::wall::check_wall_height;

/// Every knob of a cave generation, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub width: usize,
    pub height: usize,
    /// Text seed, hashed to 64 bits. Ignored when `use_random_seed` is set.
    pub seed: String,
    pub use_random_seed: bool,
    pub fill_percent: u32,
    pub smoothing_iterations: u32,
    pub cell_size: f32,
    pub wall_height: f32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            seed: "cave".to_string(),
            use_random_seed: false,
            fill_percent: 47,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            cell_size: 1.0,
            wall_height: 5.0,
        }
    }
}

impl CaveConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> CaveResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> CaveResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Checks every parameter without generating anything.
    pub fn validate(&self) -> CaveResult<()> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(CaveError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        check_fill_percent(self.fill_percent)?;
        check_cell_size(self.cell_size)?;
        check_wall_height(self.wall_height)
    }

    /// Seed this config generates with. Random seeds differ per call.
    pub fn resolve_seed(&self) -> CaveSeed {
        if self.use_random_seed {
            CaveSeed::random()
        } else {
            CaveSeed::from_text(&self.seed)
        }
    }
}

/// Grid plus its mesh, produced together.
#[derive(Debug, Clone, PartialEq)]
pub struct CaveOutput {
    pub seed: CaveSeed,
    pub grid: Grid,
    pub mesh: CaveMesh,
}

/// Runs the full grid → mesh → outlines → walls pipeline for one config.
#[derive(Debug, Clone, Default)]
pub struct CaveGenerator {
    config: CaveConfig,
}

impl CaveGenerator {
    pub fn from_config(config: CaveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    pub fn generate(&self) -> CaveResult<CaveOutput> {
        self.generate_with_seed(self.config.resolve_seed())
    }

    /// Generates with an explicit seed, ignoring the configured one.
    pub fn generate_with_seed(&self, seed: CaveSeed) -> CaveResult<CaveOutput> {
        let config = &self.config;
        config.validate()?;

        let grid = generate_grid(
            config.width,
            config.height,
            seed,
            config.fill_percent,
            config.smoothing_iterations,
        )?;
        let mesh = generate_mesh(&grid, config.cell_size, config.wall_height)?;

        info!(
            seed = seed.value(),
            width = config.width,
            height = config.height,
            floor_triangles = mesh.floor_triangles.len(),
            outlines = mesh.outlines.len(),
            "Generated cave"
        );
        Ok(CaveOutput { seed, grid, mesh })
    }
}
