//! Procedural caves: a cellular-automaton occupancy grid, a marching-squares
//! floor mesh, boundary outlines and extruded walls.

pub mod cave_grid;
pub mod config;
pub mod error;
pub mod marching_squares;
pub mod mesh;
pub mod mesh_worker;
pub mod outline;
pub mod seed;
pub mod wall;

pub use cave_grid::{generate_grid, Cell, Grid};
pub use config::{CaveConfig, CaveGenerator, CaveOutput};
pub use error::{CaveError, CaveResult};
pub use mesh::{generate_mesh, CaveMesh};
pub use mesh_worker::{GenerationOutcome, GenerationRequest, GenerationWorker};
pub use outline::{trace_outlines, Outline};
pub use seed::CaveSeed;
pub use wall::{extrude_walls, WallMesh};
