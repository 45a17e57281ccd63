// Marching squares: square grid, case table, triangulation and mesh checks
mod cases;
mod square_grid;
mod triangulate;
mod types;
mod validator;
mod vertex;

pub use cases::*;
pub use square_grid::*;
pub use triangulate::*;
pub use types::*;
pub use validator::*;
pub use vertex::*;
