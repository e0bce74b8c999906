pub mod grid;
pub mod polygon;

pub use grid::{GridEntry, SpatialGrid, CELL_SIZE};
pub use polygon::PolygonMask;
