//! The layout engine: page partitioning, cell sizing, and grid planning.
//!
//! Everything in this module is deterministic and side-effect free; it
//! operates on image dimensions and counts, never on pixels or sockets.

pub mod grid;
pub mod partition;
pub mod sizing;

// Re-export main types for convenience
pub use grid::{cell_dimensions, plan_page, rows_for_grid, GridSpec, Placement, Rect};
pub use partition::{asymmetric_rows, fixed_chunks, partition, Arrangement, Page};
pub use sizing::{fit_dimensions, size_images, square_crop_plan, CropRect, SizedImage};
