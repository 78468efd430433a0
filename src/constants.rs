// Constants module - centralized default values for configuration
//
// This module defines all default values used throughout the codebase.
// Using constants instead of magic numbers improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Canvas defaults
// =============================================================================

/// Default pixel spacing between cells and around the canvas edge
pub const DEFAULT_GAP: u32 = 15;

/// Default border stroke width around each placed image
pub const DEFAULT_BORDER_WIDTH: u32 = 3;

/// Canvas background color (white, opaque)
pub const BACKGROUND_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Border stroke color (light gray, opaque)
pub const BORDER_COLOR: [u8; 4] = [220, 220, 220, 255];

// =============================================================================
// Sizing defaults
// =============================================================================

/// Default side length for the uniform-square crop policy
pub const DEFAULT_SQUARE_SIZE: u32 = 500;

/// Default fixed photo width for the full-bleed policy
pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

/// Default fixed photo height for the full-bleed policy
pub const DEFAULT_PHOTO_HEIGHT: u32 = 400;

/// Default target for the longer edge under the aspect-preserving policy
pub const DEFAULT_FIT_TARGET: u32 = 500;

/// Default lower bound for aspect-preserving output dimensions
pub const DEFAULT_MIN_DIMENSION: u32 = 200;

/// Default upper bound for aspect-preserving output dimensions
pub const DEFAULT_MAX_DIMENSION: u32 = 800;

/// Cells under the aspect-preserving policy are padded to 110% of the
/// mean image footprint, but never below the largest image
pub const CELL_PADDING_FACTOR: f64 = 1.1;

// =============================================================================
// Layout defaults
// =============================================================================

/// Default number of images per page in fixed-chunk mode
pub const DEFAULT_CHUNK_SIZE: usize = 4;

/// Minimum number of successfully loaded images required to proceed
pub const MIN_REQUIRED_IMAGES: usize = 2;

// =============================================================================
// Encoding defaults
// =============================================================================

/// Default JPEG quality for encoded collage pages
pub const DEFAULT_QUALITY: u8 = 92;

// =============================================================================
// Fetch defaults
// =============================================================================

/// Default per-image download timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with image downloads
pub const FETCH_USER_AGENT: &str = "Mozilla/5.0 (chigirie-collage-service)";

/// Accept header sent with image downloads
pub const FETCH_ACCEPT: &str = "image/jpeg,image/png,image/*,*/*";
