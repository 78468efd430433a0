//! Grid planning.
//!
//! Given a page's planned render sizes and its row structure, computes the
//! grid geometry (columns, rows, cell size, canvas size) and the placement
//! of every image and its border rectangle within the canvas.

use crate::config::SizingPolicy;
use crate::constants::CELL_PADDING_FACTOR;

/// Grid geometry for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub gap: u32,
    pub border_width: u32,
}

impl GridSpec {
    /// Build a spec, deriving canvas dimensions from the grid geometry:
    /// `cols * cell + (cols - 1) * gap` for the cells and gutters, plus a
    /// gap on each outer edge.
    pub fn new(
        cols: u32,
        rows: u32,
        cell_width: u32,
        cell_height: u32,
        gap: u32,
        border_width: u32,
    ) -> Self {
        assert!(cols > 0 && rows > 0, "grid must have at least one cell");
        assert!(
            cell_width > 0 && cell_height > 0,
            "cells must have positive dimensions"
        );

        let canvas_width = cols * cell_width + (cols - 1) * gap + 2 * gap;
        let canvas_height = rows * cell_height + (rows - 1) * gap + 2 * gap;

        Self {
            cols,
            rows,
            cell_width,
            cell_height,
            canvas_width,
            canvas_height,
            gap,
            border_width,
        }
    }
}

/// Pixel rectangle. Signed coordinates: a border outset from an image at
/// the canvas edge may start before the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Where one image lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Image top-left offset
    pub x: u32,
    pub y: u32,
    /// Planned render dimensions
    pub width: u32,
    pub height: u32,
    /// Border rectangle: the image rectangle outset by border_width
    pub border: Rect,
}

impl Placement {
    pub fn image_rect(&self) -> Rect {
        Rect {
            x: self.x as i64,
            y: self.y as i64,
            width: self.width,
            height: self.height,
        }
    }
}

/// Row widths for a fixed-chunk page of `count` images.
///
/// Counts of 1 or 2 form a single horizontal strip; 3 and 4 fill a 2×2
/// grid; larger chunk sizes extend the same shape with
/// ceil(sqrt(count)) columns and a remainder row.
pub fn rows_for_grid(count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    if count <= 2 {
        return vec![count];
    }

    let cols = (count as f64).sqrt().ceil() as usize;
    let mut rows = vec![cols; count / cols];
    if count % cols != 0 {
        rows.push(count % cols);
    }
    rows
}

/// Cell dimensions for a page under the given sizing policy.
///
/// Fixed policies dictate the cell outright. Aspect-fit sizes cells to
/// 110% of the mean image footprint, but never below the largest image.
pub fn cell_dimensions(policy: &SizingPolicy, dims: &[(u32, u32)]) -> (u32, u32) {
    match policy {
        SizingPolicy::SquareCrop { size } => (*size, *size),
        SizingPolicy::FullBleed { width, height } => (*width, *height),
        SizingPolicy::AspectFit { .. } => (
            padded_extent(dims.iter().map(|d| d.0)),
            padded_extent(dims.iter().map(|d| d.1)),
        ),
    }
}

fn padded_extent(values: impl Iterator<Item = u32> + Clone) -> u32 {
    let max = values.clone().max().unwrap_or(0);
    let count = values.clone().count();
    if count == 0 {
        return 0;
    }
    let mean = values.map(f64::from).sum::<f64>() / count as f64;
    ((mean * CELL_PADDING_FACTOR).round() as u32).max(max)
}

/// Plan the grid and every placement for one page.
///
/// `dims` are the planned render sizes in page order; `rows` is the row
/// structure (widths must account for every image; a mismatch is a
/// programming error, not a recoverable condition). Images fill positions
/// row-major; shorter rows are horizontally centered; each image is
/// centered within its cell by integer division.
pub fn plan_page(
    dims: &[(u32, u32)],
    rows: &[usize],
    cell_width: u32,
    cell_height: u32,
    gap: u32,
    border_width: u32,
) -> (GridSpec, Vec<Placement>) {
    assert!(!rows.is_empty(), "page must have at least one row");
    assert_eq!(
        rows.iter().sum::<usize>(),
        dims.len(),
        "row widths must account for every image"
    );

    let max_cols = rows.iter().copied().max().unwrap_or(0) as u32;
    let spec = GridSpec::new(
        max_cols,
        rows.len() as u32,
        cell_width,
        cell_height,
        gap,
        border_width,
    );

    let mut placements = Vec::with_capacity(dims.len());
    let mut index = 0;
    for (row_idx, &row_cols) in rows.iter().enumerate() {
        // shorter rows shift right by half the unused cell span
        let row_offset = (max_cols - row_cols as u32) * (cell_width + gap) / 2;

        for col in 0..row_cols as u32 {
            let (img_w, img_h) = dims[index];
            assert!(
                img_w <= cell_width && img_h <= cell_height,
                "image {}x{} exceeds cell {}x{}",
                img_w,
                img_h,
                cell_width,
                cell_height
            );

            let x = gap + row_offset + col * (cell_width + gap) + (cell_width - img_w) / 2;
            let y = gap + row_idx as u32 * (cell_height + gap) + (cell_height - img_h) / 2;

            placements.push(Placement {
                x,
                y,
                width: img_w,
                height: img_h,
                border: Rect {
                    x: x as i64 - border_width as i64,
                    y: y as i64 - border_width as i64,
                    width: img_w + 2 * border_width,
                    height: img_h + 2 * border_width,
                },
            });
            index += 1;
        }
    }

    (spec, placements)
}
