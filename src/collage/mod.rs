//! Collage orchestration.
//!
//! Drives the pipeline per page (partition, size, plan, render, encode)
//! sequentially and in input order, and assembles the ordered result list
//! plus summary counts.
//!
//! # Example
//!
//! ```ignore
//! use chigirie::collage::{CollageEngine, CollageRequest};
//! use chigirie::config::CollageConfig;
//! use chigirie::fetcher::HttpImageFetcher;
//!
//! let engine = CollageEngine::new(CollageConfig::default());
//! let fetcher = HttpImageFetcher::with_defaults()?;
//! let response = engine.create(&fetcher, &request).await?;
//! ```

pub mod filename;

use base64::Engine as _;
use image::RgbaImage;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

use crate::compositor;
use crate::config::CollageConfig;
use crate::constants::MIN_REQUIRED_IMAGES;
use crate::encoder::{EncoderFactory, EncoderQuality};
use crate::error::CollageError;
use crate::fetcher::{load_usable, ImageProvider};
use crate::layout::grid::{cell_dimensions, plan_page, rows_for_grid};
use crate::layout::partition::{partition, Arrangement};
use crate::layout::sizing::size_images;

/// A collage request: ordered image locators plus free-form metadata used
/// only for naming output files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollageRequest {
    pub photos: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// One finished collage page.
#[derive(Debug, Serialize)]
pub struct PageResult {
    /// Encoded image buffer (base64 in JSON)
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub image_count: usize,
    pub byte_size: usize,
    pub grid_layout: String,
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(data))
}

/// Aggregate outcome of one collage request.
#[derive(Debug, Serialize)]
pub struct CollageResponse {
    pub pages: Vec<PageResult>,
    pub pages_produced: usize,
    pub images_placed: usize,
    pub total_photos: usize,
}

/// Drives the collage pipeline for one request.
#[derive(Debug, Clone, Default)]
pub struct CollageEngine {
    config: CollageConfig,
}

impl CollageEngine {
    pub fn new(config: CollageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollageConfig {
        &self.config
    }

    /// Compose collage pages from already-loaded images.
    ///
    /// This is the pure half of the engine: no I/O, deterministic for a
    /// given image list and configuration. Pages are produced
    /// sequentially in input order. Any page's encode failure aborts the
    /// whole request; no partial page list is ever returned.
    pub fn compose(
        &self,
        images: Vec<RgbaImage>,
        metadata: &HashMap<String, String>,
    ) -> Result<Vec<PageResult>, CollageError> {
        if images.len() < MIN_REQUIRED_IMAGES {
            return Err(CollageError::insufficient_input(
                images.len(),
                MIN_REQUIRED_IMAGES,
            ));
        }

        let pages = partition(images, &self.config.layout);
        let page_count = pages.len();
        let encoder = EncoderFactory::create(self.config.format);
        let quality = EncoderQuality::with_quality(self.config.quality);

        let mut results = Vec::with_capacity(page_count);
        for (page_index, page) in pages.into_iter().enumerate() {
            let image_count = page.images.len();
            let rows = match &page.arrangement {
                Arrangement::Grid => rows_for_grid(image_count),
                Arrangement::Rows(widths) => widths.clone(),
            };
            let label = match &page.arrangement {
                Arrangement::Grid => {
                    let cols = rows.iter().max().copied().unwrap_or(0);
                    format!("{}x{}", cols, rows.len())
                }
                Arrangement::Rows(_) => format!("asymmetric_{}_rows", rows.len()),
            };

            let sized = size_images(page.images, &self.config.sizing);
            let dims: Vec<(u32, u32)> = sized
                .iter()
                .map(|s| (s.render_width, s.render_height))
                .collect();
            let (cell_width, cell_height) = cell_dimensions(&self.config.sizing, &dims);
            let (spec, placements) = plan_page(
                &dims,
                &rows,
                cell_width,
                cell_height,
                self.config.gap,
                self.config.border_width,
            );

            let canvas = compositor::render_page(&spec, sized, &placements)?;
            let encoded = encoder.encode(
                canvas.as_raw(),
                spec.canvas_width,
                spec.canvas_height,
                quality,
            )?;

            tracing::info!(
                page = page_index + 1,
                pages = page_count,
                width = spec.canvas_width,
                height = spec.canvas_height,
                images = image_count,
                bytes = encoded.data.len(),
                grid = %label,
                "Composed collage page"
            );

            let filename = filename::build_filename(
                metadata,
                page_index,
                page_count,
                encoded.format.extension(),
            );
            results.push(PageResult {
                byte_size: encoded.data.len(),
                data: encoded.data,
                filename,
                width: spec.canvas_width,
                height: spec.canvas_height,
                image_count,
                grid_layout: label,
            });
        }

        Ok(results)
    }

    /// Load every requested image through `provider`, then compose.
    ///
    /// Per-image failures are logged and skipped; the request aborts only
    /// when fewer than [`MIN_REQUIRED_IMAGES`] locators were given or
    /// fewer than that many images survive loading.
    pub async fn create(
        &self,
        provider: &dyn ImageProvider,
        request: &CollageRequest,
    ) -> Result<CollageResponse, CollageError> {
        if request.photos.len() < MIN_REQUIRED_IMAGES {
            return Err(CollageError::insufficient_input(
                request.photos.len(),
                MIN_REQUIRED_IMAGES,
            ));
        }

        let images = load_usable(provider, &request.photos).await;
        tracing::info!(
            requested = request.photos.len(),
            loaded = images.len(),
            "Loaded request images"
        );

        let pages = self.compose(images, &request.metadata)?;
        let images_placed = pages.iter().map(|p| p.image_count).sum();

        Ok(CollageResponse {
            pages_produced: pages.len(),
            images_placed,
            total_photos: request.photos.len(),
            pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutStrategy, SizingPolicy};
    use image::Rgba;

    fn solid(width: u32, height: u32, shade: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([shade, shade, shade, 255]))
    }

    fn small_engine(layout: LayoutStrategy) -> CollageEngine {
        let mut config = CollageConfig::default();
        config.layout = layout;
        config.sizing = SizingPolicy::SquareCrop { size: 40 };
        CollageEngine::new(config)
    }

    #[test]
    fn test_compose_rejects_insufficient_images() {
        let engine = CollageEngine::default();
        let result = engine.compose(vec![solid(10, 10, 0)], &HashMap::new());
        assert!(matches!(
            result,
            Err(CollageError::InsufficientInput {
                loaded: 1,
                required: 2
            })
        ));
    }

    #[test]
    fn test_compose_fixed_chunk_two_pages() {
        let engine = small_engine(LayoutStrategy::FixedChunk { chunk_size: 4 });
        let images = (0..5u8).map(|i| solid(60, 80, i * 10)).collect();
        let pages = engine.compose(images, &HashMap::new()).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].image_count, 4);
        assert_eq!(pages[1].image_count, 1);
        assert_eq!(pages[0].grid_layout, "2x2");
        assert_eq!(pages[1].grid_layout, "1x1");
        assert!(pages[0].filename.ends_with("_COLLAGE_p1.jpg"));
        assert!(pages[1].filename.ends_with("_COLLAGE_p2.jpg"));
    }

    #[test]
    fn test_compose_reports_actual_byte_size() {
        let engine = small_engine(LayoutStrategy::FixedChunk { chunk_size: 4 });
        let images = (0..2u8).map(|i| solid(50, 50, 100 + i)).collect();
        let pages = engine.compose(images, &HashMap::new()).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].byte_size, pages[0].data.len());
        // JPEG magic bytes
        assert_eq!(&pages[0].data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_compose_asymmetric_label_and_canvas() {
        let engine = small_engine(LayoutStrategy::AsymmetricRows);
        let images = (0..7u8).map(|i| solid(50, 50, i * 5)).collect();
        let pages = engine.compose(images, &HashMap::new()).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].grid_layout, "asymmetric_2_rows");
        // rows [4, 3] with 40px cells and 15px gaps
        assert_eq!(pages[0].width, 4 * 40 + 3 * 15 + 2 * 15);
        assert_eq!(pages[0].height, 2 * 40 + 15 + 2 * 15);
    }

    #[test]
    fn test_page_result_serializes_data_as_base64() {
        let page = PageResult {
            data: vec![1, 2, 3],
            filename: "x.jpg".to_string(),
            width: 1,
            height: 1,
            image_count: 1,
            byte_size: 3,
            grid_layout: "1x1".to_string(),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["data"], "AQID");
        assert_eq!(json["byte_size"], 3);
    }

    #[test]
    fn test_request_deserializes_without_metadata() {
        let request: CollageRequest =
            serde_json::from_str(r#"{"photos": ["https://example.com/a.jpg"]}"#).unwrap();
        assert_eq!(request.photos.len(), 1);
        assert!(request.metadata.is_empty());
    }
}
