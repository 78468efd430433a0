//! Output filename construction.
//!
//! Filenames are assembled from free-form request metadata; the metadata
//! is never interpreted beyond the three naming fields, and every
//! character outside the safe alphabet is replaced before the name leaves
//! the library.

use std::collections::HashMap;

// Metadata keys consulted for naming, with their fallbacks.
const KEY_DATE: &str = "date";
const KEY_ACTIVITY: &str = "activity";
const KEY_LOCATION: &str = "location";

const FALLBACK_DATE: &str = "undated";
const FALLBACK_ACTIVITY: &str = "activity";
const FALLBACK_LOCATION: &str = "location";

/// Replace every character that is not alphanumeric, `.`, `_`, or `-`
/// with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the output filename for one page.
///
/// The page suffix (`_p2`, `_p3`, ...) appears only when the request
/// produced more than one page.
pub fn build_filename(
    metadata: &HashMap<String, String>,
    page_index: usize,
    page_count: usize,
    extension: &str,
) -> String {
    let field = |key: &str, fallback: &str| -> String {
        metadata
            .get(key)
            .map(String::as_str)
            .unwrap_or(fallback)
            .to_string()
    };

    let mut stem = format!(
        "{}_{}_{}_COLLAGE",
        field(KEY_DATE, FALLBACK_DATE),
        field(KEY_ACTIVITY, FALLBACK_ACTIVITY),
        field(KEY_LOCATION, FALLBACK_LOCATION)
    );
    if page_count > 1 {
        stem.push_str(&format!("_p{}", page_index + 1));
    }

    format!("{}.{}", sanitize(&stem), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize("2025-07-24_hike.v2"), "2025-07-24_hike.v2");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize("a b/c:d"), "a_b_c_d");
        assert_eq!(sanitize("photo (1)"), "photo__1_");
    }

    #[test]
    fn test_build_filename_single_page() {
        let meta = metadata(&[
            ("date", "2025-07-24"),
            ("activity", "hiking"),
            ("location", "north-ridge"),
        ]);
        assert_eq!(
            build_filename(&meta, 0, 1, "jpg"),
            "2025-07-24_hiking_north-ridge_COLLAGE.jpg"
        );
    }

    #[test]
    fn test_build_filename_multi_page_suffix() {
        let meta = metadata(&[("date", "2025-07-24")]);
        assert_eq!(
            build_filename(&meta, 0, 2, "jpg"),
            "2025-07-24_activity_location_COLLAGE_p1.jpg"
        );
        assert_eq!(
            build_filename(&meta, 1, 2, "jpg"),
            "2025-07-24_activity_location_COLLAGE_p2.jpg"
        );
    }

    #[test]
    fn test_build_filename_defaults() {
        let meta = HashMap::new();
        assert_eq!(
            build_filename(&meta, 0, 1, "png"),
            "undated_activity_location_COLLAGE.png"
        );
    }

    #[test]
    fn test_build_filename_sanitizes_metadata() {
        let meta = metadata(&[("activity", "beach day!"), ("location", "pier #7")]);
        assert_eq!(
            build_filename(&meta, 0, 1, "jpg"),
            "undated_beach_day__pier__7_COLLAGE.jpg"
        );
    }
}
