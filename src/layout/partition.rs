//! Page partitioning.
//!
//! Splits the ordered sequence of successfully loaded images into ordered
//! pages. Two strategies are supported:
//!
//! - **Fixed-chunk**: pages of exactly `chunk_size` images, remainder last.
//! - **Asymmetric rows**: one page holding every image, arranged into rows
//!   of varying width from a lookup table (small counts) or a greedy rule
//!   (large counts).

use crate::config::LayoutStrategy;

/// How a page's images are arranged into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrangement {
    /// Row widths are derived from the image count by the grid planner.
    Grid,
    /// Explicit row widths, one entry per row, summing to the image count.
    Rows(Vec<usize>),
}

/// One collage page: an ordered subset of the input images plus their
/// arrangement.
#[derive(Debug)]
pub struct Page<T> {
    pub images: Vec<T>,
    pub arrangement: Arrangement,
}

/// Row layouts for small image counts, chosen for visual balance. Widths
/// always sum to the count.
const ROW_LAYOUTS: &[(usize, &[usize])] = &[
    (2, &[2]),
    (3, &[3]),
    (4, &[2, 2]),
    (5, &[3, 2]),
    (6, &[3, 3]),
    (7, &[4, 3]),
    (8, &[4, 4]),
    (9, &[3, 3, 3]),
    (10, &[4, 3, 3]),
    (11, &[4, 4, 3]),
    (12, &[4, 4, 4]),
];

/// Page sizes for fixed-chunk mode: full chunks, remainder last.
pub fn fixed_chunks(count: usize, chunk_size: usize) -> Vec<usize> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    let mut sizes = Vec::with_capacity((count + chunk_size - 1) / chunk_size);
    let mut remaining = count;
    while remaining > 0 {
        let take = remaining.min(chunk_size);
        sizes.push(take);
        remaining -= take;
    }
    sizes
}

/// Row widths for a single asymmetric page holding `count` images.
pub fn asymmetric_rows(count: usize) -> Vec<usize> {
    if count > 12 {
        return greedy_rows(count);
    }
    match ROW_LAYOUTS.iter().find(|(n, _)| *n == count) {
        Some((_, rows)) => rows.to_vec(),
        None => fallback_rows(count),
    }
}

/// Greedy row builder for counts above the lookup table: while at least 4
/// images remain, take a row of 3 + (remaining mod 3) capped at 4; the
/// final short row takes whatever is left.
fn greedy_rows(count: usize) -> Vec<usize> {
    let mut rows = Vec::new();
    let mut remaining = count;
    while remaining > 0 {
        let width = if remaining >= 4 {
            (3 + remaining % 3).min(4)
        } else {
            remaining
        };
        rows.push(width);
        remaining -= width;
    }
    rows
}

/// Rows of 4 plus a remainder row, for counts the lookup table misses.
fn fallback_rows(count: usize) -> Vec<usize> {
    let mut rows = vec![4; count / 4];
    if count % 4 != 0 {
        rows.push(count % 4);
    }
    rows
}

/// Partition loaded images into ordered pages under the given strategy.
///
/// Order-preserving: images appear in their input order across pages and
/// within each page. An empty input yields no pages.
pub fn partition<T>(images: Vec<T>, strategy: &LayoutStrategy) -> Vec<Page<T>> {
    if images.is_empty() {
        return Vec::new();
    }

    match strategy {
        LayoutStrategy::FixedChunk { chunk_size } => {
            let sizes = fixed_chunks(images.len(), *chunk_size);
            let mut iter = images.into_iter();
            sizes
                .into_iter()
                .map(|n| Page {
                    images: iter.by_ref().take(n).collect(),
                    arrangement: Arrangement::Grid,
                })
                .collect()
        }
        LayoutStrategy::AsymmetricRows => {
            let rows = asymmetric_rows(images.len());
            vec![Page {
                images,
                arrangement: Arrangement::Rows(rows),
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Test: fixed-chunk page sizes, remainder last
    #[test]
    fn test_fixed_chunks_ten_images() {
        assert_eq!(fixed_chunks(10, 4), vec![4, 4, 2]);
    }

    #[rstest]
    #[case(1, vec![1])]
    #[case(4, vec![4])]
    #[case(8, vec![4, 4])]
    #[case(9, vec![4, 4, 1])]
    fn test_fixed_chunks_cases(#[case] count: usize, #[case] expected: Vec<usize>) {
        assert_eq!(fixed_chunks(count, 4), expected);
    }

    #[test]
    fn test_fixed_chunks_other_chunk_size() {
        assert_eq!(fixed_chunks(7, 3), vec![3, 3, 1]);
    }

    #[test]
    #[should_panic(expected = "chunk_size must be positive")]
    fn test_fixed_chunks_zero_chunk_panics() {
        fixed_chunks(5, 0);
    }

    // Test: asymmetric lookup table
    #[rstest]
    #[case(2, vec![2])]
    #[case(3, vec![3])]
    #[case(4, vec![2, 2])]
    #[case(5, vec![3, 2])]
    #[case(6, vec![3, 3])]
    #[case(7, vec![4, 3])]
    #[case(8, vec![4, 4])]
    #[case(9, vec![3, 3, 3])]
    #[case(10, vec![4, 3, 3])]
    #[case(11, vec![4, 4, 3])]
    #[case(12, vec![4, 4, 4])]
    fn test_asymmetric_table(#[case] count: usize, #[case] expected: Vec<usize>) {
        assert_eq!(asymmetric_rows(count), expected);
    }

    #[test]
    fn test_asymmetric_table_widths_sum_to_count() {
        for count in 2..=12 {
            let rows = asymmetric_rows(count);
            assert_eq!(rows.iter().sum::<usize>(), count, "count {}", count);
        }
    }

    // Test: greedy rule above the table
    #[test]
    fn test_asymmetric_greedy_thirteen() {
        // 3 + (13 % 3) = 4, then 9 -> 3, 6 -> 3, final 3
        assert_eq!(asymmetric_rows(13), vec![4, 3, 3, 3]);
    }

    #[rstest]
    #[case(14, vec![4, 4, 3, 3])]
    #[case(15, vec![3, 3, 3, 3, 3])]
    #[case(16, vec![4, 3, 3, 3, 3])]
    #[case(17, vec![4, 4, 3, 3, 3])]
    fn test_asymmetric_greedy_cases(#[case] count: usize, #[case] expected: Vec<usize>) {
        assert_eq!(asymmetric_rows(count), expected);
    }

    #[test]
    fn test_asymmetric_greedy_rows_never_exceed_four() {
        for count in 13..60 {
            let rows = asymmetric_rows(count);
            assert_eq!(rows.iter().sum::<usize>(), count);
            assert!(rows.iter().all(|&w| w >= 1 && w <= 4), "count {}", count);
        }
    }

    // Test: fallback for counts the table misses
    #[test]
    fn test_asymmetric_fallback_single_image() {
        assert_eq!(asymmetric_rows(1), vec![1]);
    }

    // Test: partition preserves order
    #[test]
    fn test_partition_fixed_chunk_order() {
        let items: Vec<u32> = (0..10).collect();
        let pages = partition(items, &LayoutStrategy::FixedChunk { chunk_size: 4 });

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].images, vec![0, 1, 2, 3]);
        assert_eq!(pages[1].images, vec![4, 5, 6, 7]);
        assert_eq!(pages[2].images, vec![8, 9]);
        assert!(pages
            .iter()
            .all(|p| p.arrangement == Arrangement::Grid));
    }

    #[test]
    fn test_partition_asymmetric_single_page() {
        let items: Vec<u32> = (0..7).collect();
        let pages = partition(items, &LayoutStrategy::AsymmetricRows);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].images, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(pages[0].arrangement, Arrangement::Rows(vec![4, 3]));
    }

    #[test]
    fn test_partition_empty_input() {
        let pages = partition(Vec::<u32>::new(), &LayoutStrategy::AsymmetricRows);
        assert!(pages.is_empty());
    }
}
