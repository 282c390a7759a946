//! Contour extraction: connected foreground regions and their boundaries.
//!
//! Regions are found with a deterministic row-major scan and 4-connected
//! BFS, speckle-sized regions are discarded by area, and each surviving
//! region's outer boundary is traced with Moore-neighbor following using
//! Jacob's stopping criterion.
//!
//! Every tie-break is fixed (scan order, neighbor order, sweep start), so
//! repeated runs on identical input produce identical contours.

use crate::binarize::Bitmap;
use crate::types::{Contour, Point};

/// 4-connected neighbor offsets in fixed order: east, south, west, north.
const COMPONENT_NEIGHBORS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Moore neighborhood in clockwise order starting west.
const MOORE_RING: [(i64, i64); 8] = [
    (-1, 0),  // W
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
];

/// Extract the boundary contour of every connected foreground region
/// whose area is at least `speckle_size` pixels.
///
/// Regions are discovered in row-major order, so the returned contours
/// are ordered top-to-bottom, left-to-right by their first pixel. An
/// all-background bitmap yields an empty vector, which is a valid result
/// rather than an error.
#[must_use]
pub fn extract_contours(bitmap: &Bitmap, speckle_size: u32) -> Vec<Contour> {
    let width = bitmap.width() as usize;
    let height = bitmap.height() as usize;
    let mut labels = vec![0_u32; width * height];
    let mut next_label = 0_u32;
    let mut contours = Vec::new();

    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let idx = (y as usize) * width + (x as usize);
            if !bitmap.get(i64::from(x), i64::from(y)) || labels[idx] != 0 {
                continue;
            }

            next_label += 1;
            let seed = (i64::from(x), i64::from(y));
            let area = flood_fill(bitmap, &mut labels, seed, next_label);

            if area < speckle_size {
                // Speckle suppression: the region stays labeled so it is
                // not revisited, but produces no contour.
                continue;
            }

            let points = trace_boundary(&labels, width, height, seed, next_label, area);
            contours.push(Contour::new(points, area));
        }
    }

    contours
}

/// Label one 4-connected component via BFS and return its pixel count.
///
/// The BFS queue and neighbor order are fixed, so labeling is
/// deterministic (though only the area and membership matter downstream).
fn flood_fill(bitmap: &Bitmap, labels: &mut [u32], seed: (i64, i64), label: u32) -> u32 {
    let width = bitmap.width() as usize;
    let mut queue = std::collections::VecDeque::new();

    #[allow(clippy::cast_sign_loss)]
    let seed_idx = (seed.1 as usize) * width + (seed.0 as usize);
    labels[seed_idx] = label;
    queue.push_back(seed);
    let mut area = 1_u32;

    while let Some((cx, cy)) = queue.pop_front() {
        for (dx, dy) in COMPONENT_NEIGHBORS {
            let (nx, ny) = (cx + dx, cy + dy);
            if !bitmap.get(nx, ny) {
                continue;
            }
            #[allow(clippy::cast_sign_loss)]
            let idx = (ny as usize) * width + (nx as usize);
            if labels[idx] == 0 {
                labels[idx] = label;
                area += 1;
                queue.push_back((nx, ny));
            }
        }
    }

    area
}

/// Whether `(x, y)` carries `label` in the label grid.
fn has_label(labels: &[u32], width: usize, height: usize, x: i64, y: i64, label: u32) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    #[allow(clippy::cast_sign_loss)]
    let (xu, yu) = (x as usize, y as usize);
    if xu >= width || yu >= height {
        return false;
    }
    labels[yu * width + xu] == label
}

/// Direction index (into [`MOORE_RING`]) from `from` to its Moore
/// neighbor `to`. Falls back to west if the points are not adjacent,
/// which cannot happen for positions produced by the sweep below.
fn ring_direction(from: (i64, i64), to: (i64, i64)) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    MOORE_RING.iter().position(|&d| d == delta).unwrap_or(0)
}

/// Trace the outer boundary of a labeled component with Moore-neighbor
/// following.
///
/// `seed` is the component's row-major-first pixel, so the pixel to its
/// west is guaranteed background and serves as the initial backtrack.
/// Tracing stops when the start pixel is re-entered from the same
/// backtrack position (Jacob's criterion); a step cap bounds the walk as
/// a defense against degenerate label grids.
fn trace_boundary(
    labels: &[u32],
    width: usize,
    height: usize,
    seed: (i64, i64),
    label: u32,
    area: u32,
) -> Vec<Point> {
    #[allow(clippy::cast_precision_loss)]
    let to_point = |(x, y): (i64, i64)| Point::new(x as f64, y as f64);

    let mut points = vec![to_point(seed)];
    let start_backtrack = (seed.0 - 1, seed.1);
    let mut current = seed;
    let mut backtrack = start_backtrack;

    // A closed boundary never exceeds the component perimeter; 4*area+8
    // over-approximates it for any shape.
    let max_steps = 4 * (area as usize) + 8;

    for _ in 0..max_steps {
        let from_dir = ring_direction(current, backtrack);
        let mut found = None;
        let mut previous = backtrack;

        for step in 1..=MOORE_RING.len() {
            let dir = (from_dir + step) % MOORE_RING.len();
            let candidate = (current.0 + MOORE_RING[dir].0, current.1 + MOORE_RING[dir].1);
            if has_label(labels, width, height, candidate.0, candidate.1, label) {
                found = Some((candidate, previous));
                break;
            }
            previous = candidate;
        }

        let Some((next, next_backtrack)) = found else {
            // Isolated single pixel: the contour is just the seed.
            break;
        };

        if next == seed && next_backtrack == start_backtrack {
            break;
        }

        points.push(to_point(next));
        current = next;
        backtrack = next_backtrack;
    }

    points
}
