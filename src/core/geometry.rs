//! Spending-to-geometry transform.
//!
//! Pure functions mapping a user's spending totals to 3D building
//! descriptors. Everything here is deterministic in its input: the same
//! totals always produce the same neighborhood, so the client can re-render
//! from scratch on every page load without the scene shifting underfoot.

use crate::config::categories::CategoryPalette;
use serde::{Deserialize, Serialize};

/// Height of a building with zero recorded spend.
pub const BASE_HEIGHT: f64 = 1.0;
/// Additional height per dollar of total spend (base height / 10).
pub const HEIGHT_PER_DOLLAR: f64 = 0.1;
/// Footprint edge length of every building box.
pub const BUILDING_FOOTPRINT: f64 = 2.0;
/// Center-to-center distance between neighboring buildings.
pub const BUILDING_SPACING: f64 = 4.0;
/// Color used when a category has no palette entry.
pub const DEFAULT_COLOR: &str = "#808080";

/// Bright colors cycled per building index when category colors are off.
const CYCLING_PALETTE: [&str; 8] = [
    "#ff6b6b", "#4ecdc4", "#ffe66d", "#1a8fe3", "#9b5de5", "#f15bb5", "#00f5d4", "#fca311",
];

/// A spending location joined with its aggregate spend.
///
/// This is the derived, non-persisted value the dashboard and neighborhood
/// views are built from; it is recomputed on every page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationWithTotal {
    /// Location id
    pub id: String,
    /// Merchant/place name
    pub name: String,
    /// Category for color lookup
    pub category: String,
    /// Sum of all spending amounts recorded against the location
    pub total_spent: f64,
}

/// How buildings are placed on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One centered row along the road (the default street view)
    #[default]
    Row,
    /// A centered `ceil(sqrt(n))`-column grid for dense neighborhoods
    Grid,
}

/// How buildings are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Fixed category-to-color lookup; unknown categories get gray
    #[default]
    Category,
    /// Bright palette cycled by building index
    Cycling,
}

/// One building descriptor ready for the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingGeometry {
    /// Location id this building represents
    pub id: String,
    /// Merchant/place name, shown as the building label
    pub name: String,
    /// Category the color was derived from
    pub category: String,
    /// Total spend encoded by the building's height
    pub total_spent: f64,
    /// Box center `[x, y, z]`; y is half the height so the box sits on the ground
    pub position: [f64; 3],
    /// Box dimensions `[width, height, depth]`
    pub size: [f64; 3],
    /// Material color as a hex string
    pub color: String,
}

/// Computes a building's height from its total spend.
///
/// Zero spend still yields the base height - an empty location is a small
/// building, never a degenerate zero-height shape.
#[must_use]
pub fn building_height(total_spent: f64) -> f64 {
    BASE_HEIGHT + total_spent.max(0.0) * HEIGHT_PER_DOLLAR
}

/// Computes the `(x, z)` ground position for the building at `index` of `n`.
///
/// Both layouts center the arrangement on the origin. `n` must be at least
/// 1 and `index` less than `n`; a single building lands exactly at (0, 0).
#[must_use]
#[allow(clippy::cast_precision_loss)] // neighborhood sizes are far below 2^52
pub fn layout_position(layout: Layout, index: usize, n: usize) -> (f64, f64) {
    match layout {
        Layout::Row => {
            let x = (index as f64 - (n as f64 - 1.0) / 2.0) * BUILDING_SPACING;
            (x, 0.0)
        }
        Layout::Grid => {
            let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
            let rows = n.div_ceil(cols);
            let col = index % cols;
            let row = index / cols;
            let x = (col as f64 - (cols as f64 - 1.0) / 2.0) * BUILDING_SPACING;
            let z = (row as f64 - (rows as f64 - 1.0) / 2.0) * BUILDING_SPACING;
            (x, z)
        }
    }
}

/// Picks a building color for a category and index under the given mode.
#[must_use]
pub fn building_color(
    palette: &CategoryPalette,
    mode: ColorMode,
    category: &str,
    index: usize,
) -> String {
    match mode {
        ColorMode::Category => palette
            .color_for(category)
            .unwrap_or(DEFAULT_COLOR)
            .to_string(),
        ColorMode::Cycling => CYCLING_PALETTE[index % CYCLING_PALETTE.len()].to_string(),
    }
}

/// Maps spending totals to building descriptors.
///
/// The input order is preserved: the building for `locations[i]` occupies
/// slot `i` of the layout. Height encodes spend, position is deterministic,
/// and color is a pure function of category (or index).
#[must_use]
pub fn buildings_from_totals(
    locations: &[LocationWithTotal],
    layout: Layout,
    color_mode: ColorMode,
    palette: &CategoryPalette,
) -> Vec<BuildingGeometry> {
    let n = locations.len();

    locations
        .iter()
        .enumerate()
        .map(|(index, location)| {
            let height = building_height(location.total_spent);
            let (x, z) = layout_position(layout, index, n);
            BuildingGeometry {
                id: location.id.clone(),
                name: location.name.clone(),
                category: location.category.clone(),
                total_spent: location.total_spent,
                position: [x, height / 2.0, z],
                size: [BUILDING_FOOTPRINT, height, BUILDING_FOOTPRINT],
                color: building_color(palette, color_mode, &location.category, index),
            }
        })
        .collect()
}
