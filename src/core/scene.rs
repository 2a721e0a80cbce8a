//! Neighborhood scene description.
//!
//! Builds the declarative scene the client renderer draws: a ground strip
//! with a road marking, fixed lighting, a high orbit camera with clamped
//! zoom/pan bounds, and one labeled box per building. Selection is modeled
//! here too - clicking a building yields a [`BuildingInfo`] payload and
//! hovering swaps the material color, the only interactive feedback.

use crate::core::geometry::BuildingGeometry;
use serde::{Deserialize, Serialize};

/// Length of the ground strip along the road.
pub const GROUND_LENGTH: f64 = 60.0;
/// Width of the ground strip.
pub const GROUND_WIDTH: f64 = 20.0;
/// Width of the black border drawn around the ground.
pub const GROUND_BORDER: f64 = 0.1;
/// Material color swapped in while a building is hovered.
pub const HOVER_COLOR: &str = "#ff6b6b";

/// The ground strip and its markings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    /// Plane length along the road axis
    pub length: f64,
    /// Plane width
    pub width: f64,
    /// Border width around the plane
    pub border: f64,
    /// Main surface color
    pub color: String,
    /// Border color
    pub border_color: String,
    /// Center road-marking color
    pub road_marking_color: String,
}

/// Ambient plus directional lighting, intensities fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Ambient light intensity
    pub ambient_intensity: f64,
    /// Directional light intensity
    pub directional_intensity: f64,
    /// Directional light position
    pub directional_position: [f64; 3],
}

/// The high look-down camera the scene opens with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Initial camera position
    pub position: [f64; 3],
    /// Field of view in degrees
    pub fov: f64,
}

/// Orbit-control bounds; zoom and polar angle are clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitBounds {
    /// Closest allowed zoom distance
    pub min_distance: f64,
    /// Farthest allowed zoom distance
    pub max_distance: f64,
    /// Lower polar-angle clamp in radians
    pub min_polar_angle: f64,
    /// Upper polar-angle clamp in radians
    pub max_polar_angle: f64,
}

/// The complete scene handed to the client renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Ground strip
    pub ground: Ground,
    /// Scene lighting
    pub lighting: Lighting,
    /// Initial camera
    pub camera: Camera,
    /// Orbit-control clamps
    pub controls: OrbitBounds,
    /// Color swapped in on hover
    pub hover_color: String,
    /// One box per spending location
    pub buildings: Vec<BuildingGeometry>,
}

/// Selection payload raised when a building is clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    /// Location id
    pub id: String,
    /// Merchant/place name
    pub name: String,
    /// Location category
    pub category: String,
    /// Formatted spend line, e.g. `"Total Spent: $1,234.50"`
    pub description: String,
}

/// Assembles the scene description around a set of buildings.
#[must_use]
pub fn build_scene(buildings: Vec<BuildingGeometry>) -> SceneDescription {
    SceneDescription {
        ground: Ground {
            length: GROUND_LENGTH,
            width: GROUND_WIDTH,
            border: GROUND_BORDER,
            color: "#e0e0e0".to_string(),
            border_color: "#000000".to_string(),
            road_marking_color: "#ffffff".to_string(),
        },
        lighting: Lighting {
            ambient_intensity: 0.7,
            directional_intensity: 0.5,
            directional_position: [0.0, 1.0, 0.0],
        },
        camera: Camera {
            position: [0.0, 600.0, 0.0],
            fov: 50.0,
        },
        controls: OrbitBounds {
            min_distance: 2.0,
            max_distance: 800.0,
            min_polar_angle: std::f64::consts::PI / 2.3,
            max_polar_angle: std::f64::consts::PI / 2.2,
        },
        hover_color: HOVER_COLOR.to_string(),
        buildings,
    }
}

/// Builds the selection payload for a clicked building.
#[must_use]
pub fn building_info(building: &BuildingGeometry) -> BuildingInfo {
    BuildingInfo {
        id: building.id.clone(),
        name: building.name.clone(),
        category: building.category.clone(),
        description: format!("Total Spent: ${}", format_usd(building.total_spent)),
    }
}

/// Formats a dollar amount with thousands separators and two decimals.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let whole: String = grouped.chars().rev().collect();

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{whole}.{cents}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::categories::CategoryPalette;
    use crate::core::geometry::{
        BASE_HEIGHT, ColorMode, HEIGHT_PER_DOLLAR, Layout, LocationWithTotal,
        buildings_from_totals,
    };

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "0.00");
        assert_eq!(format_usd(42.5), "42.50");
        assert_eq!(format_usd(1234.5), "1,234.50");
        assert_eq!(format_usd(1_000_000.0), "1,000,000.00");
        assert_eq!(format_usd(-987.65), "-987.65");
    }

    #[test]
    fn test_building_info_description() {
        let palette = CategoryPalette::default();
        let locations = vec![LocationWithTotal {
            id: "loc-1".to_string(),
            name: "Corner Grocery".to_string(),
            category: "Food".to_string(),
            total_spent: 1234.5,
        }];
        let buildings =
            buildings_from_totals(&locations, Layout::Row, ColorMode::Category, &palette);

        let info = building_info(&buildings[0]);
        assert_eq!(info.name, "Corner Grocery");
        assert_eq!(info.category, "Food");
        assert_eq!(info.description, "Total Spent: $1,234.50");
    }

    #[test]
    fn test_scene_carries_fixed_bounds() {
        let scene = build_scene(Vec::new());

        assert_eq!(scene.ground.length, GROUND_LENGTH);
        assert_eq!(scene.camera.position, [0.0, 600.0, 0.0]);
        assert!(scene.controls.min_polar_angle < scene.controls.max_polar_angle);
        assert_eq!(scene.hover_color, HOVER_COLOR);
        assert!(scene.buildings.is_empty());
    }

    #[tokio::test]
    async fn test_fresh_location_to_grown_building_end_to_end() -> crate::errors::Result<()> {
        use crate::core::amount;
        use crate::test_utils::*;

        let (db, user) = setup_with_user().await?;
        let location = create_test_location(&db, &user.id, "Corner Grocery").await?;
        let palette = CategoryPalette::default();

        // No spend yet: the building stands at exactly the base height
        let totals =
            amount::get_all_totals_by_location_ids(&db, &[location.id.clone()]).await?;
        let with_totals = vec![LocationWithTotal {
            id: location.id.clone(),
            name: location.name.clone(),
            category: location.category.clone(),
            total_spent: totals[&location.id],
        }];
        let buildings =
            buildings_from_totals(&with_totals, Layout::Row, ColorMode::Category, &palette);
        assert_eq!(buildings[0].size[1], BASE_HEIGHT);

        // One 42.50 transaction grows it by exactly the per-dollar scale
        amount::create_amount(&db, &location.id, 42.50, None, None).await?;
        let total = amount::get_total_by_location_id(&db, &location.id).await?;
        assert_eq!(total, 42.50);

        let with_totals = vec![LocationWithTotal {
            id: location.id.clone(),
            name: location.name,
            category: location.category,
            total_spent: total,
        }];
        let buildings =
            buildings_from_totals(&with_totals, Layout::Row, ColorMode::Category, &palette);
        assert_eq!(buildings[0].size[1], BASE_HEIGHT + 42.50 * HEIGHT_PER_DOLLAR);
        assert_eq!(buildings[0].position, [0.0, buildings[0].size[1] / 2.0, 0.0]);

        let info = building_info(&buildings[0]);
        assert_eq!(info.description, "Total Spent: $42.50");

        Ok(())
    }

    #[test]
    fn test_scene_height_matches_spend() {
        let palette = CategoryPalette::default();
        let locations = vec![
            LocationWithTotal {
                id: "a".to_string(),
                name: "Empty".to_string(),
                category: "Food".to_string(),
                total_spent: 0.0,
            },
            LocationWithTotal {
                id: "b".to_string(),
                name: "Busy".to_string(),
                category: "Food".to_string(),
                total_spent: 42.50,
            },
        ];
        let scene = build_scene(buildings_from_totals(
            &locations,
            Layout::Row,
            ColorMode::Category,
            &palette,
        ));

        assert_eq!(scene.buildings[0].size[1], BASE_HEIGHT);
        assert_eq!(
            scene.buildings[1].size[1],
            BASE_HEIGHT + 42.50 * HEIGHT_PER_DOLLAR
        );
    }
}
