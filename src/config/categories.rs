//! Suggested category configuration loading from config.toml
//!
//! This module provides functionality to load the suggested spending-category
//! set and its building colors from a TOML configuration file. The categories
//! defined in config.toml feed the signup form's suggestions and the
//! neighborhood's category-to-color lookup; a compiled-in default set is used
//! when no file is present.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{collections::HashMap, path::Path};

/// Compiled-in fallback categories and colors.
const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("Food", "#e63946"),
    ("Groceries", "#90be6d"),
    ("Coffee", "#8d5524"),
    ("Entertainment", "#9b5de5"),
    ("Shopping", "#f15bb5"),
    ("Travel", "#1a8fe3"),
    ("Utilities", "#577590"),
    ("Other", "#adb5bd"),
];

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of suggested categories
    pub categories: Vec<CategoryConfig>,
}

/// Configuration for a single suggested category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Category name shown in suggestions
    pub name: String,
    /// Hex color the neighborhood paints buildings of this category
    pub color: String,
}

/// Category-to-color lookup used by the geometry transform.
///
/// Lookups are case-insensitive; categories the palette does not know get no
/// color here and fall back to the transform's default gray.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    names: Vec<String>,
    colors: HashMap<String, String>,
}

impl CategoryPalette {
    /// Builds a palette from category configs.
    #[must_use]
    pub fn new(categories: &[CategoryConfig]) -> Self {
        Self {
            names: categories.iter().map(|c| c.name.clone()).collect(),
            colors: categories
                .iter()
                .map(|c| (c.name.to_lowercase(), c.color.clone()))
                .collect(),
        }
    }

    /// The color configured for a category, if any.
    #[must_use]
    pub fn color_for(&self, category: &str) -> Option<&str> {
        self.colors
            .get(&category.to_lowercase())
            .map(String::as_str)
    }

    /// The suggested category names, in configuration order.
    #[must_use]
    pub fn suggested_names(&self) -> &[String] {
        &self.names
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        let categories: Vec<CategoryConfig> = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color)| CategoryConfig {
                name: (*name).to_string(),
                color: (*color).to_string(),
            })
            .collect();
        Self::new(&categories)
    }
}

/// Loads category configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the palette from the default location (./config.toml), falling back
/// to the compiled-in categories when the file does not exist.
pub fn load_default_palette() -> Result<CategoryPalette> {
    if !Path::new("config.toml").exists() {
        return Ok(CategoryPalette::default());
    }
    let config = load_config("config.toml")?;
    Ok(CategoryPalette::new(&config.categories))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_category_config() {
        let toml_str = r##"
            [[categories]]
            name = "Food"
            color = "#e63946"

            [[categories]]
            name = "Travel"
            color = "#1a8fe3"
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].name, "Food");
        assert_eq!(config.categories[0].color, "#e63946");
        assert_eq!(config.categories[1].name, "Travel");
    }

    #[test]
    fn test_palette_lookup_case_insensitive() {
        let palette = CategoryPalette::default();
        assert_eq!(palette.color_for("Food"), palette.color_for("food"));
        assert!(palette.color_for("Food").is_some());
        assert!(palette.color_for("Nonexistent").is_none());
    }

    #[test]
    fn test_default_palette_has_suggestions() {
        let palette = CategoryPalette::default();
        assert_eq!(palette.suggested_names().len(), DEFAULT_CATEGORIES.len());
        assert_eq!(palette.suggested_names()[0], "Food");
    }
}
