//! Category colours and marker icons.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::Category;

const ICON_BASE: &str = "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img";

/// Colour and marker icon for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    /// CSS colour for legend dots and overlay labels.
    pub color: String,
    /// URL of the marker icon image.
    pub icon_url: String,
}

impl Swatch {
    pub fn new(color: impl Into<String>, icon_url: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            icon_url: icon_url.into(),
        }
    }

    fn marker(color: &str, icon: &str) -> Self {
        Self::new(color, format!("{ICON_BASE}/marker-icon-{icon}.png"))
    }
}

/// Grey swatch for categories the palette has no entry for.
pub static FALLBACK_SWATCH: LazyLock<Swatch> =
    LazyLock::new(|| Swatch::marker("#9E9E9E", "grey"));

/// Lookup table from category to swatch, injected into renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: HashMap<Category, Swatch>,
}

impl Palette {
    /// A palette with no entries; every lookup returns [`FALLBACK_SWATCH`].
    pub fn empty() -> Self {
        Self {
            swatches: HashMap::new(),
        }
    }

    /// Set the swatch for a category.
    pub fn with_swatch(mut self, category: Category, swatch: Swatch) -> Self {
        self.swatches.insert(category, swatch);
        self
    }

    /// Swatch for a category, falling back to grey.
    pub fn swatch(&self, category: Category) -> &Swatch {
        self.swatches.get(&category).unwrap_or(&*FALLBACK_SWATCH)
    }

    pub fn color(&self, category: Category) -> &str {
        &self.swatch(category).color
    }

    pub fn icon_url(&self, category: Category) -> &str {
        &self.swatch(category).icon_url
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::empty()
            .with_swatch(Category::ComingSoon, Swatch::marker("#FFEB3B", "yellow"))
            .with_swatch(Category::Empty, Swatch::marker("#F44336", "red"))
            .with_swatch(Category::OutOfOrder, Swatch::marker("#FF9800", "orange"))
            .with_swatch(Category::Low, Swatch::marker("#4CAF50", "green"))
            .with_swatch(Category::Healthy, Swatch::marker("#2196F3", "blue"))
    }
}
