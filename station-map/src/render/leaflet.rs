//! View models for the Leaflet map page.
//!
//! The browser side (`static/js/map.js`) reads the serialized [`MapView`]
//! and builds one toggleable layer group per overlay. The summary panel is
//! rendered server-side by the page template.

use serde::Serialize;

use crate::classify::{CategoryCounts, ClassificationResult, ClassifiedStation};
use crate::domain::Category;

use super::palette::Palette;
use super::{Renderer, render_all};

/// Base map settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSettings {
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: [40.73, -74.0059],
            zoom: 12,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
        }
    }
}

/// A single station marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub station_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub capacity: u32,
    pub bikes_available: u32,
    pub docks_available: Option<u32>,
}

impl MarkerView {
    pub fn from_station(station: &ClassifiedStation) -> Self {
        Self {
            station_id: station.info.station_id.to_string(),
            name: station.info.name.clone(),
            lat: station.info.position.lat,
            lon: station.info.position.lon,
            capacity: station.info.capacity,
            bikes_available: station.status.num_bikes_available,
            docks_available: station.status.num_docks_available,
        }
    }
}

/// One toggleable overlay: all markers of a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub key: &'static str,
    pub label: &'static str,
    pub color: String,
    pub icon_url: String,
    pub markers: Vec<MarkerView>,
}

/// One line of the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub color: String,
    pub count: usize,
}

/// The summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub timestamp: String,
    pub total_stations: usize,
    pub rows: Vec<SummaryRow>,
}

/// Everything the map page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub settings: MapSettings,
    pub overlays: Vec<OverlayView>,
    pub summary: SummaryView,
}

impl MapView {
    /// Serialize for embedding in a `<script>` element.
    ///
    /// `</` is escaped so station names cannot close the element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace("</", "<\\/"))
    }
}

/// Renders categories into [`OverlayView`]s using an injected palette.
pub struct LeafletRenderer<'a> {
    palette: &'a Palette,
    summary: Option<SummaryView>,
}

impl<'a> LeafletRenderer<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            summary: None,
        }
    }

    /// Render a whole result into a [`MapView`].
    pub fn render_map(
        result: &ClassificationResult,
        palette: &'a Palette,
        settings: &MapSettings,
        timestamp: &str,
    ) -> MapView {
        let mut renderer = Self::new(palette);
        let overlays = render_all(result, &mut renderer, timestamp)
            .into_iter()
            .map(|(_, overlay)| overlay)
            .collect();

        MapView {
            settings: settings.clone(),
            overlays,
            summary: renderer.take_summary(timestamp),
        }
    }

    /// The summary rendered so far, or an empty one if none was rendered.
    fn take_summary(&mut self, timestamp: &str) -> SummaryView {
        self.summary.take().unwrap_or_else(|| SummaryView {
            timestamp: timestamp.to_string(),
            total_stations: 0,
            rows: Vec::new(),
        })
    }
}

impl Renderer for LeafletRenderer<'_> {
    type Layer = OverlayView;

    fn render_category(&mut self, category: Category, stations: &[ClassifiedStation]) -> OverlayView {
        let swatch = self.palette.swatch(category);
        OverlayView {
            key: category.key(),
            label: category.label(),
            color: swatch.color.clone(),
            icon_url: swatch.icon_url.clone(),
            markers: stations.iter().map(MarkerView::from_station).collect(),
        }
    }

    fn render_summary(&mut self, counts: &CategoryCounts, total_stations: usize, timestamp: &str) {
        let rows = Category::ALL
            .into_iter()
            .map(|category| SummaryRow {
                label: category.label(),
                color: self.palette.color(category).to_string(),
                count: counts.get(category),
            })
            .collect();

        self.summary = Some(SummaryView {
            timestamp: timestamp.to_string(),
            total_stations,
            rows,
        });
    }
}
