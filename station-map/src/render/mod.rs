//! Rendering of classification results.
//!
//! The classifier returns plain data; anything that draws it implements
//! [`Renderer`]. The map page uses [`LeafletRenderer`], which turns each
//! category into an overlay the browser-side Leaflet code can toggle.

mod leaflet;
mod palette;
mod timestamp;

pub use leaflet::{LeafletRenderer, MapSettings, MapView, MarkerView, OverlayView, SummaryRow, SummaryView};
pub use palette::{FALLBACK_SWATCH, Palette, Swatch};
pub use timestamp::{DEFAULT_TIMEZONE, format_timestamp};

use crate::classify::{CategoryCounts, ClassificationResult, ClassifiedStation};
use crate::domain::Category;

/// A consumer that draws categories and a summary.
pub trait Renderer {
    /// Handle to one rendered category (an overlay, a list, ...).
    type Layer;

    /// Render the stations of one category.
    fn render_category(&mut self, category: Category, stations: &[ClassifiedStation]) -> Self::Layer;

    /// Render the aggregate summary.
    fn render_summary(&mut self, counts: &CategoryCounts, total_stations: usize, timestamp: &str);
}

/// Drive `renderer` over a result.
///
/// Renders one layer per category in [`Category::ALL`] order, empty
/// categories included, then the summary.
pub fn render_all<R: Renderer>(
    result: &ClassificationResult,
    renderer: &mut R,
    timestamp: &str,
) -> Vec<(Category, R::Layer)> {
    let layers = result
        .iter()
        .map(|(category, stations)| (category, renderer.render_category(category, stations)))
        .collect();

    renderer.render_summary(&result.counts(), result.total_stations(), timestamp);

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::domain::{Position, StationId, StationInfo, StationStatus};

    /// Records calls instead of drawing anything.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        type Layer = usize;

        fn render_category(&mut self, category: Category, stations: &[ClassifiedStation]) -> usize {
            self.calls.push(format!("{}:{}", category.key(), stations.len()));
            stations.len()
        }

        fn render_summary(&mut self, counts: &CategoryCounts, total_stations: usize, timestamp: &str) {
            self.calls.push(format!(
                "summary:{}:{}:{}",
                counts.total(),
                total_stations,
                timestamp
            ));
        }
    }

    #[test]
    fn renders_every_category_then_summary() {
        let stations = vec![StationInfo::new(
            StationId::parse("1").unwrap(),
            "One",
            Position::new(40.7, -74.0).unwrap(),
            10,
        )];
        let statuses = vec![StationStatus::new(StationId::parse("1").unwrap(), true, true, 2)];
        let result = classify(&stations, &statuses);

        let mut renderer = RecordingRenderer::default();
        let layers = render_all(&result, &mut renderer, "now");

        assert_eq!(
            renderer.calls,
            vec![
                "coming_soon:0",
                "empty:0",
                "out_of_order:0",
                "low:1",
                "healthy:0",
                "summary:1:1:now",
            ]
        );
        let categories: Vec<_> = layers.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, Category::ALL.to_vec());
        assert_eq!(layers[Category::Low.index()].1, 1);
    }
}
