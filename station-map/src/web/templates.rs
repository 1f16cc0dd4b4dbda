//! Askama templates for the web frontend.

use askama::Template;

use crate::render::{MapView, SummaryView};

/// Map page with overlays and summary panel.
#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate {
    pub summary: SummaryView,
    /// Serialized [`MapView`], safe to embed in a `<script>` element.
    pub map_json: String,
}

impl MapTemplate {
    /// Build from a rendered map view.
    pub fn from_view(view: &MapView) -> Result<Self, serde_json::Error> {
        Ok(Self {
            summary: view.summary.clone(),
            map_json: view.to_script_json()?,
        })
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}
