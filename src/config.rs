use std::path::Path;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Presentation defaults
// ---------------------------------------------------------------------------

/// Chart defaults passed explicitly to the chart layer. Callers hand this
/// struct around instead of mutating any global configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Histogram bucket count.
    pub bins: usize,
    /// Scatter point radius in UI points.
    pub point_radius: f32,
    /// Width of reference lines (median cross-hairs).
    pub line_width: f32,
    /// Initial window size.
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            bins: 20,
            point_radius: 2.5,
            line_width: 1.0,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl PresentationConfig {
    /// Read config from a JSON file. A missing file means defaults; a file
    /// that fails to parse is reported and also falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&text) {
            Ok(config) => {
                log::info!("Loaded presentation config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring bad config {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PresentationConfig::default();
        assert_eq!(cfg.bins, 20);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg: PresentationConfig = serde_json::from_str(r#"{"bins": 40}"#).unwrap();
        assert_eq!(cfg.bins, 40);
        assert_eq!(cfg.point_radius, PresentationConfig::default().point_radius);
    }

    #[test]
    fn missing_file_is_defaults() {
        let cfg = PresentationConfig::load_or_default(Path::new("/no/such/config.json"));
        assert_eq!(cfg, PresentationConfig::default());
    }
}
