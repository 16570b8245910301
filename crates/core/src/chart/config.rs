use serde::{Deserialize, Serialize};

/// Which way depth grows on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Root at the top, callees below.
    #[default]
    TopDown,
    /// Root at the bottom, callees above.
    BottomUp,
}

/// Plain-value chart options. Hosts may load these from JSON; the
/// root, ranges, renderer and reducer are supplied through the builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub orientation: Orientation,
    pub root_visible: bool,
    pub node_selection_enabled: bool,
    /// Fixed row height in pixels; `None` derives it from the font.
    pub custom_node_height: Option<f64>,
    /// Gap between horizontally adjacent nodes, in pixels.
    pub x_padding: f64,
    /// Gap between rows, in pixels.
    pub y_padding: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::TopDown,
            root_visible: true,
            node_selection_enabled: false,
            custom_node_height: None,
            x_padding: 1.0,
            y_padding: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: ChartConfig =
            serde_json::from_str(r#"{"orientation":"bottom-up","x_padding":0.0}"#)
                .unwrap_or_default();
        assert_eq!(cfg.orientation, Orientation::BottomUp);
        assert_eq!(cfg.x_padding, 0.0);
        assert_eq!(cfg.y_padding, 1.0);
        assert!(cfg.root_visible);
        assert!(cfg.custom_node_height.is_none());
    }

    #[test]
    fn roundtrip() {
        let cfg = ChartConfig {
            node_selection_enabled: true,
            custom_node_height: Some(22.0),
            ..ChartConfig::default()
        };
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: ChartConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cfg);
    }
}
