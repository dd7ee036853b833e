use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f64,
    pub background: String,
    pub text_color: String,
    pub point_color: String,
    pub labeled_color: String,
    pub unlabeled_color: String,
    pub box_color: String,
    pub label_background: String,
    pub connector_color: String,
    pub point_border_color: String,
}

impl Theme {
    /// High-contrast palette: blue labeled points, red misses, green boxes.
    pub fn classic() -> Self {
        Self {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_size: 11.0,
            background: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            point_color: "#C8C8C8".to_string(),
            labeled_color: "#0000FF".to_string(),
            unlabeled_color: "#FF0000".to_string(),
            box_color: "#00FF00".to_string(),
            label_background: "rgba(255, 255, 255, 0.7)".to_string(),
            connector_color: "#FF0000".to_string(),
            point_border_color: "#000000".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            point_color: "#D7E0F0".to_string(),
            labeled_color: "#3B6FD8".to_string(),
            unlabeled_color: "#D8453B".to_string(),
            box_color: "#4CAF7A".to_string(),
            label_background: "rgba(248, 250, 255, 0.8)".to_string(),
            connector_color: "#7A8AA6".to_string(),
            point_border_color: "#1C2430".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
