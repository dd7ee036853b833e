use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_LABEL_WIDTH: f64 = 6.0;
const DEFAULT_LABEL_HEIGHT: f64 = 2.0;
const DEFAULT_MARGIN: f64 = 1.0;

/// Candidate corner relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl From<(f64, f64)> for Offset {
    fn from((dx, dy): (f64, f64)) -> Self {
        Self::new(dx, dy)
    }
}

impl From<Offset> for (f64, f64) {
    fn from(offset: Offset) -> Self {
        (offset.dx, offset.dy)
    }
}

/// Fixed for a whole run. Checked by `Placer::new`, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementConfig {
    pub label_width: f64,
    pub label_height: f64,
    /// Tried in order; earlier entries win.
    pub offsets: Vec<Offset>,
}

impl PlacementConfig {
    /// Top-right, top-left, bottom-right, bottom-left, each pushed `margin`
    /// away from the anchor so the box never covers it.
    pub fn four_corner(width: f64, height: f64, margin: f64) -> Self {
        Self {
            label_width: width,
            label_height: height,
            offsets: vec![
                Offset::new(margin, margin),
                Offset::new(-margin - width, margin),
                Offset::new(margin, -margin - height),
                Offset::new(-margin - width, -margin - height),
            ],
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self::four_corner(DEFAULT_LABEL_WIDTH, DEFAULT_LABEL_HEIGHT, DEFAULT_MARGIN)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    /// Image pixels per world unit.
    pub scale: f64,
    pub padding: f64,
    pub point_radius: f64,
    pub show_legend: bool,
    pub title: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            scale: 20.0,
            padding: 20.0,
            point_radius: 6.0,
            show_legend: true,
            title: Some("Automatic Label Placement".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub placement: PlacementConfig,
    pub render: RenderConfig,
    pub theme: Theme,
}

impl Config {
    /// Small labels and a large scale, sized for the built-in sample points.
    pub fn sample() -> Self {
        Self {
            placement: PlacementConfig::four_corner(0.4, 0.2, 0.2),
            render: RenderConfig {
                scale: 80.0,
                padding: 0.0,
                ..RenderConfig::default()
            },
            theme: Theme::classic(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementConfigFile {
    label_width: Option<f64>,
    label_height: Option<f64>,
    margin: Option<f64>,
    offsets: Option<Vec<Offset>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    scale: Option<f64>,
    padding: Option<f64>,
    point_radius: Option<f64>,
    font_size: Option<f64>,
    show_legend: Option<bool>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f64>,
    background: Option<String>,
    text_color: Option<String>,
    point_color: Option<String>,
    labeled_color: Option<String>,
    unlabeled_color: Option<String>,
    box_color: Option<String>,
    label_background: Option<String>,
    connector_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    placement: Option<PlacementConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    match parsed.theme.as_deref() {
        None | Some("classic") | Some("default") => {}
        Some("modern") => config.theme = Theme::modern(),
        Some(other) => return Err(anyhow::anyhow!("Unknown theme '{other}'")),
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(placement) = parsed.placement {
        config.placement = merge_placement(placement);
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.scale {
            config.render.scale = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.point_radius {
            config.render.point_radius = v;
        }
        if let Some(v) = render.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = render.show_legend {
            config.render.show_legend = v;
        }
        if render.title.is_some() {
            config.render.title = render.title;
        }
    }

    Ok(config)
}

fn merge_placement(file: PlacementConfigFile) -> PlacementConfig {
    let width = file.label_width.unwrap_or(DEFAULT_LABEL_WIDTH);
    let height = file.label_height.unwrap_or(DEFAULT_LABEL_HEIGHT);
    match file.offsets {
        // Explicit offsets win over the margin shorthand.
        Some(offsets) => PlacementConfig {
            label_width: width,
            label_height: height,
            offsets,
        },
        None => PlacementConfig::four_corner(width, height, file.margin.unwrap_or(DEFAULT_MARGIN)),
    }
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.point_color {
        theme.point_color = v;
    }
    if let Some(v) = vars.labeled_color {
        theme.labeled_color = v;
    }
    if let Some(v) = vars.unlabeled_color {
        theme.unlabeled_color = v;
    }
    if let Some(v) = vars.box_color {
        theme.box_color = v;
    }
    if let Some(v) = vars.label_background {
        theme.label_background = v;
    }
    if let Some(v) = vars.connector_color {
        theme.connector_color = v;
    }
}
