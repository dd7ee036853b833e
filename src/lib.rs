#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod parser;
pub mod placement;
pub mod placement_dump;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, Offset, PlacementConfig, RenderConfig, load_config};
pub use ir::LabelRequest;
pub use parser::parse_points;
pub use placement::{
    PlacedLabel, Placement, PlacementError, PlacementResult, Placer, Point, Rect, place_labels,
    place_labels_with_outcomes,
};
pub use placement_dump::{format_report, unlabeled};
pub use render::render_svg;
pub use theme::Theme;
