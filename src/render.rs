use crate::config::RenderConfig;
use crate::ir::LabelRequest;
use crate::placement::{PlacementResult, Point, Rect};
use crate::placement_dump::unlabeled;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const LEGEND_X: f64 = 20.0;
const LEGEND_Y: f64 = 30.0;
const LEGEND_LINE: f64 = 25.0;

/// Maps world coordinates onto the image, flipping Y so it grows upward.
struct Viewport {
    scale: f64,
    padding: f64,
    height: f64,
}

impl Viewport {
    fn new(config: &RenderConfig) -> Self {
        Self {
            scale: config.scale,
            padding: config.padding,
            height: config.height,
        }
    }

    fn point(&self, p: Point) -> (f64, f64) {
        (
            p.x * self.scale + self.padding,
            self.height - (p.y * self.scale + self.padding),
        )
    }

    /// Top-left corner plus size in image space.
    fn rect(&self, r: &Rect) -> (f64, f64, f64, f64) {
        let (x0, y_top) = self.point(Point::new(r.min().x, r.max().y));
        (x0, y_top, r.width() * self.scale, r.height() * self.scale)
    }
}

pub fn render_svg(
    requests: &[LabelRequest],
    result: &PlacementResult,
    theme: &Theme,
    config: &RenderConfig,
) -> String {
    let width = config.width.max(1.0);
    let height = config.height.max(1.0);
    let view = Viewport::new(config);
    let radius = config.point_radius;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for req in requests.iter().filter(|req| req.anchor.is_finite()) {
        let (x, y) = view.point(req.anchor);
        svg.push_str(&format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{radius:.2}\" fill=\"{}\"/>",
            theme.point_color
        ));
    }

    for label in result {
        let (px, py) = view.point(label.anchor);
        let (bx, by, bw, bh) = view.rect(&label.rect);
        let (cx, cy) = view.point(label.rect.center());

        svg.push_str(&point_svg(px, py, radius, &theme.labeled_color, theme));
        svg.push_str(&format!(
            "<rect class=\"label-box\" x=\"{bx:.2}\" y=\"{by:.2}\" width=\"{bw:.2}\" height=\"{bh:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>",
            theme.box_color
        ));
        svg.push_str(&format!(
            "<line x1=\"{px:.2}\" y1=\"{py:.2}\" x2=\"{cx:.2}\" y2=\"{cy:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            theme.connector_color
        ));
        svg.push_str(&label_text_svg(cx, cy, &label.text, theme));
    }

    for req in unlabeled(requests, result)
        .into_iter()
        .filter(|req| req.anchor.is_finite())
    {
        let (x, y) = view.point(req.anchor);
        svg.push_str(&point_svg(x, y, radius, &theme.unlabeled_color, theme));
    }

    if config.show_legend {
        let entries = [
            ("Labeled points", theme.labeled_color.as_str()),
            ("Unlabeled points (overlap)", theme.unlabeled_color.as_str()),
            ("Label boxes", theme.box_color.as_str()),
            ("Point-label connections", theme.connector_color.as_str()),
        ];
        for (idx, (text, color)) in entries.iter().enumerate() {
            let y = LEGEND_Y + idx as f64 * LEGEND_LINE;
            svg.push_str(&format!(
                "<text x=\"{LEGEND_X:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
                theme.font_family,
                theme.font_size * 1.2,
                color,
                escape_xml(text)
            ));
        }
    }

    if let Some(title) = &config.title {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{LEGEND_Y:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            width - LEGEND_X,
            theme.font_family,
            theme.font_size * 1.4,
            theme.text_color,
            escape_xml(title)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn point_svg(x: f64, y: f64, radius: f64, fill: &str, theme: &Theme) -> String {
    format!(
        "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{radius:.2}\" fill=\"{fill}\" stroke=\"{}\" stroke-width=\"1\"/>",
        theme.point_border_color
    )
}

fn label_text_svg(x: f64, y: f64, text: &str, theme: &Theme) -> String {
    // Rough backing plate; exact glyph metrics are left to the SVG consumer.
    let approx_w = text.chars().count() as f64 * theme.font_size * 0.6 + 4.0;
    let approx_h = theme.font_size + 4.0;
    let mut out = format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{approx_w:.2}\" height=\"{approx_h:.2}\" fill=\"{}\"/>",
        x - approx_w / 2.0,
        y - approx_h / 2.0,
        theme.label_background
    );
    out.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(text)
    ));
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let fallback = usvg::Size::from_wh(600.0, 600.0)
        .ok_or_else(|| anyhow::anyhow!("Invalid fallback size"))?;
    opt.default_size =
        usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32).unwrap_or(fallback);

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
