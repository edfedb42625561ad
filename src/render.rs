use anyhow::Result;
use std::path::Path;

use crate::config::RenderConfig;
use crate::layout::PlacedWord;

/// Paints a placed-word list as an SVG document. Every word is drawn
/// centered in its box so the same transform covers rotated and upright
/// text.
pub fn render_svg(
    words: &[PlacedWord],
    width: f32,
    height: f32,
    config: &RenderConfig,
) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));

    for word in words {
        let center_x = word.left + word.width / 2.0;
        let center_y = word.top + word.height / 2.0;
        let mut attrs = format!(
            "font-family=\"{}\" font-size=\"{:.2}\"",
            escape_xml(&word.font_style.font_family),
            word.font_style.font_size
        );
        if !word.font_style.font_weight.is_empty() {
            attrs.push_str(&format!(
                " font-weight=\"{}\"",
                escape_xml(&word.font_style.font_weight)
            ));
        }
        if !word.font_style.font_style.is_empty() {
            attrs.push_str(&format!(
                " font-style=\"{}\"",
                escape_xml(&word.font_style.font_style)
            ));
        }
        svg.push_str(&format!(
            "<text transform=\"translate({center_x:.2} {center_y:.2}) rotate({:.1})\" text-anchor=\"middle\" dominant-baseline=\"central\" {attrs} fill=\"{}\">{}</text>",
            word.rotate,
            escape_xml(&word.color),
            escape_xml(&word.text)
        ));
    }

    svg.push_str("</svg>");
    svg
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

pub fn write_output_png(svg: &str, output: &Path, width: f32, height: f32) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(width, height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

/// Writes the placed-word list as JSON, the shape an external renderer
/// consumes directly.
pub fn write_output_json(words: &[PlacedWord], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(words)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
        }
        None => {
            print!("{}", json);
        }
    }
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
