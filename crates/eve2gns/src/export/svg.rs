//! SVG payload of GNS3 text drawings.

use svg::{
    Document,
    node::element::{TSpan, Text},
};

use crate::config::StyleConfig;

const DRAWING_WIDTH: u32 = 150;
const DRAWING_HEIGHT: u32 = 50;

/// Renders annotation text as the SVG document GNS3 stores for a drawing,
/// one `<tspan>` per line.
pub(crate) fn render_text<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    style: &StyleConfig,
) -> String {
    let font_size = style.drawing_font_size();

    let text = lines.into_iter().enumerate().fold(
        Text::new("")
            .set("fill", "#000000")
            .set("fill-opacity", 1.0)
            .set("font-family", style.label_font_family())
            .set("font-size", format!("{font_size:.1}"))
            .set("font-weight", "bold"),
        |text, (index, line)| {
            let span = TSpan::new(line).set("x", 0);
            let span = if index == 0 {
                span
            } else {
                span.set("dy", format!("{:.1}", font_size * 1.2))
            };
            text.add(span)
        },
    );

    Document::new()
        .set("height", DRAWING_HEIGHT)
        .set("width", DRAWING_WIDTH)
        .add(text)
        .to_string()
}
