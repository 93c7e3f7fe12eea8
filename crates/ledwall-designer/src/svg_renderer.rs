//! SVG renderer for installation diagrams.
//!
//! Renders a [`DiagramState`] as a standalone SVG document in drawing space
//! (the `viewBox` is the canvas). Layers, back to front:
//! - wall (wall-relative layout only)
//! - niche, wood backing, screen
//! - side view with its depth label
//! - floor line and centre line
//! - receptacle boxes and their intended-position dimension lines
//! - dimension labels in fractional inches

use ledwall_core::units::format_inches;

use crate::diagram_state::DiagramState;
use crate::model::Rect;

const LABEL_OFFSET: f64 = 14.0;
const FONT_SIZE: f64 = 12.0;

/// Escapes text for use as SVG character data.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn rect_element(rect: &Rect, class: &str) -> String {
    format!(
        "<rect class=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/>\n",
        class, rect.x, rect.y, rect.width, rect.height
    )
}

fn line_element(x1: f64, y1: f64, x2: f64, y2: f64, class: &str) -> String {
    format!(
        "<line class=\"{}\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
        class, x1, y1, x2, y2
    )
}

fn text_element(x: f64, y: f64, anchor: &str, text: &str) -> String {
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" font-size=\"{}\">{}</text>\n",
        x,
        y,
        anchor,
        FONT_SIZE,
        escape_text(text)
    )
}

/// Wall rectangle, empty under the screen-fit layout.
pub fn render_wall(state: &DiagramState) -> String {
    state
        .geometry()
        .wall
        .map(|wall| rect_element(&wall, "wall"))
        .unwrap_or_default()
}

/// Niche, wood backing and screen rectangles.
pub fn render_screen(state: &DiagramState) -> String {
    let geometry = state.geometry();
    let mut svg = String::new();
    if let Some(niche) = &geometry.niche {
        svg.push_str(&rect_element(niche, "niche"));
    }
    svg.push_str(&rect_element(&geometry.screen, "screen"));
    if state.visibility().wood_backing {
        svg.push_str(&rect_element(&geometry.wood_backing, "wood-backing"));
    }
    svg
}

/// Side view column with the depth shown in it.
pub fn render_side_view(state: &DiagramState) -> String {
    let geometry = state.geometry();
    let side = geometry.side_view;
    let depth = state.dimensions().side_view_depth(state.config().is_niche);

    let mut svg = rect_element(&side, "side-view");
    svg.push_str(&text_element(
        side.center().x,
        side.y - LABEL_OFFSET / 2.0,
        "middle",
        &format_inches(depth),
    ));
    svg
}

/// Floor and centre reference lines, each gated by its toggle.
pub fn render_reference_lines(state: &DiagramState) -> String {
    let geometry = state.geometry();
    let visibility = state.visibility();
    let mut svg = String::new();

    if visibility.floor_line {
        svg.push_str(&line_element(
            0.0,
            geometry.floor_line_y,
            geometry.canvas.width,
            geometry.floor_line_y,
            "floor-line",
        ));
    }

    if visibility.centre_line {
        let screen = geometry.screen;
        let center_y = geometry.center.y;
        svg.push_str(&line_element(
            screen.x - LABEL_OFFSET,
            center_y,
            screen.right() + LABEL_OFFSET,
            center_y,
            "centre-line",
        ));
        // Floor distance from the centre line down to the floor
        let x = screen.x - 2.0 * LABEL_OFFSET;
        svg.push_str(&line_element(x, center_y, x, geometry.floor_line_y, "dimension"));
        svg.push_str(&text_element(
            x - 4.0,
            (center_y + geometry.floor_line_y) / 2.0,
            "end",
            &format_inches(geometry.floor_distance),
        ));
    }

    svg
}

/// Receptacle boxes plus, when enabled, their offset from the screen's left
/// and bottom edges.
pub fn render_receptacle_boxes(state: &DiagramState) -> String {
    if !state.visibility().receptacle_box {
        return String::new();
    }
    let screen = state.geometry().screen;
    let mut svg = String::new();

    for b in state.boxes().boxes() {
        let rect = b.rect();
        svg.push_str(&format!(
            "<rect class=\"receptacle-box\" data-box-id=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/>\n",
            b.id, rect.x, rect.y, rect.width, rect.height
        ));

        if !state.visibility().intended_position {
            continue;
        }
        let Some(position) = state.intended_position(b.id) else {
            continue;
        };

        let mid_y = rect.center().y;
        svg.push_str(&line_element(screen.x, mid_y, rect.x, mid_y, "dimension"));
        svg.push_str(&text_element(
            (screen.x + rect.x) / 2.0,
            mid_y - 4.0,
            "middle",
            &format_inches(position.left),
        ));

        let mid_x = rect.center().x;
        svg.push_str(&line_element(mid_x, rect.bottom(), mid_x, screen.bottom(), "dimension"));
        svg.push_str(&text_element(
            mid_x + 4.0,
            (rect.bottom() + screen.bottom()) / 2.0,
            "start",
            &format_inches(position.bottom),
        ));
    }

    svg
}

/// Screen and niche size labels.
pub fn render_dimension_labels(state: &DiagramState) -> String {
    let geometry = state.geometry();
    let dims = state.dimensions();
    let screen = geometry.screen;
    let mut svg = String::new();

    svg.push_str(&text_element(
        screen.center().x,
        screen.y - LABEL_OFFSET / 2.0,
        "middle",
        &format!(
            "{} x {}",
            format_inches(dims.width),
            format_inches(dims.height)
        ),
    ));

    if let Some(niche) = &geometry.niche {
        svg.push_str(&text_element(
            niche.center().x,
            niche.bottom() + LABEL_OFFSET,
            "middle",
            &format!(
                "Niche {} x {} x {}",
                format_inches(dims.niche_width),
                format_inches(dims.niche_height),
                format_inches(dims.niche_depth)
            ),
        ));
    }

    if let Some(spec) = &state.selections().screen {
        if !spec.id.is_empty() {
            svg.push_str(&text_element(
                state.constants().main_view_center_x,
                LABEL_OFFSET * 2.0,
                "middle",
                &spec.id,
            ));
        }
    }

    svg
}

/// Renders the complete SVG document.
pub fn render_document(state: &DiagramState) -> String {
    let canvas = state.geometry().canvas;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" width=\"{}\" height=\"{}\">\n",
        canvas.width, canvas.height, canvas.width, canvas.height
    );
    svg.push_str(concat!(
        "<style>",
        ".wall{fill:#f4f1ea;stroke:#b8b2a4}",
        ".niche{fill:#e2e2e2;stroke:#555;stroke-dasharray:4 2}",
        ".screen{fill:#1d1d1d;stroke:#000}",
        ".wood-backing{fill:none;stroke:#b07a3b;stroke-dasharray:6 3}",
        ".side-view{fill:#8a8a8a;stroke:#000}",
        ".floor-line{stroke:#000;stroke-width:2}",
        ".centre-line{stroke:#d33;stroke-dasharray:8 4}",
        ".receptacle-box{fill:#4a90d9;fill-opacity:.6;stroke:#1f4e80}",
        ".dimension{stroke:#2a7;stroke-width:1}",
        "text{font-family:sans-serif;fill:#222}",
        "</style>\n"
    ));

    svg.push_str(&render_wall(state));
    svg.push_str(&render_screen(state));
    svg.push_str(&render_side_view(state));
    svg.push_str(&render_reference_lines(state));
    svg.push_str(&render_receptacle_boxes(state));
    svg.push_str(&render_dimension_labels(state));
    svg.push_str("</svg>\n");
    svg
}
