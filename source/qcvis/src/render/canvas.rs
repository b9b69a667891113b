// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pixel-canvas drawing.
//!
//! [`draw`] turns the layout into a [`Figure`] of shapes positioned in grid
//! units. Gate centres sit at `(column, row) * (1 + margin)`, qubit labels at
//! `x = -2` and wires start at `x = -1`. A figure can be exported as SVG or
//! rasterized to PNG.

#[cfg(test)]
mod tests;

use crate::{CircuitData, Error, GATE_WIDTH, GateCell, GateKind, LayoutCell};
use log::debug;
use resvg::usvg::{self, fontdb};
use std::{
    fmt::Write,
    path::Path,
    sync::{Arc, OnceLock},
};
use tiny_skia::{Pixmap, Transform};

/// Horizontal and vertical gap between neighbouring gate boxes.
pub const GATE_MARGIN: f32 = 0.5;
const PITCH: f32 = GATE_WIDTH + GATE_MARGIN;
const LABEL_X: f32 = -2.0;
const WIRE_START_X: f32 = -1.0;
const TARGET_RADIUS: f32 = 0.4;
const CONTROL_RADIUS: f32 = 0.2;
const SWAP_HALF_WIDTH: f32 = 0.2;
const LABEL_FONT_SIZE: f32 = 0.5;
const GATE_FONT_SIZE: f32 = 0.4;
const FONT_FAMILY: &str = "sans-serif";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color(0xff, 0xff, 0xff);

    fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const WIRE_COLOR: Color = Color::BLACK;
pub const BOX_FILL: Color = Color(0xdd, 0xe8, 0xf6);
pub const BOX_STROKE: Color = Color(0x2c, 0x5d, 0x8f);
pub const CONTROL_COLOR: Color = Color(0xc0, 0x39, 0x2b);
pub const TEXT_COLOR: Color = Color::BLACK;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Rect {
        origin: Point,
        width: f32,
        height: f32,
        fill: Color,
        stroke: Color,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Color,
        stroke: Color,
    },
    Text {
        at: Point,
        text: String,
        size: f32,
        color: Color,
    },
}

/// Drawing order; later layers are painted over earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Wire,
    Connector,
    Gate,
    Glyph,
}

#[derive(Clone, Debug)]
pub struct CanvasConfig {
    /// Pixels per grid unit.
    pub scale: f32,
    /// Stroke width, in pixels.
    pub line_width: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            scale: 40.0,
            line_width: 2.0,
        }
    }
}

/// A drawn circuit: shapes in painting order plus the visible region.
#[derive(Clone, Debug)]
pub struct Figure {
    shapes: Vec<Shape>,
    min: Point,
    max: Point,
    config: CanvasConfig,
}

/// Draws the laid-out circuit onto a new figure.
pub fn draw(data: &CircuitData, config: &CanvasConfig) -> Result<Figure, Error> {
    let mut layers: Vec<(Layer, Shape)> = vec![];
    let mut push = |layer, shape| layers.push((layer, shape));

    #[allow(clippy::cast_precision_loss)]
    let wire_end = data.num_columns() as f32 * PITCH - GATE_MARGIN;

    for (row, cells) in data.rows().iter().enumerate() {
        let y = grid_position(row);
        push(
            Layer::Glyph,
            Shape::Text {
                at: Point::new(LABEL_X, y),
                text: format!("q_{row}"),
                size: LABEL_FONT_SIZE,
                color: TEXT_COLOR,
            },
        );
        push(
            Layer::Wire,
            Shape::Line {
                from: Point::new(WIRE_START_X, y),
                to: Point::new(wire_end, y),
                color: WIRE_COLOR,
            },
        );

        for (column, cell) in cells.iter().enumerate() {
            let LayoutCell::Real(gate) = cell else {
                continue;
            };
            let x = grid_position(column);
            if gate.kind.is_controlled_inversion() {
                if !gate.is_controlled() {
                    return Err(Error::MissingControlRows { row, column });
                }
                draw_controlled_inversion(&mut push, gate, x);
            } else if gate.kind == GateKind::Swap {
                draw_swap(&mut push, gate, x);
            } else {
                draw_box(&mut push, gate, row, x);
                draw_controls(&mut push, gate, x, grid_position(row));
            }
        }
    }

    // Stable sort keeps insertion order within a layer
    layers.sort_by_key(|(layer, _)| *layer);

    #[allow(clippy::cast_precision_loss)]
    let last_row = data.num_rows().saturating_sub(1) as f32;
    Ok(Figure {
        shapes: layers.into_iter().map(|(_, shape)| shape).collect(),
        min: Point::new(LABEL_X - 1.0, -1.0),
        max: Point::new(wire_end.max(0.0) + 1.0, last_row * PITCH + 1.0),
        config: config.clone(),
    })
}

#[allow(clippy::cast_precision_loss)]
fn grid_position(index: usize) -> f32 {
    index as f32 * PITCH
}

/// Label vocabulary for boxed gates on the canvas.
fn canvas_label(kind: GateKind) -> &'static str {
    match kind {
        GateKind::I => "I",
        GateKind::X | GateKind::Cnot => "X",
        GateKind::Y => "Y",
        GateKind::Z | GateKind::Cz => "Z",
        GateKind::H => "H",
        GateKind::S => "S",
        GateKind::Sdag => "S†",
        GateKind::T => "T",
        GateKind::Tdag => "T†",
        GateKind::SqrtX => "√X",
        GateKind::SqrtXdag => "√X†",
        GateKind::SqrtY => "√Y",
        GateKind::SqrtYdag => "√Y†",
        GateKind::Projection0 => "P₀",
        GateKind::Projection1 => "P₁",
        GateKind::U1 => "U₁",
        GateKind::U2 => "U₂",
        GateKind::U3 => "U₃",
        GateKind::XRotation => "Rx",
        GateKind::YRotation => "Ry",
        GateKind::ZRotation => "Rz",
        GateKind::Pauli => "P",
        GateKind::PauliRotation => "Rp",
        GateKind::Swap => "×",
        GateKind::Reflection => "Ref",
        GateKind::ReversibleBoolean => "Rev",
        GateKind::DenseMatrix => "U",
        GateKind::DiagonalMatrix => "D",
        GateKind::SparseMatrix => "Sp",
        GateKind::Generic => "G",
        GateKind::ParametricRx => "pRx",
        GateKind::ParametricRy => "pRy",
        GateKind::ParametricRz => "pRz",
        GateKind::ParametricPauliRotation => "pRp",
    }
}

fn draw_box(push: &mut impl FnMut(Layer, Shape), gate: &GateCell, row: usize, x: f32) {
    let height = gate.span_height(GATE_MARGIN);
    let top = grid_position(row);
    let bottom = grid_position(row + gate.size.max(1) - 1);
    let y = (top + bottom) * 0.5;

    push(
        Layer::Gate,
        Shape::Rect {
            origin: Point::new(x - 0.5 * gate.width, y - 0.5 * height),
            width: gate.width,
            height,
            fill: BOX_FILL,
            stroke: BOX_STROKE,
        },
    );

    let mut text = canvas_label(gate.kind).to_string();
    if !gate.parameters.is_empty() {
        let args = gate
            .parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(&mut text, "({args})");
    }
    push(
        Layer::Glyph,
        Shape::Text {
            at: Point::new(x, y),
            text,
            size: GATE_FONT_SIZE,
            color: TEXT_COLOR,
        },
    );
}

/// Dots on each control row joined to the gate at `(x, y)`.
fn draw_controls(push: &mut impl FnMut(Layer, Shape), gate: &GateCell, x: f32, y: f32) {
    for &control in &gate.control_rows {
        let to_y = grid_position(control);
        push(
            Layer::Connector,
            Shape::Line {
                from: Point::new(x, y),
                to: Point::new(x, to_y),
                color: CONTROL_COLOR,
            },
        );
        push(
            Layer::Gate,
            Shape::Circle {
                center: Point::new(x, to_y),
                radius: CONTROL_RADIUS,
                fill: CONTROL_COLOR,
                stroke: CONTROL_COLOR,
            },
        );
    }
}

fn draw_controlled_inversion(push: &mut impl FnMut(Layer, Shape), gate: &GateCell, x: f32) {
    for &target in &gate.target_rows {
        let y = grid_position(target);
        push(
            Layer::Gate,
            Shape::Circle {
                center: Point::new(x, y),
                radius: TARGET_RADIUS,
                fill: Color::WHITE,
                stroke: BOX_STROKE,
            },
        );
        let r = TARGET_RADIUS * 0.75;
        for (from, to) in [
            (Point::new(x - r, y), Point::new(x + r, y)),
            (Point::new(x, y - r), Point::new(x, y + r)),
        ] {
            push(
                Layer::Glyph,
                Shape::Line {
                    from,
                    to,
                    color: CONTROL_COLOR,
                },
            );
        }
        draw_controls(push, gate, x, y);
    }
}

fn draw_swap(push: &mut impl FnMut(Layer, Shape), gate: &GateCell, x: f32) {
    let (begin, end) = gate.row_span();
    push(
        Layer::Connector,
        Shape::Line {
            from: Point::new(x, grid_position(begin)),
            to: Point::new(x, grid_position(end)),
            color: WIRE_COLOR,
        },
    );

    let d = SWAP_HALF_WIDTH;
    for &target in &gate.target_rows {
        let y = grid_position(target);
        for (from, to) in [
            (Point::new(x - d, y - d), Point::new(x + d, y + d)),
            (Point::new(x - d, y + d), Point::new(x + d, y - d)),
        ] {
            push(
                Layer::Glyph,
                Shape::Line {
                    from,
                    to,
                    color: WIRE_COLOR,
                },
            );
        }
    }

    // The connector above already reaches every control row
    for &control in &gate.control_rows {
        push(
            Layer::Gate,
            Shape::Circle {
                center: Point::new(x, grid_position(control)),
                radius: CONTROL_RADIUS,
                fill: CONTROL_COLOR,
                stroke: CONTROL_COLOR,
            },
        );
    }
}

impl Figure {
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Top-left and bottom-right corners of the visible region, in grid
    /// units.
    #[must_use]
    pub fn bounds(&self) -> (Point, Point) {
        (self.min, self.max)
    }

    /// Size of the rendered image, in pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        let scale = self.config.scale;
        (
            ((self.max.x - self.min.x) * scale).ceil() as u32,
            ((self.max.y - self.min.y) * scale).ceil() as u32,
        )
    }

    fn to_pixels(&self, point: Point) -> (f32, f32) {
        let scale = self.config.scale;
        (
            (point.x - self.min.x) * scale,
            (point.y - self.min.y) * scale,
        )
    }

    /// Writes the figure as an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let (width, height) = self.pixel_size();
        let scale = self.config.scale;
        let stroke_width = self.config.line_width;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

        for shape in &self.shapes {
            let _ = match shape {
                Shape::Line { from, to, color } => {
                    let (x1, y1) = self.to_pixels(*from);
                    let (x2, y2) = self.to_pixels(*to);
                    writeln!(
                        svg,
                        r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                        color.hex()
                    )
                }
                Shape::Rect {
                    origin,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    let (x, y) = self.to_pixels(*origin);
                    writeln!(
                        svg,
                        r#"<rect x="{x}" y="{y}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                        width * scale,
                        height * scale,
                        fill.hex(),
                        stroke.hex()
                    )
                }
                Shape::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    let (cx, cy) = self.to_pixels(*center);
                    writeln!(
                        svg,
                        r#"<circle cx="{cx}" cy="{cy}" r="{}" fill="{}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                        radius * scale,
                        fill.hex(),
                        stroke.hex()
                    )
                }
                Shape::Text {
                    at,
                    text,
                    size,
                    color,
                } => {
                    let (x, y) = self.to_pixels(*at);
                    writeln!(
                        svg,
                        r#"<text x="{x}" y="{y}" font-size="{}" font-family="{FONT_FAMILY}" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text>"#,
                        size * scale,
                        color.hex(),
                        escape_xml(text)
                    )
                }
            };
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Renders the SVG form of the figure, labels included, onto a pixmap.
    ///
    /// Labels use the system fonts; text whose glyphs no installed font
    /// covers is left out.
    pub fn rasterize(&self) -> Result<Pixmap, Error> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(system_fonts());

        let tree = usvg::Tree::from_str(&self.to_svg(), &options)
            .map_err(|err| Error::Raster(format!("failed to parse generated SVG: {err}")))?;

        let (width, height) = self.pixel_size();
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::Raster(format!("failed to allocate {width}x{height} surface"))
        })?;
        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

        Ok(pixmap)
    }

    /// Rasterizes the figure and encodes it as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, Error> {
        self.rasterize()?
            .encode_png()
            .map_err(|err| Error::Raster(format!("failed to encode PNG output: {err}")))
    }

    pub fn save_png(&self, path: &Path) -> Result<(), Error> {
        let png = self.to_png()?;
        std::fs::write(path, png).map_err(Error::io(format!(
            "failed to write `{}`",
            path.display()
        )))
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fonts available to the rasterizer, loaded once per process.
///
/// When the configured sans-serif family is not installed, the first
/// installed family stands in for it.
fn system_fonts() -> &'static Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let query = fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        };
        if db.query(&query).is_none() {
            let fallback = db
                .faces()
                .find_map(|face| face.families.first())
                .map(|(name, _)| name.clone());
            if let Some(family) = fallback {
                debug!("using `{family}` for sans-serif text");
                db.set_sans_serif_family(family);
            }
        }
        debug!("loaded {} font faces", db.len());
        Arc::new(db)
    })
}
