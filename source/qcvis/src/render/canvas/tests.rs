// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;
use crate::{GateDescriptor, layout};

fn gate(kind: GateKind, targets: &[usize]) -> GateDescriptor {
    GateDescriptor::new(kind, targets.to_vec(), vec![], vec![])
}

fn controlled(kind: GateKind, targets: &[usize], controls: &[usize]) -> GateDescriptor {
    GateDescriptor::new(kind, targets.to_vec(), controls.to_vec(), vec![])
}

fn figure(descriptors: &[GateDescriptor], num_qubits: usize) -> Figure {
    let data = layout(descriptors, num_qubits).expect("layout should succeed");
    draw(&data, &CanvasConfig::default()).expect("drawing should succeed")
}

fn rects(figure: &Figure) -> Vec<(Point, f32, f32)> {
    figure
        .shapes()
        .iter()
        .filter_map(|shape| match shape {
            Shape::Rect {
                origin,
                width,
                height,
                ..
            } => Some((*origin, *width, *height)),
            _ => None,
        })
        .collect()
}

fn circles(figure: &Figure) -> Vec<(Point, f32)> {
    figure
        .shapes()
        .iter()
        .filter_map(|shape| match shape {
            Shape::Circle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
        .collect()
}

fn texts(figure: &Figure) -> Vec<&str> {
    figure
        .shapes()
        .iter()
        .filter_map(|shape| match shape {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn boxes_are_centred_on_grid_positions() {
    let figure = figure(
        &[
            gate(GateKind::H, &[0]),
            gate(GateKind::X, &[1]),
            gate(GateKind::T, &[0]),
        ],
        2,
    );

    assert_eq!(
        rects(&figure),
        vec![
            (Point::new(-0.5, -0.5), 1.0, 1.0),
            (Point::new(1.0, -0.5), 1.0, 1.0),
            (Point::new(-0.5, 1.0), 1.0, 1.0),
        ]
    );
}

#[test]
fn wires_and_labels_cover_every_row() {
    let figure = figure(&[gate(GateKind::H, &[0]), gate(GateKind::H, &[0])], 2);

    let wires: Vec<_> = figure
        .shapes()
        .iter()
        .filter_map(|shape| match shape {
            Shape::Line { from, to, color } if *color == WIRE_COLOR => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        wires,
        vec![
            (Point::new(-1.0, 0.0), Point::new(2.5, 0.0)),
            (Point::new(-1.0, 1.5), Point::new(2.5, 1.5)),
        ]
    );
    assert_eq!(texts(&figure), vec!["q_0", "H", "H", "q_1"]);
}

#[test]
fn wires_are_painted_before_gates() {
    let figure = figure(&[controlled(GateKind::Z, &[1], &[0])], 2);
    let shapes = figure.shapes();
    let first_gate = shapes
        .iter()
        .position(|shape| matches!(shape, Shape::Rect { .. } | Shape::Circle { .. }))
        .expect("figure should contain a gate");
    assert!(
        shapes[first_gate..]
            .iter()
            .all(|shape| !matches!(shape, Shape::Line { color, .. } if *color == WIRE_COLOR))
    );
    assert!(matches!(shapes.last(), Some(Shape::Text { .. })));
}

#[test]
fn multi_row_gate_box_spans_its_rows() {
    let figure = figure(
        &[
            gate(GateKind::X, &[1]),
            gate(GateKind::DenseMatrix, &[0, 1, 2]),
        ],
        3,
    );

    let boxes = rects(&figure);
    assert_eq!(boxes.len(), 2);
    assert!(boxes.contains(&(Point::new(1.0, -0.5), 1.0, 4.0)));
    assert!(texts(&figure).contains(&"U"));
}

#[test]
fn controlled_inversion_draws_target_and_control_dot() {
    let figure = figure(&[controlled(GateKind::Cnot, &[0], &[2])], 3);

    assert!(rects(&figure).is_empty());
    assert_eq!(
        circles(&figure),
        vec![
            (Point::new(0.0, 0.0), TARGET_RADIUS),
            (Point::new(0.0, 3.0), CONTROL_RADIUS),
        ]
    );
    assert!(figure.shapes().contains(&Shape::Line {
        from: Point::new(0.0, 0.0),
        to: Point::new(0.0, 3.0),
        color: CONTROL_COLOR,
    }));
}

#[test]
fn controlled_inversion_without_controls_is_rejected() {
    let data = layout(&[gate(GateKind::H, &[0]), gate(GateKind::Cnot, &[1])], 2)
        .expect("layout should succeed");

    let err = draw(&data, &CanvasConfig::default()).expect_err("drawing should fail");
    assert!(matches!(
        err,
        Error::MissingControlRows { row: 1, column: 0 }
    ));
}

#[test]
fn controlled_box_gets_control_dots() {
    let figure = figure(&[controlled(GateKind::Z, &[1], &[0])], 2);

    assert_eq!(rects(&figure), vec![(Point::new(-0.5, 1.0), 1.0, 1.0)]);
    assert_eq!(
        circles(&figure),
        vec![(Point::new(0.0, 0.0), CONTROL_RADIUS)]
    );
}

#[test]
fn swap_draws_crosses_joined_by_a_line() {
    let figure = figure(&[gate(GateKind::Swap, &[0, 2])], 3);

    assert!(rects(&figure).is_empty());
    let lines = figure
        .shapes()
        .iter()
        .filter(|shape| matches!(shape, Shape::Line { .. }))
        .count();
    // Three wires, one connector and two strokes per crossed target
    assert_eq!(lines, 3 + 1 + 4);
    assert!(figure.shapes().contains(&Shape::Line {
        from: Point::new(0.0, 0.0),
        to: Point::new(0.0, 3.0),
        color: WIRE_COLOR,
    }));
}

#[test]
fn controlled_swap_gets_control_dots() {
    let figure = figure(&[controlled(GateKind::Swap, &[0, 1], &[2])], 3);

    assert_eq!(
        circles(&figure),
        vec![(Point::new(0.0, 3.0), CONTROL_RADIUS)]
    );
    assert!(figure.shapes().contains(&Shape::Line {
        from: Point::new(0.0, 0.0),
        to: Point::new(0.0, 3.0),
        color: WIRE_COLOR,
    }));
}

#[test]
fn parameters_are_appended_to_box_label() {
    let data = layout(
        &[GateDescriptor::new(
            GateKind::XRotation,
            vec![0],
            vec![],
            vec![0.5.into()],
        )],
        1,
    )
    .expect("layout should succeed");
    let figure = draw(&data, &CanvasConfig::default()).expect("drawing should succeed");
    assert!(texts(&figure).contains(&"Rx(0.5000)"));
}

#[test]
fn bounds_fit_rows_and_columns() {
    let figure = figure(&[gate(GateKind::H, &[0]), gate(GateKind::H, &[1])], 3);
    let (min, max) = figure.bounds();
    assert_eq!(min, Point::new(-3.0, -1.0));
    assert_eq!(max, Point::new(2.0, 4.0));
    assert_eq!(figure.pixel_size(), (200, 200));
}

#[test]
fn svg_contains_every_shape() {
    let figure = figure(&[controlled(GateKind::Cnot, &[1], &[0]), gate(GateKind::H, &[0])], 2);
    let svg = figure.to_svg();

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.ends_with("</svg>\n"));
    // Background plus the H box
    assert_eq!(svg.matches("<rect").count(), 2);
    assert_eq!(svg.matches("<circle").count(), 2);
    assert!(svg.contains(">q_1</text>"));
    assert!(svg.contains(r#"font-family="sans-serif""#));
}

#[test]
fn svg_escapes_text() {
    assert_eq!(escape_xml("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
}

#[test]
fn rasterized_box_is_filled() {
    let figure = figure(&[gate(GateKind::H, &[0])], 1);
    let pixmap = figure.rasterize().expect("rasterization should succeed");
    assert_eq!((pixmap.width(), pixmap.height()), figure.pixel_size());

    let rgb = |x, y| {
        pixmap
            .pixel(x, y)
            .map(|c| (c.red(), c.green(), c.blue()))
            .expect("pixel should be inside the image")
    };
    // The box spans pixels 100..140 by 20..60; sample inside its top-left
    // corner, clear of the border and the centred label
    assert_eq!(rgb(104, 24), (BOX_FILL.0, BOX_FILL.1, BOX_FILL.2));
    assert_eq!(rgb(5, 5), (0xff, 0xff, 0xff));
}

#[test]
fn rasterized_labels_depend_on_gate_kind() {
    if system_fonts().is_empty() {
        return;
    }

    let h = figure(&[gate(GateKind::H, &[0])], 1)
        .rasterize()
        .expect("rasterization should succeed");
    let dense = figure(&[gate(GateKind::DenseMatrix, &[0])], 1)
        .rasterize()
        .expect("rasterization should succeed");

    assert_eq!((h.width(), h.height()), (dense.width(), dense.height()));
    assert_ne!(h.data(), dense.data());
}

#[test]
fn png_output_has_signature() {
    let figure = figure(&[gate(GateKind::H, &[0])], 1);
    let png = figure.to_png().expect("encoding should succeed");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn save_png_writes_file() {
    let dir = tempfile::tempdir().expect("temporary directory should be created");
    let path = dir.path().join("circuit.png");
    figure(&[gate(GateKind::H, &[0])], 1)
        .save_png(&path)
        .expect("saving should succeed");
    let bytes = std::fs::read(&path).expect("file should exist");
    assert!(bytes.starts_with(b"\x89PNG"));
}
