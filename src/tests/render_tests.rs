//! Rendering scenarios: geometry, determinism, dimming, stroke bounds.

use crate::{
    Annotation, BoundingBox, DisplayOptions, ItemRole, Mask, OverlayRenderer, PathCommand,
    Point, Primitive, RectSpec, SelectionContext, Size, Viewport, parse_record, render,
};

const EPSILON: f32 = 0.0001;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn annotation_seven() -> Annotation {
    parse_record(
        r#"{
            "id": 7,
            "bbox": [10, 20, 30, 40],
            "polygon": {"has_segmentation": true, "polygons": [[[10, 20], [40, 20], [40, 60], [10, 60]]]}
        }"#,
    )
    .unwrap()
}

fn boxes_and_masks() -> DisplayOptions {
    DisplayOptions {
        show_bounding_boxes: true,
        ..DisplayOptions::default()
    }
}

fn three_annotations() -> Vec<Annotation> {
    (1..=3)
        .map(|id| {
            let x = id as f32 * 20.0;
            Annotation::new(id)
                .with_bbox(BoundingBox::new(x, 10.0, 10.0, 10.0))
                .with_mask(Mask::new(vec![vec![
                    Point::new(x, 10.0),
                    Point::new(x + 10.0, 10.0),
                    Point::new(x + 10.0, 20.0),
                ]]))
        })
        .collect()
}

#[test]
fn test_annotation_scaled_into_fixed_container() {
    let viewport = Viewport::fit_width(Size::new(100.0, 100.0), 200.0);
    assert_eq!(viewport.surface, Size::new(200.0, 200.0));

    let list = render(
        &[annotation_seven()],
        &viewport,
        &SelectionContext::new(),
        &boxes_and_masks(),
    );

    let mask = list.with_role(ItemRole::Mask).next().unwrap();
    assert_eq!(mask.key, Some(7));
    let Primitive::Path(path) = &mask.primitive else {
        panic!("mask is not a path: {:?}", mask.primitive);
    };
    assert_eq!(
        path.commands(),
        &[
            PathCommand::MoveTo { x: 20.0, y: 40.0 },
            PathCommand::LineTo { x: 80.0, y: 40.0 },
            PathCommand::LineTo { x: 80.0, y: 120.0 },
            PathCommand::LineTo { x: 20.0, y: 120.0 },
            PathCommand::Close,
        ]
    );

    let rect = list.with_role(ItemRole::BoundingBox).next().unwrap();
    assert_eq!(
        rect.primitive,
        Primitive::Rect(RectSpec::new(20.0, 40.0, 60.0, 80.0))
    );

    let svg = list.to_svg();
    assert!(svg.contains(r#"d="M 20 40 L 80 40 L 80 120 L 20 120 Z""#));
    assert!(svg.contains(r#"<rect x="20" y="40" width="60" height="80""#));
    assert!(svg.contains(r#"viewBox="0 0 200 200""#));
}

#[test]
fn test_zoom_pan_moves_whole_overlay() {
    let viewport = Viewport::new(
        Size::new(100.0, 100.0),
        Size::new(400.0, 300.0),
        3.0,
        Point::new(-15.0, 25.0),
    );
    let list = render(
        &[annotation_seven()],
        &viewport,
        &SelectionContext::new(),
        &boxes_and_masks(),
    );

    let rect = list.with_role(ItemRole::BoundingBox).next().unwrap();
    assert_eq!(
        rect.primitive,
        Primitive::Rect(RectSpec::new(15.0, 85.0, 90.0, 120.0))
    );
}

#[test]
fn test_identical_renders_are_identical() {
    let annotations = three_annotations();
    let viewport = Viewport::fit_width(Size::new(100.0, 100.0), 317.0);
    let selection = SelectionContext::new()
        .with_selected([2])
        .with_hovered(Some(3));
    let options = DisplayOptions {
        show_bounding_boxes: true,
        show_labels: true,
        show_selection_indicators: true,
        ..DisplayOptions::default()
    };

    let first = render(&annotations, &viewport, &selection, &options);
    let second = render(&annotations, &viewport, &selection, &options);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.to_svg(), second.to_svg());
}

#[test]
fn test_selecting_one_dims_the_others() {
    let annotations = three_annotations();
    let viewport = Viewport::fit_width(Size::new(100.0, 100.0), 100.0);
    let idle = render(
        &annotations,
        &viewport,
        &SelectionContext::new(),
        &DisplayOptions::default(),
    );
    let selected = render(
        &annotations,
        &viewport,
        &SelectionContext::new().with_selected([2]),
        &DisplayOptions::default(),
    );

    let fill = |list: &crate::DrawList, id| list.for_key(id).find_map(|i| i.fill).unwrap();

    for id in [1, 3] {
        assert!(approx_eq(
            fill(&selected, id).opacity,
            fill(&idle, id).opacity * 0.6
        ));
    }
    assert!(approx_eq(fill(&selected, 2).opacity, 0.35));
    assert!(fill(&selected, 2).opacity > fill(&idle, 2).opacity);
}

#[test]
fn test_stroke_width_stays_in_range_across_zoom() {
    let annotations = three_annotations();
    let options = DisplayOptions::default();
    let base = options.stroke_width;
    let selections = [
        SelectionContext::new(),
        SelectionContext::new().with_selected([1]),
        SelectionContext::new().with_hovered(Some(2)),
        SelectionContext::new().with_pressed(Some(3)),
        SelectionContext::new()
            .with_selected([1, 2])
            .with_hovered(Some(2))
            .with_pressed(Some(1)),
    ];

    for zoom in [0.5, 1.0, 2.0, 4.0] {
        let viewport = Viewport::new(
            Size::new(100.0, 100.0),
            Size::new(100.0 * zoom, 100.0 * zoom),
            zoom,
            Point::new(0.0, 0.0),
        );
        for selection in &selections {
            let list = render(&annotations, &viewport, selection, &options);
            for item in list.items() {
                let width = item.stroke.unwrap().width;
                assert!(
                    (1.5..=base * 2.0).contains(&width),
                    "zoom {} gave width {}",
                    zoom,
                    width
                );
            }
        }
    }
}

#[test]
fn test_colors_follow_position_and_are_repeatable() {
    let annotations = three_annotations();
    let viewport = Viewport::fit_width(Size::new(100.0, 100.0), 100.0);
    let renderer = OverlayRenderer::default();
    let list = renderer.render(
        &annotations,
        &viewport,
        &SelectionContext::new(),
        &DisplayOptions::default(),
    );

    let colors: Vec<_> = list
        .with_role(ItemRole::Mask)
        .map(|item| item.fill.unwrap().color)
        .collect();
    assert_eq!(colors.len(), 3);
    assert_ne!(colors[0], colors[1]);
    assert_ne!(colors[1], colors[2]);
    for (position, color) in colors.iter().enumerate() {
        assert_eq!(*color, renderer.color_of(position, annotations[position].id));
    }
}

#[test]
fn test_glow_filters_declared_once() {
    let annotations = three_annotations();
    let viewport = Viewport::fit_width(Size::new(100.0, 100.0), 100.0);
    let selection = SelectionContext::new()
        .with_selected([1, 2])
        .with_hovered(Some(3));
    let svg = render(&annotations, &viewport, &selection, &DisplayOptions::default()).to_svg();

    assert_eq!(svg.matches(r#"<filter id="selectedGlow""#).count(), 1);
    assert_eq!(svg.matches(r#"<filter id="hoverGlow""#).count(), 1);
    assert_eq!(svg.matches(r#"filter="url(#selectedGlow)""#).count(), 2);
}
