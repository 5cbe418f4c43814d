//! Fetched records through to rendered output.

use crate::{
    DisplayOptions, ItemRole, OverlayConfig, Primitive, SelectionContext, Size, Viewport,
    parse_records,
};

const FETCHED: &str = r#"{
    "annotations": [
        {"id": 1, "bbox": [5, 5, 10, 10], "score": 0.42, "status": "PENDING",
         "polygon": {"has_segmentation": true, "polygons": [[[5, 5], [15, 5]], [[5, 5], [15, 5], [15, 15]]]}},
        {"id": 2, "bbox": [30, 30, 10],
         "polygon": {"has_segmentation": true, "polygons": [[[30, 30], [40, 30], [40, 40], [30, 40]]]}},
        {"id": 3, "bbox": [60, 60, 20, 20],
         "polygon": {"has_segmentation": false, "polygons": []}}
    ]
}"#;

#[test]
fn test_degenerate_input_degrades_per_annotation() {
    let annotations = parse_records(FETCHED).unwrap();
    let viewport = Viewport::fit_width(Size::new(100.0, 100.0), 100.0);
    let options = DisplayOptions {
        show_bounding_boxes: true,
        show_labels: true,
        ..DisplayOptions::default()
    };
    let list = crate::render(&annotations, &viewport, &SelectionContext::new(), &options);

    // Annotation 1: the two-point polygon is skipped, the triangle kept
    assert_eq!(
        list.for_key(1).filter(|i| i.role == ItemRole::Mask).count(),
        1
    );
    // Annotation 2: malformed bbox, so a mask but no box or label
    assert_eq!(list.for_key(2).count(), 1);
    // Annotation 3: no segmentation, box and label only
    let roles: Vec<_> = list.for_key(3).map(|i| i.role).collect();
    assert_eq!(
        roles,
        vec![
            ItemRole::BoundingBox,
            ItemRole::LabelBackground,
            ItemRole::LabelText
        ]
    );
}

#[test]
fn test_scores_and_config_driven_render() {
    let annotations = parse_records(FETCHED).unwrap();
    let config = OverlayConfig::from_json(
        r#"{"color_policy": "role", "display": {"showScores": true, "showBoundingBoxes": true}}"#,
    )
    .unwrap();
    let renderer = config.renderer().unwrap();
    let viewport = Viewport::fit_width(Size::new(100.0, 100.0), 200.0);
    let selection = SelectionContext::new().with_selected([1]);

    let list = renderer.render(&annotations, &viewport, &selection, &config.display);
    let badge_text = list
        .with_role(ItemRole::ScoreText)
        .find_map(|item| match &item.primitive {
            Primitive::Text(text) => Some(text.content.clone()),
            _ => None,
        });
    assert_eq!(badge_text.as_deref(), Some("42"));

    let badge = list.with_role(ItemRole::ScoreBadge).next().unwrap();
    match &badge.primitive {
        Primitive::Circle(circle) => assert_eq!((circle.cx, circle.cy, circle.r), (20.0, 20.0, 12.0)),
        other => panic!("badge is not a circle: {:?}", other),
    }

    // Role policy without a focus paints everything in the shared color
    let fills: Vec<_> = list
        .with_role(ItemRole::Mask)
        .map(|item| item.fill.unwrap().color)
        .collect();
    assert!(fills.windows(2).all(|pair| pair[0] == pair[1]));
}
