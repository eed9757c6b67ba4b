//! Layer trees are plain data and survive a JSON round trip intact, which is
//! what inspection tools rely on.

use peel_core::{Affine2D, ClipShape, Color, CornerRadius, Layer, LayerProperties, Rect};

#[test]
fn test_layer_tree_json_roundtrip() {
    let tree = Layer::stack(vec![
        Layer::fill(Rect::new(0.0, 8.0, 300.0, 114.0), Color::RED)
            .with_props(LayerProperties::new().with_name("panel")),
        Layer::Image {
            source: "img_1".to_string(),
            rect: Rect::new(0.0, 0.0, 300.0, 130.0),
            source_rect: None,
            props: LayerProperties::new(),
        }
        .transformed(Affine2D::mirror_x(150.0))
        .clipped(ClipShape::RoundedRect {
            rect: Rect::new(0.0, 0.0, 150.0, 130.0),
            corner_radius: CornerRadius::uniform(10.0),
        })
        .with_props(LayerProperties::new().passthrough()),
    ]);

    let json = serde_json::to_string(&tree).unwrap();
    let back: Layer = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_gesture_event_types_are_distinct() {
    use peel_core::events::event_types;
    use peel_core::{DragSample, GestureEvent, Point, Size};

    let events = [
        GestureEvent::from(DragSample::new(-10.0)),
        GestureEvent::DragEnd,
        GestureEvent::Tap(Point::ZERO),
        GestureEvent::Resize(Size::new(1.0, 1.0)),
    ];
    let types: Vec<_> = events.iter().map(GestureEvent::event_type).collect();
    assert_eq!(
        types,
        vec![
            event_types::DRAG,
            event_types::DRAG_END,
            event_types::TAP,
            event_types::RESIZE
        ]
    );
}
