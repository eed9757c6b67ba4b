//! Layer model for peel compositions
//!
//! Every frame of a card is described as a tree of [`Layer`]s that a host
//! toolkit turns into draw calls. The tree is plain data: it can be built in
//! tests, inspected, serialized, and hit-tested without a renderer.
//!
//! # Layer Types
//!
//! - **Primitives**: filled rectangles, images, and icons
//! - **Composition**: Stack, Transform, Clip, Opacity layers

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Core Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either axis has no extent
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

impl From<Size> for Rect {
    /// Convert Size to Rect at origin (0, 0)
    fn from(size: Size) -> Self {
        Rect {
            origin: Point::ZERO,
            size,
        }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.max_x()
            && point.y >= self.origin.y
            && point.y <= self.max_y()
    }

    /// Get the size of this rect
    pub fn size(&self) -> Size {
        self.size
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Inset the rect by a delta (shrink from all sides)
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: Size::new(
                (self.size.width - 2.0 * dx).max(0.0),
                (self.size.height - 2.0 * dy).max(0.0),
            ),
        }
    }

    /// Overlapping region of two rects, empty (zero-sized) when disjoint
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        if x1 <= x0 || y1 <= y0 {
            return Rect::new(x0, y0, 0.0, 0.0);
        }
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Mirror across the vertical line `x = axis_x`
    pub fn mirror_x(axis_x: f32) -> Self {
        Self::translation(axis_x, 0.0)
            .then(&Self::scale(-1.0, 1.0))
            .then(&Self::translation(-axis_x, 0.0))
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    /// Inverse transform, or `None` when the matrix is singular
    pub fn inverse(&self) -> Option<Affine2D> {
        let [a, b, c, d, tx, ty] = self.elements;
        let det = a * d - b * c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        let (ia, ib, ic, id) = (d * inv, -b * inv, -c * inv, a * inv);
        Some(Affine2D {
            elements: [ia, ib, ic, id, -(ia * tx + ic * ty), -(ib * tx + id * ty)],
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color and Visual Types
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient between two points in layer space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<GradientStop>,
}

/// Brush for filling shapes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Brush {
    Solid(Color),
    Gradient(Gradient),
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

/// Corner radii for rounded rectangles
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}

/// Shadow configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset_x: f32, offset_y: f32, blur: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            color,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer Properties
// ─────────────────────────────────────────────────────────────────────────────

/// Pointer event behavior
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvents {
    /// Normal hit testing
    #[default]
    Auto,
    /// Transparent to input, including all children
    None,
}

/// Properties common to all layers
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerProperties {
    /// Visibility (skips render and hit testing when false)
    pub visible: bool,

    /// Pointer event behavior
    pub pointer_events: PointerEvents,

    /// Optional name, used by hosts to identify interactive layers
    pub name: Option<String>,
}

impl LayerProperties {
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Make the layer (and its children) invisible to hit testing
    pub fn passthrough(mut self) -> Self {
        self.pointer_events = PointerEvents::None;
        self
    }
}

/// Shape used for clipping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClipShape {
    Rect(Rect),
    RoundedRect {
        rect: Rect,
        corner_radius: CornerRadius,
    },
}

impl ClipShape {
    /// Bounding rect of the shape
    pub fn bounds(&self) -> Rect {
        match self {
            ClipShape::Rect(rect) => *rect,
            ClipShape::RoundedRect { rect, .. } => *rect,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer Enum
// ─────────────────────────────────────────────────────────────────────────────

/// All visual content is represented as a `Layer`.
///
/// Composition layers wrap other layers; primitives are leaves. Stacks draw
/// their children back-to-front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Layer {
    /// Filled (optionally rounded and shadowed) rectangle
    Fill {
        rect: Rect,
        brush: Brush,
        corner_radius: CornerRadius,
        shadow: Option<Shadow>,
        props: LayerProperties,
    },

    /// Image drawn into `rect`, sampling `source_rect` of the image in
    /// image pixel space (the whole image when `None`)
    Image {
        source: String,
        rect: Rect,
        source_rect: Option<Rect>,
        props: LayerProperties,
    },

    /// Named symbol glyph (e.g. "trash")
    Icon {
        symbol: String,
        rect: Rect,
        color: Color,
        props: LayerProperties,
    },

    /// Stack of layers composited together
    Stack {
        layers: Vec<Layer>,
        props: LayerProperties,
    },

    /// 2D transform applied to a layer
    Transform2D {
        transform: Affine2D,
        layer: Box<Layer>,
        props: LayerProperties,
    },

    /// Clip mask applied to a layer
    Clip {
        shape: ClipShape,
        layer: Box<Layer>,
        props: LayerProperties,
    },

    /// Opacity applied to a layer
    Opacity {
        value: f32,
        layer: Box<Layer>,
        props: LayerProperties,
    },

    /// Empty layer (useful as placeholder)
    Empty { props: LayerProperties },
}

impl Layer {
    /// Get the layer properties
    pub fn props(&self) -> &LayerProperties {
        match self {
            Layer::Fill { props, .. } => props,
            Layer::Image { props, .. } => props,
            Layer::Icon { props, .. } => props,
            Layer::Stack { props, .. } => props,
            Layer::Transform2D { props, .. } => props,
            Layer::Clip { props, .. } => props,
            Layer::Opacity { props, .. } => props,
            Layer::Empty { props } => props,
        }
    }

    /// Get mutable layer properties
    pub fn props_mut(&mut self) -> &mut LayerProperties {
        match self {
            Layer::Fill { props, .. } => props,
            Layer::Image { props, .. } => props,
            Layer::Icon { props, .. } => props,
            Layer::Stack { props, .. } => props,
            Layer::Transform2D { props, .. } => props,
            Layer::Clip { props, .. } => props,
            Layer::Opacity { props, .. } => props,
            Layer::Empty { props } => props,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.props().name.as_deref()
    }

    /// Replace this layer's properties
    pub fn with_props(mut self, props: LayerProperties) -> Self {
        *self.props_mut() = props;
        self
    }

    pub fn empty() -> Self {
        Layer::Empty {
            props: LayerProperties::new(),
        }
    }

    pub fn fill(rect: Rect, brush: impl Into<Brush>) -> Self {
        Layer::Fill {
            rect,
            brush: brush.into(),
            corner_radius: CornerRadius::ZERO,
            shadow: None,
            props: LayerProperties::new(),
        }
    }

    pub fn stack(layers: Vec<Layer>) -> Self {
        Layer::Stack {
            layers,
            props: LayerProperties::new(),
        }
    }

    pub fn transformed(self, transform: Affine2D) -> Self {
        Layer::Transform2D {
            transform,
            layer: Box::new(self),
            props: LayerProperties::new(),
        }
    }

    pub fn clipped(self, shape: ClipShape) -> Self {
        Layer::Clip {
            shape,
            layer: Box::new(self),
            props: LayerProperties::new(),
        }
    }

    pub fn with_opacity(self, value: f32) -> Self {
        Layer::Opacity {
            value: value.clamp(0.0, 1.0),
            layer: Box::new(self),
            props: LayerProperties::new(),
        }
    }

    /// Child layers, back-to-front
    pub fn children(&self) -> &[Layer] {
        match self {
            Layer::Stack { layers, .. } => layers,
            Layer::Transform2D { layer, .. }
            | Layer::Clip { layer, .. }
            | Layer::Opacity { layer, .. } => std::slice::from_ref(layer.as_ref()),
            _ => &[],
        }
    }

    /// Depth-first search for the first layer with the given name
    pub fn find(&self, name: &str) -> Option<&Layer> {
        if self.name() == Some(name) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    /// Topmost hit-testable primitive under `point`.
    ///
    /// Hidden layers and `PointerEvents::None` subtrees never hit. Stacks are
    /// searched front-to-back; clips reject points outside their shape.
    pub fn hit_test(&self, point: Point) -> Option<&Layer> {
        let props = self.props();
        if !props.visible || props.pointer_events == PointerEvents::None {
            return None;
        }

        match self {
            Layer::Fill { rect, .. } | Layer::Image { rect, .. } | Layer::Icon { rect, .. } => {
                rect.contains(point).then_some(self)
            }
            Layer::Stack { layers, .. } => layers.iter().rev().find_map(|l| l.hit_test(point)),
            Layer::Transform2D {
                transform, layer, ..
            } => {
                let local = transform.inverse()?.transform_point(point);
                layer.hit_test(local)
            }
            Layer::Clip { shape, layer, .. } => {
                if !shape.bounds().contains(point) {
                    tracing::trace!("hit at ({}, {}) rejected by clip", point.x, point.y);
                    return None;
                }
                layer.hit_test(point)
            }
            Layer::Opacity { layer, .. } => layer.hit_test(point),
            Layer::Empty { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(60.0, 10.0, 100.0, 100.0);
        assert_eq!(a.intersect(&b), Rect::new(60.0, 10.0, 40.0, 40.0));

        let disjoint = Rect::new(200.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersect(&disjoint).size, Size::ZERO);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(10.0, 10.0).is_empty());
    }

    #[test]
    fn test_mirror_x() {
        let mirror = Affine2D::mirror_x(50.0);
        assert_eq!(mirror.transform_point(Point::new(0.0, 3.0)), Point::new(100.0, 3.0));
        assert_eq!(mirror.transform_point(Point::new(50.0, 0.0)), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_affine_inverse_roundtrip() {
        let t = Affine2D::translation(10.0, -4.0).then(&Affine2D::scale(-1.0, 2.0));
        let inv = t.inverse().unwrap();
        let p = Point::new(3.0, 7.0);
        let back = inv.transform_point(t.transform_point(p));
        assert!((back.x - p.x).abs() < 1e-5);
        assert!((back.y - p.y).abs() < 1e-5);

        assert!(Affine2D::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let tree = Layer::stack(vec![
            Layer::fill(Rect::new(0.0, 0.0, 100.0, 100.0), Color::RED)
                .with_props(LayerProperties::new().with_name("back")),
            Layer::fill(Rect::new(50.0, 0.0, 50.0, 100.0), Color::WHITE)
                .with_props(LayerProperties::new().with_name("front")),
        ]);

        assert_eq!(tree.hit_test(Point::new(75.0, 10.0)).and_then(Layer::name), Some("front"));
        assert_eq!(tree.hit_test(Point::new(25.0, 10.0)).and_then(Layer::name), Some("back"));
        assert!(tree.hit_test(Point::new(150.0, 10.0)).is_none());
    }

    #[test]
    fn test_hit_test_skips_passthrough() {
        let tree = Layer::stack(vec![
            Layer::fill(Rect::new(0.0, 0.0, 100.0, 100.0), Color::RED)
                .with_props(LayerProperties::new().with_name("button")),
            Layer::stack(vec![Layer::fill(
                Rect::new(0.0, 0.0, 100.0, 100.0),
                Color::WHITE,
            )])
            .with_props(LayerProperties::new().passthrough()),
        ]);

        assert_eq!(tree.hit_test(Point::new(10.0, 10.0)).and_then(Layer::name), Some("button"));
    }

    #[test]
    fn test_hit_test_through_transform_and_clip() {
        let inner = Layer::fill(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED)
            .with_props(LayerProperties::new().with_name("target"));
        let tree = inner
            .transformed(Affine2D::translation(100.0, 0.0))
            .clipped(ClipShape::Rect(Rect::new(100.0, 0.0, 5.0, 10.0)));

        assert!(tree.hit_test(Point::new(103.0, 5.0)).is_some());
        // Inside the transformed fill but outside the clip
        assert!(tree.hit_test(Point::new(108.0, 5.0)).is_none());
    }

    #[test]
    fn test_hidden_layer_never_hits() {
        let tree = Layer::fill(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED)
            .with_props(LayerProperties::new().hidden());
        assert!(tree.hit_test(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0.0, 0.0, 300.0, 130.0);
        assert_eq!(rect.inset(0.0, 8.0), Rect::new(0.0, 8.0, 300.0, 114.0));
        assert_eq!(rect.inset(0.0, 100.0).height(), 0.0);
    }

    #[test]
    fn test_find_by_name() {
        let tree = Layer::stack(vec![Layer::empty()
            .with_props(LayerProperties::new().with_name("marker"))
            .with_opacity(0.5)]);
        assert!(tree.find("marker").is_some());
        assert!(tree.find("missing").is_none());
    }
}
