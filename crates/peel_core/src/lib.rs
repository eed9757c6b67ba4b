//! Peel Core
//!
//! Foundational types shared by the peel crates:
//!
//! - **Layer Model**: geometry, colors, and a serializable layer tree that a
//!   host toolkit turns into draw calls
//! - **Gesture Events**: the drag/tap/resize signals a card reacts to
//!
//! # Example
//!
//! ```rust
//! use peel_core::{Color, Layer, LayerProperties, Point, Rect};
//!
//! let button = Layer::fill(Rect::new(0.0, 0.0, 40.0, 40.0), Color::RED)
//!     .with_props(LayerProperties::new().with_name("delete"));
//! let tree = Layer::stack(vec![button]);
//!
//! let hit = tree.hit_test(Point::new(10.0, 10.0));
//! assert_eq!(hit.and_then(Layer::name), Some("delete"));
//! ```

pub mod events;
pub mod layer;

pub use events::{DragSample, EventType, GestureEvent};
pub use layer::{
    Affine2D, Brush, ClipShape, Color, CornerRadius, Gradient, GradientStop, Layer,
    LayerProperties, Point, PointerEvents, Rect, Shadow, Size,
};
