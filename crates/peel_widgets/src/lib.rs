//! Peel Widgets
//!
//! A list of image cards where dragging a card right-to-left peels it back
//! like paper to reveal a delete button.
//!
//! - [`store`]: ordered card records keyed by stable id
//! - [`card`]: aspect-fill image content in a rounded rectangle
//! - [`peel`]: the per-card gesture state machine
//! - [`recipe`]: pure layout of the peel layers for one frame
//! - [`list`]: vertical list that routes input and animates removals
//!
//! # Example
//!
//! ```rust
//! use peel_core::{DragSample, GestureEvent, Point, Size};
//! use peel_widgets::prelude::*;
//!
//! let mut list = ListSurface::with_pin_source(
//!     Config::default(),
//!     Size::new(330.0, 600.0),
//!     Box::new(FixedPin(0.5)),
//! );
//! list.populate(sample_records(3));
//! let id = list.store().ids().next().unwrap();
//!
//! list.handle(id, GestureEvent::Drag(DragSample::new(-150.0)));
//! assert_eq!(list.handle(id, GestureEvent::DragEnd), PeelTransition::Expanded { pinned: 0.5 });
//!
//! // Tap the trash button at the trailing edge of the card
//! list.handle(id, GestureEvent::Tap(Point::new(290.0, 65.0)));
//! assert!(!list.store().contains(id));
//! ```

pub mod assets;
pub mod card;
pub mod config;
pub mod error;
pub mod list;
pub mod peel;
pub mod pin;
pub mod recipe;
pub mod store;

pub use error::ConfigError;

/// Commonly used types
pub mod prelude {
    pub use crate::assets::{AssetCatalog, ImageInfo, ImageSource};
    pub use crate::card::CardRenderer;
    pub use crate::config::{Config, ListConfig, PeelConfig};
    pub use crate::list::{CardSlot, ListSurface};
    pub use crate::peel::{PeelController, PeelPhase, PeelState, PeelTransition};
    pub use crate::pin::{FixedPin, PinSource, RandomPin};
    pub use crate::recipe::{compose, PeelHit, PeelRecipe};
    pub use crate::store::{sample_records, CardId, CardRecord, ItemStore};
}
