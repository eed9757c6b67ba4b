//! List surface
//!
//! Stacks peelable cards vertically, routes gestures to the card under the
//! pointer, and removes a record when its card commits a delete. Removed cards
//! leave a collapsing slot behind whose height springs to zero, so the cards
//! below slide up instead of jumping.
//!
//! Controllers live in a map keyed by [`CardId`]; nothing is tracked by list
//! position.

use crate::assets::ImageSource;
use crate::card::CardRenderer;
use crate::config::Config;
use crate::peel::{PeelController, PeelTransition};
use crate::pin::{PinSource, RandomPin};
use crate::store::{CardId, CardRecord, ItemStore};
use peel_animation::{AnimationScheduler, Easing, Spring, SpringId};
use peel_core::{
    Affine2D, ClipShape, Color, DragSample, GestureEvent, Layer, LayerProperties, Point, Rect,
    Size,
};
use rustc_hash::FxHashMap;

/// Name of the placeholder layer shown before the first population
pub const LOADING_LAYER: &str = "list.loading";

/// A removed card still animating out
struct Collapse {
    record: CardRecord,
    /// Record the slot sits in front of; `None` for the end of the list
    before: Option<CardId>,
    height: SpringId,
}

/// One laid-out row, in content coordinates (before scrolling)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardSlot {
    pub id: CardId,
    pub frame: Rect,
    /// True for a removed card that is collapsing
    pub collapsing: bool,
}

/// Vertical list of peelable cards
pub struct ListSurface {
    config: Config,
    store: ItemStore,
    controllers: FxHashMap<CardId, PeelController>,
    collapses: Vec<Collapse>,
    scheduler: AnimationScheduler,
    pins: Box<dyn PinSource>,
    renderer: CardRenderer,
    viewport: Size,
    scroll_offset: f32,
    loaded: bool,
    /// Card receiving the current drag gesture
    active: Option<CardId>,
}

impl ListSurface {
    pub fn new(config: Config, viewport: Size) -> Self {
        Self::with_pin_source(config, viewport, Box::new(RandomPin::from_entropy()))
    }

    /// Surface drawing expansion pins from `pins`
    pub fn with_pin_source(config: Config, viewport: Size, pins: Box<dyn PinSource>) -> Self {
        Self {
            renderer: CardRenderer::new(config.peel.card_corner_radius),
            config,
            store: ItemStore::new(),
            controllers: FxHashMap::default(),
            collapses: Vec::new(),
            scheduler: AnimationScheduler::new(),
            pins,
            viewport,
            scroll_offset: 0.0,
            loaded: false,
            active: None,
        }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn controller(&self, id: CardId) -> Option<&PeelController> {
        self.controllers.get(&id)
    }

    /// True until the first population arrives
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Size every card is laid out at
    pub fn card_size(&self) -> Size {
        let list = &self.config.list;
        Size::new(
            (self.viewport.width - 2.0 * list.padding).max(0.0),
            list.card_height,
        )
    }

    /// Add records from the data loader. The first call leaves the loading
    /// state for good, even when it delivers nothing.
    pub fn populate(&mut self, records: impl IntoIterator<Item = CardRecord>) {
        if !self.loaded {
            tracing::debug!("list loaded");
        }
        self.loaded = true;
        for record in records {
            self.insert(record);
        }
    }

    /// Append one card
    pub fn append(&mut self, image_ref: impl Into<String>) -> CardId {
        let record = CardRecord::new(image_ref);
        let id = record.id;
        self.populate([record]);
        id
    }

    fn insert(&mut self, record: CardRecord) {
        let id = record.id;
        if self.store.insert(record) {
            let controller = PeelController::new(self.config.peel, self.card_size());
            self.controllers.insert(id, controller);
        }
    }

    /// Resize the viewport; cards are re-measured and scroll is re-clamped
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        let card_size = self.card_size();
        for controller in self.controllers.values_mut() {
            controller.set_size(card_size);
        }
        self.scroll_by(0.0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    fn collapse_height(&self, collapse: &Collapse) -> f32 {
        self.scheduler
            .value(collapse.height)
            .unwrap_or(0.0)
            .clamp(0.0, self.config.list.card_height)
    }

    /// Rows in display order, collapsing slots included
    pub fn layout(&self) -> Vec<CardSlot> {
        let list = &self.config.list;
        let width = self.card_size().width;
        let mut slots = Vec::with_capacity(self.store.len() + self.collapses.len());
        let mut y = list.padding;

        let mut push = |slots: &mut Vec<CardSlot>, id: CardId, height: f32, collapsing: bool| {
            slots.push(CardSlot {
                id,
                frame: Rect::new(list.padding, y, width, height),
                collapsing,
            });
            // A collapsing slot gives up its spacing along with its height
            y += height + list.spacing * (height / list.card_height);
        };

        let ids = self.store.ids().map(Some).chain(std::iter::once(None));
        for next in ids {
            for collapse in self.collapses.iter().filter(|c| c.before == next) {
                push(&mut slots, collapse.record.id, self.collapse_height(collapse), true);
            }
            if let Some(id) = next {
                push(&mut slots, id, list.card_height, false);
            }
        }

        slots
    }

    /// Total scrollable height
    pub fn content_height(&self) -> f32 {
        let list = &self.config.list;
        match self.layout().last() {
            // Trailing spacing of the last row is replaced by padding
            Some(slot) => slot.frame.max_y() + list.padding,
            None => 2.0 * list.padding,
        }
    }

    /// Scroll by `dy` (positive moves content up), clamped to the content
    pub fn scroll_by(&mut self, dy: f32) {
        let max = (self.content_height() - self.viewport.height).max(0.0);
        self.scroll_offset = (self.scroll_offset + dy).clamp(0.0, max);
    }

    /// Card under a viewport point, with the point in card-local coordinates
    pub fn card_at(&self, point: Point) -> Option<(CardId, Point)> {
        let content = Point::new(point.x, point.y + self.scroll_offset);
        self.layout()
            .into_iter()
            .filter(|slot| !slot.collapsing)
            .find(|slot| slot.frame.contains(content))
            .map(|slot| {
                let local = Point::new(content.x - slot.frame.x(), content.y - slot.frame.y());
                (slot.id, local)
            })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    /// Pointer down at a viewport point. Starts a gesture on the card under
    /// it; refused while another gesture is active.
    pub fn press(&mut self, point: Point) -> Option<CardId> {
        if self.active.is_some() {
            tracing::trace!("press ignored, gesture already active");
            return None;
        }
        let (id, _) = self.card_at(point)?;
        let accepts = self
            .controllers
            .get(&id)
            .is_some_and(PeelController::accepts_drag);
        if !accepts {
            return None;
        }
        self.active = Some(id);
        Some(id)
    }

    /// Drag sample for the active gesture
    pub fn drag(&mut self, translation_x: f32) -> PeelTransition {
        match self.active {
            Some(id) => self.handle(id, GestureEvent::Drag(DragSample::new(translation_x))),
            None => PeelTransition::Ignored,
        }
    }

    /// End the active gesture
    pub fn release(&mut self) -> PeelTransition {
        match self.active.take() {
            Some(id) => self.handle(id, GestureEvent::DragEnd),
            None => PeelTransition::Ignored,
        }
    }

    /// Tap at a viewport point
    pub fn tap(&mut self, point: Point) -> PeelTransition {
        match self.card_at(point) {
            Some((id, local)) => self.handle(id, GestureEvent::Tap(local)),
            None => PeelTransition::Ignored,
        }
    }

    /// Feed an event to a card by id. A commit removes the record.
    pub fn handle(&mut self, id: CardId, event: GestureEvent) -> PeelTransition {
        let Some(controller) = self.controllers.get_mut(&id) else {
            tracing::trace!(%id, "event for unknown card ignored");
            return PeelTransition::Ignored;
        };
        let transition = controller.handle(event, self.pins.as_mut());
        if transition == PeelTransition::Commit {
            self.remove(id);
        }
        transition
    }

    fn remove(&mut self, id: CardId) {
        let before = self.store.next_after(id);
        let Some(record) = self.store.remove(id) else {
            return;
        };
        self.controllers.remove(&id);
        if self.active == Some(id) {
            self.active = None;
        }

        // Slots waiting in front of the removed record move to its successor
        for collapse in &mut self.collapses {
            if collapse.before == Some(id) {
                collapse.before = before;
            }
        }

        let card_height = self.config.list.card_height;
        let mut height = Spring::new(self.config.peel.spring(), card_height);
        height.set_target(0.0);
        let height = self.scheduler.add_spring(height);
        self.collapses.push(Collapse {
            record,
            before,
            height,
        });
        tracing::debug!(%id, remaining = self.store.len(), "card removed");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance all animations. Returns true while anything is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        let mut animating = false;
        for controller in self.controllers.values_mut() {
            animating |= controller.tick(dt);
        }

        self.scheduler.tick_by(dt);
        let collapsing = !self.collapses.is_empty();
        let settled = self.scheduler.drain_settled();
        if !settled.is_empty() {
            self.collapses
                .retain(|c| !settled.iter().any(|(spring, _)| *spring == c.height));
        }
        // Content shrinks every frame a slot collapses; keep the viewport filled
        if collapsing {
            self.scroll_by(0.0);
        }

        animating || !self.collapses.is_empty()
    }

    /// Layer tree for the current frame, in viewport coordinates
    pub fn render(&self, images: &dyn ImageSource) -> Layer {
        let viewport = self.viewport.to_rect();
        if !self.loaded {
            let spinner = Rect::new(
                viewport.center().x - 12.0,
                viewport.center().y - 12.0,
                24.0,
                24.0,
            );
            return Layer::Icon {
                symbol: "progress".to_string(),
                rect: spinner,
                color: Color::from_hex(0x8E8E93),
                props: LayerProperties::new().with_name(LOADING_LAYER),
            };
        }

        let card_size = self.card_size();
        let mut rows = Vec::new();
        for slot in self.layout() {
            let origin = Affine2D::translation(slot.frame.x(), slot.frame.y() - self.scroll_offset);

            let row = if slot.collapsing {
                let Some(collapse) = self.collapses.iter().find(|c| c.record.id == slot.id) else {
                    continue;
                };
                let fraction = slot.frame.height() / self.config.list.card_height;
                self.renderer
                    .render(&collapse.record, card_size, images)
                    .clipped(ClipShape::Rect(Rect::new(0.0, 0.0, card_size.width, slot.frame.height())))
                    .with_opacity(Easing::EaseOutQuad.apply(fraction))
                    .with_props(LayerProperties::new().passthrough())
            } else {
                let (Some(record), Some(controller)) =
                    (self.store.get(slot.id), self.controllers.get(&slot.id))
                else {
                    continue;
                };
                let content = self.renderer.render(record, card_size, images);
                controller.recipe().to_layer(content)
            };

            rows.push(
                row.transformed(origin)
                    .with_props(LayerProperties::new().with_name(slot.id.to_string())),
            );
        }

        Layer::stack(rows).clipped(ClipShape::Rect(viewport))
    }
}
