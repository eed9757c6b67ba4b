//! Peel interaction controller
//!
//! Turns a horizontal drag over one card into a peel progress and, after an
//! explicit confirmation, a delete commit.
//!
//! ```text
//!            drag                 end, p > threshold
//!   Idle ──────────► Dragging ─────────────────────► Expanded ──tap delete──► Committing
//!    ▲                  │                               │
//!    └──── end, p ≤ threshold ◄──────── tap elsewhere ──┘
//! ```
//!
//! Progress shown on screen is a spring that chases the logical target: it
//! follows the finger exactly while dragging, and animates on gesture-end and
//! reset. Each frame calls [`PeelController::tick`] and reads
//! [`PeelController::state`].

use crate::config::PeelConfig;
use crate::pin::PinSource;
use crate::recipe::{compose, PeelHit, PeelRecipe};
use peel_animation::Spring;
use peel_core::{DragSample, GestureEvent, Point, Size};
use serde::Serialize;

/// Interaction phase of a card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum PeelPhase {
    #[default]
    Idle,
    Dragging,
    Expanded,
    /// Terminal: the card is being deleted and ignores all input
    Committing,
}

/// Snapshot of a card's peel for rendering
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PeelState {
    /// Fraction of the width peeled back, always in `[0, 1]`
    pub progress: f32,
    pub expanded: bool,
}

/// Result of feeding one input to a controller
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PeelTransition {
    /// Input not valid in the current phase
    Ignored,
    /// Progress followed a drag sample
    Dragged { progress: f32 },
    /// Gesture ended past the threshold; animating to `pinned`
    Expanded { pinned: f32 },
    /// Gesture ended at or below the threshold; animating to 0
    SnappedBack,
    /// Tap outside the delete button closed an expanded card
    Reset,
    /// Delete confirmed; the owner must remove the record
    Commit,
}

/// Per-card peel state machine
#[derive(Clone, Debug)]
pub struct PeelController {
    config: PeelConfig,
    size: Size,
    phase: PeelPhase,
    progress: Spring,
}

impl PeelController {
    pub fn new(config: PeelConfig, size: Size) -> Self {
        Self {
            progress: Spring::new(config.spring(), 0.0),
            config,
            size,
            phase: PeelPhase::Idle,
        }
    }

    pub fn config(&self) -> &PeelConfig {
        &self.config
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Update the container size (layout pass, rotation, resize)
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn phase(&self) -> PeelPhase {
        self.phase
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.phase, PeelPhase::Expanded | PeelPhase::Committing)
    }

    /// Displayed progress, clamped so spring overshoot never leaves `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress.value().clamp(0.0, 1.0)
    }

    /// Progress the card is moving toward (or resting at)
    pub fn resting_progress(&self) -> f32 {
        self.progress.target()
    }

    pub fn state(&self) -> PeelState {
        PeelState {
            progress: self.progress(),
            expanded: self.is_expanded(),
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.progress.is_settled()
    }

    /// Whether a new drag gesture may start. Refused while expanded,
    /// committing, or still animating back from a previous gesture.
    pub fn accepts_drag(&self) -> bool {
        match self.phase {
            PeelPhase::Dragging => true,
            PeelPhase::Idle => !self.is_animating(),
            PeelPhase::Expanded | PeelPhase::Committing => false,
        }
    }

    /// Map a drag translation to progress. Only right-to-left motion counts.
    pub fn progress_for(&self, sample: DragSample) -> f32 {
        if self.size.is_empty() {
            return 0.0;
        }
        ((-sample.translation_x).max(0.0) / self.size.width).clamp(0.0, 1.0)
    }

    pub fn drag(&mut self, sample: DragSample) -> PeelTransition {
        if !self.accepts_drag() {
            tracing::trace!(phase = ?self.phase, "drag sample ignored");
            return PeelTransition::Ignored;
        }

        let progress = self.progress_for(sample);
        if self.phase == PeelPhase::Idle {
            tracing::debug!("peel drag started");
        }
        self.phase = PeelPhase::Dragging;
        self.progress.snap_to(progress);
        tracing::trace!(translation_x = sample.translation_x, progress, "peel drag");
        PeelTransition::Dragged { progress }
    }

    /// Gesture ended: expand past the threshold, otherwise snap back
    pub fn end_drag(&mut self, pins: &mut dyn PinSource) -> PeelTransition {
        if self.phase != PeelPhase::Dragging {
            tracing::trace!(phase = ?self.phase, "drag end ignored");
            return PeelTransition::Ignored;
        }

        let progress = self.progress.value();
        if progress > self.config.expand_threshold {
            let range = self.config.pin_range();
            let pinned = pins.pin(range.clone()).clamp(*range.start(), *range.end());
            self.progress.set_target(pinned);
            self.phase = PeelPhase::Expanded;
            tracing::debug!(progress, pinned, "peel expanded");
            PeelTransition::Expanded { pinned }
        } else {
            self.progress.set_target(0.0);
            self.phase = PeelPhase::Idle;
            tracing::debug!(progress, "peel snapped back");
            PeelTransition::SnappedBack
        }
    }

    /// Close the card. A no-op on an idle card.
    pub fn reset(&mut self) -> PeelTransition {
        match self.phase {
            PeelPhase::Expanded | PeelPhase::Dragging => {
                self.progress.set_target(0.0);
                self.phase = PeelPhase::Idle;
                tracing::debug!("peel reset");
                PeelTransition::Reset
            }
            PeelPhase::Idle | PeelPhase::Committing => PeelTransition::Ignored,
        }
    }

    /// Confirm deletion of an expanded card
    pub fn confirm_delete(&mut self) -> PeelTransition {
        if self.phase != PeelPhase::Expanded {
            tracing::trace!(phase = ?self.phase, "delete ignored");
            return PeelTransition::Ignored;
        }
        self.phase = PeelPhase::Committing;
        tracing::debug!("peel delete committed");
        PeelTransition::Commit
    }

    /// Route a card-local tap: the delete button commits, anything else
    /// closes the card.
    pub fn tap(&mut self, point: Point) -> PeelTransition {
        if self.phase == PeelPhase::Expanded && self.recipe().hit_test(point) == PeelHit::DeleteButton {
            return self.confirm_delete();
        }
        self.reset()
    }

    /// Feed one gesture event
    pub fn handle(&mut self, event: GestureEvent, pins: &mut dyn PinSource) -> PeelTransition {
        match event {
            GestureEvent::Drag(sample) => self.drag(sample),
            GestureEvent::DragEnd => self.end_drag(pins),
            GestureEvent::Tap(point) => self.tap(point),
            GestureEvent::Resize(size) => {
                self.set_size(size);
                PeelTransition::Ignored
            }
        }
    }

    /// Advance animations by `dt` seconds. Returns true while still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.progress.step(dt);
        self.is_animating()
    }

    /// Layers for the current frame
    pub fn recipe(&self) -> PeelRecipe {
        compose(self.state(), self.size, &self.config)
    }
}
