//! Easing functions for animations

/// Easing function type
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Cubic ease-out
    EaseOut,
    EaseOutQuad,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    ///
    /// Input outside the unit range is clamped first.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}
