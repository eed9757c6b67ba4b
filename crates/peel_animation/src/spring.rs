//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Springs are driven by
//! explicit `step(dt)` calls from the frame loop and never block.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Largest integration step; longer frames are subdivided
const MAX_STEP: f32 = 1.0 / 120.0;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance and speed below which the spring snaps to rest
    #[serde(default = "default_rest_threshold")]
    pub rest_threshold: f32,
}

fn default_rest_threshold() -> f32 {
    0.001
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_threshold: default_rest_threshold(),
        }
    }

    /// Describe a spring by its response (period of the undamped
    /// oscillation, in seconds) and damping fraction (1.0 = critical).
    ///
    /// `from_response(0.6, 0.7)` settles in roughly 0.6–0.7s with a small
    /// overshoot.
    pub fn from_response(response: f32, damping_fraction: f32) -> Self {
        let response = response.max(f32::EPSILON);
        let omega = 2.0 * PI / response;
        Self::new(omega * omega, 2.0 * damping_fraction * omega, 1.0)
    }

    /// Slow and soft
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible bounce
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Fast, nearly critically damped
    pub fn stiff() -> Self {
        Self::new(400.0, 38.0, 1.0)
    }

    /// Fast with slight overshoot
    pub fn snappy() -> Self {
        Self::new(300.0, 24.0, 1.0)
    }

    /// Damping ratio ζ; below 1.0 the spring overshoots
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::from_response(0.6, 0.7)
    }
}

/// An animated scalar pulled toward a target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Retarget the spring. Current value and velocity are kept, so an
    /// interrupted animation continues smoothly.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() || dt <= 0.0 {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            self.integrate(h);
            remaining -= h;
        }

        let threshold = self.config.rest_threshold;
        if (self.value - self.target).abs() < threshold && self.velocity.abs() < threshold {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    fn integrate(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}
