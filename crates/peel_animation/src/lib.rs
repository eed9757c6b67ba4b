//! Peel Animation System
//!
//! Spring physics, easing curves, and frame scheduling.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Response Tuning**: springs described by response time and damping fraction
//! - **Interruptible**: retargeting a spring keeps its current velocity
//! - **Scheduler**: ticks many springs per frame, deterministic `tick_by` for tests

pub mod easing;
pub mod scheduler;
pub mod spring;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
