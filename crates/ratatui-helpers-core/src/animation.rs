//! Spring curves and a single-value spring animator.
//!
//! The host drives time: call [`SpringValue::tick`] with the frame delta and redraw while it
//! reports motion.

use std::f64::consts::TAU;
use std::time::Duration;

const TIMESTEP: f64 = 1.0 / 120.0;
const MIN_RESPONSE: f64 = 1e-3;
const VELOCITY_THRESHOLD: f64 = 1.0;
const POSITION_THRESHOLD: f64 = 0.5;

/// A spring described by its response time and damping fraction.
///
/// `response` is the period of the undamped oscillation in seconds. `damping_fraction` is the
/// damping ratio: 1.0 is critically damped, lower values bounce. `blend_duration` is how long,
/// in seconds, a spring retargeted mid-flight takes to hand its momentum over to the new
/// target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub response: f64,
    pub damping_fraction: f64,
    pub blend_duration: f64,
}

impl Spring {
    pub fn new(response: f64, damping_fraction: f64, blend_duration: f64) -> Self {
        Self {
            response,
            damping_fraction,
            blend_duration,
        }
    }

    /// The curve used to present and dismiss bottom sheets.
    pub fn bottom_sheet() -> Self {
        Self::new(0.35, 0.86, 0.25)
    }

    pub fn stiffness(&self) -> f64 {
        let omega = TAU / self.response.max(MIN_RESPONSE);
        omega * omega
    }

    pub fn damping(&self) -> f64 {
        2.0 * self.damping_fraction * self.stiffness().sqrt()
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::bottom_sheet()
    }
}

#[derive(Clone, Debug)]
pub struct SpringValue {
    spring: Spring,
    value: f64,
    target: f64,
    velocity: f64,
    blend_elapsed: Option<f64>,
}

impl SpringValue {
    pub fn new(value: f64) -> Self {
        Self {
            spring: Spring::default(),
            value,
            target: value,
            velocity: 0.0,
            blend_elapsed: None,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_animating(&self) -> bool {
        self.value != self.target || self.velocity != 0.0
    }

    /// Jumps to `value` and stops any motion.
    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.blend_elapsed = None;
    }

    /// Starts (or retargets) an animation toward `target`.
    pub fn animate_to(&mut self, target: f64, spring: Spring) {
        let in_flight = self.velocity != 0.0;
        self.spring = spring;
        self.target = target;
        self.blend_elapsed = (in_flight && spring.blend_duration > 0.0).then_some(0.0);
    }

    /// Advances the simulation by `dt`. Returns `true` while still moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }

        let stiffness = self.spring.stiffness();
        let damping = self.spring.damping();
        let dt = dt.as_secs_f64();
        let mut simulated = 0.0;

        while simulated < dt {
            let step = TIMESTEP.min(dt - simulated);
            let pull = match self.blend_elapsed.as_mut() {
                Some(elapsed) => {
                    *elapsed += step;
                    (*elapsed / self.spring.blend_duration).min(1.0)
                }
                None => 1.0,
            };
            if pull >= 1.0 {
                self.blend_elapsed = None;
            }

            let displacement = self.value - self.target;
            let force = -stiffness * displacement * pull - damping * self.velocity;
            self.velocity += force * step;
            self.value += self.velocity * step;
            simulated += step;
        }

        let at_rest = self.velocity.abs() < VELOCITY_THRESHOLD;
        let near_target = (self.value - self.target).abs() < POSITION_THRESHOLD;
        if at_rest && near_target {
            self.snap_to(self.target);
            return false;
        }
        true
    }
}
