use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{math::AngleWrap, PendulumError, PendulumState, GRAVITY};

/// Serializable description of a double pendulum.
///
/// Vectors are written as `[first, second]` arrays. Angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct PendulumConfig {
    pub masses: DVec2,
    pub lengths: DVec2,
    pub angles: DVec2,
    #[serde(default)]
    pub angular_velocities: DVec2,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default)]
    pub wrap: AngleWrap,
}

fn default_gravity() -> f64 {
    GRAVITY
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            masses: DVec2::new(1.0, 1.0),
            lengths: DVec2::new(2.2, 2.0),
            angles: DVec2::new(FRAC_PI_2, PI),
            angular_velocities: DVec2::ZERO,
            gravity: GRAVITY,
            wrap: AngleWrap::None,
        }
    }
}

impl PendulumConfig {
    pub fn build(&self) -> Result<PendulumState, PendulumError> {
        let state = PendulumState::new(
            self.masses,
            self.lengths,
            self.angles,
            self.angular_velocities,
        )?
        .with_gravity(self.gravity)?
        .with_wrap(self.wrap);

        Ok(state)
    }
}
