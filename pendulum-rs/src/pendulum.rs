// Angles are measured from the downward vertical, positive anticlockwise.
// Index 0 (x) is the rod attached to the pivot, index 1 (y) hangs off its end.
//
//        pivot
//          |\
//          | \  l1
//          |θ1\
//              o m1
//              |\
//              | \  l2
//              |θ2\
//                  o m2

use glam::{DMat2, DVec2};

use crate::{
    math::{solve_2x2, wrap_angle, AngleWrap},
    PendulumError,
};

/// Standard gravitational acceleration, m/s².
pub const GRAVITY: f64 = 9.81;

/// Relative threshold below which the mass matrix is treated as singular.
pub const SINGULARITY_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    mass: DVec2,
    length: DVec2,
    angle: DVec2,
    angular_velocity: DVec2,
    gravity: f64,
    wrap: AngleWrap,
}

fn check_positive(name: &'static str, value: f64) -> Result<(), PendulumError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PendulumError::InvalidParameter { name, value })
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), PendulumError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PendulumError::InvalidParameter { name, value })
    }
}

impl PendulumState {
    /// Creates a double pendulum.
    ///
    /// Masses are in kg, lengths in m, angles in radians and angular
    /// velocities in rad/s. Masses and lengths must be positive and finite,
    /// angles and angular velocities finite.
    pub fn new(
        mass: DVec2,
        length: DVec2,
        initial_angle: DVec2,
        initial_angular_velocity: DVec2,
    ) -> Result<Self, PendulumError> {
        check_positive("mass[0]", mass.x)?;
        check_positive("mass[1]", mass.y)?;
        check_positive("length[0]", length.x)?;
        check_positive("length[1]", length.y)?;
        check_finite("angle[0]", initial_angle.x)?;
        check_finite("angle[1]", initial_angle.y)?;
        check_finite("angular_velocity[0]", initial_angular_velocity.x)?;
        check_finite("angular_velocity[1]", initial_angular_velocity.y)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            ?mass,
            ?length,
            ?initial_angle,
            ?initial_angular_velocity,
            "created double pendulum"
        );

        Ok(PendulumState {
            mass,
            length,
            angle: initial_angle,
            angular_velocity: initial_angular_velocity,
            gravity: GRAVITY,
            wrap: AngleWrap::None,
        })
    }

    /// Replaces the gravitational acceleration. It must be finite and not negative.
    pub fn with_gravity(self, gravity: f64) -> Result<Self, PendulumError> {
        if !gravity.is_finite() || gravity < 0.0 {
            return Err(PendulumError::InvalidParameter {
                name: "gravity",
                value: gravity,
            });
        }

        Ok(PendulumState { gravity, ..self })
    }

    pub fn with_wrap(self, wrap: AngleWrap) -> Self {
        PendulumState { wrap, ..self }
    }

    pub fn masses(&self) -> DVec2 {
        self.mass
    }

    pub fn lengths(&self) -> DVec2 {
        self.length
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn wrap(&self) -> AngleWrap {
        self.wrap
    }

    pub fn angles(&self) -> DVec2 {
        self.angle
    }

    /// Overwrites both angles. Angular velocities are left alone.
    pub fn set_angles(&mut self, new_angle: DVec2) {
        self.angle = new_angle;
    }

    pub fn angular_velocities(&self) -> DVec2 {
        self.angular_velocity
    }

    /// Overwrites both angular velocities. Angles are left alone.
    pub fn set_angular_velocities(&mut self, new_angular_velocity: DVec2) {
        self.angular_velocity = new_angular_velocity;
    }

    /// Solves the Euler-Lagrange equations for the current angular accelerations.
    ///
    /// The equations form the linear system
    ///
    /// ```text
    /// | a   b  | |α1|   |-c |
    /// | a'  b' | |α2| = |-c'|
    /// ```
    ///
    /// which is solved with Cramer's rule.
    pub fn angular_accelerations(&self) -> Result<DVec2, PendulumError> {
        let [m1, m2] = self.mass.to_array();
        let [l1, l2] = self.length.to_array();
        let [theta1, theta2] = self.angle.to_array();
        let [omega1, omega2] = self.angular_velocity.to_array();
        let g = self.gravity;

        let (sin_delta, cos_delta) = (theta1 - theta2).sin_cos();
        let coupling = m2 * l1 * l2;

        let a = (m1 + m2) * l1 * l1;
        let b = coupling * cos_delta;
        let c = coupling * omega1 * omega2 * sin_delta
            + (m1 + m2) * g * l1 * theta1.sin()
            - coupling * omega2 * (omega1 - omega2) * sin_delta;

        let a_p = coupling * cos_delta;
        let b_p = m2 * l2 * l2;
        let c_p = -coupling * omega1 * omega2 * sin_delta + m2 * g * l2 * theta2.sin()
            - coupling * omega1 * (omega1 - omega2) * sin_delta;

        let matrix = DMat2::from_cols(DVec2::new(a, a_p), DVec2::new(b, b_p));

        solve_2x2(matrix, DVec2::new(-c, -c_p), SINGULARITY_EPSILON).map_err(|determinant| {
            #[cfg(feature = "tracing")]
            tracing::trace!(determinant, angle = ?self.angle, "singular mass matrix");

            PendulumError::NumericalInstability { determinant }
        })
    }

    /// Advances the pendulum by `delta_time` seconds with one semi-implicit
    /// Euler step: velocities first, then angles from the new velocities.
    ///
    /// On error the state is left exactly as it was.
    pub fn advance(&mut self, delta_time: f64) -> Result<(), PendulumError> {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return Err(PendulumError::InvalidParameter {
                name: "delta_time",
                value: delta_time,
            });
        }

        let acceleration = self.angular_accelerations()?;

        let angular_velocity = self.angular_velocity + acceleration * delta_time;
        let angle = self.angle + angular_velocity * delta_time;
        let angle = DVec2::new(
            wrap_angle(angle.x, self.wrap),
            wrap_angle(angle.y, self.wrap),
        );

        if !angle.is_finite() || !angular_velocity.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::trace!(?angle, ?angular_velocity, "step produced non-finite state");

            return Err(PendulumError::NumericalInstability { determinant: f64::NAN });
        }

        self.angular_velocity = angular_velocity;
        self.angle = angle;

        Ok(())
    }
}
