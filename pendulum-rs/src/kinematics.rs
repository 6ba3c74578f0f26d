use glam::DVec2;

use crate::PendulumState;

// Positions use the pivot as origin with +Y pointing up, so a rod at angle 0
// hangs along -Y.
fn rod_direction(angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(sin, -cos)
}

impl PendulumState {
    /// World positions of the two masses, pivot at the origin.
    ///
    /// The first entry is also where the second rod is attached.
    pub fn bob_positions(&self) -> [DVec2; 2] {
        let angle = self.angles();
        let length = self.lengths();

        let first = rod_direction(angle.x) * length.x;
        let second = first + rod_direction(angle.y) * length.y;

        [first, second]
    }

    pub fn kinetic_energy(&self) -> f64 {
        let [m1, m2] = self.masses().to_array();
        let [l1, l2] = self.lengths().to_array();
        let [theta1, theta2] = self.angles().to_array();
        let [omega1, omega2] = self.angular_velocities().to_array();

        0.5 * (m1 + m2) * l1 * l1 * omega1 * omega1
            + 0.5 * m2 * l2 * l2 * omega2 * omega2
            + m2 * l1 * l2 * omega1 * omega2 * (theta1 - theta2).cos()
    }

    /// Potential energy relative to the pivot height.
    pub fn potential_energy(&self) -> f64 {
        let [m1, m2] = self.masses().to_array();
        let [y1, y2] = self.bob_positions().map(|p| p.y);

        self.gravity() * (m1 * y1 + m2 * y2)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}
