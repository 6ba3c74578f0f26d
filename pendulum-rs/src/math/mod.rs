use std::f64::consts::{PI, TAU};

use glam::{DMat2, DVec2};
use serde::{Deserialize, Serialize};

/// How stored angles are normalized after each step.
///
/// The equations of motion only see angles through `sin` and `cos`, so the
/// choice never changes the trajectory, only the magnitude of the stored value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleWrap {
    /// Angles accumulate freely.
    #[default]
    None,
    /// `fmod(angle, 2π)`: keeps the sign, result in (-2π, 2π).
    Fmod,
    /// Result in (-π, π].
    Signed,
}

pub fn wrap_angle(angle: f64, wrap: AngleWrap) -> f64 {
    match wrap {
        AngleWrap::None => angle,
        // Rust's `%` on floats has the same semantics as C's fmod.
        AngleWrap::Fmod => angle % TAU,
        AngleWrap::Signed => {
            let wrapped = angle.rem_euclid(TAU);
            if wrapped > PI {
                wrapped - TAU
            } else {
                wrapped
            }
        }
    }
}

/// Solves `matrix * x = rhs` with Cramer's rule.
///
/// Fails with the determinant when it is not finite or when its magnitude is
/// within `epsilon` (relative to the product of the diagonal) of zero.
pub fn solve_2x2(matrix: DMat2, rhs: DVec2, epsilon: f64) -> Result<DVec2, f64> {
    let determinant = matrix.determinant();
    let scale = (matrix.x_axis.x * matrix.y_axis.y).abs();

    if !determinant.is_finite() || determinant.abs() <= epsilon * scale {
        return Err(determinant);
    }

    // Replace each column in turn with the right hand side.
    let x = DMat2::from_cols(rhs, matrix.y_axis).determinant() / determinant;
    let y = DMat2::from_cols(matrix.x_axis, rhs).determinant() / determinant;

    Ok(DVec2::new(x, y))
}
