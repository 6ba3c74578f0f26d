use thiserror::Error;

pub mod config;
pub mod kinematics;
pub mod math;
pub mod pendulum;

pub use config::PendulumConfig;
pub use math::AngleWrap;
pub use pendulum::{PendulumState, GRAVITY};

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PendulumError {
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("mass matrix is singular or the step diverged (determinant {determinant:e})")]
    NumericalInstability { determinant: f64 },
}
