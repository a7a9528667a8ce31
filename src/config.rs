//! Controller gains and vehicle constants.

use crate::{Error, Result};
use nalgebra::Vector3;
use num_traits::Float;
use pid_controller::PD;
use serde::{Deserialize, Serialize};

/// Smallest magnitude allowed for the vertical component of the body z-axis
/// (R33) when it is used as a denominator.
pub const MIN_TILT_COS: f32 = 0.05;

/// Smallest magnitude allowed for the collective acceleration (thrust / mass)
/// when it is used as a denominator.
pub const MIN_COLLECTIVE_ACCEL: f32 = 1e-3;

/// Floor the magnitude of `x` to `min` keeping its sign.
pub(crate) fn floor_magnitude(x: f32, min: f32) -> f32 {
    if x.abs() >= min {
        x
    } else if x.is_sign_negative() {
        log::debug!("denominator {} floored to -{}", x, min);
        -min
    } else {
        log::debug!("denominator {} floored to {}", x, min);
        min
    }
}

/// Gain set for every loop of the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GainConfig {
    pub kp_lateral_pos: f32,
    pub kd_lateral_pos: f32,
    pub kp_alt: f32,
    pub kd_alt: f32,
    pub kp_roll: f32,
    pub kp_pitch: f32,
    pub kp_yaw: f32,
    pub kp_p: f32,
    pub kp_q: f32,
    pub kp_r: f32,
}

impl Default for GainConfig {
    fn default() -> Self {
        Self {
            kp_lateral_pos: 6.,
            kd_lateral_pos: 4.,
            kp_alt: 4.,
            kd_alt: 1.5,
            kp_roll: 8.,
            kp_pitch: 8.,
            kp_yaw: 4.5,
            kp_p: 20.,
            kp_q: 20.,
            kp_r: 5.,
        }
    }
}

impl GainConfig {
    /// Set the lateral position gains.
    pub fn with_lateral(mut self, pd: PD<f32>) -> Self {
        self.kp_lateral_pos = pd.p.kp;
        self.kd_lateral_pos = pd.kd;
        self
    }

    /// Set the altitude gains.
    pub fn with_altitude(mut self, pd: PD<f32>) -> Self {
        self.kp_alt = pd.p.kp;
        self.kd_alt = pd.kd;
        self
    }

    pub fn body_rate(&self) -> Vector3<f32> {
        Vector3::new(self.kp_p, self.kp_q, self.kp_r)
    }

    /// Check every gain is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let gains = [
            ("kp_lateral_pos", self.kp_lateral_pos),
            ("kd_lateral_pos", self.kd_lateral_pos),
            ("kp_alt", self.kp_alt),
            ("kd_alt", self.kd_alt),
            ("kp_roll", self.kp_roll),
            ("kp_pitch", self.kp_pitch),
            ("kp_yaw", self.kp_yaw),
            ("kp_p", self.kp_p),
            ("kp_q", self.kp_q),
            ("kp_r", self.kp_r),
        ];

        for (name, value) in gains {
            if !value.is_finite() || value < 0. {
                log::warn!("rejected gain {} = {}", name, value);
                return Err(Error::InvalidGain { name, value });
            }
        }
        Ok(())
    }
}

/// Physical properties of the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Vehicle mass (kg)
    pub mass: f32,

    /// Magnitude of gravity (m/s^2)
    pub gravity: f32,

    /// Moment of inertia about the body x, y and z axes (kg*m^2)
    pub moment_of_inertia: Vector3<f32>,

    /// Maximum collective thrust (N)
    pub max_thrust: f32,

    /// Maximum norm of the moment command (N*m)
    pub max_torque: f32,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            mass: 0.5,
            gravity: 9.81,
            moment_of_inertia: Vector3::new(0.005, 0.005, 0.01),
            max_thrust: 10.,
            max_torque: 1.,
        }
    }
}

impl PhysicalConstants {
    /// Thrust needed to hold altitude while level (N).
    pub fn hover_thrust(&self) -> f32 {
        self.mass * self.gravity
    }

    /// Check every constant is finite and positive.
    pub fn validate(&self) -> Result<()> {
        let constants = [
            ("mass", self.mass),
            ("gravity", self.gravity),
            ("moment_of_inertia.x", self.moment_of_inertia.x),
            ("moment_of_inertia.y", self.moment_of_inertia.y),
            ("moment_of_inertia.z", self.moment_of_inertia.z),
            ("max_thrust", self.max_thrust),
            ("max_torque", self.max_torque),
        ];

        for (name, value) in constants {
            if !value.is_finite() || value <= 0. {
                log::warn!("rejected constant {} = {}", name, value);
                return Err(Error::InvalidConstant { name, value });
            }
        }
        Ok(())
    }
}
