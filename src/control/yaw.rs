use crate::config::GainConfig;
use core::f32::consts::PI;
use pid_controller::{error, P};

/// Proportional yaw controller
#[derive(Clone, Copy, Debug)]
pub struct YawController {
    /// The proportional control for yaw-rate
    pub p: P<f32>,
}

impl Default for YawController {
    fn default() -> Self {
        Self::from_config(&GainConfig::default())
    }
}

impl YawController {
    pub fn new(p: P<f32>) -> Self {
        Self { p }
    }

    pub fn from_config(gains: &GainConfig) -> Self {
        Self::new(P { kp: gains.kp_yaw })
    }

    /// Calculate the target yaw-rate in radians/second to reach the commanded yaw from the current yaw (in radians).
    ///
    /// The output is constrained to [0, 2PI], so a negative yaw error commands a zero rate.
    pub fn yaw_control(&self, yaw_cmd: f32, yaw: f32) -> f32 {
        // 1. Calculate the error in yaw between the commanded and current yaw.
        let mut yaw_error = error(yaw_cmd, yaw);

        // 2. Wrap the yaw error between -PI and PI
        if yaw_error > PI {
            yaw_error -= 2. * PI;
        } else if yaw_error < -PI {
            yaw_error += 2. * PI;
        }

        // 3. Output the proportionally controlled yaw rate from the error
        self.p.control_with_error(yaw_error).max(0.).min(2. * PI)
    }
}
