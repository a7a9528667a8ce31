use crate::config::{GainConfig, PhysicalConstants};
use nalgebra::Vector3;

/// Proportional body rate controller producing saturated moment commands.
#[derive(Clone, Copy, Debug)]
pub struct BodyRateController {
    /// Proportional gains for [p, q, r]
    pub k_p: Vector3<f32>,
    /// Moment of inertia about the body axes (kg*m^2)
    pub moment_of_inertia: Vector3<f32>,
    /// Maximum norm of the moment command (N*m)
    pub max_torque: f32,
}

impl Default for BodyRateController {
    fn default() -> Self {
        Self::from_config(&GainConfig::default(), &PhysicalConstants::default())
    }
}

impl BodyRateController {
    pub fn new(k_p: Vector3<f32>, constants: &PhysicalConstants) -> Self {
        Self {
            k_p,
            moment_of_inertia: constants.moment_of_inertia,
            max_torque: constants.max_torque,
        }
    }

    pub fn from_config(gains: &GainConfig, constants: &PhysicalConstants) -> Self {
        Self::new(gains.body_rate(), constants)
    }

    /// Generate the roll, pitch, yaw moment commands in the body frame in Newtons*meters
    ///
    /// The moment is scaled down uniformly when its norm exceeds `max_torque`.
    pub fn body_rate_control(
        &self,
        body_rate_cmd: Vector3<f32>,
        body_rate: Vector3<f32>,
    ) -> Vector3<f32> {
        let taus = self
            .moment_of_inertia
            .component_mul(&self.k_p.component_mul(&(body_rate_cmd - body_rate)));
        let taus_mod = taus.norm();

        if taus_mod > self.max_torque {
            log::debug!("moment {} N*m saturated", taus_mod);
            taus * (self.max_torque / taus_mod)
        } else {
            taus
        }
    }
}
