use crate::config::{floor_magnitude, GainConfig, PhysicalConstants, MIN_TILT_COS};
use nalgebra::{Rotation3, Vector3};
use pid_controller::{P, PD};

/// PD controller from vertical position and velocity error to collective thrust.
#[derive(Clone, Debug)]
pub struct AltitudeController {
    pub pd: PD<f32>,
    /// Vehicle mass (kg)
    pub mass: f32,
    /// Maximum collective thrust (N)
    pub max_thrust: f32,
}

impl Default for AltitudeController {
    fn default() -> Self {
        Self::from_config(&GainConfig::default(), &PhysicalConstants::default())
    }
}

impl AltitudeController {
    pub fn new(pd: PD<f32>, constants: &PhysicalConstants) -> Self {
        Self {
            pd,
            mass: constants.mass,
            max_thrust: constants.max_thrust,
        }
    }

    pub fn from_config(gains: &GainConfig, constants: &PhysicalConstants) -> Self {
        let pd = PD {
            p: P { kp: gains.kp_alt },
            kd: gains.kd_alt,
        };
        Self::new(pd, constants)
    }

    /// Calculate the collective thrust command (N) in [0, max_thrust].
    ///
    /// Altitudes, velocities and `acceleration_ff` are positive up and `attitude` is [roll, pitch, yaw] in radians.
    pub fn altitude_control(
        &self,
        altitude_cmd: f32,
        vertical_velocity_cmd: f32,
        altitude: f32,
        vertical_velocity: f32,
        attitude: Vector3<f32>,
        acceleration_ff: f32,
    ) -> f32 {
        // 1. Calculate the commanded vertical acceleration
        let acceleration_cmd = self.pd.control(
            altitude_cmd,
            vertical_velocity_cmd,
            altitude,
            vertical_velocity,
        ) + acceleration_ff;

        // 2. Take the vertical component of the body z-axis (R33)
        let b_z = Rotation3::from_euler_angles(attitude.x, attitude.y, attitude.z)[(2, 2)];
        let b_z = floor_magnitude(b_z, MIN_TILT_COS);

        // 3. Scale by the mass and constrain to the achievable thrust
        let thrust = self.mass * acceleration_cmd / b_z;
        thrust.max(0.).min(self.max_thrust)
    }
}

#[cfg(test)]
mod tests {
    use super::AltitudeController;
    use approx::assert_relative_eq;
    use core::f32::consts::FRAC_PI_2;
    use nalgebra::Vector3;
    use num_traits::Float;

    #[test]
    fn hover_thrust_is_feedforward() {
        let controller = AltitudeController::default();
        let thrust = controller.altitude_control(2., 0., 2., 0., Vector3::zeros(), 9.81);
        assert_relative_eq!(thrust, 0.5 * 9.81);
    }

    #[test]
    fn tilt_increases_thrust() {
        let controller = AltitudeController::default();
        let attitude = Vector3::new(0.3, 0.2, 1.);
        let thrust = controller.altitude_control(0., 0., 0., 0., attitude, 9.81);
        assert_relative_eq!(
            thrust,
            0.5 * 9.81 / (0.3f32.cos() * 0.2f32.cos()),
            epsilon = 1e-5
        );
    }

    #[test]
    fn saturates() {
        let controller = AltitudeController::default();
        assert_eq!(
            controller.altitude_control(100., 10., 0., 0., Vector3::zeros(), 9.81),
            controller.max_thrust
        );
        assert_eq!(
            controller.altitude_control(-100., -10., 0., 0., Vector3::zeros(), 9.81),
            0.
        );
    }

    #[test]
    fn finite_at_ninety_degrees() {
        let controller = AltitudeController::default();
        for attitude in [
            Vector3::new(FRAC_PI_2, 0., 0.),
            Vector3::new(0., FRAC_PI_2, 0.),
            Vector3::new(-FRAC_PI_2, 0., 0.5),
        ] {
            let thrust = controller.altitude_control(1., 0., 0., 0., attitude, 9.81);
            assert!(thrust.is_finite());
            assert!((0. ..=controller.max_thrust).contains(&thrust));
        }
    }

    #[test]
    fn within_range_for_arbitrary_inputs() {
        let controller = AltitudeController::default();
        for i in -20..20 {
            let x = i as f32;
            let attitude = Vector3::new(x * 0.17, -x * 0.11, x);
            let thrust = controller.altitude_control(x * 3., -x, x * x, x, attitude, 9.81);
            assert!((0. ..=controller.max_thrust).contains(&thrust));
        }
    }
}
