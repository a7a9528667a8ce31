use crate::config::{
    floor_magnitude, GainConfig, PhysicalConstants, MIN_COLLECTIVE_ACCEL, MIN_TILT_COS,
};
use nalgebra::{Matrix2, Rotation3, Vector2, Vector3};
use pid_controller::P;

/// Converts a horizontal acceleration command into roll and pitch rate commands
/// by controlling the horizontal components of the body z-axis (R13, R23).
#[derive(Clone, Copy, Debug)]
pub struct RollPitchController {
    pub roll: P<f32>,
    pub pitch: P<f32>,
    /// Vehicle mass (kg)
    pub mass: f32,
}

impl Default for RollPitchController {
    fn default() -> Self {
        Self::from_config(&GainConfig::default(), &PhysicalConstants::default())
    }
}

impl RollPitchController {
    pub fn new(roll: P<f32>, pitch: P<f32>, constants: &PhysicalConstants) -> Self {
        Self {
            roll,
            pitch,
            mass: constants.mass,
        }
    }

    pub fn from_config(gains: &GainConfig, constants: &PhysicalConstants) -> Self {
        Self::new(
            P { kp: gains.kp_roll },
            P { kp: gains.kp_pitch },
            constants,
        )
    }

    /// Calculate the roll-rate and pitch-rate commands in the body frame in radians/second.
    ///
    /// `acceleration_cmd` is [north, east] in m/s^2 and `attitude` is [roll, pitch, yaw] in radians.
    /// Without positive thrust no tilt can be achieved and the command is zero.
    pub fn roll_pitch_control(
        &self,
        acceleration_cmd: Vector2<f32>,
        attitude: Vector3<f32>,
        thrust_cmd: f32,
    ) -> Vector2<f32> {
        if thrust_cmd > 0. {
            // 1. Find the target R13 and R23 from the collective acceleration
            let c = floor_magnitude(-thrust_cmd / self.mass, MIN_COLLECTIVE_ACCEL);
            let b_c = (acceleration_cmd / c).map(|n| n.max(-1.).min(1.));

            // 2. Control the actual R13 and R23 towards the targets
            let rot_mat = Rotation3::from_euler_angles(attitude.x, attitude.y, attitude.z);
            let b_x_commanded_dot = self.roll.control(b_c.x, rot_mat[(0, 2)]);
            let b_y_commanded_dot = self.pitch.control(b_c.y, rot_mat[(1, 2)]);

            // 3. Map the tilt rates to body rates
            let r33 = floor_magnitude(rot_mat[(2, 2)], MIN_TILT_COS);
            let rot_mat1 = Matrix2::new(
                rot_mat[(1, 0)],
                -rot_mat[(0, 0)],
                rot_mat[(1, 1)],
                -rot_mat[(0, 1)],
            ) / r33;

            rot_mat1 * Vector2::new(b_x_commanded_dot, b_y_commanded_dot)
        } else {
            log::debug!("no thrust ({}), zero roll/pitch rate", thrust_cmd);
            Vector2::zeros()
        }
    }
}
