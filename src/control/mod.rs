//! Low level flight controllers and the cascade that chains them.
//!
//! One control tick flows through the loops in order:
//! [`LateralPositionController`] and [`AltitudeController`] turn a [`Setpoint`] into a horizontal
//! acceleration and a collective thrust, [`RollPitchController`] and [`YawController`] turn those
//! into body rate commands, and [`BodyRateController`] turns the body rates into moments.

mod altitude;
pub use altitude::AltitudeController;

mod attitude;
pub use attitude::RollPitchController;

mod body_rate;
pub use body_rate::BodyRateController;

mod lateral_pos;
pub use lateral_pos::LateralPositionController;

mod yaw;
pub use yaw::YawController;

use crate::{
    config::{GainConfig, PhysicalConstants},
    state::{AttitudeTarget, Output, Setpoint, VehicleState},
    Result, Trajectory,
};
use nalgebra::Vector3;
use pid_controller::{P, PD};

/// Create PD gains from the rise time `t_rise` (in seconds) and damping ratio `delta`
/// of a second order response.
///
/// ```
/// use quad_cascade::control::pid_config;
/// use approx::assert_relative_eq;
///
/// let pd = pid_config(1. / 1.57, 1.);
/// assert_relative_eq!(pd.p.kp, 1., epsilon = 1e-5);
/// assert_relative_eq!(pd.kd, 2., epsilon = 1e-5);
/// ```
pub fn pid_config(t_rise: f32, delta: f32) -> PD<f32> {
    let w = 1. / (1.57 * t_rise);
    PD {
        p: P { kp: w * w },
        kd: 2. * delta * w,
    }
}

/// Cascaded position and attitude controller for a multi-copter.
///
/// The controller holds no state between ticks other than its configuration.
#[derive(Clone, Debug)]
pub struct Controller {
    pub lateral_position: LateralPositionController,
    pub altitude: AltitudeController,
    pub roll_pitch: RollPitchController,
    pub yaw: YawController,
    pub body_rate: BodyRateController,
    /// Magnitude of gravity (m/s^2)
    pub gravity: f32,
}

impl Default for Controller {
    fn default() -> Self {
        Self::from_config(&GainConfig::default(), &PhysicalConstants::default())
    }
}

impl Controller {
    /// Create a new controller after validating the gains and constants.
    pub fn new(gains: GainConfig, constants: PhysicalConstants) -> Result<Self> {
        gains.validate()?;
        constants.validate()?;

        log::info!(
            "controller configured for {} kg, max thrust {} N, max torque {} N*m",
            constants.mass,
            constants.max_thrust,
            constants.max_torque
        );
        Ok(Self::from_config(&gains, &constants))
    }

    fn from_config(gains: &GainConfig, constants: &PhysicalConstants) -> Self {
        Self {
            lateral_position: LateralPositionController::from_config(gains),
            altitude: AltitudeController::from_config(gains, constants),
            roll_pitch: RollPitchController::from_config(gains, constants),
            yaw: YawController::from_config(gains),
            body_rate: BodyRateController::from_config(gains, constants),
            gravity: constants.gravity,
        }
    }

    /// Run the outer loops, returning the collective thrust and body rates to track.
    pub fn position_control(&self, setpoint: &Setpoint, state: &VehicleState) -> AttitudeTarget {
        let acceleration = self.lateral_position.lateral_position_control(
            setpoint.position.xy(),
            setpoint.velocity.xy(),
            state.lateral_position(),
            state.lateral_velocity(),
            setpoint.acceleration_ff.xy(),
        );

        // Altitude is positive up and the feedforward compensates gravity
        let thrust = self.altitude.altitude_control(
            -setpoint.position.z,
            -setpoint.velocity.z,
            state.altitude(),
            state.vertical_velocity(),
            state.attitude,
            self.gravity - setpoint.acceleration_ff.z,
        );

        let roll_pitch_rate = self
            .roll_pitch
            .roll_pitch_control(acceleration, state.attitude, thrust);
        let yaw_rate = self.yaw.yaw_control(setpoint.yaw, state.attitude.z);

        AttitudeTarget {
            acceleration,
            thrust,
            body_rate: Vector3::new(roll_pitch_rate.x, roll_pitch_rate.y, yaw_rate),
        }
    }

    /// Run the body rate loop for an attitude target.
    pub fn attitude_control(&self, target: &AttitudeTarget, body_rate: Vector3<f32>) -> Output {
        Output {
            thrust: target.thrust,
            moment: self.body_rate.body_rate_control(target.body_rate, body_rate),
        }
    }

    /// Run the full cascade for one tick.
    pub fn update(&self, setpoint: &Setpoint, state: &VehicleState) -> Output {
        let target = self.position_control(setpoint, state);
        let output = self.attitude_control(&target, state.body_rate);

        log::trace!(
            "thrust {} N, body rate cmd {:?}, moment {:?}",
            output.thrust,
            target.body_rate,
            output.moment
        );
        output
    }

    /// Sample `trajectory` at `time` (s) and run the full cascade for one tick.
    pub fn trajectory_control(
        &self,
        trajectory: &Trajectory<'_>,
        state: &VehicleState,
        time: f32,
    ) -> Output {
        self.update(&trajectory.sample(time), state)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AltitudeController, BodyRateController, Controller, LateralPositionController,
        RollPitchController, YawController,
    };
    use crate::{
        config::{GainConfig, PhysicalConstants},
        state::{Setpoint, VehicleState},
        Error,
    };
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn rejects_invalid_config() {
        let gains = GainConfig {
            kp_p: -20.,
            ..Default::default()
        };
        assert!(matches!(
            Controller::new(gains, PhysicalConstants::default()),
            Err(Error::InvalidGain { name: "kp_p", .. })
        ));

        let constants = PhysicalConstants {
            max_torque: 0.,
            ..Default::default()
        };
        assert!(matches!(
            Controller::new(GainConfig::default(), constants),
            Err(Error::InvalidConstant {
                name: "max_torque",
                ..
            })
        ));
    }

    #[test]
    fn default_loops_match_default_config() {
        let gains = GainConfig::default();
        let constants = PhysicalConstants::default();
        let controller = Controller::default();

        assert_eq!(controller.lateral_position.pd.p.kp, gains.kp_lateral_pos);
        assert_eq!(controller.lateral_position.pd.kd, gains.kd_lateral_pos);
        assert_eq!(controller.altitude.pd.p.kp, gains.kp_alt);
        assert_eq!(controller.altitude.pd.kd, gains.kd_alt);
        assert_eq!(controller.altitude.max_thrust, constants.max_thrust);
        assert_eq!(controller.roll_pitch.roll.kp, gains.kp_roll);
        assert_eq!(controller.roll_pitch.pitch.kp, gains.kp_pitch);
        assert_eq!(controller.yaw.p.kp, gains.kp_yaw);
        assert_eq!(controller.body_rate.k_p, gains.body_rate());
        assert_eq!(controller.body_rate.max_torque, constants.max_torque);

        // Each loop on its own agrees with the cascade
        assert_eq!(LateralPositionController::default().pd.kd, gains.kd_lateral_pos);
        assert_eq!(AltitudeController::default().pd.p.kp, gains.kp_alt);
        assert_eq!(RollPitchController::default().pitch.kp, gains.kp_pitch);
        assert_eq!(YawController::default().p.kp, gains.kp_yaw);
        assert_eq!(
            BodyRateController::default().moment_of_inertia,
            constants.moment_of_inertia
        );
    }

    #[test]
    fn holds_hover() {
        let controller = Controller::default();
        let position = Vector3::new(1., 2., -3.);
        let output = controller.update(
            &Setpoint::hold(position, 0.),
            &VehicleState::at_rest(position),
        );

        assert_relative_eq!(output.thrust, 0.5 * 9.81);
        assert_relative_eq!(output.moment, Vector3::zeros());
    }

    #[test]
    fn climbs_when_below_setpoint() {
        let controller = Controller::default();
        let target = controller.position_control(
            &Setpoint::hold(Vector3::new(0., 0., -1.), 0.),
            &VehicleState::at_rest(Vector3::zeros()),
        );
        assert!(target.thrust > 0.5 * 9.81);
    }

    #[test]
    fn down_feedforward_reduces_thrust() {
        let controller = Controller::default();
        let setpoint = Setpoint {
            acceleration_ff: Vector3::new(0., 0., 1.),
            ..Default::default()
        };
        let target = controller.position_control(&setpoint, &VehicleState::default());
        assert_relative_eq!(target.thrust, 0.5 * (9.81 - 1.));
    }

    #[test]
    fn attitude_control_passes_thrust() {
        let controller = Controller::default();
        let target = controller.position_control(
            &Setpoint::hold(Vector3::new(1., 0., 0.), 0.2),
            &VehicleState::default(),
        );
        let output = controller.attitude_control(&target, Vector3::zeros());
        assert_eq!(output.thrust, target.thrust);
        assert!(output.moment.norm() > 0.);
    }
}
