use crate::{
    control::Controller,
    state::{Output, Setpoint},
    Sensors, Trajectory,
};
use nalgebra::Vector3;

/// A multi-copter reading its state from `sensors` and running the [`Controller`] cascade each tick.
pub struct Copter<S> {
    pub controller: Controller,
    pub sensors: S,
}

impl<S: Sensors> Copter<S> {
    pub fn new(controller: Controller, sensors: S) -> Self {
        Self {
            controller,
            sensors,
        }
    }

    /// Follow `trajectory` at `time` (s) for one control tick.
    pub fn control(&mut self, trajectory: &Trajectory<'_>, time: f32) -> Output {
        let state = self.sensors.state();
        self.controller.trajectory_control(trajectory, &state, time)
    }

    /// Hold a local NED `position` (m) and `yaw` (rad) for one control tick.
    pub fn hover(&mut self, position: Vector3<f32>, yaw: f32) -> Output {
        self.fly(&Setpoint::hold(position, yaw))
    }

    /// Track a setpoint for one control tick.
    pub fn fly(&mut self, setpoint: &Setpoint) -> Output {
        let state = self.sensors.state();
        self.controller.update(setpoint, &state)
    }
}
