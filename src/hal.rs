use crate::state::VehicleState;
use nalgebra::Vector3;

/// State estimator feeding the controller.
pub trait Sensors {
    /// Euler angles [roll, pitch, yaw] (rad)
    fn attitude(&mut self) -> Vector3<f32>;

    /// Body rates [p, q, r] (rad/s)
    fn gyro(&mut self) -> Vector3<f32>;

    /// Local NED velocity (m/s)
    fn velocity(&mut self) -> Vector3<f32>;

    /// Local NED position (m)
    fn position(&mut self) -> Vector3<f32>;

    /// Read a full state estimate.
    fn state(&mut self) -> VehicleState {
        VehicleState {
            position: self.position(),
            velocity: self.velocity(),
            attitude: self.attitude(),
            body_rate: self.gyro(),
        }
    }
}

impl Sensors for VehicleState {
    fn attitude(&mut self) -> Vector3<f32> {
        self.attitude
    }

    fn gyro(&mut self) -> Vector3<f32> {
        self.body_rate
    }

    fn velocity(&mut self) -> Vector3<f32> {
        self.velocity
    }

    fn position(&mut self) -> Vector3<f32> {
        self.position
    }

    fn state(&mut self) -> VehicleState {
        *self
    }
}
