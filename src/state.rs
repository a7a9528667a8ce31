use nalgebra::{Vector2, Vector3};

/// Estimated vehicle state in the local NED frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleState {
    /// Local position [north, east, down] (m)
    pub position: Vector3<f32>,

    /// Local velocity [north, east, down] (m/s)
    pub velocity: Vector3<f32>,

    /// Euler angles [roll, pitch, yaw] (rad)
    pub attitude: Vector3<f32>,

    /// Body rates [p, q, r] (rad/s)
    pub body_rate: Vector3<f32>,
}

impl VehicleState {
    /// A vehicle at rest at `position`.
    pub fn at_rest(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn lateral_position(&self) -> Vector2<f32> {
        self.position.xy()
    }

    pub fn lateral_velocity(&self) -> Vector2<f32> {
        self.velocity.xy()
    }

    /// Altitude (+up) in meters.
    pub fn altitude(&self) -> f32 {
        -self.position.z
    }

    /// Vertical velocity (+up) in meters/second.
    pub fn vertical_velocity(&self) -> f32 {
        -self.velocity.z
    }
}

/// Position, velocity and yaw commands for one control tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Setpoint {
    /// Local position command [north, east, down] (m)
    pub position: Vector3<f32>,

    /// Local velocity command [north, east, down] (m/s)
    pub velocity: Vector3<f32>,

    /// Yaw command (rad)
    pub yaw: f32,

    /// Feedforward acceleration [north, east, down] added on top of gravity compensation (m/s^2)
    pub acceleration_ff: Vector3<f32>,
}

impl Setpoint {
    /// Hold `position` with zero velocity.
    pub fn hold(position: Vector3<f32>, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            ..Default::default()
        }
    }
}

/// Output of the outer loop: collective thrust and the body rates to track.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttitudeTarget {
    /// Horizontal acceleration command [north, east] (m/s^2)
    pub acceleration: Vector2<f32>,

    /// Collective thrust (N)
    pub thrust: f32,

    /// Body rate command [p, q, r] (rad/s)
    pub body_rate: Vector3<f32>,
}

/// Final command for one control tick, consumed by the motor mixer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Output {
    /// Collective thrust (N)
    pub thrust: f32,

    /// Roll, pitch and yaw moments in the body frame (N*m)
    pub moment: Vector3<f32>,
}
