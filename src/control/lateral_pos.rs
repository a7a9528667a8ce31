use crate::config::GainConfig;
use nalgebra::Vector2;
use pid_controller::{P, PD};

/// PD controller from horizontal position and velocity error to horizontal acceleration.
#[derive(Clone, Debug)]
pub struct LateralPositionController {
    pub pd: PD<f32>,
}

impl Default for LateralPositionController {
    fn default() -> Self {
        Self::from_config(&GainConfig::default())
    }
}

impl LateralPositionController {
    pub fn new(pd: PD<f32>) -> Self {
        Self { pd }
    }

    pub fn from_config(gains: &GainConfig) -> Self {
        Self::new(PD {
            p: P {
                kp: gains.kp_lateral_pos,
            },
            kd: gains.kd_lateral_pos,
        })
    }

    /// Calculate the desired horizontal acceleration [north, east] in the local frame (m/s^2).
    ///
    /// ```
    /// use quad_cascade::{control::LateralPositionController, GainConfig};
    /// use nalgebra::Vector2;
    ///
    /// let gains = GainConfig {
    ///     kp_lateral_pos: 2.,
    ///     kd_lateral_pos: 1.,
    ///     ..Default::default()
    /// };
    /// let controller = LateralPositionController::from_config(&gains);
    /// let acceleration = controller.lateral_position_control(
    ///     Vector2::new(1., 0.),
    ///     Vector2::new(0., 1.),
    ///     Vector2::zeros(),
    ///     Vector2::zeros(),
    ///     Vector2::zeros(),
    /// );
    /// assert_eq!(acceleration, Vector2::new(2., 1.));
    /// ```
    pub fn lateral_position_control(
        &self,
        local_position_cmd: Vector2<f32>,
        local_velocity_cmd: Vector2<f32>,
        local_position: Vector2<f32>,
        local_velocity: Vector2<f32>,
        acceleration_ff: Vector2<f32>,
    ) -> Vector2<f32> {
        let err_p = local_position_cmd - local_position;
        let err_dot = local_velocity_cmd - local_velocity;

        err_p * self.pd.p.kp + err_dot * self.pd.kd + acceleration_ff
    }
}
