//! Sampling of a discretized trajectory into position, velocity and yaw commands.

use crate::{state::Setpoint, Error, Result};
use nalgebra::Vector3;
use num_traits::Float;

/// A trajectory of timed position and yaw samples borrowed from the planner.
///
/// Times are non-decreasing and there is at least one sample.
#[derive(Clone, Copy, Debug)]
pub struct Trajectory<'a> {
    positions: &'a [Vector3<f32>],
    yaws: &'a [f32],
    times: &'a [f32],
}

impl<'a> Trajectory<'a> {
    /// Create a trajectory from NED positions (m), yaws (rad) and times (s).
    pub fn new(positions: &'a [Vector3<f32>], yaws: &'a [f32], times: &'a [f32]) -> Result<Self> {
        if positions.len() != yaws.len() || positions.len() != times.len() {
            log::warn!(
                "rejected trajectory with {} positions, {} yaws and {} times",
                positions.len(),
                yaws.len(),
                times.len()
            );
            return Err(Error::TrajectoryLengthMismatch {
                positions: positions.len(),
                yaws: yaws.len(),
                times: times.len(),
            });
        }
        if positions.is_empty() {
            log::warn!("rejected empty trajectory");
            return Err(Error::EmptyTrajectory);
        }

        for index in 0..times.len() {
            let finite = positions[index].iter().all(|x| x.is_finite())
                && yaws[index].is_finite()
                && times[index].is_finite();
            if !finite {
                log::warn!("rejected trajectory with non-finite sample {}", index);
                return Err(Error::NonFiniteTrajectory { index });
            }
            if index > 0 && times[index] < times[index - 1] {
                log::warn!("rejected trajectory with decreasing time at sample {}", index);
                return Err(Error::NonMonotonicTime { index });
            }
        }

        Ok(Self {
            positions,
            yaws,
            times,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Index of the sample whose time is nearest to `time`, the lowest index wins ties.
    pub fn nearest_index(&self, time: f32) -> usize {
        let mut nearest = 0;
        let mut nearest_dt = (self.times[0] - time).abs();
        for (index, t) in self.times.iter().enumerate().skip(1) {
            let dt = (t - time).abs();
            if dt < nearest_dt {
                nearest = index;
                nearest_dt = dt;
            }
        }
        nearest
    }

    /// Calculate the commanded position, velocity and yaw at `time` by linear
    /// interpolation between the samples around it.
    ///
    /// ```
    /// use quad_cascade::Trajectory;
    /// use nalgebra::Vector3;
    /// use approx::assert_relative_eq;
    ///
    /// let positions = [Vector3::zeros(), Vector3::new(10., 0., -5.)];
    /// let trajectory = Trajectory::new(&positions, &[0., 0.], &[0., 5.]).unwrap();
    ///
    /// let setpoint = trajectory.sample(2.5);
    /// assert_relative_eq!(setpoint.position, Vector3::new(5., 0., -2.5));
    /// assert_relative_eq!(setpoint.velocity, Vector3::new(2., 0., -1.));
    /// ```
    pub fn sample(&self, time: f32) -> Setpoint {
        let index = self.nearest_index(time);
        let time_ref = self.times[index];

        let (start, end, yaw) = if time < time_ref {
            // Before the first sample there is no earlier segment, hold the first sample
            if index == 0 {
                return Setpoint::hold(self.positions[0], self.yaws[0]);
            }
            (index - 1, index, self.yaws[index - 1])
        } else {
            // Samples sharing this time collapse onto the last of them
            let mut index = index;
            while index + 1 < self.len() && self.times[index + 1] == self.times[index] {
                index += 1;
            }

            // Hold at the final sample
            if index >= self.len() - 1 {
                return Setpoint::hold(self.positions[index], self.yaws[index]);
            }
            (index, index + 1, self.yaws[index])
        };

        let (position0, position1) = (self.positions[start], self.positions[end]);
        let (time0, time1) = (self.times[start], self.times[end]);
        let duration = time1 - time0;
        if duration <= 0. {
            return Setpoint::hold(position1, yaw);
        }

        let velocity = (position1 - position0) / duration;
        Setpoint {
            position: position0 + velocity * (time - time0),
            velocity,
            yaw,
            acceleration_ff: Vector3::zeros(),
        }
    }
}
