use thiserror::Error;

/// An error caused by a malformed trajectory or controller configuration.
///
/// Control laws never return errors, every tick produces a finite command.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    #[error("trajectory has no samples")]
    EmptyTrajectory,

    #[error("trajectory has {positions} positions, {yaws} yaws and {times} times")]
    TrajectoryLengthMismatch {
        positions: usize,
        yaws: usize,
        times: usize,
    },

    #[error("trajectory time decreases at sample {index}")]
    NonMonotonicTime { index: usize },

    #[error("trajectory sample {index} is not finite")]
    NonFiniteTrajectory { index: usize },

    #[error("gain `{name}` must be finite and non-negative (got {value})")]
    InvalidGain { name: &'static str, value: f32 },

    #[error("constant `{name}` must be finite and positive (got {value})")]
    InvalidConstant { name: &'static str, value: f32 },
}

pub type Result<T> = core::result::Result<T, Error>;
