//! # quad-cascade
//! A `#![no_std]` cascaded nonlinear controller for quadrotors.
//!
//! Converts a desired trajectory and the current state estimate into a collective thrust
//! and body moments for the motor mixer.
//!
//! # Components
//! [`Trajectory`] samples timed waypoints into position, velocity and yaw commands.
//!
//! [`control`] contains the low level flight controllers and the [`Controller`] cascade.
//!
//! [`Copter`] runs the cascade against a [`Sensors`] state estimator.
//!
//! ```
//! use quad_cascade::{Controller, GainConfig, PhysicalConstants, Trajectory, VehicleState};
//! use nalgebra::Vector3;
//!
//! let controller = Controller::new(GainConfig::default(), PhysicalConstants::default()).unwrap();
//!
//! let positions = [Vector3::zeros(), Vector3::new(10., 0., -5.)];
//! let trajectory = Trajectory::new(&positions, &[0., 0.], &[0., 5.]).unwrap();
//!
//! let output = controller.trajectory_control(&trajectory, &VehicleState::default(), 2.5);
//! assert!(output.thrust > 0.);
//! assert!(output.moment.norm() <= 1.);
//! ```

#![no_std]

pub mod config;
pub use config::{GainConfig, PhysicalConstants};

pub mod control;
pub use control::Controller;

pub mod copter;
pub use copter::Copter;

mod error;
pub use error::{Error, Result};

pub mod hal;
pub use hal::Sensors;

pub mod state;
pub use state::{AttitudeTarget, Output, Setpoint, VehicleState};

pub mod trajectory;
pub use trajectory::Trajectory;
