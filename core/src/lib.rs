//! Hospitality and terminal operations forecasting.
//!
//! Reservations are segmented into guest archetypes, expanded into stay
//! nights, and turned into daily labor, consumption and department plans or
//! time-bucketed service demand with M/M/c staffing.

pub mod airline;
pub mod archetype;
pub mod calibration;
pub mod config;
pub mod departments;
pub mod dq;
pub mod error;
pub mod features;
pub mod fnb;
pub mod labor;
pub mod learning;
pub mod linalg;
pub mod queueing;
pub mod reservation;
pub mod segmenter;
pub mod service;
pub mod types;

pub use archetype::Archetype;
pub use config::ForecastConfig;
pub use error::{ForecastError, ForecastResult};
pub use reservation::{ActualHours, Flight, RawFlight, RawReservation, Reservation};
