//! Prediction algorithms.
//!
//! A static catalog of algorithm descriptors, each with its own candidate
//! symbol pool and signal message pool. Predictions are built from live
//! quotes over the pool, with a synthesized confidence score.

mod catalog;
mod model;
mod service;

pub use catalog::algorithms;
pub use model::{Algorithm, Prediction, SignalType};
pub use service::{PredictionService, PredictionServiceTrait};
