use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;

mod pi;
mod simulated;

pub use pi::PiSensorReader;
pub use simulated::SimulatedSensorReader;

pub const MOISTURE_MAX: i32 = 1023;
pub const ILLUMINATION_MAX: i32 = 1023;
pub const TEMPERATURE_MAX: i32 = 40;
pub const PH_MAX: i32 = 14;

/// One snapshot of the garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    pub moisture: i32,
    pub illumination: i32,
    /// Degrees Celsius.
    pub temperature: i32,
    pub ph: i32,
}

pub trait SensorReader: Send + Sync {
    fn name(&self) -> &'static str;
    fn read(&self) -> SensorReading;
}

pub fn reader_for(environment: Environment, force_simulated: bool) -> Arc<dyn SensorReader> {
    if force_simulated {
        return Arc::new(SimulatedSensorReader);
    }

    match environment {
        Environment::Pi => Arc::new(PiSensorReader),
        Environment::Dev => Arc::new(SimulatedSensorReader),
    }
}
