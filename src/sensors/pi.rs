use rand::Rng;
use tracing::info;

use crate::sensors::{SensorReader, SensorReading};

/// Stand-in for the GPIO sensors on the Raspberry Pi.
///
/// There is no hardware integration yet, so this returns values from narrow
/// ranges that look like a healthy, stable garden bed.
pub struct PiSensorReader;

impl SensorReader for PiSensorReader {
    fn name(&self) -> &'static str {
        "raspberry-pi"
    }

    fn read(&self) -> SensorReading {
        info!("Reading sensor data from Raspberry Pi pins (placeholder)");
        let mut rng = rand::thread_rng();

        SensorReading {
            moisture: rng.gen_range(550..650),
            illumination: rng.gen_range(600..800),
            temperature: rng.gen_range(25..30),
            ph: rng.gen_range(7..9),
        }
    }
}
