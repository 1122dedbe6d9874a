use rand::Rng;
use tracing::info;

use crate::sensors::{
    ILLUMINATION_MAX, MOISTURE_MAX, PH_MAX, SensorReader, SensorReading, TEMPERATURE_MAX,
};

/// Draws every metric uniformly from its full range.
pub struct SimulatedSensorReader;

impl SensorReader for SimulatedSensorReader {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn read(&self) -> SensorReading {
        info!("Using simulated sensor data");
        let mut rng = rand::thread_rng();

        SensorReading {
            moisture: rng.gen_range(0..=MOISTURE_MAX),
            illumination: rng.gen_range(0..=ILLUMINATION_MAX),
            temperature: rng.gen_range(0..=TEMPERATURE_MAX),
            ph: rng.gen_range(0..=PH_MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_stay_in_range() {
        let reader = SimulatedSensorReader;

        for _ in 0..1_000 {
            let reading = reader.read();
            assert!((0..=MOISTURE_MAX).contains(&reading.moisture));
            assert!((0..=ILLUMINATION_MAX).contains(&reading.illumination));
            assert!((0..=TEMPERATURE_MAX).contains(&reading.temperature));
            assert!((0..=PH_MAX).contains(&reading.ph));
        }
    }
}
