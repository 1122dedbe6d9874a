use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    sensors::{ILLUMINATION_MAX, MOISTURE_MAX, PH_MAX, SensorReading, TEMPERATURE_MAX},
};

/// A generated haiku together with the readings that inspired it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Haiku {
    pub id: String,
    pub date: DateTime<Utc>,
    pub text: String,
    pub moisture: i32,
    pub temperature: i32,
    pub illumination: i32,
    pub ph: i32,
}

impl Haiku {
    pub fn new(text: &str, reading: &SensorReading) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            // MongoDB stores dates with millisecond precision.
            date: Utc::now().trunc_subsecs(3),
            text: text.to_string(),
            moisture: reading.moisture,
            temperature: reading.temperature,
            illumination: reading.illumination,
            ph: reading.ph,
        }
    }
}

/// Body of `POST /haikus`. Id and date are assigned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewHaiku {
    pub text: String,
    pub moisture: i32,
    pub temperature: i32,
    pub illumination: i32,
    pub ph: i32,
}

impl NewHaiku {
    pub fn validate(self) -> Result<Haiku, ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError("text must not be empty".to_string()));
        }

        check_range("moisture", self.moisture, MOISTURE_MAX)?;
        check_range("illumination", self.illumination, ILLUMINATION_MAX)?;
        check_range("temperature", self.temperature, TEMPERATURE_MAX)?;
        check_range("ph", self.ph, PH_MAX)?;

        let reading = SensorReading {
            moisture: self.moisture,
            illumination: self.illumination,
            temperature: self.temperature,
            ph: self.ph,
        };

        Ok(Haiku::new(&self.text, &reading))
    }
}

fn check_range(field: &str, value: i32, max: i32) -> Result<(), ValidationError> {
    if (0..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError(format!(
            "{field} must be between 0 and {max}, got {value}"
        )))
    }
}
