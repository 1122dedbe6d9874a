use crate::sensors::SensorReading;

pub const HAIKU_OPEN_DELIMITER: &str = "$(";
pub const HAIKU_CLOSE_DELIMITER: &str = ")$";

const BANDS: &str = r#"Make haiku reflecting these parameters:
if moisture between 0-200 reflect drought
if moisture between 201-400 reflect dryness
if moisture between 401-700 reflect normal moisture, thriving
if moisture between 701-900 reflect wetness, dew
if moisture between 901-1023 reflect oversaturation, puddles
if illumination between 0-200 reflect night, darkness
if illumination between 201-400 reflect dawn, early morning
if illumination between 401-700 reflect daylight, sunshine
if illumination between 701-1023 reflect bright sun, strong light
if temperature between 0-10 reflect cold, frost
if temperature between 11-20 reflect coolness, pleasant
if temperature between 21-30 reflect warmth, growth
if temperature between 31-40 reflect heat, summer
if pH between 0-6 reflect acidity, sourness, difficulty
if pH between 7 reflect neutrality, balance
if pH between 8-14 reflect alkalinity, bitterness, struggle"#;

pub fn build_haiku_prompt(reading: &SensorReading) -> String {
    let SensorReading {
        moisture,
        illumination,
        temperature,
        ph,
    } = reading;

    format!(
        r#"{BANDS}

The parameters now are:
Moisture {moisture}
Illumination {illumination}
Temperature {temperature}
pH {ph}

Separate haiku from other text with $ symbols like {HAIKU_OPEN_DELIMITER}haiku{HAIKU_CLOSE_DELIMITER}"#
    )
}
