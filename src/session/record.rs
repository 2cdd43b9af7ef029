//! Sample record serialization
//!
//! A [`SampleRecord`] is the value set written for one sample: three
//! acceleration axes, three angular speed axes and the temperature.

use crate::device::Device;
use crate::types::{Axis, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Output format for sample records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// `ax;ay;az;gx;gy;gz;t` with two decimals
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFormat::Text => write!(f, "text"),
            RecordFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for RecordFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(RecordFormat::Text),
            "json" => Ok(RecordFormat::Json),
            other => Err(format!("unknown record format '{}'", other)),
        }
    }
}

/// Values of one sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleRecord {
    pub acceleration: Vector3,
    pub angular_speed: Vector3,
    pub temperature: f32,
}

impl SampleRecord {
    pub fn new(acceleration: Vector3, angular_speed: Vector3, temperature: f32) -> Self {
        Self {
            acceleration,
            angular_speed,
            temperature,
        }
    }

    /// Copy the snapshot of a device, axis by axis
    pub fn from_device(device: &Device) -> Self {
        let mut record = Self::default();
        for axis in Axis::ALL {
            record.set_acceleration_axis(axis, device.get_acceleration_axis(axis));
            record.set_angular_speed_axis(axis, device.get_angular_speed_axis(axis));
        }
        record.set_temperature(device.get_temperature());
        record
    }

    pub fn acceleration_axis(&self, axis: Axis) -> f32 {
        self.acceleration[axis.index()]
    }

    pub fn angular_speed_axis(&self, axis: Axis) -> f32 {
        self.angular_speed[axis.index()]
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn set_acceleration_axis(&mut self, axis: Axis, value: f32) {
        self.acceleration[axis.index()] = value;
    }

    pub fn set_angular_speed_axis(&mut self, axis: Axis, value: f32) {
        self.angular_speed[axis.index()] = value;
    }

    pub fn set_temperature(&mut self, value: f32) {
        self.temperature = value;
    }

    /// Zero every value
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The seven values in record order
    pub fn values(&self) -> [f32; 7] {
        let [ax, ay, az] = self.acceleration;
        let [gx, gy, gz] = self.angular_speed;
        [ax, ay, az, gx, gy, gz, self.temperature]
    }

    /// Format as a text line, including the trailing newline
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(64);
        for (i, value) in self.values().iter().enumerate() {
            if i > 0 {
                line.push(';');
            }
            let _ = write!(line, "{:.2}", value);
        }
        line.push('\n');
        line
    }

    /// Format as a JSON line, including the trailing newline
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimulatedBackend;

    #[test]
    fn test_line_format() {
        let record = SampleRecord::new([1.0, -1.0, 4.0], [0.0, 0.0, 0.0], 20.1);
        assert_eq!(record.to_line(), "1.00;-1.00;4.00;0.00;0.00;0.00;20.10\n");
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        let record = SampleRecord::new([0.0, -0.0, 0.0], [0.0; 3], 21.0);
        assert_eq!(record.to_line(), "0.00;-0.00;0.00;0.00;0.00;0.00;21.00\n");
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let record = SampleRecord::new([0.124, 2.0 / 3.0, -1.006], [1234.5, 0.0, 0.0], 20.0);
        let line = record.to_line();
        assert!(line.starts_with("0.12;0.67;-1.01;1234.50;"));
        assert!(line.ends_with(";20.00\n"));
    }

    #[test]
    fn test_axis_setters_and_reset() {
        let mut record = SampleRecord::default();
        record.set_acceleration_axis(Axis::Y, 3.5);
        record.set_angular_speed_axis(Axis::Z, -7.25);
        record.set_temperature(25.0);

        assert_eq!(record.acceleration_axis(Axis::Y), 3.5);
        assert_eq!(record.angular_speed_axis(Axis::Z), -7.25);
        assert_eq!(record.temperature(), 25.0);
        assert_eq!(record.values(), [0.0, 3.5, 0.0, 0.0, 0.0, -7.25, 25.0]);

        record.reset();
        assert_eq!(record, SampleRecord::default());
    }

    #[test]
    fn test_from_device_copies_snapshot() {
        let mut device =
            Device::new(0x68, Box::new(SimulatedBackend::new().with_counter(1))).unwrap();
        device.read_data().unwrap();

        let record = SampleRecord::from_device(&device);
        assert_eq!(record.acceleration, [1.0, -1.0, 4.0]);
        assert_eq!(record.angular_speed, [0.0; 3]);
        assert_eq!(record.temperature, device.get_temperature());
    }

    #[test]
    fn test_json_line() {
        let record = SampleRecord::new([1.0, -1.0, 4.0], [0.0; 3], 20.5);
        let line = record.to_json_line().unwrap();
        assert_eq!(
            line,
            concat!(
                "{\"acceleration\":[1.0,-1.0,4.0],",
                "\"angular_speed\":[0.0,0.0,0.0],",
                "\"temperature\":20.5}\n"
            )
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<RecordFormat>().unwrap(), RecordFormat::Json);
        assert_eq!("text".parse::<RecordFormat>().unwrap(), RecordFormat::Text);
        assert!("csv".parse::<RecordFormat>().is_err());
    }
}
