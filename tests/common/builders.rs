//! Test data builders for creating test objects

use mpu60x0_logger::session::PipelineSettings;
use mpu60x0_logger::types::{AccelerationRange, AngularSpeedRange, RangeConfiguration};
use std::time::Duration;

/// Builder for pipeline settings with test-friendly defaults (no delay)
pub struct SettingsBuilder {
    settings: PipelineSettings,
}

impl SettingsBuilder {
    pub fn new(sample_count: u32) -> Self {
        Self {
            settings: PipelineSettings {
                sample_count,
                delay: Duration::ZERO,
                ..Default::default()
            },
        }
    }

    pub fn address(mut self, address: u8) -> Self {
        self.settings.address = address;
        self
    }

    pub fn expected_id(mut self, id: u8) -> Self {
        self.settings.expected_id = id;
        self
    }

    pub fn delay_us(mut self, delay: u64) -> Self {
        self.settings.delay = Duration::from_micros(delay);
        self
    }

    pub fn ranges(
        mut self,
        acceleration: AccelerationRange,
        angular_speed: AngularSpeedRange,
    ) -> Self {
        self.settings.ranges = RangeConfiguration::new(acceleration, angular_speed);
        self
    }

    pub fn build(self) -> PipelineSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_builder() {
        let settings = SettingsBuilder::new(4)
            .address(0x6A)
            .ranges(AccelerationRange::G16, AngularSpeedRange::Dps2000)
            .build();

        assert_eq!(settings.sample_count, 4);
        assert_eq!(settings.address, 0x6A);
        assert_eq!(settings.delay, Duration::ZERO);
        assert_eq!(settings.ranges.acceleration, AccelerationRange::G16);
    }
}
