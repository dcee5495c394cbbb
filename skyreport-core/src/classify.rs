//! Threshold checks applied to a single forecast slot.

use std::ops::RangeInclusive;

/// Condition ids 800..=802: clear sky, few clouds, scattered clouds.
pub const CLEAR_SKY_IDS: RangeInclusive<u16> = 800..=802;

/// Condition ids in the OpenWeather "Rain" group.
pub const RAIN_IDS: RangeInclusive<u16> = 500..=531;

/// Condition ids in the OpenWeather "Snow" group.
pub const SNOW_IDS: RangeInclusive<u16> = 600..=622;

/// Night starts at this hour (inclusive).
pub const NIGHT_STARTS_AT: u32 = 18;

/// Night ends at this hour (exclusive).
pub const NIGHT_ENDS_AT: u32 = 6;

const KELVIN_OFFSET: f64 = 273.15;

/// OpenWeather weather condition id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionCode(pub u16);

impl ConditionCode {
    pub fn is_clear_sky(self) -> bool {
        CLEAR_SKY_IDS.contains(&self.0)
    }

    pub fn is_rain(self) -> bool {
        RAIN_IDS.contains(&self.0)
    }

    pub fn is_snow(self) -> bool {
        SNOW_IDS.contains(&self.0)
    }
}

/// `hour` is an hour of the day in the report's time zone, 0..=23.
pub fn is_night(hour: u32) -> bool {
    hour < NIGHT_ENDS_AT || hour >= NIGHT_STARTS_AT
}

/// Whole degrees Celsius, truncated toward zero.
pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    // `as` truncates toward zero and saturates; NaN becomes 0.
    (kelvin - KELVIN_OFFSET) as i32
}
