//! Weather system configuration.

use serde::{Deserialize, Serialize};

use crate::core::Error;

/// Weather configuration. Defaults reproduce the reference deployment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Seed mixed into every deterministic draw. Instances that should agree
    /// must share it.
    pub random_seed: u32,
    /// Length of one weather period in minutes. Must be positive.
    pub change_span_minutes: i32,
    /// Probability (percent) of sunny weather per month, January first.
    /// Must contain exactly 12 entries.
    pub monthly_sunny_percentage: Vec<u32>,

    /// Cloud coverage percent forwarded to the sky for sunny weather.
    pub sunny_cloud_coverage: u32,
    /// Cloud coverage percent for cloudy weather.
    pub cloudy_cloud_coverage: u32,
    /// Cloud coverage percent for rain and snow.
    pub stormy_cloud_coverage: u32,

    /// Call a newly registered observer immediately when the system is
    /// already initialized. Off by default for compatibility with the
    /// original dispatch behavior.
    pub notify_on_register: bool,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            random_seed: 0,
            change_span_minutes: 60,
            monthly_sunny_percentage: vec![75, 65, 55, 50, 45, 30, 35, 50, 40, 45, 60, 75],
            sunny_cloud_coverage: 40,
            cloudy_cloud_coverage: 80,
            stormy_cloud_coverage: 100,
            notify_on_register: false,
        }
    }
}

impl WeatherConfig {
    /// Validate the configuration, returning the monthly table as a fixed
    /// array.
    ///
    /// A table whose length is not exactly 12 and a non-positive change span
    /// are fatal configuration errors; the schedule must not start.
    pub fn validate(&self) -> Result<[u32; 12], Error> {
        if self.change_span_minutes <= 0 {
            return Err(Error::InvalidWeatherSpan(self.change_span_minutes));
        }
        let len = self.monthly_sunny_percentage.len();
        self.monthly_sunny_percentage
            .as_slice()
            .try_into()
            .map_err(|_| Error::MonthlyTableLength(len))
    }
}
