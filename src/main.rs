//! Demo driver: runs the day cycle and weather systems against the real
//! wall clock with logging sinks, so the deterministic output can be watched
//! from a terminal. Pass a JSON config path as the first argument to override
//! the defaults.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use skycycle::atmosphere::{DayCycleConfig, DayCycleSystem};
use skycycle::core::{logging, Error};
use skycycle::scene::{LightOrientation, LightSink};
use skycycle::weather::{
    Weather, WeatherAssetGroups, WeatherConfig, WeatherObserver, WeatherSystem,
};

/// Combined configuration for both systems.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct DemoConfig {
    day_cycle: DayCycleConfig,
    weather: WeatherConfig,
}

/// Light sink that logs what a real renderer would apply.
struct LogLight(&'static str);

impl LightSink for LogLight {
    fn apply_light(
        &mut self,
        orientation: LightOrientation,
        intensity: Option<f32>,
        temperature: Option<f32>,
    ) {
        log::info!(
            "{}: azimuth={:.2} altitude={:.2} dir={:?} intensity={:?} temperature={:?}",
            self.0,
            orientation.azimuth_deg,
            orientation.altitude_deg,
            orientation.direction(),
            intensity,
            temperature,
        );
    }
}

struct LogObserver;

impl WeatherObserver for LogObserver {
    fn weather_updated(&mut self, weather: Weather) {
        log::info!("observer: weather updated to {weather:?}");
    }
}

fn load_config() -> Result<DemoConfig, Error> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            log::info!("loaded config from {path}");
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(DemoConfig::default()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    logging::init();
    let config = load_config()?;

    let mut day_cycle = DayCycleSystem::new(
        config.day_cycle,
        Some(Box::new(LogLight("sun"))),
        Some(Box::new(LogLight("moon"))),
        None,
        Utc::now(),
    )?;
    log::info!(
        "sunrise {:.2}h, sunset {:.2}h local",
        day_cycle.sunrise_time(),
        day_cycle.sunset_time()
    );

    let mut weather = WeatherSystem::new(config.weather, WeatherAssetGroups::default(), None)?;
    weather.register_observer(Box::new(LogObserver));

    // Self-perpetuating schedule: the weather period re-arms from its own
    // returned delay, the solar tick from the configured cadence.
    let mut next_weather = Instant::now() + weather.update(Utc::now());
    loop {
        tokio::time::sleep(day_cycle.next_update_delay()).await;
        day_cycle.update(Utc::now());

        if Instant::now() >= next_weather {
            next_weather = Instant::now() + weather.update(Utc::now());
        }
    }
}
