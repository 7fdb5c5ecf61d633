//! Weather schedule controller.
//!
//! Floors the wall clock to the current period boundary, classifies the
//! weather once per period, applies the result to the scene sinks, and tells
//! the caller how long to wait before the next re-evaluation. Every client
//! running the same seed and period length converges on the same schedule
//! because the period boundary is derived from UTC alone.

pub mod classifier;
pub mod config;

// Re-exports
pub use classifier::Weather;
pub use config::WeatherConfig;

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::Error;
use crate::scene::{cloud_parameter, SkySink, VisibilityToggle};
use classifier::classify;

/// Receives a notification every time the weather is (re)evaluated.
pub trait WeatherObserver {
    fn weather_updated(&mut self, weather: Weather);
}

/// Scene object groups toggled per weather category. Groups for a category
/// may be left empty; toggling is then skipped for it.
#[derive(Default)]
pub struct WeatherAssetGroups {
    pub sunny: Vec<Box<dyn VisibilityToggle>>,
    pub cloudy: Vec<Box<dyn VisibilityToggle>>,
    pub rainy: Vec<Box<dyn VisibilityToggle>>,
    pub snowy: Vec<Box<dyn VisibilityToggle>>,
}

// ---------------------------------------------------------------------------
// WeatherSystem
// ---------------------------------------------------------------------------

/// Main weather system. Call [`update`](Self::update) once, then again after
/// each returned delay elapses.
pub struct WeatherSystem {
    config: WeatherConfig,
    monthly: [u32; 12],
    groups: WeatherAssetGroups,
    sky: Option<Box<dyn SkySink>>,
    observers: Vec<Box<dyn WeatherObserver>>,
    current: Option<Weather>,
    sky_advisory_logged: bool,
}

impl WeatherSystem {
    /// Validate the configuration and create the system.
    ///
    /// Validation failures are fatal: they are logged once and the schedule
    /// never starts.
    pub fn new(
        config: WeatherConfig,
        groups: WeatherAssetGroups,
        sky: Option<Box<dyn SkySink>>,
    ) -> Result<Self, Error> {
        let monthly = config.validate().inspect_err(|e| {
            log::error!("invalid weather configuration: {e}");
        })?;

        if groups.sunny.is_empty()
            && groups.cloudy.is_empty()
            && groups.rainy.is_empty()
            && groups.snowy.is_empty()
        {
            log::warn!("no weather asset groups configured, visibility toggling is disabled");
        }

        Ok(Self {
            config,
            monthly,
            groups,
            sky,
            observers: Vec::new(),
            current: None,
            sky_advisory_logged: false,
        })
    }

    /// Length of one weather period in seconds.
    #[inline]
    pub fn period_seconds(&self) -> i64 {
        60 * self.config.change_span_minutes as i64
    }

    /// Seconds elapsed since the start of the current period.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp() % self.period_seconds()
    }

    /// Weather of the current period, once the first update has run.
    #[inline]
    pub fn current_weather(&self) -> Option<Weather> {
        self.current
    }

    /// Re-evaluate the weather for the period containing `now`.
    ///
    /// Classification is pinned to the period start, so any two calls within
    /// the same period produce the same result no matter when they happen.
    /// Returns the delay until the next evaluation; the extra second guards
    /// against re-triggering inside the same period on scheduling jitter.
    pub fn update(&mut self, now: DateTime<Utc>) -> Duration {
        let elapsed = self.elapsed_seconds(now);
        let period_start = now - chrono::Duration::seconds(elapsed);
        let weather = classify(period_start, self.config.random_seed, &self.monthly);

        if self.current != Some(weather) {
            log::info!("weather changed to {weather:?} (period start {period_start})");
        }

        for group in &mut self.groups.sunny {
            group.set_visible(weather == Weather::Sunny);
        }
        for group in &mut self.groups.cloudy {
            group.set_visible(weather == Weather::Cloudy);
        }
        for group in &mut self.groups.rainy {
            group.set_visible(weather == Weather::Rainy);
        }
        for group in &mut self.groups.snowy {
            group.set_visible(weather == Weather::Snowy);
        }

        self.apply_cloud_coverage(weather);
        self.current = Some(weather);

        for observer in &mut self.observers {
            observer.weather_updated(weather);
        }

        Duration::from_secs((self.period_seconds() - elapsed + 1) as u64)
    }

    /// Register an observer; invoked in registration order on every update.
    ///
    /// With `notify_on_register` enabled, an observer registered after the
    /// first evaluation is called back immediately with the current weather.
    pub fn register_observer(&mut self, mut observer: Box<dyn WeatherObserver>) {
        if self.config.notify_on_register {
            if let Some(weather) = self.current {
                observer.weather_updated(weather);
            }
        }
        self.observers.push(observer);
    }

    fn apply_cloud_coverage(&mut self, weather: Weather) {
        let Some(sky) = self.sky.as_mut() else {
            return;
        };

        let percent = match weather {
            Weather::Sunny => self.config.sunny_cloud_coverage,
            Weather::Cloudy => self.config.cloudy_cloud_coverage,
            Weather::Rainy | Weather::Snowy => self.config.stormy_cloud_coverage,
        };

        match cloud_parameter(sky.renderer_id()) {
            Some(name) => sky.set_parameter(name, percent as f32 / 100.0),
            None => {
                if !self.sky_advisory_logged {
                    log::warn!(
                        "sky renderer '{}' is not supported, cloud coverage will not be forwarded",
                        sky.renderer_id()
                    );
                    self.sky_advisory_logged = true;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct SharedToggle(Rc<RefCell<Option<bool>>>);

    impl VisibilityToggle for SharedToggle {
        fn set_visible(&mut self, visible: bool) {
            *self.0.borrow_mut() = Some(visible);
        }
    }

    struct RecordingSky {
        id: &'static str,
        parameters: Rc<RefCell<Vec<(String, f32)>>>,
    }

    impl SkySink for RecordingSky {
        fn renderer_id(&self) -> &str {
            self.id
        }

        fn set_parameter(&mut self, name: &str, value: f32) {
            self.parameters.borrow_mut().push((name.to_string(), value));
        }
    }

    struct RecordingObserver {
        label: &'static str,
        events: Rc<RefCell<Vec<(&'static str, Weather)>>>,
    }

    impl WeatherObserver for RecordingObserver {
        fn weather_updated(&mut self, weather: Weather) {
            self.events.borrow_mut().push((self.label, weather));
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn system(config: WeatherConfig) -> WeatherSystem {
        WeatherSystem::new(config, WeatherAssetGroups::default(), None).unwrap()
    }

    #[test]
    fn test_invalid_table_blocks_startup() {
        let cfg = WeatherConfig {
            monthly_sunny_percentage: vec![50; 3],
            ..Default::default()
        };
        let result = WeatherSystem::new(cfg, WeatherAssetGroups::default(), None);
        assert!(matches!(result, Err(Error::MonthlyTableLength(3))));
    }

    #[test]
    fn test_elapsed_and_rearm_delay() {
        // periodSeconds=3600 and unix time congruent to 1800 mod 3600
        let mut sys = system(WeatherConfig::default());
        let now = at("1970-01-01T00:30:00Z");
        assert_eq!(sys.elapsed_seconds(now), 1800);
        let delay = sys.update(now);
        assert_eq!(delay, Duration::from_secs(1801));
    }

    #[test]
    fn test_classification_pinned_to_period_start() {
        let cfg = WeatherConfig::default();
        let mut early = system(cfg.clone());
        let mut late = system(cfg);

        // Two instants inside the same 60-minute period
        early.update(at("2024-02-10T14:00:05Z"));
        late.update(at("2024-02-10T14:59:59Z"));
        assert_eq!(early.current_weather(), late.current_weather());
    }

    #[test]
    fn test_matches_direct_classification_of_period_start() {
        let cfg = WeatherConfig::default();
        let table = cfg.validate().unwrap();
        let mut sys = system(cfg);
        sys.update(at("2024-02-10T14:23:45Z"));
        let expected = classifier::classify(at("2024-02-10T14:00:00Z"), 0, &table);
        assert_eq!(sys.current_weather(), Some(expected));
    }

    #[test]
    fn test_independent_instances_agree() {
        // The deterministic core is the only synchronization mechanism
        let mut a = system(WeatherConfig::default());
        let mut b = system(WeatherConfig::default());
        for ts in [
            "2024-01-01T00:10:00Z",
            "2024-04-15T08:45:00Z",
            "2024-08-20T22:30:30Z",
            "2024-12-31T23:59:59Z",
        ] {
            a.update(at(ts));
            b.update(at(ts));
            assert_eq!(a.current_weather(), b.current_weather(), "diverged at {ts}");
        }
    }

    #[test]
    fn test_different_seeds_can_diverge() {
        let mut diverged = false;
        for ts in (0..200).map(|i| {
            at("2024-06-01T00:00:00Z") + chrono::Duration::hours(i)
        }) {
            let mut a = system(WeatherConfig::default());
            let mut b = system(WeatherConfig {
                random_seed: 1,
                ..Default::default()
            });
            a.update(ts);
            b.update(ts);
            if a.current_weather() != b.current_weather() {
                diverged = true;
                break;
            }
        }
        assert!(diverged, "seeds 0 and 1 never diverged over 200 periods");
    }

    #[test]
    fn test_exactly_one_group_visible() {
        let flags: Vec<Rc<RefCell<Option<bool>>>> =
            (0..4).map(|_| Rc::new(RefCell::new(None))).collect();
        let groups = WeatherAssetGroups {
            sunny: vec![Box::new(SharedToggle(flags[0].clone()))],
            cloudy: vec![Box::new(SharedToggle(flags[1].clone()))],
            rainy: vec![Box::new(SharedToggle(flags[2].clone()))],
            snowy: vec![Box::new(SharedToggle(flags[3].clone()))],
        };
        let mut sys = WeatherSystem::new(WeatherConfig::default(), groups, None).unwrap();
        sys.update(at("2024-02-10T14:00:05Z"));

        let visible: usize = flags
            .iter()
            .filter(|f| f.borrow().unwrap_or(false))
            .count();
        assert_eq!(visible, 1, "exactly one weather group should be visible");
        assert!(flags.iter().all(|f| f.borrow().is_some()), "all groups toggled");
    }

    #[test]
    fn test_cloud_coverage_forwarded_per_tier() {
        let params = Rc::new(RefCell::new(Vec::new()));
        let sky = RecordingSky {
            id: "CaminoVR/Skybox",
            parameters: params.clone(),
        };
        let mut sys =
            WeatherSystem::new(WeatherConfig::default(), WeatherAssetGroups::default(), Some(Box::new(sky)))
                .unwrap();
        sys.update(at("2024-02-10T14:00:05Z"));

        let params = params.borrow();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].0, "_CloudCoverage");
        let expected = match sys.current_weather().unwrap() {
            Weather::Sunny => 0.4,
            Weather::Cloudy => 0.8,
            Weather::Rainy | Weather::Snowy => 1.0,
        };
        assert!((params[0].1 - expected).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_sky_renderer_is_skipped() {
        let params = Rc::new(RefCell::new(Vec::new()));
        let sky = RecordingSky {
            id: "Custom/ProceduralSky",
            parameters: params.clone(),
        };
        let mut sys =
            WeatherSystem::new(WeatherConfig::default(), WeatherAssetGroups::default(), Some(Box::new(sky)))
                .unwrap();
        sys.update(at("2024-02-10T14:00:05Z"));
        assert!(params.borrow().is_empty());
    }

    #[test]
    fn test_observers_notified_in_registration_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut sys = system(WeatherConfig::default());
        sys.register_observer(Box::new(RecordingObserver {
            label: "first",
            events: events.clone(),
        }));
        sys.register_observer(Box::new(RecordingObserver {
            label: "second",
            events: events.clone(),
        }));
        sys.update(at("2024-02-10T14:00:05Z"));

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, "first");
        assert_eq!(events[1].0, "second");
        assert_eq!(events[0].1, events[1].1);
    }

    #[test]
    fn test_notify_on_register_disabled_by_default() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut sys = system(WeatherConfig::default());
        sys.update(at("2024-02-10T14:00:05Z"));
        sys.register_observer(Box::new(RecordingObserver {
            label: "late",
            events: events.clone(),
        }));
        assert!(events.borrow().is_empty(), "late observer called without opting in");
    }

    #[test]
    fn test_notify_on_register_enabled() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut sys = system(WeatherConfig {
            notify_on_register: true,
            ..Default::default()
        });
        sys.update(at("2024-02-10T14:00:05Z"));
        sys.register_observer(Box::new(RecordingObserver {
            label: "late",
            events: events.clone(),
        }));

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1, sys.current_weather().unwrap());
    }

    #[test]
    fn test_no_immediate_callback_before_first_update() {
        // Even with the flag on, there is nothing to report before update()
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut sys = system(WeatherConfig {
            notify_on_register: true,
            ..Default::default()
        });
        sys.register_observer(Box::new(RecordingObserver {
            label: "early",
            events: events.clone(),
        }));
        assert!(events.borrow().is_empty());
    }
}
