//! Session runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the session and the
//! page views. Values are looked up through a caller-supplied function rather than read from
//! the process environment here, so tests can supply them without touching global state.

use crate::constants::{
    DEFAULT_CAROUSEL_INTERVAL, DEFAULT_DRAW, DEFAULT_FADE, DEFAULT_RESERVATION_HOLD,
    DEFAULT_SETTLE, DEFAULT_STARTUP, ENV_CAROUSEL_MS, ENV_CATALOG_PATH, ENV_DRAW_MS, ENV_FADE_MS,
    ENV_HOLD_SECS, ENV_SETTLE_MS, ENV_STARTUP_MS,
};
use crate::sequencer::TransitionTimings;
use crate::views::ViewSettings;
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use medvida_catalog::Catalog;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Session configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    timings: TransitionTimings,
    reservation_hold: Duration,
    carousel_interval: Duration,
    catalog_path: Option<PathBuf>,
    calendar_anchor: NaiveDate,
}

impl SessionConfig {
    /// Create a new `SessionConfig`.
    ///
    /// The draw interval, reservation hold and carousel interval must be non-zero; settle, fade
    /// and startup may be zero.
    pub fn new(
        timings: TransitionTimings,
        reservation_hold: Duration,
        carousel_interval: Duration,
        catalog_path: Option<PathBuf>,
        calendar_anchor: NaiveDate,
    ) -> CoreResult<Self> {
        if timings.draw.is_zero() {
            return Err(CoreError::InvalidConfig(
                "transition draw interval cannot be zero".into(),
            ));
        }
        if reservation_hold.as_secs() == 0 {
            return Err(CoreError::InvalidConfig(
                "reservation hold must be at least one second".into(),
            ));
        }
        if carousel_interval.is_zero() {
            return Err(CoreError::InvalidConfig(
                "carousel interval cannot be zero".into(),
            ));
        }

        Ok(Self {
            timings,
            reservation_hold,
            carousel_interval,
            catalog_path,
            calendar_anchor,
        })
    }

    /// Default values, with the booking calendar anchored on `today`.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            timings: TransitionTimings::default(),
            reservation_hold: DEFAULT_RESERVATION_HOLD,
            carousel_interval: DEFAULT_CAROUSEL_INTERVAL,
            catalog_path: None,
            calendar_anchor: today,
        }
    }

    /// Resolve configuration from named values (normally environment variables).
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        today: NaiveDate,
    ) -> CoreResult<Self> {
        let timings = TransitionTimings {
            draw: millis_from_value(ENV_DRAW_MS, lookup(ENV_DRAW_MS), DEFAULT_DRAW)?,
            settle: millis_from_value(ENV_SETTLE_MS, lookup(ENV_SETTLE_MS), DEFAULT_SETTLE)?,
            fade: millis_from_value(ENV_FADE_MS, lookup(ENV_FADE_MS), DEFAULT_FADE)?,
            startup: millis_from_value(ENV_STARTUP_MS, lookup(ENV_STARTUP_MS), DEFAULT_STARTUP)?,
        };
        let reservation_hold =
            secs_from_value(ENV_HOLD_SECS, lookup(ENV_HOLD_SECS), DEFAULT_RESERVATION_HOLD)?;
        let carousel_interval = millis_from_value(
            ENV_CAROUSEL_MS,
            lookup(ENV_CAROUSEL_MS),
            DEFAULT_CAROUSEL_INTERVAL,
        )?;
        let catalog_path = non_blank(lookup(ENV_CATALOG_PATH)).map(PathBuf::from);

        Self::new(
            timings,
            reservation_hold,
            carousel_interval,
            catalog_path,
            today,
        )
    }

    /// Replace the transition timings, e.g. to speed up scripted runs.
    pub fn with_timings(mut self, timings: TransitionTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    pub fn reservation_hold(&self) -> Duration {
        self.reservation_hold
    }

    pub fn carousel_interval(&self) -> Duration {
        self.carousel_interval
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    pub fn calendar_anchor(&self) -> NaiveDate {
        self.calendar_anchor
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            reservation_hold: self.reservation_hold,
            carousel_interval: self.carousel_interval,
            calendar_anchor: self.calendar_anchor,
        }
    }

    /// Load the configured catalog file, or the built-in catalog when none is set.
    pub fn load_catalog(&self) -> CoreResult<Catalog> {
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        Ok(catalog)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_u64(name: &str, value: &str) -> CoreResult<u64> {
    value
        .parse::<u64>()
        .map_err(|_| CoreError::InvalidConfig(format!("{name} must be a whole number, got {value:?}")))
}

/// Parse a millisecond duration from an optional value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn millis_from_value(
    name: &str,
    value: Option<String>,
    default: Duration,
) -> CoreResult<Duration> {
    match non_blank(value) {
        Some(v) => Ok(Duration::from_millis(parse_u64(name, &v)?)),
        None => Ok(default),
    }
}

/// Parse a duration in whole seconds from an optional value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn secs_from_value(name: &str, value: Option<String>, default: Duration) -> CoreResult<Duration> {
    match non_blank(value) {
        Some(v) => Ok(Duration::from_secs(parse_u64(name, &v)?)),
        None => Ok(default),
    }
}
