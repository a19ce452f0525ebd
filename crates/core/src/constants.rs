//! Constants used throughout the MedVida core crate.
//!
//! Timing values are the defaults for [`crate::config::SessionConfig`]; everything else is
//! fixed presentation policy shared by the page views.

use std::time::Duration;

/// How long the cover animates in before the page content is swapped.
pub const DEFAULT_DRAW: Duration = Duration::from_millis(2_000);

/// How long the cover stays up after the swap so the new page can finish rendering.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

/// How long the cover takes to fade out once lifted.
pub const DEFAULT_FADE: Duration = Duration::from_millis(0);

/// Branding mask shown when a session starts.
pub const DEFAULT_STARTUP: Duration = Duration::from_millis(3_000);

/// Reservation hold shown on the checkout countdown (10 minutes).
pub const DEFAULT_RESERVATION_HOLD: Duration = Duration::from_secs(600);

/// Auto-advance period of the featured-doctor carousel on the landing page.
pub const DEFAULT_CAROUSEL_INTERVAL: Duration = Duration::from_millis(4_000);

/// End of the ECG drawing phase of the loader animation.
pub const LOADER_DRAWING_END: Duration = Duration::from_millis(1_200);

/// End of the logo approach phase of the loader animation.
pub const LOADER_APPROACH_END: Duration = Duration::from_millis(2_500);

/// Booking time used by the "book now" shortcut on the doctor list, and by checkout when the
/// selection carries no time.
pub const DEFAULT_BOOKING_TIME: &str = "Hoje às 14:30";

/// Consultation slots offered on every calendar day.
pub const TIME_SLOTS: [&str; 6] = ["08:00", "09:30", "11:00", "14:00", "15:30", "17:00"];

/// Number of patient reviews shown on a doctor profile.
pub const PROFILE_REVIEW_COUNT: usize = 2;

/// Fraction of the viewport height the landing page must scroll past before the persistent
/// menu appears.
pub const MENU_REVEAL_RATIO: f64 = 0.85;

/// Confirmation shown when a booking completes.
pub const BOOKING_CONFIRMED_MESSAGE: &str = "Consulta agendada com sucesso!";

pub const ENV_DRAW_MS: &str = "MEDVIDA_DRAW_MS";
pub const ENV_SETTLE_MS: &str = "MEDVIDA_SETTLE_MS";
pub const ENV_FADE_MS: &str = "MEDVIDA_FADE_MS";
pub const ENV_STARTUP_MS: &str = "MEDVIDA_STARTUP_MS";
pub const ENV_HOLD_SECS: &str = "MEDVIDA_HOLD_SECS";
pub const ENV_CAROUSEL_MS: &str = "MEDVIDA_CAROUSEL_MS";
pub const ENV_CATALOG_PATH: &str = "MEDVIDA_CATALOG_PATH";
