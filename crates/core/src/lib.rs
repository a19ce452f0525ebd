//! # MedVida Core
//!
//! Navigation core for the MedVida booking front end.
//!
//! This crate holds everything between the catalog and the rendering surface:
//! - The navigation state machine (current page plus the booking selection)
//! - The transition sequencer that plays every page switch behind a loading cover
//! - The session task that serialises intents and publishes snapshots
//! - Page view contracts, with their scoped timers
//!
//! **No rendering concerns**: drawing pages and reading user input belong in the binaries.

pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod sequencer;
pub mod session;
pub mod timer;
pub mod views;

pub use config::SessionConfig;
pub use error::{CoreError, CoreResult};
pub use navigation::{
    Intent, NavigationState, Navigator, Notice, PageId, PendingTransition, SelectionChange,
    SelectionContext,
};
pub use sequencer::{Admission, CoverPhase, LoaderPhase, TransitionSequencer, TransitionTimings};
pub use session::{Session, SessionHandle, SessionSnapshot};
pub use views::{PageView, ViewHost, ViewSettings};
