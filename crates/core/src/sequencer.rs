//! Transition sequencer.
//!
//! Every page switch plays behind a full-screen cover:
//!
//! `Idle -> Showing -> ContentSwapped -> Hiding -> Idle`
//!
//! The sequencer holds a single active transition and a single queued one. While the cover is
//! still `Showing`, a new request retargets the active transition. Once the content has been
//! swapped, requests wait in the queue (coalescing with each other) and play as the next full
//! transition, so only one transition is ever animating.
//!
//! The sequencer is a plain state machine; [`crate::session`] drives it on a timer.

use crate::constants::{
    DEFAULT_DRAW, DEFAULT_FADE, DEFAULT_SETTLE, DEFAULT_STARTUP, LOADER_APPROACH_END,
    LOADER_DRAWING_END,
};
use crate::navigation::PendingTransition;
use std::time::Duration;

/// Phase of the loading cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoverPhase {
    /// No cover; the current page is interactive.
    Idle,
    /// Cover animating in. Content has not changed yet.
    Showing,
    /// Content swapped behind the cover, waiting for the new page to settle.
    ContentSwapped,
    /// Cover lifting.
    Hiding,
}

impl CoverPhase {
    pub fn is_covered(&self) -> bool {
        !matches!(self, CoverPhase::Idle)
    }
}

/// Animation phase of the pulse loader drawn on the cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderPhase {
    /// ECG line being traced.
    Drawing,
    /// Logo moving towards the viewer.
    Approaching,
    Done,
}

impl LoaderPhase {
    /// Loader phase after the cover has been up for `elapsed`.
    pub fn at(elapsed: Duration) -> Self {
        if elapsed < LOADER_DRAWING_END {
            LoaderPhase::Drawing
        } else if elapsed < LOADER_APPROACH_END {
            LoaderPhase::Approaching
        } else {
            LoaderPhase::Done
        }
    }
}

/// Durations of each cover phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTimings {
    pub draw: Duration,
    pub settle: Duration,
    pub fade: Duration,
    /// Length of the session-start mask.
    pub startup: Duration,
}

impl TransitionTimings {
    /// Total time a single page transition keeps the cover up.
    pub fn transition_total(&self) -> Duration {
        self.draw + self.settle + self.fade
    }
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            draw: DEFAULT_DRAW,
            settle: DEFAULT_SETTLE,
            fade: DEFAULT_FADE,
            startup: DEFAULT_STARTUP,
        }
    }
}

/// How a request was taken in by the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// The cover was idle; a new transition started.
    Started,
    /// The active transition had not swapped yet and now targets the new request.
    Retargeted,
    /// The request will play after the active transition.
    Queued,
}

#[derive(Debug)]
pub struct TransitionSequencer {
    phase: CoverPhase,
    active: Option<PendingTransition>,
    queued: Option<PendingTransition>,
    startup_mask: bool,
}

impl Default for TransitionSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionSequencer {
    /// A sequencer with the cover down.
    pub fn new() -> Self {
        Self {
            phase: CoverPhase::Idle,
            active: None,
            queued: None,
            startup_mask: false,
        }
    }

    /// A sequencer showing the session-start mask. The mask has no content to swap; requests
    /// made while it is up are queued.
    pub fn starting_up() -> Self {
        Self {
            phase: CoverPhase::Showing,
            startup_mask: true,
            ..Self::new()
        }
    }

    pub fn phase(&self) -> CoverPhase {
        self.phase
    }

    pub fn is_startup_mask(&self) -> bool {
        self.startup_mask
    }

    pub fn has_queued(&self) -> bool {
        self.queued.is_some()
    }

    /// Active then queued transitions, in the order they will commit.
    pub fn pending(&self) -> impl Iterator<Item = &PendingTransition> {
        self.active.iter().chain(self.queued.iter())
    }

    /// Take in a navigation request.
    pub fn request(&mut self, transition: PendingTransition) -> Admission {
        match self.phase {
            CoverPhase::Idle => {
                self.active = Some(transition);
                self.phase = CoverPhase::Showing;
                Admission::Started
            }
            CoverPhase::Showing if !self.startup_mask => {
                match self.active.as_mut() {
                    Some(active) => active.absorb(transition),
                    None => self.active = Some(transition),
                }
                Admission::Retargeted
            }
            _ => {
                match self.queued.as_mut() {
                    Some(queued) => queued.absorb(transition),
                    None => self.queued = Some(transition),
                }
                Admission::Queued
            }
        }
    }

    /// `Showing -> ContentSwapped`. Hands over the transition to commit, if any.
    pub fn swap(&mut self) -> Option<PendingTransition> {
        if self.phase != CoverPhase::Showing {
            tracing::debug!(phase = ?self.phase, "swap requested outside Showing");
            return None;
        }
        self.phase = CoverPhase::ContentSwapped;
        self.active.take()
    }

    /// `ContentSwapped -> Hiding`.
    pub fn hide(&mut self) {
        if self.phase == CoverPhase::ContentSwapped {
            self.phase = CoverPhase::Hiding;
        }
    }

    /// Lower the cover, or go straight back to `Showing` if a request is queued.
    ///
    /// Returns `true` when a queued transition has started.
    pub fn finish(&mut self) -> bool {
        self.startup_mask = false;
        self.active = None;
        match self.queued.take() {
            Some(next) => {
                self.active = Some(next);
                self.phase = CoverPhase::Showing;
                true
            }
            None => {
                self.phase = CoverPhase::Idle;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{Intent, PageId};
    use medvida_catalog::Specialty;

    fn go(page: PageId) -> PendingTransition {
        Intent::Navigate(page).into()
    }

    #[test]
    fn plays_phases_in_order() {
        let mut sequencer = TransitionSequencer::new();
        assert_eq!(sequencer.request(go(PageId::Plans)), Admission::Started);
        assert_eq!(sequencer.phase(), CoverPhase::Showing);

        let swapped = sequencer.swap().expect("active transition");
        assert_eq!(swapped.target(), PageId::Plans);
        assert_eq!(sequencer.phase(), CoverPhase::ContentSwapped);

        sequencer.hide();
        assert_eq!(sequencer.phase(), CoverPhase::Hiding);

        assert!(!sequencer.finish());
        assert_eq!(sequencer.phase(), CoverPhase::Idle);
    }

    #[test]
    fn request_before_swap_retargets() {
        let mut sequencer = TransitionSequencer::new();
        sequencer.request(Intent::SelectSpecialty(Specialty::Nutritionist).into());
        assert_eq!(
            sequencer.request(Intent::SelectSpecialty(Specialty::Psychologist).into()),
            Admission::Retargeted
        );

        let swapped = sequencer.swap().expect("active transition");
        assert_eq!(swapped.target(), PageId::DoctorSelection);
        assert_eq!(swapped.changes().len(), 2);
        assert!(!sequencer.has_queued());
    }

    #[test]
    fn request_after_swap_is_queued_and_coalesced() {
        let mut sequencer = TransitionSequencer::new();
        sequencer.request(go(PageId::Specialties));
        sequencer.swap();

        assert_eq!(sequencer.request(go(PageId::Plans)), Admission::Queued);
        sequencer.hide();
        assert_eq!(sequencer.request(go(PageId::Landing)), Admission::Queued);

        assert!(sequencer.finish());
        assert_eq!(sequencer.phase(), CoverPhase::Showing);
        let next = sequencer.swap().expect("queued transition");
        assert_eq!(next.target(), PageId::Landing);
    }

    #[test]
    fn startup_mask_queues_requests() {
        let mut sequencer = TransitionSequencer::starting_up();
        assert!(sequencer.is_startup_mask());
        assert_eq!(sequencer.phase(), CoverPhase::Showing);
        assert_eq!(sequencer.request(go(PageId::Plans)), Admission::Queued);

        assert!(sequencer.finish());
        assert!(!sequencer.is_startup_mask());
        assert_eq!(sequencer.swap().map(|t| t.target()), Some(PageId::Plans));
    }

    #[test]
    fn startup_mask_without_requests_goes_idle() {
        let mut sequencer = TransitionSequencer::starting_up();
        assert!(!sequencer.finish());
        assert_eq!(sequencer.phase(), CoverPhase::Idle);
    }

    #[test]
    fn pending_exposes_uncommitted_transitions() {
        let mut sequencer = TransitionSequencer::new();
        sequencer.request(go(PageId::Specialties));
        let targets: Vec<PageId> = sequencer.pending().map(|t| t.target()).collect();
        assert_eq!(targets, vec![PageId::Specialties]);

        sequencer.swap();
        assert_eq!(sequencer.pending().count(), 0);

        sequencer.request(go(PageId::Plans));
        let targets: Vec<PageId> = sequencer.pending().map(|t| t.target()).collect();
        assert_eq!(targets, vec![PageId::Plans]);
    }

    #[test]
    fn loader_phase_follows_elapsed_time() {
        assert_eq!(LoaderPhase::at(Duration::from_millis(0)), LoaderPhase::Drawing);
        assert_eq!(
            LoaderPhase::at(Duration::from_millis(1_500)),
            LoaderPhase::Approaching
        );
        assert_eq!(LoaderPhase::at(Duration::from_millis(2_500)), LoaderPhase::Done);
    }

    #[test]
    fn default_timings_match_branding() {
        let timings = TransitionTimings::default();
        assert_eq!(timings.transition_total(), Duration::from_millis(2_500));
        assert_eq!(timings.startup, Duration::from_secs(3));
    }
}
