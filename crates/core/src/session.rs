//! Browsing session driver.
//!
//! A [`Session`] runs as one tokio task that owns the [`Navigator`] and the
//! [`TransitionSequencer`]. The presentation layer holds a [`SessionHandle`]:
//! - intents go in over an unbounded mpsc channel,
//! - snapshots come out over a `watch` channel,
//! - user-visible notices are published on a `broadcast` channel.
//!
//! Because the task is the only place that touches navigation state, two navigation requests can
//! never race each other; the sequencer decides whether a late request retargets the current
//! transition or waits for the next one.

use crate::navigation::{Intent, NavigationState, Navigator, Notice, PageId, PendingTransition};
use crate::sequencer::{
    Admission, CoverPhase, LoaderPhase, TransitionSequencer, TransitionTimings,
};
use crate::{CoreError, CoreResult};
use medvida_catalog::{Doctor, Specialty};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

const NOTICE_CAPACITY: usize = 16;

/// What the rendering surface sees at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: NavigationState,
    pub cover: CoverPhase,
    /// When the current cover started animating in.
    pub cover_shown_at: Option<Instant>,
    /// Intents taken in by the session so far.
    pub accepted: u64,
    /// Page switches committed so far.
    pub commits: u64,
}

impl SessionSnapshot {
    /// No transition is running and the current page is interactive.
    pub fn is_settled(&self) -> bool {
        self.cover == CoverPhase::Idle && !self.state.is_transitioning()
    }

    pub fn loader_phase(&self, now: Instant) -> LoaderPhase {
        match (self.cover, self.cover_shown_at) {
            (CoverPhase::Idle, _) | (_, None) => LoaderPhase::Done,
            (_, Some(shown_at)) => LoaderPhase::at(now.saturating_duration_since(shown_at)),
        }
    }
}

/// Cloneable front door to a running session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    intents: mpsc::UnboundedSender<Intent>,
    snapshots: watch::Receiver<SessionSnapshot>,
    notices: broadcast::Sender<Notice>,
    sent: Arc<AtomicU64>,
    id: Uuid,
}

impl SessionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Send an intent to the session.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SessionClosed`] if the session task has stopped.
    pub fn dispatch(&self, intent: Intent) -> CoreResult<()> {
        self.intents
            .send(intent)
            .map_err(|_| CoreError::SessionClosed)?;
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn request_navigation(&self, target: PageId) -> CoreResult<()> {
        self.dispatch(Intent::Navigate(target))
    }

    pub fn select_specialty(&self, specialty: Specialty) -> CoreResult<()> {
        self.dispatch(Intent::SelectSpecialty(specialty))
    }

    pub fn select_doctor(&self, doctor: Doctor) -> CoreResult<()> {
        self.dispatch(Intent::SelectDoctor(doctor))
    }

    pub fn book_slot(&self, doctor: Doctor, time: impl Into<String>) -> CoreResult<()> {
        self.dispatch(Intent::BookSlot {
            doctor,
            time: time.into(),
        })
    }

    pub fn complete_booking(&self) -> CoreResult<()> {
        self.dispatch(Intent::CompleteBooking)
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that wakes on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Wait until every intent dispatched through this handle (or its clones) has been taken in
    /// and the cover is down again.
    pub async fn settled(&self) -> CoreResult<SessionSnapshot> {
        let sent = self.sent.load(Ordering::SeqCst);
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|s| s.accepted >= sent && s.is_settled())
            .await
            .map_err(|_| CoreError::SessionClosed)?;
        Ok(snapshot.clone())
    }
}

/// The session task state.
pub struct Session {
    id: Uuid,
    navigator: Navigator,
    sequencer: TransitionSequencer,
    timings: TransitionTimings,
    intents: mpsc::UnboundedReceiver<Intent>,
    snapshots: watch::Sender<SessionSnapshot>,
    notices: broadcast::Sender<Notice>,
    cover_shown_at: Option<Instant>,
    accepted: u64,
    commits: u64,
    intents_closed: bool,
}

impl Session {
    /// Create a session showing its start-up mask, and a handle to it.
    ///
    /// The session does nothing until [`Session::run`] is awaited; see [`Session::spawn`].
    pub fn new(timings: TransitionTimings) -> (Self, SessionHandle) {
        let id = Uuid::new_v4();
        let mut navigator = Navigator::new();
        navigator.begin_transition();
        let sequencer = TransitionSequencer::starting_up();
        let cover_shown_at = Some(Instant::now());

        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot {
            state: navigator.state().clone(),
            cover: sequencer.phase(),
            cover_shown_at,
            accepted: 0,
            commits: 0,
        });
        let (notice_tx, _) = broadcast::channel(NOTICE_CAPACITY);

        let handle = SessionHandle {
            intents: intent_tx,
            snapshots: snapshot_rx,
            notices: notice_tx.clone(),
            sent: Arc::new(AtomicU64::new(0)),
            id,
        };
        let session = Self {
            id,
            navigator,
            sequencer,
            timings,
            intents: intent_rx,
            snapshots: snapshot_tx,
            notices: notice_tx,
            cover_shown_at,
            accepted: 0,
            commits: 0,
            intents_closed: false,
        };
        (session, handle)
    }

    /// Create a session and run it on the current tokio runtime.
    pub fn spawn(timings: TransitionTimings) -> (SessionHandle, JoinHandle<()>) {
        let (session, handle) = Self::new(timings);
        let task = tokio::spawn(session.run());
        (handle, task)
    }

    /// Drive the session until every handle has been dropped and the last transition settled.
    pub async fn run(mut self) {
        tracing::info!(session = %self.id, "session started");

        self.hold(self.timings.startup).await;
        self.lower_cover();

        loop {
            match self.sequencer.phase() {
                CoverPhase::Idle => {
                    self.navigator.finish_transition();
                    self.cover_shown_at = None;
                    self.publish();
                    if self.intents_closed {
                        break;
                    }
                    match self.intents.recv().await {
                        Some(intent) => self.accept(intent),
                        None => break,
                    }
                }
                _ => self.play().await,
            }
        }

        tracing::info!(
            session = %self.id,
            commits = self.commits,
            "session closed"
        );
    }

    /// Play the active transition through every cover phase.
    async fn play(&mut self) {
        self.publish();
        self.hold(self.timings.draw).await;

        if let Some(pending) = self.sequencer.swap() {
            let page = self.navigator.commit(pending);
            self.commits += 1;
            tracing::info!(session = %self.id, page = %page, "page committed");
        }
        self.publish();
        self.hold(self.timings.settle).await;

        self.sequencer.hide();
        self.publish();
        self.hold(self.timings.fade).await;

        self.lower_cover();
    }

    /// End the current cover; a queued transition starts a fresh one immediately.
    fn lower_cover(&mut self) {
        if self.sequencer.finish() {
            tracing::debug!(session = %self.id, "starting queued transition");
            self.navigator.begin_transition();
            self.cover_shown_at = Some(Instant::now());
        }
    }

    /// Let `period` pass while still taking in intents.
    async fn hold(&mut self, period: Duration) {
        let sleep = tokio::time::sleep(period);
        tokio::pin!(sleep);

        loop {
            if self.intents_closed {
                (&mut sleep).await;
                return;
            }
            tokio::select! {
                _ = &mut sleep => return,
                intent = self.intents.recv() => match intent {
                    Some(intent) => self.accept(intent),
                    None => self.intents_closed = true,
                },
            }
        }
    }

    fn accept(&mut self, intent: Intent) {
        self.accepted += 1;

        if intent == Intent::CompleteBooking {
            let selection = self.navigator.projected(self.sequencer.pending());
            let notice = Notice::BookingConfirmed {
                doctor: selection.selected_doctor().map(|d| d.name.to_string()),
                booking_time: selection.booking_time().map(str::to_owned),
            };
            tracing::info!(session = %self.id, "{notice}");
            // No subscribers is fine; the notice is purely informational.
            let _ = self.notices.send(notice);
        }

        let name = intent.name();
        let target = intent.target();
        let admission = self.sequencer.request(PendingTransition::from(intent));
        if admission == Admission::Started {
            self.navigator.begin_transition();
            self.cover_shown_at = Some(Instant::now());
        }
        tracing::debug!(
            session = %self.id,
            intent = name,
            target = %target,
            ?admission,
            "intent accepted"
        );
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(SessionSnapshot {
            state: self.navigator.state().clone(),
            cover: self.sequencer.phase(),
            cover_shown_at: self.cover_shown_at,
            accepted: self.accepted,
            commits: self.commits,
        });
    }
}
