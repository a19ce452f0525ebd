//! Page view contracts.
//!
//! Each view is mounted from the current [`NavigationState`] and the [`Catalog`] when its page
//! becomes current, and dropped when it stops being current. Views read the selection slice they
//! need and hand [`Intent`]s back to the caller for dispatch; they never change navigation state
//! themselves. Widget state that only matters while the page is on screen (the chosen calendar
//! day, the payment method, running timers) lives inside the view and dies with it.
//!
//! [`Intent`]: crate::navigation::Intent

pub mod checkout;
pub mod doctor_profile;
pub mod doctor_selection;
pub mod landing;
pub mod payment;
pub mod plans;
pub mod specialties;

use crate::navigation::{NavigationState, PageId};
use crate::session::SessionSnapshot;
use chrono::NaiveDate;
use medvida_catalog::Catalog;
use std::sync::Arc;
use std::time::Duration;

pub use checkout::CheckoutView;
pub use doctor_profile::DoctorProfileView;
pub use doctor_selection::DoctorSelectionView;
pub use landing::LandingView;
pub use plans::PlansView;
pub use specialties::SpecialtiesView;

/// View-level settings derived from [`crate::config::SessionConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSettings {
    pub reservation_hold: Duration,
    pub carousel_interval: Duration,
    /// Date the booking calendar is built around.
    pub calendar_anchor: NaiveDate,
}

/// The mounted view for the current page.
#[derive(Debug)]
pub enum PageView {
    Landing(LandingView),
    Specialties(SpecialtiesView),
    Plans(PlansView),
    DoctorSelection(DoctorSelectionView),
    DoctorProfile(DoctorProfileView),
    Checkout(CheckoutView),
}

impl PageView {
    /// Build the view for the current page.
    ///
    /// Must be called within a tokio runtime: the landing and checkout views start timers.
    pub fn mount(state: &NavigationState, catalog: &Arc<Catalog>, settings: &ViewSettings) -> Self {
        let selection = state.selection();
        let page = state.current_page();

        let view = match page {
            PageId::Landing => None,
            PageId::Specialties => Some(PageView::Specialties(SpecialtiesView::new(catalog))),
            PageId::Plans => Some(PageView::Plans(PlansView::new(catalog))),
            PageId::DoctorSelection => selection
                .selected_specialty()
                .map(|s| PageView::DoctorSelection(DoctorSelectionView::new(s, catalog))),
            PageId::DoctorProfile => selection.selected_doctor().map(|d| {
                PageView::DoctorProfile(DoctorProfileView::new(
                    d.clone(),
                    catalog,
                    settings.calendar_anchor,
                ))
            }),
            PageId::Checkout => selection.selected_doctor().map(|d| {
                PageView::Checkout(CheckoutView::new(
                    d.clone(),
                    selection.booking_time(),
                    settings.reservation_hold,
                ))
            }),
        };

        view.unwrap_or_else(|| {
            if page != PageId::Landing {
                tracing::warn!(page = %page, "page mounted without its selection, showing landing");
            }
            PageView::Landing(LandingView::new(catalog, settings.carousel_interval))
        })
    }

    pub fn page(&self) -> PageId {
        match self {
            PageView::Landing(_) => PageId::Landing,
            PageView::Specialties(_) => PageId::Specialties,
            PageView::Plans(_) => PageId::Plans,
            PageView::DoctorSelection(_) => PageId::DoctorSelection,
            PageView::DoctorProfile(_) => PageId::DoctorProfile,
            PageView::Checkout(_) => PageId::Checkout,
        }
    }
}

/// Keeps exactly one view mounted, matching the latest settled snapshot.
///
/// A view is remounted when the page or the selection it was built from changes. Replacing the
/// view drops the previous one, which stops its timers.
#[derive(Debug)]
pub struct ViewHost {
    catalog: Arc<Catalog>,
    settings: ViewSettings,
    mounted: Option<(NavigationState, PageView)>,
}

impl ViewHost {
    pub fn new(catalog: Arc<Catalog>, settings: ViewSettings) -> Self {
        Self {
            catalog,
            settings,
            mounted: None,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Bring the mounted view in line with `snapshot`. Returns `true` if a new view was mounted.
    ///
    /// Nothing is mounted while the session-start mask is still up.
    pub fn sync(&mut self, snapshot: &SessionSnapshot) -> bool {
        let state = &snapshot.state;
        let stale = match &self.mounted {
            Some((mounted_for, _)) => {
                mounted_for.current_page() != state.current_page()
                    || mounted_for.selection() != state.selection()
            }
            None => snapshot.commits > 0 || snapshot.is_settled(),
        };
        if !stale {
            return false;
        }

        // Drop the old view before mounting the new one so its timers stop first.
        self.mounted = None;
        let view = PageView::mount(state, &self.catalog, &self.settings);
        tracing::debug!(page = %view.page(), "view mounted");
        self.mounted = Some((state.clone(), view));
        true
    }

    pub fn view(&self) -> Option<&PageView> {
        self.mounted.as_ref().map(|(_, view)| view)
    }

    pub fn view_mut(&mut self) -> Option<&mut PageView> {
        self.mounted.as_mut().map(|(_, view)| view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{Intent, Navigator};
    use crate::sequencer::CoverPhase;
    use medvida_catalog::Specialty;

    fn settings() -> ViewSettings {
        ViewSettings {
            reservation_hold: Duration::from_secs(600),
            carousel_interval: Duration::from_secs(4),
            calendar_anchor: NaiveDate::from_ymd_opt(2025, 5, 15).expect("valid date"),
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::builtin().expect("builtin catalog"))
    }

    fn settled(state: NavigationState, commits: u64) -> SessionSnapshot {
        SessionSnapshot {
            state,
            cover: CoverPhase::Idle,
            cover_shown_at: None,
            accepted: commits,
            commits,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mounts_view_matching_page() {
        let catalog = catalog();
        let mut navigator = Navigator::new();
        navigator.commit(Intent::SelectSpecialty(Specialty::Psychologist).into());

        let view = PageView::mount(navigator.state(), &catalog, &settings());
        match view {
            PageView::DoctorSelection(v) => assert_eq!(v.specialty(), Specialty::Psychologist),
            other => panic!("expected doctor selection, got {:?}", other.page()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn view_without_selection_falls_back_to_landing() {
        let view = PageView::mount(&NavigationState::default(), &catalog(), &settings());
        assert_eq!(view.page(), PageId::Landing);
    }

    #[tokio::test(start_paused = true)]
    async fn host_waits_for_startup_mask() {
        let mut host = ViewHost::new(catalog(), settings());
        let mut navigator = Navigator::new();
        navigator.begin_transition();
        let masked = SessionSnapshot {
            state: navigator.state().clone(),
            cover: CoverPhase::Showing,
            cover_shown_at: None,
            accepted: 0,
            commits: 0,
        };

        assert!(!host.sync(&masked));
        assert!(host.view().is_none());

        navigator.finish_transition();
        assert!(host.sync(&settled(navigator.state().clone(), 0)));
        assert_eq!(host.view().map(PageView::page), Some(PageId::Landing));
    }

    #[tokio::test(start_paused = true)]
    async fn host_remounts_only_on_change() {
        let mut host = ViewHost::new(catalog(), settings());
        let mut navigator = Navigator::new();

        assert!(host.sync(&settled(navigator.state().clone(), 0)));
        assert!(!host.sync(&settled(navigator.state().clone(), 0)));

        navigator.commit(Intent::Navigate(PageId::Plans).into());
        assert!(host.sync(&settled(navigator.state().clone(), 1)));
        assert_eq!(host.view().map(PageView::page), Some(PageId::Plans));
    }
}
