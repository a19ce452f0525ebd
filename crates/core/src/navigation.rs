//! Navigation state machine.
//!
//! [`Navigator`] is the single owner of the current page and the [`SelectionContext`]. Page views
//! never mutate either directly: they emit [`Intent`]s, the session stages each intent as a
//! [`PendingTransition`], and the navigator applies the staged selection changes and the page
//! switch together when the transition cover reaches its content-swap step.
//!
//! Prerequisites are checked when the switch is committed. A target that needs a doctor or a
//! specialty the context does not carry is redirected to a safe page instead of rendering an
//! empty view.

use crate::constants::BOOKING_CONFIRMED_MESSAGE;
use crate::CoreError;
use medvida_catalog::{Doctor, Specialty};
use std::fmt;
use std::str::FromStr;

/// Identifier of a displayable page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageId {
    Landing,
    Specialties,
    Plans,
    DoctorSelection,
    DoctorProfile,
    Checkout,
}

impl PageId {
    pub const ALL: [PageId; 6] = [
        PageId::Landing,
        PageId::Specialties,
        PageId::Plans,
        PageId::DoctorSelection,
        PageId::DoctorProfile,
        PageId::Checkout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Landing => "landing",
            PageId::Specialties => "specialties",
            PageId::Plans => "plans",
            PageId::DoctorSelection => "doctor-selection",
            PageId::DoctorProfile => "doctor-profile",
            PageId::Checkout => "checkout",
        }
    }

    /// Whether the page can only be shown with a selected doctor.
    pub fn needs_doctor(&self) -> bool {
        matches!(self, PageId::DoctorProfile | PageId::Checkout)
    }

    /// Whether the page can only be shown with a selected specialty.
    pub fn needs_specialty(&self) -> bool {
        matches!(self, PageId::DoctorSelection)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PageId::ALL
            .into_iter()
            .find(|page| page.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownPage(wanted.to_string()))
    }
}

/// What the patient has chosen so far in this session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionContext {
    specialty: Option<Specialty>,
    doctor: Option<Doctor>,
    booking_time: Option<String>,
}

impl SelectionContext {
    pub fn selected_specialty(&self) -> Option<Specialty> {
        self.specialty
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.doctor.as_ref()
    }

    pub fn booking_time(&self) -> Option<&str> {
        self.booking_time.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.specialty.is_none() && self.doctor.is_none() && self.booking_time.is_none()
    }

    fn apply(&mut self, change: SelectionChange) {
        match change {
            SelectionChange::Specialty(specialty) => self.specialty = Some(specialty),
            SelectionChange::Doctor(doctor) => self.doctor = Some(doctor),
            SelectionChange::BookingTime(time) => self.booking_time = Some(time),
            SelectionChange::Clear => *self = SelectionContext::default(),
        }
    }
}

/// A single staged edit to the [`SelectionContext`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Specialty(Specialty),
    Doctor(Doctor),
    BookingTime(String),
    Clear,
}

/// A request emitted by a page view or the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Switch page without touching the selection.
    Navigate(PageId),
    SelectSpecialty(Specialty),
    SelectDoctor(Doctor),
    BookSlot { doctor: Doctor, time: String },
    /// Confirm the booking, clear the selection and go back to the landing page.
    CompleteBooking,
}

impl Intent {
    /// The page this intent asks to show.
    pub fn target(&self) -> PageId {
        match self {
            Intent::Navigate(page) => *page,
            Intent::SelectSpecialty(_) => PageId::DoctorSelection,
            Intent::SelectDoctor(_) => PageId::DoctorProfile,
            Intent::BookSlot { .. } => PageId::Checkout,
            Intent::CompleteBooking => PageId::Landing,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Navigate(_) => "navigate",
            Intent::SelectSpecialty(_) => "select_specialty",
            Intent::SelectDoctor(_) => "select_doctor",
            Intent::BookSlot { .. } => "book_slot",
            Intent::CompleteBooking => "complete_booking",
        }
    }

    fn into_changes(self) -> Vec<SelectionChange> {
        match self {
            Intent::Navigate(_) => Vec::new(),
            Intent::SelectSpecialty(specialty) => vec![SelectionChange::Specialty(specialty)],
            Intent::SelectDoctor(doctor) => vec![SelectionChange::Doctor(doctor)],
            Intent::BookSlot { doctor, time } => vec![
                SelectionChange::Doctor(doctor),
                SelectionChange::BookingTime(time),
            ],
            Intent::CompleteBooking => vec![SelectionChange::Clear],
        }
    }
}

/// A page switch waiting for the cover to reach its swap step.
///
/// Absorbing a later transition replaces the target and appends its selection changes, so the
/// most recent request decides the page while every requested selection still lands in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTransition {
    target: PageId,
    changes: Vec<SelectionChange>,
}

impl PendingTransition {
    pub fn target(&self) -> PageId {
        self.target
    }

    pub fn changes(&self) -> &[SelectionChange] {
        &self.changes
    }

    pub fn absorb(&mut self, later: PendingTransition) {
        self.target = later.target;
        self.changes.extend(later.changes);
    }
}

impl From<Intent> for PendingTransition {
    fn from(intent: Intent) -> Self {
        Self {
            target: intent.target(),
            changes: intent.into_changes(),
        }
    }
}

/// Everything the rendering surface needs to draw the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationState {
    current_page: PageId,
    is_transitioning: bool,
    selection: SelectionContext,
}

impl NavigationState {
    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn selection(&self) -> &SelectionContext {
        &self.selection
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_page: PageId::Landing,
            is_transitioning: false,
            selection: SelectionContext::default(),
        }
    }
}

/// A user-visible message raised by the navigation core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    BookingConfirmed {
        doctor: Option<String>,
        booking_time: Option<String>,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::BookingConfirmed {
                doctor,
                booking_time,
            } => {
                f.write_str(BOOKING_CONFIRMED_MESSAGE)?;
                match (doctor, booking_time) {
                    (Some(doctor), Some(time)) => write!(f, " {doctor}, {time}."),
                    (Some(doctor), None) => write!(f, " {doctor}."),
                    _ => Ok(()),
                }
            }
        }
    }
}

/// Resolve `target` against the selection, redirecting when a prerequisite is missing.
pub fn resolve_page(target: PageId, selection: &SelectionContext) -> PageId {
    if target.needs_doctor() && selection.selected_doctor().is_none() {
        return PageId::Landing;
    }
    if target.needs_specialty() && selection.selected_specialty().is_none() {
        return PageId::Specialties;
    }
    target
}

/// Resolve `target` and drop the selection when that lands on the landing page.
fn land(target: PageId, selection: &mut SelectionContext) -> PageId {
    let page = resolve_page(target, selection);
    // Returning home starts a new booking.
    if page == PageId::Landing {
        *selection = SelectionContext::default();
    }
    page
}

/// Owner of the [`NavigationState`].
#[derive(Debug, Default)]
pub struct Navigator {
    state: NavigationState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Mark the cover as up.
    pub fn begin_transition(&mut self) {
        self.state.is_transitioning = true;
    }

    /// Apply a transition's selection changes, then switch to its (resolved) target.
    ///
    /// Returns the page that became current.
    pub fn commit(&mut self, pending: PendingTransition) -> PageId {
        let PendingTransition { target, changes } = pending;
        for change in changes {
            self.state.selection.apply(change);
        }

        let page = land(target, &mut self.state.selection);
        if page != target {
            tracing::warn!(
                requested = %target,
                redirected = %page,
                "navigation prerequisite missing, redirecting"
            );
        }
        self.state.current_page = page;
        page
    }

    /// Mark the cover as lifted.
    pub fn finish_transition(&mut self) {
        self.state.is_transitioning = false;
    }

    /// The selection as it will be once the given transitions have committed, in order.
    pub fn projected<'a>(
        &self,
        pending: impl IntoIterator<Item = &'a PendingTransition>,
    ) -> SelectionContext {
        let mut selection = self.state.selection.clone();
        for transition in pending {
            for change in &transition.changes {
                selection.apply(change.clone());
            }
            land(transition.target, &mut selection);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medvida_catalog::Catalog;

    fn doctor(id: &str) -> Doctor {
        Catalog::builtin()
            .expect("builtin catalog")
            .doctor(id)
            .cloned()
            .expect("doctor exists")
    }

    #[test]
    fn page_ids_round_trip_through_strings() {
        for page in PageId::ALL {
            assert_eq!(page.as_str().parse::<PageId>().unwrap(), page);
        }
        assert!(matches!(
            "settings".parse::<PageId>(),
            Err(CoreError::UnknownPage(p)) if p == "settings"
        ));
    }

    #[test]
    fn new_navigator_starts_on_landing_with_empty_selection() {
        let navigator = Navigator::new();
        assert_eq!(navigator.state().current_page(), PageId::Landing);
        assert!(!navigator.state().is_transitioning());
        assert!(navigator.state().selection().is_empty());
    }

    #[test]
    fn select_specialty_commits_selection_with_page() {
        let mut navigator = Navigator::new();
        let page = navigator.commit(Intent::SelectSpecialty(Specialty::Psychologist).into());
        assert_eq!(page, PageId::DoctorSelection);
        assert_eq!(
            navigator.state().selection().selected_specialty(),
            Some(Specialty::Psychologist)
        );
    }

    #[test]
    fn book_slot_sets_doctor_and_time() {
        let mut navigator = Navigator::new();
        let doc = doctor("4");
        navigator.commit(
            Intent::BookSlot {
                doctor: doc.clone(),
                time: "Hoje às 14:30".into(),
            }
            .into(),
        );
        let state = navigator.state();
        assert_eq!(state.current_page(), PageId::Checkout);
        assert_eq!(state.selection().selected_doctor(), Some(&doc));
        assert_eq!(state.selection().booking_time(), Some("Hoje às 14:30"));
    }

    #[test]
    fn complete_booking_clears_selection() {
        let mut navigator = Navigator::new();
        navigator.commit(Intent::SelectSpecialty(Specialty::Nutritionist).into());
        navigator.commit(
            Intent::BookSlot {
                doctor: doctor("1"),
                time: "16 de Maio às 14:00".into(),
            }
            .into(),
        );
        let page = navigator.commit(Intent::CompleteBooking.into());
        assert_eq!(page, PageId::Landing);
        assert!(navigator.state().selection().is_empty());
    }

    #[test]
    fn navigating_home_drops_the_booking() {
        let mut navigator = Navigator::new();
        navigator.commit(
            Intent::BookSlot {
                doctor: doctor("2"),
                time: "Hoje às 16:00".into(),
            }
            .into(),
        );

        assert_eq!(
            navigator.commit(Intent::Navigate(PageId::Landing).into()),
            PageId::Landing
        );
        assert!(navigator.state().selection().is_empty());
        assert_eq!(
            navigator.commit(Intent::Navigate(PageId::Checkout).into()),
            PageId::Landing
        );
    }

    #[test]
    fn projected_selection_is_empty_after_a_staged_return_home() {
        let mut navigator = Navigator::new();
        navigator.commit(Intent::SelectDoctor(doctor("1")).into());
        let home: PendingTransition = Intent::Navigate(PageId::Landing).into();
        let then: PendingTransition = Intent::SelectSpecialty(Specialty::Psychologist).into();

        let projected = navigator.projected([&home, &then]);
        assert_eq!(projected.selected_doctor(), None);
        assert_eq!(projected.selected_specialty(), Some(Specialty::Psychologist));
    }

    #[test]
    fn doctor_pages_without_doctor_redirect_to_landing() {
        let mut navigator = Navigator::new();
        assert_eq!(
            navigator.commit(Intent::Navigate(PageId::DoctorProfile).into()),
            PageId::Landing
        );
        assert_eq!(
            navigator.commit(Intent::Navigate(PageId::Checkout).into()),
            PageId::Landing
        );
    }

    #[test]
    fn doctor_selection_without_specialty_redirects_to_specialties() {
        let mut navigator = Navigator::new();
        assert_eq!(
            navigator.commit(Intent::Navigate(PageId::DoctorSelection).into()),
            PageId::Specialties
        );
    }

    #[test]
    fn navigating_to_current_page_keeps_selection() {
        let mut navigator = Navigator::new();
        navigator.commit(Intent::SelectDoctor(doctor("2")).into());
        let before = navigator.state().selection().clone();

        navigator.commit(Intent::Navigate(PageId::DoctorProfile).into());

        assert_eq!(navigator.state().current_page(), PageId::DoctorProfile);
        assert_eq!(navigator.state().selection(), &before);
    }

    #[test]
    fn absorbed_transition_takes_latest_target_and_keeps_changes() {
        let mut pending: PendingTransition = Intent::SelectDoctor(doctor("3")).into();
        pending.absorb(Intent::Navigate(PageId::Checkout).into());
        assert_eq!(pending.target(), PageId::Checkout);
        assert_eq!(pending.changes().len(), 1);

        let mut navigator = Navigator::new();
        assert_eq!(navigator.commit(pending), PageId::Checkout);
        assert_eq!(
            navigator.state().selection().selected_doctor().map(|d| d.id.as_str()),
            Some("3")
        );
    }

    #[test]
    fn projected_selection_includes_staged_changes() {
        let navigator = Navigator::new();
        let staged: PendingTransition = Intent::BookSlot {
            doctor: doctor("5"),
            time: "Amanhã às 09:00".into(),
        }
        .into();

        let projected = navigator.projected([&staged]);
        assert_eq!(projected.booking_time(), Some("Amanhã às 09:00"));
        assert!(navigator.state().selection().is_empty());
    }

    #[test]
    fn booking_notice_mentions_doctor_and_time() {
        let notice = Notice::BookingConfirmed {
            doctor: Some("Dr. Anderson Silva".into()),
            booking_time: Some("Hoje às 14:30".into()),
        };
        assert_eq!(
            notice.to_string(),
            "Consulta agendada com sucesso! Dr. Anderson Silva, Hoje às 14:30."
        );
    }
}
