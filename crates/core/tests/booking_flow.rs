//! End-to-end booking flows driven through a running session on virtual time.

use medvida_catalog::{Catalog, Doctor, Specialty};
use medvida_core::views::{DoctorProfileView, DoctorSelectionView};
use medvida_core::{
    CoverPhase, Intent, Notice, PageId, PageView, Session, SessionHandle, SessionSnapshot,
    TransitionTimings, ViewHost, ViewSettings,
};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

fn timings() -> TransitionTimings {
    TransitionTimings {
        draw: Duration::from_millis(200),
        settle: Duration::from_millis(50),
        fade: Duration::ZERO,
        startup: Duration::from_millis(300),
    }
}

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().expect("builtin catalog"))
}

fn settings() -> ViewSettings {
    ViewSettings {
        reservation_hold: Duration::from_secs(600),
        carousel_interval: Duration::from_secs(4),
        calendar_anchor: NaiveDate::from_ymd_opt(2025, 5, 15).expect("valid date"),
    }
}

fn doctor_of(catalog: &Catalog, specialty: Specialty) -> Doctor {
    catalog
        .doctors_by_specialty(specialty)
        .next()
        .cloned()
        .expect("doctor for specialty")
}

async fn started() -> SessionHandle {
    let (handle, _task) = Session::spawn(timings());
    handle.settled().await.expect("startup settles");
    handle
}

fn assert_consistent(snapshot: &SessionSnapshot) {
    assert!(snapshot.is_settled());
    assert!(!snapshot.state.is_transitioning());
    assert!(PageId::ALL.contains(&snapshot.state.current_page()));

    let selection = snapshot.state.selection();
    match snapshot.state.current_page() {
        PageId::DoctorProfile | PageId::Checkout => assert!(selection.selected_doctor().is_some()),
        PageId::DoctorSelection => assert!(selection.selected_specialty().is_some()),
        _ => {}
    }
}

#[tokio::test(start_paused = true)]
async fn selecting_a_specialty_lists_its_doctors() {
    let catalog = catalog();
    let handle = started().await;

    handle
        .select_specialty(Specialty::Psychologist)
        .expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");

    assert_consistent(&snapshot);
    assert_eq!(snapshot.state.current_page(), PageId::DoctorSelection);

    let mut host = ViewHost::new(Arc::clone(&catalog), settings());
    host.sync(&snapshot);
    match host.view() {
        Some(PageView::DoctorSelection(view)) => {
            assert!(!view.doctors().is_empty());
            assert!(
                view.doctors()
                    .iter()
                    .all(|d| d.specialty == Specialty::Psychologist)
            );
        }
        other => panic!("expected doctor selection, got {:?}", other.map(PageView::page)),
    }
}

#[tokio::test(start_paused = true)]
async fn booking_a_slot_reaches_checkout() {
    let catalog = catalog();
    let handle = started().await;
    let doctor = doctor_of(&catalog, Specialty::Nutritionist);

    handle.select_specialty(Specialty::Nutritionist).expect("dispatch");
    handle.settled().await.expect("settles");

    handle.book_slot(doctor.clone(), "Today 14:30").expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");

    assert_consistent(&snapshot);
    assert_eq!(snapshot.state.current_page(), PageId::Checkout);
    let selection = snapshot.state.selection();
    assert_eq!(selection.selected_doctor(), Some(&doctor));
    assert_eq!(selection.booking_time(), Some("Today 14:30"));
}

#[tokio::test(start_paused = true)]
async fn completing_a_booking_clears_the_selection() {
    let catalog = catalog();
    let handle = started().await;
    let mut notices = handle.notices();
    let doctor = doctor_of(&catalog, Specialty::Psychiatrist);

    handle.book_slot(doctor.clone(), "16 de Maio às 09:30").expect("dispatch");
    handle.settled().await.expect("settles");

    handle.complete_booking().expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");

    assert_consistent(&snapshot);
    assert_eq!(snapshot.state.current_page(), PageId::Landing);
    assert!(snapshot.state.selection().is_empty());

    match notices.try_recv().expect("booking notice") {
        Notice::BookingConfirmed {
            doctor: name,
            booking_time,
        } => {
            assert_eq!(name.as_deref(), Some(doctor.name.as_str()));
            assert_eq!(booking_time.as_deref(), Some("16 de Maio às 09:30"));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn profile_choices_stay_local_until_booked() {
    let catalog = catalog();
    let handle = started().await;
    let doctor = doctor_of(&catalog, Specialty::GeneralPractitioner);

    handle.select_doctor(doctor.clone()).expect("dispatch");
    let before = handle.settled().await.expect("settles");
    assert_eq!(before.state.current_page(), PageId::DoctorProfile);

    let mut profile = DoctorProfileView::new(doctor.clone(), &catalog, settings().calendar_anchor);
    profile.choose_day(13).expect("day in week");
    profile.choose_slot("17:00").expect("listed slot");

    assert_eq!(handle.snapshot().state, before.state);
    assert!(handle.snapshot().state.selection().booking_time().is_none());

    let intent = profile.confirm().expect("slot chosen");
    handle.dispatch(intent).expect("dispatch");
    let after = handle.settled().await.expect("settles");
    assert_eq!(after.state.current_page(), PageId::Checkout);
    assert_eq!(
        after.state.selection().booking_time(),
        Some("13 de Maio às 17:00")
    );
}

#[tokio::test(start_paused = true)]
async fn overlapping_selections_settle_once_on_the_latest() {
    let handle = started().await;
    let before = handle.snapshot().commits;

    handle.select_specialty(Specialty::Nutritionist).expect("dispatch");
    handle.select_specialty(Specialty::Psychologist).expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");

    assert_consistent(&snapshot);
    assert_eq!(snapshot.commits, before + 1);
    assert_eq!(snapshot.state.current_page(), PageId::DoctorSelection);
    assert_eq!(
        snapshot.state.selection().selected_specialty(),
        Some(Specialty::Psychologist)
    );
}

#[tokio::test(start_paused = true)]
async fn request_after_swap_plays_as_next_transition() {
    let handle = started().await;
    let mut snapshots = handle.subscribe();

    handle.request_navigation(PageId::Specialties).expect("dispatch");
    snapshots
        .wait_for(|s| s.cover == CoverPhase::ContentSwapped)
        .await
        .expect("swap");

    handle.request_navigation(PageId::Plans).expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");

    assert_eq!(snapshot.commits, 2);
    assert_eq!(snapshot.state.current_page(), PageId::Plans);
}

#[tokio::test(start_paused = true)]
async fn selection_is_visible_as_soon_as_the_page_is() {
    let catalog = catalog();
    let handle = started().await;
    let doctor = doctor_of(&catalog, Specialty::Psychologist);
    let mut snapshots = handle.subscribe();

    handle.select_doctor(doctor.clone()).expect("dispatch");
    let first = snapshots
        .wait_for(|s| s.state.current_page() == PageId::DoctorProfile)
        .await
        .expect("profile shown")
        .clone();

    assert_eq!(first.state.selection().selected_doctor(), Some(&doctor));
}

#[tokio::test(start_paused = true)]
async fn navigating_to_the_current_page_keeps_the_selection() {
    let handle = started().await;

    handle.select_specialty(Specialty::Psychiatrist).expect("dispatch");
    let before = handle.settled().await.expect("settles");

    handle
        .request_navigation(PageId::DoctorSelection)
        .expect("dispatch");
    let after = handle.settled().await.expect("settles");

    assert_eq!(after.commits, before.commits + 1);
    assert_eq!(after.state.current_page(), PageId::DoctorSelection);
    assert_eq!(after.state.selection(), before.state.selection());
}

#[tokio::test(start_paused = true)]
async fn missing_prerequisites_redirect() {
    let handle = started().await;

    handle.request_navigation(PageId::Checkout).expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");
    assert_eq!(snapshot.state.current_page(), PageId::Landing);

    handle
        .request_navigation(PageId::DoctorSelection)
        .expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");
    assert_eq!(snapshot.state.current_page(), PageId::Specialties);
    assert_consistent(&snapshot);
}

#[tokio::test(start_paused = true)]
async fn returning_home_drops_the_booking() {
    let catalog = catalog();
    let handle = started().await;
    let doctor = doctor_of(&catalog, Specialty::Psychologist);

    handle.book_slot(doctor, "Amanhã às 10:00").expect("dispatch");
    handle.settled().await.expect("settles");

    handle.request_navigation(PageId::Landing).expect("dispatch");
    let home = handle.settled().await.expect("settles");
    assert_consistent(&home);
    assert_eq!(home.state.current_page(), PageId::Landing);
    assert!(home.state.selection().is_empty());

    handle.request_navigation(PageId::Checkout).expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");
    assert_eq!(snapshot.state.current_page(), PageId::Landing);
}

#[tokio::test(start_paused = true)]
async fn random_intent_sequences_stay_consistent() {
    let catalog = catalog();
    let handle = started().await;
    let doctor = doctor_of(&catalog, Specialty::Nutritionist);

    let script = [
        Intent::Navigate(PageId::DoctorProfile),
        Intent::SelectSpecialty(Specialty::Nutritionist),
        Intent::Navigate(PageId::Plans),
        Intent::SelectDoctor(doctor.clone()),
        Intent::CompleteBooking,
        Intent::Navigate(PageId::Checkout),
        Intent::BookSlot {
            doctor: doctor.clone(),
            time: "Hoje às 14:30".into(),
        },
        Intent::Navigate(PageId::DoctorSelection),
    ];

    for (i, intent) in script.into_iter().enumerate() {
        handle.dispatch(intent).expect("dispatch");
        // Alternate between letting each intent settle and firing a burst.
        if i % 2 == 1 {
            let snapshot = handle.settled().await.expect("settles");
            assert_consistent(&snapshot);
        }
    }
    let snapshot = handle.settled().await.expect("settles");
    assert_consistent(&snapshot);
}

#[tokio::test(start_paused = true)]
async fn doctor_selection_view_feeds_the_session() {
    let catalog = catalog();
    let handle = started().await;

    handle.select_specialty(Specialty::Psychologist).expect("dispatch");
    handle.settled().await.expect("settles");

    let view = DoctorSelectionView::new(Specialty::Psychologist, &catalog);
    let id = view.doctors()[0].id.as_str().to_string();
    handle
        .dispatch(view.book_direct(&id).expect("listed"))
        .expect("dispatch");
    let snapshot = handle.settled().await.expect("settles");

    assert_eq!(snapshot.state.current_page(), PageId::Checkout);
    assert_eq!(
        snapshot.state.selection().booking_time(),
        Some("Hoje às 14:30")
    );
}
