//! Plain-text rendering of the session and the mounted page.

use medvida_core::constants::{LOADER_APPROACH_END, LOADER_DRAWING_END};
use medvida_core::layout::{menu_visible, nav_items};
use medvida_core::views::{
    CheckoutView, DoctorProfileView, DoctorSelectionView, LandingView, PlansView, SpecialtiesView,
};
use medvida_core::{CoverPhase, LoaderPhase, PageId, PageView, SessionSnapshot};
use std::fmt::Write;
use tokio::time::Instant;

/// The loading cover, or `None` when the page is uncovered.
pub fn cover(snapshot: &SessionSnapshot, now: Instant) -> Option<String> {
    if snapshot.cover == CoverPhase::Idle {
        return None;
    }
    let art = match snapshot.loader_phase(now) {
        LoaderPhase::Drawing => "~~~~/\\~~~~",
        LoaderPhase::Approaching => "~~/\\~ MedVida ~/\\~~",
        LoaderPhase::Done => "MedVida",
    };
    let phase = match snapshot.cover {
        CoverPhase::Showing => "carregando",
        CoverPhase::ContentSwapped => "preparando",
        CoverPhase::Hiding | CoverPhase::Idle => "pronto",
    };
    Some(format!("[ {art} ] {phase}..."))
}

/// When the loader animation next changes phase.
pub fn next_loader_change(snapshot: &SessionSnapshot) -> Option<Instant> {
    if snapshot.cover == CoverPhase::Idle {
        return None;
    }
    let shown_at = snapshot.cover_shown_at?;
    [LOADER_DRAWING_END, LOADER_APPROACH_END]
        .into_iter()
        .map(|offset| shown_at + offset)
        .find(|at| *at > Instant::now())
}

pub fn menu(page: PageId, scroll_y: f64, viewport_height: f64) -> Option<String> {
    if !menu_visible(page, scroll_y, viewport_height) {
        return None;
    }
    let items: Vec<String> = nav_items(page)
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect();
    Some(format!("MedVida | {}", items.join("  ")))
}

pub fn page(view: &PageView) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = match view {
        PageView::Landing(v) => landing(&mut out, v),
        PageView::Specialties(v) => specialties(&mut out, v),
        PageView::Plans(v) => plans(&mut out, v),
        PageView::DoctorSelection(v) => doctor_selection(&mut out, v),
        PageView::DoctorProfile(v) => doctor_profile(&mut out, v),
        PageView::Checkout(v) => checkout(&mut out, v),
    };
    out
}

/// The parts of a page that change on their own timers.
pub fn live_line(view: &PageView) -> Option<String> {
    match view {
        PageView::Landing(v) => v
            .featured()
            .map(|d| format!("em destaque: {} ({})", d.name, d.specialty)),
        PageView::Checkout(v) if v.countdown().is_expired() => {
            Some("reserva expirada".to_string())
        }
        PageView::Checkout(v) => Some(format!("reserva: {}", v.countdown().label())),
        _ => None,
    }
}

fn landing(out: &mut String, view: &LandingView) -> std::fmt::Result {
    writeln!(out, "== Sua saúde na palma da mão ==")?;
    writeln!(out, "[book-now] Agendar Agora   [plans] Ver Planos")?;
    if let Some(doctor) = view.featured() {
        writeln!(out, "Nossos Profissionais: {} ({})", doctor.name, doctor.specialty)?;
    }
    if view.how_it_works_open() {
        writeln!(out, "Como funciona:")?;
        writeln!(out, "  1. Escolha a especialidade")?;
        writeln!(out, "  2. Escolha o médico e o horário")?;
        writeln!(out, "  3. Pague com Pix ou cartão e receba o link da consulta")?;
    }
    for testimonial in view.testimonials() {
        writeln!(
            out,
            "\"{}\" ({}, {})",
            testimonial.text, testimonial.name, testimonial.rating
        )?;
    }
    Ok(())
}

fn specialties(out: &mut String, view: &SpecialtiesView) -> std::fmt::Result {
    writeln!(out, "== Especialidades ==")?;
    for card in view.cards() {
        writeln!(
            out,
            "{} {:<15} a partir de {}  {} ({} avaliações)  {} médicos  [specialty {}]",
            card.icon,
            card.specialty.label(),
            card.min_price,
            card.rating,
            card.reviews,
            card.available_doctors,
            card.specialty.key()
        )?;
    }
    Ok(())
}

fn plans(out: &mut String, view: &PlansView) -> std::fmt::Result {
    writeln!(out, "== Planos ==")?;
    for plan in view.plans() {
        let flag = if plan.recommended { "  ★ recomendado" } else { "" };
        writeln!(out, "{}: {}/mês{}", plan.name, plan.price, flag)?;
        writeln!(out, "  {}", plan.description)?;
        for benefit in &plan.benefits {
            writeln!(out, "  + {benefit}")?;
        }
    }
    writeln!(out, "[book-now] Assinar")?;
    Ok(())
}

fn doctor_selection(out: &mut String, view: &DoctorSelectionView) -> std::fmt::Result {
    writeln!(out, "== {} ==", view.specialty().label())?;
    if view.doctors().is_empty() {
        writeln!(out, "Nenhum profissional disponível.")?;
    }
    for doctor in view.doctors() {
        writeln!(
            out,
            "{} ({}) {}  {}  próximo: {}  [profile {} | book {}]",
            doctor.name,
            doctor.license,
            doctor.rating,
            doctor.price,
            doctor.availability,
            doctor.id,
            doctor.id
        )?;
    }
    Ok(())
}

fn doctor_profile(out: &mut String, view: &DoctorProfileView) -> std::fmt::Result {
    let doctor = view.doctor();
    writeln!(out, "== {} ==", doctor.name)?;
    writeln!(
        out,
        "{} | {} | {} ({} avaliações) | {}",
        doctor.specialty, doctor.license, doctor.rating, doctor.review_count, doctor.price
    )?;
    writeln!(out, "{}", doctor.bio)?;
    for line in doctor.education.iter().chain(&doctor.certifications) {
        writeln!(out, "  - {line}")?;
    }

    writeln!(out, "{}", view.month_label())?;
    let selected = view.selected_day().map(|d| d.day());
    let days: Vec<String> = view
        .days()
        .iter()
        .map(|d| {
            let cell = format!("{} {}", d.weekday_label(), d.day());
            if Some(d.day()) == selected {
                format!("[{cell}]")
            } else {
                cell
            }
        })
        .collect();
    writeln!(out, "{}", days.join("  "))?;
    let slots: Vec<String> = view
        .slots()
        .iter()
        .map(|s| {
            if view.selected_slot() == Some(*s) {
                format!("[{s}]")
            } else {
                s.to_string()
            }
        })
        .collect();
    writeln!(out, "{}", slots.join("  "))?;

    match view.booking_label() {
        Some(label) => writeln!(out, "{label}  [confirm]")?,
        None => writeln!(out, "Escolha um horário")?,
    }
    for review in view.reviews() {
        writeln!(out, "\"{}\" ({})", review.text, review.name)?;
    }
    Ok(())
}

fn checkout(out: &mut String, view: &CheckoutView) -> std::fmt::Result {
    writeln!(out, "== Pagamento ==")?;
    writeln!(out, "{} | {}", view.doctor().name, view.booking_time())?;
    writeln!(out, "Total: {}", view.total())?;
    writeln!(out, "Forma de pagamento: {}", view.payment_method())?;
    if !view.card().is_empty() {
        let brand = view.card().brand().map_or("?", |b| b.name());
        writeln!(out, "Cartão: {} ({brand})", view.card())?;
    }
    writeln!(out, "[pix | card <número>]  [confirm] Finalizar Pagamento")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use medvida_core::Navigator;
    use std::time::Duration;

    fn snapshot(cover: CoverPhase, shown_at: Option<Instant>) -> SessionSnapshot {
        SessionSnapshot {
            state: Navigator::new().state().clone(),
            cover,
            cover_shown_at: shown_at,
            accepted: 0,
            commits: 0,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cover_follows_loader_phase() {
        let shown = Instant::now();
        let snap = snapshot(CoverPhase::Showing, Some(shown));
        assert!(cover(&snap, shown).expect("covered").contains("~~~~/\\~~~~"));
        assert!(
            cover(&snap, shown + Duration::from_millis(1_300))
                .expect("covered")
                .contains("MedVida")
        );
        assert!(cover(&snapshot(CoverPhase::Idle, None), shown).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn next_loader_change_skips_past_boundaries() {
        let shown = Instant::now();
        let snap = snapshot(CoverPhase::Showing, Some(shown));
        assert_eq!(next_loader_change(&snap), Some(shown + LOADER_DRAWING_END));

        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(next_loader_change(&snap), Some(shown + LOADER_APPROACH_END));
    }

    #[test]
    fn menu_marks_active_page() {
        let line = menu(PageId::Plans, 0.0, 800.0).expect("visible");
        assert!(line.contains("[Planos]"));
        assert!(menu(PageId::Landing, 0.0, 800.0).is_none());
    }
}
