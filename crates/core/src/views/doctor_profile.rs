//! Doctor profile with the booking calendar.
//!
//! The calendar shows the working week (Monday to Friday) containing the anchor date. A weekend
//! anchor shows the following week. Each day offers the same fixed set of slots.

use crate::constants::{PROFILE_REVIEW_COUNT, TIME_SLOTS};
use crate::navigation::Intent;
use crate::{CoreError, CoreResult};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use medvida_catalog::{Catalog, Doctor, DoctorReview};
use std::sync::Arc;

const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "SEG",
        Weekday::Tue => "TER",
        Weekday::Wed => "QUA",
        Weekday::Thu => "QUI",
        Weekday::Fri => "SEX",
        Weekday::Sat => "SÁB",
        Weekday::Sun => "DOM",
    }
}

/// One bookable day on the calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    date: NaiveDate,
}

impl CalendarDay {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn weekday_label(&self) -> &'static str {
        weekday_label(self.date.weekday())
    }

    pub fn month_name(&self) -> &'static str {
        MONTHS[self.date.month0() as usize]
    }
}

/// The Monday to Friday week shown for `anchor`.
pub fn working_week(anchor: NaiveDate) -> Vec<CalendarDay> {
    let monday = match anchor.weekday() {
        Weekday::Sat => anchor.checked_add_days(Days::new(2)),
        Weekday::Sun => anchor.checked_add_days(Days::new(1)),
        weekday => anchor.checked_sub_days(Days::new(u64::from(weekday.num_days_from_monday()))),
    }
    .unwrap_or(anchor);

    monday
        .iter_days()
        .take(5)
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .map(|date| CalendarDay { date })
        .collect()
}

#[derive(Debug)]
pub struct DoctorProfileView {
    doctor: Doctor,
    reviews: Vec<DoctorReview>,
    days: Vec<CalendarDay>,
    selected_day: usize,
    selected_slot: Option<&'static str>,
}

impl DoctorProfileView {
    pub fn new(doctor: Doctor, catalog: &Arc<Catalog>, anchor: NaiveDate) -> Self {
        let days = working_week(anchor);
        let selected_day = days.iter().position(|d| d.date == anchor).unwrap_or(0);
        Self {
            doctor,
            reviews: catalog
                .doctor_reviews()
                .iter()
                .take(PROFILE_REVIEW_COUNT)
                .cloned()
                .collect(),
            days,
            selected_day,
            selected_slot: None,
        }
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn reviews(&self) -> &[DoctorReview] {
        &self.reviews
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn selected_day(&self) -> Option<&CalendarDay> {
        self.days.get(self.selected_day)
    }

    /// Calendar header, e.g. `Maio 2025`.
    pub fn month_label(&self) -> String {
        match self.selected_day() {
            Some(day) => format!("{} {}", day.month_name(), day.date.year()),
            None => String::new(),
        }
    }

    pub fn slots(&self) -> &'static [&'static str] {
        &TIME_SLOTS
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.selected_slot
    }

    /// Select a day of the shown week by its day of month. Keeps the chosen slot.
    pub fn choose_day(&mut self, day: u32) -> CoreResult<()> {
        let index = self
            .days
            .iter()
            .position(|d| d.day() == day)
            .ok_or(CoreError::DayUnavailable(day))?;
        self.selected_day = index;
        Ok(())
    }

    pub fn choose_slot(&mut self, slot: &str) -> CoreResult<()> {
        let slot = TIME_SLOTS
            .iter()
            .copied()
            .find(|s| *s == slot.trim())
            .ok_or_else(|| CoreError::SlotUnavailable(slot.to_string()))?;
        self.selected_slot = Some(slot);
        Ok(())
    }

    /// Human-readable booking time, e.g. `16 de Maio às 09:30`, once a slot is chosen.
    pub fn booking_label(&self) -> Option<String> {
        let slot = self.selected_slot?;
        let day = self.selected_day()?;
        Some(format!("{} de {} às {}", day.day(), day.month_name(), slot))
    }

    /// "Confirmar Agendamento". Nothing to confirm until a slot is chosen.
    pub fn confirm(&self) -> Option<Intent> {
        let time = self.booking_label()?;
        Some(Intent::BookSlot {
            doctor: self.doctor.clone(),
            time,
        })
    }
}
