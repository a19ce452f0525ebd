use crate::constants::DEFAULT_BOOKING_TIME;
use crate::navigation::Intent;
use crate::timer::Ticker;
use crate::views::payment::{CardNumber, PaymentMethod};
use medvida_catalog::Doctor;
use medvida_types::Price;
use std::time::Duration;

/// Counts down the time the slot is held for the patient.
#[derive(Debug)]
pub struct ReservationCountdown {
    total_secs: u64,
    ticker: Ticker,
}

impl ReservationCountdown {
    pub fn start(hold: Duration) -> Self {
        let total_secs = hold.as_secs();
        Self {
            total_secs,
            ticker: Ticker::spawn(Duration::from_secs(1), Some(total_secs)),
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.total_secs.saturating_sub(self.ticker.ticks())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs() == 0
    }

    /// Remaining time as `MM:SS`.
    pub fn label(&self) -> String {
        let remaining = self.remaining_secs();
        format!("{:02}:{:02}", remaining / 60, remaining % 60)
    }

    /// Wait for the next second. Returns `false` once the countdown has run out.
    pub async fn tick(&mut self) -> bool {
        self.ticker.changed().await
    }
}

#[derive(Debug)]
pub struct CheckoutView {
    doctor: Doctor,
    booking_time: String,
    countdown: ReservationCountdown,
    method: PaymentMethod,
    card: CardNumber,
}

impl CheckoutView {
    pub fn new(doctor: Doctor, booking_time: Option<&str>, hold: Duration) -> Self {
        Self {
            doctor,
            booking_time: booking_time.unwrap_or(DEFAULT_BOOKING_TIME).to_string(),
            countdown: ReservationCountdown::start(hold),
            method: PaymentMethod::default(),
            card: CardNumber::default(),
        }
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn booking_time(&self) -> &str {
        &self.booking_time
    }

    pub fn total(&self) -> Price {
        self.doctor.price
    }

    pub fn countdown(&self) -> &ReservationCountdown {
        &self.countdown
    }

    pub fn countdown_mut(&mut self) -> &mut ReservationCountdown {
        &mut self.countdown
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    pub fn card(&self) -> &CardNumber {
        &self.card
    }

    pub fn enter_card_number(&mut self, input: &str) {
        self.card = CardNumber::from_input(input);
    }

    /// "Finalizar Pagamento".
    pub fn confirm(&self) -> Intent {
        tracing::debug!(
            method = self.method.label(),
            doctor = %self.doctor.id,
            "booking confirmed at checkout"
        );
        Intent::CompleteBooking
    }
}
