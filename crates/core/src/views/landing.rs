use crate::navigation::{Intent, PageId};
use crate::timer::Ticker;
use medvida_catalog::{Catalog, Doctor, Testimonial};
use std::sync::Arc;
use std::time::Duration;

/// Featured-doctor carousel. Advances one card per period and wraps to the first card after the
/// last one.
#[derive(Debug)]
pub struct Carousel {
    len: usize,
    ticker: Ticker,
}

impl Carousel {
    pub fn start(len: usize, period: Duration) -> Self {
        Self {
            len,
            ticker: Ticker::spawn(period, None),
        }
    }

    /// Index of the card currently in front, or `None` when there are no cards.
    pub fn position(&self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let step = self.ticker.ticks() % self.len as u64;
        Some(step as usize)
    }

    /// Wait for the carousel to advance.
    pub async fn advanced(&mut self) -> bool {
        self.ticker.changed().await
    }
}

#[derive(Debug)]
pub struct LandingView {
    catalog: Arc<Catalog>,
    carousel: Carousel,
    how_it_works_open: bool,
}

impl LandingView {
    pub fn new(catalog: &Arc<Catalog>, carousel_interval: Duration) -> Self {
        Self {
            carousel: Carousel::start(catalog.doctors().len(), carousel_interval),
            catalog: Arc::clone(catalog),
            how_it_works_open: false,
        }
    }

    pub fn featured_doctors(&self) -> &[Doctor] {
        self.catalog.doctors()
    }

    pub fn featured(&self) -> Option<&Doctor> {
        self.carousel
            .position()
            .and_then(|i| self.catalog.doctors().get(i))
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        self.catalog.testimonials()
    }

    pub fn how_it_works_open(&self) -> bool {
        self.how_it_works_open
    }

    pub fn toggle_how_it_works(&mut self) {
        self.how_it_works_open = !self.how_it_works_open;
    }

    /// "Agendar Agora".
    pub fn book_now(&self) -> Intent {
        Intent::Navigate(PageId::Specialties)
    }

    pub fn see_plans(&self) -> Intent {
        Intent::Navigate(PageId::Plans)
    }
}
