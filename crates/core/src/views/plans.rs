use crate::navigation::{Intent, PageId};
use medvida_catalog::{Catalog, Plan};
use std::sync::Arc;

/// Subscription plans. Marketing only; subscribing leads into the regular booking flow.
#[derive(Debug)]
pub struct PlansView {
    catalog: Arc<Catalog>,
}

impl PlansView {
    pub fn new(catalog: &Arc<Catalog>) -> Self {
        Self {
            catalog: Arc::clone(catalog),
        }
    }

    pub fn plans(&self) -> &[Plan] {
        self.catalog.plans()
    }

    pub fn recommended(&self) -> Option<&Plan> {
        self.catalog.recommended_plan()
    }

    pub fn subscribe(&self) -> Intent {
        Intent::Navigate(PageId::Specialties)
    }
}
