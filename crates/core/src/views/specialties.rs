use crate::navigation::Intent;
use crate::{CoreError, CoreResult};
use medvida_catalog::{Catalog, Specialty, SpecialtyInfo};
use std::sync::Arc;

#[derive(Debug)]
pub struct SpecialtiesView {
    catalog: Arc<Catalog>,
}

impl SpecialtiesView {
    pub fn new(catalog: &Arc<Catalog>) -> Self {
        Self {
            catalog: Arc::clone(catalog),
        }
    }

    pub fn cards(&self) -> &[SpecialtyInfo] {
        self.catalog.specialties()
    }

    /// Pick a specialty card. Only specialties on the list can be chosen.
    pub fn select(&self, specialty: Specialty) -> CoreResult<Intent> {
        if self.catalog.specialty_info(specialty).is_none() {
            tracing::warn!(specialty = specialty.key(), "specialty not offered");
            return Err(CoreError::SpecialtyNotOffered(specialty.key().to_string()));
        }
        Ok(Intent::SelectSpecialty(specialty))
    }
}
