use crate::constants::DEFAULT_BOOKING_TIME;
use crate::navigation::Intent;
use crate::{CoreError, CoreResult};
use medvida_catalog::{Catalog, Doctor, Specialty};
use std::sync::Arc;

/// Doctors offering the selected specialty.
#[derive(Debug)]
pub struct DoctorSelectionView {
    specialty: Specialty,
    doctors: Vec<Doctor>,
}

impl DoctorSelectionView {
    pub fn new(specialty: Specialty, catalog: &Arc<Catalog>) -> Self {
        Self {
            specialty,
            doctors: catalog.doctors_by_specialty(specialty).cloned().collect(),
        }
    }

    pub fn specialty(&self) -> Specialty {
        self.specialty
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    fn listed(&self, id: &str) -> CoreResult<&Doctor> {
        self.doctors.iter().find(|d| d.id == id).ok_or_else(|| {
            tracing::warn!(doctor = id, specialty = self.specialty.key(), "doctor not listed");
            CoreError::DoctorNotListed(id.to_string())
        })
    }

    /// Open the doctor's profile.
    pub fn view_profile(&self, id: &str) -> CoreResult<Intent> {
        Ok(Intent::SelectDoctor(self.listed(id)?.clone()))
    }

    /// Skip the profile and book the doctor's next free slot.
    pub fn book_direct(&self, id: &str) -> CoreResult<Intent> {
        Ok(Intent::BookSlot {
            doctor: self.listed(id)?.clone(),
            time: DEFAULT_BOOKING_TIME.to_string(),
        })
    }
}
