//! Static reference data for the MedVida booking front end.
//!
//! The catalog holds the specialties, doctors, plans and testimonials the page views display.
//! It is read-only: nothing in the navigation core mutates it once loaded.
//!
//! This crate provides:
//! - domain records ([`Doctor`], [`Plan`], [`SpecialtyInfo`], ...)
//! - a strict YAML wire format with path-aware schema errors
//! - the built-in sample data set, embedded at compile time

pub mod records;
pub mod specialty;
mod wire;

use std::path::Path;

pub use records::{Doctor, DoctorId, DoctorReview, Plan, SpecialtyInfo, Testimonial};
pub use specialty::Specialty;

/// Built-in catalog document.
const BUILTIN_CATALOG_YAML: &str = include_str!("../data/catalog.yaml");

/// Errors returned by the catalog crate.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown specialty: {0}")]
    UnknownSpecialty(String),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// Type alias for Results that can fail with a [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Ordered, read-only collections of catalog records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    specialties: Vec<SpecialtyInfo>,
    doctors: Vec<Doctor>,
    plans: Vec<Plan>,
    testimonials: Vec<Testimonial>,
    doctor_reviews: Vec<DoctorReview>,
}

impl Catalog {
    /// The sample data set shipped with the application.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is itself invalid.
    pub fn builtin() -> CatalogResult<Self> {
        Self::parse(BUILTIN_CATALOG_YAML)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - the YAML does not match the wire schema (unknown keys, wrong types),
    /// - any name or id is empty, or a price or rating is out of range,
    /// - ids are duplicated, a doctor references an unlisted specialty,
    ///   or more than one plan is marked recommended.
    pub fn parse(yaml_text: &str) -> CatalogResult<Self> {
        let wire = wire::parse_wire(yaml_text)?;
        let parts = wire::wire_to_domain(wire)?;
        tracing::debug!(
            specialties = parts.specialties.len(),
            doctors = parts.doctors.len(),
            plans = parts.plans.len(),
            "catalog parsed"
        );
        Ok(Self {
            specialties: parts.specialties,
            doctors: parts.doctors,
            plans: parts.plans,
            testimonials: parts.testimonials,
            doctor_reviews: parts.doctor_reviews,
        })
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::parse(&text)?;
        tracing::info!("loaded catalog from {}", path.display());
        Ok(catalog)
    }

    /// Render the catalog back to YAML text.
    pub fn render(&self) -> CatalogResult<String> {
        let parts = wire::CatalogParts {
            specialties: self.specialties.clone(),
            doctors: self.doctors.clone(),
            plans: self.plans.clone(),
            testimonials: self.testimonials.clone(),
            doctor_reviews: self.doctor_reviews.clone(),
        };
        Ok(serde_yaml::to_string(&wire::domain_to_wire(&parts))?)
    }

    pub fn specialties(&self) -> &[SpecialtyInfo] {
        &self.specialties
    }

    pub fn specialty_info(&self, specialty: Specialty) -> Option<&SpecialtyInfo> {
        self.specialties.iter().find(|s| s.specialty == specialty)
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Doctors of one specialty, in catalog order.
    pub fn doctors_by_specialty(&self, specialty: Specialty) -> impl Iterator<Item = &Doctor> {
        self.doctors.iter().filter(move |d| d.specialty == specialty)
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn recommended_plan(&self) -> Option<&Plan> {
        self.plans.iter().find(|p| p.recommended)
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn doctor_reviews(&self) -> &[DoctorReview] {
        &self.doctor_reviews
    }
}
