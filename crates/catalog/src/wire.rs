//! Catalog wire models and translation helpers.
//!
//! Responsibilities:
//! - Define a strict wire model for the catalog YAML document
//! - Translate between the wire model and the domain records
//! - Enforce cross-record rules (unique ids, known specialties, single recommended plan)

use crate::records::{Doctor, DoctorId, DoctorReview, Plan, SpecialtyInfo, Testimonial};
use crate::{CatalogError, CatalogResult, Specialty};
use medvida_types::{NonEmptyText, Price, Rating};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of the whole catalog document.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct CatalogWire {
    pub specialties: Vec<SpecialtyInfoWire>,
    pub doctors: Vec<DoctorWire>,
    pub plans: Vec<PlanWire>,
    #[serde(default)]
    pub testimonials: Vec<TestimonialWire>,
    #[serde(default)]
    pub doctor_reviews: Vec<DoctorReviewWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct SpecialtyInfoWire {
    pub specialty: Specialty,
    pub icon: String,
    pub min_price: f64,
    pub rating: f64,
    pub reviews: u32,
    pub available_doctors: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct DoctorWire {
    pub id: String,
    pub name: String,
    pub license: String,
    pub specialty: Specialty,
    pub rating: f64,
    pub review_count: u32,
    pub price: f64,
    pub availability: String,
    pub image_url: String,
    pub bio: String,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct PlanWire {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recommended: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct TestimonialWire {
    pub name: String,
    pub rating: f64,
    pub text: String,
    pub image_url: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct DoctorReviewWire {
    pub name: String,
    pub image_url: String,
    pub text: String,
}

/// Domain records produced from one catalog document.
pub(crate) struct CatalogParts {
    pub specialties: Vec<SpecialtyInfo>,
    pub doctors: Vec<Doctor>,
    pub plans: Vec<Plan>,
    pub testimonials: Vec<Testimonial>,
    pub doctor_reviews: Vec<DoctorReview>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Deserialize a catalog document, reporting the failing field path on schema mismatch.
pub(crate) fn parse_wire(yaml_text: &str) -> CatalogResult<CatalogWire> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    match serde_path_to_error::deserialize::<_, CatalogWire>(deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() {
                "<root>"
            } else {
                path.as_str()
            };
            Err(CatalogError::Translation(format!(
                "Catalog schema mismatch at {path}: {source}"
            )))
        }
    }
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn text(field: &str, value: &str) -> CatalogResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| CatalogError::InvalidInput(format!("{field} cannot be empty")))
}

fn price(field: &str, value: f64) -> CatalogResult<Price> {
    Price::from_decimal(value).map_err(|e| CatalogError::InvalidInput(format!("{field}: {e}")))
}

fn rating(field: &str, value: f64) -> CatalogResult<Rating> {
    Rating::from_decimal(value).map_err(|e| CatalogError::InvalidInput(format!("{field}: {e}")))
}

/// Convert the wire document to domain records, validating cross-record rules.
pub(crate) fn wire_to_domain(wire: CatalogWire) -> CatalogResult<CatalogParts> {
    let mut listed = HashSet::new();
    let mut specialties = Vec::with_capacity(wire.specialties.len());
    for s in wire.specialties {
        if !listed.insert(s.specialty) {
            return Err(CatalogError::DuplicateId {
                kind: "specialty",
                id: s.specialty.key().to_string(),
            });
        }
        let field = format!("specialties.{}", s.specialty.key());
        specialties.push(SpecialtyInfo {
            specialty: s.specialty,
            icon: s.icon,
            min_price: price(&format!("{field}.min_price"), s.min_price)?,
            rating: rating(&format!("{field}.rating"), s.rating)?,
            reviews: s.reviews,
            available_doctors: s.available_doctors,
        });
    }

    let mut doctor_ids = HashSet::new();
    let mut doctors = Vec::with_capacity(wire.doctors.len());
    for d in wire.doctors {
        let id = text("doctors.id", &d.id)?;
        if !doctor_ids.insert(id.clone()) {
            return Err(CatalogError::DuplicateId {
                kind: "doctor",
                id: id.to_string(),
            });
        }
        if !listed.contains(&d.specialty) {
            return Err(CatalogError::InvalidInput(format!(
                "doctor {id} references specialty {} which is not listed",
                d.specialty.key()
            )));
        }
        let field = format!("doctors.{id}");
        doctors.push(Doctor {
            name: text(&format!("{field}.name"), &d.name)?,
            license: d.license,
            specialty: d.specialty,
            rating: rating(&format!("{field}.rating"), d.rating)?,
            review_count: d.review_count,
            price: price(&format!("{field}.price"), d.price)?,
            availability: d.availability,
            image_url: d.image_url,
            bio: d.bio,
            education: d.education,
            certifications: d.certifications,
            id: DoctorId::new(id),
        });
    }

    let mut plan_ids = HashSet::new();
    let mut plans = Vec::with_capacity(wire.plans.len());
    for p in wire.plans {
        let id = text("plans.id", &p.id)?;
        if !plan_ids.insert(id.clone()) {
            return Err(CatalogError::DuplicateId {
                kind: "plan",
                id: id.to_string(),
            });
        }
        let field = format!("plans.{id}");
        plans.push(Plan {
            name: text(&format!("{field}.name"), &p.name)?,
            price: price(&format!("{field}.price"), p.price)?,
            description: p.description,
            benefits: p.benefits,
            recommended: p.recommended,
            id,
        });
    }
    if plans.iter().filter(|p| p.recommended).count() > 1 {
        return Err(CatalogError::InvalidInput(
            "at most one plan may be recommended".into(),
        ));
    }

    let testimonials = wire
        .testimonials
        .into_iter()
        .map(|t| {
            Ok(Testimonial {
                name: text("testimonials.name", &t.name)?,
                rating: rating("testimonials.rating", t.rating)?,
                text: t.text,
                image_url: t.image_url,
            })
        })
        .collect::<CatalogResult<Vec<_>>>()?;

    let doctor_reviews = wire
        .doctor_reviews
        .into_iter()
        .map(|r| {
            Ok(DoctorReview {
                name: text("doctor_reviews.name", &r.name)?,
                image_url: r.image_url,
                text: r.text,
            })
        })
        .collect::<CatalogResult<Vec<_>>>()?;

    Ok(CatalogParts {
        specialties,
        doctors,
        plans,
        testimonials,
        doctor_reviews,
    })
}

/// Convert domain records back to the wire document.
pub(crate) fn domain_to_wire(parts: &CatalogParts) -> CatalogWire {
    CatalogWire {
        specialties: parts
            .specialties
            .iter()
            .map(|s| SpecialtyInfoWire {
                specialty: s.specialty,
                icon: s.icon.clone(),
                min_price: s.min_price.as_decimal(),
                rating: s.rating.as_decimal(),
                reviews: s.reviews,
                available_doctors: s.available_doctors,
            })
            .collect(),
        doctors: parts
            .doctors
            .iter()
            .map(|d| DoctorWire {
                id: d.id.to_string(),
                name: d.name.to_string(),
                license: d.license.clone(),
                specialty: d.specialty,
                rating: d.rating.as_decimal(),
                review_count: d.review_count,
                price: d.price.as_decimal(),
                availability: d.availability.clone(),
                image_url: d.image_url.clone(),
                bio: d.bio.clone(),
                education: d.education.clone(),
                certifications: d.certifications.clone(),
            })
            .collect(),
        plans: parts
            .plans
            .iter()
            .map(|p| PlanWire {
                id: p.id.to_string(),
                name: p.name.to_string(),
                price: p.price.as_decimal(),
                description: p.description.clone(),
                benefits: p.benefits.clone(),
                recommended: p.recommended,
            })
            .collect(),
        testimonials: parts
            .testimonials
            .iter()
            .map(|t| TestimonialWire {
                name: t.name.to_string(),
                rating: t.rating.as_decimal(),
                text: t.text.clone(),
                image_url: t.image_url.clone(),
            })
            .collect(),
        doctor_reviews: parts
            .doctor_reviews
            .iter()
            .map(|r| DoctorReviewWire {
                name: r.name.to_string(),
                image_url: r.image_url.clone(),
                text: r.text.clone(),
            })
            .collect(),
    }
}
