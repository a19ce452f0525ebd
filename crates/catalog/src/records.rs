//! Domain-level catalog records.
//!
//! These are the read-only values handed to the navigation core and the page views. They are
//! built from the wire models in [`crate::wire`] and never mutated afterwards.

use crate::Specialty;
use medvida_types::{NonEmptyText, Price, Rating};
use std::fmt;

/// Catalog identifier of a doctor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DoctorId(NonEmptyText);

impl DoctorId {
    pub fn new(id: NonEmptyText) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for DoctorId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for DoctorId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Summary card for one specialty on the specialty list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecialtyInfo {
    pub specialty: Specialty,
    /// Emoji shown on the card.
    pub icon: String,
    /// Lowest consultation price among the specialty's doctors.
    pub min_price: Price,
    pub rating: Rating,
    pub reviews: u32,
    pub available_doctors: u32,
}

/// A doctor available for booking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: NonEmptyText,
    /// Professional council registration (CRM or CRP number).
    pub license: String,
    pub specialty: Specialty,
    pub rating: Rating,
    pub review_count: u32,
    pub price: Price,
    /// Free-text next-availability label, e.g. `Hoje às 14:30`.
    pub availability: String,
    pub image_url: String,
    pub bio: String,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
}

/// A subscription plan. Plans are marketing content and play no part in the booking flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub id: NonEmptyText,
    pub name: NonEmptyText,
    /// Monthly price.
    pub price: Price,
    pub description: String,
    pub benefits: Vec<String>,
    pub recommended: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Testimonial {
    pub name: NonEmptyText,
    pub rating: Rating,
    pub text: String,
    pub image_url: String,
}

/// A patient review shown on doctor profiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoctorReview {
    pub name: NonEmptyText,
    pub image_url: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn id(raw: &str) -> DoctorId {
        DoctorId::new(NonEmptyText::new(raw).expect("non-empty"))
    }

    #[test]
    fn doctor_ids_compare_with_plain_strings() {
        let four = id("4");
        assert_eq!(four, "4");
        assert!(four == *"4");
        assert_ne!(four, id("5"));
        assert_eq!(four.to_string(), "4");
    }

    #[test]
    fn doctor_ids_key_a_set_by_value() {
        let ids: HashSet<DoctorId> = ["1", "2", "1"].into_iter().map(id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&id("2")));
    }
}
