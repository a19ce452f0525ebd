//! The fixed set of medical specialties offered for booking.

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bookable specialty.
///
/// The serialised form is the kebab-case key (`general-practitioner`); the display form is the
/// pt-BR label shown to patients (`Clínico Geral`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Specialty {
    Nutritionist,
    Psychiatrist,
    GeneralPractitioner,
    Psychologist,
}

impl Specialty {
    /// Every specialty, in catalog order.
    pub const ALL: [Specialty; 4] = [
        Specialty::Nutritionist,
        Specialty::Psychiatrist,
        Specialty::GeneralPractitioner,
        Specialty::Psychologist,
    ];

    /// Stable machine key, matching the serialised form.
    pub fn key(&self) -> &'static str {
        match self {
            Specialty::Nutritionist => "nutritionist",
            Specialty::Psychiatrist => "psychiatrist",
            Specialty::GeneralPractitioner => "general-practitioner",
            Specialty::Psychologist => "psychologist",
        }
    }

    /// Patient-facing pt-BR label.
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::Nutritionist => "Nutricionista",
            Specialty::Psychiatrist => "Psiquiatra",
            Specialty::GeneralPractitioner => "Clínico Geral",
            Specialty::Psychologist => "Psicólogo",
        }
    }

    /// Accent-free spellings accepted from keyboards without dead keys.
    fn plain_label(&self) -> &'static str {
        match self {
            Specialty::Nutritionist => "nutricionista",
            Specialty::Psychiatrist => "psiquiatra",
            Specialty::GeneralPractitioner => "clinicogeral",
            Specialty::Psychologist => "psicologo",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalise(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Specialty {
    type Err = CatalogError;

    /// Accepts the key, the English variant name, or the pt-BR label (with or without accents).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        Specialty::ALL
            .into_iter()
            .find(|specialty| {
                wanted == normalise(specialty.key())
                    || wanted == normalise(specialty.label())
                    || wanted == specialty.plain_label()
            })
            .ok_or_else(|| CatalogError::UnknownSpecialty(s.to_string()))
    }
}
