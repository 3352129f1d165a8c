//! Patient profile and alert request types
//!
//! These types are built per request and describe the patient for whom the
//! Vidal alerts endpoint checks a prescription.

use super::errors::VidalError;
use super::result::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normal creatinine clearance, used when the profile does not give one
pub const DEFAULT_CREATININE_CLEARANCE: f64 = 120.0;

/// Patient gender as understood by the Vidal API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Unknown => "UNKNOWN",
        }
    }
}

/// Breast-feeding category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreastFeeding {
    #[default]
    None,
    LessThanOneMonth,
    MoreThanOneMonth,
    All,
}

impl BreastFeeding {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreastFeeding::None => "NONE",
            BreastFeeding::LessThanOneMonth => "LESS_THAN_ONE_MONTH",
            BreastFeeding::MoreThanOneMonth => "MORE_THAN_ONE_MONTH",
            BreastFeeding::All => "ALL",
        }
    }
}

/// Hepatic-insufficiency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HepaticInsufficiency {
    #[default]
    None,
    Moderate,
    Severe,
}

impl HepaticInsufficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            HepaticInsufficiency::None => "NONE",
            HepaticInsufficiency::Moderate => "MODERATE",
            HepaticInsufficiency::Severe => "SEVERE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BreastFeeding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HepaticInsufficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Patient profile sent with an alert request
///
/// Only `date_of_birth` is required; everything else falls back to the
/// defaults the Vidal API documents (unknown gender, zero weight and height,
/// no breast-feeding, normal creatinine clearance, no hepatic insufficiency).
///
/// # Example
///
/// ```
/// use vidal_client::domain::patient::{Gender, PatientProfile};
///
/// let patient = PatientProfile::new("1980-05-01")
///     .with_gender(Gender::Female)
///     .with_weight(62.5);
///
/// assert_eq!(patient.creatin, 120.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Date of birth, any of the formats accepted by [`PatientProfile::date_of_birth_timestamp`]
    #[serde(default, alias = "dateOfBirth")]
    pub date_of_birth: Option<String>,

    #[serde(default)]
    pub gender: Gender,

    /// Weight in kilograms
    #[serde(default)]
    pub weight: f64,

    /// Height in centimetres
    #[serde(default)]
    pub height: f64,

    #[serde(default, rename = "breastFeeding", alias = "breast_feeding")]
    pub breast_feeding: BreastFeeding,

    /// Creatinine clearance in ml/min
    #[serde(default = "default_creatin")]
    pub creatin: f64,

    #[serde(
        default,
        rename = "hepaticInsufficiency",
        alias = "hepatic_insufficiency"
    )]
    pub hepatic_insufficiency: HepaticInsufficiency,
}

fn default_creatin() -> f64 {
    DEFAULT_CREATININE_CLEARANCE
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            date_of_birth: None,
            gender: Gender::default(),
            weight: 0.0,
            height: 0.0,
            breast_feeding: BreastFeeding::default(),
            creatin: DEFAULT_CREATININE_CLEARANCE,
            hepatic_insufficiency: HepaticInsufficiency::default(),
        }
    }
}

impl PatientProfile {
    /// Creates a profile with the given date of birth and default values
    pub fn new(date_of_birth: impl Into<String>) -> Self {
        Self {
            date_of_birth: Some(date_of_birth.into()),
            ..Default::default()
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_breast_feeding(mut self, breast_feeding: BreastFeeding) -> Self {
        self.breast_feeding = breast_feeding;
        self
    }

    pub fn with_creatin(mut self, creatin: f64) -> Self {
        self.creatin = creatin;
        self
    }

    pub fn with_hepatic_insufficiency(mut self, level: HepaticInsufficiency) -> Self {
        self.hepatic_insufficiency = level;
        self
    }

    /// Resolves the date of birth into an ISO-8601 timestamp with offset
    ///
    /// Accepts RFC 3339 (`1980-05-01T08:30:00+02:00`), a naive date-time with
    /// `T` or a space between date and time, down to the minute or with
    /// fractional seconds (`1980-05-01 08:30`, `1980-05-01T08:30:00.250`), or
    /// a plain date (`1980-05-01`). Naive values are taken as UTC. The output
    /// always has millisecond precision and an explicit offset, e.g.
    /// `1980-05-01T00:00:00.000+00:00`.
    ///
    /// # Errors
    ///
    /// Returns [`VidalError::MissingParameter`] when the date of birth is
    /// absent or blank, and [`VidalError::InvalidParameter`] when it cannot be
    /// parsed.
    pub fn date_of_birth_timestamp(&self) -> Result<String> {
        let raw = self
            .date_of_birth
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| VidalError::missing("date_of_birth"))?;

        let parsed = parse_date_of_birth(raw).ok_or_else(|| {
            VidalError::InvalidParameter(format!("Unrecognized date_of_birth '{raw}'"))
        })?;

        Ok(parsed.to_rfc3339_opts(SecondsFormat::Millis, false))
    }
}

fn parse_date_of_birth(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

/// Everything needed to ask Vidal for patient alerts
///
/// The four identifier lists are resolved to Vidal ids through the lookup
/// operations before the alert request is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientAlertsRequest {
    pub patient: PatientProfile,

    /// Allergy class names
    #[serde(default, alias = "allergyClasses")]
    pub allergy_classes: Vec<String>,

    /// Allergy ingredient names
    #[serde(default, alias = "allergyIngredients")]
    pub allergy_ingredients: Vec<String>,

    /// ICD10 codes
    #[serde(default)]
    pub pathologies: Vec<String>,

    /// Green-rain codes of the prescribed medications
    #[serde(default)]
    pub medications: Vec<String>,
}

impl PatientAlertsRequest {
    pub fn new(patient: PatientProfile) -> Self {
        Self {
            patient,
            ..Default::default()
        }
    }

    pub fn with_allergy_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergy_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allergy_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergy_ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pathologies<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pathologies = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_medications<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.medications = codes.into_iter().map(Into::into).collect();
        self
    }
}
