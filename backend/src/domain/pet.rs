//! Pet data model.
//!
//! A pet is an adoptable animal record owned by exactly one organization.
//! The characteristic fields are closed enumerations serialising to the
//! legacy string tokens (`FILHOTE`, `QUINTAL_PEQUENO`, `"03"`, …) used by
//! existing external consumers; they are never free strings inside the
//! domain.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::org::{Org, OrgId};

/// Validation errors returned when constructing pet values.
///
/// Each variant corresponds to one independently checkable creation
/// invariant: callers can violate exactly one and observe that failure
/// alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    /// Identifier was empty or not a valid UUID.
    InvalidId,
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Age token outside {FILHOTE, ADULTO, IDOSO}.
    UnknownAge { value: String },
    /// Size token outside {PEQUENO, MEDIO, GRANDE}.
    UnknownSize { value: String },
    /// Energy level token outside {"01".."05"}.
    UnknownEnergyLevel { value: String },
    /// Independence token outside {BAIXO, MEDIO, ALTO}.
    UnknownIndependence { value: String },
    /// Environment token outside the supported habitat set.
    UnknownEnvironment { value: String },
    /// The adoption requirements list was empty.
    NoAdoptionRequirements,
}

impl fmt::Display for PetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "pet id must be a valid UUID"),
            Self::EmptyName => write!(f, "pet name must not be empty"),
            Self::UnknownAge { value } => write!(f, "unknown age value: {value}"),
            Self::UnknownSize { value } => write!(f, "unknown size value: {value}"),
            Self::UnknownEnergyLevel { value } => {
                write!(f, "unknown energy level value: {value}")
            }
            Self::UnknownIndependence { value } => {
                write!(f, "unknown independence value: {value}")
            }
            Self::UnknownEnvironment { value } => {
                write!(f, "unknown environment value: {value}")
            }
            Self::NoAdoptionRequirements => {
                write!(f, "at least one adoption requirement is needed")
            }
        }
    }
}

impl std::error::Error for PetValidationError {}

/// Stable pet identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(Uuid);

impl PetId {
    /// Validate and construct a [`PetId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PetValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(PetValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| PetValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`PetId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Age bracket of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AgeGroup {
    #[serde(rename = "FILHOTE")]
    Filhote,
    #[serde(rename = "ADULTO")]
    Adulto,
    #[serde(rename = "IDOSO")]
    Idoso,
}

impl AgeGroup {
    /// Legacy wire token for this value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filhote => "FILHOTE",
            Self::Adulto => "ADULTO",
            Self::Idoso => "IDOSO",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = PetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FILHOTE" => Ok(Self::Filhote),
            "ADULTO" => Ok(Self::Adulto),
            "IDOSO" => Ok(Self::Idoso),
            other => Err(PetValidationError::UnknownAge {
                value: other.to_owned(),
            }),
        }
    }
}

/// Physical size of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PetSize {
    #[serde(rename = "PEQUENO")]
    Pequeno,
    #[serde(rename = "MEDIO")]
    Medio,
    #[serde(rename = "GRANDE")]
    Grande,
}

impl PetSize {
    /// Legacy wire token for this value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pequeno => "PEQUENO",
            Self::Medio => "MEDIO",
            Self::Grande => "GRANDE",
        }
    }
}

impl FromStr for PetSize {
    type Err = PetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PEQUENO" => Ok(Self::Pequeno),
            "MEDIO" => Ok(Self::Medio),
            "GRANDE" => Ok(Self::Grande),
            other => Err(PetValidationError::UnknownSize {
                value: other.to_owned(),
            }),
        }
    }
}

/// Energy level scale.
///
/// The wire tokens are the zero-padded ordinals `"01".."05"`. They are
/// treated as an opaque enumeration: no ordering or numeric accessor is
/// exposed, so a future ranked comparison would be an additive change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EnergyLevel {
    #[serde(rename = "01")]
    One,
    #[serde(rename = "02")]
    Two,
    #[serde(rename = "03")]
    Three,
    #[serde(rename = "04")]
    Four,
    #[serde(rename = "05")]
    Five,
}

impl EnergyLevel {
    /// Legacy wire token for this value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "01",
            Self::Two => "02",
            Self::Three => "03",
            Self::Four => "04",
            Self::Five => "05",
        }
    }
}

impl FromStr for EnergyLevel {
    type Err = PetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "01" => Ok(Self::One),
            "02" => Ok(Self::Two),
            "03" => Ok(Self::Three),
            "04" => Ok(Self::Four),
            "05" => Ok(Self::Five),
            other => Err(PetValidationError::UnknownEnergyLevel {
                value: other.to_owned(),
            }),
        }
    }
}

/// How much a pet copes on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Independence {
    #[serde(rename = "BAIXO")]
    Baixo,
    #[serde(rename = "MEDIO")]
    Medio,
    #[serde(rename = "ALTO")]
    Alto,
}

impl Independence {
    /// Legacy wire token for this value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baixo => "BAIXO",
            Self::Medio => "MEDIO",
            Self::Alto => "ALTO",
        }
    }
}

impl FromStr for Independence {
    type Err = PetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BAIXO" => Ok(Self::Baixo),
            "MEDIO" => Ok(Self::Medio),
            "ALTO" => Ok(Self::Alto),
            other => Err(PetValidationError::UnknownIndependence {
                value: other.to_owned(),
            }),
        }
    }
}

/// Habitat a pet needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Environment {
    #[serde(rename = "APARTAMENTO")]
    Apartamento,
    #[serde(rename = "CASA")]
    Casa,
    #[serde(rename = "QUINTAL_PEQUENO")]
    QuintalPequeno,
    #[serde(rename = "QUINTAL_GRANDE")]
    QuintalGrande,
}

impl Environment {
    /// Legacy wire token for this value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartamento => "APARTAMENTO",
            Self::Casa => "CASA",
            Self::QuintalPequeno => "QUINTAL_PEQUENO",
            Self::QuintalGrande => "QUINTAL_GRANDE",
        }
    }
}

impl FromStr for Environment {
    type Err = PetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APARTAMENTO" => Ok(Self::Apartamento),
            "CASA" => Ok(Self::Casa),
            "QUINTAL_PEQUENO" => Ok(Self::QuintalPequeno),
            "QUINTAL_GRANDE" => Ok(Self::QuintalGrande),
            other => Err(PetValidationError::UnknownEnvironment {
                value: other.to_owned(),
            }),
        }
    }
}

/// An adoptable pet.
///
/// ## Invariants
/// - `name` is non-blank; `adoption_requirements` has at least one entry.
/// - `org_id` references an existing [`Org`] (checked at creation by the
///   pet creation use-case, not by a foreign key inside the domain).
/// - Records are immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub about: Option<String>,
    pub age: AgeGroup,
    pub size: PetSize,
    pub energy_level: EnergyLevel,
    pub independence: Independence,
    pub environment: Environment,
    pub adoption_requirements: Vec<String>,
    pub photos: Vec<String>,
    pub org_id: OrgId,
    pub created_at: DateTime<Utc>,
}

/// A pet joined with its owning organization, as returned by detail
/// lookups. The storage adapter performs the join.
#[derive(Debug, Clone, PartialEq)]
pub struct PetDetails {
    pub pet: Pet,
    pub org: Org,
}

/// Raw, unvalidated pet attributes as supplied by an inbound adapter.
///
/// Enumerated fields arrive as wire tokens so the creation use-case can
/// validate each one against its literal set; upstream schema validation
/// is not trusted for business invariants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PetDraft {
    pub name: String,
    pub about: Option<String>,
    pub age: String,
    pub size: String,
    pub energy_level: String,
    pub independence: String,
    pub environment: String,
    pub adoption_requirements: Vec<String>,
    pub photos: Vec<String>,
}

/// Validated attribute set handed to
/// [`crate::domain::ports::PetRepository::create`].
///
/// The repository assigns the identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPet {
    pub name: String,
    pub about: Option<String>,
    pub age: AgeGroup,
    pub size: PetSize,
    pub energy_level: EnergyLevel,
    pub independence: Independence,
    pub environment: Environment,
    pub adoption_requirements: Vec<String>,
    pub photos: Vec<String>,
}

impl NewPet {
    /// Validate a draft into a typed attribute set.
    ///
    /// Checks run in a fixed order (name, age, size, energy level,
    /// independence, environment, requirements list) and the first
    /// violation aborts the whole conversion, so any single invalid field
    /// fails creation before anything is persisted.
    pub fn try_from_draft(draft: PetDraft) -> Result<Self, PetValidationError> {
        if draft.name.trim().is_empty() {
            return Err(PetValidationError::EmptyName);
        }

        let age = draft.age.parse::<AgeGroup>()?;
        let size = draft.size.parse::<PetSize>()?;
        let energy_level = draft.energy_level.parse::<EnergyLevel>()?;
        let independence = draft.independence.parse::<Independence>()?;
        let environment = draft.environment.parse::<Environment>()?;

        if draft.adoption_requirements.is_empty() {
            return Err(PetValidationError::NoAdoptionRequirements);
        }

        Ok(Self {
            name: draft.name,
            about: draft.about,
            age,
            size,
            energy_level,
            independence,
            environment,
            adoption_requirements: draft.adoption_requirements,
            photos: draft.photos,
        })
    }
}
