//! Reference data types: normative-type coefficient rows and staff roles
//!
//! These records come from the reference-data provider (the backend REST
//! API) and are treated as an immutable snapshot for the duration of an
//! editing session. Wire field names match the provider's payloads, with
//! decimals carried as strings.
//!
//! CRITICAL: All money values and coefficients are `rust_decimal::Decimal`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category of construction standard document (normative type)
///
/// The stable snake_case key is what the provider uses on the wire and
/// what coefficient rows are keyed by.
///
/// # Example
/// ```
/// use shnq_costing_core_rs::NormativeType;
///
/// let ty = NormativeType::Shnq;
/// assert_eq!(ty.key(), "shnq");
/// assert_eq!(NormativeType::from_key("shnq"), Some(NormativeType::Shnq));
/// assert_eq!(NormativeType::from_key("unknown"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormativeType {
    TechnicalRegulation,
    Shnq,
    Eurocode,
    Standard,
    Srn,
    Qr,
    Mqn,
    MethodicalGuide,
}

impl NormativeType {
    /// All known normative types, in wire ordering
    pub const ALL: [NormativeType; 8] = [
        NormativeType::TechnicalRegulation,
        NormativeType::Shnq,
        NormativeType::Eurocode,
        NormativeType::Standard,
        NormativeType::Srn,
        NormativeType::Qr,
        NormativeType::Mqn,
        NormativeType::MethodicalGuide,
    ];

    /// Stable wire key for this type
    pub fn key(&self) -> &'static str {
        match self {
            NormativeType::TechnicalRegulation => "technical_regulation",
            NormativeType::Shnq => "shnq",
            NormativeType::Eurocode => "eurocode",
            NormativeType::Standard => "standard",
            NormativeType::Srn => "srn",
            NormativeType::Qr => "qr",
            NormativeType::Mqn => "mqn",
            NormativeType::MethodicalGuide => "methodical_guide",
        }
    }

    /// Human-readable label (as shown in selection lists)
    pub fn label(&self) -> &'static str {
        match self {
            NormativeType::TechnicalRegulation => "Technical regulation",
            NormativeType::Shnq => "SHNQ",
            NormativeType::Eurocode => "Eurocode",
            NormativeType::Standard => "Standard",
            NormativeType::Srn => "SRN",
            NormativeType::Qr => "QR",
            NormativeType::Mqn => "MQN",
            NormativeType::MethodicalGuide => "Methodical guide",
        }
    }

    /// Parse a wire key; `None` for unknown keys
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.key() == key)
    }
}

/// Nature of the work performed on a document
///
/// Selects which of the four base page coefficients applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    /// Authoring a new document
    New,
    /// Rework: harmonization with other standards
    ReworkHarmonization,
    /// Rework: modification of an existing document
    ReworkModification,
    /// Additional change / amendment
    AdditionalChange,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 4] = [
        DocumentCategory::New,
        DocumentCategory::ReworkHarmonization,
        DocumentCategory::ReworkModification,
        DocumentCategory::AdditionalChange,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DocumentCategory::New => "new",
            DocumentCategory::ReworkHarmonization => "rework_harmonization",
            DocumentCategory::ReworkModification => "rework_modification",
            DocumentCategory::AdditionalChange => "additional_change",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

/// Complexity tier of the document (I/II/III)
///
/// Serialized as `"1"`/`"2"`/`"3"` for wire compatibility with the
/// provider, which stores the level as a one-character string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityLevel {
    #[serde(rename = "1")]
    Level1,
    #[serde(rename = "2")]
    Level2,
    #[serde(rename = "3")]
    Level3,
}

impl ComplexityLevel {
    pub const ALL: [ComplexityLevel; 3] = [
        ComplexityLevel::Level1,
        ComplexityLevel::Level2,
        ComplexityLevel::Level3,
    ];

    /// Numeric tier (1..=3)
    pub fn tier(&self) -> u8 {
        match self {
            ComplexityLevel::Level1 => 1,
            ComplexityLevel::Level2 => 2,
            ComplexityLevel::Level3 => 3,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ComplexityLevel::Level1 => "1",
            ComplexityLevel::Level2 => "2",
            ComplexityLevel::Level3 => "3",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.key() == key)
    }
}

/// Coefficient row for one normative type
///
/// Carries the four base page coefficients (reference page counts, one per
/// document category) and the three complexity multipliers. Base
/// coefficients act as the denominator of the page ratio, so a row with a
/// zero base yields a zero ratio rather than a division error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormativeCoefficient {
    pub normative_type: NormativeType,

    /// Reference page count for newly authored documents
    pub new_document_base: Decimal,
    /// Reference page count for harmonization rework
    pub rework_harmonization_base: Decimal,
    /// Reference page count for modification rework
    pub rework_modification_base: Decimal,
    /// Reference page count for additional changes
    pub additional_change_base: Decimal,

    /// Multiplier for complexity tier I
    pub complexity_level_1: Decimal,
    /// Multiplier for complexity tier II
    pub complexity_level_2: Decimal,
    /// Multiplier for complexity tier III
    pub complexity_level_3: Decimal,

    /// Inactive rows are invisible to lookups
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Labeled role in the staff composition
///
/// Cost contribution of one role is `employee_count × coefficient × mrot`,
/// where `mrot` is the statutory base-wage unit the role is scaled by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRole {
    /// Stable identifier assigned by the provider
    pub id: i64,
    /// Display name (e.g. "Loyiha rahbari")
    pub name: String,
    /// Role salary coefficient
    pub coefficient: Decimal,
    /// Statutory base-wage unit (MROT)
    pub mrot: Decimal,
    /// Position in the staff composition table
    #[serde(default = "default_sort_order")]
    pub sort_order: u16,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Reporting category a document calculation may be filed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationCategory {
    pub id: i64,
    pub name: String,
}

fn default_active() -> bool {
    true
}

fn default_sort_order() -> u16 {
    1
}
