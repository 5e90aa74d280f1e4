//! Domain models for the costing engine

pub mod document;
pub mod reference;

// Re-exports
pub use document::{CalculationInput, CalculationRecord, CostBreakdown, StaffLine};
pub use reference::{
    CalculationCategory, ComplexityLevel, DocumentCategory, NormativeCoefficient, NormativeType,
    StaffRole,
};
