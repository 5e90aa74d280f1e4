//! Tests for the reference-table snapshot: seed data, lookups, validation

use rust_decimal_macros::dec;
use shnq_costing_core_rs::{
    CalculationInput, ComplexityLevel, DocumentCategory, NormativeType, ReferenceTables,
    StaffRole, ValidationError,
};

#[test]
fn seed_covers_every_normative_type() {
    let tables = ReferenceTables::seed();
    for ty in NormativeType::ALL {
        assert!(
            tables.find_coefficients(ty).is_some(),
            "no seed row for {ty:?}"
        );
    }
}

#[test]
fn seed_base_ladder_matches_production_data() {
    let tables = ReferenceTables::seed();

    let shnq = tables.find_coefficients(NormativeType::Shnq).unwrap();
    assert_eq!(shnq.new_document_base, dec!(6.00));
    assert_eq!(shnq.rework_harmonization_base, dec!(8.00));
    assert_eq!(shnq.rework_modification_base, dec!(10.00));
    assert_eq!(shnq.additional_change_base, dec!(12.00));

    let tech = tables
        .find_coefficients(NormativeType::TechnicalRegulation)
        .unwrap();
    assert_eq!(tech.new_document_base, dec!(4.00));

    let guide = tables
        .find_coefficients(NormativeType::MethodicalGuide)
        .unwrap();
    assert_eq!(guide.additional_change_base, dec!(18.00));

    // The merged standard/srn/qr/mqn row fans out to identical values
    for ty in [
        NormativeType::Standard,
        NormativeType::Srn,
        NormativeType::Qr,
        NormativeType::Mqn,
    ] {
        let row = tables.find_coefficients(ty).unwrap();
        assert_eq!(row.new_document_base, dec!(10.00), "{ty:?}");
        assert_eq!(row.additional_change_base, dec!(16.00), "{ty:?}");
    }
}

#[test]
fn seed_complexity_multipliers_are_uniform() {
    let tables = ReferenceTables::seed();
    for row in &tables.coefficients {
        assert_eq!(row.complexity_level_1, dec!(1.00));
        assert_eq!(row.complexity_level_2, dec!(1.10));
        assert_eq!(row.complexity_level_3, dec!(1.20));
    }
}

#[test]
fn seed_staff_composition_matches_production_data() {
    let tables = ReferenceTables::seed();
    let roles = tables.staff_roles();

    assert_eq!(roles.len(), 6);
    assert_eq!(roles[0].name, "Loyiha rahbari");
    assert_eq!(roles[0].coefficient, dec!(8.41));
    assert_eq!(roles[5].name, "Texnik/stajer tadqiqotchi");
    assert_eq!(roles[5].coefficient, dec!(4.76));
    for role in &roles {
        assert_eq!(role.mrot, dec!(1271000.00));
    }
}

#[test]
fn staff_roles_sort_by_sort_order_then_id() {
    let role = |id: i64, sort_order: u16| StaffRole {
        id,
        name: format!("role-{id}"),
        coefficient: dec!(1),
        mrot: dec!(1),
        sort_order,
        is_active: true,
    };
    let tables = ReferenceTables::new(
        vec![],
        vec![role(3, 2), role(1, 2), role(2, 1)],
        vec![],
    );

    let ordered: Vec<i64> = tables.staff_roles().iter().map(|r| r.id).collect();
    assert_eq!(ordered, vec![2, 1, 3]);
}

#[test]
fn inactive_rows_are_invisible() {
    let mut tables = ReferenceTables::seed();
    for row in &mut tables.coefficients {
        if row.normative_type == NormativeType::Shnq {
            row.is_active = false;
        }
    }
    tables.staff[0].is_active = false;

    assert!(tables.find_coefficients(NormativeType::Shnq).is_none());
    assert_eq!(tables.staff_roles().len(), 5);
}

#[test]
fn validate_input_surfaces_missing_lookup() {
    let tables = ReferenceTables::new(vec![], vec![], vec![]);
    let input = CalculationInput::new(
        "doc",
        NormativeType::Eurocode,
        DocumentCategory::New,
        ComplexityLevel::Level1,
        10,
    );

    assert_eq!(
        tables.validate_input(&input),
        Err(ValidationError::MissingLookup {
            normative_type: "eurocode".to_string()
        })
    );
}

#[test]
fn validate_input_rejects_zero_pages() {
    let tables = ReferenceTables::seed();
    let input = CalculationInput::new(
        "doc",
        NormativeType::Shnq,
        DocumentCategory::New,
        ComplexityLevel::Level1,
        0,
    );

    assert_eq!(
        tables.validate_input(&input),
        Err(ValidationError::InvalidPageCount { total_pages: 0 })
    );

    let ok = CalculationInput::new(
        "doc",
        NormativeType::Shnq,
        DocumentCategory::New,
        ComplexityLevel::Level1,
        1,
    );
    assert_eq!(tables.validate_input(&ok), Ok(()));
}

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    let tables = ReferenceTables::seed();
    let a = tables.fingerprint();
    let b = tables.fingerprint();
    assert_eq!(a, b, "fingerprint must be deterministic");
    assert_eq!(a.len(), 64, "hex-encoded SHA-256");

    let mut changed = ReferenceTables::seed();
    changed.staff[0].coefficient = dec!(9.99);
    assert_ne!(changed.fingerprint(), a);
}

#[test]
fn tables_round_trip_through_json() {
    let tables = ReferenceTables::seed();
    let json = serde_json::to_string(&tables).unwrap();
    let back: ReferenceTables = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tables);
    assert_eq!(back.fingerprint(), tables.fingerprint());
}
