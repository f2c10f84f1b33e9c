use super::common::date;
use crate::billing::letter::{compose_objection_letter, ObjectionLetterRequest};

fn request() -> ObjectionLetterRequest {
    ObjectionLetterRequest {
        tenant_name: "Max Mustermann".to_string(),
        tenant_address: Some("Musterstraße 12\n10115 Berlin".to_string()),
        landlord_name: "Hausverwaltung Schmidt GmbH".to_string(),
        landlord_address: Some("Verwalterweg 2\n10115 Berlin".to_string()),
        property_address: "Musterstraße 12, 10115 Berlin".to_string(),
        billing_year: 2023,
        reasons: vec![
            "Abrechnungsfrist überschritten".to_string(),
            "Rechenfehler: Heizkosten".to_string(),
        ],
        letter_date: date(2025, 3, 5),
    }
}

#[test]
fn reasons_are_numbered_in_submitted_order() {
    let letter = compose_objection_letter(&request());

    assert!(letter
        .content
        .contains("1. Abrechnungsfrist überschritten\n2. Rechenfehler: Heizkosten"));
    assert_eq!(letter.reasons.len(), 2);
}

#[test]
fn subject_names_the_year_and_the_property() {
    let letter = compose_objection_letter(&request());

    assert!(letter
        .content
        .contains("Widerspruch gegen die Nebenkostenabrechnung 2023"));
    assert!(letter
        .content
        .contains("Betreff: Mietobjekt Musterstraße 12, 10115 Berlin"));
}

#[test]
fn letter_date_uses_the_german_format() {
    let letter = compose_objection_letter(&request());

    assert!(letter.content.contains("05.03.2025"));
    assert_eq!(letter.created_on, date(2025, 3, 5));
}

#[test]
fn missing_addresses_fall_back_to_a_placeholder() {
    let mut request = request();
    request.tenant_address = None;
    request.landlord_address = None;

    let letter = compose_objection_letter(&request);

    assert_eq!(
        letter.content.matches("Adresse nicht angegeben").count(),
        2
    );
}

#[test]
fn content_is_trimmed_and_signed_by_the_tenant() {
    let letter = compose_objection_letter(&request());

    assert!(letter.content.starts_with("Max Mustermann"));
    assert!(letter.content.ends_with("Max Mustermann"));
    assert!(letter.content.contains("Sehr geehrte Damen und Herren,"));
    assert!(letter.content.contains("Mit freundlichen Grüßen,"));
}

#[test]
fn empty_reasons_still_render_a_complete_letter() {
    let mut request = request();
    request.reasons.clear();

    let letter = compose_objection_letter(&request);

    assert!(letter.content.contains("Meine Widerspruchsgründe sind:"));
    assert!(letter.reasons.is_empty());
}
