//! Plain-text objection letter (Widerspruch) composer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MISSING_ADDRESS: &str = "Adresse nicht angegeben";

/// Everything the composer needs for one letter. The date is an explicit
/// input so rendering stays deterministic; callers resolve "today".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectionLetterRequest {
    pub tenant_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_address: Option<String>,
    pub landlord_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landlord_address: Option<String>,
    pub property_address: String,
    pub billing_year: i32,
    pub reasons: Vec<String>,
    pub letter_date: NaiveDate,
}

/// Rendered letter plus the inputs worth echoing back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectionLetter {
    pub content: String,
    pub reasons: Vec<String>,
    pub created_on: NaiveDate,
}

/// Renders the letter. Reasons keep their submitted order and are numbered
/// from 1; missing addresses fall back to a visible placeholder rather than
/// an empty line.
pub fn compose_objection_letter(request: &ObjectionLetterRequest) -> ObjectionLetter {
    let tenant_address = request.tenant_address.as_deref().unwrap_or(MISSING_ADDRESS);
    let landlord_address = request
        .landlord_address
        .as_deref()
        .unwrap_or(MISSING_ADDRESS);
    let letter_date = request.letter_date.format("%d.%m.%Y");

    let reasons_text = request
        .reasons
        .iter()
        .enumerate()
        .map(|(index, reason)| format!("{}. {}", index + 1, reason))
        .collect::<Vec<_>>()
        .join("\n");

    let content = format!(
        "{tenant_name}\n\
         {tenant_address}\n\
         \n\
         {landlord_name}\n\
         {landlord_address}\n\
         \n\
         {letter_date}\n\
         \n\
         Widerspruch gegen die Nebenkostenabrechnung {billing_year}\n\
         Betreff: Mietobjekt {property_address}\n\
         \n\
         Sehr geehrte Damen und Herren,\n\
         \n\
         hiermit lege ich fristgerecht Widerspruch gegen die Nebenkostenabrechnung \
         für das Jahr {billing_year} ein.\n\
         \n\
         Meine Widerspruchsgründe sind:\n\
         \n\
         {reasons_text}\n\
         \n\
         Ich bitte Sie, die Abrechnung zu korrigieren. Eine Nachzahlung werde ich \
         erst nach Vorlage einer korrekten Abrechnung leisten.\n\
         \n\
         Mit freundlichen Grüßen,\n\
         \n\
         {tenant_name}",
        tenant_name = request.tenant_name,
        landlord_name = request.landlord_name,
        billing_year = request.billing_year,
        property_address = request.property_address,
    );

    ObjectionLetter {
        content: content.trim().to_string(),
        reasons: request.reasons.clone(),
        created_on: request.letter_date,
    }
}
