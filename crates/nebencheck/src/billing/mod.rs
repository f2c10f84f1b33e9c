//! Nebenkostenabrechnung verification: the domain model, the injected
//! reference catalog, the five-pass check engine, the objection letter
//! composer, and the service plus router that expose all of it.

pub mod catalog;
pub mod checks;
pub mod domain;
pub mod letter;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CostRange, ReferenceCatalog};
pub use checks::{score_from_findings, CheckEngine, CheckInput, CheckReport};
pub use domain::{
    BillId, BillStatus, BillSubmission, BillingPeriod, CheckKind, CostCategory, CostPosition,
    Finding, HeatingType, PlausibilityVerdict, PositionAnnotation, PositionAnnotations,
    RentalContract, Severity, UtilityBill,
};
pub use letter::{compose_objection_letter, ObjectionLetter, ObjectionLetterRequest};
pub use repository::{
    BillDetailView, BillRecord, BillRepository, BillStatusView, PositionView, RepositoryError,
};
pub use router::billing_router;
pub use service::{BillCheckService, BillServiceError, ObjectionRequest};
