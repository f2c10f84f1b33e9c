//! Verification toolkit for German utility-cost statements
//! (Nebenkostenabrechnung): a deterministic five-pass check engine with
//! injectable reference tables, an objection letter composer, and a small
//! service plus router for HTTP exposure.

pub mod billing;
pub mod config;
pub mod error;
pub mod telemetry;
