//! Core of the university admissions portal.
//!
//! The psychometric quiz (question catalog, scoring engine, recommendation resolver) lives in
//! [`psychometrics`]; the contact form in [`intake`]. Both expose axum routers that the
//! `talapker-api` binary mounts next to its health and metrics endpoints.

pub mod config;
pub mod error;
pub mod i18n;
pub mod intake;
pub mod psychometrics;
pub mod telemetry;
