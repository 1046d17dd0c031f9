//! # Wardview Core
//!
//! Core dashboard assembly for the wardview patient-dashboard module.
//!
//! This crate contains pure request-shaping logic:
//! - Dashboard view-model assembly from the platform's clinical services
//! - The optional address-hierarchy capability behind an explicit provider
//! - Contact-info fragment preparation
//! - In-memory reference services for demos and tests
//!
//! **No API concerns**: HTTP routing, session extraction, or serving surfaces belong in `api-rest`.

pub mod addons;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod fragment;
pub mod memory;
pub mod model;
pub mod page;
pub mod services;

// Use the shared types crate for validated identifiers.
pub use wardview_types::{IdError, PatientId};
