//! Contracts for the platform services the dashboard consumes.
//!
//! The dashboard never owns patient data, orders, visits or extension registrations; it reads
//! them through these traits. Real implementations live elsewhere in the platform; this crate
//! ships in-memory ones for demos and tests.
//!
//! All traits are `Send + Sync` so implementations can be shared across request handlers
//! behind `Arc<dyn …>`.

use crate::error::{AdtError, ServiceFailure};
use crate::model::{Extension, Location, Order, PatientRecord, UserContext, VisitSummary};
use wardview_types::PatientId;

/// Looks up patient records by identifier.
pub trait PatientDirectory: Send + Sync {
    /// The record for `patient`, or `None` when the directory has no such patient.
    fn find_patient(&self, patient: &PatientId) -> Result<Option<PatientRecord>, ServiceFailure>;

    /// All known patient records, for listings and demos.
    fn all_patients(&self) -> Result<Vec<PatientRecord>, ServiceFailure>;
}

/// Supplies a patient's orders.
pub trait OrderService: Send + Sync {
    /// Every order on file for `patient`, in the service's own order.
    fn orders_for_patient(&self, patient: &PatientId) -> Result<Vec<Order>, ServiceFailure>;
}

/// Admission/discharge/transfer policy: which locations host visits, and who is currently
/// admitted where.
pub trait AdtService: Send + Sync {
    /// The closest location at or above `location` that hosts visits.
    ///
    /// Signals [`AdtError::VisitsUnsupported`] when no such location exists; callers treat
    /// that as an expected outcome, not a failure.
    fn location_that_supports_visits(&self, location: &Location) -> Result<Location, AdtError>;

    /// The patient's currently open visit at `location`, if any.
    fn active_visit(
        &self,
        patient: &PatientId,
        location: &Location,
    ) -> Result<Option<VisitSummary>, AdtError>;
}

/// Registry of pluggable UI contributions, filtered per user.
pub trait ExtensionRegistry: Send + Sync {
    /// Contributions registered under `point` that `user` is allowed to see, in registration
    /// order.
    fn extensions_for_user(
        &self,
        user: &UserContext,
        point: &str,
    ) -> Result<Vec<Extension>, ServiceFailure>;
}
