//! Error types for dashboard and fragment assembly.
//!
//! The taxonomy follows the module's request semantics: the visit-incapable
//! signal is expected and recoverable, an absent address-hierarchy add-on is
//! expected and silent, and every other collaborator failure is fatal to the
//! request and carries its underlying cause.

use wardview_types::PatientId;

/// Opaque failure raised by an external collaborator service.
///
/// Collaborators are consumed through traits and their concrete failure types are not known to
/// this module, so causes travel as boxed errors.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ServiceFailure(pub Box<dyn std::error::Error + Send + Sync>);

impl ServiceFailure {
    /// Wraps any error (or message) as a collaborator failure.
    pub fn new(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(cause.into())
    }
}

/// Outcomes of visit-location resolution in the admission/transfer service.
#[derive(Debug, thiserror::Error)]
pub enum AdtError {
    /// The given location (or the absence of one) cannot host visits.
    ///
    /// Expected and recoverable: the dashboard renders without an active visit instead of
    /// failing the request.
    #[error("location '{0}' does not support visits")]
    VisitsUnsupported(String),

    /// Hard failure inside the admission/transfer service.
    #[error("admission/transfer service failure: {0}")]
    Failed(ServiceFailure),
}

/// Errors that abort dashboard assembly.
///
/// Once one of these is raised the remaining assembly steps are skipped and the caller must
/// treat the whole request as failed; no retry is attempted here.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("order lookup failed for patient {patient}: {source}")]
    OrderLookup {
        patient: PatientId,
        source: ServiceFailure,
    },

    #[error("active-visit lookup failed for patient {patient}: {source}")]
    VisitLookup {
        patient: PatientId,
        source: ServiceFailure,
    },

    #[error("extension lookup failed for point '{point}': {source}")]
    ExtensionLookup {
        point: String,
        source: ServiceFailure,
    },

    #[error("error obtaining address hierarchy levels: {0}")]
    AddressHierarchy(ServiceFailure),
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;

/// Errors raised while preparing fragment configurations.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    /// The fragment configuration carries no patient to work on.
    #[error("fragment configuration has no patient attribute")]
    MissingPatient,
}
