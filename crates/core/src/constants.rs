//! Constants used throughout the wardview core crate.
//!
//! This module collects the extension point identifiers and page names the
//! dashboard depends on, to ensure consistency across the codebase and the
//! deployment descriptors that register extensions against these points.

/// Tab shown when the request does not name one.
pub const DEFAULT_TAB: &str = "visits";

/// Page the dashboard redirects to for soft-deleted patients.
pub const DELETED_PATIENT_PAGE: &str = "patientdashboard/deletedPatient";

/// Extension point for encounter entry templates offered on the visits tab.
pub const ENCOUNTER_TEMPLATE_EXTENSION_POINT: &str = "referenceapplication.encounterTemplate";

/// Extension point for actions that apply to the patient as a whole.
pub const OVERALL_ACTIONS_EXTENSION_POINT: &str = "patientDashboard.overallActions";

/// Extension point for actions that apply to the current visit.
pub const VISIT_ACTIONS_EXTENSION_POINT: &str = "patientDashboard.visitActions";

/// Extension point for additional dashboard tabs.
pub const PATIENT_TABS_EXTENSION_POINT: &str = "patientDashboard.tabs";
