//! Patient dashboard page assembly.
//!
//! One build per request: validate the patient record, query the collaborating services in a
//! fixed sequence, and hand back either a populated [`PageModel`] or a redirect directive.
//!
//! Responsibilities:
//! - Divert voided records to the deleted-patient view before anything else runs
//! - Populate the template attributes in their contractual order
//! - Tolerate exactly one failure mode (a session location that does not host visits)
//! - Wrap every other collaborator failure into [`DashboardError`] and abort
//!
//! Notes:
//! - Attribute keys are template contract; rename nothing
//! - `overallActions` and `visitActions` are sorted by the extension natural order, the other
//!   two extension lists keep registration order

use std::sync::Arc;

use crate::addons::{AddressLevelProvider, address_hierarchy_field_names};
use crate::constants::{
    DEFAULT_TAB, DELETED_PATIENT_PAGE, ENCOUNTER_TEMPLATE_EXTENSION_POINT,
    OVERALL_ACTIONS_EXTENSION_POINT, PATIENT_TABS_EXTENSION_POINT, VISIT_ACTIONS_EXTENSION_POINT,
};
use crate::error::{AdtError, DashboardError, DashboardResult};
use crate::model::{Extension, PatientRecord, PatientSummary, SessionContext, VisitSummary};
use crate::page::{AttributeValue, PageDirective, PageModel, Redirect};
use crate::services::{AdtService, ExtensionRegistry, OrderService};
use wardview_types::PatientId;

/// Assembles the patient dashboard page from the platform services it is constructed with.
pub struct DashboardService {
    orders: Arc<dyn OrderService>,
    adt: Arc<dyn AdtService>,
    extensions: Arc<dyn ExtensionRegistry>,
    address_levels: Arc<dyn AddressLevelProvider>,
}

impl DashboardService {
    pub fn new(
        orders: Arc<dyn OrderService>,
        adt: Arc<dyn AdtService>,
        extensions: Arc<dyn ExtensionRegistry>,
        address_levels: Arc<dyn AddressLevelProvider>,
    ) -> Self {
        Self {
            orders,
            adt,
            extensions,
            address_levels,
        }
    }

    /// Builds the dashboard for an already-resolved patient record.
    ///
    /// Voided records (either marker) short-circuit to a redirect towards the deleted-patient
    /// view carrying the patient id; no model is assembled in that case. Otherwise the model
    /// is populated attribute by attribute and returned for rendering.
    pub fn patient_page(
        &self,
        patient: PatientRecord,
        selected_tab: Option<&str>,
        session: &SessionContext,
    ) -> DashboardResult<PageDirective> {
        if patient.voided || patient.person_voided {
            tracing::debug!(patient = %patient.id, "voided record; redirecting");
            return Ok(PageDirective::Redirect(
                Redirect::to(DELETED_PATIENT_PAGE).with_param("patientId", patient.id.as_str()),
            ));
        }

        let patient_id = patient.id.clone();
        let mut model = PageModel::new();

        model.insert("patient", AttributeValue::Patient(PatientSummary::new(patient)));

        let orders = self
            .orders
            .orders_for_patient(&patient_id)
            .map_err(|source| DashboardError::OrderLookup {
                patient: patient_id.clone(),
                source,
            })?;
        model.insert("orders", AttributeValue::Orders(orders));

        let field_names = address_hierarchy_field_names(self.address_levels.as_ref())?;
        model.insert("addressHierarchyLevels", AttributeValue::Names(field_names));

        model.insert(
            "selectedTab",
            AttributeValue::Text(selected_tab.unwrap_or(DEFAULT_TAB).to_owned()),
        );

        let active_visit = match self.visit_for_session(&patient_id, session) {
            Ok(visit) => visit,
            Err(AdtError::VisitsUnsupported(location)) => {
                tracing::debug!(%location, "session location does not host visits");
                None
            }
            Err(AdtError::Failed(source)) => {
                return Err(DashboardError::VisitLookup {
                    patient: patient_id,
                    source,
                });
            }
        };
        model.insert("activeVisit", AttributeValue::Visit(active_visit));

        let encounter_templates = self.extensions_at(session, ENCOUNTER_TEMPLATE_EXTENSION_POINT)?;
        model.insert(
            "encounterTemplateExtensions",
            AttributeValue::Extensions(encounter_templates),
        );

        let mut overall_actions = self.extensions_at(session, OVERALL_ACTIONS_EXTENSION_POINT)?;
        overall_actions.sort();
        model.insert("overallActions", AttributeValue::Extensions(overall_actions));

        let mut visit_actions = self.extensions_at(session, VISIT_ACTIONS_EXTENSION_POINT)?;
        visit_actions.sort();
        model.insert("visitActions", AttributeValue::Extensions(visit_actions));

        let patient_tabs = self.extensions_at(session, PATIENT_TABS_EXTENSION_POINT)?;
        model.insert("patientTabs", AttributeValue::Extensions(patient_tabs));

        Ok(PageDirective::Render(model))
    }

    /// The patient's active visit as seen from the session location.
    ///
    /// No session location means no visit; a location is first narrowed to its visit-capable
    /// ancestor, whose absence the caller treats as the tolerated outcome.
    fn visit_for_session(
        &self,
        patient: &PatientId,
        session: &SessionContext,
    ) -> Result<Option<VisitSummary>, AdtError> {
        let Some(session_location) = session.location.as_ref() else {
            return Ok(None);
        };
        let visit_location = self.adt.location_that_supports_visits(session_location)?;
        self.adt.active_visit(patient, &visit_location)
    }

    fn extensions_at(
        &self,
        session: &SessionContext,
        point: &str,
    ) -> DashboardResult<Vec<Extension>> {
        self.extensions
            .extensions_for_user(&session.user, point)
            .map_err(|source| DashboardError::ExtensionLookup {
                point: point.to_owned(),
                source,
            })
    }
}
