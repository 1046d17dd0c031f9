//! In-memory stand-ins for the platform services.
//!
//! These back the demo deployment, the CLI and the HTTP tests. State is seeded up front and
//! read-only afterwards, so a populated instance can be shared behind an `Arc`.
//!
//! Responsibilities:
//! - Patient directory, orders, admission/transfer policy and extension registry over maps
//! - Visit capability decided by walking a location's parent chain against a capable set
//! - A seeded address-hierarchy provider honouring the mapped/unmapped inclusion flags
//! - `MemoryHis::demo()`: a small plausible hospital for demos and tests

use std::collections::{HashMap, HashSet};

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::addons::AddressLevelProvider;
use crate::constants::{
    ENCOUNTER_TEMPLATE_EXTENSION_POINT, OVERALL_ACTIONS_EXTENSION_POINT,
    PATIENT_TABS_EXTENSION_POINT, VISIT_ACTIONS_EXTENSION_POINT,
};
use crate::error::{AdtError, ServiceFailure};
use crate::model::{
    AddressHierarchyLevel, Extension, Location, Order, PatientRecord, UserContext, VisitSummary,
};
use crate::services::{AdtService, ExtensionRegistry, OrderService, PatientDirectory};
use wardview_types::PatientId;

struct StoredLocation {
    location: Location,
    parent: Option<String>,
}

/// Seeded stand-in for the hospital information system's services.
#[derive(Default)]
pub struct MemoryHis {
    patients: HashMap<PatientId, PatientRecord>,
    orders: HashMap<PatientId, Vec<Order>>,
    locations: HashMap<String, StoredLocation>,
    visit_locations: HashSet<String>,
    active_visits: HashMap<PatientId, VisitSummary>,
    extensions: HashMap<String, Vec<Extension>>,
    privileges: HashMap<String, HashSet<String>>,
}

impl MemoryHis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_patient(&mut self, record: PatientRecord) {
        self.patients.insert(record.id.clone(), record);
    }

    pub fn add_order(&mut self, patient: PatientId, order: Order) {
        self.orders.entry(patient).or_default().push(order);
    }

    /// Registers a location; `supports_visits` marks it as a visit host for the whole subtree
    /// beneath it.
    pub fn add_location(
        &mut self,
        location: Location,
        parent: Option<&str>,
        supports_visits: bool,
    ) {
        if supports_visits {
            self.visit_locations.insert(location.id.clone());
        }
        self.locations.insert(
            location.id.clone(),
            StoredLocation {
                location,
                parent: parent.map(str::to_owned),
            },
        );
    }

    pub fn add_active_visit(&mut self, patient: PatientId, visit: VisitSummary) {
        self.active_visits.insert(patient, visit);
    }

    /// Registers an extension under its own `extension_point_id`.
    pub fn add_extension(&mut self, extension: Extension) {
        self.extensions
            .entry(extension.extension_point_id.clone())
            .or_default()
            .push(extension);
    }

    pub fn grant_privilege(&mut self, username: &str, privilege: &str) {
        self.privileges
            .entry(username.to_owned())
            .or_default()
            .insert(privilege.to_owned());
    }

    /// The registered location with the given id, for deployment wiring.
    pub fn location(&self, id: &str) -> Option<Location> {
        self.locations.get(id).map(|stored| stored.location.clone())
    }

    fn visit_location_of(&self, location: &Location) -> Option<Location> {
        let mut current = self.locations.get(&location.id)?;
        loop {
            if self.visit_locations.contains(&current.location.id) {
                return Some(current.location.clone());
            }
            current = current
                .parent
                .as_ref()
                .and_then(|parent| self.locations.get(parent))?;
        }
    }

    fn user_holds(&self, user: &UserContext, privilege: &str) -> bool {
        self.privileges
            .get(&user.username)
            .is_some_and(|held| held.contains(privilege))
    }

    /// A small seeded hospital: one visit-capable site with two wards, one detached clinic,
    /// three patients (one voided), orders, an open visit and extensions for every dashboard
    /// extension point.
    pub fn demo() -> Self {
        let mut his = Self::new();

        his.add_location(Location::new("amani-hospital", "Amani Hospital"), None, true);
        his.add_location(Location::new("ward-2", "Ward 2"), Some("amani-hospital"), false);
        his.add_location(
            Location::new("outpatient-clinic", "Outpatient Clinic"),
            Some("amani-hospital"),
            false,
        );
        his.add_location(Location::new("mobile-clinic", "Mobile Clinic"), None, false);

        his.add_patient(PatientRecord {
            id: demo_id("1042"),
            identifier: "MRN-00042".into(),
            given_name: "Ada".into(),
            family_name: "Pritchard".into(),
            birthdate: chrono::NaiveDate::from_ymd_opt(1968, 4, 12),
            voided: false,
            person_voided: false,
        });
        his.add_patient(PatientRecord {
            id: demo_id("1043"),
            identifier: "MRN-00117".into(),
            given_name: "Brian".into(),
            family_name: "Otieno".into(),
            birthdate: chrono::NaiveDate::from_ymd_opt(1991, 11, 3),
            voided: false,
            person_voided: false,
        });
        his.add_patient(PatientRecord {
            id: demo_id("1099"),
            identifier: "MRN-00313".into(),
            given_name: "Grace".into(),
            family_name: "Muthoni".into(),
            birthdate: None,
            voided: true,
            person_voided: false,
        });

        his.add_order(
            demo_id("1042"),
            Order {
                id: Uuid::new_v4(),
                order_number: "ORD-2201".into(),
                display: "Full blood count".into(),
                ordered_at: Utc::now() - Duration::hours(26),
                orderer: Some("dr.finch".into()),
            },
        );
        his.add_order(
            demo_id("1042"),
            Order {
                id: Uuid::new_v4(),
                order_number: "ORD-2214".into(),
                display: "Chest X-ray".into(),
                ordered_at: Utc::now() - Duration::hours(3),
                orderer: Some("dr.finch".into()),
            },
        );
        his.add_order(
            demo_id("1043"),
            Order {
                id: Uuid::new_v4(),
                order_number: "ORD-2180".into(),
                display: "Malaria smear".into(),
                ordered_at: Utc::now() - Duration::days(4),
                orderer: None,
            },
        );

        his.add_active_visit(
            demo_id("1042"),
            VisitSummary {
                id: Uuid::new_v4(),
                location_id: "ward-2".into(),
                started_at: Utc::now() - Duration::hours(18),
                stopped_at: None,
            },
        );

        his.add_extension(Extension::new(
            10,
            "vitals-capture",
            ENCOUNTER_TEMPLATE_EXTENSION_POINT,
            "Vitals",
        ));
        his.add_extension(Extension::new(
            5,
            "consultation-note",
            ENCOUNTER_TEMPLATE_EXTENSION_POINT,
            "Consultation",
        ));

        his.add_extension(Extension::new(
            30,
            "request-appointment",
            OVERALL_ACTIONS_EXTENSION_POINT,
            "Request appointment",
        ));
        his.add_extension(Extension::new(
            10,
            "start-visit",
            OVERALL_ACTIONS_EXTENSION_POINT,
            "Start visit",
        ));
        let mut delete_action = Extension::new(
            90,
            "delete-patient",
            OVERALL_ACTIONS_EXTENSION_POINT,
            "Delete patient",
        );
        delete_action.required_privilege = Some("Delete Patients".into());
        his.add_extension(delete_action);

        his.add_extension(Extension::new(
            20,
            "end-visit",
            VISIT_ACTIONS_EXTENSION_POINT,
            "End visit",
        ));
        his.add_extension(Extension::new(
            10,
            "add-encounter",
            VISIT_ACTIONS_EXTENSION_POINT,
            "Add encounter",
        ));

        his.add_extension(Extension::new(10, "visits-tab", PATIENT_TABS_EXTENSION_POINT, "Visits"));
        his.add_extension(Extension::new(
            20,
            "growth-chart-tab",
            PATIENT_TABS_EXTENSION_POINT,
            "Growth chart",
        ));

        his.grant_privilege("admin", "Delete Patients");

        his
    }
}

fn demo_id(raw: &str) -> PatientId {
    PatientId::parse(raw).expect("demo id is valid")
}

impl PatientDirectory for MemoryHis {
    fn find_patient(&self, patient: &PatientId) -> Result<Option<PatientRecord>, ServiceFailure> {
        Ok(self.patients.get(patient).cloned())
    }

    fn all_patients(&self) -> Result<Vec<PatientRecord>, ServiceFailure> {
        let mut records: Vec<PatientRecord> = self.patients.values().cloned().collect();
        records.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(records)
    }
}

impl OrderService for MemoryHis {
    fn orders_for_patient(&self, patient: &PatientId) -> Result<Vec<Order>, ServiceFailure> {
        Ok(self.orders.get(patient).cloned().unwrap_or_default())
    }
}

impl AdtService for MemoryHis {
    fn location_that_supports_visits(&self, location: &Location) -> Result<Location, AdtError> {
        self.visit_location_of(location)
            .ok_or_else(|| AdtError::VisitsUnsupported(location.name.clone()))
    }

    fn active_visit(
        &self,
        patient: &PatientId,
        location: &Location,
    ) -> Result<Option<VisitSummary>, AdtError> {
        let Some(visit) = self.active_visits.get(patient) else {
            return Ok(None);
        };
        if !visit.is_open() {
            return Ok(None);
        }

        // The visit counts when it is hosted at the queried visit location itself or anywhere
        // in the subtree beneath it.
        let hosted_under = self
            .locations
            .get(&visit.location_id)
            .and_then(|stored| self.visit_location_of(&stored.location))
            .is_some_and(|visit_location| visit_location.id == location.id);
        if visit.location_id == location.id || hosted_under {
            Ok(Some(visit.clone()))
        } else {
            Ok(None)
        }
    }
}

impl ExtensionRegistry for MemoryHis {
    fn extensions_for_user(
        &self,
        user: &UserContext,
        point: &str,
    ) -> Result<Vec<Extension>, ServiceFailure> {
        let registered = self.extensions.get(point).cloned().unwrap_or_default();
        Ok(registered
            .into_iter()
            .filter(|extension| match &extension.required_privilege {
                None => true,
                Some(privilege) => self.user_holds(user, privilege),
            })
            .collect())
    }
}

/// Seeded address-hierarchy levels, each flagged as mapped or not yet mapped onto an address
/// field.
#[derive(Default)]
pub struct MemoryAddressHierarchy {
    levels: Vec<(AddressHierarchyLevel, bool)>,
}

impl MemoryAddressHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_level(&mut self, level: AddressHierarchyLevel, mapped: bool) {
        self.levels.push((level, mapped));
    }

    /// Three mapped national tiers, top first.
    pub fn demo() -> Self {
        let mut hierarchy = Self::new();
        hierarchy.add_level(AddressHierarchyLevel::new("Country", "country"), true);
        hierarchy.add_level(AddressHierarchyLevel::new("County", "countyDistrict"), true);
        hierarchy.add_level(AddressHierarchyLevel::new("City", "cityVillage"), true);
        hierarchy
    }
}

impl AddressLevelProvider for MemoryAddressHierarchy {
    fn ordered_levels(
        &self,
        include_mapped: bool,
        include_unmapped: bool,
    ) -> Result<Vec<AddressHierarchyLevel>, ServiceFailure> {
        Ok(self
            .levels
            .iter()
            .filter(|(_, mapped)| if *mapped { include_mapped } else { include_unmapped })
            .map(|(level, _)| level.clone())
            .collect())
    }
}
