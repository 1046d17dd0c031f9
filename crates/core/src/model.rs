//! Domain records exchanged with the hospital platform's services.
//!
//! This module defines the records the dashboard consumes from its collaborators and the
//! wrapper it hands to the template layer.
//!
//! Responsibilities:
//! - Define the resolved patient record and its soft-deletion markers
//! - Define order, visit, location, user and session carriers
//! - Define the extension descriptor and its natural ordering
//! - Define the address hierarchy level shape exposed by the optional add-on
//!
//! Notes:
//! - Wire names are camelCase because the template layer consumes the serialised form directly
//! - None of these types touch storage; resolution and persistence live in the platform

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wardview_types::PatientId;

/// Resolved patient record as supplied by the patient directory.
///
/// `voided` and `person_voided` are advisory soft-deletion markers; either one being set means
/// the record must not be displayed normally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: PatientId,

    /// Medical record number or other facility identifier.
    pub identifier: String,

    pub given_name: String,

    pub family_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,

    /// Soft-deletion marker on the patient record itself.
    pub voided: bool,

    /// Soft-deletion marker on the linked person record.
    pub person_voided: bool,
}

/// Domain wrapper placed under the `patient` model attribute.
///
/// The template layer works with the serialised form, which adds derived presentation fields
/// (formatted name, age) to the raw record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientSummary {
    record: PatientRecord,
}

impl PatientSummary {
    pub fn new(record: PatientRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    pub fn id(&self) -> &PatientId {
        &self.record.id
    }

    /// Display name in "Family, Given" form.
    pub fn formatted_name(&self) -> String {
        format!("{}, {}", self.record.family_name, self.record.given_name)
    }

    /// Whole years of age on the given date, when a birthdate is known.
    ///
    /// Returns `None` for records without a birthdate and for dates before the birthdate.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let birth = self.record.birthdate?;
        let mut years = on.year() - birth.year();
        if (on.month(), on.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}

/// Wire representation of [`PatientSummary`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PatientSummaryWire<'a> {
    id: &'a PatientId,
    identifier: &'a str,
    given_name: &'a str,
    family_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthdate: Option<NaiveDate>,
    formatted_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<u32>,
}

impl Serialize for PatientSummary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wire = PatientSummaryWire {
            id: &self.record.id,
            identifier: &self.record.identifier,
            given_name: &self.record.given_name,
            family_name: &self.record.family_name,
            birthdate: self.record.birthdate,
            formatted_name: self.formatted_name(),
            age: self.age_on(Utc::now().date_naive()),
        };
        wire.serialize(serializer)
    }
}

/// A clinical or drug order as returned by the order service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,

    pub order_number: String,

    /// Display text of the ordered item (concept, drug, panel, …).
    pub display: String,

    pub ordered_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orderer: Option<String>,
}

/// A clinical visit; `stopped_at` is absent while the visit is open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitSummary {
    pub id: Uuid,

    /// Identifier of the location hosting the visit.
    pub location_id: String,

    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<DateTime<Utc>>,
}

impl VisitSummary {
    pub fn is_open(&self) -> bool {
        self.stopped_at.is_none()
    }
}

/// A location in the facility's location tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The authenticated user on whose behalf extensions are filtered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub username: String,
}

impl UserContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Per-request session state, threaded in explicitly so assembly stays deterministic under
/// test. `location` is the session's working location and may be unset.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub user: UserContext,
    pub location: Option<Location>,
}

/// A pluggable UI contribution registered under an extension point.
///
/// The natural ordering starts with the `order` weight (lower renders first); the remaining
/// fields only break ties so that sorting is total and deterministic. Field declaration order
/// matters here because `Ord` is derived.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Sort weight; lower renders first.
    pub order: i32,

    pub id: String,

    /// The extension point this contribution is registered under.
    pub extension_point_id: String,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Privilege the current user must hold for this contribution to be offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_privilege: Option<String>,
}

impl Extension {
    pub fn new(
        order: i32,
        id: impl Into<String>,
        extension_point_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            order,
            id: id.into(),
            extension_point_id: extension_point_id.into(),
            label: label.into(),
            url: None,
            icon: None,
            required_privilege: None,
        }
    }
}

/// One named address field of the administrative address structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressField {
    pub name: String,
}

/// One tier of the administrative address structure, provided by the optional
/// address-hierarchy add-on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressHierarchyLevel {
    /// Display name of the tier (for example "Country").
    pub name: String,

    /// The address field this tier is mapped onto.
    pub address_field: AddressField,
}

impl AddressHierarchyLevel {
    pub fn new(name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address_field: AddressField {
                name: field_name.into(),
            },
        }
    }
}
