//! Page model and navigation directive handed to the rendering layer.
//!
//! The dashboard assembles a [`PageModel`] of named attributes; the rendering layer consumes
//! the serialised form. Keys are part of the template contract and must not be renamed.
//!
//! Responsibilities:
//! - Carry template attributes as a closed set of value shapes
//! - Distinguish "render this model" from "redirect elsewhere"
//! - Build redirect targets with their query parameters

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Extension, Order, PatientRecord, PatientSummary, VisitSummary};

/// A value placed under a model attribute.
///
/// The set of shapes is closed on purpose: every attribute the dashboard publishes has a known
/// type, and the accessors below let callers recover it without downcasting.
///
/// Serialisation is untagged; each variant serialises as its bare content, so the template
/// layer sees plain objects, arrays and strings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Patient(PatientSummary),
    /// A raw patient record, as fragment configurations carry it before wrapping.
    Record(PatientRecord),
    Orders(Vec<Order>),
    /// An attribute that is always present but may carry no visit, serialising as `null`.
    Visit(Option<VisitSummary>),
    Extensions(Vec<Extension>),
    /// A list of plain names, such as address field names.
    Names(Vec<String>),
    Text(String),
    Flag(bool),
}

impl AttributeValue {
    pub fn as_patient(&self) -> Option<&PatientSummary> {
        match self {
            Self::Patient(patient) => Some(patient),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&PatientRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_orders(&self) -> Option<&[Order]> {
        match self {
            Self::Orders(orders) => Some(orders),
            _ => None,
        }
    }

    /// Inner visit for `Visit` attributes; `Some(None)` means present-but-empty.
    pub fn as_visit(&self) -> Option<Option<&VisitSummary>> {
        match self {
            Self::Visit(visit) => Some(visit.as_ref()),
            _ => None,
        }
    }

    pub fn as_extensions(&self) -> Option<&[Extension]> {
        match self {
            Self::Extensions(extensions) => Some(extensions),
            _ => None,
        }
    }

    pub fn as_names(&self) -> Option<&[String]> {
        match self {
            Self::Names(names) => Some(names),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

/// Named attributes for one page render, keyed by template attribute name.
///
/// Serialises as a plain JSON object with deterministic key order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageModel {
    attributes: BTreeMap<String, AttributeValue>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

/// A redirect target: a page path plus query parameters.
///
/// Parameter values are taken as-is; callers pass identifier-safe values only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub page: String,
    pub params: Vec<(String, String)>,
}

impl Redirect {
    pub fn to(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Query string without the leading `?`; empty when there are no parameters.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Outcome of assembling a page: either a model to render or a redirect to follow.
#[derive(Clone, Debug, PartialEq)]
pub enum PageDirective {
    Render(PageModel),
    Redirect(Redirect),
}

impl PageDirective {
    pub fn model(&self) -> Option<&PageModel> {
        match self {
            Self::Render(model) => Some(model),
            Self::Redirect(_) => None,
        }
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Render(_) => None,
            Self::Redirect(redirect) => Some(redirect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_stores_and_recovers_typed_attributes() {
        let mut model = PageModel::new();
        model.insert("selectedTab", AttributeValue::Text("visits".into()));
        model.insert("activeVisit", AttributeValue::Visit(None));

        assert_eq!(model.len(), 2);
        assert_eq!(
            model.get("selectedTab").and_then(AttributeValue::as_text),
            Some("visits")
        );
        assert_eq!(model.get("activeVisit").and_then(AttributeValue::as_visit), Some(None));
        assert!(model.get("selectedTab").and_then(AttributeValue::as_visit).is_none());
    }

    #[test]
    fn model_serialises_as_a_plain_object() {
        let mut model = PageModel::new();
        model.insert("selectedTab", AttributeValue::Text("visits".into()));
        model.insert("activeVisit", AttributeValue::Visit(None));
        model.insert("orders", AttributeValue::Orders(Vec::new()));
        model.insert(
            "addressHierarchyLevels",
            AttributeValue::Names(vec!["country".into(), "county".into()]),
        );
        model.insert("hideEditContactInfoButton", AttributeValue::Flag(false));

        let value = serde_json::to_value(&model).expect("serialise model");
        assert_eq!(value["selectedTab"], "visits");
        assert!(value["activeVisit"].is_null(), "empty visit serialises as null");
        assert_eq!(value["orders"], serde_json::json!([]));
        assert_eq!(value["addressHierarchyLevels"], serde_json::json!(["country", "county"]));
        assert_eq!(value["hideEditContactInfoButton"], false);
    }

    #[test]
    fn insert_overwrites_an_existing_key() {
        let mut model = PageModel::new();
        model.insert("selectedTab", AttributeValue::Text("visits".into()));
        model.insert("selectedTab", AttributeValue::Text("growthChart".into()));

        assert_eq!(model.len(), 1);
        assert_eq!(
            model.get("selectedTab").and_then(AttributeValue::as_text),
            Some("growthChart")
        );
    }

    #[test]
    fn redirect_builds_its_query_string() {
        let redirect =
            Redirect::to("patientdashboard/deletedPatient").with_param("patientId", "1042");
        assert_eq!(redirect.query_string(), "patientId=1042");

        let bare = Redirect::to("home");
        assert_eq!(bare.query_string(), "");

        let two = Redirect::to("home").with_param("a", "1").with_param("b", "2");
        assert_eq!(two.query_string(), "a=1&b=2");
    }

    #[test]
    fn directive_accessors_match_the_variant() {
        let render = PageDirective::Render(PageModel::new());
        assert!(render.model().is_some());
        assert!(render.redirect().is_none());

        let redirect = PageDirective::Redirect(Redirect::to("home"));
        assert!(redirect.model().is_none());
        assert_eq!(redirect.redirect().map(|r| r.page.as_str()), Some("home"));
    }
}
