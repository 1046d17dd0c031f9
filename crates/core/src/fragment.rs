//! Fragment configuration preparation.
//!
//! Fragments are small embeddable page parts; the dashboard embeds the contact-info card.
//! A fragment arrives with a caller-supplied configuration that this module normalises before
//! rendering.

use crate::error::FragmentError;
use crate::model::PatientSummary;
use crate::page::{AttributeValue, PageModel};

/// Prepares a contact-info fragment configuration in place.
///
/// The `patient` attribute may arrive as a raw record or as an already-wrapped summary; raw
/// records are wrapped, summaries pass through untouched. A configuration without a usable
/// patient is rejected. `hideEditContactInfoButton` defaults to `false` when the caller did
/// not set it.
pub fn contact_info(config: &mut PageModel) -> Result<(), FragmentError> {
    let wrapped = match config.get("patient") {
        Some(AttributeValue::Record(record)) => Some(PatientSummary::new(record.clone())),
        Some(AttributeValue::Patient(_)) => None,
        _ => return Err(FragmentError::MissingPatient),
    };
    if let Some(summary) = wrapped {
        config.insert("patient", AttributeValue::Patient(summary));
    }

    if !config.contains("hideEditContactInfoButton") {
        config.insert("hideEditContactInfoButton", AttributeValue::Flag(false));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PatientRecord;
    use wardview_types::PatientId;

    fn record() -> PatientRecord {
        PatientRecord {
            id: PatientId::parse("77").expect("valid id"),
            identifier: "MRN-00077".into(),
            given_name: "Joan".into(),
            family_name: "Okafor".into(),
            birthdate: None,
            voided: false,
            person_voided: false,
        }
    }

    #[test]
    fn raw_patient_record_is_wrapped_in_place() {
        let mut config = PageModel::new();
        config.insert("patient", AttributeValue::Record(record()));

        contact_info(&mut config).expect("prepare fragment");

        let summary = config
            .get("patient")
            .and_then(AttributeValue::as_patient)
            .expect("patient must now be a summary");
        assert_eq!(summary.formatted_name(), "Okafor, Joan");
    }

    #[test]
    fn an_already_wrapped_patient_is_left_alone() {
        let mut config = PageModel::new();
        config.insert("patient", AttributeValue::Patient(PatientSummary::new(record())));

        contact_info(&mut config).expect("prepare fragment");

        let summary = config
            .get("patient")
            .and_then(AttributeValue::as_patient)
            .expect("patient stays a summary");
        assert_eq!(summary.id().as_str(), "77");
    }

    #[test]
    fn a_configuration_without_a_patient_is_rejected() {
        let mut config = PageModel::new();
        let err = contact_info(&mut config).expect_err("must reject");
        assert!(matches!(err, FragmentError::MissingPatient));

        let mut config = PageModel::new();
        config.insert("patient", AttributeValue::Text("not a patient".into()));
        let err = contact_info(&mut config).expect_err("must reject a non-patient shape");
        assert!(matches!(err, FragmentError::MissingPatient));
    }

    #[test]
    fn edit_button_flag_defaults_to_visible() {
        let mut config = PageModel::new();
        config.insert("patient", AttributeValue::Record(record()));

        contact_info(&mut config).expect("prepare fragment");

        assert_eq!(
            config.get("hideEditContactInfoButton").and_then(AttributeValue::as_flag),
            Some(false)
        );
    }

    #[test]
    fn a_caller_supplied_flag_is_preserved() {
        let mut config = PageModel::new();
        config.insert("patient", AttributeValue::Record(record()));
        config.insert("hideEditContactInfoButton", AttributeValue::Flag(true));

        contact_info(&mut config).expect("prepare fragment");

        assert_eq!(
            config.get("hideEditContactInfoButton").and_then(AttributeValue::as_flag),
            Some(true)
        );
    }
}
