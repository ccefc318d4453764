//! Submit-time validation over the requirement table.

use intake_domain::{AnswerSet, Section};
use thiserror::Error;

use crate::requirements::section_requirements;
use crate::visibility::Visibility;

/// Outcome of checking one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub section: Section,
    pub visible: bool,
    pub missing: Vec<&'static str>,
}

impl SectionReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// The first section that blocks submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub section: Section,
    pub message: String,
    pub missing: Vec<&'static str>,
}

/// Lists the unmet requirements of `section`. Hidden sections report nothing missing.
pub fn validate_section(answers: &AnswerSet, section: Section) -> SectionReport {
    let visibility = Visibility::evaluate(answers);
    let visible = visibility.shows(section);
    let missing = if visible {
        section_requirements(section)
            .filter(|requirement| requirement.is_required(answers, &visibility))
            .filter(|requirement| !requirement.is_satisfied(answers))
            .map(|requirement| requirement.label)
            .collect()
    } else {
        Vec::new()
    };
    SectionReport {
        section,
        visible,
        missing,
    }
}

pub fn validate_generic(answers: &AnswerSet) -> bool {
    validate_section(answers, Section::Generic).is_complete()
}

/// Vacuously true when the Web-Technical section does not apply.
pub fn validate_web_technical(answers: &AnswerSet) -> bool {
    validate_section(answers, Section::WebTechnical).is_complete()
}

/// Vacuously true when the CTV/App-Technical section does not apply.
pub fn validate_ctv_app_technical(answers: &AnswerSet) -> bool {
    validate_section(answers, Section::CtvAppTechnical).is_complete()
}

/// Checks sections in submission order and reports the first incomplete one.
pub fn validate_submission(answers: &AnswerSet) -> Result<(), ValidationFailure> {
    for section in Section::ORDER {
        let report = validate_section(answers, section);
        if !report.is_complete() {
            return Err(ValidationFailure {
                section,
                message: format!(
                    "Please fill in all mandatory fields in the {} section",
                    section.title()
                ),
                missing: report.missing,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_domain::{
        AdFormat, Environment, IntermediaryCategory, OperationType, OwnedOperatedCategory,
        WebIntegrationMethod,
    };

    fn core_generic() -> AnswerSet {
        let mut answers = AnswerSet::empty();
        answers.business_name = "Acme Media".into();
        answers.business_domain = "acme.example".into();
        answers.environments.insert(Environment::Ooh);
        answers.formats.insert(AdFormat::Display);
        answers.operation_type = Some(OperationType::OwnedAndOperated);
        answers
            .seller_categories
            .owned_and_operated
            .insert(OwnedOperatedCategory::Publisher);
        answers
    }

    #[test]
    fn empty_answers_fail_generic() {
        let report = validate_section(&AnswerSet::empty(), Section::Generic);
        assert!(!report.is_complete());
        assert!(report.missing.contains(&"Business name"));
        assert!(!validate_generic(&AnswerSet::empty()));
    }

    #[test]
    fn six_core_fields_pass_generic() {
        assert!(validate_generic(&core_generic()));
    }

    #[test]
    fn hosted_sellers_json_requires_url() {
        let mut answers = core_generic();
        answers.has_sellers_json = true;
        assert!(!validate_generic(&answers));
        answers.sellers_json_url = "https://acme.example/sellers.json".into();
        assert!(validate_generic(&answers));
    }

    #[test]
    fn resale_proportion_is_optional_for_both() {
        let mut answers = core_generic();
        answers.operation_type = Some(OperationType::Both);
        answers
            .seller_categories
            .intermediary
            .insert(IntermediaryCategory::AdNetwork);
        assert!(validate_generic(&answers));
    }

    #[test]
    fn app_environments_require_app_stores() {
        let mut answers = core_generic();
        answers.environments.insert(Environment::MobileInApp);
        assert!(!validate_generic(&answers));
        answers.app_stores.insert(intake_domain::AppStore::GooglePlay);
        assert!(validate_generic(&answers));
    }

    #[test]
    fn desktop_in_app_requires_app_stores() {
        let mut answers = core_generic();
        answers.environments.insert(Environment::DesktopInApp);
        let report = validate_section(&answers, Section::Generic);
        assert_eq!(report.missing, vec!["App stores"]);
        answers.app_stores.insert(intake_domain::AppStore::Apple);
        assert!(validate_generic(&answers));
    }

    #[test]
    fn app_format_alone_requires_app_stores() {
        let mut answers = core_generic();
        answers.formats.clear();
        answers.formats.insert(AdFormat::NativeApp);
        assert!(!validate_generic(&answers));
        answers.app_stores.insert(intake_domain::AppStore::Roku);
        assert!(validate_generic(&answers));
    }

    #[test]
    fn hidden_technical_sections_pass_vacuously() {
        let answers = AnswerSet::empty();
        assert!(validate_web_technical(&answers));
        assert!(validate_ctv_app_technical(&answers));
        assert!(!validate_section(&answers, Section::WebTechnical).visible);
    }

    #[test]
    fn preferred_integration_outside_method_set_fails_web() {
        let mut answers = core_generic();
        answers.environments.insert(Environment::Web);
        let web = &mut answers.web_technical;
        web.integration_methods.insert(WebIntegrationMethod::Tam);
        web.preferred_integration = Some(WebIntegrationMethod::PrebidServer);
        web.request_volume.display = "10M".into();
        web.traffic_percentage.video.latam = "5".into();
        web.data_centers.insert(intake_domain::DataCenter::Eu);

        let report = validate_section(&answers, Section::WebTechnical);
        assert_eq!(report.missing, vec!["Preferred web integration"]);

        answers.web_technical.preferred_integration = Some(WebIntegrationMethod::Tam);
        assert!(validate_web_technical(&answers));
    }

    #[test]
    fn submission_reports_first_failing_section() {
        let mut answers = core_generic();
        answers.environments.insert(Environment::Web);
        let failure = validate_submission(&answers).unwrap_err();
        assert_eq!(failure.section, Section::WebTechnical);
        assert_eq!(
            failure.to_string(),
            "Please fill in all mandatory fields in the Web Technical section"
        );

        let failure = validate_submission(&AnswerSet::empty()).unwrap_err();
        assert_eq!(failure.section, Section::Generic);
    }
}
