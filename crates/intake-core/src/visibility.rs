//! Pure predicates deciding which sections and sub-fields are relevant.
//!
//! Everything here is recomputed from the current answers on every call;
//! unrecognised option values never satisfy a predicate.

use intake_domain::{AdFormat, AnswerSet, Environment, LabelledOption, Section};

const WEB_FORMATS: &[AdFormat] = &[
    AdFormat::Display,
    AdFormat::Video,
    AdFormat::InterstitialWeb,
    AdFormat::NativeWeb,
];

const APP_ENVIRONMENTS: &[Environment] = &[
    Environment::MobileInApp,
    Environment::DesktopInApp,
    Environment::CtvOtt,
];

const APP_FORMATS: &[AdFormat] = &[AdFormat::InterstitialApp, AdFormat::NativeApp];

/// `true` when the Web-Technical section applies.
pub fn requires_web(answers: &AnswerSet) -> bool {
    answers.environments.contains(&Environment::Web) || answers.formats.intersects(WEB_FORMATS)
}

/// `true` when the CTV/App-Technical section applies.
pub fn requires_ctv_app(answers: &AnswerSet) -> bool {
    answers.environments.intersects(APP_ENVIRONMENTS) || answers.formats.intersects(APP_FORMATS)
}

/// `true` when the partner must name the app stores it distributes through.
///
/// In-app environments (CTV/OTT apps included) or any APP format qualify.
pub fn is_app_related(answers: &AnswerSet) -> bool {
    answers.environments.intersects(APP_ENVIRONMENTS)
        || answers.formats.intersects(APP_FORMATS)
}

pub fn has_intermediary_selection(answers: &AnswerSet) -> bool {
    answers
        .seller_categories
        .intermediary
        .iter()
        .any(LabelledOption::is_recognized)
}

/// Section and sub-block relevance for one snapshot of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub web_technical: bool,
    pub ctv_app_technical: bool,
    pub app_related: bool,
    pub intermediary: bool,
}

impl Visibility {
    pub fn evaluate(answers: &AnswerSet) -> Self {
        Self {
            web_technical: requires_web(answers),
            ctv_app_technical: requires_ctv_app(answers),
            app_related: is_app_related(answers),
            intermediary: has_intermediary_selection(answers),
        }
    }

    /// Generic is always shown; the technical sections follow their predicates.
    pub fn shows(&self, section: Section) -> bool {
        match section {
            Section::Generic => true,
            Section::WebTechnical => self.web_technical,
            Section::CtvAppTechnical => self.ctv_app_technical,
        }
    }

    pub fn sections(&self) -> Vec<Section> {
        Section::ORDER
            .into_iter()
            .filter(|section| self.shows(*section))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(environments: &[Environment], formats: &[AdFormat]) -> AnswerSet {
        let mut answers = AnswerSet::empty();
        answers.environments = environments.iter().cloned().collect();
        answers.formats = formats.iter().cloned().collect();
        answers
    }

    #[test]
    fn empty_answers_show_only_generic() {
        let visibility = Visibility::evaluate(&AnswerSet::empty());
        assert_eq!(visibility, Visibility::default());
        assert_eq!(visibility.sections(), vec![Section::Generic]);
    }

    #[test]
    fn web_environment_or_web_format_requires_web() {
        assert!(requires_web(&with(&[Environment::Web], &[])));
        assert!(requires_web(&with(&[], &[AdFormat::NativeWeb])));
        assert!(!requires_web(&with(&[Environment::Ooh], &[AdFormat::NativeApp])));
    }

    #[test]
    fn web_stays_required_after_adding_unrelated_formats() {
        let mut answers = with(&[Environment::Web], &[]);
        answers.formats.insert(AdFormat::NativeApp);
        assert!(requires_web(&answers));
        assert!(requires_ctv_app(&answers));
    }

    #[test]
    fn app_environments_and_formats_require_ctv_app() {
        assert!(requires_ctv_app(&with(&[Environment::DesktopInApp], &[])));
        assert!(requires_ctv_app(&with(&[], &[AdFormat::InterstitialApp])));
        assert!(!requires_ctv_app(&with(&[Environment::Web], &[AdFormat::Display])));
    }

    #[test]
    fn app_store_requirement_follows_in_app_environments_and_formats() {
        assert!(is_app_related(&with(&[Environment::CtvOtt], &[])));
        assert!(is_app_related(&with(&[Environment::MobileInApp], &[])));
        assert!(is_app_related(&with(&[Environment::DesktopInApp], &[AdFormat::Display])));
        assert!(is_app_related(&with(&[], &[AdFormat::NativeApp])));
        assert!(is_app_related(&with(&[Environment::Web], &[AdFormat::InterstitialApp])));
        assert!(!is_app_related(&with(&[Environment::Web, Environment::Ooh], &[AdFormat::Video])));
    }

    #[test]
    fn unrecognised_values_are_inert() {
        let answers = with(
            &[Environment::Unrecognized("WEB ".into())],
            &[AdFormat::Unrecognized("Video".into())],
        );
        assert_eq!(Visibility::evaluate(&answers), Visibility::default());

        let mut answers = AnswerSet::empty();
        answers
            .seller_categories
            .intermediary
            .insert(intake_domain::IntermediaryCategory::Unrecognized("Broker".into()));
        assert!(!has_intermediary_selection(&answers));
    }
}
