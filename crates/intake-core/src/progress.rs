//! Completion percentage over the required, currently relevant answers.

use intake_domain::{AnswerSet, Section};

use crate::requirements::section_requirements;

/// Filled and total required items of one included section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionProgress {
    pub section: Section,
    pub filled: usize,
    pub total: usize,
}

/// Per-section counts. Generic is always included; the technical sections only when flagged.
pub fn progress_breakdown(
    answers: &AnswerSet,
    requires_web: bool,
    requires_ctv_app: bool,
) -> Vec<SectionProgress> {
    Section::ORDER
        .into_iter()
        .filter(|section| match section {
            Section::Generic => true,
            Section::WebTechnical => requires_web,
            Section::CtvAppTechnical => requires_ctv_app,
        })
        .map(|section| {
            let mut counts = SectionProgress {
                section,
                filled: 0,
                total: 0,
            };
            for requirement in section_requirements(section)
                .filter(|requirement| requirement.required && requirement.gate.holds(answers))
            {
                counts.total += 1;
                if requirement.is_satisfied(answers) {
                    counts.filled += 1;
                }
            }
            counts
        })
        .collect()
}

/// Rounded completion percentage in `0..=100`; zero when nothing is required.
pub fn progress(answers: &AnswerSet, requires_web: bool, requires_ctv_app: bool) -> u8 {
    let (filled, total) = progress_breakdown(answers, requires_web, requires_ctv_app)
        .iter()
        .fold((0usize, 0usize), |(filled, total), section| {
            (filled + section.filled, total + section.total)
        });
    if total == 0 {
        return 0;
    }
    let percent = (filled as f64 * 100.0 / total as f64).round();
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::{requires_ctv_app, requires_web};
    use intake_domain::{AdFormat, Environment};

    fn tracked(answers: &AnswerSet) -> u8 {
        progress(answers, requires_web(answers), requires_ctv_app(answers))
    }

    #[test]
    fn empty_answers_start_at_zero() {
        assert_eq!(tracked(&AnswerSet::empty()), 0);
    }

    #[test]
    fn web_only_answers_exclude_ctv_items() {
        let mut answers = AnswerSet::empty();
        answers.environments.insert(Environment::Web);
        answers.formats.insert(AdFormat::Display);
        assert!(requires_web(&answers));
        assert!(!requires_ctv_app(&answers));

        let breakdown = progress_breakdown(&answers, true, false);
        assert_eq!(breakdown.len(), 2);
        assert!(breakdown
            .iter()
            .all(|section| section.section != Section::CtvAppTechnical));

        let with_ctv = progress_breakdown(&answers, true, true);
        let ctv = with_ctv
            .iter()
            .find(|section| section.section == Section::CtvAppTechnical)
            .unwrap();
        assert_eq!(ctv.filled, 0);
        assert_eq!(ctv.total, 5);
    }

    #[test]
    fn filling_a_required_item_never_lowers_progress() {
        let mut answers = AnswerSet::empty();
        answers.environments.insert(Environment::Web);
        let mut last = progress(&answers, true, false);
        let steps: [fn(&mut AnswerSet); 4] = [
            |a| a.business_name = "Acme".into(),
            |a| a.business_domain = "acme.example".into(),
            |a| a.web_technical.request_volume.video = "2M".into(),
            |a| a.web_technical.traffic_percentage.display.emea = "40".into(),
        ];
        for step in steps {
            step(&mut answers);
            let next = progress(&answers, true, false);
            assert!(next >= last, "{next} < {last}");
            assert!(next <= 100);
            last = next;
        }
        assert!(last > 0);
    }

    #[test]
    fn rounds_to_nearest_percent() {
        let mut answers = AnswerSet::empty();
        answers.business_name = "Acme".into();
        // 1 of 6 generic items.
        assert_eq!(progress(&answers, false, false), 17);
    }
}
