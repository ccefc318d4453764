//! Persistence seam for saved questionnaires.

use std::{
    cmp::Reverse,
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use intake_domain::{AnswerSet, FormId, Section, SubmissionStatus};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Everything sent to the gateway on save.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
    pub answers: AnswerSet,
    pub active_section: Section,
    pub status: SubmissionStatus,
    pub saved_at: DateTime<Utc>,
}

/// A stored record as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredForm {
    pub id: FormId,
    #[serde(rename = "formData")]
    pub answers: AnswerSet,
    #[serde(default)]
    pub active_section: Section,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredForm {
    /// Builds a fresh record for `submission`.
    pub fn create(id: FormId, submission: &FormSubmission) -> Self {
        Self {
            id,
            answers: submission.answers.clone(),
            active_section: submission.active_section,
            status: submission.status,
            created_at: submission.saved_at,
            updated_at: submission.saved_at,
        }
    }

    /// Replaces the record contents, keeping its id and creation time.
    pub fn apply(&mut self, submission: &FormSubmission) {
        self.answers = submission.answers.clone();
        self.active_section = submission.active_section;
        self.status = submission.status;
        self.updated_at = submission.saved_at;
    }

    pub fn summary(&self) -> FormSummary {
        FormSummary {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            status: self.status,
            business_name: self.answers.business_name.clone(),
        }
    }
}

/// Listing row for a stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSummary {
    pub id: FormId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    pub business_name: String,
}

/// Sorts summaries newest first.
pub fn sort_newest_first(rows: &mut [FormSummary]) {
    rows.sort_by_key(|row| Reverse((row.created_at, row.id)));
}

/// Abstraction over backends capable of storing questionnaires.
pub trait PersistenceGateway: Send + Sync {
    fn create(&self, submission: &FormSubmission) -> Result<FormId, CoreError>;
    fn update(&self, id: FormId, submission: &FormSubmission) -> Result<(), CoreError>;
    fn get(&self, id: FormId) -> Result<StoredForm, CoreError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<FormSummary>, CoreError>;
    fn delete(&self, id: FormId) -> Result<(), CoreError>;
}

/// Process-local gateway for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    forms: Mutex<BTreeMap<FormId, StoredForm>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forms().map(|forms| forms.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn forms(&self) -> Result<MutexGuard<'_, BTreeMap<FormId, StoredForm>>, CoreError> {
        self.forms
            .lock()
            .map_err(|_| CoreError::Storage("in-memory form store poisoned".into()))
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn create(&self, submission: &FormSubmission) -> Result<FormId, CoreError> {
        let id = FormId::new();
        self.forms()?.insert(id, StoredForm::create(id, submission));
        Ok(id)
    }

    fn update(&self, id: FormId, submission: &FormSubmission) -> Result<(), CoreError> {
        let mut forms = self.forms()?;
        let record = forms.get_mut(&id).ok_or(CoreError::FormNotFound(id))?;
        record.apply(submission);
        Ok(())
    }

    fn get(&self, id: FormId) -> Result<StoredForm, CoreError> {
        self.forms()?
            .get(&id)
            .cloned()
            .ok_or(CoreError::FormNotFound(id))
    }

    fn list(&self) -> Result<Vec<FormSummary>, CoreError> {
        let mut rows: Vec<_> = self.forms()?.values().map(StoredForm::summary).collect();
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    fn delete(&self, id: FormId) -> Result<(), CoreError> {
        self.forms()?
            .remove(&id)
            .map(|_| ())
            .ok_or(CoreError::FormNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission(name: &str, minute: u32) -> FormSubmission {
        let mut answers = AnswerSet::empty();
        answers.business_name = name.into();
        FormSubmission {
            answers,
            active_section: Section::Generic,
            status: SubmissionStatus::Draft,
            saved_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn create_get_update_round_trip() {
        let gateway = InMemoryGateway::new();
        let id = gateway.create(&submission("First", 0)).unwrap();

        let mut next = submission("Renamed", 5);
        next.status = SubmissionStatus::Submitted;
        gateway.update(id, &next).unwrap();

        let stored = gateway.get(id).unwrap();
        assert_eq!(stored.answers.business_name, "Renamed");
        assert_eq!(stored.status, SubmissionStatus::Submitted);
        assert!(stored.updated_at > stored.created_at);
    }

    #[test]
    fn list_is_newest_first() {
        let gateway = InMemoryGateway::new();
        gateway.create(&submission("Older", 0)).unwrap();
        gateway.create(&submission("Newer", 30)).unwrap();

        let names: Vec<_> = gateway
            .list()
            .unwrap()
            .into_iter()
            .map(|row| row.business_name)
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[test]
    fn missing_records_report_not_found() {
        let gateway = InMemoryGateway::new();
        let id = FormId::new();
        assert!(matches!(gateway.get(id), Err(CoreError::FormNotFound(_))));
        assert!(matches!(gateway.delete(id), Err(CoreError::FormNotFound(_))));
        assert!(matches!(
            gateway.update(id, &submission("x", 0)),
            Err(CoreError::FormNotFound(_))
        ));
    }
}
