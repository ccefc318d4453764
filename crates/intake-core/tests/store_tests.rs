use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use chrono::{DateTime, TimeZone, Utc};
use intake_core::{
    resume, resume_into, Clock, CoreError, FieldUpdate, FormStateStore, FormSubmission,
    FormSummary, InMemoryGateway, PersistenceGateway, ResumeSource, SaveError, StoredForm,
};
use intake_domain::{
    AnswerSet, Choice, ChoiceField, FormId, Member, OperationType, OwnedOperatedCategory, Region,
    Section, SetField, SubmissionStatus, TextField, TrafficChannel,
};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shares one in-memory gateway between the store and the test, counting calls.
#[derive(Clone, Default)]
struct SharedGateway {
    inner: Arc<InMemoryGateway>,
    calls: Arc<AtomicUsize>,
    fail_writes: bool,
}

impl SharedGateway {
    fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn write(&self) -> Result<(), CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            Err(CoreError::Storage("backend unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl PersistenceGateway for SharedGateway {
    fn create(&self, submission: &FormSubmission) -> Result<FormId, CoreError> {
        self.write()?;
        self.inner.create(submission)
    }

    fn update(&self, id: FormId, submission: &FormSubmission) -> Result<(), CoreError> {
        self.write()?;
        self.inner.update(id, submission)
    }

    fn get(&self, id: FormId) -> Result<StoredForm, CoreError> {
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<FormSummary>, CoreError> {
        self.inner.list()
    }

    fn delete(&self, id: FormId) -> Result<(), CoreError> {
        self.inner.delete(id)
    }
}

fn store_over(gateway: &SharedGateway) -> FormStateStore {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap());
    FormStateStore::with_clock(Box::new(gateway.clone()), Box::new(clock))
}

fn toggle(store: &mut FormStateStore, field: SetField, value: &str) {
    let member = Member::parse(field, value).expect("member");
    store.apply(FieldUpdate::Toggle(member));
}

fn fill_generic(store: &mut FormStateStore) {
    store.apply(FieldUpdate::Text(TextField::BusinessName, "Acme Media".into()));
    store.apply(FieldUpdate::Text(TextField::BusinessDomain, "acme.example".into()));
    toggle(store, SetField::Environments, "web");
    toggle(store, SetField::Formats, "display");
    store.apply(FieldUpdate::Choose(
        Choice::parse(ChoiceField::OperationType, "o-and-o").expect("choice"),
    ));
    toggle(store, SetField::OwnedOperatedCategories, "publisher");
}

fn fill_web(store: &mut FormStateStore) {
    toggle(store, SetField::WebIntegrationMethods, "prebid-server");
    store.apply(FieldUpdate::Choose(
        Choice::parse(ChoiceField::WebPreferredIntegration, "prebid-server").expect("choice"),
    ));
    store.apply(FieldUpdate::Text(TextField::WebDisplayVolume, "50M".into()));
    store.apply(FieldUpdate::Traffic(
        TrafficChannel::WebDisplay,
        Region::NorthAmerica,
        "70".into(),
    ));
    toggle(store, SetField::WebDataCenters, "us");
}

#[test]
fn draft_save_skips_validation_and_reaches_gateway() {
    let gateway = SharedGateway::default();
    let mut store = store_over(&gateway);

    let outcome = store.save(SubmissionStatus::Draft).expect("draft save");

    assert!(outcome.created);
    assert_eq!(gateway.calls(), 1);
    assert_eq!(store.form_id(), Some(outcome.id));
    let stored = gateway.get(outcome.id).expect("stored");
    assert_eq!(stored.status, SubmissionStatus::Draft);
    assert_eq!(stored.created_at, Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap());
}

#[test]
fn second_save_updates_the_same_record() {
    let gateway = SharedGateway::default();
    let mut store = store_over(&gateway);

    let first = store.save(SubmissionStatus::Draft).expect("first save");
    store.apply(FieldUpdate::Text(TextField::BusinessName, "Renamed".into()));
    let second = store.save(SubmissionStatus::Draft).expect("second save");

    assert_eq!(first.id, second.id);
    assert!(!second.created);
    assert_eq!(gateway.list().expect("list").len(), 1);
    assert_eq!(gateway.get(first.id).expect("get").answers.business_name, "Renamed");
}

#[test]
fn invalid_submission_switches_to_failing_section() {
    let gateway = SharedGateway::default();
    let mut store = store_over(&gateway);
    fill_generic(&mut store);
    store.set_active_section(Section::Generic);

    let err = store.save(SubmissionStatus::Submitted).unwrap_err();

    match err {
        SaveError::Invalid(failure) => assert_eq!(failure.section, Section::WebTechnical),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.active_section(), Section::WebTechnical);
    assert_eq!(
        store.error(),
        Some("Please fill in all mandatory fields in the Web Technical section")
    );
    assert_eq!(gateway.calls(), 0);
    assert!(!store.is_loading());
}

#[test]
fn complete_submission_is_stored_as_submitted() {
    let gateway = SharedGateway::default();
    let mut store = store_over(&gateway);
    fill_generic(&mut store);
    fill_web(&mut store);
    assert_eq!(store.progress(), 100);

    let outcome = store.save(SubmissionStatus::Submitted).expect("submit");

    assert_eq!(outcome.status, SubmissionStatus::Submitted);
    assert_eq!(store.status(), Some(SubmissionStatus::Submitted));
    assert_eq!(store.error(), None);
}

#[test]
fn gateway_failure_keeps_answers_and_allows_retry() {
    let gateway = SharedGateway::failing();
    let mut store = store_over(&gateway);
    store.apply(FieldUpdate::Text(TextField::BusinessName, "Acme".into()));

    let err = store.save(SubmissionStatus::Draft).unwrap_err();

    assert!(matches!(err, SaveError::Gateway(_)));
    assert_eq!(store.error(), Some("Storage error: backend unavailable"));
    assert_eq!(store.answers().business_name, "Acme");
    assert_eq!(store.form_id(), None);
    assert!(!store.is_loading());
    assert!(matches!(
        store.save(SubmissionStatus::Draft),
        Err(SaveError::Gateway(_))
    ));
    assert_eq!(gateway.calls(), 2);
}

#[test]
fn loaded_forms_are_taken_verbatim_without_validation() {
    let gateway = SharedGateway::default();
    let mut answers = AnswerSet::empty();
    answers.operation_type = Some(OperationType::Intermediary);
    answers.environments.insert(intake_domain::Environment::Web);
    let id = gateway
        .create(&FormSubmission {
            answers: answers.clone(),
            active_section: Section::WebTechnical,
            status: SubmissionStatus::Submitted,
            saved_at: Utc::now(),
        })
        .expect("seed");

    let mut store = store_over(&gateway);
    store.load_form(id).expect("load");

    assert_eq!(store.answers(), &answers);
    assert_eq!(store.active_section(), Section::WebTechnical);
    assert_eq!(store.form_id(), Some(id));
    assert!(store.visibility().web_technical);
}

#[test]
fn failed_load_keeps_the_current_session() {
    let gateway = SharedGateway::default();
    let mut store = store_over(&gateway);
    store.apply(FieldUpdate::Text(TextField::BusinessName, "Keep me".into()));

    assert!(store.load_form(FormId::new()).is_err());

    assert_eq!(store.answers().business_name, "Keep me");
    assert!(store.error().is_some());
}

#[test]
fn deleting_the_open_form_detaches_the_session() {
    let gateway = SharedGateway::default();
    let mut store = store_over(&gateway);
    let first = store.save(SubmissionStatus::Draft).expect("save");

    store.delete_form(first.id).expect("delete");
    assert_eq!(store.form_id(), None);

    let again = store.save(SubmissionStatus::Draft).expect("save again");
    assert!(again.created);
    assert_ne!(again.id, first.id);
}

#[test]
fn start_new_resets_everything() {
    let gateway = SharedGateway::default();
    let mut store = store_over(&gateway);
    fill_generic(&mut store);
    store.set_active_section(Section::WebTechnical);
    store.save(SubmissionStatus::Draft).expect("save");

    store.start_new().expect("start new");

    assert_eq!(store.answers(), &AnswerSet::empty());
    assert_eq!(store.active_section(), Section::Generic);
    assert_eq!(store.form_id(), None);
    assert_eq!(store.progress(), 0);
}

#[test]
fn resume_prefers_requested_then_remembered_then_fresh() {
    let gateway = SharedGateway::default();
    let mut seed = store_over(&gateway);
    seed.apply(FieldUpdate::Toggle(Member::OwnedOperated(
        OwnedOperatedCategory::Publisher,
    )));
    let saved = seed.save(SubmissionStatus::Draft).expect("seed").id;

    let (store, source) = resume(Box::new(gateway.clone()), Some(saved), None);
    assert_eq!(source, ResumeSource::Requested(saved));
    assert_eq!(store.form_id(), Some(saved));

    let mut store = store_over(&gateway);
    let source = resume_into(&mut store, Some(FormId::new()), Some(saved));
    assert_eq!(source, ResumeSource::Remembered(saved));
    assert_eq!(store.error(), None);

    let mut store = store_over(&gateway);
    let source = resume_into(&mut store, None, Some(FormId::new()));
    assert_eq!(source, ResumeSource::Fresh);
    assert_eq!(store.form_id(), None);
    assert_eq!(store.error(), None);
}
