use std::fs;

use chrono::{TimeZone, Utc};
use intake_core::{CoreError, FormSubmission, PersistenceGateway};
use intake_domain::{AnswerSet, Environment, FormId, Section, SubmissionStatus};
use intake_storage_json::JsonFormGateway;
use tempfile::tempdir;

fn submission(name: &str, day: u32) -> FormSubmission {
    let mut answers = AnswerSet::empty();
    answers.business_name = name.into();
    answers.environments.insert(Environment::CtvOtt);
    FormSubmission {
        answers,
        active_section: Section::CtvAppTechnical,
        status: SubmissionStatus::Draft,
        saved_at: Utc.with_ymd_and_hms(2024, 6, day, 9, 30, 0).unwrap(),
    }
}

#[test]
fn json_gateway_round_trips_forms() {
    let dir = tempdir().expect("tempdir");
    let gateway = JsonFormGateway::new(dir.path().join("forms")).expect("gateway");

    let id = gateway.create(&submission("Acme", 1)).expect("create");
    let path = gateway.form_path(id);
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let stored = gateway.get(id).expect("get");
    assert_eq!(stored.id, id);
    assert_eq!(stored.answers.business_name, "Acme");
    assert_eq!(stored.active_section, Section::CtvAppTechnical);
    assert!(stored.answers.environments.contains(&Environment::CtvOtt));

    let raw = fs::read_to_string(&path).expect("read");
    assert!(raw.contains("\"formData\""));
    assert!(raw.contains("\"CTV/OTT\""));
}

#[test]
fn json_gateway_updates_keep_creation_time() {
    let dir = tempdir().expect("tempdir");
    let gateway = JsonFormGateway::new(dir.path().to_path_buf()).expect("gateway");
    let id = gateway.create(&submission("Acme", 1)).expect("create");

    let mut next = submission("Acme Media", 3);
    next.status = SubmissionStatus::Submitted;
    gateway.update(id, &next).expect("update");

    let stored = gateway.get(id).expect("get");
    assert_eq!(stored.status, SubmissionStatus::Submitted);
    assert_eq!(stored.created_at, Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap());
    assert_eq!(stored.updated_at, Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap());
}

#[test]
fn json_gateway_lists_newest_first_and_skips_corrupt_files() {
    let dir = tempdir().expect("tempdir");
    let gateway = JsonFormGateway::new(dir.path().to_path_buf()).expect("gateway");
    gateway.create(&submission("Oldest", 1)).expect("create");
    gateway.create(&submission("Newest", 20)).expect("create");
    gateway.create(&submission("Middle", 10)).expect("create");
    fs::write(dir.path().join(format!("{}.json", FormId::new())), "{ not json").expect("write");
    fs::write(dir.path().join("notes.txt"), "ignore me").expect("write");

    let names: Vec<_> = gateway
        .list()
        .expect("list")
        .into_iter()
        .map(|row| row.business_name)
        .collect();
    assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
}

#[test]
fn json_gateway_reports_missing_and_corrupt_forms() {
    let dir = tempdir().expect("tempdir");
    let gateway = JsonFormGateway::new(dir.path().to_path_buf()).expect("gateway");
    let missing = FormId::new();
    assert!(matches!(gateway.get(missing), Err(CoreError::FormNotFound(_))));
    assert!(matches!(gateway.delete(missing), Err(CoreError::FormNotFound(_))));

    let corrupt = FormId::new();
    fs::write(gateway.form_path(corrupt), "[]").expect("write");
    assert!(matches!(gateway.get(corrupt), Err(CoreError::Serde(_))));
}

#[test]
fn json_gateway_deletes_forms() {
    let dir = tempdir().expect("tempdir");
    let gateway = JsonFormGateway::new(dir.path().to_path_buf()).expect("gateway");
    let id = gateway.create(&submission("Gone", 2)).expect("create");

    gateway.delete(id).expect("delete");

    assert!(!gateway.form_path(id).exists());
    assert!(gateway.list().expect("list").is_empty());
}
