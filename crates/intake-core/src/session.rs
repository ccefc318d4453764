//! Start-up hydration of the form state store.

use intake_domain::FormId;
use tracing::{info, warn};

use crate::{gateway::PersistenceGateway, store::FormStateStore};

/// Where the resumed session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSource {
    Requested(FormId),
    Remembered(FormId),
    Fresh,
}

/// Builds a store over `gateway` and hydrates it. See [`resume_into`].
pub fn resume(
    gateway: Box<dyn PersistenceGateway>,
    requested: Option<FormId>,
    remembered: Option<FormId>,
) -> (FormStateStore, ResumeSource) {
    let mut store = FormStateStore::new(gateway);
    let source = resume_into(&mut store, requested, remembered);
    (store, source)
}

/// Loads the requested form, else the remembered one, else starts fresh.
///
/// Load failures are logged and never fatal.
pub fn resume_into(
    store: &mut FormStateStore,
    requested: Option<FormId>,
    remembered: Option<FormId>,
) -> ResumeSource {
    if let Some(id) = requested {
        match store.load_form(id) {
            Ok(()) => return ResumeSource::Requested(id),
            Err(err) => warn!(form = %id, error = %err, "requested form unavailable"),
        }
    }
    if let Some(id) = remembered.filter(|id| Some(*id) != requested) {
        match store.load_form(id) {
            Ok(()) => return ResumeSource::Remembered(id),
            Err(err) => warn!(form = %id, error = %err, "remembered form unavailable"),
        }
    }
    if let Err(err) = store.start_new() {
        warn!(error = %err, "could not reset the session");
    }
    info!("starting a fresh form");
    ResumeSource::Fresh
}
