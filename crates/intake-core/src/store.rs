//! The form state store: the single owner of an in-progress questionnaire.
//!
//! Drivers never touch the Answer Set directly. They send [`FieldUpdate`]s,
//! switch sections and trigger saves; the store keeps visibility and progress
//! in step with the answers after every change.

use std::sync::Arc;

use intake_domain::{
    AnswerSet, Choice, FlagField, FormId, Member, Region, Section, SubmissionStatus, TextField,
    TrafficChannel,
};
use tracing::{debug, info, warn};

use crate::{
    gateway::{FormSubmission, FormSummary, PersistenceGateway},
    progress::{progress, progress_breakdown, SectionProgress},
    time::{Clock, SystemClock},
    validation::validate_submission,
    visibility::Visibility,
    CoreError, SaveError,
};

/// One edit to the Answer Set.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Text(TextField, String),
    Flag(FlagField, bool),
    Toggle(Member),
    Choose(Choice),
    Traffic(TrafficChannel, Region, String),
    /// Newline-delimited EIDs list.
    Eids(String),
}

/// A validated save waiting for its gateway call.
#[derive(Debug, Clone)]
pub struct PendingSave {
    ticket: u64,
    target: Option<FormId>,
    submission: FormSubmission,
}

impl PendingSave {
    /// Record to update, or `None` when the save creates one.
    pub fn target(&self) -> Option<FormId> {
        self.target
    }

    pub fn submission(&self) -> &FormSubmission {
        &self.submission
    }

    /// Creates or updates the record through `gateway`.
    pub fn execute(&self, gateway: &dyn PersistenceGateway) -> Result<FormId, CoreError> {
        match self.target {
            Some(id) => gateway.update(id, &self.submission).map(|_| id),
            None => gateway.create(&self.submission),
        }
    }
}

/// Result of a completed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: FormId,
    pub status: SubmissionStatus,
    pub created: bool,
}

pub struct FormStateStore {
    answers: Arc<AnswerSet>,
    active_section: Section,
    loading: bool,
    /// Ticket of the most recent `begin_save`.
    save_ticket: u64,
    error: Option<String>,
    form_id: Option<FormId>,
    status: Option<SubmissionStatus>,
    visibility: Visibility,
    progress: u8,
    gateway: Box<dyn PersistenceGateway>,
    clock: Box<dyn Clock>,
}

impl FormStateStore {
    pub fn new(gateway: Box<dyn PersistenceGateway>) -> Self {
        Self::with_clock(gateway, Box::new(SystemClock))
    }

    pub fn with_clock(gateway: Box<dyn PersistenceGateway>, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            answers: Arc::new(AnswerSet::empty()),
            active_section: Section::Generic,
            loading: false,
            save_ticket: 0,
            error: None,
            form_id: None,
            status: None,
            visibility: Visibility::default(),
            progress: 0,
            gateway,
            clock,
        };
        store.recompute();
        store
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Shared handle to the current answers. Later updates never change it.
    pub fn snapshot(&self) -> Arc<AnswerSet> {
        Arc::clone(&self.answers)
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form_id(&self) -> Option<FormId> {
        self.form_id
    }

    /// Status of the last successful save or load.
    pub fn status(&self) -> Option<SubmissionStatus> {
        self.status
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn progress_breakdown(&self) -> Vec<SectionProgress> {
        progress_breakdown(
            &self.answers,
            self.visibility.web_technical,
            self.visibility.ctv_app_technical,
        )
    }

    pub fn gateway(&self) -> &dyn PersistenceGateway {
        self.gateway.as_ref()
    }

    /// Applies one edit. The active section is never changed here.
    pub fn apply(&mut self, update: FieldUpdate) {
        debug!(?update, "applying field update");
        let answers = Arc::make_mut(&mut self.answers);
        match update {
            FieldUpdate::Text(field, value) => *field.slot_mut(answers) = value,
            FieldUpdate::Flag(field, value) => {
                *field.slot_mut(answers) = value;
                if field == FlagField::HasSellersJson && !value {
                    answers.sellers_json_url.clear();
                }
            }
            FieldUpdate::Toggle(member) => {
                member.toggle_in(answers);
            }
            FieldUpdate::Choose(choice) => choice.apply_to(answers),
            FieldUpdate::Traffic(channel, region, value) => {
                *channel.breakdown_mut(answers).slot_mut(region) = value
            }
            FieldUpdate::Eids(text) => answers.ortb_technical.cookie_matching.set_eids_from_text(&text),
        }
        self.recompute();
    }

    pub fn set_active_section(&mut self, section: Section) {
        debug!(section = section.key(), "switching active section");
        self.active_section = section;
    }

    /// Validates (for submissions) and snapshots the answers for a save.
    ///
    /// On validation failure the store switches to the failing section and
    /// records the message. The `loading` flag stays set until [`finish_save`]
    /// or [`abandon_save`] receives the returned `PendingSave`.
    ///
    /// [`finish_save`]: FormStateStore::finish_save
    /// [`abandon_save`]: FormStateStore::abandon_save
    pub fn begin_save(&mut self, status: SubmissionStatus) -> Result<PendingSave, SaveError> {
        if self.loading {
            warn!("save rejected: another save is in flight");
            return Err(SaveError::InFlight);
        }
        self.error = None;
        if status.requires_validation() {
            if let Err(failure) = validate_submission(&self.answers) {
                info!(section = failure.section.key(), "submission blocked by validation");
                self.active_section = failure.section;
                self.error = Some(failure.message.clone());
                return Err(SaveError::Invalid(failure));
            }
        }
        self.loading = true;
        self.save_ticket += 1;
        Ok(PendingSave {
            ticket: self.save_ticket,
            target: self.form_id,
            submission: FormSubmission {
                answers: (*self.answers).clone(),
                active_section: self.active_section,
                status,
                saved_at: self.clock.now(),
            },
        })
    }

    /// Records the gateway result for a save started with [`begin_save`].
    ///
    /// The id is adopted only while the save is still the one in flight and
    /// the session still points at the record it targeted. A stored record
    /// that arrives too late is reported as [`SaveError::Superseded`].
    ///
    /// [`begin_save`]: FormStateStore::begin_save
    pub fn finish_save(
        &mut self,
        pending: PendingSave,
        result: Result<FormId, CoreError>,
    ) -> Result<SaveOutcome, SaveError> {
        let in_flight = self.is_in_flight(&pending);
        if in_flight {
            self.loading = false;
        }
        let status = pending.submission.status;
        match result {
            Ok(id) if !in_flight || self.form_id != pending.target => {
                warn!(form = %id, "save finished after the form changed; result discarded");
                Err(SaveError::Superseded(id))
            }
            Ok(id) => {
                self.form_id = Some(id);
                self.status = Some(status);
                info!(form = %id, %status, "form saved");
                Ok(SaveOutcome {
                    id,
                    status,
                    created: pending.target.is_none(),
                })
            }
            Err(err) => {
                warn!(error = %err, "form save failed");
                if in_flight {
                    self.error = Some(err.to_string());
                }
                Err(SaveError::Gateway(err))
            }
        }
    }

    /// Releases a save whose gateway call will never run.
    pub fn abandon_save(&mut self, pending: PendingSave) {
        if self.is_in_flight(&pending) {
            self.loading = false;
            debug!("pending save abandoned");
        }
    }

    fn is_in_flight(&self, pending: &PendingSave) -> bool {
        self.loading && pending.ticket == self.save_ticket
    }

    /// Saves through the owned gateway.
    pub fn save(&mut self, status: SubmissionStatus) -> Result<SaveOutcome, SaveError> {
        let pending = self.begin_save(status)?;
        let result = pending.execute(self.gateway.as_ref());
        self.finish_save(pending, result)
    }

    /// Replaces the session with a stored form. On failure the current state is kept.
    pub fn load_form(&mut self, id: FormId) -> Result<(), CoreError> {
        self.ensure_idle()?;
        match self.gateway.get(id) {
            Ok(stored) => {
                self.answers = Arc::new(stored.answers);
                self.active_section = stored.active_section;
                self.form_id = Some(stored.id);
                self.status = Some(stored.status);
                self.error = None;
                self.recompute();
                info!(form = %id, "form loaded");
                Ok(())
            }
            Err(err) => {
                warn!(form = %id, error = %err, "form load failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Discards the session and starts an empty questionnaire.
    pub fn start_new(&mut self) -> Result<(), CoreError> {
        self.ensure_idle()?;
        self.answers = Arc::new(AnswerSet::empty());
        self.active_section = Section::Generic;
        self.form_id = None;
        self.status = None;
        self.error = None;
        self.recompute();
        debug!("started new form");
        Ok(())
    }

    pub fn list_forms(&self) -> Result<Vec<FormSummary>, CoreError> {
        self.gateway.list()
    }

    /// Deletes a stored form. Deleting the open form detaches the session from it.
    pub fn delete_form(&mut self, id: FormId) -> Result<(), CoreError> {
        self.gateway.delete(id)?;
        if self.form_id == Some(id) {
            self.form_id = None;
            self.status = None;
        }
        info!(form = %id, "form deleted");
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), CoreError> {
        if self.loading {
            warn!("session change rejected: a save is in flight");
            return Err(CoreError::SaveInFlight);
        }
        Ok(())
    }

    fn recompute(&mut self) {
        self.visibility = Visibility::evaluate(&self.answers);
        self.progress = progress(
            &self.answers,
            self.visibility.web_technical,
            self.visibility.ctv_app_technical,
        );
    }
}
