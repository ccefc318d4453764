use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use intake_core::{
    sort_newest_first, CoreError, FormSubmission, FormSummary, PersistenceGateway, StoredForm,
};
use intake_domain::FormId;
use tracing::{debug, warn};

const FORM_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence, one document per form.
#[derive(Debug, Clone)]
pub struct JsonFormGateway {
    forms_dir: PathBuf,
}

impl JsonFormGateway {
    pub fn new(forms_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&forms_dir)?;
        Ok(Self { forms_dir })
    }

    pub fn forms_dir(&self) -> &Path {
        &self.forms_dir
    }

    pub fn form_path(&self, id: FormId) -> PathBuf {
        self.forms_dir.join(format!("{}.{}", id, FORM_EXTENSION))
    }

    fn write_form(&self, form: &StoredForm) -> Result<(), CoreError> {
        let path = self.form_path(form.id);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_form(form)?)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "form written");
        Ok(())
    }
}

impl PersistenceGateway for JsonFormGateway {
    fn create(&self, submission: &FormSubmission) -> Result<FormId, CoreError> {
        let mut id = FormId::new();
        while self.form_path(id).exists() {
            id = FormId::new();
        }
        self.write_form(&StoredForm::create(id, submission))?;
        Ok(id)
    }

    fn update(&self, id: FormId, submission: &FormSubmission) -> Result<(), CoreError> {
        let mut form = self.get(id)?;
        form.apply(submission);
        self.write_form(&form)
    }

    fn get(&self, id: FormId) -> Result<StoredForm, CoreError> {
        let path = self.form_path(id);
        if !path.exists() {
            return Err(CoreError::FormNotFound(id));
        }
        let mut form = load_form_from_path(&path)?;
        // The file name is authoritative.
        form.id = id;
        Ok(form)
    }

    fn list(&self) -> Result<Vec<FormSummary>, CoreError> {
        if !self.forms_dir.exists() {
            return Ok(Vec::new());
        }
        let mut rows = Vec::new();
        for entry in fs::read_dir(&self.forms_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(FORM_EXTENSION) {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<FormId>().ok())
            else {
                continue;
            };
            match load_form_from_path(&path) {
                Ok(mut form) => {
                    form.id = id;
                    rows.push(form.summary());
                }
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable form"),
            }
        }
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    fn delete(&self, id: FormId) -> Result<(), CoreError> {
        let path = self.form_path(id);
        if !path.exists() {
            return Err(CoreError::FormNotFound(id));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

/// Loads a stored form from the provided filesystem path.
pub fn load_form_from_path(path: &Path) -> Result<StoredForm, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_form(form: &StoredForm) -> Result<String, CoreError> {
    serde_json::to_string_pretty(form).map_err(|err| CoreError::Serde(err.to_string()))
}
