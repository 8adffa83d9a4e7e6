use crate::infra::{emit, resume_from_path, OutputFormat, StepReport};
use clap::Args;
use registration_form::config::AppConfig;
use registration_form::error::AppError;
use registration_form::form::{FormController, FormError, ResumeFile};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// JSON array of form events, e.g. [{"action": "edit", "field": "name", "value": "Jane"}]
    pub(crate) script: PathBuf,
}

/// One host input event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum ScriptStep {
    Edit {
        field: String,
        value: String,
    },
    /// Attach a file from disk; its media type is guessed from the extension.
    Attach {
        path: PathBuf,
    },
    /// Attach a described file without touching the filesystem.
    AttachFile {
        file_name: String,
        media_type: String,
        #[serde(default)]
        size_bytes: u64,
    },
    Toggle {
        slot: String,
    },
    Submit,
    /// Block until an in-flight submission completes.
    Wait,
    Reset,
}

impl ScriptStep {
    fn action(&self) -> &'static str {
        match self {
            Self::Edit { .. } => "edit",
            Self::Attach { .. } => "attach",
            Self::AttachFile { .. } => "attach_file",
            Self::Toggle { .. } => "toggle",
            Self::Submit => "submit",
            Self::Wait => "wait",
            Self::Reset => "reset",
        }
    }
}

pub(crate) fn parse_script(raw: &str) -> Result<Vec<ScriptStep>, AppError> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) async fn run_replay(
    args: ReplayArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.script)?;
    let steps = parse_script(&raw)?;
    info!(script = %args.script.display(), steps = steps.len(), "replaying form events");

    let mut form = FormController::new(&config.submission);
    for (index, step) in steps.into_iter().enumerate() {
        let action = step.action();
        let error = apply_step(&mut form, step)
            .await?
            .map(|err| err.to_string());
        emit(
            &StepReport {
                step: index + 1,
                action,
                error,
                view: form.view(),
            },
            format,
        )?;
    }
    Ok(())
}

/// Form errors are part of the replay output; only I/O failures abort the run.
pub(crate) async fn apply_step(
    form: &mut FormController,
    step: ScriptStep,
) -> Result<Option<FormError>, AppError> {
    let result = match step {
        ScriptStep::Edit { field, value } => form.update_field_named(&field, value),
        ScriptStep::Attach { path } => form.set_resume(resume_from_path(&path)?),
        ScriptStep::AttachFile {
            file_name,
            media_type,
            size_bytes,
        } => form.set_resume(ResumeFile::new(file_name, media_type, size_bytes)),
        ScriptStep::Toggle { slot } => form.toggle_time_slot_label(&slot),
        ScriptStep::Submit => form.submit().map(|_| ()),
        ScriptStep::Wait => {
            form.wait_until_settled().await;
            Ok(())
        }
        ScriptStep::Reset => form.reset(),
    };

    match result {
        Ok(()) => Ok(None),
        Err(err) => {
            warn!(error = %err, "form event not applied");
            Ok(Some(err))
        }
    }
}
