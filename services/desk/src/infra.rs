use clap::ValueEnum;
use registration_form::error::AppError;
use registration_form::form::{FormView, ResumeFile};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Describes a file on disk the way a browser file picker would. Only metadata is read.
pub(crate) fn resume_from_path(path: &Path) -> Result<ResumeFile, AppError> {
    let metadata = std::fs::metadata(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = mime_guess::from_path(path).first_or_octet_stream();

    Ok(ResumeFile::new(
        file_name,
        media_type.essence_str(),
        metadata.len(),
    ))
}

#[derive(Debug, Serialize)]
pub(crate) struct StepReport<'a> {
    pub(crate) step: usize,
    pub(crate) action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
    pub(crate) view: FormView,
}

pub(crate) fn emit(report: &StepReport<'_>, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => {
            println!("== {}. {}", report.step, report.action);
            if let Some(error) = &report.error {
                println!("({error})");
            }
            println!("{}\n", report.view);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(report)?),
    }
    Ok(())
}
