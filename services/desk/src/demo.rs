use crate::infra::{emit, resume_from_path, OutputFormat, StepReport};
use clap::Args;
use registration_form::config::AppConfig;
use registration_form::error::AppError;
use registration_form::form::{FormController, FormError, ResumeFile, TextField};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Applicant name to enter
    #[arg(long, default_value = "Jane Doe")]
    pub(crate) name: String,
    /// Applicant email to enter
    #[arg(long, default_value = "jane@x.com")]
    pub(crate) email: String,
    /// Resume to attach. Defaults to a described PDF that is never read from disk.
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
    /// Time slot to select; repeat for several (e.g. --slot "Monday 9-11 AM")
    #[arg(long = "slot")]
    pub(crate) slots: Vec<String>,
    /// Stop at the confirmation instead of starting another registration
    #[arg(long)]
    pub(crate) keep_confirmation: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            resume: None,
            slots: Vec::new(),
            keep_confirmation: false,
        }
    }
}

struct Walkthrough {
    form: FormController,
    format: OutputFormat,
    step: usize,
}

impl Walkthrough {
    fn show(&mut self, action: &str, result: Result<(), FormError>) -> Result<(), AppError> {
        self.step += 1;
        emit(
            &StepReport {
                step: self.step,
                action,
                error: result.err().map(|err| err.to_string()),
                view: self.form.view(),
            },
            self.format,
        )
    }
}

pub(crate) async fn run_demo(
    args: DemoArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let DemoArgs {
        name,
        email,
        resume,
        slots,
        keep_confirmation,
    } = args;

    let resume = match resume {
        Some(path) => resume_from_path(&path)?,
        None => ResumeFile::new("resume.pdf", "application/pdf", 52_480),
    };
    let slots = if slots.is_empty() {
        vec!["Monday 9-11 AM".to_string()]
    } else {
        slots
    };

    info!(delay_ms = config.submission.delay_ms, "starting registration walkthrough");
    let mut demo = Walkthrough {
        form: FormController::new(&config.submission),
        format,
        step: 0,
    };

    let result = demo.form.submit().map(|_| ());
    demo.show("submit the empty form", result)?;

    let result = demo
        .form
        .update_field(TextField::Name, name)
        .and_then(|_| demo.form.update_field(TextField::Email, email));
    demo.show("enter name and email", result)?;

    let result = demo.form.set_resume(resume);
    demo.show("attach resume", result)?;

    let mut result = Ok(());
    for slot in &slots {
        if let Err(err) = demo.form.toggle_time_slot_label(slot) {
            result = Err(err);
        }
    }
    demo.show("select time slots", result)?;

    let result = demo.form.submit().map(|_| ());
    demo.show("submit", result)?;

    demo.form.wait_until_settled().await;
    demo.show("wait for confirmation", Ok(()))?;

    if !keep_confirmation {
        let result = demo.form.reset();
        demo.show("submit another registration", result)?;
    }

    Ok(())
}
