//! Registration wizard commands.

use sm_core::ports::{NavigationPort, Screen};
use sm_core::registration::{FormField, RegistrationState, RegistrationStep, SubmissionStatus};
use tracing::{info_span, Instrument};

use crate::bootstrap::AppRuntime;
use crate::commands::error::map_err;

fn step_title(step: RegistrationStep) -> &'static str {
    match step {
        RegistrationStep::Identity => "Informations personnelles",
        RegistrationStep::Health => "Informations médicales",
        RegistrationStep::Medication => "Médicaments",
        RegistrationStep::Review => "Vérifiez vos informations",
    }
}

/// One-line header: step, title, progress and submission status.
pub fn render_state(state: &RegistrationState) -> String {
    let mut line = format!(
        "Inscription - étape {}/{} : {} ({:.0}%)",
        state.step.number(),
        RegistrationStep::LAST.number(),
        step_title(state.step),
        state.progress() * 100.0
    );
    match &state.submission {
        SubmissionStatus::Idle => {}
        SubmissionStatus::InFlight => line.push_str(" - envoi en cours..."),
        SubmissionStatus::Failed { reason } => {
            line.push_str(&format!(" - échec : {}", reason));
        }
        SubmissionStatus::Completed { .. } => line.push_str(" - terminée"),
    }
    line
}

/// Open the register screen, starting over after a completed registration.
pub async fn open(runtime: &AppRuntime) -> Result<String, String> {
    let span = info_span!("command.registration.open");
    async {
        let wizard = runtime.usecases().registration_wizard();
        let mut state = wizard.get_state().await;
        if state.is_completed() {
            state = wizard.restart().await;
        }
        runtime.navigator().navigate_to(Screen::Register);
        Ok(render_state(&state))
    }
    .instrument(span)
    .await
}

pub async fn set_field(runtime: &AppRuntime, field: &str, value: &str) -> Result<String, String> {
    let span = info_span!("command.registration.set_field", field = %field);
    async {
        let field: FormField = field.parse().map_err(map_err)?;
        let state = runtime
            .usecases()
            .registration_wizard()
            .edit_field(field, value)
            .await
            .map_err(map_err)?;
        Ok(render_state(&state))
    }
    .instrument(span)
    .await
}

/// "Suivant" / "Terminer". On the review step this waits for the
/// identity provider before returning.
pub async fn next(runtime: &AppRuntime) -> Result<String, String> {
    let span = info_span!("command.registration.next");
    async {
        let wizard = runtime.usecases().registration_wizard();
        let before = wizard.get_state().await;
        let mut state = wizard.advance().await.map_err(map_err)?;
        if state.is_submitting() {
            wizard.wait_for_submission().await;
            state = wizard.get_state().await;
        } else if state.step != before.step {
            // No animation on a console: the new step is shown at once.
            state = wizard.transition_finished().await.map_err(map_err)?;
        }
        Ok(render_state(&state))
    }
    .instrument(span)
    .await
}

pub async fn back(runtime: &AppRuntime) -> Result<String, String> {
    let span = info_span!("command.registration.back");
    async {
        let wizard = runtime.usecases().registration_wizard();
        let before = wizard.get_state().await;
        let mut state = wizard.retreat().await.map_err(map_err)?;
        if state.step != before.step {
            state = wizard.transition_finished().await.map_err(map_err)?;
        }
        Ok(render_state(&state))
    }
    .instrument(span)
    .await
}

pub async fn cancel(runtime: &AppRuntime) -> Result<String, String> {
    let span = info_span!("command.registration.cancel");
    async {
        runtime
            .usecases()
            .registration_wizard()
            .abandon()
            .await
            .map_err(map_err)?;
        Ok("Inscription annulée.".to_string())
    }
    .instrument(span)
    .await
}

pub async fn review(runtime: &AppRuntime) -> Result<String, String> {
    let lines = runtime.usecases().registration_wizard().review().await;
    let mut out = String::from("Vérifiez vos informations :");
    for line in lines {
        out.push('\n');
        out.push_str(&format!("  {}", line));
    }
    Ok(out)
}

pub async fn state(runtime: &AppRuntime) -> Result<String, String> {
    let state = runtime.usecases().registration_wizard().get_state().await;
    let missing: Vec<&str> = state
        .step
        .required_fields()
        .iter()
        .filter(|field| !state.form.is_filled(**field))
        .map(|field| field.key())
        .collect();
    let mut out = render_state(&state);
    if !missing.is_empty() {
        out.push_str(&format!("\nChamps requis restants : {}", missing.join(", ")));
    }
    Ok(out)
}
