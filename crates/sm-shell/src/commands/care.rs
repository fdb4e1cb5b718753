//! Treatment journal and prescription commands.

use chrono::{Local, NaiveDate};
use sm_core::care::{DoseMoment, PrescriptionDraft, PrescriptionStatus, TreatmentJournal};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::bootstrap::AppRuntime;
use crate::commands::error::map_err;

use sm_app::usecases::care::REMOVE_TREATMENT_PROMPT;

fn render_journal(journal: &TreatmentJournal) -> String {
    let info = &journal.info;
    let mut out = format!(
        "Diabète : {} | Insuline : {}{}",
        info.diabetes_kind,
        if info.uses_insulin { "Oui" } else { "Non" },
        if info.editing { " (modification)" } else { "" }
    );
    for treatment in journal.treatments() {
        out.push_str(&format!(
            "\n- {} {}{}",
            treatment.id,
            treatment.display_description(),
            if treatment.editing { " (modification)" } else { "" }
        ));
        for medication in &treatment.medications {
            let moments: Vec<&str> = medication.moments.iter().map(|m| m.label()).collect();
            out.push_str(&format!(
                "\n    * {} {} [{}]",
                medication.id,
                medication.name,
                moments.join(", ")
            ));
        }
    }
    out.push_str(&format!(
        "\nTraitements : {} | Médicaments : {}",
        journal.total_treatments(),
        journal.total_medications()
    ));
    out
}

pub async fn show_journal(runtime: &AppRuntime) -> Result<String, String> {
    let journal = runtime.usecases().care_records().journal().await;
    Ok(render_journal(&journal))
}

pub async fn add_treatment(runtime: &AppRuntime, description: Option<String>) -> Result<String, String> {
    let span = info_span!("command.care.add_treatment");
    async {
        let records = runtime.usecases().care_records();
        let id = records.add_treatment().await;
        if let Some(description) = description {
            records
                .describe_treatment(id, &description)
                .await
                .map_err(map_err)?;
        }
        Ok(format!("Traitement {} ajouté.", id))
    }
    .instrument(span)
    .await
}

pub async fn describe_treatment(
    runtime: &AppRuntime,
    id: Uuid,
    description: &str,
) -> Result<String, String> {
    runtime
        .usecases()
        .care_records()
        .describe_treatment(id, description)
        .await
        .map_err(map_err)?;
    show_journal(runtime).await
}

pub async fn toggle_treatment_editing(runtime: &AppRuntime, id: Uuid) -> Result<String, String> {
    let editing = runtime
        .usecases()
        .care_records()
        .toggle_treatment_editing(id)
        .await
        .map_err(map_err)?;
    Ok(if editing { "Modification" } else { "Enregistré" }.to_string())
}

/// Removal needs `confirmed`; otherwise the confirmation prompt is returned.
pub async fn remove_treatment(runtime: &AppRuntime, id: Uuid, confirmed: bool) -> Result<String, String> {
    if !confirmed {
        return Ok(format!("{} (ajoutez --yes)", REMOVE_TREATMENT_PROMPT));
    }
    let span = info_span!("command.care.remove_treatment", treatment_id = %id);
    async {
        runtime
            .usecases()
            .care_records()
            .remove_treatment(id)
            .await
            .map_err(map_err)?;
        Ok("Traitement supprimé.".to_string())
    }
    .instrument(span)
    .await
}

pub async fn add_medication(runtime: &AppRuntime, treatment: Uuid, name: &str) -> Result<String, String> {
    let id = runtime
        .usecases()
        .care_records()
        .add_medication(treatment, name)
        .await
        .map_err(map_err)?;
    Ok(format!("Médicament {} ajouté.", id))
}

pub async fn toggle_moment(
    runtime: &AppRuntime,
    treatment: Uuid,
    medication: Uuid,
    moment: &str,
) -> Result<String, String> {
    let moment: DoseMoment = moment.parse().map_err(map_err)?;
    let checked = runtime
        .usecases()
        .care_records()
        .toggle_moment(treatment, medication, moment)
        .await
        .map_err(map_err)?;
    Ok(format!("{} : {}", moment.label(), if checked { "oui" } else { "non" }))
}

pub async fn remove_medication(
    runtime: &AppRuntime,
    treatment: Uuid,
    medication: Uuid,
) -> Result<String, String> {
    runtime
        .usecases()
        .care_records()
        .remove_medication(treatment, medication)
        .await
        .map_err(map_err)?;
    Ok("Médicament supprimé.".to_string())
}

pub async fn toggle_info_editing(runtime: &AppRuntime) -> Result<String, String> {
    runtime
        .usecases()
        .care_records()
        .toggle_medical_info_editing()
        .await;
    show_journal(runtime).await
}

pub async fn update_info(
    runtime: &AppRuntime,
    toggle_type: bool,
    insulin: Option<bool>,
) -> Result<String, String> {
    runtime
        .usecases()
        .care_records()
        .update_medical_info(toggle_type, insulin)
        .await
        .map_err(map_err)?;
    show_journal(runtime).await
}

pub async fn list_prescriptions(runtime: &AppRuntime) -> Result<String, String> {
    let prescriptions = runtime.usecases().care_records().prescriptions().await;
    if prescriptions.is_empty() {
        return Ok("Aucune prescription.".to_string());
    }
    let lines: Vec<String> = prescriptions
        .iter()
        .map(|p| {
            let mut line = format!(
                "- {} {} {} ({}) depuis le {} [{}]",
                p.id,
                p.name,
                p.dosage,
                p.frequency,
                p.start_date.format("%d/%m/%Y"),
                p.status
            );
            if let Some(end) = p.end_date {
                line.push_str(&format!(" jusqu'au {}", end.format("%d/%m/%Y")));
            }
            if let Some(next) = p.next_dose {
                line.push_str(&format!(
                    "\n    Prochaine prise : {}",
                    next.format("%d/%m/%Y %H:%M")
                ));
            }
            if let Some(notes) = &p.notes {
                line.push_str(&format!("\n    {}", notes));
            }
            line
        })
        .collect();
    Ok(lines.join("\n"))
}

pub async fn save_prescription(
    runtime: &AppRuntime,
    draft: PrescriptionDraft,
    editing: Option<Uuid>,
) -> Result<String, String> {
    let span = info_span!("command.care.save_prescription", editing = ?editing);
    async {
        let today: NaiveDate = Local::now().date_naive();
        let id = runtime
            .usecases()
            .care_records()
            .save_prescription(draft, editing, today)
            .await
            .map_err(map_err)?;
        Ok(format!("Prescription {} enregistrée.", id))
    }
    .instrument(span)
    .await
}

pub async fn set_prescription_status(
    runtime: &AppRuntime,
    id: Uuid,
    status: PrescriptionStatus,
) -> Result<String, String> {
    runtime
        .usecases()
        .care_records()
        .set_prescription_status(id, status)
        .await
        .map_err(map_err)?;
    Ok(format!("Statut : {}", status))
}

pub async fn remove_prescription(runtime: &AppRuntime, id: Uuid) -> Result<String, String> {
    runtime
        .usecases()
        .care_records()
        .remove_prescription(id)
        .await
        .map_err(map_err)?;
    Ok("Prescription supprimée.".to_string())
}
