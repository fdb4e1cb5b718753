//! Console loop: read a line, run it, print the answer and any alerts.

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::bootstrap::runtime::AppRuntime;
use crate::commands::{execute, parse_line, Outcome};

const PROMPT: &str = "> ";

/// Run until `quit` or end of input.
pub async fn run_console<R, W>(runtime: &AppRuntime, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("console started");
    let mut lines = reader.lines();

    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                write_block(&mut writer, &message).await?;
                continue;
            }
        };
        debug!(?command, "console command");

        let output = match execute(runtime, command).await {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Output(text)) => text,
            Err(message) => message,
        };
        for alert in runtime.notifier().drain() {
            write_block(&mut writer, &alert).await?;
        }
        write_block(&mut writer, &output).await?;
    }

    writer.flush().await?;
    info!("console stopped");
    Ok(())
}

async fn write_block<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> anyhow::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    writer.write_all(text.trim_end().as_bytes()).await?;
    writer.write_all(b"\n").await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use sm_core::care::CareProvider;
    use sm_core::ports::Screen;
    use sm_infra::InMemoryIdentityProvider;
    use tokio::io::BufReader;

    use super::*;

    fn runtime() -> AppRuntime {
        AppRuntime::new(
            Arc::new(InMemoryIdentityProvider::new()),
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
    }

    async fn run_script(runtime: &AppRuntime, script: &str) -> String {
        let mut output = Vec::new();
        run_console(runtime, BufReader::new(script.as_bytes()), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_full_registration_returns_to_login() {
        let runtime = runtime();
        let script = "\
register open
register set name \"Jeanne Martin\"
register set email jeanne@example.fr
register set phone \"06 12 34 56 78\"
register set password abc123
register set confirmPassword abc123
register next
register set bloodType A+
register set hasDiabetes oui
register set diabetesType \"Type 1\"
register next
register set takesMedicine non
register next
register next
quit
";
        let output = run_script(&runtime, script).await;

        assert!(
            output.contains("[Succès] Inscription terminée pour jeanne@example.fr"),
            "{output}"
        );
        assert!(output.contains("terminée"), "{output}");
        assert_eq!(runtime.navigator().current(), Screen::Login);
    }

    #[tokio::test]
    async fn test_validation_error_is_printed_as_alert() {
        let runtime = runtime();
        let output = run_script(&runtime, "register open\nregister next\n").await;

        assert!(output.contains("[Erreur] Le champ \"name\" est requis."), "{output}");
        assert!(output.contains("étape 1/4"), "{output}");
    }

    #[tokio::test]
    async fn test_parse_errors_do_not_stop_the_loop() {
        let runtime = runtime();
        let output = run_script(&runtime, "teleport\njournal show\n").await;

        assert!(output.contains("Traitements : 0 | Médicaments : 0"), "{output}");
    }

    #[tokio::test]
    async fn test_prescription_listing_shows_next_dose() {
        let runtime = runtime();
        let script = "prescription save Metformine 500mg \"2 fois par jour\" --start 2024-03-01 --next-dose \"2024-03-20 20:00\"\nprescription list\n";
        let output = run_script(&runtime, script).await;

        assert!(output.contains("Metformine 500mg (2 fois par jour) depuis le 01/03/2024 [En cours]"), "{output}");
        assert!(output.contains("Prochaine prise : 20/03/2024 20:00"), "{output}");
    }

    #[tokio::test]
    async fn test_message_to_doctor_is_acknowledged() {
        let runtime = runtime();
        let output = run_script(&runtime, "message doctor\nmessage doctor Bonjour docteur\n").await;

        assert!(output.contains("[Erreur] Veuillez entrer un message"), "{output}");
        assert!(
            output.contains("[Message envoyé] Nous vous répondrons dans les plus brefs délais"),
            "{output}"
        );
        let sent = runtime.usecases().contact().sent(CareProvider::Doctor).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, "Bonjour docteur");
    }

    #[tokio::test]
    async fn test_quit_stops_before_remaining_lines() {
        let runtime = runtime();
        let output = run_script(&runtime, "quit\njournal show\n").await;

        assert!(!output.contains("Traitements"), "{output}");
    }
}
