//! Messages to the care providers.

use sm_core::care::CareProvider;
use tracing::{info_span, Instrument};

use crate::bootstrap::AppRuntime;
use crate::commands::error::map_err;

pub async fn send_message(
    runtime: &AppRuntime,
    provider: CareProvider,
    text: &str,
) -> Result<String, String> {
    let span = info_span!("command.contact.send_message", provider = %provider);
    async {
        let contact = runtime.usecases().contact();
        contact.send(provider, text).await.map_err(map_err)?;
        let count = contact.sent(provider).await.len();
        Ok(format!("{} : {} message(s) envoyé(s).", provider, count))
    }
    .instrument(span)
    .await
}
