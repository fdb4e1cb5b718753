//! Messages to the doctor or the nutritionist.
//!
//! There is no messaging backend yet: accepted messages are kept in the
//! session outbox and acknowledged to the patient.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, info_span, warn, Instrument};

use sm_core::care::{CareProvider, MessageError, ProviderMessage};
use sm_core::ports::NotificationPort;

pub const MESSAGE_SENT_TITLE: &str = "Message envoyé";
pub const MESSAGE_SENT_BODY: &str = "Nous vous répondrons dans les plus brefs délais";

pub struct ContactCareProvider {
    notifier: Arc<dyn NotificationPort>,
    outbox: Mutex<Vec<ProviderMessage>>,
}

impl ContactCareProvider {
    pub fn new(notifier: Arc<dyn NotificationPort>) -> Self {
        Self {
            notifier,
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Send `text` to `provider`. Blank text raises the "Erreur" alert and
    /// nothing is sent.
    pub async fn send(&self, provider: CareProvider, text: &str) -> Result<(), MessageError> {
        let span = info_span!("usecase.contact.send", provider = ?provider);
        async {
            let message = match ProviderMessage::new(provider, text) {
                Ok(message) => message,
                Err(err) => {
                    warn!(error = %err, "message refused");
                    self.notifier.show_message("Erreur", &err.to_string());
                    return Err(err);
                }
            };

            self.outbox.lock().await.push(message);
            info!(chars = text.chars().count(), "message queued for care provider");
            self.notifier.show_message(MESSAGE_SENT_TITLE, MESSAGE_SENT_BODY);
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Messages sent during this session, oldest first.
    pub async fn sent(&self, provider: CareProvider) -> Vec<ProviderMessage> {
        self.outbox
            .lock()
            .await
            .iter()
            .filter(|message| message.provider == provider)
            .cloned()
            .collect()
    }
}
