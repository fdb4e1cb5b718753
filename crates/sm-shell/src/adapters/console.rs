use std::sync::{Mutex, PoisonError};

use sm_core::ports::{NavigationPort, NotificationPort, Screen};
use tracing::debug;

/// Collects alerts until the console loop prints them.
///
/// Alerts raised by a background submission show up with the next prompt.
#[derive(Default)]
pub struct ConsoleNotifier {
    pending: Mutex<Vec<String>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every alert raised since the last call, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl NotificationPort for ConsoleNotifier {
    fn show_message(&self, title: &str, body: &str) {
        debug!(%title, "console alert");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("[{}] {}", title, body));
    }
}

/// Tracks the screen the console is currently showing.
pub struct ConsoleNavigator {
    current: Mutex<Screen>,
}

impl ConsoleNavigator {
    pub fn new(initial: Screen) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    pub fn current(&self) -> Screen {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NavigationPort for ConsoleNavigator {
    fn navigate_to(&self, screen: Screen) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(from = ?*current, to = ?screen, route = screen.route(), "navigate");
        *current = screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_drains_in_order() {
        let notifier = ConsoleNotifier::new();
        notifier.show_message("Erreur", "Format d'email invalide.");
        notifier.show_message("Succès", "Inscription terminée pour a@b.fr");

        assert_eq!(
            notifier.drain(),
            vec![
                "[Erreur] Format d'email invalide.".to_string(),
                "[Succès] Inscription terminée pour a@b.fr".to_string()
            ]
        );
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn navigator_tracks_current_screen() {
        let navigator = ConsoleNavigator::new(Screen::Login);
        navigator.navigate_to(Screen::Home);

        assert_eq!(navigator.current(), Screen::Home);
    }
}
