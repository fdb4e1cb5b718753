/// Alert collaborator, fire-and-forget.
pub trait NotificationPort: Send + Sync {
    fn show_message(&self, title: &str, body: &str);
}
