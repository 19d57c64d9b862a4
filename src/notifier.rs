use crate::models::ContactSubmission;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Side effects of the public forms. Swapping the implementation (mailer, CRM)
/// leaves validation untouched.
pub trait Notifier: Send + Sync {
    /// Records a newsletter subscription.
    fn subscribe(&self, email: &str) -> Result<(), NotifyError>;

    /// Forwards an accepted, sanitized contact submission.
    fn deliver_contact(&self, submission: &ContactSubmission) -> Result<(), NotifyError>;
}

/// Default notifier: writes each event to the log and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn subscribe(&self, email: &str) -> Result<(), NotifyError> {
        log::info!("Newsletter subscription {} for {}", Uuid::new_v4(), email);
        Ok(())
    }

    fn deliver_contact(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        log::info!(
            "Contact submission {} from {} <{}> [{}]: {}",
            Uuid::new_v4(),
            submission.name,
            submission.email,
            submission.reason.as_str(),
            submission.subject
        );
        Ok(())
    }
}
