//! Email relay clients.

mod emailjs;
#[cfg(feature = "test-util")]
pub mod mock;

pub use emailjs::{EmailJsMailer, EmailJsSettings, DEFAULT_API_URL};
pub use recap_types::{Mailer, MailerError, OutgoingEmail};

#[cfg(feature = "test-util")]
pub use mock::MockMailer;
