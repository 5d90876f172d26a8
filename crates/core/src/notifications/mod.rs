pub mod mailer;
pub mod notifications_model;
pub mod notifications_service;
pub mod notifications_traits;
pub mod policy;
pub mod telegram;

pub use mailer::MailerClient;
pub use notifications_model::{DispatchReport, NotificationMessage};
pub use notifications_service::NotificationService;
pub use notifications_traits::{ChatSender, EmailSender, NotificationServiceTrait};
pub use telegram::TelegramClient;

#[cfg(test)]
mod notifications_service_tests;
