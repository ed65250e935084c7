pub mod reminders;
pub mod sink;
pub mod templates;

pub use reminders::NotificationService;
pub use sink::{LogSink, NotificationSink};
