// Module exports for models

pub mod event_template;
pub mod occurrence;
pub mod recurrence;
pub mod session;
pub mod settings;
