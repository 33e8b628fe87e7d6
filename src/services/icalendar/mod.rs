//! RFC 5545 (.ics) export so events can be added to external calendars.

pub mod export;
mod service;
mod utils;

pub use service::ICalendarService;
