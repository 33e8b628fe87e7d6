// Service module exports

pub mod database;
pub mod detail;
pub mod icalendar;
pub mod occurrence;
pub mod practice;
pub mod schedule;
pub mod settings;
pub mod template;
