// Meditation Calendar Library
// Exports all modules for the command line front end and for testing

pub mod models;
pub mod services;
pub mod utils;
