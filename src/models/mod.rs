pub mod auth;
pub mod billing;
pub mod catalog;
pub mod scheduling;
