pub mod access;
pub mod auth;
pub mod events;
pub mod report;
