pub mod auth;
pub mod invite;
pub mod notifications;
pub mod pages;
