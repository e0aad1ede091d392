pub mod admin;
pub mod application;
pub mod auth;
pub mod favorite;
pub mod health;
pub mod job;
