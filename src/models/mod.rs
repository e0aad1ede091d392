pub mod application;
pub mod favorite;
pub mod job;
pub mod user;
