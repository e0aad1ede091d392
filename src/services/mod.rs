pub mod application_service;
pub mod favorite_service;
pub mod job_service;
pub mod resume_store;
pub mod user_service;
