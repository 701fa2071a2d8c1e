pub mod appointment;
pub mod availability;
pub mod doctor;
pub mod error;
pub mod query;
pub mod response;
pub mod review;
pub mod token;
pub mod user;
pub mod validation;
