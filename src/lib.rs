pub mod config;
pub mod db;
pub mod policy;
pub mod routes;
pub mod types;
pub mod utils;
