pub mod appointment;
pub mod availability;
pub mod doctor;
pub mod group;
pub mod permission;
pub mod review;
pub mod user;
pub mod user_group;
pub mod user_permission;

/*
 Doctors own their availability slots, appointments and reviews; users own their
 appointments and reviews. Every FK cascades on delete so removing a doctor or a
 user takes its dependent rows with it. Group membership and direct permission grants are plain join tables.
 */
