//! Schedule client: a single-screen form that asks the schedule API for a group's
//! calendar and shows it grouped by day, optionally inside an embedding host.
pub mod app;
pub mod bridge;
pub mod errors;
pub mod form_store;
pub mod helpers;
pub mod host;
pub mod models;
pub mod notifier;
pub mod render;
pub mod schedule_getter;
