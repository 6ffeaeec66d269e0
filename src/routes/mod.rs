pub mod account;
pub mod admin;
pub mod audit_logs;
pub mod bookings;
pub mod cleaning_tasks;
pub mod email_templates;
pub mod expenses;
pub mod health;
pub mod owners;
pub mod ownership;
pub mod properties;
pub mod rooms;
pub mod users;
