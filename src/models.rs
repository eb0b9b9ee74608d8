pub mod accounts;
pub mod auth;
pub mod billing;
pub mod bookings;
pub mod dashboard;
pub mod landlords;
pub mod properties;
pub mod tenants;
