pub mod accounts;
pub mod admins;
pub mod auth;
pub mod hcps;
pub mod hospitals;
pub mod mohs;
pub mod patients;
pub mod vaccinations;
pub mod vaccines;
