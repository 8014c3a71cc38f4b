//! # EVRS Models
//!
//! Database rows, request DTOs and response bodies for the EVRS API.
//! Every body on the wire is camelCase JSON; password hashes never leave the
//! database layer.
//!
//! - [`common`]: `recordedBy`, message bodies, search and password DTOs
//! - [`auth`]: login request and session responses
//! - [`patients`]: citizens and their medical information
//! - [`hcps`], [`hospitals`], [`mohs`], [`admins`]: the other account kinds
//! - [`vaccines`], [`vaccinations`]: the vaccine catalogue and records

pub mod admins;
pub mod auth;
pub mod common;
pub mod hcps;
pub mod hospitals;
pub mod mohs;
pub mod patients;
pub mod vaccinations;
pub mod vaccines;

pub use common::{
    ChangePasswordDto, MessageResponse, RecordedBy, RegisteredAccount, RegistrationResponse,
    SearchParams,
};
