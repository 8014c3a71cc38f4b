//! # EVRS API
//!
//! Electronic vaccination record system: a REST API where citizens,
//! healthcare providers, hospitals, Ministry of Health offices and admins each
//! sign in separately and see the data their role is allowed to see.
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── middleware/    token verifiers, role guard, frontend route gate
//! ├── modules/       handlers and services per resource
//! ├── routes/        which handlers each caller scope can reach
//! ├── docs.rs        OpenAPI document
//! ├── logging.rs     tracing setup and request logging
//! ├── metrics.rs     Prometheus counters
//! └── state.rs       shared application state
//! ```
//!
//! Domain types, authentication and the route gate live in the `evrs-*`
//! crates under `crates/`.
//!
//! ## Authentication
//!
//! Logging in as a role sets an httpOnly `<role>_token` cookie holding a
//! signed token with the account id and role. Every protected router checks
//! that cookie (or an `Authorization: Bearer` header) before its handlers run:
//!
//! | Failure | Status |
//! |---|---|
//! | no token | 401 |
//! | bad signature or expired | 403 |
//! | token for another role | 403 |
//! | role not allowed on the route | 403 |

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod routes;
pub mod state;
pub mod validator;

pub use evrs_auth;
pub use evrs_config;
pub use evrs_core;
pub use evrs_db;
pub use evrs_gate;
pub use evrs_models;
