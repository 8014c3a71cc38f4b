//! Routers per caller scope. Handlers live in `crate::modules`; these files
//! only decide which handlers each role can reach and behind which verifier.
//!
//! | Prefix | Verifier | Guard |
//! |---|---|---|
//! | `/api/admin` | admin | admin |
//! | `/api/hcp`, `/api/hospital`, `/api/moh` | that role | that role |
//! | `/api/citizen` | citizen | citizen |
//! | `/api/shared` | first non-admin cookie | writes: hcp, hospital, moh |

pub mod admin;
pub mod citizen;
pub mod frontend;
pub mod health;
pub mod providers;
pub mod shared;
