//! Identity domain module.
//!
//! The identity/profile backend is an external collaborator. This module only
//! defines the operations the core calls into, plus a single-user default.
//!
//! # Module Structure
//!
//! - `model`: session and profile models (`AuthSession`, `UserProfile`)
//! - `service`: identity service trait and the guest implementation
//!
//! # Usage
//!
//! ```ignore
//! use unimind_core::identity::{IdentityService, GuestIdentityService, UserProfile};
//! ```

mod model;
mod service;

pub use model::{AuthSession, UserProfile};
pub use service::{GUEST_USER_ID, GuestIdentityService, IdentityService};
