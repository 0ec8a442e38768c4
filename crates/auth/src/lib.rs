//! `equipe-auth` — authentication/authorization boundary.
//!
//! Token issuance and verification, the role model, the centralized mutation
//! policy, and password hashing. Decoupled from HTTP and storage: the API
//! layer wires these into its middleware and handlers.

pub mod claims;
pub mod password;
pub mod policy;
pub mod roles;
pub mod token;

pub use claims::{Claims, Identity};
pub use password::{hash_password, verify_password};
pub use policy::{can_create, can_mutate};
pub use roles::Role;
pub use token::{Hs256TokenService, TokenError, TokenVerifier};
