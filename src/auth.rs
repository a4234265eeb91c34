//! Application credentials, secret redaction, and per-request signatures.

pub mod credentials;
pub mod secret;
pub mod signature;

pub use credentials::*;
pub use secret::*;
pub use signature::*;
