//! Telephony data model: identifiers, lines, forwarding slots, and input validation.

pub mod forwarding;
pub mod id;
pub mod line;
pub mod validation;

pub use forwarding::*;
pub use id::*;
pub use line::*;
pub use validation::*;
