//! Domain models for the console itself.

mod session;

pub use session::{Operator, SessionContext};
