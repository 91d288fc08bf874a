//! Navigation state
//!
//! Where the user is in the menu tree is a function of the current state
//! and an event. The machine is explicit, finite and deterministic; the
//! [`Session`] wraps it with the bookkeeping the outer loop needs.

pub mod events;
pub mod machine;
pub mod session;

pub use events::NavEvent;
pub use machine::NavState;
pub use session::Session;
