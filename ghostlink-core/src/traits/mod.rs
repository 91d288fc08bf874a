//! Collaborator traits
//!
//! These traits define the interface between the remote-control logic and
//! whatever draws menus and text on the platform.

pub mod surface;
pub mod widgets;

pub use surface::ResponseSurface;
pub use widgets::{DialogOutcome, DialogWidget, FilePicker, MenuWidget, PromptWidget, Ui};
