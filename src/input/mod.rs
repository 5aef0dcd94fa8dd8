//! Input module for the user input surface
//!
//! Reads selector and gesture commands on a listener thread and provides
//! the document that one-shot gesture listeners subscribe to.

mod commands;
mod gesture;
mod listener;

pub use commands::InputEvent;
pub use gesture::{Document, Gesture, Subscription};
pub use listener::InputListener;
