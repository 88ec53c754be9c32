//! Platform abstraction layer
//!
//! The simulation never touches raw pointer or touch events. Whatever drives the
//! match translates them through an [`InputSource`], usually a [`Joystick`].

pub mod input;

pub use input::{InputSource, Joystick};
