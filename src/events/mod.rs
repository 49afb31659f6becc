//! Event types and observers.
//!
//! Submodules:
//! - [`animation`] – one-shot animation completion
//! - [`audio`] – commands and messages for the background audio thread
//! - [`switchdebug`] – toggle the debug overlay on/off
//! - [`timer`] – timer expiration
pub mod animation;
pub mod audio;
pub mod switchdebug;
pub mod timer;
