//! Core types and trait definitions for the Folio portfolio.
//!
//! This crate is deliberately free of HTTP and terminal dependencies. It holds
//! the page content model, the theme presets, the animation state machines
//! (particle field, caption cursor, scroll indicator) and the contact form
//! together with the [`contact::MessageSender`] seam that relay backends
//! implement.

pub mod caption;
pub mod color;
pub mod contact;
pub mod content;
pub mod error;
pub mod particles;
pub mod scroll;
pub mod theme;

pub use error::{Error, Result};
