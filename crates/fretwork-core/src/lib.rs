//! Fretwork Core Types and Definitions
//!
//! This crate provides the foundational types for the Fretwork fretboard
//! diagram renderer. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Pitch**: Musical pitch parsing and arithmetic ([`pitch`] module)
//! - **Draw**: Drawable primitives for diagram elements ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod pitch;
