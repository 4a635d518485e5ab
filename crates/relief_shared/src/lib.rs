//! # Relief Shared
//!
//! Vector types with a fixed `#[repr(C)]` layout, used for vertex data.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `wgpu`
//! - Any GPU or window-related crate
//!
//! Renderers receive these types as plain byte slices through `bytemuck`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{Vec2, Vec3};
