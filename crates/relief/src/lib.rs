//! # Relief
//!
//! Command line front end for terrain generation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌─────────────────────────────┐    ┌──────────────┐
//! │   cli        │───>│   relief_procedural         │───>│   report     │
//! │              │    │                             │    │              │
//! │  • generate  │    │  • ControlGrid (loader)     │    │  • counts    │
//! │  • inspect   │    │  • diamond_square           │    │  • max height│
//! │              │    │  • TerrainMesh / OverlayMesh│    │  • scale     │
//! └──────────────┘    └─────────────────────────────┘    └──────────────┘
//! ```
//!
//! Rendering is out of scope: the report lists what a renderer would upload.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod report;

pub use cli::{execute, Cli, Command, GenerateArgs};
pub use report::{ControlGridReport, Report, TerrainReport};

/// Re-export for downstream convenience.
pub use relief_procedural as procedural;
