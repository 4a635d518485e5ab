//! # Relief Procedural Generation
//!
//! Turns a small grid of authored elevations into render-ready terrain.
//!
//! ## Design Principles
//!
//! 1. **Pure**: control heights and parameters in, owned arrays out
//! 2. **Injected randomness**: the caller picks the noise source; a seed
//!    reproduces the same terrain
//! 3. **Build once**: everything is generated up front and read-only after
//!
//! ## Pipeline
//!
//! ```text
//! ControlGrid ──► diamond_square ──► Heightfield ──► TerrainMesh
//!      │
//!      └────────────────────────────────────────────► OverlayMesh
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use relief_procedural::{generate, ControlGrid, GaussianNoise, SynthesisParams};
//!
//! let control = ControlGrid::parse("1 4  0 0 0  0 10 0  0 0 0")?;
//! let terrain = generate(&control, &SynthesisParams::default(), GaussianNoise::seeded(42));
//!
//! assert_eq!(terrain.mesh().vertex_count(), 17 * 17);
//! assert_eq!(terrain.overlay().vertex_count(), 3 * 3);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod control;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod noise;
pub mod synthesis;

use std::time::Instant;

pub use config::{TerrainConfig, WorldScale};
pub use control::{ControlGrid, MAX_EXPONENT};
pub use error::{TerrainError, TerrainResult};
pub use grid::toroidal_index;
pub use mesh::{OverlayMesh, TerrainMesh};
pub use noise::{GaussianNoise, NoiseSource, ScriptedNoise};
pub use synthesis::{diamond_square, Heightfield, SynthesisParams};

/// A generated terrain: the dense heightfield plus both meshes.
///
/// Owns every buffer; drop it as a unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    heightfield: Heightfield,
    mesh: TerrainMesh,
    overlay: OverlayMesh,
}

impl Terrain {
    /// Loads the heights file named by `config` and generates from it.
    ///
    /// Uses seeded noise when `config.seed` is set, OS entropy otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the heights file cannot be read or parsed.
    pub fn from_config(config: &TerrainConfig) -> TerrainResult<Self> {
        let control = ControlGrid::load(&config.heights_file)?;
        let params = config.synthesis_params();
        let terrain = match config.seed {
            Some(seed) => generate(&control, &params, GaussianNoise::seeded(seed)),
            None => {
                tracing::info!("No seed configured, terrain will differ between runs");
                generate(&control, &params, GaussianNoise::from_entropy())
            }
        };
        Ok(terrain)
    }

    /// The dense elevation grid.
    #[must_use]
    pub const fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    /// Render mesh for the dense grid.
    #[must_use]
    pub const fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Wireframe mesh for the control grid.
    #[must_use]
    pub const fn overlay(&self) -> &OverlayMesh {
        &self.overlay
    }

    /// Highest elevation in the dense grid.
    #[must_use]
    pub const fn max_height(&self) -> f32 {
        self.heightfield.max_height()
    }
}

/// Runs the full pipeline: synthesis, dense mesh, overlay mesh.
#[must_use]
pub fn generate<N: NoiseSource>(
    control: &ControlGrid,
    params: &SynthesisParams,
    noise: N,
) -> Terrain {
    let start = Instant::now();

    let heightfield = diamond_square(control, params, noise);
    let mesh = TerrainMesh::from_heightfield(&heightfield);
    let overlay = OverlayMesh::from_control_grid(control);

    tracing::info!(
        "Terrain generation: {}x{} grid, {} vertices, {} indices, max height {:.3} in {:?}",
        heightfield.size(),
        heightfield.size(),
        mesh.vertex_count(),
        mesh.index_count(),
        heightfield.max_height(),
        start.elapsed()
    );

    Terrain {
        heightfield,
        mesh,
        overlay,
    }
}
