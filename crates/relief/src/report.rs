//! Human-readable summaries of generated terrain.

use std::fmt;

use relief_procedural::{ControlGrid, Terrain, TerrainConfig};
use relief_shared::Vec3;

/// Output of one command.
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    /// From `relief generate`.
    Terrain(TerrainReport),
    /// From `relief inspect`.
    ControlGrid(ControlGridReport),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terrain(report) => fmt::Display::fmt(report, f),
            Self::ControlGrid(report) => fmt::Display::fmt(report, f),
        }
    }
}

/// What a renderer would receive from one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainReport {
    /// Control points per side.
    pub grid_size: usize,
    /// Dense points per side.
    pub resolution: usize,
    /// Dense mesh vertices.
    pub vertex_count: usize,
    /// Dense mesh indices.
    pub index_count: usize,
    /// Overlay mesh vertices.
    pub overlay_vertex_count: usize,
    /// Overlay mesh indices.
    pub overlay_index_count: usize,
    /// Highest dense elevation.
    pub max_height: f32,
    /// Bytes a renderer uploads for the dense mesh.
    pub upload_bytes: usize,
    /// Grid-to-world model scale.
    pub model_scale: Vec3,
    /// Initial camera position.
    pub spawn_point: Vec3,
    /// Seed used, if any.
    pub seed: Option<u64>,
}

impl TerrainReport {
    /// Summarizes a terrain generated from `config`.
    #[must_use]
    pub fn new(terrain: &Terrain, config: &TerrainConfig) -> Self {
        let mesh = terrain.mesh();
        let overlay = terrain.overlay();
        let upload_bytes = mesh.position_bytes().len()
            + mesh.normal_bytes().len()
            + mesh.uv_bytes().len()
            + mesh.index_bytes().len();
        let resolution = terrain.heightfield().size();

        Self {
            grid_size: overlay.size(),
            resolution,
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
            overlay_vertex_count: overlay.vertex_count(),
            overlay_index_count: overlay.index_count(),
            max_height: terrain.max_height(),
            upload_bytes,
            model_scale: config.world.model_scale(resolution),
            spawn_point: config.world.spawn_point(terrain.max_height()),
            seed: config.seed,
        }
    }
}

impl fmt::Display for TerrainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ TERRAIN ──────────────────────────────────────────────┐")?;
        writeln!(f, "│ Control grid:       {0}x{0}", self.grid_size)?;
        writeln!(f, "│ Resolution:         {0}x{0}", self.resolution)?;
        match self.seed {
            Some(seed) => writeln!(f, "│ Seed:               {seed}")?,
            None => writeln!(f, "│ Seed:               (entropy)")?,
        }
        writeln!(f, "│ Max height:         {:.3}", self.max_height)?;
        writeln!(f, "├─ DENSE MESH ───────────────────────────────────────────┤")?;
        writeln!(f, "│ Vertices:           {}", self.vertex_count)?;
        writeln!(f, "│ Indices:            {}", self.index_count)?;
        writeln!(f, "│ Upload size:        {} bytes", self.upload_bytes)?;
        writeln!(f, "├─ OVERLAY MESH ─────────────────────────────────────────┤")?;
        writeln!(f, "│ Vertices:           {}", self.overlay_vertex_count)?;
        writeln!(f, "│ Indices:            {}", self.overlay_index_count)?;
        writeln!(f, "├─ WORLD ────────────────────────────────────────────────┤")?;
        let s = self.model_scale;
        writeln!(f, "│ Model scale:        ({:.3}, {:.3}, {:.3})", s.x, s.y, s.z)?;
        let p = self.spawn_point;
        writeln!(f, "│ Spawn point:        ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)?;
        write!(f, "└────────────────────────────────────────────────────────┘")
    }
}

/// Dimensions and elevation range of a control grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlGridReport {
    /// Control points per side.
    pub grid_size: usize,
    /// Dense points per side after synthesis.
    pub resolution: usize,
    /// Dense cells between control points.
    pub stride: usize,
    /// Lowest control elevation.
    pub min_height: f32,
    /// Highest control elevation.
    pub max_height: f32,
}

impl ControlGridReport {
    /// Summarizes a control grid.
    #[must_use]
    pub fn new(control: &ControlGrid) -> Self {
        let (min_height, max_height) = control.elevation_range();
        Self {
            grid_size: control.grid_size(),
            resolution: control.resolution(),
            stride: control.stride(),
            min_height,
            max_height,
        }
    }
}

impl fmt::Display for ControlGridReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ CONTROL GRID ─────────────────────────────────────────┐")?;
        writeln!(f, "│ Points:             {0}x{0}", self.grid_size)?;
        writeln!(f, "│ Dense resolution:   {0}x{0}", self.resolution)?;
        writeln!(f, "│ Stride:             {}", self.stride)?;
        writeln!(
            f,
            "│ Elevation range:    [{:.3}, {:.3}]",
            self.min_height, self.max_height
        )?;
        write!(f, "└────────────────────────────────────────────────────────┘")
    }
}
