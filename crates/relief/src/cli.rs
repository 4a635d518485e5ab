//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use relief_procedural::{ControlGrid, Terrain, TerrainConfig, TerrainError, TerrainResult};

use crate::report::{ControlGridReport, Report, TerrainReport};

/// Diamond-square terrain generator.
#[derive(Parser, Debug)]
#[command(name = "relief")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate terrain and report the arrays a renderer would receive.
    Generate(GenerateArgs),

    /// Parse and validate a control heights file without generating.
    Inspect {
        /// Control heights file.
        heights: PathBuf,
    },
}

/// Inputs for `relief generate`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["config", "heights"])))]
pub struct GenerateArgs {
    /// TOML terrain config.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Control heights file (instead of a config).
    #[arg(long)]
    pub heights: Option<PathBuf>,

    /// Roughness exponent h; higher is smoother.
    #[arg(short, long)]
    pub roughness: Option<f32>,

    /// Base noise amplitude.
    #[arg(short, long)]
    pub amplitude: Option<f32>,

    /// Noise seed for a reproducible terrain.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl GenerateArgs {
    /// Builds the effective config: file (or defaults), then flag overrides.
    ///
    /// # Errors
    ///
    /// Fails if the config file is unreadable or any value is out of range.
    pub fn resolve(&self) -> TerrainResult<TerrainConfig> {
        let mut config = match (&self.config, &self.heights) {
            (Some(path), _) => TerrainConfig::load(path)?,
            (None, Some(heights)) => TerrainConfig::new(heights),
            (None, None) => {
                return Err(TerrainError::InvalidConfig(
                    "either --config or --heights is required".to_owned(),
                ))
            }
        };

        if let Some(roughness) = self.roughness {
            config.roughness = roughness;
        }
        if let Some(amplitude) = self.amplitude {
            config.max_random_height = amplitude;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Runs one command to completion.
///
/// # Errors
///
/// Any load or validation failure; nothing is generated in that case.
pub fn execute(command: &Command) -> TerrainResult<Report> {
    match command {
        Command::Generate(args) => {
            let config = args.resolve()?;
            let terrain = Terrain::from_config(&config)?;
            Ok(Report::Terrain(TerrainReport::new(&terrain, &config)))
        }
        Command::Inspect { heights } => {
            let control = ControlGrid::load(heights)?;
            Ok(Report::ControlGrid(ControlGridReport::new(&control)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_requires_a_source() {
        assert!(Cli::try_parse_from(["relief", "generate"]).is_err());
        assert!(Cli::try_parse_from(["relief", "generate", "--heights", "h.txt"]).is_ok());
        assert!(Cli::try_parse_from(["relief", "generate", "-c", "t.toml"]).is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "relief", "generate", "--heights", "h.txt", "-r", "0.9", "-a", "3", "-s", "12",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.heights_file, PathBuf::from("h.txt"));
        assert_eq!(config.roughness, 0.9);
        assert_eq!(config.max_random_height, 3.0);
        assert_eq!(config.seed, Some(12));
    }

    #[test]
    fn test_out_of_range_flag_rejected() {
        let cli =
            Cli::try_parse_from(["relief", "generate", "--heights", "h.txt", "--amplitude=-1"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(matches!(args.resolve(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn test_inspect_missing_file() {
        let command = Command::Inspect {
            heights: PathBuf::from("/no/such/heights.txt"),
        };
        assert!(matches!(execute(&command), Err(TerrainError::Io { .. })));
    }
}
