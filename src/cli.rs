use std::path::PathBuf;

use clap::{CommandFactory, Parser, error::ErrorKind};

use crate::{
    app::Settings,
    generators::Generator,
    maze::Grid,
    rng::Pcg32,
    solvers::{Heuristic, Solver},
};

/// Watch mazes being generated and solved one step at a time.
#[derive(Debug, Parser)]
#[command(name = "mazestep", about, long_about = None, version)]
pub struct Cli {
    /// Grid width in cells (odd, at least 3)
    #[arg(long, default_value_t = 61)]
    pub width: u16,

    /// Grid height in cells (odd, at least 3)
    #[arg(long, default_value_t = 31)]
    pub height: u16,

    /// Seed for the maze RNG. Without it every session replays the same mazes
    #[arg(long, conflicts_with = "random_seed")]
    pub seed: Option<u64>,

    /// Draw a fresh seed from system entropy
    #[arg(long, default_value_t = false)]
    pub random_seed: bool,

    /// Generator selected at startup
    #[arg(value_enum, long, default_value_t = Generator::RecurBacktrack)]
    pub generator: Generator,

    /// Solver selected at startup
    #[arg(value_enum, long, default_value_t = Solver::AStar)]
    pub solver: Solver,

    /// Distance estimate used by A* and greedy best-first
    #[arg(value_enum, long, default_value_t)]
    pub heuristic: Heuristic,

    /// Animation speed
    #[arg(
        long,
        default_value_t = Settings::DEFAULT_STEPS_PER_SECOND,
        value_parser = clap::value_parser!(u32).range(
            Settings::MIN_STEPS_PER_SECOND as i64..=Settings::MAX_STEPS_PER_SECOND as i64
        )
    )]
    pub steps_per_second: u32,

    /// Complete every run as soon as it starts
    #[arg(long, default_value_t = false)]
    pub instant: bool,

    /// Generate and solve once, print the result and exit
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Where to write logs
    #[arg(long, value_name = "FILE", default_value = "mazestep.log")]
    pub log_file: PathBuf,
}

impl Cli {
    /// Checks the grid dimensions before any engine runs.
    ///
    /// Any generator can be picked once the app is running, so the dimensions must always
    /// fit the odd lattice.
    pub fn validate(&self) -> Result<(), clap::Error> {
        Grid::validate_lattice(self.width, self.height)
            .map_err(|err| Cli::command().error(ErrorKind::ValueValidation, err))
    }

    /// The RNG the session runs on.
    pub fn rng(&self) -> Pcg32 {
        if self.random_seed {
            let seed = rand::random::<u64>();
            tracing::info!("Using random seed {}", seed);
            Pcg32::seeded(Some(seed))
        } else {
            Pcg32::seeded(self.seed)
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            steps_per_second: self.steps_per_second,
            instant: self.instant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mazestep").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!((cli.width, cli.height), (61, 31));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.generator, Generator::RecurBacktrack);
        assert_eq!(cli.solver, Solver::AStar);
        assert_eq!(cli.heuristic, Heuristic::Manhattan);
        assert_eq!(cli.settings(), Settings::default());
        assert!(cli.validate().is_ok());
        assert_eq!(cli.rng(), Pcg32::default());
    }

    #[test]
    fn test_value_enums() {
        let cli = parse(&[
            "--generator",
            "kruskal",
            "--solver",
            "greedy-best-first",
            "--heuristic",
            "euclidean",
        ])
        .unwrap();
        assert_eq!(cli.generator, Generator::Kruskal);
        assert_eq!(cli.solver, Solver::GreedyBestFirst);
        assert_eq!(cli.heuristic, Heuristic::Euclidean);
    }

    #[test]
    fn test_even_dimensions_are_rejected() {
        let cli = parse(&["--width", "20"]).unwrap();
        let err = cli.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("width must be odd"));
    }

    #[test]
    fn test_speed_is_bounded() {
        assert!(parse(&["--steps-per-second", "0"]).is_err());
        assert!(parse(&["--steps-per-second", "513"]).is_err());
        assert_eq!(
            parse(&["--steps-per-second", "512"]).unwrap().steps_per_second,
            512
        );
    }

    #[test]
    fn test_seed_conflicts_with_random_seed() {
        assert!(parse(&["--seed", "1", "--random-seed"]).is_err());
        let cli = parse(&["--seed", "1"]).unwrap();
        assert_eq!(cli.rng(), Pcg32::seeded(Some(1)));
    }
}
