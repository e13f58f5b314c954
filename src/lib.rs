pub mod app;
pub mod cli;
pub mod containers;
pub mod error;
pub mod generators;
pub mod maze;
pub mod rng;
pub mod solvers;
