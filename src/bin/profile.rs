use std::time::Instant;

use mazestep::{
    app::{App, Settings},
    generators::Generator,
    maze::Grid,
    rng::Pcg32,
    solvers::{Heuristic, Solver},
};

const SIDE: u16 = 255;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let iterations = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);

    let total = Instant::now();
    for i in 0..iterations {
        // Round-robin over every generator/solver combination
        let generator = Generator::ALL[i % Generator::ALL.len()];
        let solver = Solver::ALL[(i / Generator::ALL.len()) % Solver::ALL.len()];

        let started = Instant::now();
        let rng = Pcg32::seeded(Some(i as u64));
        let mut app = App::new(Grid::new(SIDE, SIDE), rng, Settings::default())
            .with_selection(generator, solver, Heuristic::Manhattan);
        let summary = app.run_headless();
        println!("[{:>4}] {:>10.3?} {}", i, started.elapsed(), summary);
    }
    println!("{} iterations in {:.3?}", iterations, total.elapsed());
}
