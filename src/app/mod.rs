mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyEventKind},
    queue,
    terminal::{self, ClearType},
};

use crate::{
    app::renderer::Renderer,
    generators::{Generator, GeneratorEngine},
    maze::{Cell, Grid},
    rng::Pcg32,
    solvers::{Heuristic, Solver, SolverEngine},
};

/// Time between frames of the app loop.
#[derive(Debug, Clone, Copy)]
struct FrameClock {
    last: Instant,
}

impl FrameClock {
    fn new(now: Instant) -> Self {
        FrameClock { last: now }
    }

    /// Time since the previous lap or restart.
    fn lap(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }

    fn restart(&mut self, now: Instant) {
        self.last = now;
    }
}

/// Pacing of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub steps_per_second: u32,
    /// Run every started algorithm to completion right away.
    pub instant: bool,
}

impl Settings {
    pub const MIN_STEPS_PER_SECOND: u32 = 1;
    pub const MAX_STEPS_PER_SECOND: u32 = 512;
    pub const DEFAULT_STEPS_PER_SECOND: u32 = 32;

    pub fn speed_up(&mut self) {
        self.steps_per_second = (self.steps_per_second * 2).min(Settings::MAX_STEPS_PER_SECOND);
    }

    pub fn slow_down(&mut self) {
        self.steps_per_second = (self.steps_per_second / 2).max(Settings::MIN_STEPS_PER_SECOND);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            steps_per_second: Settings::DEFAULT_STEPS_PER_SECOND,
            instant: false,
        }
    }
}

/// What the app is doing right now. At most one engine runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating(Generator),
    Solving(Solver),
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::Generating(generator) => write!(f, "Generating ({})", generator),
            Phase::Solving(solver) => write!(f, "Solving ({})", solver),
        }
    }
}

/// Result of a generate-then-solve pass run without animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub generator: Generator,
    pub generator_steps: usize,
    pub solver: Solver,
    pub solver_steps: usize,
    /// Length of the traced path in moves, `None` if the goal was unreachable.
    pub path: Option<usize>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} took {} steps, {} took {} steps: ",
            self.generator, self.generator_steps, self.solver, self.solver_steps
        )?;
        match self.path {
            Some(moves) => write!(f, "path of {} moves", moves),
            None => write!(f, "goal unreachable"),
        }
    }
}

pub struct App {
    grid: Grid,
    generator_engine: GeneratorEngine,
    solver_engine: SolverEngine,
    rng: Pcg32,
    settings: Settings,
    phase: Phase,
    /// Algorithms started by the next `g` / `s` key press.
    generator: Generator,
    solver: Solver,
    heuristic: Heuristic,
    paused: bool,
    /// Fractional steps owed to the running engine.
    step_budget: f64,
    /// Outcome of the last finished run, shown in the status line.
    report: String,
    /// How long to wait for input before advancing the animation again
    input_poll_timeout: Duration,
}

impl App {
    pub fn new(grid: Grid, rng: Pcg32, settings: Settings) -> Self {
        Self {
            grid,
            generator_engine: GeneratorEngine::new(),
            solver_engine: SolverEngine::new(),
            rng,
            settings,
            phase: Phase::Idle,
            generator: Generator::RecurBacktrack,
            solver: Solver::AStar,
            heuristic: Heuristic::default(),
            paused: false,
            step_budget: 0.0,
            report: String::new(),
            input_poll_timeout: Duration::from_millis(16),
        }
    }

    /// Preselects the algorithms started by the `g` and `s` keys.
    pub fn with_selection(
        mut self,
        generator: Generator,
        solver: Solver,
        heuristic: Heuristic,
    ) -> Self {
        self.generator = generator;
        self.solver = solver;
        self.heuristic = heuristic;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Starts the selected generator. Ignored unless idle.
    pub fn start_generator(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.generator_engine
            .init(&mut self.grid, self.generator, &mut self.rng);
        self.phase = Phase::Generating(self.generator);
        self.step_budget = 0.0;
        self.report.clear();
        if self.settings.instant {
            self.finish_run();
        }
    }

    /// Starts the selected solver on the current grid. Ignored unless idle.
    pub fn start_solver(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.solver_engine
            .init(&mut self.grid, self.solver, self.heuristic, &mut self.rng);
        self.phase = Phase::Solving(self.solver);
        self.step_budget = 0.0;
        self.report.clear();
        if self.settings.instant {
            self.finish_run();
        }
    }

    /// Performs one step of the running engine. Returns whether it still runs.
    fn step_once(&mut self) -> bool {
        let running = match self.phase {
            Phase::Idle => return false,
            Phase::Generating(_) => self.generator_engine.step(&mut self.grid, &mut self.rng),
            Phase::Solving(_) => self.solver_engine.step(&mut self.grid, &mut self.rng),
        };
        if !running {
            self.complete_run();
        }
        running
    }

    fn complete_run(&mut self) {
        self.report = match self.phase {
            Phase::Idle => return,
            Phase::Generating(generator) => format!("{} done", generator),
            Phase::Solving(_) => match self.solver_engine.trace(&mut self.grid, Cell::Found) {
                Some(moves) => format!("Path found: {} moves", moves),
                None => "No path to the goal".to_string(),
            },
        };
        self.phase = Phase::Idle;
        self.step_budget = 0.0;
    }

    /// Runs the active algorithm to completion.
    pub fn finish_run(&mut self) {
        while self.step_once() {}
    }

    /// Stops the active algorithm, leaving its partial work in the grid.
    pub fn abandon_run(&mut self) {
        match self.phase {
            Phase::Idle => return,
            Phase::Generating(_) => self.generator_engine.clear(),
            Phase::Solving(_) => self.solver_engine.clear(),
        }
        tracing::info!("{} abandoned", self.phase);
        self.report = format!("{} abandoned", self.phase);
        self.phase = Phase::Idle;
        self.step_budget = 0.0;
    }

    /// Spends the step budget accumulated over `elapsed`. Returns the number of steps taken.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if self.paused || self.phase == Phase::Idle {
            return 0;
        }
        self.step_budget += elapsed.as_secs_f64() * self.settings.steps_per_second as f64;
        let mut steps = 0;
        while self.step_budget >= 1.0 {
            self.step_budget -= 1.0;
            steps += 1;
            if !self.step_once() {
                break;
            }
        }
        steps
    }

    /// Generates with the selected generator, solves with the selected solver and traces the
    /// path, all without animation.
    pub fn run_headless(&mut self) -> Summary {
        self.abandon_run();
        self.generator_engine
            .init(&mut self.grid, self.generator, &mut self.rng);
        let generator_steps = self.generator_engine.finish(&mut self.grid, &mut self.rng);

        self.solver_engine
            .init(&mut self.grid, self.solver, self.heuristic, &mut self.rng);
        let solver_steps = self.solver_engine.finish(&mut self.grid, &mut self.rng);
        let path = self.solver_engine.trace(&mut self.grid, Cell::Found);

        Summary {
            generator: self.generator,
            generator_steps,
            solver: self.solver,
            solver_steps,
            path,
        }
    }

    fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
        let i = options.iter().position(|&o| o == current).unwrap_or(0);
        let next = if forward {
            (i + 1) % options.len()
        } else {
            (i + options.len() - 1) % options.len()
        };
        options[next]
    }

    /// Applies a key press. Returns false when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        tracing::debug!("[app loop] Key pressed: {:?}", key.code);
        match key.code {
            KeyCode::Esc if self.phase == Phase::Idle => return false,
            KeyCode::Esc => self.abandon_run(),
            KeyCode::Char('g') => self.start_generator(),
            KeyCode::Char('s') => self.start_solver(),
            KeyCode::Char('f') => self.finish_run(),
            KeyCode::Char('i') => self.settings.instant = !self.settings.instant,
            KeyCode::Char('h') => {
                self.heuristic = App::cycle(
                    &[Heuristic::Manhattan, Heuristic::Euclidean],
                    self.heuristic,
                    true,
                )
            }
            KeyCode::Tab => self.generator = App::cycle(&Generator::ALL, self.generator, true),
            KeyCode::BackTab => self.generator = App::cycle(&Generator::ALL, self.generator, false),
            KeyCode::Right => self.solver = App::cycle(&Solver::ALL, self.solver, true),
            KeyCode::Left => self.solver = App::cycle(&Solver::ALL, self.solver, false),
            KeyCode::Enter => self.paused = !self.paused,
            KeyCode::Up => self.settings.speed_up(),
            KeyCode::Down => self.settings.slow_down(),
            _ => {}
        }
        true
    }

    pub fn status_line(&self) -> String {
        let mut status = format!(
            "{}{} | {} steps/s{} | next: {} / {}",
            self.phase,
            if self.paused { " [paused]" } else { "" },
            self.settings.steps_per_second,
            if self.settings.instant { " (instant)" } else { "" },
            self.generator,
            self.solver,
        );
        if self.solver.uses_heuristic() {
            status.push_str(&format!(" ({})", self.heuristic));
        }
        if !self.report.is_empty() {
            status.push_str(" | ");
            status.push_str(&self.report);
        }
        status
    }

    /// Set a panic hook to restore terminal state on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop: poll input, advance the running engine by the time elapsed
    /// since the last frame, redraw what changed.
    pub fn run(&mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        tracing::info!(
            "Started main app loop on a {}x{} grid",
            self.grid.width(),
            self.grid.height()
        );
        let mut renderer = Renderer::new();
        self.grid.record_events(true);

        let mut clock = FrameClock::new(Instant::now());
        loop {
            if !renderer.fits(&self.grid)? {
                if !renderer.wait_for_fit(stdout, &self.grid)? {
                    break;
                }
                // Time spent waiting for the resize does not count towards the step budget
                clock.restart(Instant::now());
            }

            if event::poll(self.input_poll_timeout)? {
                match event::read()? {
                    event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if !self.handle_key(key) {
                            break;
                        }
                    }
                    event::Event::Resize(_, _) => renderer.invalidate(),
                    _ => {}
                }
            }

            self.advance(clock.lap(Instant::now()));

            let status = self.status_line();
            renderer.draw(stdout, &mut self.grid, &status)?;
        }

        self.abandon_run();
        self.grid.record_events(false);
        tracing::info!("Exiting main app loop");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app(instant: bool) -> App {
        let settings = Settings {
            steps_per_second: 64,
            instant,
        };
        App::new(Grid::new(11, 9), Pcg32::default(), settings)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut settings = Settings::default();
        (0..10).for_each(|_| settings.speed_up());
        assert_eq!(settings.steps_per_second, Settings::MAX_STEPS_PER_SECOND);
        (0..20).for_each(|_| settings.slow_down());
        assert_eq!(settings.steps_per_second, Settings::MIN_STEPS_PER_SECOND);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Idle.to_string(), "Idle");
        assert_eq!(
            Phase::Generating(Generator::Prim).to_string(),
            "Generating (Prim's Algorithm)"
        );
        assert_eq!(
            Phase::Solving(Solver::Bfs).to_string(),
            "Solving (Breadth-First Search (BFS))"
        );
    }

    #[test]
    fn test_advance_spends_elapsed_time() {
        let mut app = app(false);
        app.start_generator();
        assert_eq!(app.phase(), Phase::Generating(Generator::RecurBacktrack));

        // 64 steps/s for 1/8 s
        assert_eq!(app.advance(Duration::from_millis(125)), 8);
        // Half a step carries over
        assert_eq!(app.advance(Duration::from_nanos(7_812_500)), 0);
        assert_eq!(app.advance(Duration::from_nanos(7_812_500)), 1);
    }

    #[test]
    fn test_frame_clock_skips_time_spent_waiting() {
        let mut app = app(false);
        app.start_generator();

        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0);
        // A long resize wait, then the loop restarts the clock
        let resumed = t0 + Duration::from_secs(10);
        clock.restart(resumed);
        let elapsed = clock.lap(resumed + Duration::from_millis(125));
        assert_eq!(elapsed, Duration::from_millis(125));
        assert_eq!(app.advance(elapsed), 8);
        assert_eq!(clock.lap(resumed + Duration::from_millis(125)), Duration::ZERO);
    }

    #[test]
    fn test_instant_runs_to_completion() {
        let mut app = app(true);
        app.start_generator();
        assert_eq!(app.phase(), Phase::Idle);
        app.start_solver();
        assert_eq!(app.phase(), Phase::Idle);
        assert!(app.status_line().contains("Path found"));
        assert!(app.grid().count(Cell::Found) > 0);
    }

    #[test]
    fn test_start_is_ignored_while_running() {
        let mut app = app(false);
        app.start_generator();
        app.start_solver();
        assert_eq!(app.phase(), Phase::Generating(Generator::RecurBacktrack));
    }

    #[test]
    fn test_keys() {
        let mut app = app(false);
        assert!(press(&mut app, KeyCode::Tab));
        assert_eq!(app.generator, Generator::RecurDiv);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.generator, Generator::Random);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.solver, Solver::Dijkstra);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.heuristic, Heuristic::Euclidean);

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.phase(), Phase::Generating(Generator::Random));
        // Esc abandons the run first, then exits
        assert!(press(&mut app, KeyCode::Esc));
        assert_eq!(app.phase(), Phase::Idle);
        assert!(!press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_finish_and_pause() {
        let mut app = app(false);
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.advance(Duration::from_secs(1)), 0);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.phase(), Phase::Idle);
        assert!(app.status_line().contains("done"));
    }

    #[test]
    fn test_headless_summary() {
        let mut app =
            app(false).with_selection(Generator::Kruskal, Solver::Bfs, Heuristic::Manhattan);
        let summary = app.run_headless();
        assert_eq!(summary.generator, Generator::Kruskal);
        // One step per lattice edge: 5*5 horizontal + 6*4 vertical
        assert_eq!(summary.generator_steps, 49);
        assert!(summary.path.is_some_and(|moves| moves >= 18));
        assert!(summary.to_string().ends_with("moves"));
    }
}
