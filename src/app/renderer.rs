use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::maze::{Cell, Grid, GridEvent};

const CONTROLS: &str = "g/s: generate/solve  Tab/←/→: pick algorithm  h: heuristic  \
i: instant  f: finish  Enter: pause  ↑/↓: speed  Esc: stop/exit";

/// Draws the grid and the status rows below it.
pub struct Renderer {
    /// Whole grid must be repainted on the next draw
    stale: bool,
}

impl Renderer {
    /// Rows reserved below the grid for the status and controls lines
    pub const NUM_LOG_ROWS: u16 = 2;

    pub fn new() -> Self {
        Self { stale: true }
    }

    /// Forces a full repaint, e.g. after a terminal resize.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Whether the terminal can hold the grid and the status rows.
    pub fn fits(&self, grid: &Grid) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        Ok(term_width as u32 >= grid.width() as u32 * Cell::CELL_WIDTH as u32
            && term_height as u32 >= grid.height() as u32 + Renderer::NUM_LOG_ROWS as u32)
    }

    /// Shows a message until the terminal is resized to fit the grid or the user presses Esc.
    /// Returns Ok(true) once the grid fits again
    /// Returns Ok(false) if the user gave up with Esc
    pub fn wait_for_fit(&mut self, stdout: &mut Stdout, grid: &Grid) -> std::io::Result<bool> {
        tracing::debug!("[renderer] Terminal too small, waiting for resize");
        loop {
            let (term_width, term_height) = terminal::size()?;
            let msg = format!(
                "Terminal size ({}x{}) is too small for the grid ({}x{} cells needs {}x{}). \
Please resize the terminal.\r\n",
                term_width,
                term_height,
                grid.width(),
                grid.height(),
                grid.width() as u32 * Cell::CELL_WIDTH as u32,
                grid.height() as u32 + Renderer::NUM_LOG_ROWS as u32,
            );
            queue!(
                stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            stdout.flush()?;

            match event::read()? {
                event::Event::Key(event::KeyEvent {
                    code: KeyCode::Esc,
                    kind: event::KeyEventKind::Press,
                    ..
                }) => return Ok(false),
                event::Event::Resize(_, _) if self.fits(grid)? => {
                    self.stale = true;
                    return Ok(true);
                }
                _ => {}
            }
        }
    }

    fn repaint(stdout: &mut Stdout, grid: &Grid) -> std::io::Result<()> {
        queue!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for row in grid.cells().chunks(grid.width() as usize) {
            for cell in row {
                stdout.queue(style::Print(cell))?;
            }
            stdout.queue(style::Print("\r\n"))?;
        }
        Ok(())
    }

    /// Applies the grid changes recorded since the last draw and rewrites the status rows.
    pub fn draw(
        &mut self,
        stdout: &mut Stdout,
        grid: &mut Grid,
        status: &str,
    ) -> std::io::Result<()> {
        let events = grid.drain_events();
        let filled = events
            .iter()
            .any(|event| matches!(event, GridEvent::Filled { .. }));

        if self.stale || filled {
            Renderer::repaint(stdout, grid)?;
            self.stale = false;
        } else {
            for event in events {
                if let GridEvent::Update { coord, new, .. } = event {
                    queue!(
                        stdout,
                        cursor::MoveTo(coord.0 * Cell::CELL_WIDTH, coord.1),
                        style::Print(new)
                    )?;
                }
            }
        }

        let (term_width, _) = terminal::size()?;
        let (status, _) = status.unicode_truncate(term_width as usize);
        let (controls, _) = CONTROLS.unicode_truncate(term_width as usize);
        queue!(
            stdout,
            cursor::MoveTo(0, grid.height()),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(status.with(Color::Green).attribute(Attribute::Bold)),
            cursor::MoveTo(0, grid.height() + 1),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(controls.with(Color::Cyan)),
        )?;
        stdout.flush()?;
        Ok(())
    }
}
