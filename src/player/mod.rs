//! Player: the interactive terminal loop.
//!
//! Owns a driver and a repeating ticker. Key presses become inputs for the
//! driver, due ticks advance it, and every change is rasterized and painted
//! as a diff against what is already on screen.

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Result, bail};
use crossterm::event::{self, KeyEventKind};
use crossterm::{cursor, execute, queue, style, terminal};
use log::{info, trace};

use crate::config::{Config, KeyBindings};
use crate::engine::ticker::Ticker;
use crate::engine::{Action, Driver};
use crate::menubar::print_menubar;
use crate::renderer::Renderer;
use crate::scenes::Program;
use crate::types::{Cell, CellChange, Color, Style, TerminalContract};

/// Rows reserved above the canvas for the menu bar.
const CANVAS_OFFSET: u16 = 1;
/// Menu bar plus status bar.
const CHROME_ROWS: u16 = 2;
const MIN_WIDTH: u16 = 20;
const MIN_CANVAS_HEIGHT: u16 = 4;

pub struct Player {
    program: Program,
    driver: Driver,
    bindings: KeyBindings,
    ticker: Ticker,
    contract: TerminalContract,
    grid: Vec<Vec<Cell>>,
}

impl Player {
    pub fn new(program: Program, config: &Config) -> Self {
        Self {
            program,
            driver: program.driver(),
            bindings: config.key_bindings.clone(),
            ticker: Ticker::new(config.tick_interval_ms.for_program(program), Instant::now()),
            contract: TerminalContract { width: 0, height: 0 },
            grid: Vec::new(),
        }
    }

    /// Play the program in the terminal.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        self.fit(term_w, term_h)?;
        info!(
            "playing {} on a {}x{} canvas, tick {:?}",
            self.program,
            self.contract.width,
            self.contract.height,
            self.ticker.interval(),
        );

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    /// Size the canvas to the terminal, leaving room for menu and status.
    fn fit(&mut self, term_w: u16, term_h: u16) -> Result<()> {
        if term_w < MIN_WIDTH || term_h < MIN_CANVAS_HEIGHT + CHROME_ROWS {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                MIN_WIDTH,
                MIN_CANVAS_HEIGHT + CHROME_ROWS,
                term_w,
                term_h,
            );
        }
        self.contract = TerminalContract {
            width: term_w,
            height: term_h - CHROME_ROWS,
        };
        self.driver.resize(self.contract.aspect());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.render_full(stdout)?;

        loop {
            let timeout = self.ticker.timeout(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let Some(input) = self.bindings.input_for(&key) else {
                            continue;
                        };
                        match self.driver.on_input(input) {
                            Action::Quit => break,
                            Action::Redraw => self.render_diff(stdout)?,
                            Action::Continue => {}
                        }
                    }
                    event::Event::Resize(w, h) => {
                        // Too small to draw: keep the old layout until it grows back.
                        if self.fit(w, h).is_ok() {
                            self.render_full(stdout)?;
                        }
                    }
                    _ => {}
                }
            }

            let due = self.ticker.due(Instant::now());
            if due > 0 {
                trace!("running {due} tick(s)");
                for _ in 0..due {
                    self.driver.tick();
                }
                self.render_diff(stdout)?;
            }
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn render_full(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        print_menubar(stdout, self.program.menu())?;

        self.grid = Renderer::rasterize(&self.driver.render(), &self.contract);
        for (y, row) in self.grid.iter().enumerate() {
            queue!(stdout, cursor::MoveTo(0, y as u16 + CANVAS_OFFSET))?;
            for cell in row {
                let cs = to_content_style(&cell.style);
                queue!(
                    stdout,
                    style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
                )?;
            }
        }
        self.render_status(stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn render_diff(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let next = Renderer::rasterize(&self.driver.render(), &self.contract);
        let changes = Renderer::diff(&self.grid, &next);
        self.grid = next;
        paint(stdout, &changes)?;
        self.render_status(stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn render_status(&self, stdout: &mut io::Stdout) -> Result<()> {
        let status_y = self.contract.height + CANVAS_OFFSET;
        let scene = self.driver.scene();
        let state = scene.state();
        let mut status = format!(" {} | {}", self.program, scene.title());
        if self.driver.scene_count() > 1 {
            status.push_str(&format!(
                " ({}/{})",
                self.driver.selected().number(),
                self.driver.scene_count()
            ));
        }
        status.push_str(&format!(
            " | tick {} | step {} | {} ",
            state.ticks,
            state.step,
            if state.running { "running" } else { "idle" },
        ));

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            stdout,
            cursor::MoveTo(0, status_y),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        Ok(())
    }
}

fn paint<W: Write>(out: &mut W, changes: &[CellChange]) -> Result<()> {
    for change in changes {
        let cs = to_content_style(&change.cell.style);
        queue!(
            out,
            cursor::MoveTo(change.x, change.y + CANVAS_OFFSET),
            style::PrintStyledContent(style::StyledContent::new(cs, change.cell.ch)),
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    style::ContentStyle {
        foreground_color: s.fg.map(to_ct_color),
        background_color: s.bg.map(to_ct_color),
        ..Default::default()
    }
}

pub fn to_ct_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_carry_colors() {
        let style = Style {
            fg: Some(Color::WHITE),
            bg: Some(Color::unit(1.0, 0.0, 0.0)),
        };
        let cs = to_content_style(&style);
        assert_eq!(cs.foreground_color, Some(style::Color::Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(cs.background_color, Some(style::Color::Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(cs.attributes, style::Attributes::default());

        let blank = to_content_style(&Style::default());
        assert_eq!(blank.foreground_color, None);
        assert_eq!(blank.background_color, None);
    }

    #[test]
    fn paint_writes_changed_glyphs() -> Result<()> {
        let mut out = Vec::new();
        let changes = [CellChange {
            x: 3,
            y: 2,
            cell: Cell {
                ch: 'x',
                style: Style::default(),
            },
        }];
        paint(&mut out, &changes)?;
        let text = String::from_utf8(out)?;
        // Row is offset by the menu bar; ANSI positions are 1-based.
        assert!(text.contains("\u{1b}[4;4H"));
        assert!(text.contains('x'));
        Ok(())
    }

    #[test]
    fn player_starts_without_a_canvas() {
        let player = Player::new(Program::Stories, &Config::default());
        assert_eq!(player.ticker.interval(), std::time::Duration::from_millis(33));
        assert!(player.grid.is_empty());
    }
}
