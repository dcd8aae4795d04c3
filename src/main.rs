//! Terminal Volley entry point
//!
//! Loads controls, puts the terminal in raw mode and runs the fixed-rate
//! game loop until the quit key (or Ctrl+C) is pressed. Ctrl+C exits with
//! status 130 like a SIGINT would.

use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use terminal_volley::consts::{COURT_HEIGHT, COURT_WIDTH};
use terminal_volley::input::{self, KeyInput, RawTerminal};
use terminal_volley::renderer::{Renderer, compose};
use terminal_volley::{ControlsConfig, Game, settings};

/// Fixed-rate deadline ticker
///
/// Deadlines advance by a whole period each tick so sleep jitter doesn't
/// accumulate; after a stall the schedule restarts from now instead of
/// bursting through the missed ticks.
struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    fn new(rate: u32) -> Self {
        let period = Duration::from_secs(1) / rate.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

/// Status reported when Ctrl+C ends the game (128 + SIGINT)
const INTERRUPTED_STATUS: u8 = 130;

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Quit,
    Interrupted,
    OutputClosed,
}

impl Exit {
    fn status(self) -> u8 {
        match self {
            Exit::Interrupted => INTERRUPTED_STATUS,
            Exit::Quit | Exit::OutputClosed => 0,
        }
    }

    /// The score goes to stdout only after a normal quit
    fn prints_score(self) -> bool {
        self == Exit::Quit
    }
}

fn run<W: Write>(
    game: &mut Game,
    renderer: &mut Renderer<W>,
    quit_key: u8,
    tick_rate: u32,
) -> io::Result<Exit> {
    let mut ticker = Ticker::new(tick_rate);
    loop {
        for key in input::drain_keys()? {
            match key {
                KeyInput::Interrupt => return Ok(Exit::Interrupted),
                KeyInput::Byte(b) if b.to_ascii_uppercase() == quit_key => {
                    return Ok(Exit::Quit);
                }
                KeyInput::Byte(b) => game.handle_key_event(b),
            }
        }

        game.step();

        match renderer.draw(&compose(game)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(Exit::OutputClosed),
            Err(e) => return Err(e),
        }

        ticker.wait();
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();
    log::info!("Terminal Volley starting...");

    let controls_path = settings::controls_path();
    let controls = ControlsConfig::load_or_default(&controls_path)?.resolve()?;
    let tick_rate = settings::tick_rate();
    log::info!(
        "Court {}x{} at {} ticks/s",
        COURT_WIDTH,
        COURT_HEIGHT,
        tick_rate
    );

    let mut game = Game::new(COURT_WIDTH, COURT_HEIGHT, tick_rate, controls.game);
    let mut renderer = Renderer::new(
        io::stdout().lock(),
        COURT_WIDTH as usize,
        COURT_HEIGHT as usize,
    );

    let mut raw = RawTerminal::enable()?;
    renderer.hide_cursor()?;

    let outcome = run(&mut game, &mut renderer, controls.quit, tick_rate);

    // Put the terminal back before reporting anything
    let left = renderer.leave();
    raw.restore()?;

    let exit = outcome?;
    if let Err(e) = left {
        if e.kind() != io::ErrorKind::BrokenPipe {
            return Err(e.into());
        }
    }

    match exit {
        Exit::Quit => log::info!("Quit"),
        Exit::Interrupted => log::info!("Interrupted"),
        Exit::OutputClosed => log::warn!("Output closed"),
    }
    if exit.prints_score() {
        let (p1, p2) = game.score();
        println!("Final score  P1 {p1} : {p2} P2");
    }
    Ok(ExitCode::from(exit.status()))
}
