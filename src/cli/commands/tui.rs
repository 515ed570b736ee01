use anyhow::{Result, bail};
use clap::Args;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use is_terminal::IsTerminal;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::{Duration, Instant};

use crate::cli::Services;
use crate::config::Config;
use crate::tui::{MultiAppRuntime, Route};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Args)]
pub struct TuiCommands {
    /// Route to open first, e.g. /auth or /iniciar-questionario
    #[arg(long, default_value = "/")]
    pub route: String,

    /// Run against an in-memory backend with demo accounts
    #[arg(long)]
    pub demo: bool,
}

impl TuiCommands {
    /// Arguments used when no subcommand is given
    pub fn default_launch() -> Self {
        Self {
            route: Route::Landing.path().to_string(),
            demo: false,
        }
    }
}

pub async fn tui_command(args: TuiCommands, config: &Config) -> Result<()> {
    if !io::stdout().is_terminal() {
        bail!("The TUI needs an interactive terminal");
    }

    let services = if args.demo {
        Services::demo()
    } else {
        Services::connect(config).await?
    };
    let initial = Route::parse(&args.route);
    log::info!("Launching TUI at {}", initial.path());

    launch_tui(services, initial).await
}

async fn launch_tui(services: Services, initial: Route) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runtime = MultiAppRuntime::new(services.session, services.client, initial);

    let result = run_tui(&mut terminal, &mut runtime).await;

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_tui<B: Backend>(terminal: &mut Terminal<B>, runtime: &mut MultiAppRuntime) -> Result<()> {
    // Some terminals repeat non-character keys within a few milliseconds
    let mut last_key_event: Option<(KeyEvent, Instant)> = None;
    const DEDUP_WINDOW_MS: u128 = 10;

    loop {
        let frame_start = Instant::now();

        // Drain input first for minimal latency
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if !matches!(key.code, crossterm::event::KeyCode::Char(_)) {
                        if let Some((last_key, last_time)) = last_key_event {
                            let elapsed = frame_start.duration_since(last_time).as_millis();
                            if elapsed < DEDUP_WINDOW_MS && last_key.code == key.code && last_key.modifiers == key.modifiers {
                                log::debug!("Skipping duplicate key event: {:?} ({}ms since last)", key.code, elapsed);
                                continue;
                            }
                        }
                    }
                    last_key_event = Some((key, frame_start));

                    if !runtime.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    runtime.handle_click(mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        // Async results, session signals, notice expiry
        runtime.tick();
        if runtime.should_quit() {
            return Ok(());
        }

        terminal.draw(|frame| runtime.render(frame))?;

        if let Some(remaining) = FRAME.checked_sub(frame_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
    }
}
