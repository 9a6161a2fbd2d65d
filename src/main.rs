//! Terminal blockfall runner (default binary).
//!
//! Reads keys with crossterm, queues them as game actions, advances the
//! simulation once per frame, and draws through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::cli::{self, Command};
use blockfall::core::{GameLoop, GameState};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{GameView, TerminalPresenter, TerminalRenderer};
use blockfall::types::{GameConfig, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match cli::parse_args(&args, cli::default_seed) {
        Ok(Command::Play(config)) => config,
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("[blockfall] {}", e);
            eprintln!("{}", cli::USAGE);
            std::process::exit(2);
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let mut presenter = TerminalPresenter::new(term, GameView::default());

    let result = run(&mut presenter, config);

    // Always try to restore terminal state.
    let _ = presenter.terminal().exit();

    match result {
        Ok(state) => {
            report(&state);
            Ok(())
        }
        Err(e) => {
            eprintln!("[blockfall] error: {:#}", e);
            Err(e)
        }
    }
}

fn run(presenter: &mut TerminalPresenter, config: GameConfig) -> Result<GameState> {
    let mut game = GameLoop::new(config);

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    presenter.resize(w, h);

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        let timeout = frame.saturating_sub(last_frame.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(game.state().clone());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.push(action);
                    }
                }
                Event::Resize(w, h) => presenter.resize(w, h),
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            game.frame(elapsed_ms, presenter)?;
        }
    }
}

fn report(state: &GameState) {
    eprintln!(
        "[blockfall] seed={} phase={} score={} level={} lines={} pieces={} runs={}",
        state.seed(),
        state.phase().as_str(),
        state.score(),
        state.level(),
        state.lines(),
        state.pieces_locked(),
        state.runs_started(),
    );
}
