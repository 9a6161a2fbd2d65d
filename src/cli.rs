//! Command-line configuration for the terminal game.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::{GameConfig, DROP_INTERVAL_MIN_MS};

/// Environment variable consulted for the seed when `--seed` is absent.
pub const SEED_ENV: &str = "BLOCKFALL_SEED";

pub const USAGE: &str = "\
usage: blockfall [--seed <u32>] [--lines-per-level <u32>] [--base-drop-ms <u32>]

keys:  left/right move   down soft drop   up rotate   z rotate back
       space hard drop   shift/c hold     enter/r start   q quit";

/// What the binary should do after parsing its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(GameConfig),
    Help,
}

/// Parse arguments (without the program name).
///
/// `seed_fallback` supplies the seed when `--seed` is not given.
pub fn parse_args(args: &[String], seed_fallback: impl FnOnce() -> u32) -> Result<Command> {
    let mut config = GameConfig::default();
    let mut seed = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--seed" => {
                i += 1;
                seed = Some(parse_u32(args.get(i), "--seed")?);
            }
            "--lines-per-level" => {
                i += 1;
                let v = parse_u32(args.get(i), "--lines-per-level")?;
                if v == 0 {
                    return Err(anyhow!("--lines-per-level must be greater than 0"));
                }
                config.lines_per_level = v;
            }
            "--base-drop-ms" => {
                i += 1;
                let v = parse_u32(args.get(i), "--base-drop-ms")?;
                if v < DROP_INTERVAL_MIN_MS {
                    return Err(anyhow!(
                        "--base-drop-ms must be at least {}",
                        DROP_INTERVAL_MIN_MS
                    ));
                }
                config.base_drop_ms = v;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    config.seed = match seed {
        Some(seed) => seed,
        None => seed_fallback(),
    };
    Ok(Command::Play(config))
}

fn parse_u32(value: Option<&String>, flag: &str) -> Result<u32> {
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<u32>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

/// Seed from `BLOCKFALL_SEED` if it parses, otherwise from the clock.
pub fn default_seed() -> u32 {
    std::env::var(SEED_ENV)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(clock_seed)
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    // Fold the high bits in so runs started in the same second still differ.
    (nanos ^ (nanos >> 32)) as u32
}
