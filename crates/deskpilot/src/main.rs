//! deskpilot command-line entry point.
//!
//! Thin wrapper over the library: parses arguments, loads the config file,
//! sets up logging, wires the native backends and runs one command.
//!
//! # Usage
//!
//! ```text
//! deskpilot screens --json
//! deskpilot move 100 50 --screen 1
//! deskpilot click 100 50 --button right
//! deskpilot drag 800 600 --duration-ms 400 --steps 20
//! deskpilot screenshot shot.png --region 0,0,640,480 --screen 1
//! deskpilot hotkey ctrl shift esc
//! deskpilot shortcut copy
//! ```
//!
//! # Screen numbers
//!
//! `--screen 0` (the default) is the primary monitor, `--screen N` the N-th
//! other monitor in OS order, and `--all` the whole virtual desktop with
//! coordinates taken as global.
//!
//! # Environment variable overrides
//!
//! | Variable           | Description                          |
//! |--------------------|--------------------------------------|
//! | `DESKPILOT_LOG`    | `tracing` filter, e.g. `debug`       |
//! | `DESKPILOT_CONFIG` | Config file path                     |

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use deskpilot::infrastructure::logging::init_tracing;
use deskpilot::infrastructure::native_desktop;
use deskpilot::infrastructure::storage::config::{default_config_path, load_config, AppConfig};
use deskpilot::{Desktop, ImageFormat, MouseButton};
use deskpilot_core::domain::selector::screen_table;
use deskpilot_core::{Point, Rect, Shortcut};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Multi-monitor desktop automation.
#[derive(Debug, Parser)]
#[command(name = "deskpilot", about = "Screenshots, pointer and keyboard control across monitors", version)]
struct Cli {
    /// Config file; defaults to the platform config directory.
    #[arg(long, global = true, env = "DESKPILOT_CONFIG")]
    config: Option<PathBuf>,

    /// `tracing` filter directive; overrides `[logging] level`.
    #[arg(long, global = true, env = "DESKPILOT_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// `--screen N` or `--all`.
#[derive(Debug, Clone, Copy, Args)]
struct ScreenArg {
    /// Screen number: 0 is the primary, 1.. the other monitors.
    #[arg(long, default_value_t = 0)]
    screen: usize,

    /// Use the whole virtual desktop with global coordinates.
    #[arg(long, conflicts_with = "screen")]
    all: bool,
}

impl ScreenArg {
    fn selection(self) -> Option<usize> {
        (!self.all).then_some(self.screen)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List monitors with their screen numbers.
    Screens {
        #[arg(long)]
        json: bool,
    },
    /// Print the size of the virtual desktop.
    VirtualSize,
    /// Print the pointer position relative to a screen.
    Position {
        #[command(flatten)]
        screen: ScreenArg,
    },
    /// Move the pointer.
    #[command(allow_negative_numbers = true)]
    Move {
        x: i32,
        y: i32,
        #[command(flatten)]
        screen: ScreenArg,
    },
    /// Click, optionally after moving to X Y.
    #[command(allow_negative_numbers = true)]
    Click {
        #[arg(requires = "y")]
        x: Option<i32>,
        y: Option<i32>,
        #[arg(long, default_value = "left")]
        button: MouseButton,
        #[arg(long, default_value_t = 1)]
        count: u32,
        #[command(flatten)]
        screen: ScreenArg,
    },
    /// Drag from the current position to X Y.
    #[command(allow_negative_numbers = true)]
    Drag {
        x: i32,
        y: i32,
        #[arg(long, default_value = "left")]
        button: MouseButton,
        /// Overrides `[pointer] drag_duration_ms`.
        #[arg(long)]
        duration_ms: Option<u64>,
        /// Overrides `[pointer] drag_steps`.
        #[arg(long)]
        steps: Option<u32>,
        #[command(flatten)]
        screen: ScreenArg,
    },
    /// Scroll; positive dy is up, positive dx is right.
    #[command(allow_negative_numbers = true)]
    Scroll {
        #[arg(long)]
        dx: Option<i32>,
        #[arg(long)]
        dy: Option<i32>,
    },
    /// Capture a screen or region to an image file.
    Screenshot {
        path: PathBuf,
        /// `X,Y,W,H` relative to the selected screen.
        #[arg(long, value_parser = parse_region, allow_hyphen_values = true)]
        region: Option<Rect>,
        #[command(flatten)]
        screen: ScreenArg,
        #[arg(long)]
        format: Option<ImageFormat>,
    },
    /// Press and release one key.
    Press { key: String },
    /// Press keys together, e.g. `ctrl shift esc`.
    Hotkey {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Type text character by character.
    Type {
        text: String,
        /// Overrides `[keyboard] type_interval_ms`.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Send a platform shortcut such as `copy` or `close_window`.
    Shortcut { name: Shortcut },
}

fn parse_region(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(format!("expected X,Y,W,H, got '{s}'"));
    };
    let num = |v: &str| v.parse::<i64>().map_err(|e| format!("'{v}': {e}"));
    let (x, y, w, h) = (num(x)?, num(y)?, num(w)?, num(h)?);
    Ok(Rect::new(
        i32::try_from(x).map_err(|e| e.to_string())?,
        i32::try_from(y).map_err(|e| e.to_string())?,
        u32::try_from(w).map_err(|_| format!("width must not be negative, got {w}"))?,
        u32::try_from(h).map_err(|_| format!("height must not be negative, got {h}"))?,
    ))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path().context("locating the config file")?,
    };
    let config = load_config(&config_path).with_context(|| format!("loading {}", config_path.display()))?;

    init_tracing(cli.log_level.as_deref(), &config.logging)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("initializing logging")?;

    let desktop = native_desktop().context("opening the native desktop backends")?;
    run(&desktop, &config, cli.command)
}

fn run(desktop: &Desktop, config: &AppConfig, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Screens { json } => {
            let snapshot = desktop.screens().snapshot()?;
            let table = screen_table(&snapshot);
            if json {
                let listing: Vec<_> = table
                    .iter()
                    .enumerate()
                    .map(|(n, &raw)| serde_json::json!({ "screen": n, "monitor": &snapshot.monitors()[raw] }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for (n, &raw) in table.iter().enumerate() {
                    let m = &snapshot.monitors()[raw];
                    let primary = if m.is_primary() { " (primary)" } else { "" };
                    println!("{n}: {} {}x{} at {}{primary}", m.name(), m.width(), m.height(), m.origin());
                }
            }
        }
        Command::VirtualSize => {
            let (w, h) = desktop.screens().get_virtual_screen_size()?;
            println!("{w}x{h}");
        }
        Command::Position { screen } => {
            println!("{}", desktop.pointer().get_position(screen.selection())?);
        }
        Command::Move { x, y, screen } => {
            desktop.pointer().move_to(x, y, screen.selection())?;
        }
        Command::Click {
            x,
            y,
            button,
            count,
            screen,
        } => {
            let at = x.zip(y).map(|(x, y)| Point::new(x, y));
            desktop.pointer().click(button, count, at, screen.selection())?;
        }
        Command::Drag {
            x,
            y,
            button,
            duration_ms,
            steps,
            screen,
        } => {
            let mut opts = config.pointer.drag_options().with_button(button);
            if let Some(ms) = duration_ms {
                opts = opts.with_duration(Duration::from_millis(ms));
            }
            if let Some(steps) = steps {
                opts = opts.with_steps(steps);
            }
            desktop.pointer().drag_to(x, y, opts, screen.selection())?;
        }
        Command::Scroll { dx, dy } => match (dx, dy) {
            (None, None) => desktop.pointer().scroll_down(config.pointer.scroll_amount)?,
            (dx, dy) => desktop.pointer().scroll(dx.unwrap_or(0), dy.unwrap_or(0))?,
        },
        Command::Screenshot {
            path,
            region,
            screen,
            format,
        } => {
            let format = format.or_else(|| ImageFormat::from_path(&path)).unwrap_or(config.capture.default_format);
            let written = desktop
                .capture()
                .screenshot_to_file(&path, region, screen.selection(), Some(format))
                .with_context(|| format!("saving screenshot to {}", path.display()))?;
            info!(path = %written.display(), "screenshot written");
            println!("{}", written.display());
        }
        Command::Press { key } => desktop.keyboard().press(&key)?,
        Command::Hotkey { keys } => desktop.keyboard().hotkey(keys.as_slice())?,
        Command::Type { text, interval_ms } => {
            let interval = interval_ms.map_or_else(|| config.keyboard.type_interval(), Duration::from_millis);
            desktop.keyboard().type_text(&text, interval)?;
        }
        Command::Shortcut { name } => desktop.keyboard().shortcut(name)?,
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_defaults_to_primary() {
        // Arrange / Act
        let cli = Cli::parse_from(["deskpilot", "position"]);

        // Assert
        match cli.command {
            Command::Position { screen } => assert_eq!(screen.selection(), Some(0)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_all_flag_selects_combined_desktop() {
        let cli = Cli::parse_from(["deskpilot", "move", "--all", "2000", "10"]);
        match cli.command {
            Command::Move { x, screen, .. } => {
                assert_eq!(x, 2000);
                assert_eq!(screen.selection(), None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_screen_and_all_conflict() {
        assert!(Cli::try_parse_from(["deskpilot", "position", "--screen", "1", "--all"]).is_err());
    }

    #[test]
    fn test_move_accepts_negative_coordinates() {
        let cli = Cli::parse_from(["deskpilot", "move", "-5", "-10", "--screen", "1"]);
        assert!(matches!(cli.command, Command::Move { x: -5, y: -10, .. }));
    }

    #[test]
    fn test_click_parses_button_name() {
        let cli = Cli::parse_from(["deskpilot", "click", "10", "20", "--button", "Right", "--count", "2"]);
        match cli.command {
            Command::Click { x, y, button, count, .. } => {
                assert_eq!((x, y), (Some(10), Some(20)));
                assert_eq!(button, MouseButton::Right);
                assert_eq!(count, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_button_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["deskpilot", "click", "--button", "back"]).is_err());
    }

    #[test]
    fn test_shortcut_name_is_parsed() {
        let cli = Cli::parse_from(["deskpilot", "shortcut", "close-window"]);
        assert!(matches!(cli.command, Command::Shortcut { name: Shortcut::CloseWindow }));
    }

    #[test]
    fn test_hotkey_requires_at_least_one_key() {
        assert!(Cli::try_parse_from(["deskpilot", "hotkey"]).is_err());
    }

    #[test]
    fn test_parse_region_accepts_four_numbers() {
        assert_eq!(parse_region("100, 50,200,100").unwrap(), Rect::new(100, 50, 200, 100));
        assert_eq!(parse_region("-10,0,5,5").unwrap(), Rect::new(-10, 0, 5, 5));
    }

    #[test]
    fn test_parse_region_rejects_bad_input() {
        assert!(parse_region("1,2,3").is_err());
        assert!(parse_region("1,2,-3,4").is_err());
        assert!(parse_region("a,b,c,d").is_err());
    }

    #[test]
    fn test_log_level_flag_is_global() {
        let cli = Cli::parse_from(["deskpilot", "virtual-size", "--log-level", "debug"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
