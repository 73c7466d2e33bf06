//! Platform-aware editing shortcuts.
//!
//! macOS uses Command where Windows and Linux use Control, and a few
//! shortcuts differ entirely (redo, close window, switch window).

use crate::keymap::KeyCode;
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    Copy,
    Paste,
    Cut,
    SelectAll,
    Undo,
    Redo,
    Save,
    Find,
    NewTab,
    CloseTab,
    CloseWindow,
    SwitchWindow,
}

impl Shortcut {
    pub const ALL: [Shortcut; 12] = [
        Shortcut::Copy,
        Shortcut::Paste,
        Shortcut::Cut,
        Shortcut::SelectAll,
        Shortcut::Undo,
        Shortcut::Redo,
        Shortcut::Save,
        Shortcut::Find,
        Shortcut::NewTab,
        Shortcut::CloseTab,
        Shortcut::CloseWindow,
        Shortcut::SwitchWindow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shortcut::Copy => "copy",
            Shortcut::Paste => "paste",
            Shortcut::Cut => "cut",
            Shortcut::SelectAll => "select_all",
            Shortcut::Undo => "undo",
            Shortcut::Redo => "redo",
            Shortcut::Save => "save",
            Shortcut::Find => "find",
            Shortcut::NewTab => "new_tab",
            Shortcut::CloseTab => "close_tab",
            Shortcut::CloseWindow => "close_window",
            Shortcut::SwitchWindow => "switch_window",
        }
    }

    /// Keys to press, in order, on `platform`. Release happens in reverse.
    pub fn keys(self, platform: Platform) -> Vec<KeyCode> {
        use KeyCode as K;
        let mac = platform == Platform::MacOs;
        let primary = if mac { K::Meta } else { K::Control };
        match self {
            Shortcut::Copy => vec![primary, K::KeyC],
            Shortcut::Paste => vec![primary, K::KeyV],
            Shortcut::Cut => vec![primary, K::KeyX],
            Shortcut::SelectAll => vec![primary, K::KeyA],
            Shortcut::Undo => vec![primary, K::KeyZ],
            Shortcut::Redo if mac => vec![K::Meta, K::Shift, K::KeyZ],
            Shortcut::Redo => vec![K::Control, K::KeyY],
            Shortcut::Save => vec![primary, K::KeyS],
            Shortcut::Find => vec![primary, K::KeyF],
            Shortcut::NewTab => vec![primary, K::KeyT],
            Shortcut::CloseTab => vec![primary, K::KeyW],
            Shortcut::CloseWindow if mac => vec![K::Meta, K::KeyQ],
            Shortcut::CloseWindow => vec![K::Alt, K::F4],
            Shortcut::SwitchWindow if mac => vec![K::Meta, K::Tab],
            Shortcut::SwitchWindow => vec![K::Alt, K::Tab],
        }
    }
}

impl FromStr for Shortcut {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Shortcut::ALL
            .into_iter()
            .find(|sc| sc.name() == wanted)
            .ok_or_else(|| format!("unknown shortcut '{s}'"))
    }
}
