//! KeyboardService: key presses, combinations, text typing and shortcuts.
//!
//! Screen-independent: events go to whatever window has focus.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use deskpilot_core::{control_char_key, parse_key, Key, Platform, Shortcut};
use tracing::{debug, warn};

use crate::application::emulate_input::PlatformInputEmulator;
use crate::application::error::{AutomationError, Result};

/// Keyboard use case.
#[derive(Clone)]
pub struct KeyboardService {
    emulator: Arc<dyn PlatformInputEmulator>,
    platform: Platform,
}

impl KeyboardService {
    /// Shortcuts follow the platform this binary was built for.
    pub fn new(emulator: Arc<dyn PlatformInputEmulator>) -> Self {
        Self::for_platform(emulator, Platform::current())
    }

    /// Uses `platform`'s shortcut conventions regardless of the host.
    pub fn for_platform(emulator: Arc<dyn PlatformInputEmulator>, platform: Platform) -> Self {
        Self { emulator, platform }
    }

    fn emit(&self, key: Key, pressed: bool) -> Result<()> {
        let result = match key {
            Key::Named(code) => self.emulator.emit_key(code, pressed),
            Key::Char(ch) => self.emulator.emit_char(ch, pressed),
        };
        let verb = if pressed { "press" } else { "release" };
        result.map_err(|e| AutomationError::injection(format!("{verb} key {key}"), e))
    }

    /// Presses and releases one key.
    pub fn press(&self, key: &str) -> Result<()> {
        let key = parse_key(key)?;
        self.emit(key, true)?;
        self.emit(key, false)
    }

    /// Presses a key and leaves it held.
    pub fn key_down(&self, key: &str) -> Result<()> {
        self.emit(parse_key(key)?, true)
    }

    pub fn key_up(&self, key: &str) -> Result<()> {
        self.emit(parse_key(key)?, false)
    }

    /// Presses every key in order, then releases them in reverse.
    ///
    /// All names are validated before anything is sent. If a press fails,
    /// the keys already held are released before the error is returned.
    pub fn hotkey<S: AsRef<str>>(&self, keys: &[S]) -> Result<()> {
        let keys = keys
            .iter()
            .map(|k| parse_key(k.as_ref()))
            .collect::<Result<Vec<Key>, _>>()?;
        self.chord(&keys)
    }

    fn chord(&self, keys: &[Key]) -> Result<()> {
        debug!(?keys, "key chord");
        let mut held: Vec<Key> = Vec::with_capacity(keys.len());
        for &key in keys {
            if let Err(e) = self.emit(key, true) {
                self.release_all(&held);
                return Err(e);
            }
            held.push(key);
        }

        let mut first_err = None;
        for &key in held.iter().rev() {
            if let Err(e) = self.emit(key, false) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn release_all(&self, held: &[Key]) {
        for &key in held.iter().rev() {
            if let Err(e) = self.emit(key, false) {
                warn!(%key, error = %e, "could not release key after failed chord");
            }
        }
    }

    /// Types `text` one character at a time, pausing `interval` between
    /// characters.
    ///
    /// Line breaks are sent as Enter and tabs as Tab; everything else is a
    /// unicode character event.
    pub fn type_text(&self, text: &str, interval: Duration) -> Result<()> {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            let key = control_char_key(ch).map_or(Key::Char(ch), Key::Named);
            self.emit(key, true)?;
            self.emit(key, false)?;
            if !interval.is_zero() && chars.peek().is_some() {
                thread::sleep(interval);
            }
        }
        Ok(())
    }

    /// Sends the platform's combination for `shortcut`.
    pub fn shortcut(&self, shortcut: Shortcut) -> Result<()> {
        let keys: Vec<Key> = shortcut.keys(self.platform).into_iter().map(Key::Named).collect();
        self.chord(&keys)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
