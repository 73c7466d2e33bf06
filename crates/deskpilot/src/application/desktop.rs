//! `Desktop`: the four services wired to one set of platform adapters.

use std::sync::Arc;

use crate::application::capture::{CaptureService, PixelEncoder, PlatformCapturer};
use crate::application::emulate_input::PlatformInputEmulator;
use crate::application::keyboard::KeyboardService;
use crate::application::pointer::PointerService;
use crate::application::screens::{PlatformScreenEnumerator, ScreenService};

/// Entry point for callers that want screens, capture, pointer and keyboard
/// from one value.
///
/// ```ignore
/// let desktop = deskpilot::infrastructure::native_desktop()?;
/// desktop.pointer().click_at(500, 300, MouseButton::Left, Some(1))?;
/// let shot = desktop.capture().screenshot(None, Some(1))?;
/// ```
#[derive(Clone)]
pub struct Desktop {
    screens: ScreenService,
    capture: CaptureService,
    pointer: PointerService,
    keyboard: KeyboardService,
}

impl Desktop {
    pub fn new(
        enumerator: Arc<dyn PlatformScreenEnumerator>,
        capturer: Arc<dyn PlatformCapturer>,
        emulator: Arc<dyn PlatformInputEmulator>,
        encoder: Arc<dyn PixelEncoder>,
    ) -> Self {
        let screens = ScreenService::new(enumerator);
        Self {
            capture: CaptureService::new(screens.clone(), capturer, encoder),
            pointer: PointerService::new(screens.clone(), Arc::clone(&emulator)),
            keyboard: KeyboardService::new(emulator),
            screens,
        }
    }

    pub fn screens(&self) -> &ScreenService {
        &self.screens
    }

    pub fn capture(&self) -> &CaptureService {
        &self.capture
    }

    pub fn pointer(&self) -> &PointerService {
        &self.pointer
    }

    pub fn keyboard(&self) -> &KeyboardService {
        &self.keyboard
    }
}
