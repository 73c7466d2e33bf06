//! Windows monitor enumeration via `EnumDisplayMonitors` / `GetMonitorInfoW`.
//!
//! Coordinates come straight from `rcMonitor`, which is already expressed in
//! the virtual-screen space (the primary's top-left is `(0, 0)`, monitors to
//! its left or above have negative offsets).

use deskpilot_core::RawMonitor;
use windows::Win32::Foundation::{BOOL, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW};

use super::{PlatformScreenEnumerator, ScreenInfoError};

const MONITORINFOF_PRIMARY: u32 = 1;

#[derive(Debug, Default)]
pub struct WindowsScreenEnumerator;

impl WindowsScreenEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformScreenEnumerator for WindowsScreenEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<RawMonitor>, ScreenInfoError> {
        let mut monitors: Vec<RawMonitor> = Vec::new();

        // SAFETY: the callback runs synchronously inside this call and
        // `lParam` points at `monitors`, which outlives it.
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(monitor_enum_proc),
                LPARAM(&mut monitors as *mut Vec<RawMonitor> as isize),
            )
        };
        if !ok.as_bool() {
            return Err(ScreenInfoError::PlatformError(format!(
                "EnumDisplayMonitors failed: {}",
                windows::core::Error::from_win32()
            )));
        }

        // Enumeration order is kept; screen numbering happens in the registry.
        Ok(monitors)
    }
}

unsafe extern "system" fn monitor_enum_proc(hmonitor: HMONITOR, _hdc: HDC, _clip: *mut RECT, lparam: LPARAM) -> BOOL {
    let monitors = &mut *(lparam.0 as *mut Vec<RawMonitor>);

    // SAFETY: MONITORINFOEXW is plain data; zeroed is a valid initial state.
    let mut info: MONITORINFOEXW = std::mem::zeroed();
    info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

    if GetMonitorInfoW(hmonitor, &mut info.monitorInfo).as_bool() {
        let rc = info.monitorInfo.rcMonitor;
        monitors.push(RawMonitor {
            name: device_name(&info.szDevice),
            x: rc.left,
            y: rc.top,
            width: (rc.right - rc.left).max(0) as u32,
            height: (rc.bottom - rc.top).max(0) as u32,
            is_primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
        });
    }

    BOOL(1)
}

fn device_name(raw: &[u16]) -> String {
    let len = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    String::from_utf16_lossy(&raw[..len])
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_name_stops_at_nul() {
        let mut raw = [0u16; 32];
        for (i, c) in r"\\.\DISPLAY1".encode_utf16().enumerate() {
            raw[i] = c;
        }
        assert_eq!(device_name(&raw), r"\\.\DISPLAY1");
    }

    #[test]
    fn test_windows_screen_enumerator_reports_exactly_one_primary() {
        let monitors = WindowsScreenEnumerator::new().enumerate_monitors().expect("enumerate");
        assert!(!monitors.is_empty(), "must find at least one monitor");
        assert_eq!(monitors.iter().filter(|m| m.is_primary).count(), 1);
    }
}
