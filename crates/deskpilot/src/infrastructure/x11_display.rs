//! Shared Xlib connection handling for the Linux backends.

use std::ffi::CStr;

use deskpilot_core::DisplayServer;
use tracing::warn;
use x11::xlib;

/// An open Xlib connection, closed on drop.
pub(crate) struct XDisplay {
    raw: *mut xlib::Display,
}

// SAFETY: the connection is only touched through `&self` methods by one
// thread at a time; every long-lived owner wraps it in a `Mutex`.
unsafe impl Send for XDisplay {}

impl XDisplay {
    /// Opens the display named by `DISPLAY`.
    pub(crate) fn open() -> Result<Self, String> {
        if DisplayServer::detect() == DisplayServer::Wayland {
            warn!("Wayland session detected; only XWayland clients are reachable through X11");
        }

        // SAFETY: a null name makes Xlib read `DISPLAY`. The pointer is
        // released exactly once in `Drop`.
        let raw = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if raw.is_null() {
            let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            return Err(format!("XOpenDisplay failed; DISPLAY={display_env}"));
        }
        Ok(Self { raw })
    }

    pub(crate) fn as_ptr(&self) -> *mut xlib::Display {
        self.raw
    }

    pub(crate) fn root(&self) -> xlib::Window {
        // SAFETY: `raw` is a live connection.
        unsafe { xlib::XDefaultRootWindow(self.raw) }
    }

    /// Size of the default screen's root window, which spans every
    /// XRandR monitor.
    pub(crate) fn root_size(&self) -> (i32, i32) {
        // SAFETY: `raw` is a live connection.
        unsafe {
            let screen = xlib::XDefaultScreen(self.raw);
            (xlib::XDisplayWidth(self.raw, screen), xlib::XDisplayHeight(self.raw, screen))
        }
    }

    /// Resolves an atom to its name; empty when the server has none.
    pub(crate) fn atom_name(&self, atom: xlib::Atom) -> String {
        if atom == 0 {
            return String::new();
        }
        // SAFETY: `raw` is live; the returned string is freed with `XFree`.
        unsafe {
            let ptr = xlib::XGetAtomName(self.raw, atom);
            if ptr.is_null() {
                return String::new();
            }
            let name = CStr::from_ptr(ptr).to_string_lossy().into_owned();
            xlib::XFree(ptr.cast());
            name
        }
    }

    pub(crate) fn flush(&self) {
        // SAFETY: `raw` is a live connection.
        unsafe {
            xlib::XFlush(self.raw);
        }
    }
}

impl Drop for XDisplay {
    fn drop(&mut self) {
        // SAFETY: `raw` came from `XOpenDisplay` and is not used afterwards.
        unsafe {
            xlib::XCloseDisplay(self.raw);
        }
    }
}
