//! Host platform and display-server detection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
    MacOs,
    Unknown,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unknown
        }
    }
}

/// Linux display server. Wayland exposes no enumerable global monitor
/// geometry to ordinary clients, so the native backends only speak X11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayServer {
    X11,
    Wayland,
    NotApplicable,
}

impl DisplayServer {
    /// Reads `XDG_SESSION_TYPE` on Linux.
    pub fn detect() -> Self {
        Self::from_session_type(Platform::current(), std::env::var("XDG_SESSION_TYPE").ok().as_deref())
    }

    /// Anything other than an explicit `wayland` session counts as X11.
    pub fn from_session_type(platform: Platform, session_type: Option<&str>) -> Self {
        if platform != Platform::Linux {
            return DisplayServer::NotApplicable;
        }
        match session_type {
            Some(s) if s.eq_ignore_ascii_case("wayland") => DisplayServer::Wayland,
            _ => DisplayServer::X11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wayland_session_detected_case_insensitively() {
        assert_eq!(
            DisplayServer::from_session_type(Platform::Linux, Some("Wayland")),
            DisplayServer::Wayland
        );
    }

    #[test]
    fn test_missing_or_other_session_type_is_x11() {
        assert_eq!(DisplayServer::from_session_type(Platform::Linux, None), DisplayServer::X11);
        assert_eq!(DisplayServer::from_session_type(Platform::Linux, Some("tty")), DisplayServer::X11);
    }

    #[test]
    fn test_non_linux_has_no_display_server() {
        assert_eq!(
            DisplayServer::from_session_type(Platform::Windows, Some("wayland")),
            DisplayServer::NotApplicable
        );
    }

    #[test]
    fn test_current_platform_matches_target() {
        #[cfg(target_os = "linux")]
        assert_eq!(Platform::current(), Platform::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(Platform::current(), Platform::MacOs);
        #[cfg(target_os = "windows")]
        assert_eq!(Platform::current(), Platform::Windows);
    }
}
