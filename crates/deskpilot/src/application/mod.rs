//! Application layer: use cases and the ports they drive.
//!
//! # What lives here?
//!
//! - **`screens`** – monitor queries (`get_screen_size`, `get_all_screens`,
//!   ...) on top of the `PlatformScreenEnumerator` port.
//! - **`capture`** – screenshots of a screen, a region or the whole desktop,
//!   via the `PlatformCapturer` and `PixelEncoder` ports.
//! - **`pointer`** – moves, clicks, drags and scrolling in screen-local
//!   coordinates.
//! - **`keyboard`** – key presses, hotkeys, text and platform shortcuts.
//! - **`emulate_input`** – the `PlatformInputEmulator` port shared by
//!   `pointer` and `keyboard`.
//! - **`desktop`** – a facade bundling all four services.
//!
//! Nothing in this layer calls the OS directly; adapters are injected as
//! `Arc<dyn Trait>` so tests can swap in mocks.

pub mod capture;
pub mod desktop;
pub mod emulate_input;
pub mod error;
pub mod keyboard;
pub mod pointer;
pub mod screens;
