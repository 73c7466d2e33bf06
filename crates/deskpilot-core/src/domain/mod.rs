//! Domain entities for the multi-monitor coordinate model.
//!
//! Pure logic only: no OS calls, no I/O, no clocks. Every value in here is
//! request-scoped; a [`snapshot::ScreenSnapshot`] is built from a fresh
//! enumeration, used for one operation and dropped.
//!
//! # Coordinate spaces (for beginners)
//!
//! - *Global* (virtual-desktop) coordinates: one plane shared by all
//!   monitors. Its origin is wherever the OS puts it, usually the primary
//!   monitor's top-left corner, and other monitors may have negative offsets.
//! - *Local* coordinates: relative to the top-left corner of one monitor.
//!
//! A [`frame::ResolvedFrame`] says which of the two a position or region is
//! expressed in.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod monitor;
pub mod pixels;
pub mod selector;
pub mod snapshot;
pub mod translate;
