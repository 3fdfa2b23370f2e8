//! Core types for the AppCenter client.
//!
//! This crate contains pure types with no IO and no async. Wire types mirror
//! the server's JSON bodies; UI types hold transient presentation state that
//! any frontend (TUI, GUI, web view) can render.

pub mod ui;
pub mod wire;

pub use ui::{TOAST_DURATION, Toast};
pub use wire::{LoginRequest, SettingItem, SettingsPage, TokenResponse, UI_TIMEZONE_KEY};
