//! Component trait system for the TUI
//!
//! App is the orchestrator: it owns the feed controller and routes input.
//! Panels declare their capabilities through traits instead of App knowing
//! how to render, scroll, or copy each of them.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                     App                      │
//! │  (routes input, drives the feed controller)  │
//! └──────────────────────────────────────────────┘
//!                        │
//!              ┌─────────┴─────────┐
//!              ▼                   ▼
//!        ┌──────────┐        ┌──────────┐
//!        │   Feed   │        │   Logs   │
//!        │  Panel   │        │  Panel   │
//!        └──────────┘        └──────────┘
//! ```
//!
//! - [`Component`] - render + identity
//! - [`Scrollable`] / [`Selectable`] - scroll and selection over content
//! - [`Copyable`] - clipboard content
//! - [`Interactive`] - keyboard input

mod component;
mod copyable;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::{copy_to_clipboard, Copyable};
pub use interactive::{Handled, Interactive};
pub use scrollable::{Scrollable, Selectable};
