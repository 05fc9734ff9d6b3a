//! Post feed: remote source, pagination controller and card rendering
//!
//! # Architecture
//!
//! ```text
//! PostSource (HTTP GET ?_page&_limit)
//!     │  spawned fetch, completion over mpsc
//!     ▼
//! FeedController (page, limit, loading, error text, posts)
//!     ▲                              │
//!     │ ViewportMetrics              │ appended posts
//!     │ (scroll signal)              ▼
//! ScrollState (TUI)              PostCard (title, body, image URL)
//! ```
//!
//! The controller is a plain synchronous state machine. It never performs I/O
//! itself: it hands out `PageRequest`s and is told about their completion.
//! That keeps it deterministic under test and lets the UI loop stay the only
//! task that mutates it.

pub mod card;
pub mod client;
pub mod controller;
pub mod loader;
pub mod model;

pub use card::PostCard;
pub use client::{FetchError, HttpPostSource, PostSource};
pub use controller::{
    FeedController, FeedState, FetchCompletion, LoadOutcome, PageRequest, ViewportMetrics,
};
pub use loader::Loader;
pub use model::Post;
