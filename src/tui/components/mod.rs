// Components module - reusable UI building blocks
//
// Shell components are rendered every frame:
// - Title bar: app name, loading indicator, source
// - Status bar: feed state, counters, key hints
//
// Panels (feed, logs) own their state and implement the component traits.

pub mod feed_panel;
pub mod logs_panel;
pub mod post_card;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use feed_panel::{FeedPanel, FeedStatus};
pub use logs_panel::LogsPanel;
pub use toast::Toast;
