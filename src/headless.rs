// Headless mode - drive the feed without a terminal UI
//
// Uses the same controller as the TUI with a viewport that is always at the
// bottom, so every step asks for the next page. Each post is written to the
// given writer as one JSON object per line (a PostCard). The run stops after
// `max_pages` successful pages, on the first empty page, or on a failure.

use crate::config::ImageConfig;
use crate::feed::{
    FeedController, FetchCompletion, LoadOutcome, PostCard, PostSource, ViewportMetrics,
};
use anyhow::{Context, Result};
use std::io::Write;

/// Viewport that has always reached the bottom of its content
struct AlwaysAtBottom;

impl ViewportMetrics for AlwaysAtBottom {
    fn viewport_height(&self) -> usize {
        0
    }

    fn scroll_offset(&self) -> usize {
        0
    }

    fn content_height(&self) -> usize {
        0
    }
}

/// How a headless run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub pages_loaded: u32,
    pub posts_written: usize,
    /// Error text if the run stopped on a failure
    pub error: Option<String>,
}

/// Load up to `max_pages` pages and write their cards to `out`
pub async fn run<W: Write>(
    source: &dyn PostSource,
    page_size: u32,
    max_pages: u32,
    image: &ImageConfig,
    out: &mut W,
) -> Result<HeadlessSummary> {
    let mut controller = FeedController::new(page_size);
    let mut summary = HeadlessSummary {
        pages_loaded: 0,
        posts_written: 0,
        error: None,
    };

    while summary.pages_loaded < max_pages {
        let Some(request) = controller.on_scroll(&AlwaysAtBottom) else {
            break;
        };

        let result = source.fetch_posts(request.page, request.limit).await;
        let already = controller.posts().len();

        match controller.complete(FetchCompletion { request, result }) {
            LoadOutcome::Appended(_) => {
                let mut rng = rand::thread_rng();
                for post in &controller.posts()[already..] {
                    let card = PostCard::new(post, &mut rng, image);
                    let line = serde_json::to_string(&card).context("Failed to encode card")?;
                    writeln!(out, "{}", line).context("Failed to write output")?;
                    summary.posts_written += 1;
                }
                summary.pages_loaded += 1;
            }
            LoadOutcome::Empty => {
                tracing::info!("No more posts after page {}", controller.page() - 1);
                break;
            }
            LoadOutcome::Failed => {
                summary.error = Some(controller.error_message().to_string());
                break;
            }
            LoadOutcome::Ignored => break,
        }
    }

    out.flush().context("Failed to flush output")?;
    Ok(summary)
}
