//! Pagination controller for the infinite-scroll feed
//!
//! Owns the page counter, the accumulated posts, the loading flag and the
//! user-facing error text. It only decides *whether* to fetch; the caller
//! runs the request and reports back through [`FeedController::complete`].
//!
//! # Events
//!
//! | Event                      | Effect                                          |
//! |----------------------------|-------------------------------------------------|
//! | mount / retry              | request `(page, limit)` unless loading          |
//! | scroll signal              | same, but only when the viewport is at bottom   |
//! | success, non-empty         | append, `page += 1`, clear error                |
//! | success, empty             | nothing beyond clearing loading                 |
//! | failure                    | set fixed error text, keep posts and page       |
//!
//! An empty page does not advance `page`, so the next trigger asks for the
//! same page again. There is no end-of-feed state.

use super::client::FetchError;
use super::model::Post;

/// Text shown whenever a page fails to load
pub const FETCH_ERROR_MESSAGE: &str =
    "Something went wrong while fetching posts. Please try again later!";

/// Posts requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Read-only view of the scrollable surface the feed is drawn on
///
/// All three quantities use the same unit (terminal lines in the TUI).
pub trait ViewportMetrics {
    /// Height of the visible window
    fn viewport_height(&self) -> usize;

    /// Distance from the top of the content to the top of the window
    fn scroll_offset(&self) -> usize;

    /// Total height of the rendered content
    fn content_height(&self) -> usize;

    /// Whether the bottom of the window has reached the bottom of the content
    fn reached_bottom(&self) -> bool {
        self.viewport_height() + self.scroll_offset() >= self.content_height()
    }
}

/// One page to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// Result of a fetch, tagged with the request that produced it
#[derive(Debug)]
pub struct FetchCompletion {
    pub request: PageRequest,
    pub result: Result<Vec<Post>, FetchError>,
}

/// Coarse controller state for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Loading,
    Error,
}

impl FeedState {
    pub fn label(&self) -> &'static str {
        match self {
            FeedState::Idle => "idle",
            FeedState::Loading => "loading",
            FeedState::Error => "error",
        }
    }
}

/// What a completion did to the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Posts were appended and the page advanced
    Appended(usize),
    /// The page came back empty; nothing changed
    Empty,
    /// The fetch failed; error text is set
    Failed,
    /// Completion did not match the outstanding request
    Ignored,
}

/// Infinite-scroll pagination state
#[derive(Debug)]
pub struct FeedController {
    posts: Vec<Post>,
    page: u32,
    limit: u32,
    in_flight: Option<PageRequest>,
    error_message: String,
    requests_issued: u64,
}

impl FeedController {
    /// Fresh controller at page 1 with nothing loaded
    ///
    /// A zero limit is bumped to 1.
    pub fn new(limit: u32) -> Self {
        Self {
            posts: Vec::new(),
            page: 1,
            limit: limit.max(1),
            in_flight: None,
            error_message: String::new(),
            requests_issued: 0,
        }
    }

    /// Initial load when the feed is first shown
    pub fn mount(&mut self) -> Option<PageRequest> {
        self.begin_load()
    }

    /// Manual reload of the current page (same guard as scrolling)
    pub fn retry(&mut self) -> Option<PageRequest> {
        self.begin_load()
    }

    /// React to a scroll-position change
    ///
    /// Returns a request only when the viewport has reached the bottom of the
    /// content and nothing is loading.
    pub fn on_scroll(&mut self, viewport: &dyn ViewportMetrics) -> Option<PageRequest> {
        if self.is_loading() || !viewport.reached_bottom() {
            return None;
        }
        self.begin_load()
    }

    fn begin_load(&mut self) -> Option<PageRequest> {
        if self.is_loading() {
            tracing::trace!("Load skipped: page {} still in flight", self.page);
            return None;
        }

        let request = PageRequest {
            page: self.page,
            limit: self.limit,
        };
        self.in_flight = Some(request);
        self.requests_issued += 1;
        tracing::debug!("Requesting page {} (limit {})", request.page, request.limit);

        Some(request)
    }

    /// Apply the result of the outstanding request
    ///
    /// Always clears the loading flag when the completion matches the
    /// outstanding request. A completion for anything else is dropped.
    pub fn complete(&mut self, completion: FetchCompletion) -> LoadOutcome {
        if self.in_flight != Some(completion.request) {
            tracing::warn!(
                "Ignoring completion for page {} (outstanding: {:?})",
                completion.request.page,
                self.in_flight.map(|r| r.page)
            );
            return LoadOutcome::Ignored;
        }
        self.in_flight = None;

        match completion.result {
            Ok(posts) if posts.is_empty() => {
                tracing::info!("Page {} came back empty", completion.request.page);
                LoadOutcome::Empty
            }
            Ok(posts) => {
                let count = posts.len();
                self.posts.extend(posts);
                self.page += 1;
                self.error_message.clear();
                tracing::info!(
                    "Loaded page {} ({} posts, {} total)",
                    completion.request.page,
                    count,
                    self.posts.len()
                );
                LoadOutcome::Appended(count)
            }
            Err(e) => {
                tracing::error!("Error fetching posts: {}", e);
                self.error_message = FETCH_ERROR_MESSAGE.to_string();
                LoadOutcome::Failed
            }
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Next page to request
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Error text, empty when no error is active
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Number of page requests handed out so far
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    pub fn state(&self) -> FeedState {
        if self.is_loading() {
            FeedState::Loading
        } else if !self.error_message.is_empty() {
            FeedState::Error
        } else {
            FeedState::Idle
        }
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Viewport with fixed metrics
    struct Metrics {
        viewport: usize,
        offset: usize,
        content: usize,
    }

    impl ViewportMetrics for Metrics {
        fn viewport_height(&self) -> usize {
            self.viewport
        }
        fn scroll_offset(&self) -> usize {
            self.offset
        }
        fn content_height(&self) -> usize {
            self.content
        }
    }

    const AT_BOTTOM: Metrics = Metrics {
        viewport: 20,
        offset: 80,
        content: 100,
    };

    const MID_PAGE: Metrics = Metrics {
        viewport: 20,
        offset: 10,
        content: 100,
    };

    fn posts(prefix: &str, n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| Post::new(format!("{prefix}-{i}"), "body"))
            .collect()
    }

    fn succeed(controller: &mut FeedController, request: PageRequest, batch: Vec<Post>) -> LoadOutcome {
        controller.complete(FetchCompletion {
            request,
            result: Ok(batch),
        })
    }

    fn fail(controller: &mut FeedController, request: PageRequest) -> LoadOutcome {
        controller.complete(FetchCompletion {
            request,
            result: Err(FetchError::Status {
                status: 500,
                message: "boom".to_string(),
            }),
        })
    }

    #[test]
    fn starts_idle_on_page_one() {
        let controller = FeedController::new(10);
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.limit(), 10);
        assert!(controller.posts().is_empty());
        assert!(!controller.is_loading());
        assert_eq!(controller.error_message(), "");
        assert_eq!(controller.state(), FeedState::Idle);
    }

    #[test]
    fn zero_limit_is_bumped_to_one() {
        assert_eq!(FeedController::new(0).limit(), 1);
    }

    #[test]
    fn mount_requests_first_page() {
        let mut controller = FeedController::new(10);
        let request = controller.mount().unwrap();
        assert_eq!(request, PageRequest { page: 1, limit: 10 });
        assert!(controller.is_loading());
        assert_eq!(controller.state(), FeedState::Loading);
    }

    #[test]
    fn accumulates_pages_in_request_order() {
        let mut controller = FeedController::new(3);
        let batches = [posts("a", 3), posts("b", 3), posts("c", 2)];

        let mut expected = Vec::new();
        for (i, batch) in batches.iter().enumerate() {
            let request = controller.on_scroll(&AT_BOTTOM).unwrap();
            assert_eq!(request.page, i as u32 + 1);
            assert_eq!(
                succeed(&mut controller, request, batch.clone()),
                LoadOutcome::Appended(batch.len())
            );
            expected.extend(batch.iter().cloned());
        }

        assert_eq!(controller.posts(), expected.as_slice());
        assert_eq!(controller.page(), 1 + batches.len() as u32);
        assert!(!controller.is_loading());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut controller = FeedController::new(2);
        let same = posts("dup", 2);

        let request = controller.mount().unwrap();
        succeed(&mut controller, request, same.clone());
        let request = controller.retry().unwrap();
        succeed(&mut controller, request, same);

        assert_eq!(controller.posts().len(), 4);
        assert_eq!(controller.posts()[0], controller.posts()[2]);
    }

    #[test]
    fn empty_page_changes_nothing_and_repeats_same_request() {
        let mut controller = FeedController::new(10);
        let request = controller.mount().unwrap();
        succeed(&mut controller, request, posts("p", 10));

        let request = controller.on_scroll(&AT_BOTTOM).unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(succeed(&mut controller, request, Vec::new()), LoadOutcome::Empty);

        assert_eq!(controller.posts().len(), 10);
        assert_eq!(controller.page(), 2);
        assert_eq!(controller.error_message(), "");
        assert!(!controller.is_loading());

        // The exhausted page is asked for again on the next trigger
        let again = controller.on_scroll(&AT_BOTTOM).unwrap();
        assert_eq!(again, request);
    }

    #[test]
    fn failure_sets_error_and_keeps_state() {
        let mut controller = FeedController::new(5);
        let request = controller.mount().unwrap();
        succeed(&mut controller, request, posts("p", 5));

        let request = controller.on_scroll(&AT_BOTTOM).unwrap();
        assert_eq!(fail(&mut controller, request), LoadOutcome::Failed);

        assert_eq!(controller.posts().len(), 5);
        assert_eq!(controller.page(), 2);
        assert_eq!(controller.error_message(), FETCH_ERROR_MESSAGE);
        assert!(!controller.is_loading());
        assert_eq!(controller.state(), FeedState::Error);
    }

    #[test]
    fn success_after_failure_clears_error() {
        let mut controller = FeedController::new(5);
        let request = controller.mount().unwrap();
        fail(&mut controller, request);
        assert_eq!(controller.error_message(), FETCH_ERROR_MESSAGE);

        let request = controller.retry().unwrap();
        assert_eq!(request.page, 1);
        succeed(&mut controller, request, posts("p", 5));

        assert_eq!(controller.error_message(), "");
        assert_eq!(controller.state(), FeedState::Idle);
    }

    #[test]
    fn empty_page_after_failure_keeps_error_text() {
        let mut controller = FeedController::new(5);
        let request = controller.mount().unwrap();
        fail(&mut controller, request);

        let request = controller.retry().unwrap();
        succeed(&mut controller, request, Vec::new());

        assert_eq!(controller.error_message(), FETCH_ERROR_MESSAGE);
    }

    #[test]
    fn scroll_while_loading_issues_nothing() {
        let mut controller = FeedController::new(10);
        controller.mount().unwrap();

        assert!(controller.on_scroll(&AT_BOTTOM).is_none());
        assert!(controller.mount().is_none());
        assert!(controller.retry().is_none());
        assert_eq!(controller.requests_issued(), 1);
    }

    #[test]
    fn scroll_above_bottom_issues_nothing() {
        let mut controller = FeedController::new(10);
        assert!(controller.on_scroll(&MID_PAGE).is_none());
        assert!(!controller.is_loading());
        assert_eq!(controller.requests_issued(), 0);
    }

    #[test]
    fn at_most_one_request_outstanding_over_a_session() {
        let mut controller = FeedController::new(4);
        let mut pending: Option<PageRequest> = None;

        for step in 0..60 {
            // Scroll signals every step, completions only every third step
            if let Some(request) = controller.on_scroll(&AT_BOTTOM) {
                assert!(pending.is_none(), "request issued while another is outstanding");
                pending = Some(request);
            }
            if step % 3 == 2 {
                if let Some(request) = pending.take() {
                    succeed(&mut controller, request, posts("s", 4));
                }
            }
            assert_eq!(controller.is_loading(), pending.is_some());
        }

        assert_eq!(controller.requests_issued(), 20);
        assert_eq!(controller.page(), 21);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut controller = FeedController::new(10);
        let request = controller.mount().unwrap();

        let stale = PageRequest { page: 7, limit: 10 };
        assert_eq!(succeed(&mut controller, stale, posts("x", 10)), LoadOutcome::Ignored);
        assert!(controller.is_loading());
        assert!(controller.posts().is_empty());

        assert_eq!(
            succeed(&mut controller, request, posts("p", 10)),
            LoadOutcome::Appended(10)
        );
    }

    #[test]
    fn scroll_to_bottom_before_first_load_then_empty_page() {
        let mut controller = FeedController::new(10);
        let empty_viewport = Metrics {
            viewport: 30,
            offset: 0,
            content: 0,
        };

        let request = controller.on_scroll(&empty_viewport).unwrap();
        assert_eq!(request, PageRequest { page: 1, limit: 10 });
        succeed(&mut controller, request, posts("p", 10));
        assert_eq!(controller.posts().len(), 10);
        assert_eq!(controller.page(), 2);
        assert!(!controller.is_loading());

        let request = controller.on_scroll(&AT_BOTTOM).unwrap();
        succeed(&mut controller, request, Vec::new());
        assert_eq!(controller.posts().len(), 10);
        assert_eq!(controller.page(), 2);
        assert_eq!(controller.error_message(), "");
        assert!(!controller.is_loading());
    }

    #[test]
    fn reached_bottom_boundaries() {
        let exact = Metrics {
            viewport: 10,
            offset: 90,
            content: 100,
        };
        let one_short = Metrics {
            viewport: 10,
            offset: 89,
            content: 100,
        };
        let short_content = Metrics {
            viewport: 10,
            offset: 0,
            content: 4,
        };
        assert!(exact.reached_bottom());
        assert!(!one_short.reached_bottom());
        assert!(short_content.reached_bottom());
    }
}
