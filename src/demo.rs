// Demo mode: serve a generated posts corpus locally
//
// Mimics the JSONPlaceholder `/posts` collection closely enough for the
// client: `_page` and `_limit` select a 1-based page, anything past the end
// is an empty array. An artificial latency makes the loading state visible
// in the TUI.
//
// Run with: POSTSCROLL_DEMO=1 cargo run --release   (or --demo)

use crate::config::DemoConfig;
use crate::feed::Post;
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Words the generated titles and bodies are built from
const WORDS: &[&str] = &[
    "harbor", "lantern", "quiet", "signal", "orbit", "meadow", "copper", "drift", "ember",
    "timber", "canvas", "echo", "fable", "glacier", "hollow", "island", "juniper", "kettle",
    "ledger", "marble", "north", "opal", "pocket", "quarry", "river", "saddle", "thistle",
    "umber", "velvet", "willow",
];

/// Posts per user in the generated corpus (JSONPlaceholder uses 10)
const POSTS_PER_USER: u64 = 10;

/// Pagination query, mirroring JSONPlaceholder's parameter names
#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(rename = "_page")]
    page: Option<u32>,
    #[serde(rename = "_limit")]
    limit: Option<u32>,
}

#[derive(Clone)]
struct DemoState {
    posts: Arc<Vec<Post>>,
    latency: Duration,
}

/// Deterministic pseudo-text for post `id`
fn words_for(id: u64, count: usize, stride: u64) -> String {
    (0..count as u64)
        .map(|i| WORDS[((id * stride + i * 7) % WORDS.len() as u64) as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the demo corpus with ids `1..=total`
pub fn generate_posts(total: u32) -> Vec<Post> {
    (1..=total as u64)
        .map(|id| {
            let mut post = Post::new(
                format!("{} #{}", words_for(id, 4, 3), id),
                format!("{}.\n{}.", words_for(id, 12, 5), words_for(id + 1, 9, 11)),
            )
            .with_id(id);
            post.user_id = Some((id - 1) / POSTS_PER_USER + 1);
            post
        })
        .collect()
}

/// Slice one page out of the corpus (1-based page, empty past the end)
pub fn page_slice(posts: &[Post], page: u32, limit: u32) -> &[Post] {
    let page = page.max(1) as usize;
    let limit = limit as usize;
    let start = (page - 1).saturating_mul(limit);
    if start >= posts.len() {
        return &[];
    }
    let end = start.saturating_add(limit).min(posts.len());
    &posts[start..end]
}

async fn list_posts(State(state): State<DemoState>, Query(query): Query<PageQuery>) -> Json<Vec<Post>> {
    if !state.latency.is_zero() {
        tokio::time::sleep(state.latency).await;
    }

    // No _limit means the whole collection, like the real endpoint
    let page = match query.limit {
        Some(limit) => page_slice(&state.posts, query.page.unwrap_or(1), limit).to_vec(),
        None => state.posts.as_ref().clone(),
    };

    tracing::debug!(
        "Demo server: page {:?} limit {:?} -> {} posts",
        query.page,
        query.limit,
        page.len()
    );

    Json(page)
}

/// Router serving the corpus at `/posts`
pub fn router(config: &DemoConfig) -> Router {
    let state = DemoState {
        posts: Arc::new(generate_posts(config.total_posts)),
        latency: Duration::from_millis(config.latency_ms),
    };

    Router::new()
        .route("/posts", get(list_posts))
        .with_state(state)
}

/// Running demo server
pub struct DemoServer {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl DemoServer {
    /// Bind and start serving in a background task
    pub async fn start(config: &DemoConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .with_context(|| format!("Failed to bind demo server to {}", config.bind_addr))?;
        let addr = listener
            .local_addr()
            .context("Failed to read demo server address")?;

        let app = router(config);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!("Demo server error: {}", e);
            }
        });

        tracing::info!(
            "Demo server listening on {} ({} posts)",
            addr,
            config.total_posts
        );

        Ok(Self {
            addr,
            shutdown_tx,
            handle,
        })
    }

    /// Base URL for the posts collection
    pub fn posts_url(&self) -> String {
        format!("http://{}/posts", self.addr)
    }

    /// Stop accepting connections and wait for the server task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}
