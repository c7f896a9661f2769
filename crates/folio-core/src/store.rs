//! Per-language post collections with request de-duplication.
//!
//! [`PostStore`] keeps two maps keyed by [`Language`]:
//!
//! - `completed`: collections that loaded successfully. Entries live for the
//!   lifetime of the store and are never refreshed.
//! - `pending`: the single in-flight load for a language, shared by every
//!   caller that asks while it runs. The load removes its own entry the moment
//!   it settles, whatever the outcome.
//!
//! Both maps sit behind one mutex that is only held for synchronous
//! bookkeeping, never across an `.await`. Checking the maps and registering a
//! new load happen under the same guard, so two callers can never start two
//! manifest fetches for the same language.
//!
//! Loads run on a spawned task: a caller that stops waiting does not cancel the
//! load, and the other callers still receive its result.

use crate::loader::PostLoader;
use crate::{Language, Post, Result};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared, join_all};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// An immutable, shareable post collection, newest first.
pub type Collection = Arc<[Post]>;

type PendingLoad = Shared<BoxFuture<'static, Collection>>;

#[derive(Default)]
struct CacheState {
    completed: HashMap<Language, Collection>,
    pending: HashMap<Language, PendingLoad>,
}

/// Caching front door to the content pipeline.
///
/// Construct one per process and hand out references (or clones, which share
/// the same cache).
#[derive(Clone)]
pub struct PostStore {
    loader: Arc<PostLoader>,
    state: Arc<Mutex<CacheState>>,
}

impl PostStore {
    /// Create an empty store that loads through `loader`.
    pub fn new(loader: PostLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// All posts for `language`, newest first.
    ///
    /// Served from cache once loaded. While a load is running, every caller
    /// waits on that same load. A failed manifest fetch yields an empty
    /// collection that is not cached, so the next call tries again.
    pub async fn get_all(&self, language: Language) -> Collection {
        let pending = {
            let mut state = lock(&self.state);
            if let Some(posts) = state.completed.get(&language) {
                debug!(%language, count = posts.len(), "Post collection served from cache");
                return Arc::clone(posts);
            }
            if let Some(pending) = state.pending.get(&language) {
                debug!(%language, "Joining in-flight post collection load");
                pending.clone()
            } else {
                let pending = self.spawn_load(language);
                state.pending.insert(language, pending.clone());
                pending
            }
        };
        pending.await
    }

    /// A single post, always freshly loaded and never cached.
    pub async fn get_one(&self, id: &str, language: Language) -> Option<Post> {
        self.loader.load(id, language).await
    }

    /// Whether a completed collection is cached for `language`.
    pub fn is_cached(&self, language: Language) -> bool {
        lock(&self.state).completed.contains_key(&language)
    }

    /// Whether a collection load for `language` is currently in flight.
    pub fn is_loading(&self, language: Language) -> bool {
        lock(&self.state).pending.contains_key(&language)
    }

    fn spawn_load(&self, language: Language) -> PendingLoad {
        let loader = Arc::clone(&self.loader);
        let state = Arc::clone(&self.state);

        let task = tokio::spawn({
            let state = Arc::clone(&state);
            async move {
                let outcome = load_collection(&loader, language).await;
                let mut state = lock(&state);
                state.pending.remove(&language);
                match outcome {
                    Ok(posts) => {
                        info!(%language, count = posts.len(), "Loaded post collection");
                        let posts: Collection = posts.into();
                        state.completed.insert(language, Arc::clone(&posts));
                        posts
                    },
                    Err(e) => {
                        warn!(
                            %language,
                            category = e.category(),
                            "No posts available: {e}"
                        );
                        empty()
                    },
                }
            }
        });

        async move {
            match task.await {
                Ok(posts) => posts,
                Err(e) => {
                    error!(%language, "Post collection task failed: {e}");
                    lock(&state).pending.remove(&language);
                    empty()
                },
            }
        }
        .boxed()
        .shared()
    }
}

/// Fetch the manifest, load every post concurrently, drop failures, sort.
async fn load_collection(loader: &PostLoader, language: Language) -> Result<Vec<Post>> {
    let ids = loader.transport().fetch_manifest(language).await?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::with_capacity(ids.len());
    let unique: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| {
            let first = seen.insert(*id);
            if !first {
                warn!(id, %language, "Duplicate identifier in manifest, ignoring");
            }
            first
        })
        .collect();

    let loads = unique.iter().map(|id| loader.load(id, language));
    let mut posts: Vec<Post> = join_all(loads).await.into_iter().flatten().collect();

    if posts.len() < unique.len() {
        debug!(
            %language,
            failed = unique.len() - posts.len(),
            "Some posts failed to load and were skipped"
        );
    }
    sort_newest_first(&mut posts);
    Ok(posts)
}

/// Sort by date, newest first. Stable, so equal dates keep manifest order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

fn empty() -> Collection {
    Arc::from(Vec::new())
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    // Every critical section leaves the maps consistent, so a poisoned guard is still usable.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl std::fmt::Debug for PostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("PostStore")
            .field("cached", &state.completed.keys().collect::<Vec<_>>())
            .field("loading", &state.pending.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
