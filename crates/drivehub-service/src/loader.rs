//! Loading the forest from the provider.
//!
//! Loads can overlap: a user may hit refresh while the first request is
//! still running. [`RefreshGate`] hands out tickets so that only the
//! newest load publishes its result.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{debug, info, warn};

use drivehub_core::traits::source::{DriveSource, FavoritesStore};
use drivehub_entity::folder::FolderNode;

use crate::favorites::overlay_forest;
use crate::transform::{TransformOptions, decode_payload, transform};

/// Ticket identifying one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    /// Sequence number of the attempt.
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Last-write-wins gate for overlapping loads.
#[derive(Debug, Default)]
pub struct RefreshGate {
    generation: AtomicU64,
    loading: AtomicBool,
}

impl RefreshGate {
    /// Create an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding any load in flight.
    pub fn begin(&self) -> RefreshTicket {
        self.loading.store(true, Ordering::SeqCst);
        RefreshTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Start a load only if none is in flight.
    pub fn try_begin(&self) -> Option<RefreshTicket> {
        self.loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RefreshTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1))
    }

    /// Finish a load. Returns `true` if the ticket is still the newest, in
    /// which case the loading flag is cleared.
    pub fn finish(&self, ticket: RefreshTicket) -> bool {
        let current = self.generation.load(Ordering::SeqCst) == ticket.0;
        if current {
            self.loading.store(false, Ordering::SeqCst);
        }
        current
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

/// Result of a load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The newest load completed with this forest.
    Loaded(Vec<FolderNode>),
    /// A newer load started before this one finished; the result was
    /// discarded.
    Superseded,
    /// Another load was already in flight.
    Busy,
}

/// Fetches, decodes, and transforms the provider hierarchy.
#[derive(Debug)]
pub struct DriveLoader {
    source: Arc<dyn DriveSource>,
    favorites: Option<Arc<dyn FavoritesStore>>,
    options: TransformOptions,
    gate: RefreshGate,
}

impl DriveLoader {
    /// Create a loader over `source`.
    pub fn new(source: Arc<dyn DriveSource>, options: TransformOptions) -> Self {
        Self {
            source,
            favorites: None,
            options,
            gate: RefreshGate::new(),
        }
    }

    /// Mark favorite files after every load.
    pub fn with_favorites(mut self, favorites: Arc<dyn FavoritesStore>) -> Self {
        self.favorites = Some(favorites);
        self
    }

    /// The refresh gate shared by all loads of this loader.
    pub fn gate(&self) -> &RefreshGate {
        &self.gate
    }

    /// Load unconditionally. Superseded results are dropped.
    pub async fn refresh(&self) -> LoadOutcome {
        let ticket = self.gate.begin();
        self.run(ticket).await
    }

    /// Load unless a load is already in flight.
    pub async fn refresh_if_idle(&self) -> LoadOutcome {
        match self.gate.try_begin() {
            Some(ticket) => self.run(ticket).await,
            None => {
                debug!("Drive load already in flight");
                LoadOutcome::Busy
            }
        }
    }

    async fn run(&self, ticket: RefreshTicket) -> LoadOutcome {
        let forest = self.load_forest().await;
        if self.gate.finish(ticket) {
            info!(
                ticket = ticket.sequence(),
                roots = forest.len(),
                "Drive forest loaded"
            );
            LoadOutcome::Loaded(forest)
        } else {
            debug!(ticket = ticket.sequence(), "Discarding superseded drive load");
            LoadOutcome::Superseded
        }
    }

    async fn load_forest(&self) -> Vec<FolderNode> {
        let payload = match self.source.load_hierarchy().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to load drive hierarchy");
                return Vec::new();
            }
        };

        let mut forest = transform(&decode_payload(payload), &self.options);

        if let Some(favorites) = &self.favorites {
            match favorites.favorite_file_ids().await {
                Ok(ids) => {
                    let marked = overlay_forest(&mut forest, &ids);
                    debug!(marked, "Applied favorites");
                }
                Err(e) => warn!(error = %e, "Failed to load favorites; skipping"),
            }
        }
        forest
    }
}
