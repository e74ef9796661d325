//! Aggregate progress over one batch of asynchronous asset fetches.

use crate::error::{AssetLoadFailure, Result, SceneError};
use fnv::FnvHashMap;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_TRACKER: AtomicU32 = AtomicU32::new(1);

/// Progress notification emitted once per resolved asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadEvent {
    pub asset_url: String,
    pub items_loaded: u32,
    pub items_total: u32,
}

/// Claim on one registered fetch. Resolving consumes it, so each fetch can
/// report at most once.
#[derive(Debug)]
#[must_use = "an unresolved ticket keeps the load batch from completing"]
pub struct AssetTicket {
    tracker: u32,
    id: u32,
    url: String,
}

impl AssetTicket {
    pub fn url(&self) -> &str {
        &self.url
    }
}

pub type AssetOutcome = std::result::Result<(), AssetLoadFailure>;

type ProgressHook = Box<dyn FnMut(&LoadEvent)>;
type ActivateHook = Box<dyn FnOnce(u32)>;
type CompleteHook = Box<dyn FnOnce()>;

/// Counts resolutions of a load batch and raises a single completion event.
///
/// Registration is only accepted before [`activate`](Self::activate).
/// Failures count toward completion exactly like successes; they are logged
/// and kept in [`failures`](Self::failures).
pub struct AssetLoadTracker {
    // distinguishes tickets of different trackers with equal ids
    identity: u32,
    pending: FnvHashMap<u32, String>,
    next_id: u32,
    items_total: u32,
    items_loaded: u32,
    active: bool,
    completed: bool,
    failures: Vec<AssetLoadFailure>,
    on_activate: Option<ActivateHook>,
    on_progress: Option<ProgressHook>,
    on_all_complete: Option<CompleteHook>,
}

impl Default for AssetLoadTracker {
    fn default() -> Self {
        Self {
            identity: NEXT_TRACKER.fetch_add(1, Ordering::Relaxed),
            pending: FnvHashMap::default(),
            next_id: 0,
            items_total: 0,
            items_loaded: 0,
            active: false,
            completed: false,
            failures: Vec::new(),
            on_activate: None,
            on_progress: None,
            on_all_complete: None,
        }
    }
}

impl AssetLoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once from [`activate`](Self::activate) with the batch size,
    /// before any completion.
    pub fn on_activate(&mut self, hook: impl FnOnce(u32) + 'static) {
        self.on_activate = Some(Box::new(hook));
    }

    pub fn on_progress(&mut self, hook: impl FnMut(&LoadEvent) + 'static) {
        self.on_progress = Some(Box::new(hook));
    }

    pub fn on_all_complete(&mut self, hook: impl FnOnce() + 'static) {
        self.on_all_complete = Some(Box::new(hook));
    }

    pub fn register(&mut self, url: impl Into<String>) -> Result<AssetTicket> {
        if self.active {
            return Err(SceneError::TrackerActivated);
        }
        let url = url.into();
        let id = self.next_id;
        self.next_id += 1;
        self.items_total += 1;
        self.pending.insert(id, url.clone());
        log::debug!("[loading] registered {} ({} total)", url, self.items_total);
        Ok(AssetTicket {
            tracker: self.identity,
            id,
            url,
        })
    }

    /// Close registration. An empty batch completes right here.
    pub fn activate(&mut self) {
        if self.active {
            log::warn!("[loading] tracker activated twice");
            return;
        }
        self.active = true;
        log::debug!("[loading] active with {} assets", self.items_total);
        if let Some(hook) = self.on_activate.take() {
            hook(self.items_total);
        }
        self.check_complete();
    }

    /// Record the outcome of one fetch and notify observers.
    ///
    /// Returns `None` for a ticket this tracker never issued.
    pub fn resolve(&mut self, ticket: AssetTicket, outcome: AssetOutcome) -> Option<LoadEvent> {
        let issued = if ticket.tracker == self.identity {
            self.pending.remove(&ticket.id)
        } else {
            None
        };
        let Some(url) = issued else {
            log::warn!("[loading] ignoring foreign ticket for {}", ticket.url);
            return None;
        };
        if let Err(failure) = outcome {
            log::warn!("[loading] {}", failure);
            self.failures.push(failure);
        }
        self.items_loaded += 1;
        let event = LoadEvent {
            asset_url: url,
            items_loaded: self.items_loaded,
            items_total: self.items_total,
        };
        log::debug!(
            "[loading] {} ({}/{})",
            event.asset_url,
            event.items_loaded,
            event.items_total
        );
        if let Some(hook) = self.on_progress.as_mut() {
            hook(&event);
        }
        self.check_complete();
        Some(event)
    }

    pub fn items_loaded(&self) -> u32 {
        self.items_loaded
    }

    pub fn items_total(&self) -> u32 {
        self.items_total
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn failures(&self) -> &[AssetLoadFailure] {
        &self.failures
    }

    fn check_complete(&mut self) {
        if self.completed || !self.active || self.items_loaded != self.items_total {
            return;
        }
        self.completed = true;
        log::info!(
            "[loading] batch complete ({} assets, {} failed)",
            self.items_total,
            self.failures.len()
        );
        if let Some(hook) = self.on_all_complete.take() {
            hook();
        }
    }
}
