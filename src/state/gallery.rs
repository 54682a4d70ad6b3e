/// Gallery controller
///
/// Owns the catalog, the rendered tiles and the pagination state, and
/// drives batched loading, shuffling and layout changes.
///
/// All deferred work goes through the `Scheduler`. Anything that can
/// arrive late (decode results, scheduled batches, the end of a shuffle
/// fade) carries the epoch it was issued in. A shuffle bumps the epoch,
/// so stale work from before the shuffle is dropped on arrival.

use rand::Rng;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::catalog;
use super::data::{ImageDescriptor, LayoutMode, Presentation, Tile, TileStatus};
use super::scheduler::{Clock, Job, Scheduler, SystemClock};
use super::viewport::{self, Viewport};
use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::media::placeholder::placeholder;
use crate::media::LoadedImage;

/// Result of a single decode, as delivered back to the gallery
pub type DecodeResult = std::result::Result<LoadedImage, Arc<GalleryError>>;

/// A decode the caller has to run for a freshly attached tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    pub epoch: u64,
    pub id: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another batch is being built
    InFlight,
    /// Every descriptor already has a tile
    AllDispatched,
    /// Every tile has finished loading
    AllLoaded,
    /// The gallery is fading out for a shuffle
    Shuffling,
}

#[derive(Debug)]
pub enum BatchOutcome {
    Skipped(SkipReason),
    Dispatched {
        range: Range<usize>,
        epoch: u64,
        requests: Vec<DecodeRequest>,
        /// Still near the bottom, so another batch was scheduled
        reschedule: bool,
    },
    /// Building the batch failed; nothing was attached
    Failed(GalleryError),
}

impl BatchOutcome {
    pub fn requests(self) -> Vec<DecodeRequest> {
        match self {
            BatchOutcome::Dispatched { requests, .. } => requests,
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileUpdate {
    Loaded,
    /// Decode failed, placeholder substituted
    Failed,
    /// Result belongs to an earlier epoch
    Stale,
    /// Tile was already complete, or is unknown
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Shuffle started, waiting for the fade before resetting
    FadingOut,
}

/// The mutable gallery record
#[derive(Debug)]
pub struct GalleryState {
    pub catalog: Vec<ImageDescriptor>,
    /// Rendered tiles, in dispatch order
    pub tiles: Vec<Tile>,
    /// Tiles whose decode finished (either way) in this epoch
    pub loaded_count: usize,
    /// Batches dispatched in this epoch
    pub batch_cursor: usize,
    /// Held only while a batch is being built
    pub is_loading_batch: bool,
    pub epoch: u64,
    pub layout: LayoutMode,
    pub phase: Phase,
    /// 0.0 while fading out for a shuffle, 1.0 otherwise
    pub surface_opacity: f32,
}

impl GalleryState {
    pub fn new(catalog: Vec<ImageDescriptor>, layout: LayoutMode) -> Self {
        Self {
            catalog,
            tiles: Vec::new(),
            loaded_count: 0,
            batch_cursor: 0,
            is_loading_batch: false,
            epoch: 0,
            layout,
            phase: Phase::Idle,
            surface_opacity: 1.0,
        }
    }

    pub fn total(&self) -> usize {
        self.catalog.len()
    }
}

pub struct Gallery<C: Clock = SystemClock> {
    config: GalleryConfig,
    state: GalleryState,
    scheduler: Scheduler<C>,
    viewport: Viewport,
}

impl<C: Clock> Gallery<C> {
    /// Generate the catalog and set up an empty gallery
    pub fn new(config: GalleryConfig, clock: C, viewport: Viewport) -> Self {
        let catalog = catalog::generate(&config);
        let state = GalleryState::new(catalog, config.initial_layout);

        log::info!("🎨 Gallery initialized with {} images", state.total());

        Self {
            config,
            state,
            scheduler: Scheduler::new(clock),
            viewport,
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn has_pending_jobs(&self) -> bool {
        !self.scheduler.is_idle()
    }

    /// Loaded counter as shown in the toolbar
    pub fn counter_text(&self) -> String {
        self.state.loaded_count.to_string()
    }

    /// The loading indicator stays up until every tile has completed
    pub fn indicator_visible(&self) -> bool {
        self.state.is_loading_batch || self.state.loaded_count < self.state.total()
    }

    pub fn content_height(&self) -> f32 {
        viewport::content_height(
            &self.state.tiles,
            self.state.layout,
            self.viewport.width,
            self.config.tile_size,
        )
    }

    pub fn near_bottom(&self) -> bool {
        self.viewport
            .near_bottom(self.content_height(), self.config.proximity_threshold)
    }

    /// Attach the next batch of tiles.
    ///
    /// No-op while another batch is being built, while shuffling, or
    /// once everything is dispatched or loaded. If the viewport is still
    /// near the bottom afterwards, another batch is scheduled.
    pub fn load_next_batch(&mut self) -> BatchOutcome {
        if let Some(reason) = self.skip_reason() {
            log::trace!("Skipping batch: {:?}", reason);
            return BatchOutcome::Skipped(reason);
        }

        self.dispatch_batch()
    }

    /// Build and attach the batch at the cursor while holding the
    /// in-flight guard. The guard is released whether or not the build
    /// succeeds, and the cursor only advances on success.
    fn dispatch_batch(&mut self) -> BatchOutcome {
        self.state.is_loading_batch = true;
        let built = self.build_batch();
        self.state.is_loading_batch = false;

        match built {
            Ok((range, requests)) => {
                self.state.batch_cursor += 1;

                let reschedule = self.near_bottom();
                if reschedule {
                    self.scheduler.schedule(
                        Job::LoadNextBatch {
                            epoch: self.state.epoch,
                        },
                        Duration::from_millis(self.config.reload_delay_ms),
                    );
                }

                log::info!(
                    "📦 Batch {} dispatched: images {}..{} of {}",
                    self.state.batch_cursor,
                    range.start,
                    range.end,
                    self.state.total()
                );

                BatchOutcome::Dispatched {
                    range,
                    epoch: self.state.epoch,
                    requests,
                    reschedule,
                }
            }
            Err(e) => {
                log::error!("❌ Error loading batch: {}", e);
                BatchOutcome::Failed(e)
            }
        }
    }

    fn skip_reason(&self) -> Option<SkipReason> {
        let state = &self.state;
        if state.is_loading_batch {
            Some(SkipReason::InFlight)
        } else if state.phase == Phase::FadingOut {
            Some(SkipReason::Shuffling)
        } else if state.loaded_count >= state.total() {
            Some(SkipReason::AllLoaded)
        } else if state.batch_cursor * self.config.batch_size >= state.total() {
            Some(SkipReason::AllDispatched)
        } else {
            None
        }
    }

    /// Build and attach the tiles for the current cursor in one go
    fn build_batch(&mut self) -> Result<(Range<usize>, Vec<DecodeRequest>), GalleryError> {
        let len = self.state.total();
        let start = self.state.batch_cursor * self.config.batch_size;
        let end = (start + self.config.batch_size).min(len);

        let descriptors = self
            .state
            .catalog
            .get(start..end)
            .ok_or(GalleryError::BatchOutOfRange { start, end, len })?;

        let epoch = self.state.epoch;
        let layout = self.state.layout;

        let mut batch = Vec::with_capacity(descriptors.len());
        let mut requests = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            requests.push(DecodeRequest {
                epoch,
                id: descriptor.id,
                path: descriptor.source.clone(),
            });
            batch.push(Tile::new(descriptor.clone(), layout));
        }

        self.state.tiles.extend(batch);
        Ok((start..end, requests))
    }

    /// Record the outcome of one tile's decode.
    ///
    /// Each tile completes exactly once; failures still count so the
    /// loading indicator can go away.
    pub fn complete_tile(
        &mut self,
        epoch: u64,
        id: usize,
        result: DecodeResult,
        now: Instant,
    ) -> TileUpdate {
        if epoch != self.state.epoch {
            log::debug!("Dropping stale decode for image {} (epoch {})", id, epoch);
            return TileUpdate::Stale;
        }

        let Some(tile) = self
            .state
            .tiles
            .iter_mut()
            .find(|tile| tile.descriptor.id == id)
        else {
            return TileUpdate::Ignored;
        };

        if tile.is_complete() {
            return TileUpdate::Ignored;
        }

        let update = match result {
            Ok(loaded) => {
                log::debug!(
                    "Image {} ready ({}x{} thumbnail)",
                    id,
                    loaded.thumbnail_size.0,
                    loaded.thumbnail_size.1
                );
                tile.handle = Some(loaded.handle);
                tile.natural_size = Some(loaded.natural_size);
                tile.status = TileStatus::Loaded;
                TileUpdate::Loaded
            }
            Err(e) => {
                log::error!(
                    "❌ Failed to load image: {} ({})",
                    tile.descriptor.source.display(),
                    e
                );
                tile.handle = Some(placeholder());
                tile.status = TileStatus::Failed;
                TileUpdate::Failed
            }
        };
        tile.shown_at = Some(now);

        let total = self.state.total();
        self.state.loaded_count = (self.state.loaded_count + 1).min(total);

        if self.state.loaded_count == total {
            log::info!("✅ All {} images loaded", total);
        }

        update
    }

    /// Start a shuffle: fade out now, reset and reorder once the fade is over
    pub fn shuffle(&mut self) -> u64 {
        let epoch = self.begin_shuffle();
        self.scheduler.schedule(
            Job::FinishShuffle { epoch },
            Duration::from_millis(self.config.fade_delay_ms),
        );
        epoch
    }

    fn begin_shuffle(&mut self) -> u64 {
        self.state.epoch += 1;
        self.state.phase = Phase::FadingOut;
        self.state.surface_opacity = 0.0;

        log::info!("🔀 Shuffling gallery (epoch {})", self.state.epoch);
        self.state.epoch
    }

    /// Second half of a shuffle. Returns false if a newer shuffle
    /// has superseded this one.
    fn finish_shuffle<R: Rng>(&mut self, epoch: u64, rng: &mut R) -> bool {
        if epoch != self.state.epoch || self.state.phase != Phase::FadingOut {
            return false;
        }

        self.state.tiles.clear();
        self.state.loaded_count = 0;
        self.state.batch_cursor = 0;

        catalog::shuffle_in_place(&mut self.state.catalog, rng);

        self.state.surface_opacity = 1.0;
        self.state.phase = Phase::Idle;
        true
    }

    /// Switch presentation mode and restyle every tile already shown
    pub fn change_layout(&mut self, mode: LayoutMode) {
        self.state.layout = mode;

        let presentation = Presentation::for_layout(mode);
        for tile in &mut self.state.tiles {
            tile.presentation = presentation;
        }

        log::debug!("Layout changed to {}", mode);
    }

    /// Record a scroll; proximity is re-checked once scrolling settles
    pub fn scrolled(&mut self, offset: f32, height: f32) {
        self.viewport.offset = offset;
        self.viewport.height = height;
        self.scheduler.schedule_debounced(
            Job::CheckProximity,
            Duration::from_millis(self.config.scroll_debounce_ms),
        );
    }

    pub fn resized(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Run every job whose delay has elapsed.
    /// Returns the decodes the caller needs to start.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Vec<DecodeRequest> {
        let mut requests = Vec::new();

        for job in self.scheduler.drain_due() {
            let outcome = match job {
                Job::LoadNextBatch { epoch } if epoch == self.state.epoch => {
                    self.load_next_batch()
                }
                Job::LoadNextBatch { .. } => continue,
                Job::FinishShuffle { epoch } => {
                    if !self.finish_shuffle(epoch, rng) {
                        continue;
                    }
                    self.load_next_batch()
                }
                Job::CheckProximity => {
                    if !self.near_bottom() {
                        continue;
                    }
                    self.load_next_batch()
                }
            };
            match outcome {
                BatchOutcome::Dispatched {
                    range,
                    epoch,
                    requests: batch,
                    reschedule,
                } => {
                    log::debug!(
                        "Scheduled batch {}..{} ran (epoch {}, follow-up: {})",
                        range.start,
                        range.end,
                        epoch,
                        reschedule
                    );
                    requests.extend(batch);
                }
                BatchOutcome::Failed(e) => log::warn!("⚠️  Scheduled batch failed: {}", e),
                BatchOutcome::Skipped(reason) => log::trace!("Scheduled batch skipped: {:?}", reason),
            }
        }

        log::trace!("{} scheduled jobs still pending", self.scheduler.pending());
        requests
    }
}
