//! Lazily computed overlays keyed by window size.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use pta_model::{DerivedOverlay, NormalizedSeries, SmaWindow};

use crate::sma::compute_sma;

/// Cache of moving-average overlays for one series.
///
/// Entries are computed the first time their window is requested and dropped
/// when the window is deselected. The owner must call [`OverlaySet::clear`]
/// whenever the underlying series is replaced.
#[derive(Debug, Default)]
pub struct OverlaySet {
    overlays: BTreeMap<SmaWindow, DerivedOverlay>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay for `window`, computing it if it is not cached.
    pub fn get_or_compute(
        &mut self,
        series: &NormalizedSeries,
        window: SmaWindow,
    ) -> &DerivedOverlay {
        self.overlays.entry(window).or_insert_with(|| {
            debug!(window = window.get(), records = series.len(), "overlay computed");
            compute_sma(series, window)
        })
    }

    /// Make the cache hold exactly the overlays for `enabled`.
    pub fn sync(&mut self, series: &NormalizedSeries, enabled: &BTreeSet<SmaWindow>) {
        self.overlays.retain(|window, _| enabled.contains(window));
        for &window in enabled {
            self.get_or_compute(series, window);
        }
    }

    /// Drop the overlay for `window`. Returns whether one was cached.
    pub fn remove(&mut self, window: SmaWindow) -> bool {
        self.overlays.remove(&window).is_some()
    }

    pub fn clear(&mut self) {
        self.overlays.clear();
    }

    pub fn contains(&self, window: SmaWindow) -> bool {
        self.overlays.contains_key(&window)
    }

    pub fn get(&self, window: SmaWindow) -> Option<&DerivedOverlay> {
        self.overlays.get(&window)
    }

    /// Cached overlays in ascending window order.
    pub fn iter(&self) -> impl Iterator<Item = &DerivedOverlay> + '_ {
        self.overlays.values()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
