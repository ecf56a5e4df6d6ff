//! Ordered asset storage
//!
//! A flat Vec in insertion order, which is also the draw order. Small counts
//! (tens of assets) make linear id lookups cheaper than any map.

use super::{Asset, AssetId, Request, Signal, TickContext};
use crate::platform::Surface;
use crate::scheduler::{AssetTimer, Scheduler};

/// Owns every live asset
#[derive(Debug, Default)]
pub struct AssetRegistry {
    entries: Vec<(AssetId, Asset)>,
    next_id: u32,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an asset without attaching timers
    pub fn add(&mut self, asset: Asset) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;
        log::trace!("add {} {:?}", asset.kind(), id);
        self.entries.push((id, asset));
        id
    }

    /// Take an asset out. No-op (None) if absent.
    pub fn remove(&mut self, id: AssetId) -> Option<Asset> {
        let idx = self.entries.iter().position(|(eid, _)| *eid == id)?;
        Some(self.entries.remove(idx).1)
    }

    /// Drop everything without teardown
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add and let the asset start its timers
    pub fn spawn(&mut self, asset: Asset, scheduler: &mut Scheduler) -> AssetId {
        let id = self.add(asset);
        if let Some(asset) = self.get_mut(id) {
            asset.attach(id, scheduler);
        }
        id
    }

    /// Remove and tear down. Returns false if the asset was already gone.
    pub fn despawn(&mut self, id: AssetId, scheduler: &mut Scheduler) -> bool {
        match self.remove(id) {
            Some(mut asset) => {
                asset.destroy(scheduler);
                true
            }
            None => false,
        }
    }

    /// Tear down every asset, then empty the registry
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        for (_, asset) in &mut self.entries {
            asset.destroy(scheduler);
        }
        self.entries.clear();
    }

    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.entries.iter().find(|(eid, _)| *eid == id).map(|(_, a)| a)
    }

    pub fn get_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        self.entries.iter_mut().find(|(eid, _)| *eid == id).map(|(_, a)| a)
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in draw order
    pub fn ids(&self) -> Vec<AssetId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &Asset)> {
        self.entries.iter().map(|(id, a)| (*id, a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tick every asset present when the pass starts.
    ///
    /// Assets spawned during the pass wait for the next frame, and assets
    /// despawned before their turn are skipped. Sounds and requests are
    /// returned for the director.
    pub fn tick_all(&mut self, ctx: &mut TickContext<'_>) -> Vec<Signal> {
        let mut deferred = Vec::new();
        for id in self.ids() {
            let Some(asset) = self.get_mut(id) else {
                continue;
            };
            asset.tick(id, ctx);

            for signal in ctx.take_signals() {
                match signal {
                    Signal::Despawn(target) => {
                        self.despawn(target, ctx.scheduler);
                    }
                    Signal::Spawn(asset) => {
                        self.spawn(*asset, ctx.scheduler);
                    }
                    other => deferred.push(other),
                }
            }
        }
        deferred
    }

    /// Route a fired timer to its owner. Timers of removed assets are dropped.
    pub fn deliver(&mut self, id: AssetId, timer: AssetTimer) -> Option<Request> {
        match self.get_mut(id) {
            Some(asset) => asset.on_timer(timer),
            None => {
                log::debug!("timer {:?} for missing {:?}", timer, id);
                None
            }
        }
    }

    /// Clear, draw every asset in order, present
    pub fn draw_all<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for (_, asset) in &self.entries {
            asset.draw(surface);
        }
        surface.present();
    }
}
