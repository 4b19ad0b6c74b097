//! Population controller: spawns and retires orbs, then re-deals chaser roles.

use planetoid_config::OrbConfig;
use rand::Rng;

use crate::chaser::assign_chasers;
use crate::orb::{OrbEntity, OrbId};
use crate::retired::RetiredTrails;

/// Ordered set of live orbs with monotonic id allocation.
#[derive(Debug, Clone, Default)]
pub struct Population {
    orbs: Vec<OrbEntity>,
    next_id: u32,
    initialized: bool,
    /// Requested size recorded before [`initialize`](Self::initialize).
    pending_count: Option<usize>,
}

impl Population {
    /// Empty, uninitialised population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`initialize`](Self::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Spawn the initial orbs. The size is the pending request if one was
    /// recorded, otherwise `config.initial_count`. Runs once; later calls do nothing.
    pub fn initialize<R: Rng + ?Sized>(&mut self, config: &OrbConfig, rng: &mut R) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let count = self.pending_count.take().unwrap_or(config.initial_count);
        let count = clamp_count(count, config);
        for _ in 0..count {
            self.spawn(config, rng);
        }
        assign_chasers(&mut self.orbs, config.chaser_fraction, rng);
        tracing::info!(count, "population initialised");
    }

    /// Resize toward `n`, clamped to the configured bounds.
    ///
    /// Growth spawns fresh orbs; shrinking removes from the end and hands each
    /// removed orb's trail to `retired`. Chaser roles are re-dealt whenever the
    /// size changes. Before initialisation the request is only recorded.
    ///
    /// Returns the resulting live count.
    pub fn set_target_count<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        config: &OrbConfig,
        retired: &mut RetiredTrails,
        rng: &mut R,
    ) -> usize {
        let target = clamp_count(n, config);
        if !self.initialized {
            self.pending_count = Some(target);
            return target;
        }

        let before = self.orbs.len();
        if target == before {
            return before;
        }
        while self.orbs.len() < target {
            self.spawn(config, rng);
        }
        while self.orbs.len() > target {
            if let Some(orb) = self.orbs.pop() {
                retired.retire(&orb, config.retired_fade_secs);
            }
        }
        assign_chasers(&mut self.orbs, config.chaser_fraction, rng);
        tracing::info!(from = before, to = target, requested = n, "population resized");
        target
    }

    /// Size recorded by a request made before initialisation.
    pub fn pending_count(&self) -> Option<usize> {
        self.pending_count
    }

    /// Size [`initialize`](Self::initialize) will spawn, clamped to the
    /// configured bounds.
    pub fn planned_count(&self, config: &OrbConfig) -> usize {
        clamp_count(self.pending_count.unwrap_or(config.initial_count), config)
    }

    /// Live orb count.
    pub fn count(&self) -> usize {
        self.orbs.len()
    }

    /// Live orbs in population order.
    pub fn orbs(&self) -> &[OrbEntity] {
        &self.orbs
    }

    pub(crate) fn orbs_mut(&mut self) -> &mut [OrbEntity] {
        &mut self.orbs
    }

    /// Position of `id` in population order.
    pub fn index_of(&self, id: OrbId) -> Option<usize> {
        self.orbs.iter().position(|o| o.id() == id)
    }

    /// Look up an orb by id.
    pub fn get(&self, id: OrbId) -> Option<&OrbEntity> {
        self.orbs.iter().find(|o| o.id() == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: OrbId) -> Option<&mut OrbEntity> {
        self.orbs.iter_mut().find(|o| o.id() == id)
    }

    fn spawn<R: Rng + ?Sized>(&mut self, config: &OrbConfig, rng: &mut R) {
        let id = OrbId(self.next_id);
        self.next_id += 1;
        self.orbs.push(OrbEntity::spawn(id, config, rng));
    }
}

fn clamp_count(n: usize, config: &OrbConfig) -> usize {
    let lo = config.min_count.min(config.max_count);
    let hi = config.min_count.max(config.max_count);
    n.clamp(lo, hi)
}
