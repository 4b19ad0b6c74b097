//! Per-orb trail history.
//!
//! A trail is a fixed-capacity ring buffer of world positions, oldest first.
//! Ordinary motion is densified so consecutive points are never farther apart
//! than the configured spacing; a teleport, or any jump longer than the break
//! distance, is recorded as a single point so the renderer shows a gap instead
//! of a streak across the planet.

use glam::Vec3;

/// Fixed-capacity ring buffer of positions. Pushing past capacity overwrites
/// the oldest point in O(1).
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    points: Vec<Vec3>,
    capacity: usize,
    /// Index of the oldest point once the buffer has wrapped.
    start: usize,
}

impl TrailBuffer {
    /// Create an empty buffer. Capacity is at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            start: 0,
        }
    }

    /// Maximum number of points retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of points currently stored.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been recorded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point, evicting the oldest when full.
    pub fn push(&mut self, p: Vec3) {
        if self.points.len() < self.capacity {
            self.points.push(p);
        } else {
            self.points[self.start] = p;
            self.start = (self.start + 1) % self.capacity;
        }
    }

    /// Most recent point.
    pub fn last(&self) -> Option<Vec3> {
        if self.points.is_empty() {
            return None;
        }
        let idx = (self.start + self.points.len() - 1) % self.points.len();
        Some(self.points[idx])
    }

    /// Point `i` counted from the oldest.
    pub fn get(&self, i: usize) -> Option<Vec3> {
        if i >= self.points.len() {
            return None;
        }
        Some(self.points[(self.start + i) % self.points.len()])
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        let (tail, head) = self.points.split_at(self.start);
        head.iter().chain(tail.iter()).copied()
    }

    /// Copy the points out, oldest first.
    pub fn to_vec(&self) -> Vec<Vec3> {
        self.iter().collect()
    }

    /// Change the capacity (at least 1), keeping the newest points that fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if capacity == self.capacity {
            return;
        }
        let skip = self.points.len().saturating_sub(capacity);
        let kept: Vec<Vec3> = self.iter().skip(skip).collect();
        self.points = Vec::with_capacity(capacity);
        self.points.extend(kept);
        self.capacity = capacity;
        self.start = 0;
    }

    /// Drop every point.
    pub fn clear(&mut self) {
        self.points.clear();
        self.start = 0;
    }
}

/// How the latest position entered the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailAppend {
    /// A single point, disconnected from the previous one.
    Break,
    /// `n` evenly spaced points ending at the new position.
    Interpolated(usize),
}

/// An orb's trail plus the flag telling the renderer to rebuild its geometry.
#[derive(Debug, Clone)]
pub struct Trail {
    buffer: TrailBuffer,
    dirty: bool,
}

impl Trail {
    /// Empty trail holding at most `capacity` points.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: TrailBuffer::new(capacity),
            dirty: false,
        }
    }

    /// The recorded points.
    pub fn points(&self) -> &TrailBuffer {
        &self.buffer
    }

    /// Whether points were appended since the renderer last consumed the trail.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the renderer after rebuilding its drawable.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Record the orb's position for this frame.
    ///
    /// With `force_break`, an empty trail, or a jump longer than
    /// `break_distance`, `p` is appended once. Otherwise the segment from the
    /// last point to `p` is split into `ceil(d / spacing)` steps (at least one).
    pub fn record(
        &mut self,
        p: Vec3,
        spacing: f32,
        break_distance: f32,
        force_break: bool,
    ) -> TrailAppend {
        self.dirty = true;

        let Some(last) = self.buffer.last() else {
            self.buffer.push(p);
            return TrailAppend::Break;
        };
        let distance = last.distance(p);
        if force_break || !distance.is_finite() || distance > break_distance {
            self.buffer.push(p);
            return TrailAppend::Break;
        }

        let steps = if spacing > 0.0 {
            ((distance / spacing).ceil() as usize).max(1)
        } else {
            1
        };
        // Points older than the buffer can hold would be evicted immediately.
        let first = steps.saturating_sub(self.buffer.capacity()) + 1;
        for i in first..=steps {
            self.buffer.push(last.lerp(p, i as f32 / steps as f32));
        }
        TrailAppend::Interpolated(steps - first + 1)
    }

    /// Resize to hold at most `capacity` points. Marks the trail dirty when
    /// points had to be dropped.
    pub fn set_capacity(&mut self, capacity: usize) {
        let before = self.buffer.len();
        self.buffer.set_capacity(capacity);
        if self.buffer.len() < before {
            self.dirty = true;
        }
    }

    /// Forget all points.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.dirty = true;
    }
}
