use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::objects::body::Body;

/// Tags every set so ids from one scene never resolve in another.
static NEXT_SET_TAG: AtomicU64 = AtomicU64::new(0);

/// Stable handle to a body inside a [`crate::Scene`].
///
/// Unlike an index, a `BodyId` keeps pointing at the same body when earlier
/// bodies are reaped. Ids are never reused, and an id is only known to the
/// scene that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId {
    set: u64,
    serial: u64,
}

struct Slot {
    id: BodyId,
    body: Body,
}

/// Ordered collection of bodies, addressable by index or by [`BodyId`].
///
/// Force generators receive the set mutably so they can reach the bodies
/// they were registered with.
pub struct BodySet {
    tag: u64,
    slots: Vec<Slot>,
    index: HashMap<BodyId, usize>,
    next_serial: u64,
}

impl BodySet {
    pub(crate) fn new() -> Self {
        Self {
            tag: NEXT_SET_TAG.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            index: HashMap::new(),
            next_serial: 0,
        }
    }

    /// Appends a body and returns its handle.
    pub(crate) fn insert(&mut self, body: Body) -> BodyId {
        let id = BodyId {
            set: self.tag,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        self.index.insert(id, self.slots.len());
        self.slots.push(Slot { id, body });
        id
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index.contains_key(&id)
    }

    /// Current position of `id` in iteration order.
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Handle of the body at `index`. Panics if out of bounds.
    pub fn id_at(&self, index: usize) -> BodyId {
        self.slots[index].id
    }

    /// Body at `index`. Panics if out of bounds.
    pub fn at(&self, index: usize) -> &Body {
        &self.slots[index].body
    }

    /// Body at `index`. Panics if out of bounds.
    pub fn at_mut(&mut self, index: usize) -> &mut Body {
        &mut self.slots[index].body
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        let index = self.index_of(id)?;
        Some(&self.slots[index].body)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let index = self.index_of(id)?;
        Some(&mut self.slots[index].body)
    }

    /// Mutably borrows two distinct bodies at once.
    /// Returns `None` if either id is unknown or both ids are the same.
    pub fn pair_mut(&mut self, id_a: BodyId, id_b: BodyId) -> Option<(&mut Body, &mut Body)> {
        let idx_a = self.index_of(id_a)?;
        let idx_b = self.index_of(id_b)?;
        if idx_a == idx_b {
            return None;
        }

        // Ensure a < b for split_at_mut
        if idx_a < idx_b {
            let (slice_a, slice_b) = self.slots.split_at_mut(idx_b);
            Some((&mut slice_a[idx_a].body, &mut slice_b[0].body))
        } else {
            let (slice_b, slice_a) = self.slots.split_at_mut(idx_a);
            Some((&mut slice_a[0].body, &mut slice_b[idx_b].body))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> + '_ {
        self.slots.iter().map(|slot| &slot.body)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> + '_ {
        self.slots.iter_mut().map(|slot| &mut slot.body)
    }

    /// Ids in iteration order.
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.slots.iter().map(|slot| slot.id)
    }

    /// True if `id` is tombstoned or no longer in the set.
    pub(crate) fn is_gone(&self, id: BodyId) -> bool {
        self.get(id).map_or(true, Body::is_removed)
    }

    /// Drops every tombstoned body and advances the rest by `dt`, in order.
    /// Returns how many bodies were dropped.
    pub(crate) fn reap_and_tick(&mut self, dt: f64) -> usize {
        let before = self.slots.len();
        self.slots.retain_mut(|slot| {
            if slot.body.is_removed() {
                false
            } else {
                slot.body.tick(dt);
                true
            }
        });

        let reaped = before - self.slots.len();
        if reaped > 0 {
            self.rebuild_index();
        }
        reaped
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            self.index.insert(slot.id, i);
        }
    }
}
