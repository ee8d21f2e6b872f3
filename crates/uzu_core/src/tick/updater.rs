//! # Update Registry
//!
//! Per-frame update dispatch driven explicitly by the host loop.
//!
//! Objects are held by value in an arena and addressed by [`UpdateId`].
//! Removal is an explicit [`UpdateRegistry::unregister`]; ids carry a
//! generation so an id kept past its removal never reaches a newer entry.

/// Something that wants to run once per simulation tick.
pub trait Updateable {
    /// Advances this object by `delta_seconds` of simulation time.
    fn on_update(&mut self, delta_seconds: f32);
}

impl<T: Updateable + ?Sized> Updateable for Box<T> {
    fn on_update(&mut self, delta_seconds: f32) {
        (**self).on_update(delta_seconds);
    }
}

/// Identifier of a registered updateable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UpdateId {
    index: usize,
    generation: u32,
}

struct Entry<U> {
    generation: u32,
    item: Option<U>,
}

/// Arena of updateables ticked in registration order.
///
/// Use `UpdateRegistry<Box<dyn Updateable>>` to mix types, or a concrete
/// `U` to keep typed access through [`UpdateRegistry::get`].
///
/// # Example
///
/// ```rust
/// use uzu_core::{Timer, UpdateRegistry};
///
/// let mut updater = UpdateRegistry::new();
/// let id = updater.register(Timer::new());
///
/// updater.tick(0.5);
/// assert_eq!(updater.get(id).map(Timer::elapsed_seconds), Some(0.5));
/// ```
pub struct UpdateRegistry<U: Updateable> {
    entries: Vec<Entry<U>>,
    /// Vacant entry indices for reuse.
    free: Vec<usize>,
    /// Occupied entry indices in registration order.
    order: Vec<usize>,
}

impl<U: Updateable> Default for UpdateRegistry<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Updateable> UpdateRegistry<U> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Returns the number of registered updateables.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Adds `item`; it is updated from the next [`UpdateRegistry::tick`] on.
    pub fn register(&mut self, item: U) -> UpdateId {
        let index = match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.generation = entry.generation.wrapping_add(1);
                entry.item = Some(item);
                index
            }
            None => {
                let index = self.entries.len();
                self.entries.push(Entry {
                    generation: 0,
                    item: Some(item),
                });
                index
            }
        };
        self.order.push(index);

        UpdateId {
            index,
            generation: self.entries[index].generation,
        }
    }

    /// Removes and returns the updateable behind `id`.
    ///
    /// Returns `None` if `id` was already removed.
    pub fn unregister(&mut self, id: UpdateId) -> Option<U> {
        let entry = self.entries.get_mut(id.index)?;
        if entry.generation != id.generation {
            return None;
        }
        let item = entry.item.take()?;

        self.free.push(id.index);
        self.order.retain(|&index| index != id.index);
        Some(item)
    }

    /// Returns the updateable behind `id`.
    #[must_use]
    pub fn get(&self, id: UpdateId) -> Option<&U> {
        self.entries
            .get(id.index)
            .filter(|entry| entry.generation == id.generation)?
            .item
            .as_ref()
    }

    /// Returns the updateable behind `id` mutably.
    pub fn get_mut(&mut self, id: UpdateId) -> Option<&mut U> {
        self.entries
            .get_mut(id.index)
            .filter(|entry| entry.generation == id.generation)?
            .item
            .as_mut()
    }

    /// Updates every registered object once, in registration order.
    pub fn tick(&mut self, delta_seconds: f32) {
        for &index in &self.order {
            if let Some(item) = self.entries[index].item.as_mut() {
                item.on_update(delta_seconds);
            }
        }
    }

    /// Removes everything. Ids handed out before the clear stay invalid.
    pub fn clear(&mut self) {
        for index in self.order.drain(..) {
            self.entries[index].item = None;
            self.free.push(index);
        }
    }
}
