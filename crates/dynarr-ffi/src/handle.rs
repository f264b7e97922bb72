//! Slot+generation handle table mapping opaque `u64` handles to arrays.
//!
//! A released handle keeps pointing at its old slot but carries an older
//! generation, so use-after-free and double-free across the C boundary
//! resolve to `None` instead of touching a recycled array.
//!
//! ```text
//! handle = (slot index << 32) | generation      generation starts at 1
//! ```
//!
//! Generations start at 1, so the all-zero handle a C caller gets from
//! zero-initialised memory is never valid.

const FIRST_GENERATION: u32 = 1;

fn encode(slot: u32, generation: u32) -> u64 {
    (u64::from(slot) << 32) | u64::from(generation)
}

fn decode(handle: u64) -> (usize, u32) {
    ((handle >> 32) as usize, handle as u32)
}

enum Entry<T> {
    Live { generation: u32, value: T },
    /// Free slot; `generation` is the one the next occupant will get.
    /// `None` marks a slot retired after its generation wrapped.
    Free { generation: Option<u32> },
}

/// Owns every live value and hands out handles to them.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
}

impl<T> HandleTable<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Take ownership of `value` and return its handle.
    ///
    /// Returns `None` only if the table has exhausted the 32-bit slot space.
    pub(crate) fn insert(&mut self, value: T) -> Option<u64> {
        while let Some(slot) = self.free.pop() {
            let entry = &mut self.entries[slot as usize];
            if let Entry::Free {
                generation: Some(generation),
            } = *entry
            {
                *entry = Entry::Live { generation, value };
                return Some(encode(slot, generation));
            }
        }
        let slot = u32::try_from(self.entries.len()).ok()?;
        self.entries.push(Entry::Live {
            generation: FIRST_GENERATION,
            value,
        });
        Some(encode(slot, FIRST_GENERATION))
    }

    pub(crate) fn get(&self, handle: u64) -> Option<&T> {
        let (slot, generation) = decode(handle);
        match self.entries.get(slot)? {
            Entry::Live {
                generation: g,
                value,
            } if *g == generation => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, handle: u64) -> Option<&mut T> {
        let (slot, generation) = decode(handle);
        match self.entries.get_mut(slot)? {
            Entry::Live {
                generation: g,
                value,
            } if *g == generation => Some(value),
            _ => None,
        }
    }

    /// Take the value behind `handle` out of the table.
    ///
    /// The slot's generation advances so `handle` goes stale. A slot whose
    /// generation would wrap back to 0 is retired permanently. Returns
    /// `None` for stale or unknown handles (double-remove is a no-op).
    pub(crate) fn remove(&mut self, handle: u64) -> Option<T> {
        let (slot, generation) = decode(handle);
        let entry = self.entries.get_mut(slot)?;
        match entry {
            Entry::Live { generation: g, .. } if *g == generation => {}
            _ => return None,
        }
        let next = generation.checked_add(1);
        let old = std::mem::replace(entry, Entry::Free { generation: next });
        if next.is_some() {
            self.free.push(slot as u32);
        }
        match old {
            Entry::Live { value, .. } => Some(value),
            Entry::Free { .. } => None,
        }
    }

    /// Number of live values.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Live { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_round_trip() {
        let mut table = HandleTable::new();
        let h = table.insert(42i32).unwrap();
        assert_eq!(table.get(h), Some(&42));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn zero_handle_is_never_valid() {
        let mut table = HandleTable::new();
        let h = table.insert(1i32).unwrap();
        assert_ne!(h, 0);
        assert_eq!(table.get(0), None);
    }

    #[test]
    fn get_mut_modifies_value() {
        let mut table = HandleTable::new();
        let h = table.insert(10i32).unwrap();
        *table.get_mut(h).unwrap() = 20;
        assert_eq!(table.get(h), Some(&20));
    }

    #[test]
    fn removed_handle_is_stale() {
        let mut table = HandleTable::new();
        let h = table.insert(99i32).unwrap();
        assert_eq!(table.remove(h), Some(99));
        assert_eq!(table.get(h), None);
        assert_eq!(table.get_mut(h), None);
        assert_eq!(table.remove(h), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut table = HandleTable::new();
        let h1 = table.insert(1i32).unwrap();
        table.remove(h1);
        let h2 = table.insert(2i32).unwrap();
        let (slot1, gen1) = decode(h1);
        let (slot2, gen2) = decode(h2);
        assert_eq!(slot1, slot2);
        assert_eq!(gen2, gen1 + 1);
        assert_eq!(table.get(h1), None);
        assert_eq!(table.get(h2), Some(&2));
    }

    #[test]
    fn unknown_slot_returns_none() {
        let table: HandleTable<i32> = HandleTable::new();
        assert_eq!(table.get(encode(999, FIRST_GENERATION)), None);
    }

    #[test]
    fn wrapped_generation_retires_slot() {
        let mut table = HandleTable::new();
        let h = table.insert(1i32).unwrap();
        table.remove(h);
        table.entries[0] = Entry::Free {
            generation: Some(u32::MAX),
        };

        let last = table.insert(2i32).unwrap();
        assert_eq!(decode(last), (0, u32::MAX));
        assert_eq!(table.remove(last), Some(2));
        assert!(!table.free.contains(&0), "wrapped slot must be retired");

        let fresh = table.insert(3i32).unwrap();
        assert_eq!(decode(fresh).0, 1, "retired slot must not be reused");
        assert_eq!(table.get(encode(0, 0)), None);
        assert_eq!(table.get(encode(0, FIRST_GENERATION)), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Against a model of live handles: every live handle resolves to
            /// its own value and every removed handle stays dead.
            #[test]
            fn table_matches_model(ops in prop::collection::vec(any::<(bool, u8)>(), 1..200)) {
                let mut table = HandleTable::new();
                let mut live: Vec<(u64, u32)> = Vec::new();
                let mut dead: Vec<u64> = Vec::new();
                for (i, (insert, pick)) in ops.into_iter().enumerate() {
                    if insert || live.is_empty() {
                        let h = table.insert(i as u32).unwrap();
                        prop_assert!(!live.iter().any(|&(l, _)| l == h));
                        live.push((h, i as u32));
                    } else {
                        let (h, v) = live.swap_remove(pick as usize % live.len());
                        prop_assert_eq!(table.remove(h), Some(v));
                        dead.push(h);
                    }
                }
                for &(h, v) in &live {
                    prop_assert_eq!(table.get(h), Some(&v));
                }
                for &h in &dead {
                    prop_assert_eq!(table.get(h), None);
                }
                prop_assert_eq!(table.len(), live.len());
            }
        }
    }
}
