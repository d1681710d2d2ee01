use crate::slot::{MAX_SLOTS, Slot};
use crate::weapon::{WeaponId, WeaponRef};
use std::collections::HashMap;

/// Weapons grouped by slot and ordered by slot position.
///
/// The cache is rebuilt only when the number of weapons reported by the
/// inventory differs from the last observed number. Swapping one weapon for
/// another leaves it stale until the count changes again.
#[derive(Debug, Clone)]
pub struct WeaponCache<W> {
    slots: [Vec<W>; MAX_SLOTS],
    positions: HashMap<WeaponId, usize>,
    observed: usize,
}

impl<W> Default for WeaponCache<W> {
    fn default() -> Self {
        Self {
            slots: Default::default(),
            positions: HashMap::new(),
            observed: 0,
        }
    }
}

impl<W: WeaponRef> WeaponCache<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds from `weapons` if their count changed. Returns whether a
    /// rebuild happened.
    pub fn refresh(&mut self, weapons: Vec<W>) -> bool {
        if weapons.len() == self.observed {
            return false;
        }

        self.clear();
        self.observed = weapons.len();

        for weapon in weapons {
            match Slot::from_host(weapon.host_slot()) {
                Some(slot) => self.slots[slot.index()].push(weapon),
                None => log::debug!(
                    "Dropping weapon {} with out-of-range slot {}",
                    weapon.id(),
                    weapon.host_slot()
                ),
            }
        }

        for weapons in &mut self.slots {
            weapons.sort_by_key(|w| w.slot_position());
        }

        self.positions = self
            .slots
            .iter()
            .flat_map(|weapons| {
                weapons
                    .iter()
                    .enumerate()
                    .map(|(i, weapon)| (weapon.id(), i + 1))
            })
            .collect();

        log::debug!(
            "Weapon cache rebuilt: {} observed, {} slotted",
            self.observed,
            self.len()
        );
        true
    }

    /// 1-based position of `weapon` within its slot.
    pub fn position_of(&self, weapon: &W) -> Option<usize> {
        self.positions.get(&weapon.id()).copied()
    }
}

impl<W> WeaponCache<W> {
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(Vec::clear);
        self.positions.clear();
        self.observed = 0;
    }

    /// Number of weapons the inventory reported at the last rebuild,
    /// including any dropped for an out-of-range slot.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Number of weapons actually placed in a slot.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    pub fn slot_len(&self, slot: Slot) -> usize {
        self.slots[slot.index()].len()
    }

    pub fn weapons_in(&self, slot: Slot) -> &[W] {
        &self.slots[slot.index()]
    }

    /// Weapon at a 1-based `position` in `slot`.
    pub fn get(&self, slot: Slot, position: usize) -> Option<&W> {
        position
            .checked_sub(1)
            .and_then(|i| self.slots[slot.index()].get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &[W])> {
        Slot::all().zip(self.slots.iter().map(Vec::as_slice))
    }
}
