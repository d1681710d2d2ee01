use crate::weapon::{Inventory, WeaponId, WeaponRef};
use derive_more::{AsRef, Deref, Display, From, Into};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct WeaponName(String);

crate::impl_string_newtype!(WeaponName);

/// Static description of a weapon to put into a [`Loadout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponSpec {
    pub name: WeaponName,
    pub host_slot: i32,
    pub slot_position: i32,
    /// Magazine size, or `None` for weapons that never run dry.
    pub ammo: Option<u32>,
}

impl WeaponSpec {
    pub fn new(name: impl Into<String>, host_slot: i32, slot_position: i32) -> Self {
        Self {
            name: WeaponName::new(name),
            host_slot,
            slot_position,
            ammo: None,
        }
    }

    pub fn with_ammo(mut self, rounds: u32) -> Self {
        self.ammo = Some(rounds);
        self
    }
}

#[derive(Debug)]
struct WeaponRecord {
    spec: WeaponSpec,
    rounds: Option<u32>,
    destroyed: bool,
}

/// Shared handle to a weapon in a [`Loadout`]. Ammo changes and removal are
/// visible through every clone, including those held by a cache.
#[derive(Debug, Clone)]
pub struct LoadoutWeapon {
    id: WeaponId,
    record: Arc<RwLock<WeaponRecord>>,
}

impl LoadoutWeapon {
    pub fn name(&self) -> WeaponName {
        self.record.read().spec.name.clone()
    }

    /// Rounds left, or `None` for weapons without ammunition.
    pub fn rounds(&self) -> Option<u32> {
        self.record.read().rounds
    }

    pub fn set_rounds(&self, rounds: u32) {
        let mut record = self.record.write();
        if record.rounds.is_some() {
            record.rounds = Some(rounds);
        }
    }

    pub fn refill(&self) {
        let mut record = self.record.write();
        record.rounds = record.spec.ammo;
    }

    fn consume_round(&self) -> bool {
        let mut record = self.record.write();
        match record.rounds {
            None => true,
            Some(0) => false,
            Some(n) => {
                record.rounds = Some(n - 1);
                true
            }
        }
    }

    fn destroy(&self) {
        self.record.write().destroyed = true;
    }
}

impl WeaponRef for LoadoutWeapon {
    fn id(&self) -> WeaponId {
        self.id
    }

    fn host_slot(&self) -> i32 {
        self.record.read().spec.host_slot
    }

    fn slot_position(&self) -> i32 {
        self.record.read().spec.slot_position
    }

    fn has_ammo(&self) -> bool {
        let record = self.record.read();
        !record.destroyed && record.rounds.is_none_or(|n| n > 0)
    }

    fn is_valid(&self) -> bool {
        !self.record.read().destroyed
    }
}

/// In-memory inventory.
#[derive(Debug, Default)]
pub struct Loadout {
    weapons: Vec<LoadoutWeapon>,
    equipped: Option<WeaponId>,
    next_id: u64,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: impl IntoIterator<Item = WeaponSpec>) -> Self {
        let mut loadout = Self::new();
        for spec in specs {
            loadout.give(spec);
        }
        loadout
    }

    pub fn give(&mut self, spec: WeaponSpec) -> LoadoutWeapon {
        let id = WeaponId::from(self.next_id);
        self.next_id += 1;

        let weapon = LoadoutWeapon {
            id,
            record: Arc::new(RwLock::new(WeaponRecord {
                rounds: spec.ammo,
                spec,
                destroyed: false,
            })),
        };
        self.weapons.push(weapon.clone());
        weapon
    }

    /// Removes and destroys a weapon. Handles to it stop being valid.
    pub fn remove(&mut self, id: WeaponId) -> Option<LoadoutWeapon> {
        let index = self.weapons.iter().position(|w| w.id == id)?;
        let weapon = self.weapons.remove(index);
        weapon.destroy();

        if self.equipped == Some(id) {
            self.equipped = None;
        }
        Some(weapon)
    }

    pub fn find(&self, name: &str) -> Option<&LoadoutWeapon> {
        let lower = name.to_lowercase();
        self.weapons
            .iter()
            .find(|w| w.name().to_lowercase() == lower)
    }

    pub fn equip(&mut self, id: WeaponId) -> bool {
        let found = self.weapons.iter().any(|w| w.id == id);
        if found {
            self.equipped = Some(id);
        }
        found
    }

    /// Spends one round of the equipped weapon. Returns `false` when nothing
    /// is equipped or the magazine is empty.
    pub fn fire(&mut self) -> bool {
        self.equipped().is_some_and(|w| w.consume_round())
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

impl Inventory for Loadout {
    type Weapon = LoadoutWeapon;

    fn weapons(&self) -> Vec<LoadoutWeapon> {
        self.weapons.clone()
    }

    fn equipped(&self) -> Option<LoadoutWeapon> {
        let id = self.equipped?;
        self.weapons.iter().find(|w| w.id == id).cloned()
    }

    fn select_weapon(&mut self, weapon: &LoadoutWeapon) {
        if weapon.is_valid() && self.equip(weapon.id) {
            log::info!("Equipped {}", weapon.name());
        } else {
            log::warn!("Cannot equip {}: no longer in loadout", weapon.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapons_without_magazine_always_have_ammo() {
        let mut loadout = Loadout::new();
        let crowbar = loadout.give(WeaponSpec::new("crowbar", 0, 0));

        assert_eq!(crowbar.rounds(), None);
        assert!(crowbar.has_ammo());

        crowbar.set_rounds(0);
        assert!(crowbar.has_ammo());
    }

    #[test]
    fn test_fire_spends_rounds_of_equipped_weapon() {
        let mut loadout = Loadout::new();
        let pistol = loadout.give(WeaponSpec::new("pistol", 1, 0).with_ammo(2));
        assert!(!loadout.fire());

        loadout.equip(pistol.id());
        assert!(loadout.fire());
        assert!(loadout.fire());
        assert!(!loadout.fire());
        assert_eq!(pistol.rounds(), Some(0));
        assert!(!pistol.has_ammo());

        pistol.refill();
        assert_eq!(pistol.rounds(), Some(2));
    }

    #[test]
    fn test_removed_weapons_become_invalid() {
        let mut loadout = Loadout::new();
        let pistol = loadout.give(WeaponSpec::new("pistol", 1, 0));
        loadout.equip(pistol.id());

        let removed = loadout.remove(pistol.id());

        assert!(removed.is_some());
        assert!(!pistol.is_valid());
        assert!(loadout.equipped().is_none());
        assert!(loadout.is_empty());
    }

    #[test]
    fn test_select_weapon_ignores_destroyed_handles() {
        let mut loadout = Loadout::new();
        let pistol = loadout.give(WeaponSpec::new("pistol", 1, 0));
        loadout.remove(pistol.id());

        loadout.select_weapon(&pistol);

        assert!(loadout.equipped().is_none());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let loadout = Loadout::from_specs([WeaponSpec::new("Shotgun", 2, 0)]);

        assert!(loadout.find("shotgun").is_some());
        assert!(loadout.find("rpg").is_none());
    }

    #[test]
    fn test_weapon_ids_are_unique() {
        let mut loadout = Loadout::new();
        let a = loadout.give(WeaponSpec::new("a", 0, 0));
        let b = loadout.give(WeaponSpec::new("b", 0, 0));

        assert_ne!(a.id(), b.id());
    }
}
