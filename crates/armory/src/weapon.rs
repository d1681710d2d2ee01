use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct WeaponId(u64);

/// Handle to a weapon owned by the host. It may be destroyed at any time,
/// so every read goes through [`WeaponRef::is_valid`] first.
pub trait WeaponRef: Clone {
    fn id(&self) -> WeaponId;

    /// Zero-based slot as reported by the host.
    fn host_slot(&self) -> i32;

    /// Sort key within the slot, ascending.
    fn slot_position(&self) -> i32;

    fn has_ammo(&self) -> bool;

    fn is_valid(&self) -> bool;
}

/// The player's weapons, and the sink that equips one of them.
pub trait Inventory {
    type Weapon: WeaponRef;

    fn weapons(&self) -> Vec<Self::Weapon>;

    fn equipped(&self) -> Option<Self::Weapon>;

    fn select_weapon(&mut self, weapon: &Self::Weapon);
}

pub trait Policy {
    fn skip_empty_weapons(&self) -> bool;
    fn selector_enabled(&self) -> bool;
    fn draw_selector(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorPolicy {
    pub enabled: bool,
    pub draw: bool,
    pub skip_empty: bool,
}

impl Default for SelectorPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            draw: true,
            skip_empty: true,
        }
    }
}

impl Policy for SelectorPolicy {
    fn skip_empty_weapons(&self) -> bool {
        self.skip_empty
    }

    fn selector_enabled(&self) -> bool {
        self.enabled
    }

    fn draw_selector(&self) -> bool {
        self.draw
    }
}
