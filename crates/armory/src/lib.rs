//! Weapon selection for a first-person HUD.
//!
//! The [`Selector`] owns a [`WeaponCache`] built from an [`Inventory`] and a
//! cursor over it. Input events move the cursor using the pure functions in
//! [`search`]; confirming hands the highlighted weapon back to the inventory.

pub mod cache;
pub mod loadout;
pub mod macros;
pub mod search;
pub mod selector;
pub mod slot;
pub mod weapon;

pub use cache::WeaponCache;
pub use loadout::{Loadout, LoadoutWeapon, WeaponName, WeaponSpec};
pub use selector::{Cursor, Feedback, Frame, Selector, SelectorInput};
pub use slot::{Direction, MAX_SLOTS, Slot};
pub use weapon::{Inventory, Policy, SelectorPolicy, WeaponId, WeaponRef};
