//! Cursor movement over a [`WeaponCache`] snapshot.
//!
//! Every walk is bounded: slot searches take at most [`MAX_SLOTS`] steps and
//! weapon searches at most one step per weapon the inventory reported.

use crate::cache::WeaponCache;
use crate::slot::{Direction, MAX_SLOTS, Slot};
use crate::weapon::WeaponRef;

/// Next slot after `start` holding at least one weapon, wrapping around.
/// Returns `start` itself when it is the only occupied slot, and when the
/// cache is empty.
pub fn next_non_empty_slot<W>(cache: &WeaponCache<W>, start: Slot, direction: Direction) -> Slot {
    if cache.is_empty() {
        return start;
    }

    let mut slot = start;
    for _ in 0..MAX_SLOTS {
        slot = slot.step(direction);
        if cache.slot_len(slot) > 0 {
            return slot;
        }
    }
    start
}

/// Moves one weapon from `(slot, position)`, crossing into the neighbouring
/// occupied slot at either end.
fn step<W>(
    cache: &WeaponCache<W>,
    slot: Slot,
    position: usize,
    direction: Direction,
) -> (Slot, usize) {
    match direction {
        Direction::Forward if position < cache.slot_len(slot) => (slot, position + 1),
        Direction::Forward => (next_non_empty_slot(cache, slot, direction), 1),
        Direction::Backward if position > 1 => (slot, position - 1),
        Direction::Backward => {
            let prev = next_non_empty_slot(cache, slot, direction);
            (prev, cache.slot_len(prev))
        }
    }
}

/// Next weapon from `(slot, position)` in `direction`.
///
/// With `skip_empty` set, weapons without ammo are passed over. If every
/// weapon is empty the walk stops after one step per observed weapon,
/// including those dropped for an out-of-range slot, and reports position
/// `0` in the slot it ended in.
pub fn next_weapon<W: WeaponRef>(
    cache: &WeaponCache<W>,
    slot: Slot,
    position: usize,
    direction: Direction,
    skip_empty: bool,
) -> (Slot, usize) {
    if cache.is_empty() {
        return (slot, position);
    }

    let (mut slot, mut position) = (slot, position);
    for _ in 0..cache.observed() {
        (slot, position) = step(cache, slot, position, direction);

        let has_ammo = cache
            .get(slot, position)
            .is_some_and(|weapon| weapon.has_ammo());
        if has_ammo || !skip_empty {
            return (slot, position);
        }
    }

    log::debug!("No weapon with ammo left, slot {} shows empty", slot);
    (slot, 0)
}
