use crate::cache::WeaponCache;
use crate::search;
use crate::slot::{Direction, Slot};
use crate::weapon::{Inventory, Policy, WeaponRef};
use strum::{Display, IntoStaticStr};

/// Highlighted `(slot, position)` of the selector.
///
/// An active cursor at position `0` has a slot open with nothing selectable
/// in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Inactive,
    Active {
        slot: Slot,
        position: usize,
    },
}

impl Cursor {
    pub fn slot(self) -> Option<Slot> {
        match self {
            Self::Inactive => None,
            Self::Active { slot, .. } => Some(slot),
        }
    }

    pub fn position(self) -> usize {
        match self {
            Self::Inactive => 0,
            Self::Active { position, .. } => position,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Slot number and position, with slot `0` while inactive.
    pub fn as_pair(self) -> (usize, usize) {
        (self.slot().map_or(0, Slot::number), self.position())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorInput {
    MovePrev,
    MoveNext,
    CycleSlot(Slot),
    Confirm,
    Cancel,
}

/// Outcome of an input, for the presentation layer to turn into sound or
/// animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Feedback {
    Moved,
    SlotOpened,
    Equipped,
    Denied,
    Cancelled,
    Ignored,
}

/// What a visible selector needs to draw this frame.
#[derive(Debug)]
pub struct Frame<'a, W> {
    pub slot: Slot,
    pub position: usize,
    pub cache: &'a WeaponCache<W>,
}

impl<W: WeaponRef> Frame<'_, W> {
    pub fn highlighted(&self) -> Option<&W> {
        self.cache
            .get(self.slot, self.position)
            .filter(|weapon| weapon.is_valid())
    }
}

/// Weapon selection state for one player session.
pub struct Selector<I: Inventory, P> {
    inventory: I,
    policy: P,
    cache: WeaponCache<I::Weapon>,
    cursor: Cursor,
}

impl<I: Inventory, P: Policy> Selector<I, P> {
    pub fn new(inventory: I, policy: P) -> Self {
        Self {
            inventory,
            policy,
            cache: WeaponCache::new(),
            cursor: Cursor::Inactive,
        }
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut I {
        &mut self.inventory
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    pub fn cache(&self) -> &WeaponCache<I::Weapon> {
        &self.cache
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Forgets the cached weapons and closes the selector, e.g. on respawn.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.cursor = Cursor::Inactive;
    }

    /// Rebuilds the cache if the weapon count changed and pulls the cursor
    /// back into range.
    pub fn refresh(&mut self) {
        if !self.cache.refresh(self.inventory.weapons()) {
            return;
        }

        if let Cursor::Active { slot, position } = self.cursor {
            self.cursor = if self.cache.is_empty() {
                Cursor::Inactive
            } else {
                Cursor::Active {
                    slot,
                    position: position.min(self.cache.slot_len(slot)),
                }
            };
        }
    }

    /// Whether the selector should be drawn. Refreshes the cache first so a
    /// selector whose weapons are all gone reads as hidden.
    pub fn is_visible(&mut self) -> bool {
        self.refresh();
        self.policy.selector_enabled() && self.policy.draw_selector() && self.cursor.is_active()
    }

    /// Per-frame draw pass. Returns `None` while the selector is hidden.
    pub fn frame(&mut self) -> Option<Frame<'_, I::Weapon>> {
        if !self.is_visible() {
            return None;
        }

        let Cursor::Active { slot, position } = self.cursor else {
            return None;
        };
        Some(Frame {
            slot,
            position,
            cache: &self.cache,
        })
    }

    pub fn highlighted(&self) -> Option<&I::Weapon> {
        let Cursor::Active { slot, position } = self.cursor else {
            return None;
        };
        self.cache
            .get(slot, position)
            .filter(|weapon| weapon.is_valid())
    }

    pub fn handle(&mut self, input: SelectorInput) -> Feedback {
        let feedback = match input {
            SelectorInput::MovePrev => self.on_move_prev(),
            SelectorInput::MoveNext => self.on_move_next(),
            SelectorInput::CycleSlot(slot) => self.on_cycle_slot(slot),
            SelectorInput::Confirm => self.on_confirm(),
            SelectorInput::Cancel => self.on_cancel(),
        };
        log::debug!(
            "{:?} -> {} at {:?}",
            input,
            feedback,
            self.cursor.as_pair()
        );
        feedback
    }

    pub fn on_move_prev(&mut self) -> Feedback {
        self.move_cursor(Direction::Backward)
    }

    pub fn on_move_next(&mut self) -> Feedback {
        self.move_cursor(Direction::Forward)
    }

    fn move_cursor(&mut self, direction: Direction) -> Feedback {
        self.refresh();
        if self.cache.is_empty() {
            return Feedback::Ignored;
        }

        let (slot, position) = match self.cursor {
            Cursor::Active { slot, position } => (slot, position),
            Cursor::Inactive => self.equipped_seed().unwrap_or((Slot::FIRST, 0)),
        };

        let (slot, position) = search::next_weapon(
            &self.cache,
            slot,
            position,
            direction,
            self.policy.skip_empty_weapons(),
        );
        self.cursor = Cursor::Active { slot, position };
        Feedback::Moved
    }

    pub fn on_cycle_slot(&mut self, target: Slot) -> Feedback {
        self.refresh();
        if self.cache.is_empty() {
            return Feedback::Ignored;
        }

        let len = self.cache.slot_len(target);
        if len == 0 {
            self.cursor = Cursor::Active {
                slot: target,
                position: 0,
            };
            return Feedback::SlotOpened;
        }

        let seed = match self.cursor {
            Cursor::Inactive => self
                .equipped_seed()
                .filter(|(slot, _)| *slot == target)
                .map_or(0, |(_, position)| position.saturating_sub(1)),
            Cursor::Active { slot, position } if slot == target => position,
            Cursor::Active { .. } => 0,
        };

        let position = if seed < len { seed + 1 } else { 1 };
        self.cursor = Cursor::Active {
            slot: target,
            position,
        };
        Feedback::SlotOpened
    }

    pub fn on_confirm(&mut self) -> Feedback {
        self.refresh();
        let Cursor::Active { slot, position } = self.cursor else {
            return Feedback::Ignored;
        };
        self.cursor = Cursor::Inactive;

        if position == 0 {
            return Feedback::Denied;
        }

        match self
            .cache
            .get(slot, position)
            .filter(|weapon| weapon.is_valid())
            .cloned()
        {
            Some(weapon) => self.inventory.select_weapon(&weapon),
            None => log::debug!("Weapon at {}:{} vanished before equip", slot, position),
        }
        Feedback::Equipped
    }

    pub fn on_cancel(&mut self) -> Feedback {
        self.refresh();
        if !self.cursor.is_active() {
            return Feedback::Ignored;
        }
        self.cursor = Cursor::Inactive;
        Feedback::Cancelled
    }

    /// Slot and cached position of the equipped weapon, if it is still
    /// around.
    fn equipped_seed(&self) -> Option<(Slot, usize)> {
        let weapon = self
            .inventory
            .equipped()
            .filter(|weapon| weapon.is_valid())?;
        let slot = Slot::from_host(weapon.host_slot())?;
        let position = self.cache.position_of(&weapon)?;
        Some((slot, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadout::{Loadout, WeaponSpec};
    use crate::weapon::SelectorPolicy;

    fn slot(n: usize) -> Slot {
        Slot::new(n).unwrap()
    }

    fn active(n: usize, position: usize) -> Cursor {
        Cursor::Active {
            slot: slot(n),
            position,
        }
    }

    fn arsenal() -> Loadout {
        Loadout::from_specs([
            WeaponSpec::new("crowbar", 0, 0),
            WeaponSpec::new("pistol", 1, 0).with_ammo(17),
            WeaponSpec::new("magnum", 1, 1).with_ammo(6),
            WeaponSpec::new("shotgun", 2, 0).with_ammo(8),
        ])
    }

    fn selector(loadout: Loadout) -> Selector<Loadout, SelectorPolicy> {
        Selector::new(loadout, SelectorPolicy::default())
    }

    #[test]
    fn test_cursor_pair_uses_zero_for_inactive() {
        assert_eq!(Cursor::Inactive.as_pair(), (0, 0));
        assert_eq!(active(3, 2).as_pair(), (3, 2));
    }

    #[test]
    fn test_feedback_names_are_snake_case() {
        assert_eq!(Feedback::SlotOpened.to_string(), "slot_opened");
        let name: &'static str = Feedback::Cancelled.into();
        assert_eq!(name, "cancelled");
    }

    #[test]
    fn test_move_from_inactive_without_equipped_starts_at_first_slot() {
        let mut sel = selector(arsenal());

        assert_eq!(sel.on_move_next(), Feedback::Moved);
        assert_eq!(sel.cursor(), active(1, 1));

        sel.on_cancel();
        sel.on_move_prev();
        assert_eq!(sel.cursor(), active(3, 1));
    }

    #[test]
    fn test_move_from_inactive_seeds_from_equipped_weapon() {
        let mut loadout = arsenal();
        let pistol = loadout.find("pistol").unwrap().clone();
        loadout.equip(pistol.id());
        let mut sel = selector(loadout);

        sel.on_move_next();
        assert_eq!(sel.cursor(), active(2, 2));

        sel.on_cancel();
        sel.on_move_prev();
        assert_eq!(sel.cursor(), active(1, 1));
    }

    #[test]
    fn test_cycle_slot_advances_within_slot_and_wraps() {
        let mut sel = selector(arsenal());

        assert_eq!(sel.on_cycle_slot(slot(2)), Feedback::SlotOpened);
        assert_eq!(sel.cursor(), active(2, 1));
        sel.on_cycle_slot(slot(2));
        assert_eq!(sel.cursor(), active(2, 2));
        sel.on_cycle_slot(slot(2));
        assert_eq!(sel.cursor(), active(2, 1));
    }

    #[test]
    fn test_cycle_slot_from_other_slot_starts_at_first_position() {
        let mut sel = selector(arsenal());

        sel.on_cycle_slot(slot(2));
        sel.on_cycle_slot(slot(2));
        sel.on_cycle_slot(slot(1));
        sel.on_cycle_slot(slot(2));

        assert_eq!(sel.cursor(), active(2, 1));
    }

    #[test]
    fn test_cycle_slot_from_inactive_highlights_equipped_weapon() {
        let mut loadout = arsenal();
        let magnum = loadout.find("magnum").unwrap().clone();
        loadout.equip(magnum.id());
        let mut sel = selector(loadout);

        sel.on_cycle_slot(slot(2));
        assert_eq!(sel.cursor(), active(2, 2));

        sel.on_cancel();
        sel.on_cycle_slot(slot(3));
        assert_eq!(sel.cursor(), active(3, 1));
    }

    #[test]
    fn test_cycle_slot_ignores_ammo() {
        let mut loadout = arsenal();
        loadout.find("pistol").unwrap().set_rounds(0);
        let mut sel = selector(loadout);

        sel.on_cycle_slot(slot(2));

        assert_eq!(sel.cursor(), active(2, 1));
    }

    #[test]
    fn test_confirm_equips_highlighted_weapon() {
        let mut sel = selector(arsenal());
        sel.on_cycle_slot(slot(3));

        assert_eq!(sel.on_confirm(), Feedback::Equipped);
        assert_eq!(sel.cursor(), Cursor::Inactive);
        assert_eq!(
            sel.inventory().equipped().map(|w| w.name().to_string()),
            Some("shotgun".to_string())
        );
    }

    #[test]
    fn test_confirm_with_destroyed_weapon_closes_without_equipping() {
        let mut loadout = arsenal();
        loadout.give(WeaponSpec::new("rpg", 5, 0));
        let mut sel = selector(loadout);
        sel.on_cycle_slot(slot(3));

        // Same count: the cache keeps the destroyed handle.
        let shotgun = sel.inventory().find("shotgun").unwrap().id();
        sel.inventory_mut().remove(shotgun);
        sel.inventory_mut().give(WeaponSpec::new("grenade", 4, 0));

        assert!(sel.highlighted().is_none());
        assert_eq!(sel.on_confirm(), Feedback::Equipped);
        assert!(sel.inventory().equipped().is_none());
        assert_eq!(sel.cursor(), Cursor::Inactive);
    }

    #[test]
    fn test_confirm_and_cancel_while_inactive_are_ignored() {
        let mut sel = selector(arsenal());

        assert_eq!(sel.on_confirm(), Feedback::Ignored);
        assert_eq!(sel.on_cancel(), Feedback::Ignored);
    }

    #[test]
    fn test_cancel_closes_active_selector() {
        let mut sel = selector(arsenal());
        sel.on_move_next();

        assert_eq!(sel.on_cancel(), Feedback::Cancelled);
        assert!(!sel.is_visible());
        assert!(sel.inventory().equipped().is_none());
    }

    #[test]
    fn test_removing_weapons_clamps_cursor() {
        let mut sel = selector(arsenal());
        sel.on_cycle_slot(slot(2));
        sel.on_cycle_slot(slot(2));
        assert_eq!(sel.cursor(), active(2, 2));

        let magnum = sel.inventory().find("magnum").unwrap().id();
        sel.inventory_mut().remove(magnum);
        sel.refresh();

        assert_eq!(sel.cursor(), active(2, 1));
    }

    #[test]
    fn test_losing_every_weapon_closes_selector() {
        let mut sel = selector(Loadout::from_specs([WeaponSpec::new("pistol", 1, 0)]));
        sel.on_move_next();
        assert!(sel.is_visible());

        let pistol = sel.inventory().find("pistol").unwrap().id();
        sel.inventory_mut().remove(pistol);

        assert!(sel.frame().is_none());
        assert_eq!(sel.cursor(), Cursor::Inactive);
    }

    #[test]
    fn test_losing_every_weapon_hides_selector_without_drawing() {
        let mut sel = selector(Loadout::from_specs([WeaponSpec::new("pistol", 1, 0)]));
        sel.on_move_next();
        assert_eq!(sel.cursor(), active(2, 1));

        let pistol = sel.inventory().find("pistol").unwrap().id();
        sel.inventory_mut().remove(pistol);

        assert!(!sel.is_visible());
        assert_eq!(sel.cursor(), Cursor::Inactive);
    }

    #[test]
    fn test_policy_flags_hide_the_selector() {
        let mut sel = selector(arsenal());
        sel.on_move_next();
        assert!(sel.is_visible());

        sel.policy_mut().draw = false;
        assert!(!sel.is_visible());

        sel.policy_mut().draw = true;
        sel.policy_mut().enabled = false;
        assert!(!sel.is_visible());
        assert!(sel.frame().is_none());
    }

    #[test]
    fn test_frame_exposes_highlighted_weapon() {
        let mut sel = selector(arsenal());
        sel.on_cycle_slot(slot(2));
        sel.on_cycle_slot(slot(2));

        let frame = sel.frame().unwrap();
        assert_eq!(frame.slot, slot(2));
        assert_eq!(frame.position, 2);
        assert_eq!(
            frame.highlighted().map(|w| w.name().to_string()),
            Some("magnum".to_string())
        );
    }

    #[test]
    fn test_handle_dispatches_inputs() {
        let mut sel = selector(arsenal());

        assert_eq!(sel.handle(SelectorInput::CycleSlot(slot(1))), Feedback::SlotOpened);
        assert_eq!(sel.handle(SelectorInput::MoveNext), Feedback::Moved);
        assert_eq!(sel.cursor(), active(2, 1));
        assert_eq!(sel.handle(SelectorInput::MovePrev), Feedback::Moved);
        assert_eq!(sel.cursor(), active(1, 1));
        assert_eq!(sel.handle(SelectorInput::Cancel), Feedback::Cancelled);
        assert_eq!(sel.handle(SelectorInput::Confirm), Feedback::Ignored);
    }

    #[test]
    fn test_reset_clears_cache_and_cursor() {
        let mut sel = selector(arsenal());
        sel.on_move_next();

        sel.reset();

        assert_eq!(sel.cursor(), Cursor::Inactive);
        assert!(sel.cache().is_empty());
        assert_eq!(sel.on_move_next(), Feedback::Moved);
        assert_eq!(sel.cache().len(), 4);
    }
}
