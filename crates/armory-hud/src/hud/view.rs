use armory::{Feedback, Frame, LoadoutWeapon, Slot, WeaponRef};
use std::fmt::{self, Write};

/// Sound played for each selector outcome.
pub fn sound_cue(feedback: Feedback) -> Option<&'static str> {
    match feedback {
        Feedback::Moved => Some("wpn_moveselect"),
        Feedback::SlotOpened => Some("wpn_hudon"),
        Feedback::Equipped => Some("wpn_select"),
        Feedback::Denied => Some("wpn_denyselect"),
        Feedback::Cancelled => Some("wpn_hudoff"),
        Feedback::Ignored => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeaponState {
    Highlighted,
    Empty,
    Ready,
}

impl WeaponState {
    fn resolve(weapon: &LoadoutWeapon, highlighted: bool) -> Self {
        match (highlighted, weapon.has_ammo()) {
            (true, _) => Self::Highlighted,
            (false, false) => Self::Empty,
            (false, true) => Self::Ready,
        }
    }

    fn decorate(self, label: &str) -> String {
        match self {
            Self::Highlighted => format!(">{}<", label),
            Self::Empty => format!("({})", label),
            Self::Ready => label.to_string(),
        }
    }
}

struct SlotRow<'a> {
    slot: Slot,
    weapons: &'a [LoadoutWeapon],
    /// Cursor position when this slot is the open one.
    cursor: Option<usize>,
}

impl<'a> SlotRow<'a> {
    fn new(slot: Slot, weapons: &'a [LoadoutWeapon], cursor: Option<usize>) -> Self {
        Self {
            slot,
            weapons,
            cursor,
        }
    }

    fn draw(&self, out: &mut String) -> fmt::Result {
        let marker = if self.cursor.is_some() { '*' } else { ' ' };
        write!(out, "{}{}", marker, self.slot)?;

        if self.weapons.is_empty() {
            return writeln!(out, " -");
        }

        for (i, weapon) in self.weapons.iter().enumerate() {
            let highlighted = self.cursor == Some(i + 1);
            let state = WeaponState::resolve(weapon, highlighted);
            write!(out, " {}", state.decorate(&Self::label(weapon)))?;
        }
        writeln!(out)
    }

    fn label(weapon: &LoadoutWeapon) -> String {
        match weapon.rounds() {
            Some(rounds) => format!("{}:{}", weapon.name(), rounds),
            None => weapon.name().to_string(),
        }
    }
}

/// Text rendering of a visible selector, one row per slot.
pub fn render(frame: &Frame<'_, LoadoutWeapon>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for (slot, weapons) in frame.cache.iter() {
        let cursor = (slot == frame.slot).then_some(frame.position);
        SlotRow::new(slot, weapons, cursor).draw(&mut out)?;
    }
    Ok(out)
}
