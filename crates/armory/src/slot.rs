use derive_more::{Display, Into};

pub const MAX_SLOTS: usize = 6;

/// A weapon category bucket, numbered `1..=MAX_SLOTS`.
///
/// Hosts number their slots from zero; [`Slot::from_host`] and
/// [`Slot::to_host`] are the only places that conversion happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Into)]
pub struct Slot(u8);

impl Slot {
    pub const FIRST: Slot = Slot(1);
    pub const LAST: Slot = Slot(MAX_SLOTS as u8);

    pub fn new(number: usize) -> Option<Self> {
        (1..=MAX_SLOTS)
            .contains(&number)
            .then(|| Self(number as u8))
    }

    pub fn from_host(host_slot: i32) -> Option<Self> {
        usize::try_from(host_slot)
            .ok()
            .and_then(|s| Self::new(s + 1))
    }

    pub fn to_host(self) -> i32 {
        i32::from(self.0) - 1
    }

    pub fn number(self) -> usize {
        usize::from(self.0)
    }

    pub(crate) fn index(self) -> usize {
        self.number() - 1
    }

    pub fn next(self) -> Self {
        if self == Self::LAST {
            Self::FIRST
        } else {
            Self(self.0 + 1)
        }
    }

    pub fn prev(self) -> Self {
        if self == Self::FIRST {
            Self::LAST
        } else {
            Self(self.0 - 1)
        }
    }

    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => self.next(),
            Direction::Backward => self.prev(),
        }
    }

    pub fn all() -> impl Iterator<Item = Slot> {
        (1..=MAX_SLOTS as u8).map(Slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}
