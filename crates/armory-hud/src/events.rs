use armory::{MAX_SLOTS, SelectorInput, Slot};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HudEvent {
    Input(SelectorInput),
    Fire,
    Refill,
    Drop,
    Status,
    ConfigReload,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Slot must be a number from 1 to {max}, got '{0}'", max = MAX_SLOTS)]
    InvalidSlot(String),
}

impl FromStr for HudEvent {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(CommandError::Empty)?.to_lowercase();

        let event = match command.as_str() {
            "prev" => HudEvent::Input(SelectorInput::MovePrev),
            "next" => HudEvent::Input(SelectorInput::MoveNext),
            "slot" => {
                let arg = words.next().unwrap_or_default();
                let slot = arg
                    .parse()
                    .ok()
                    .and_then(Slot::new)
                    .ok_or_else(|| CommandError::InvalidSlot(arg.to_string()))?;
                HudEvent::Input(SelectorInput::CycleSlot(slot))
            }
            "confirm" => HudEvent::Input(SelectorInput::Confirm),
            "cancel" => HudEvent::Input(SelectorInput::Cancel),
            "fire" => HudEvent::Fire,
            "refill" => HudEvent::Refill,
            "drop" => HudEvent::Drop,
            "status" => HudEvent::Status,
            "reload" => HudEvent::ConfigReload,
            _ => return Err(CommandError::Unknown(command)),
        };
        Ok(event)
    }
}
