use crate::config::{self, Config};
use crate::events::HudEvent;
use crate::hud::view;
use armory::{Feedback, Inventory, Loadout, Selector, SelectorPolicy, WeaponRef};

pub struct HudApp {
    selector: Selector<Loadout, SelectorPolicy>,
}

impl HudApp {
    pub fn new(config: &Config) -> Self {
        Self {
            selector: Selector::new(config.loadout(), config.selector),
        }
    }

    pub fn selector(&self) -> &Selector<Loadout, SelectorPolicy> {
        &self.selector
    }

    /// Swaps in a new loadout and policy. The selector starts over closed.
    pub fn apply_config(&mut self, config: &Config) {
        *self.selector.inventory_mut() = config.loadout();
        *self.selector.policy_mut() = config.selector;
        self.selector.reset();
    }

    pub fn update(&mut self, event: HudEvent) -> Option<Feedback> {
        match event {
            HudEvent::Input(input) => {
                let feedback = self.selector.handle(input);
                if let Some(cue) = view::sound_cue(feedback) {
                    log::info!("Sound: {}", cue);
                }
                self.present();
                return Some(feedback);
            }
            HudEvent::Fire => {
                let inventory = self.selector.inventory_mut();
                let Some(weapon) = inventory.equipped() else {
                    log::info!("Nothing equipped");
                    return None;
                };
                if inventory.fire() {
                    log::info!("Fired {}", weapon.name());
                } else {
                    log::info!("{} is empty", weapon.name());
                }
            }
            HudEvent::Refill => match self.selector.inventory().equipped() {
                Some(weapon) => {
                    weapon.refill();
                    log::info!("Refilled {}", weapon.name());
                }
                None => log::info!("Nothing equipped"),
            },
            HudEvent::Drop => {
                let inventory = self.selector.inventory_mut();
                match inventory.equipped() {
                    Some(weapon) => {
                        inventory.remove(weapon.id());
                        log::info!("Dropped {}", weapon.name());
                    }
                    None => log::info!("Nothing equipped"),
                }
                self.present();
            }
            HudEvent::Status => self.present(),
            HudEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(&new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        None
    }

    /// Renders the selector if it is visible this frame.
    pub fn draw(&mut self) -> Option<String> {
        let frame = self.selector.frame()?;
        match view::render(&frame) {
            Ok(text) => Some(text),
            Err(e) => {
                log::error!("Drawing error: {}", e);
                None
            }
        }
    }

    fn present(&mut self) {
        match self.draw() {
            Some(text) => print!("{}", text),
            None => log::debug!("Selector hidden"),
        }
    }
}
