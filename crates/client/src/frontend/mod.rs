//! Terminal frontend event loop.
//!
//! Coordinates three concerns:
//! - runtime frames and game events (redraw, message log)
//! - keyboard input forwarded to the runtime
//! - held-key emulation on terminals without release events

mod input;
mod render;
mod sprites;
mod terminal;

pub use input::{HoldTracker, InputAction, translate};
pub use render::{RenderContext, item_name, npc_name};
pub use sprites::GlyphSprites;

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self as term_event, Event as TermEvent};
use game_content::ItemCatalog;
use game_core::{GameEvent, GameView, ItemKind};
use runtime::{Event, RuntimeHandle, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{self, Duration, Instant};

use terminal::{TerminalGuard, Tui};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(8);
const MESSAGE_LOG_LEN: usize = 5;

/// Terminal application driving one runtime session.
pub struct App {
    handle: RuntimeHandle,
    items: ItemCatalog,
    sprites: Arc<GlyphSprites>,
    holds: HoldTracker,
    view: Option<GameView>,
    selected: usize,
    log: VecDeque<String>,
}

impl App {
    pub fn new(
        handle: RuntimeHandle,
        items: ItemCatalog,
        sprites: Arc<GlyphSprites>,
        hold: Duration,
    ) -> Self {
        Self {
            handle,
            items,
            sprites,
            holds: HoldTracker::new(hold),
            view: None,
            selected: 0,
            log: VecDeque::with_capacity(MESSAGE_LOG_LEN),
        }
    }

    /// Runs until the player quits or the runtime stops.
    pub async fn run(mut self) -> Result<()> {
        let mut frames = self.handle.subscribe(Topic::Frame);
        let mut game = self.handle.subscribe(Topic::Game);

        let (mut terminal, releases) = terminal::init()?;
        let _guard = TerminalGuard { releases };
        tracing::info!(releases, "Terminal ready");

        self.view = Some(self.handle.query_view().await?);
        self.render(&mut terminal)?;

        loop {
            tokio::select! {
                frame = frames.recv() => match frame {
                    Ok(Event::Frame(view)) => {
                        self.view = Some(*view);
                        self.render(&mut terminal)?;
                    }
                    Ok(Event::Game(_)) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::trace!(skipped, "Frame subscriber lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
                event = game.recv() => match event {
                    Ok(Event::Game(event)) => self.record(&event),
                    Ok(Event::Frame(_)) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Game event subscriber lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = time::sleep(INPUT_POLL_INTERVAL) => {
                    if self.handle_input(releases).await? {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Drains pending terminal events. Returns true when the player quits.
    async fn handle_input(&mut self, releases: bool) -> Result<bool> {
        while term_event::poll(Duration::ZERO)? {
            match term_event::read()? {
                TermEvent::Key(key) => {
                    for action in translate(&key) {
                        if self.apply(action, releases).await? {
                            return Ok(true);
                        }
                    }
                }
                TermEvent::FocusLost => {
                    self.handle.release_all().await?;
                }
                _ => {}
            }
        }

        if !releases {
            for key in self.holds.expired(Instant::now()) {
                self.handle.key_up(key).await?;
            }
        }
        Ok(false)
    }

    async fn apply(&mut self, action: InputAction, releases: bool) -> Result<bool> {
        match action {
            InputAction::Press(key) => {
                if !releases {
                    self.holds.pressed(key, Instant::now());
                }
                self.handle.key_down(key).await?;
            }
            InputAction::Release(key) => {
                self.holds.released(key);
                self.handle.key_up(key).await?;
            }
            InputAction::Select(index) => self.selected = index,
            InputAction::UseSelected => {
                if let Some(kind) = self.selected_kind() {
                    self.handle.use_item(kind).await?;
                }
            }
            InputAction::DropSelected => {
                if let Some(kind) = self.selected_kind() {
                    self.handle.drop_item(kind).await?;
                }
            }
            InputAction::Quit => return Ok(true),
        }
        Ok(false)
    }

    /// Selected inventory entry, only while the pack is open.
    fn selected_kind(&self) -> Option<ItemKind> {
        let view = self.view.as_ref().filter(|view| view.inventory_open)?;
        view.inventory.get(self.selected).map(|slot| slot.kind)
    }

    fn record(&mut self, event: &GameEvent) {
        let Some(message) = describe(event, &self.items) else {
            return;
        };
        if self.log.len() == MESSAGE_LOG_LEN {
            self.log.pop_front();
        }
        self.log.push_back(message);
    }

    fn render(&self, terminal: &mut Tui) -> Result<()> {
        let Some(view) = &self.view else {
            return Ok(());
        };
        let ctx = RenderContext {
            view,
            items: &self.items,
            sprites: &self.sprites,
            selected: self.selected,
            log: &self.log,
        };
        terminal.draw(|frame| render::render(frame, &ctx))?;
        Ok(())
    }
}

/// One message-log line for events the player should read about. Notices
/// already cover locked gates and full packs.
pub fn describe(event: &GameEvent, items: &ItemCatalog) -> Option<String> {
    let text = match event {
        GameEvent::CoinCollected { total } => format!("Picked up a coin ({total})."),
        GameEvent::ItemPickedUp { kind, total } => {
            format!("Picked up {} ({total}).", item_name(items, *kind))
        }
        GameEvent::ItemUsed { kind, .. } => format!("Used {}.", item_name(items, *kind)),
        GameEvent::ItemDropped { kind, quantity } => {
            format!("Dropped {} x{quantity}.", item_name(items, *kind))
        }
        GameEvent::AreaEntered { area } => format!("Entered area {}.", area.0),
        GameEvent::Died => "You fell.".to_owned(),
        GameEvent::Restarted => "A new day at the camp.".to_owned(),
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::AreaId;

    #[test]
    fn describes_pickups_with_item_names() {
        let items = ItemCatalog::standard();
        assert_eq!(
            describe(
                &GameEvent::ItemPickedUp {
                    kind: ItemKind::Berries,
                    total: 3
                },
                &items
            )
            .as_deref(),
            Some("Picked up Berries (3).")
        );
        assert_eq!(
            describe(&GameEvent::AreaEntered { area: AreaId::RAVINE }, &items).as_deref(),
            Some("Entered area 3.")
        );
        assert_eq!(describe(&GameEvent::InventoryToggled { open: true }, &items), None);
    }
}
