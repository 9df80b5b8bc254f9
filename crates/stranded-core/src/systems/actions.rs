//! The action interpreter: executes a single card for a single bot.
//!
//! Soft failures (a move off the map, a harvest that finds nothing, a
//! plant onto a seeded cell) return `false` and leave an event-log entry;
//! they never error. Collisions destroy every bot involved.

use hecs::{Entity, World};
use rand::rngs::StdRng;

use crate::components::{AssetKind, Bot, Card, Controller, Direction, Position};
use crate::events::EventLog;
use crate::grid::Grid;

/// Borrowed view of the game used to run bot actions. Built per execution
/// batch; `day`/`hour` stamp the entries it logs.
pub struct ActionInterpreter<'a> {
    pub world: &'a mut World,
    pub grid: &'a mut Grid,
    pub controllers: &'a mut Vec<Controller>,
    pub events: &'a mut EventLog,
    pub rng: &'a mut StdRng,
    pub day: u32,
    pub hour: u32,
    pub seedling_maturity_time: u32,
}

impl ActionInterpreter<'_> {
    /// Execute the bot's head card, then rotate its deck. Returns whether
    /// the action itself succeeded.
    pub fn execute_head(&mut self, bot: Entity) -> bool {
        let Some((pos, controller_id)) = self.bot_info(bot) else {
            return false;
        };
        let head = match self.world.get::<&Bot>(bot) {
            Ok(data) => data.deck.head(),
            Err(_) => return false,
        };
        let Some(card) = head else {
            // Freshly built bots have nothing programmed yet.
            self.record(format!(
                "Bot of controller {controller_id} idled with an empty deck at {pos}"
            ));
            return false;
        };

        let ok = match card {
            Card::Move(direction) => self.execute_move(bot, direction),
            Card::Harvest(kind) => self.execute_harvest(bot, kind),
            Card::Plant(kind) => self.execute_plant(bot, kind),
        };

        // A collision can destroy the acting bot; only survivors rotate.
        if let Ok(mut data) = self.world.get::<&mut Bot>(bot) {
            data.deck.rotate();
        }
        ok
    }

    /// Move one step. Out-of-bounds destinations are rejected in place;
    /// occupied destinations destroy the mover and every occupant.
    fn execute_move(&mut self, bot: Entity, direction: Direction) -> bool {
        let Some((old_pos, controller_id)) = self.bot_info(bot) else {
            return false;
        };
        let direction = direction.resolve(&mut *self.rng);
        let new_pos = old_pos + direction.vector();

        self.record(format!(
            "Move from {old_pos} to {new_pos} by bot of controller {controller_id}"
        ));

        if !self.grid.is_valid(new_pos) {
            self.record(format!("Move blocked at map edge {new_pos}"));
            return false;
        }

        if !self.grid.cell(new_pos).bots.is_empty() {
            self.record(format!("Collision detected at {new_pos}"));
            let mut doomed: Vec<Entity> = self.grid.cell(new_pos).bots.iter().copied().collect();
            doomed.push(bot);
            for victim in doomed {
                self.destroy_bot(victim);
            }
            return true;
        }

        self.grid.cell_mut(old_pos).bots.remove(&bot);
        self.grid.cell_mut(new_pos).bots.insert(bot);
        if let Ok(mut pos) = self.world.get::<&mut Position>(bot) {
            *pos = new_pos;
        }
        true
    }

    /// Harvest the first mature asset of `kind` under the bot, crediting
    /// its amount to the owning controller.
    fn execute_harvest(&mut self, bot: Entity, kind: AssetKind) -> bool {
        let Some((pos, controller_id)) = self.bot_info(bot) else {
            return false;
        };
        let harvested = {
            let cell = self.grid.cell_mut(pos);
            cell.find_mature(kind).map(|index| cell.assets.remove(index))
        };
        match harvested {
            Some(asset) => {
                if let Some(controller) = self.controller_mut(controller_id) {
                    controller.resources.add(kind.resource(), asset.amount as i64);
                }
                self.record(format!(
                    "Bot of controller {controller_id} harvested {} {} at {pos}",
                    asset.amount,
                    kind.name()
                ));
                true
            }
            None => {
                self.record(format!(
                    "Bot of controller {controller_id} failed to harvest {} at {pos}",
                    kind.name()
                ));
                false
            }
        }
    }

    /// Plant a seedling of `kind` under the bot. At most one seedling per
    /// cell; a second plant is a logged no-op.
    fn execute_plant(&mut self, bot: Entity, kind: AssetKind) -> bool {
        let Some((pos, controller_id)) = self.bot_info(bot) else {
            return false;
        };
        if self.grid.cell(pos).has_seedling() {
            self.record(format!(
                "Bot of controller {controller_id} failed to plant {} (seedling exists) at {pos}",
                kind.name()
            ));
            return false;
        }
        let seedling = crate::components::Asset::seedling(kind, 1, self.seedling_maturity_time);
        self.grid.cell_mut(pos).assets.push(seedling);
        self.record(format!(
            "Bot of controller {controller_id} planted {} seedling at {pos}",
            kind.name()
        ));
        true
    }

    /// Remove a bot from its cell, its controller, and the arena.
    pub fn destroy_bot(&mut self, bot: Entity) {
        let Some((pos, controller_id)) = self.bot_info(bot) else {
            return;
        };
        if let Some(controller) = self.controller_mut(controller_id) {
            controller.bots.retain(|&handle| handle != bot);
        }
        self.grid.cell_mut(pos).bots.remove(&bot);
        let _ = self.world.despawn(bot);
        self.record(format!(
            "Bot of controller {controller_id} destroyed at {pos}"
        ));
    }

    fn bot_info(&self, bot: Entity) -> Option<(Position, usize)> {
        let pos = *self.world.get::<&Position>(bot).ok()?;
        let controller_id = self.world.get::<&Bot>(bot).ok()?.controller_id;
        Some((pos, controller_id))
    }

    fn controller_mut(&mut self, id: usize) -> Option<&mut Controller> {
        self.controllers.iter_mut().find(|c| c.id == id)
    }

    fn record(&mut self, message: String) {
        self.events.push(self.day, self.hour, message);
    }
}
