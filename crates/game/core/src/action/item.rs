//! Using consumables from the inventory.

use crate::action::combat::inflict_damage;
use crate::action::inventory::slot_item;
use crate::action::{ActionError, ActionOutcome, ActionTransition, actor_mut, living_actor};
use crate::env::{ConsumableEffect, GameEnv, ItemDefinition, ItemKind};
use crate::narration::{MessageSink, MessageStyle};
use crate::state::{AiMode, EntityId, GameState, Position};

/// Use one unit of the consumable in `slot`, optionally aimed at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub actor: EntityId,
    pub slot: usize,
    pub target: Option<Position>,
}

impl UseItemAction {
    pub fn new(actor: EntityId, slot: usize, target: Option<Position>) -> Self {
        Self {
            actor,
            slot,
            target,
        }
    }

    fn consumable(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
    ) -> Result<(ItemDefinition, ConsumableEffect), ActionError> {
        let definition = slot_item(state, env, self.actor, self.slot)?;
        match definition.kind {
            ItemKind::Consumable(effect) => Ok((definition, effect)),
            _ => Err(ActionError::NotConsumable {
                name: definition.name,
            }),
        }
    }

    /// A visible target tile is required for aimed effects.
    fn visible_target(&self, state: &GameState) -> Result<Position, ActionError> {
        let target = self
            .target
            .ok_or(ActionError::InvalidTarget { target: None })?;
        if !state.world.is_visible(target) {
            return Err(ActionError::TargetNotVisible { target });
        }
        Ok(target)
    }

    /// Closest visible living actor other than the user, within `range`.
    fn lightning_target(&self, state: &GameState, range: u32) -> Result<EntityId, ActionError> {
        let user = living_actor(state, self.actor)?;
        state
            .entities
            .all_actors()
            .filter(|other| {
                other.id != user.id
                    && other.is_alive()
                    && other.floor == user.floor
                    && state.world.is_visible(other.position)
            })
            .map(|other| (user.position.chebyshev(other.position), other.id))
            .filter(|(distance, _)| *distance <= range)
            .min()
            .map(|(_, id)| id)
            .ok_or(ActionError::NoTargetInRange)
    }

    fn confusion_target(&self, state: &GameState) -> Result<EntityId, ActionError> {
        let user = living_actor(state, self.actor)?;
        let target = self.visible_target(state)?;
        let victim = state
            .entities
            .living_actor_at(user.floor, target)
            .ok_or(ActionError::InvalidTarget {
                target: Some(target),
            })?;
        if victim.id == user.id {
            return Err(ActionError::TargetIsSelf);
        }
        Ok(victim.id)
    }

    fn fireball_targets(
        &self,
        state: &GameState,
        radius: u32,
    ) -> Result<Vec<EntityId>, ActionError> {
        let user = living_actor(state, self.actor)?;
        let center = self.visible_target(state)?;
        let targets: Vec<EntityId> = state
            .entities
            .all_actors()
            .filter(|actor| {
                actor.is_alive()
                    && actor.floor == user.floor
                    && actor.position.chebyshev(center) <= radius
            })
            .map(|actor| actor.id)
            .collect();
        if targets.is_empty() {
            return Err(ActionError::NoTargetsInRadius);
        }
        Ok(targets)
    }
}

impl ActionTransition for UseItemAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        let (_, effect) = self.consumable(state, env)?;
        match effect {
            ConsumableEffect::Heal(_) => {
                if living_actor(state, self.actor)?.health.is_full() {
                    return Err(ActionError::HealthFull);
                }
            }
            ConsumableEffect::Lightning { range, .. } => {
                self.lightning_target(state, range)?;
            }
            ConsumableEffect::Confusion { .. } => {
                self.confusion_target(state)?;
            }
            ConsumableEffect::Fireball { radius, .. } => {
                self.fireball_targets(state, radius)?;
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        let (definition, effect) = self.consumable(state, env)?;

        match effect {
            ConsumableEffect::Heal(amount) => {
                let user = actor_mut(state, self.actor)?;
                let recovered = user.health.restore(amount);
                if recovered == 0 {
                    return Err(ActionError::HealthFull);
                }
                sink.add_message(
                    format!(
                        "You consume the {} and recover {recovered} health.",
                        definition.name
                    ),
                    MessageStyle::HealthRecovered,
                );
            }
            ConsumableEffect::Lightning { damage, range } => {
                let target = self.lightning_target(state, range)?;
                let name = living_actor(state, target)?.name.clone();
                sink.add_message(
                    format!(
                        "A lightning bolt strikes the {name} with a loud thunder, for {damage} damage!"
                    ),
                    MessageStyle::PlayerAttack,
                );
                inflict_damage(state, target, damage, sink)?;
            }
            ConsumableEffect::Confusion { turns } => {
                let target = self.confusion_target(state)?;
                let victim = actor_mut(state, target)?;
                victim.ai = AiMode::Confused {
                    turns_remaining: turns,
                };
                sink.add_message(
                    format!(
                        "The eyes of the {} look vacant, as it starts to stumble around!",
                        victim.name
                    ),
                    MessageStyle::StatusEffect,
                );
            }
            ConsumableEffect::Fireball { damage, radius } => {
                for target in self.fireball_targets(state, radius)? {
                    let name = living_actor(state, target)?.name.clone();
                    sink.add_message(
                        format!(
                            "The {name} is engulfed in a fiery explosion, taking {damage} damage!"
                        ),
                        MessageStyle::PlayerAttack,
                    );
                    inflict_damage(state, target, damage, sink)?;
                }
            }
        }

        actor_mut(state, self.actor)?
            .inventory
            .take_one(self.slot)
            .ok_or(ActionError::EmptySlot { slot: self.slot })?;
        Ok(ActionOutcome::Performed)
    }
}
