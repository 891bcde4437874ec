//! Entity collections and spatial queries.

use std::collections::BTreeMap;

use crate::state::types::actor::ActorState;
use crate::state::types::chain::BodyChain;
use crate::state::types::item::ItemState;
use crate::state::types::{EntityId, Position};

/// Every entity on the current floor: the player (with their body chain),
/// enemies, and loose ground items. Maps are `BTreeMap` so iteration order
/// is the id order and replays stay deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: ActorState,
    pub chain: BodyChain,
    pub npcs: BTreeMap<EntityId, ActorState>,
    pub items: BTreeMap<EntityId, ItemState>,
}

impl EntitiesState {
    pub fn new(player: ActorState) -> Self {
        Self {
            player,
            chain: BodyChain::empty(),
            npcs: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if id.is_player() {
            Some(&self.player)
        } else {
            self.npcs.get(&id)
        }
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if id.is_player() {
            Some(&mut self.player)
        } else {
            self.npcs.get_mut(&id)
        }
    }

    /// The living actor standing on `position`, if any. Lowest id wins for
    /// npcs, but two living actors never share a tile in a valid state.
    pub fn actor_at(&self, position: Position) -> Option<&ActorState> {
        if self.player.is_alive() && self.player.position == position {
            return Some(&self.player);
        }
        self.npcs
            .values()
            .find(|npc| npc.is_alive() && npc.position == position)
    }

    pub fn npc_at(&self, position: Position) -> Option<&ActorState> {
        self.npcs
            .values()
            .find(|npc| npc.is_alive() && npc.position == position)
    }

    pub fn ground_item_at(&self, position: Position) -> Option<&ItemState> {
        self.items.values().find(|item| item.position == position)
    }

    /// Whether anything at `position` blocks movement: a blocking actor, a
    /// solid chain segment, or a solid ground item (statues).
    pub fn blocks_movement_at(&self, position: Position) -> bool {
        if self
            .actor_at(position)
            .is_some_and(ActorState::blocks_movement)
        {
            return true;
        }
        if self.chain.segment_at(position).is_some() {
            return true;
        }
        self.items
            .values()
            .any(|item| item.position == position && item.blocks_movement())
    }

    pub fn spawn_npc(&mut self, npc: ActorState) {
        self.npcs.insert(npc.id, npc);
    }

    pub fn remove_npc(&mut self, id: EntityId) -> Option<ActorState> {
        self.npcs.remove(&id)
    }

    pub fn place_item(&mut self, item: ItemState) {
        self.items.insert(item.id, item);
    }

    /// Lifts a ground item out of the floor map, e.g. into the chain.
    pub fn take_ground_item(&mut self, id: EntityId) -> Option<ItemState> {
        self.items.remove(&id)
    }

    pub fn living_npc_ids(&self) -> Vec<EntityId> {
        self.npcs
            .values()
            .filter(|npc| npc.is_alive())
            .map(|npc| npc.id)
            .collect()
    }
}
