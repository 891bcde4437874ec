//! Floor generation.
//!
//! Floors grow organically: a seed room oozes out at the map centre, and
//! every later room attaches to a random existing room through a door,
//! growing with per-axis juice that decays and can dry up outright. Vault
//! rooms translate away from their parent and reconnect with a jogged
//! tunnel. Monsters and items are bought from per-floor budgets. Every
//! placement loop gives up after a bounded number of rejected samples;
//! exhaustion means a sparser floor, never a failure.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use wyrm_content::{GenerationConfig, letters};
use wyrm_core::{
    BeastKind, BestiaryOracle, CatalogOracle, GameConfig, Glyph, IdentityTable, Position, Rarity,
    SegmentKind, TileGrid, TileKind, compute_seed,
};

#[derive(Clone, Copy, Debug)]
struct Room {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    vault: bool,
}

impl Room {
    fn centre(&self) -> Position {
        Position::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    fn contains(&self, p: Position) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    /// Touching counts as intersecting: a one-tile wall must separate rooms.
    fn intersects(&self, other: &Room) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MonsterSpawn {
    pub position: Position,
    pub kind: BeastKind,
    pub is_boss: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct ItemSpawn {
    pub position: Position,
    pub kind: SegmentKind,
}

/// Everything the scheduler needs to stock one floor.
pub struct FloorBlueprint {
    pub grid: TileGrid,
    pub player_start: Position,
    pub downstairs: Position,
    pub monsters: Vec<MonsterSpawn>,
    pub items: Vec<ItemSpawn>,
}

pub struct Generator<'a> {
    config: &'a GenerationConfig,
    catalog: &'a dyn CatalogOracle,
    bestiary: &'a dyn BestiaryOracle,
}

impl<'a> Generator<'a> {
    pub fn new(
        config: &'a GenerationConfig,
        catalog: &'a dyn CatalogOracle,
        bestiary: &'a dyn BestiaryOracle,
    ) -> Self {
        Self {
            config,
            catalog,
            bestiary,
        }
    }

    /// Generates the layout and population of one floor. Deterministic for
    /// a given `(game_seed, floor)` pair.
    pub fn generate(&self, game_seed: u64, floor: u32) -> FloorBlueprint {
        let mut rng = StdRng::seed_from_u64(compute_seed(game_seed, floor as u64, 0, 0x0f10));
        let width = self.config.map_width as i32;
        let height = self.config.map_height as i32;
        let mut grid = TileGrid::filled_with_walls(width as u32, height as u32);
        let mut rooms: Vec<Room> = Vec::new();

        // seed room at the map centre, forced up to playable size
        let (w, h) = self.ooze(&mut rng);
        let min = self.config.room_min_size as i32;
        let seed_room = Room {
            x: (width - w.max(min)) / 2,
            y: (height - h.max(min)) / 2,
            w: w.max(min),
            h: h.max(min),
            vault: false,
        };
        carve(&mut grid, &seed_room, TileKind::Floor);
        rooms.push(seed_room);

        let mut attempts = 0;
        while rooms.len() < self.config.room_target as usize
            && attempts < GameConfig::PLACEMENT_ATTEMPT_CAP
        {
            attempts += 1;
            self.attach_room(&mut rng, &mut grid, &mut rooms, floor);
        }

        let player_start = seed_room.centre();
        let stairs_room = *rooms
            .iter()
            .filter(|r| !r.vault)
            .max_by_key(|r| (player_start.distance(r.centre()), r.centre()))
            .unwrap_or(&seed_room);
        let downstairs = stairs_room.centre();

        let mut occupied: BTreeSet<Position> = BTreeSet::new();
        occupied.insert(player_start);
        occupied.insert(downstairs);

        let mut monsters = Vec::new();
        if floor >= GameConfig::FINAL_FLOOR {
            // the boss guards the terminal floor instead of stairs
            let position =
                first_open_tile(&grid, &stairs_room, &occupied).unwrap_or(downstairs);
            occupied.insert(position);
            monsters.push(MonsterSpawn {
                position,
                kind: self.bestiary.boss(),
                is_boss: true,
            });
        } else {
            grid.set_kind(downstairs, TileKind::DownStairs);
        }

        self.spend_monster_budget(&mut rng, &grid, &rooms, player_start, &mut occupied, floor, &mut monsters);
        let mut items = Vec::new();
        self.spend_item_budget(&mut rng, &grid, &rooms, &mut occupied, floor, &mut items);

        tracing::info!(
            floor,
            rooms = rooms.len(),
            monsters = monsters.len(),
            items = items.len(),
            "floor generated"
        );

        FloorBlueprint {
            grid,
            player_start,
            downstairs,
            monsters,
            items,
        }
    }

    /// Deals one distinct letter to every catalog kind for the run. The
    /// frequency-sorted pool splits into three bands; common kinds draw
    /// from the frequent end, rare kinds from the scarce end.
    pub fn assign_glyphs(&self, game_seed: u64) -> IdentityTable {
        let mut rng = StdRng::seed_from_u64(compute_seed(game_seed, 0, 0, 0x61f5));
        let mut groups: [Vec<SegmentKind>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for kind in self.catalog.kinds() {
            if let Some(def) = self.catalog.segment(kind) {
                let slot = match def.rarity {
                    Rarity::Common => 0,
                    Rarity::Uncommon => 1,
                    Rarity::Rare => 2,
                };
                groups[slot].push(kind);
            }
        }

        let pool = letters::frequency_sorted();
        let assigned: usize = groups.iter().map(Vec::len).sum();
        let spare = pool.len().saturating_sub(assigned);
        let extras = [
            spare / 3 + usize::from(spare % 3 > 0),
            spare / 3 + usize::from(spare % 3 > 1),
            spare / 3,
        ];

        let mut table = IdentityTable::empty();
        let mut cursor = 0;
        for (group, extra) in groups.iter().zip(extras) {
            let band_len = (group.len() + extra).min(pool.len() - cursor);
            let mut band: Vec<char> = pool[cursor..cursor + band_len].to_vec();
            cursor += band_len;
            band.shuffle(&mut rng);
            for (&kind, glyph) in group.iter().zip(band) {
                table.assign(Glyph(glyph), kind);
            }
        }
        table
    }

    /// Grows a room footprint one tile at a time. Each axis starts certain
    /// to grow and its juice decays by the ooze factor per tile; the first
    /// failed roll dries that axis for good. A factor of 0 never grows past
    /// 1x1, a factor of 1 always reaches the room size cap.
    fn ooze(&self, rng: &mut StdRng) -> (i32, i32) {
        let factor = self.config.ooze_factor.clamp(0.0, 1.0);
        let max = self.config.room_max_size as i32;
        let mut w: i32 = 1;
        let mut h: i32 = 1;
        let mut jx = 1.0_f64;
        let mut jy = 1.0_f64;
        while (jx > 0.0 && w < max) || (jy > 0.0 && h < max) {
            if jx > 0.0 && w < max {
                jx *= factor;
                if rng.gen_bool(jx) {
                    w += 1;
                } else {
                    jx = 0.0;
                }
            }
            if jy > 0.0 && h < max {
                jy *= factor;
                if rng.gen_bool(jy) {
                    h += 1;
                } else {
                    jy = 0.0;
                }
            }
        }
        (w, h)
    }

    /// One attempt to add a room. Returns false on any rejection; the
    /// caller's attempt counter bounds the retries.
    fn attach_room(
        &self,
        rng: &mut StdRng,
        grid: &mut TileGrid,
        rooms: &mut Vec<Room>,
        floor: u32,
    ) -> bool {
        let parent = rooms[rng.gen_range(0..rooms.len())];
        let (w, h) = self.ooze(rng);
        let min = self.config.room_min_size as i32;
        if w < min || h < min {
            return false;
        }

        if rng.gen_bool(self.config.vault_chance_on(floor).clamp(0.0, 1.0)) {
            return self.place_vault(rng, grid, rooms, parent, w, h);
        }

        // door on a random orthogonal wall of the parent, room beyond it
        let (door, room) = match rng.gen_range(0..4u8) {
            0 => {
                let door = Position::new(
                    rng.gen_range(parent.x..parent.x + parent.w),
                    parent.y - 1,
                );
                let x = rng.gen_range(door.x - w + 1..=door.x);
                (door, Room { x, y: door.y - h, w, h, vault: false })
            }
            1 => {
                let door = Position::new(
                    parent.x + parent.w,
                    rng.gen_range(parent.y..parent.y + parent.h),
                );
                let y = rng.gen_range(door.y - h + 1..=door.y);
                (door, Room { x: door.x + 1, y, w, h, vault: false })
            }
            2 => {
                let door = Position::new(
                    rng.gen_range(parent.x..parent.x + parent.w),
                    parent.y + parent.h,
                );
                let x = rng.gen_range(door.x - w + 1..=door.x);
                (door, Room { x, y: door.y + 1, w, h, vault: false })
            }
            _ => {
                let door = Position::new(
                    parent.x - 1,
                    rng.gen_range(parent.y..parent.y + parent.h),
                );
                let y = rng.gen_range(door.y - h + 1..=door.y);
                (door, Room { x: door.x - w, y, w, h, vault: false })
            }
        };

        if !self.fits(grid, rooms, &room) {
            return false;
        }
        carve(grid, &room, TileKind::Floor);
        grid.set_kind(door, TileKind::Door);
        rooms.push(room);
        true
    }

    /// A vault translates away from its parent and reconnects through a
    /// jogged tunnel ending in a door.
    fn place_vault(
        &self,
        rng: &mut StdRng,
        grid: &mut TileGrid,
        rooms: &mut Vec<Room>,
        parent: Room,
        w: i32,
        h: i32,
    ) -> bool {
        let anchor = parent.centre();
        let jog = |rng: &mut StdRng| {
            let distance = rng.gen_range(4..=9);
            if rng.gen_bool(0.5) { distance } else { -distance }
        };
        let room = Room {
            x: anchor.x + jog(rng) - w / 2,
            y: anchor.y + jog(rng) - h / 2,
            w,
            h,
            vault: true,
        };
        if !self.fits(grid, rooms, &room) {
            return false;
        }
        carve(grid, &room, TileKind::VaultFloor);

        // L-shaped tunnel from the parent centre; the last tile before the
        // vault becomes its door
        let goal = room.centre();
        let mut path = Vec::new();
        let mut x = anchor.x;
        while x != goal.x {
            x += (goal.x - x).signum();
            path.push(Position::new(x, anchor.y));
        }
        let mut y = anchor.y;
        while y != goal.y {
            y += (goal.y - y).signum();
            path.push(Position::new(goal.x, y));
        }
        let mut last_outside = None;
        for p in path {
            if room.contains(p) {
                break;
            }
            if grid.kind(p) == Some(TileKind::Wall) {
                grid.set_kind(p, TileKind::Floor);
            }
            last_outside = Some(p);
        }
        if let Some(p) = last_outside {
            grid.set_kind(p, TileKind::Door);
        }
        rooms.push(room);
        true
    }

    fn fits(&self, grid: &TileGrid, rooms: &[Room], room: &Room) -> bool {
        let in_bounds = room.x >= 1
            && room.y >= 1
            && room.x + room.w < grid.width() as i32
            && room.y + room.h < grid.height() as i32;
        in_bounds && !rooms.iter().any(|other| room.intersects(other))
    }

    #[allow(clippy::too_many_arguments)]
    fn spend_monster_budget(
        &self,
        rng: &mut StdRng,
        grid: &TileGrid,
        rooms: &[Room],
        player_start: Position,
        occupied: &mut BTreeSet<Position>,
        floor: u32,
        monsters: &mut Vec<MonsterSpawn>,
    ) {
        let pool: Vec<(BeastKind, u32)> = self
            .bestiary
            .spawnable_on(floor)
            .into_iter()
            .filter_map(|kind| {
                self.bestiary
                    .beast(kind)
                    .map(|def| (kind, def.placement_cost()))
            })
            .collect();
        let open: Vec<Room> = rooms.iter().filter(|r| !r.vault).copied().collect();

        let mut budget = self.config.monster_budget(floor);
        let mut attempts = 0;
        while budget > 0 && attempts < GameConfig::PLACEMENT_ATTEMPT_CAP {
            attempts += 1;
            let affordable: Vec<(BeastKind, u32)> = pool
                .iter()
                .filter(|(_, cost)| *cost <= budget)
                .copied()
                .collect();
            let Some(&(kind, cost)) = affordable.choose(rng) else {
                break;
            };
            let Some(position) = sample_tile(rng, grid, &open, occupied) else {
                continue;
            };
            // no ambushes on top of the starting coil
            if position.distance(player_start) <= 3 {
                continue;
            }
            occupied.insert(position);
            monsters.push(MonsterSpawn {
                position,
                kind,
                is_boss: false,
            });
            budget -= cost;
        }

        // every vault guards spawns bought from its own bonus budget, plus
        // a chance of an elite from one floor down
        let vaults: Vec<Room> = rooms.iter().filter(|r| r.vault).copied().collect();
        let elite_chance = self.config.vault_elite_chance.clamp(0.0, 1.0);
        for vault in &vaults {
            let mut bonus = self.config.vault_monster_bonus;
            let mut attempts = 0;
            while bonus > 0 && attempts < GameConfig::PLACEMENT_ATTEMPT_CAP {
                attempts += 1;
                let affordable: Vec<(BeastKind, u32)> = pool
                    .iter()
                    .filter(|(_, cost)| *cost <= bonus)
                    .copied()
                    .collect();
                let Some(&(kind, cost)) = affordable.choose(rng) else {
                    break;
                };
                let Some(position) =
                    sample_tile(rng, grid, std::slice::from_ref(vault), occupied)
                else {
                    continue;
                };
                occupied.insert(position);
                monsters.push(MonsterSpawn {
                    position,
                    kind,
                    is_boss: false,
                });
                bonus -= cost;
            }

            if !rng.gen_bool(elite_chance) {
                continue;
            }
            let deeper = self.bestiary.spawnable_on(floor + 1);
            if let Some(&kind) = deeper.choose(rng)
                && let Some(position) = sample_tile(rng, grid, std::slice::from_ref(vault), occupied)
            {
                occupied.insert(position);
                monsters.push(MonsterSpawn {
                    position,
                    kind,
                    is_boss: false,
                });
            }
        }
    }

    fn spend_item_budget(
        &self,
        rng: &mut StdRng,
        grid: &TileGrid,
        rooms: &[Room],
        occupied: &mut BTreeSet<Position>,
        floor: u32,
        items: &mut Vec<ItemSpawn>,
    ) {
        let pool: Vec<(SegmentKind, u32)> = self
            .catalog
            .kinds()
            .into_iter()
            .filter_map(|kind| {
                self.catalog
                    .segment(kind)
                    .map(|def| (kind, def.rarity.placement_cost()))
            })
            .collect();

        let open: Vec<Room> = rooms.iter().filter(|r| !r.vault).copied().collect();
        let mut budget = self.config.item_budget(floor);
        let mut attempts = 0;
        while budget > 0 && attempts < GameConfig::PLACEMENT_ATTEMPT_CAP {
            attempts += 1;
            let affordable: Vec<(SegmentKind, u32)> = pool
                .iter()
                .filter(|(_, cost)| *cost <= budget)
                .copied()
                .collect();
            let Some(&(kind, cost)) = affordable.choose(rng) else {
                break;
            };
            let Some(position) = sample_tile(rng, grid, &open, occupied) else {
                continue;
            };
            occupied.insert(position);
            items.push(ItemSpawn { position, kind });
            budget -= cost;
        }

        // bonus loot inside each vault, unpriced but bounded
        let vaults: Vec<Room> = rooms.iter().filter(|r| r.vault).copied().collect();
        for vault in &vaults {
            for _ in 0..self.config.vault_item_bonus {
                if let Some(&(kind, _)) = pool.as_slice().choose(rng)
                    && let Some(position) =
                        sample_tile(rng, grid, std::slice::from_ref(vault), occupied)
                {
                    occupied.insert(position);
                    items.push(ItemSpawn { position, kind });
                }
            }
        }
    }
}

fn carve(grid: &mut TileGrid, room: &Room, kind: TileKind) {
    for y in room.y..room.y + room.h {
        for x in room.x..room.x + room.w {
            grid.set_kind(Position::new(x, y), kind);
        }
    }
}

/// One random sample of an open tile inside a random room of `rooms`.
fn sample_tile(
    rng: &mut StdRng,
    grid: &TileGrid,
    rooms: &[Room],
    occupied: &BTreeSet<Position>,
) -> Option<Position> {
    let room = rooms.choose(rng)?;
    let position = Position::new(
        rng.gen_range(room.x..room.x + room.w),
        rng.gen_range(room.y..room.y + room.h),
    );
    (grid.is_walkable(position) && !occupied.contains(&position)).then_some(position)
}

fn first_open_tile(
    grid: &TileGrid,
    room: &Room,
    occupied: &BTreeSet<Position>,
) -> Option<Position> {
    for y in room.y..room.y + room.h {
        for x in room.x..room.x + room.w {
            let p = Position::new(x, y);
            if grid.is_walkable(p) && !occupied.contains(&p) {
                return Some(p);
            }
        }
    }
    None
}
