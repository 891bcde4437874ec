//! Generation tuning, loadable from TOML.

use std::path::Path;

use serde::Deserialize;

/// Knobs for the floor generator. Everything has a playable default;
/// a TOML file only needs the fields it wants to change.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub map_width: u32,
    pub map_height: u32,

    /// Rooms the generator aims for per floor (fewer when placement
    /// attempts run dry).
    pub room_target: u32,
    /// Rooms that ooze out smaller than this are discarded.
    pub room_min_size: u32,
    /// Hard cap on a room's extent along one axis.
    pub room_max_size: u32,

    /// Per-axis growth decay in `[0, 1]`. Each tile of growth multiplies
    /// the axis's survival chance by this; 0 keeps rooms at 1x1, 1 grows
    /// them straight to `room_max_size`.
    pub ooze_factor: f64,

    /// Base chance that a room becomes a vault, scaled up with depth and
    /// capped at one in two.
    pub vault_chance: f64,
    /// Chance that a vault guards an enemy from the next floor down.
    pub vault_elite_chance: f64,
    /// Extra monster budget spent inside every vault.
    pub vault_monster_bonus: u32,
    /// Extra item budget granted inside a vault.
    pub vault_item_bonus: u32,

    /// Monster points per floor are `(floor + 1) * monster_budget_factor`.
    pub monster_budget_factor: f64,
    /// Item points per floor are `(floor + 1) * item_budget_factor`.
    pub item_budget_factor: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            map_width: 76,
            map_height: 40,
            room_target: 10,
            room_min_size: 3,
            room_max_size: 14,
            ooze_factor: 0.8,
            vault_chance: 0.04,
            vault_elite_chance: 0.4,
            vault_monster_bonus: 4,
            vault_item_bonus: 3,
            monster_budget_factor: 3.0,
            item_budget_factor: 2.0,
        }
    }
}

impl GenerationConfig {
    /// Loads tuning from a TOML file, falling back to defaults for any
    /// field the file leaves out.
    pub fn from_toml(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config: GenerationConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Vault probability on `floor`, depth-scaled and capped.
    pub fn vault_chance_on(&self, floor: u32) -> f64 {
        (self.vault_chance * floor as f64).min(0.5)
    }

    pub fn monster_budget(&self, floor: u32) -> u32 {
        ((floor + 1) as f64 * self.monster_budget_factor) as u32
    }

    pub fn item_budget(&self, floor: u32) -> u32 {
        ((floor + 1) as f64 * self.item_budget_factor) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: GenerationConfig = toml::from_str("map_width = 100").unwrap();
        assert_eq!(config.map_width, 100);
        assert_eq!(config.map_height, GenerationConfig::default().map_height);
    }

    #[test]
    fn vault_chance_is_depth_scaled_and_capped() {
        let config = GenerationConfig::default();
        assert!(config.vault_chance_on(2) > config.vault_chance_on(1));
        assert!(config.vault_chance_on(1000) <= 0.5);
    }

    #[test]
    fn budgets_grow_with_depth() {
        let config = GenerationConfig::default();
        assert!(config.monster_budget(5) > config.monster_budget(1));
        assert_eq!(config.monster_budget(1), 6);
        assert_eq!(config.item_budget(1), 4);
    }
}
