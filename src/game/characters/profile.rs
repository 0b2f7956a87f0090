// Character configuration: stats plus everything needed to build one

use crate::engine::visual::QuadRigConfig;

use super::animation::AnimationSettings;
use super::movement::MovementSettings;
use super::offsets::OffsetTable;
use super::sheet::SpriteCellTable;
use super::weapon::WeaponSettings;
use super::VisualError;

/// Gameplay numbers shared by every character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStats {
    /// Movement speed (units/second)
    pub move_speed: f32,
    /// Distance covered by one teleport
    pub teleport_distance: f32,
    /// Seconds between teleports
    pub teleport_cooldown: f32,
    /// Collider radius in world units
    pub radius: f32,
}

pub const BASE_STATS: CharacterStats = CharacterStats {
    move_speed: 5.0,
    teleport_distance: 3.0,
    teleport_cooldown: 1.0,
    radius: 0.4,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    pub fn standard() -> Self {
        BASE_STATS
    }
}

/// Complete, immutable description of a character.
/// Built once, validated at spawn.
#[derive(Debug, Clone)]
pub struct CharacterProfile {
    pub stats: CharacterStats,
    pub rig: QuadRigConfig,
    pub cells: SpriteCellTable,
    pub head_offsets: OffsetTable,
    pub weapon_offsets: OffsetTable,
    pub animation: AnimationSettings,
    pub movement: MovementSettings,
    pub weapon: WeaponSettings,
}

impl CharacterProfile {
    /// The standard character on the 2x3 sheet
    pub fn standard() -> Self {
        Self {
            stats: CharacterStats::standard(),
            rig: QuadRigConfig::standard_character(),
            cells: SpriteCellTable::standard_character(),
            head_offsets: OffsetTable::standard_head(),
            weapon_offsets: OffsetTable::standard_weapon(),
            animation: AnimationSettings::default(),
            movement: MovementSettings::default(),
            weapon: WeaponSettings::default(),
        }
    }

    /// Check the parts that would otherwise only fail mid-game
    pub fn validate(&self) -> Result<(), VisualError> {
        self.animation.validate()?;
        self.cells.validate(&self.rig.sheet)?;
        Ok(())
    }
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self::standard()
    }
}
