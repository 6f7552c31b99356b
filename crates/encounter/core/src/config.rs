use core::ops::RangeInclusive;

/// Encounter rule constants.
///
/// Ranges are inclusive on both ends and are shared by upstream validation,
/// the initiative engine and the store's clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EncounterConfig;

impl EncounterConfig {
    // ===== rule ranges =====
    pub const INITIATIVE_MIN: i32 = -10;
    pub const INITIATIVE_MAX: i32 = 50;
    pub const DEX_MODIFIER_MIN: i32 = -5;
    pub const DEX_MODIFIER_MAX: i32 = 10;
    pub const ARMOR_CLASS_MIN: i32 = 1;
    pub const ARMOR_CLASS_MAX: i32 = 30;
    pub const MIN_MAX_HP: i32 = 1;

    // ===== dice & rounds =====
    /// Sides of the die rolled for initiative.
    pub const INITIATIVE_DIE: u32 = 20;
    /// Round number of a fresh or reset encounter.
    pub const STARTING_ROUND: u32 = 1;

    pub const fn initiative_range() -> RangeInclusive<i32> {
        Self::INITIATIVE_MIN..=Self::INITIATIVE_MAX
    }

    pub const fn dex_modifier_range() -> RangeInclusive<i32> {
        Self::DEX_MODIFIER_MIN..=Self::DEX_MODIFIER_MAX
    }

    pub const fn armor_class_range() -> RangeInclusive<i32> {
        Self::ARMOR_CLASS_MIN..=Self::ARMOR_CLASS_MAX
    }
}
