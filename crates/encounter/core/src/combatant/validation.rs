//! Upstream validation of combatant records.
//!
//! The store assumes well-formed input and only clamps hit points. Callers
//! that accept records from users or files run [`NewCombatant::validate`]
//! first and surface the error themselves.

use super::NewCombatant;
use crate::config::EncounterConfig;
use crate::error::{EncounterError, ErrorSeverity};

/// Reasons a combatant record is rejected before insertion.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("combatant name must not be empty")]
    EmptyName,

    #[error("armor class {value} is outside {min}..={max}")]
    ArmorClassOutOfRange { value: i32, min: i32, max: i32 },

    #[error("maximum HP {value} must be at least {min}")]
    MaxHpTooLow { value: i32, min: i32 },

    #[error("current HP {value} is outside 0..={max_hp}")]
    CurrentHpOutOfRange { value: i32, max_hp: i32 },

    #[error("initiative {value} is outside {min}..={max}")]
    InitiativeOutOfRange { value: i32, min: i32, max: i32 },

    #[error("dex modifier {value} is outside {min}..={max}")]
    DexModifierOutOfRange { value: i32, min: i32, max: i32 },
}

impl EncounterError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "VALIDATION_EMPTY_NAME",
            Self::ArmorClassOutOfRange { .. } => "VALIDATION_ARMOR_CLASS",
            Self::MaxHpTooLow { .. } => "VALIDATION_MAX_HP",
            Self::CurrentHpOutOfRange { .. } => "VALIDATION_CURRENT_HP",
            Self::InitiativeOutOfRange { .. } => "VALIDATION_INITIATIVE",
            Self::DexModifierOutOfRange { .. } => "VALIDATION_DEX_MODIFIER",
        }
    }
}

impl NewCombatant {
    /// Checks every field against the encounter rule ranges.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if !EncounterConfig::armor_class_range().contains(&self.armor_class) {
            return Err(ValidationError::ArmorClassOutOfRange {
                value: self.armor_class,
                min: EncounterConfig::ARMOR_CLASS_MIN,
                max: EncounterConfig::ARMOR_CLASS_MAX,
            });
        }

        if self.max_hp < EncounterConfig::MIN_MAX_HP {
            return Err(ValidationError::MaxHpTooLow {
                value: self.max_hp,
                min: EncounterConfig::MIN_MAX_HP,
            });
        }

        if let Some(current_hp) = self.current_hp
            && !(0..=self.max_hp).contains(&current_hp)
        {
            return Err(ValidationError::CurrentHpOutOfRange {
                value: current_hp,
                max_hp: self.max_hp,
            });
        }

        if !EncounterConfig::initiative_range().contains(&self.initiative) {
            return Err(ValidationError::InitiativeOutOfRange {
                value: self.initiative,
                min: EncounterConfig::INITIATIVE_MIN,
                max: EncounterConfig::INITIATIVE_MAX,
            });
        }

        if !EncounterConfig::dex_modifier_range().contains(&self.dex_modifier) {
            return Err(ValidationError::DexModifierOutOfRange {
                value: self.dex_modifier,
                min: EncounterConfig::DEX_MODIFIER_MIN,
                max: EncounterConfig::DEX_MODIFIER_MAX,
            });
        }

        Ok(())
    }
}
