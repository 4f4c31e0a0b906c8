//! Damage category by generation.
//!
//! Before generation 3 a damaging move's category followed from its type
//! alone; from generation 3 on the stored per-move category applies.

use crate::data::codec::{DamageCategory, ElementType, Generation};

/// Physical flag per element type code under the type-based split.
const LEGACY_PHYSICAL: [bool; 18] = [
    false, // none
    true,  // normal
    false, // fire
    false, // water
    false, // grass
    false, // electric
    false, // ice
    true,  // fighting
    true,  // poison
    true,  // ground
    true,  // flying
    false, // psychic
    true,  // bug
    true,  // rock
    true,  // ghost
    false, // dragon
    true,  // dark
    true,  // steel
];

/// Category a damaging move of `element` had under the type-based split.
pub fn legacy_category(element: ElementType) -> DamageCategory {
    if LEGACY_PHYSICAL[element.code() as usize] {
        DamageCategory::Physical
    } else {
        DamageCategory::Special
    }
}

/// Category of a move at `generation`, given its stored category and the
/// element type it resolves to at that generation.
pub fn category_for_generation(
    stored: DamageCategory,
    resolved_element: ElementType,
    generation: Generation,
) -> DamageCategory {
    if stored == DamageCategory::Status {
        return DamageCategory::Status;
    }
    if generation >= Generation::CATEGORY_SPLIT {
        return stored;
    }
    legacy_category(resolved_element)
}
