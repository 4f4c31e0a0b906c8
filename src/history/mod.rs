//! Generation-aware resolution over compiled records.
//!
//! Everything here is a pure function of compiled data and the queried
//! generation.

mod category;
mod overlay;

pub use category::{category_for_generation, legacy_category};
pub use overlay::{resolve, Overlay, OverlayList};

use crate::data::codec::{DamageCategory, ElementType, Generation};
use crate::data::model::{Creature, Move, TypePair};

/// A creature's element types at `generation`.
pub fn resolve_element_types(creature: &Creature, generation: Generation) -> TypePair {
    resolve(creature.types, &creature.past_types, generation)
}

/// A move's element type at `generation`.
pub fn resolve_element_type(mv: &Move, generation: Generation) -> ElementType {
    resolve(mv.element, &mv.past_elements, generation)
}

/// A move's damage category at `generation`.
pub fn resolve_category(mv: &Move, generation: Generation) -> DamageCategory {
    category_for_generation(mv.category, resolve_element_type(mv, generation), generation)
}

impl Creature {
    pub fn types_for(&self, generation: Generation) -> TypePair {
        resolve_element_types(self, generation)
    }
}

impl Move {
    pub fn element_for(&self, generation: Generation) -> ElementType {
        resolve_element_type(self, generation)
    }

    pub fn category_for(&self, generation: Generation) -> DamageCategory {
        resolve_category(self, generation)
    }
}
