//! Historical overlays: past values of a field together with the last
//! generation they applied to.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::data::codec::Generation;
use crate::error::{Error, Result};

/// A past value that supersedes the canonical one for every generation up to
/// and including `valid_through`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay<T> {
    pub valid_through: Generation,
    pub value: T,
}

impl<T> Overlay<T> {
    pub fn new(valid_through: Generation, value: T) -> Self {
        Self {
            valid_through,
            value,
        }
    }
}

/// Overlays of one field, strictly ascending by `valid_through`, every bound
/// inside the supported generations.
///
/// The ordering makes the first overlay whose bound covers a query the
/// nearest applicable one, so [`resolve`] can stop at the first match.
/// Construction (including deserialization) rejects any list that breaks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayList<T>(Vec<Overlay<T>>);

impl<T> OverlayList<T> {
    pub fn new(overlays: Vec<Overlay<T>>) -> Result<Self> {
        for overlay in &overlays {
            if !overlay.valid_through.is_supported() {
                return Err(Error::OverlayOrder(format!(
                    "bound {} outside supported generations",
                    overlay.valid_through
                )));
            }
        }
        for pair in overlays.windows(2) {
            if pair[0].valid_through >= pair[1].valid_through {
                return Err(Error::OverlayOrder(format!(
                    "bound {} followed by {}",
                    pair[0].valid_through, pair[1].valid_through
                )));
            }
        }
        Ok(Self(overlays))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Overlay<T>> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Overlay<T>] {
        &self.0
    }
}

impl<T> Default for OverlayList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T> IntoIterator for &'a OverlayList<T> {
    type Item = &'a Overlay<T>;
    type IntoIter = std::slice::Iter<'a, Overlay<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for OverlayList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OverlayList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let overlays = Vec::<Overlay<T>>::deserialize(deserializer)?;
        OverlayList::new(overlays).map_err(serde::de::Error::custom)
    }
}

/// Value of a field at `generation`: the first overlay whose bound is at or
/// after the generation, otherwise the canonical value.
pub fn resolve<T: Copy>(canonical: T, overlays: &OverlayList<T>, generation: Generation) -> T {
    overlays
        .iter()
        .find(|overlay| overlay.valid_through >= generation)
        .map_or(canonical, |overlay| overlay.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(bounds: &[(u8, char)]) -> Result<OverlayList<char>> {
        OverlayList::new(
            bounds
                .iter()
                .map(|(bound, value)| Overlay::new(Generation::new(*bound).unwrap(), *value))
                .collect(),
        )
    }

    #[test]
    fn first_covering_overlay_wins() {
        let overlays = list(&[(1, 'a'), (2, 'b')]).unwrap();
        assert_eq!(resolve('c', &overlays, Generation::I), 'a');
        assert_eq!(resolve('c', &overlays, Generation::II), 'b');
        assert_eq!(resolve('c', &overlays, Generation::III), 'c');
    }

    #[test]
    fn empty_list_is_era_invariant() {
        let overlays = OverlayList::empty();
        for generation in Generation::SUPPORTED {
            assert_eq!(resolve(7u8, &overlays, generation), 7);
        }
    }

    #[test]
    fn never_selects_an_overlay_below_the_query() {
        let overlays = list(&[(1, 'a'), (2, 'b'), (3, 'c')]).unwrap();
        for generation in Generation::SUPPORTED {
            let selected = overlays
                .iter()
                .find(|overlay| overlay.value == resolve('z', &overlays, generation))
                .unwrap();
            assert!(selected.valid_through >= generation);
        }
    }

    #[test]
    fn construction_rejects_unordered_or_duplicate_bounds() {
        assert!(matches!(list(&[(2, 'a'), (1, 'b')]), Err(Error::OverlayOrder(_))));
        assert!(matches!(list(&[(2, 'a'), (2, 'b')]), Err(Error::OverlayOrder(_))));
    }

    #[test]
    fn construction_rejects_out_of_range_bounds() {
        let beyond = OverlayList::new(vec![Overlay::new(Generation::LATEST_KNOWN, 'a')]);
        assert!(matches!(beyond, Err(Error::OverlayOrder(_))));
    }

    #[test]
    fn deserialization_enforces_order() {
        let ok: OverlayList<u8> =
            serde_json::from_str(r#"[{"valid_through":1,"value":4},{"valid_through":3,"value":5}]"#)
                .unwrap();
        assert_eq!(ok.len(), 2);
        let bad = serde_json::from_str::<OverlayList<u8>>(
            r#"[{"valid_through":3,"value":4},{"valid_through":1,"value":5}]"#,
        );
        assert!(bad.is_err());
    }
}
