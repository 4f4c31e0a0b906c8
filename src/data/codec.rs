//! Closed enumerations of the dex and their source-name codecs.
//!
//! Each domain maps the lowercase slug used by the source dataset to a small
//! numeric code. Parsing comes in named variants so call sites state their
//! policy: `parse_strict` fails on an unknown name, `parse_lenient` maps it to
//! the `None` sentinel, and `fold` collapses synonyms onto a default method.
//! Compiled tables serialize every enum as its numeric code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $domain:literal {
            $( $variant:ident = $code:literal, $source:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "u8", try_from = "u8")]
        #[repr(u8)]
        pub enum $name {
            $( $variant = $code, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];
            pub const DOMAIN: &'static str = $domain;

            pub const fn code(self) -> u8 {
                self as u8
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Slug used by the source dataset.
            pub fn source_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $source, )+
                }
            }

            /// Short human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            fn lookup(name: &str) -> Option<Self> {
                match name {
                    $( $source => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.code()
            }
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
                $name::from_code(code).ok_or_else(|| format!("invalid {} code {}", $domain, code))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

code_enum! {
    /// Element type. Code 0 is the "no type" sentinel; 17 named types follow.
    ElementType, "element type" {
        None = 0, "none", "";
        Normal = 1, "normal", "Normal";
        Fire = 2, "fire", "Fire";
        Water = 3, "water", "Water";
        Grass = 4, "grass", "Grass";
        Electric = 5, "electric", "Electric";
        Ice = 6, "ice", "Ice";
        Fighting = 7, "fighting", "Fighting";
        Poison = 8, "poison", "Poison";
        Ground = 9, "ground", "Ground";
        Flying = 10, "flying", "Flying";
        Psychic = 11, "psychic", "Psychic";
        Bug = 12, "bug", "Bug";
        Rock = 13, "rock", "Rock";
        Ghost = 14, "ghost", "Ghost";
        Dragon = 15, "dragon", "Dragon";
        Dark = 16, "dark", "Dark";
        Steel = 17, "steel", "Steel";
    }
}

impl ElementType {
    /// Parse a named type. The sentinel is not a valid source name.
    pub fn parse_strict(name: &str) -> Result<Self> {
        match Self::lookup(name) {
            Some(ElementType::None) | None => Err(Error::unknown(Self::DOMAIN, name)),
            Some(found) => Ok(found),
        }
    }

    /// Parse a named type, mapping anything unrecognised (fairy, stellar, ...) to `None`.
    pub fn parse_lenient(name: &str) -> Self {
        Self::parse_strict(name).unwrap_or(ElementType::None)
    }

    pub fn is_none(self) -> bool {
        self == ElementType::None
    }
}

impl Default for ElementType {
    fn default() -> Self {
        ElementType::None
    }
}

code_enum! {
    /// Damage category of a move.
    DamageCategory, "damage category" {
        Physical = 0, "physical", "Phys";
        Special = 1, "special", "Spec";
        Status = 2, "status", "Stat";
    }
}

impl DamageCategory {
    pub fn parse_strict(name: &str) -> Result<Self> {
        Self::lookup(name).ok_or_else(|| Error::unknown(Self::DOMAIN, name))
    }
}

code_enum! {
    /// Individual game release. Releases sharing a version group share move data.
    GameVersion, "game version" {
        Red = 1, "red", "Red";
        Blue = 2, "blue", "Blue";
        Yellow = 3, "yellow", "Yellow";
        Gold = 4, "gold", "Gold";
        Silver = 5, "silver", "Silver";
        Crystal = 6, "crystal", "Crystal";
        Ruby = 7, "ruby", "Ruby";
        Sapphire = 8, "sapphire", "Sapphire";
        Emerald = 9, "emerald", "Emerald";
        FireRed = 10, "firered", "FireRed";
        LeafGreen = 11, "leafgreen", "LeafGreen";
    }
}

impl GameVersion {
    /// Release code for an individual release name, `None` when out of scope.
    pub fn parse(name: &str) -> Option<Self> {
        Self::lookup(name)
    }

    pub fn generation(self) -> Generation {
        match self {
            GameVersion::Red | GameVersion::Blue | GameVersion::Yellow => Generation::I,
            GameVersion::Gold | GameVersion::Silver | GameVersion::Crystal => Generation::II,
            _ => Generation::III,
        }
    }

    /// Releases belonging to one generation, in release-code order.
    pub fn in_generation(generation: Generation) -> impl Iterator<Item = GameVersion> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |version| version.generation() == generation)
    }
}

code_enum! {
    /// How a creature acquires a move.
    LearnMethod, "learn method" {
        LevelUp = 0, "level-up", "Level";
        Machine = 1, "machine", "TM/HM";
        Tutor = 2, "tutor", "Tutor";
        Egg = 3, "egg", "Egg";
    }
}

impl LearnMethod {
    pub fn parse_strict(name: &str) -> Result<Self> {
        Self::lookup(name).ok_or_else(|| Error::unknown(Self::DOMAIN, name))
    }

    /// Fold source spellings onto the four methods. Unknown methods count as level-up.
    pub fn fold(name: &str) -> Self {
        match name {
            "light-ball-egg" => LearnMethod::Egg,
            "stadium-surfing-pikachu" => LearnMethod::Tutor,
            other => Self::lookup(other).unwrap_or(LearnMethod::LevelUp),
        }
    }
}

code_enum! {
    /// How a creature is encountered in the wild.
    EncounterMethod, "encounter method" {
        Walk = 0, "walk", "Walk";
        Surf = 1, "surf", "Surf";
        OldRod = 2, "old-rod", "Old Rod";
        GoodRod = 3, "good-rod", "Good Rod";
        SuperRod = 4, "super-rod", "Super Rod";
        RockSmash = 5, "rock-smash", "Rock Smash";
        Headbutt = 6, "headbutt", "Headbutt";
    }
}

impl EncounterMethod {
    pub fn parse_strict(name: &str) -> Result<Self> {
        Self::lookup(name).ok_or_else(|| Error::unknown(Self::DOMAIN, name))
    }

    /// Fold source spellings onto the seven methods. Unknown methods count as walking.
    pub fn fold(name: &str) -> Self {
        match name {
            "grass" | "tall-grass" => EncounterMethod::Walk,
            "water" => EncounterMethod::Surf,
            "headbutt-normal" | "headbutt-special" => EncounterMethod::Headbutt,
            other => Self::lookup(other).unwrap_or(EncounterMethod::Walk),
        }
    }
}

/// Generation number. Queries are limited to [`Generation::SUPPORTED`]; the
/// full-range parser also yields later generations so past facts recorded
/// there can still be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u8);

const GENERATION_SLUGS: [&str; 9] = [
    "generation-i",
    "generation-ii",
    "generation-iii",
    "generation-iv",
    "generation-v",
    "generation-vi",
    "generation-vii",
    "generation-viii",
    "generation-ix",
];

impl Generation {
    pub const I: Generation = Generation(1);
    pub const II: Generation = Generation(2);
    pub const III: Generation = Generation(3);
    /// First generation where damage category is assigned per move.
    pub const CATEGORY_SPLIT: Generation = Generation::III;
    pub const SUPPORTED: [Generation; 3] = [Generation::I, Generation::II, Generation::III];
    pub const LATEST_KNOWN: Generation = Generation(9);

    /// A supported generation (1..=3).
    pub fn new(number: u8) -> Option<Self> {
        let generation = Generation(number);
        generation.is_supported().then_some(generation)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub fn is_supported(self) -> bool {
        (Self::I..=Self::III).contains(&self)
    }

    /// Parse `generation-i` .. `generation-iii`; anything else fails.
    pub fn parse_strict(name: &str) -> Result<Self> {
        Self::parse_full(name)
            .filter(|generation| generation.is_supported())
            .ok_or_else(|| Error::unknown("generation", name))
    }

    /// Parse every known generation slug up to [`Generation::LATEST_KNOWN`].
    pub fn parse_full(name: &str) -> Option<Self> {
        GENERATION_SLUGS
            .iter()
            .position(|slug| *slug == name)
            .map(|idx| Generation(idx as u8 + 1))
    }

    /// Clamp a later generation down to the newest supported one.
    pub fn clamp_supported(self) -> Self {
        self.min(Self::III)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gen {}", self.0)
    }
}

/// Individual releases sharing a version group's data. Groups outside the
/// supported generations map to an empty slice.
pub fn versions_for_group(group: &str) -> &'static [GameVersion] {
    match group {
        "red-blue" => &[GameVersion::Red, GameVersion::Blue],
        "yellow" => &[GameVersion::Yellow],
        "gold-silver" => &[GameVersion::Gold, GameVersion::Silver],
        "crystal" => &[GameVersion::Crystal],
        "ruby-sapphire" => &[GameVersion::Ruby, GameVersion::Sapphire],
        "emerald" => &[GameVersion::Emerald],
        "firered-leafgreen" => &[GameVersion::FireRed, GameVersion::LeafGreen],
        _ => &[],
    }
}

/// Generation an old value stays valid through when it was replaced in `group`.
///
/// The change takes effect in the group's own generation, so the old value
/// last applied one generation earlier. `None` when that is before generation
/// 1; any group after the supported range yields generation 3.
pub fn valid_through_for_change_group(group: &str) -> Option<Generation> {
    match group {
        "red-blue" | "yellow" => None,
        "gold-silver" | "crystal" => Some(Generation::I),
        "ruby-sapphire" | "emerald" | "firered-leafgreen" => Some(Generation::II),
        _ => Some(Generation::III),
    }
}
