use std::fmt;
use std::str::FromStr;

use cardtext::Ability;
use serde::{Deserialize, Serialize};

/// Which catalog file an item came from (or `Custom` for user-made cards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Consumable,
    Trinket,
    Leveled,
    Custom,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Consumable => "Consumable",
            Category::Trinket => "Trinket",
            Category::Leveled => "Leveled",
            Category::Custom => "Custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "consumable" => Ok(Category::Consumable),
            "trinket" => Ok(Category::Trinket),
            "leveled" => Ok(Category::Leveled),
            "custom" => Ok(Category::Custom),
            _ => Err(format!("unknown category '{}'", s)),
        }
    }
}

/// Power tier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Echelon {
    First,
    Second,
    Third,
    Fourth,
}

impl Echelon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Echelon::First => "First",
            Echelon::Second => "Second",
            Echelon::Third => "Third",
            Echelon::Fourth => "Fourth",
        }
    }
}

impl fmt::Display for Echelon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Echelon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(Echelon::First),
            "second" => Ok(Echelon::Second),
            "third" => Ok(Echelon::Third),
            "fourth" => Ok(Echelon::Fourth),
            _ => Err(format!("unknown echelon '{}'", s)),
        }
    }
}

/// Crafting-project metadata attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characteristics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl Project {
    pub fn is_empty(&self) -> bool {
        self.prerequisite.is_none()
            && self.source.is_none()
            && self.characteristics.is_empty()
            && self.goal.is_none()
    }
}

/// One catalog record. Deck identity is the `(type, name)` pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Item type line ("Consumable", "Leveled Armor", ...). Serialized as
    /// `type`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echelon: Option<Echelon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<Ability>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub power_roll: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifth_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ninth_level: Option<String>,
    /// Attached at load time; the catalog files themselves do not carry it.
    /// Deck files do, so a deck round-trips without the catalog present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Item {
    pub fn same_identity(&self, kind: &str, name: &str) -> bool {
        self.kind == kind && self.name == name
    }
}
