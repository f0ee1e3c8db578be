//! Core data types shared by the API facade, list sessions and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ShoplistError};

/// A named shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
}

/// A purchasable entry within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Section label as stored on the server. May be empty.
    #[serde(default)]
    pub section: String,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub bought: bool,
}

fn default_quantity() -> u32 {
    1
}

/// The backend stores quantity as a signed int it never checks. A negative
/// value loads as 0 instead of failing the whole item set.
fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = i64::deserialize(deserializer)?;
    Ok(u32::try_from(quantity.max(0)).unwrap_or(u32::MAX))
}

impl Item {
    /// Section used for display and ordering. Empty sections show as `Other`.
    pub fn display_section(&self) -> &str {
        display_section(&self.section)
    }

    /// The editable fields of this item, for building a full-record edit.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            section: self.section.clone(),
            quantity: self.quantity,
        }
    }

    /// Check a full-record edit against the local copy it replaces.
    ///
    /// Section and quantity are only checked when the edit changes them, so
    /// values the server already stores (an off-vocabulary section, a zero
    /// quantity) never block an edit of another field.
    pub fn validate_edit(&self, current: &Item) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ShoplistError::Validation("item id cannot be empty".to_string()));
        }
        let mut draft = self.to_draft();
        if draft.section == current.section {
            draft.section.clear();
        }
        if draft.quantity == current.quantity {
            draft.quantity = draft.quantity.max(1);
        }
        draft.validate()
    }
}

pub(crate) fn display_section(section: &str) -> &str {
    if section.trim().is_empty() {
        Section::DEFAULT.label()
    } else {
        section
    }
}

/// The record submitted when adding an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub section: String,
    pub quantity: u32,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section: Section::DEFAULT.label().to_string(),
            quantity: 1,
        }
    }

    pub fn section(mut self, section: Section) -> Self {
        self.section = section.label().to_string();
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Reject drafts that would never be accepted, before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ShoplistError::Validation(
                "item name cannot be empty".to_string(),
            ));
        }
        if self.quantity == 0 {
            return Err(ShoplistError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }
        if !self.section.trim().is_empty() && self.section.parse::<Section>().is_err() {
            return Err(ShoplistError::Validation(format!(
                "unknown section '{}', expected one of: {}",
                self.section,
                Section::labels().join(", ")
            )));
        }
        Ok(())
    }
}

/// Fixed vocabulary of store sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    Dairy,
    Meat,
    Vegetables,
    Bakery,
    Drinks,
    #[default]
    Other,
}

impl Section {
    pub const DEFAULT: Section = Section::Other;

    pub const ALL: [Section; 6] = [
        Section::Dairy,
        Section::Meat,
        Section::Vegetables,
        Section::Bakery,
        Section::Drinks,
        Section::Other,
    ];

    /// Label as stored on the server.
    pub fn label(self) -> &'static str {
        match self {
            Section::Dairy => "Dairy",
            Section::Meat => "Meat",
            Section::Vegetables => "Vegetables 🥕",
            Section::Bakery => "Bakery",
            Section::Drinks => "Drinks",
            Section::Other => "Other",
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Section::Dairy => "dairy",
            Section::Meat => "meat",
            Section::Vegetables => "vegetables",
            Section::Bakery => "bakery",
            Section::Drinks => "drinks",
            Section::Other => "other",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.label()).collect()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Section {
    type Err = ShoplistError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| {
                unicase::eq(section.label(), s) || unicase::eq(section.keyword(), s)
            })
            .ok_or_else(|| {
                ShoplistError::Validation(format!(
                    "unknown section '{}', expected one of: {}",
                    s,
                    Section::labels().join(", ")
                ))
            })
    }
}
