//! Builders for test lists and items.

use shoplist::types::{Item, List};

pub fn list(id: &str, name: &str) -> List {
    List {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Builder for creating test items
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    /// Create a new unbought item in `Other`, named after its id
    pub fn new(id: &str) -> Self {
        Self {
            item: Item {
                id: id.to_string(),
                name: format!("item {id}"),
                section: "Other".to_string(),
                quantity: 1,
                bought: false,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.item.name = name.to_string();
        self
    }

    /// Set the raw section label, which may be empty
    pub fn section(mut self, section: &str) -> Self {
        self.item.section = section.to_string();
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.item.quantity = quantity;
        self
    }

    pub fn bought(mut self) -> Self {
        self.item.bought = true;
        self
    }

    pub fn build(self) -> Item {
        self.item
    }
}
