//! The item shop: catalog, afford checks, and the purchase contract.
//!
//! The core never touches real inventories for purchases — the host
//! mirrors a player's held resource counts into a [`Wallet`], runs
//! [`Wallet::purchase`], and on success removes the consumed resources
//! and hands over the item. Presenting the shop (UI, villagers, chat
//! menus) is the host's business.

use std::collections::HashMap;

use eggwars_core::ResourceKind;
use serde::{Deserialize, Serialize};

/// One purchasable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub currency: ResourceKind,
    pub cost: u32,
}

/// A named group of items, rendered as one shop page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCategory {
    pub name: String,
    pub items: Vec<ShopItem>,
}

/// The full shop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopCatalog {
    pub categories: Vec<ShopCategory>,
}

impl ShopCatalog {
    /// The stock catalog shipped with the core. Hosts can deserialize
    /// their own instead.
    pub fn builtin() -> Self {
        let item = |name: &str, currency, cost| ShopItem {
            name: name.into(),
            currency,
            cost,
        };
        Self {
            categories: vec![
                ShopCategory {
                    name: "Blocks".into(),
                    items: vec![
                        item("Sandstone x16", ResourceKind::Iron, 4),
                        item("Wood Planks x8", ResourceKind::Iron, 8),
                        item("Obsidian x2", ResourceKind::Diamond, 4),
                    ],
                },
                ShopCategory {
                    name: "Weapons".into(),
                    items: vec![
                        item("Stone Sword", ResourceKind::Iron, 12),
                        item("Iron Sword", ResourceKind::Gold, 6),
                        item("Bow", ResourceKind::Gold, 10),
                        item("Arrow x8", ResourceKind::Gold, 4),
                    ],
                },
                ShopCategory {
                    name: "Armor".into(),
                    items: vec![
                        item("Chainmail Set", ResourceKind::Gold, 12),
                        item("Iron Set", ResourceKind::Diamond, 6),
                    ],
                },
                ShopCategory {
                    name: "Food".into(),
                    items: vec![
                        item("Bread x4", ResourceKind::Iron, 2),
                        item("Golden Apple", ResourceKind::Gold, 8),
                    ],
                },
            ],
        }
    }

    pub fn find_item(&self, name: &str) -> Option<&ShopItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Human-readable listing, one line per item under its category.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for category in &self.categories {
            lines.push(format!("— {} —", category.name));
            for item in &category.items {
                lines.push(format!(
                    "  {} · {} {}",
                    item.name,
                    item.cost,
                    item.currency.display_name()
                ));
            }
        }
        lines
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ShopError {
    #[error("no shop item named '{0}'")]
    UnknownItem(String),

    #[error("'{item}' costs {cost} {currency}, you hold {held}")]
    CannotAfford {
        item: String,
        cost: u32,
        currency: String,
        held: u32,
    },
}

/// A player's held resource counts, mirrored in by the host for the
/// duration of a purchase.
#[derive(Debug, Clone, Default)]
pub struct Wallet {
    counts: HashMap<ResourceKind, u32>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ResourceKind, count: u32) {
        *self.counts.entry(kind).or_insert(0) += count;
    }

    pub fn count(&self, kind: ResourceKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn can_afford(&self, item: &ShopItem) -> bool {
        self.count(item.currency) >= item.cost
    }

    /// Deducts the item's cost.
    ///
    /// # Errors
    /// [`ShopError::CannotAfford`] leaves the wallet untouched.
    pub fn purchase(&mut self, item: &ShopItem) -> Result<(), ShopError> {
        let held = self.count(item.currency);
        if held < item.cost {
            return Err(ShopError::CannotAfford {
                item: item.name.clone(),
                cost: item.cost,
                currency: item.currency.display_name().to_string(),
                held,
            });
        }
        self.counts.insert(item.currency, held - item.cost);
        Ok(())
    }
}
