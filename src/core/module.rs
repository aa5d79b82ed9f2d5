//! Domain module identifiers
//!
//! Every module that can take part in a link is named here. The set is
//! closed: a link definition cannot reference a module that is not listed,
//! and a misspelled module name fails to parse instead of silently creating
//! a new one.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A domain module that owns entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleName {
    ApiKey,
    Auth,
    Cart,
    Currency,
    Customer,
    Fulfillment,
    Inventory,
    Order,
    Payment,
    Pricing,
    Product,
    Promotion,
    Region,
    SalesChannel,
    StockLocation,
    Store,
    Tax,
    User,
}

impl ModuleName {
    /// All modules, in declaration order
    pub const ALL: [ModuleName; 18] = [
        ModuleName::ApiKey,
        ModuleName::Auth,
        ModuleName::Cart,
        ModuleName::Currency,
        ModuleName::Customer,
        ModuleName::Fulfillment,
        ModuleName::Inventory,
        ModuleName::Order,
        ModuleName::Payment,
        ModuleName::Pricing,
        ModuleName::Product,
        ModuleName::Promotion,
        ModuleName::Region,
        ModuleName::SalesChannel,
        ModuleName::StockLocation,
        ModuleName::Store,
        ModuleName::Tax,
        ModuleName::User,
    ];

    /// The service name of the module (e.g. "stock_location")
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleName::ApiKey => "api_key",
            ModuleName::Auth => "auth",
            ModuleName::Cart => "cart",
            ModuleName::Currency => "currency",
            ModuleName::Customer => "customer",
            ModuleName::Fulfillment => "fulfillment",
            ModuleName::Inventory => "inventory",
            ModuleName::Order => "order",
            ModuleName::Payment => "payment",
            ModuleName::Pricing => "pricing",
            ModuleName::Product => "product",
            ModuleName::Promotion => "promotion",
            ModuleName::Region => "region",
            ModuleName::SalesChannel => "sales_channel",
            ModuleName::StockLocation => "stock_location",
            ModuleName::Store => "store",
            ModuleName::Tax => "tax",
            ModuleName::User => "user",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleName::ALL
            .into_iter()
            .find(|module| module.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownModule {
                name: s.to_string(),
            })
    }
}
