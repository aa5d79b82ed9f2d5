//! Built-in link definitions
//!
//! Each definition is a process-wide static built on first access and never
//! mutated afterwards.

pub mod location_fulfillment_set;
pub mod product_variant_inventory_item;
pub mod sales_channel_location;

pub use location_fulfillment_set::LOCATION_FULFILLMENT_SET;
pub use product_variant_inventory_item::PRODUCT_VARIANT_INVENTORY_ITEM;
pub use sales_channel_location::SALES_CHANNEL_LOCATION;

use crate::core::link::LinkDefinition;

/// Every built-in definition
pub fn builtin() -> Vec<&'static LinkDefinition> {
    vec![
        &*LOCATION_FULFILLMENT_SET,
        &*PRODUCT_VARIANT_INVENTORY_ITEM,
        &*SALES_CHANNEL_LOCATION,
    ]
}
