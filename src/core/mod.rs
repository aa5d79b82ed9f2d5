//! Core module containing the link definition model

pub mod error;
pub mod link;
pub mod module;
pub mod pluralize;
pub mod service;

pub use error::{ConfigError, LinkError, LinkModuleError, LinkResult, PageError, StorageError};
pub use link::{
    AliasArgs, DatabaseConfig, ExtensionRelationship, LinkAlias, LinkDefinition, LinkExtension,
    LinkName, LinkRelationship, LinkRow,
};
pub use module::ModuleName;
pub use pluralize::Pluralizer;
pub use service::LinkStore;
