//! Registry of compiled links
//!
//! Resolves link aliases and the reverse navigation fields each module gains,
//! and rejects conflicts between links at registration time.

use crate::config::LinksConfig;
use crate::core::error::ConfigError;
use crate::core::link::{LinkDefinition, LinkName};
use crate::core::module::ModuleName;
use crate::links::compiler::{self, CompiledLink, ReverseNavigation};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

/// Every compiled link of the process, indexed for lookup
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct LinkRegistry {
    modules: BTreeSet<ModuleName>,
    links: IndexMap<LinkName, CompiledLink>,
    /// alias name -> link
    aliases: HashMap<String, LinkName>,
    /// (module, field) -> link
    fields: HashMap<(ModuleName, String), LinkName>,
    /// table name -> link
    tables: HashMap<String, LinkName>,
}

impl LinkRegistry {
    /// Create an empty registry for the given registered modules
    pub fn new(modules: impl IntoIterator<Item = ModuleName>) -> Self {
        Self {
            modules: modules.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Compile every link of a configuration
    pub fn from_config(config: &LinksConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::new(config.modules.iter().copied());
        for definition in &config.links {
            registry.register(definition)?;
        }

        tracing::info!(
            links = registry.links.len(),
            modules = registry.modules.len(),
            "Link registry built"
        );
        Ok(registry)
    }

    /// Validate, compile and add a definition
    pub fn register(&mut self, definition: &LinkDefinition) -> Result<(), ConfigError> {
        let compiled = compiler::compile(definition, &self.modules).inspect_err(|err| {
            tracing::warn!(link = %definition.service_name, error = %err, "Rejected link definition");
        })?;
        self.check_conflicts(&compiled)?;

        let link = compiled.name();
        self.tables.insert(compiled.schema.table_name.clone(), link);
        for alias in compiled.definition.alias_names() {
            self.aliases.insert(alias.to_string(), link);
        }
        for nav in &compiled.navigations {
            self.fields.insert((nav.module, nav.field.clone()), link);
        }

        tracing::debug!(link = %link, table = %compiled.schema.table_name, "Registered link");
        self.links.insert(link, compiled);
        Ok(())
    }

    fn check_conflicts(&self, compiled: &CompiledLink) -> Result<(), ConfigError> {
        let link = compiled.name();

        if self.links.contains_key(&link) {
            return Err(ConfigError::DuplicateService { link });
        }

        if let Some(first) = self.tables.get(&compiled.schema.table_name) {
            return Err(ConfigError::DuplicateTable {
                table: compiled.schema.table_name.clone(),
                first: *first,
                second: link,
            });
        }

        for alias in compiled.definition.alias_names() {
            if let Some(first) = self.aliases.get(alias) {
                return Err(ConfigError::DuplicateAlias {
                    alias: alias.to_string(),
                    first: *first,
                    second: link,
                });
            }
        }

        for nav in &compiled.navigations {
            if let Some(first) = self.fields.get(&(nav.module, nav.field.clone())) {
                return Err(ConfigError::DuplicateField {
                    module: nav.module,
                    field: nav.field.clone(),
                    first: *first,
                    second: link,
                });
            }
        }

        Ok(())
    }

    /// Modules registered in this process
    pub fn modules(&self) -> &BTreeSet<ModuleName> {
        &self.modules
    }

    pub fn get(&self, link: LinkName) -> Option<&CompiledLink> {
        self.links.get(&link)
    }

    /// All compiled links, in registration order
    pub fn links(&self) -> impl Iterator<Item = &CompiledLink> {
        self.links.values()
    }

    /// Look a link up by one of its aliases or by its service name
    pub fn resolve_alias(&self, name: &str) -> Option<&CompiledLink> {
        self.aliases
            .get(name)
            .copied()
            .or_else(|| LinkName::from_str(name).ok())
            .and_then(|link| self.links.get(&link))
    }

    /// The navigation a module gains under `field`, with its link
    pub fn resolve_field(
        &self,
        module: ModuleName,
        field: &str,
    ) -> Option<(&CompiledLink, &ReverseNavigation)> {
        let link = self.fields.get(&(module, field.to_string()))?;
        let compiled = self.links.get(link)?;
        compiled
            .navigations
            .iter()
            .find(|nav| nav.module == module && nav.field == field)
            .map(|nav| (compiled, nav))
    }

    /// Every navigation field available on `module`
    pub fn navigations_for(&self, module: ModuleName) -> Vec<&ReverseNavigation> {
        self.links
            .values()
            .flat_map(|compiled| compiled.navigations.iter())
            .filter(|nav| nav.module == module)
            .collect()
    }

    /// Links in which `module` is an endpoint
    pub fn links_for_module(&self, module: ModuleName) -> Vec<&CompiledLink> {
        self.links
            .values()
            .filter(|compiled| compiled.endpoint(module).is_some())
            .collect()
    }
}
