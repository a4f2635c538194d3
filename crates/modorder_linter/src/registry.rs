//! Rule registry for mapping checkstyle module names to rule implementations.

use std::collections::HashMap;

use crate::Rule;

/// Properties from a checkstyle module configuration.
pub type Properties<'a> = HashMap<&'a str, &'a str>;

/// Trait for rules that can be constructed from checkstyle config properties.
pub trait FromConfig: Rule + Sized {
    /// The checkstyle module name this rule corresponds to.
    const MODULE_NAME: &'static str;

    /// Create a rule instance from config properties.
    fn from_config(properties: &Properties) -> Self;
}

/// A factory function that creates a boxed rule from properties.
type RuleFactory = fn(&Properties) -> Box<dyn Rule>;

/// Registry mapping checkstyle module names to rule factories.
pub struct RuleRegistry {
    factories: HashMap<&'static str, RuleFactory>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with all built-in rules registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register a rule type that implements FromConfig.
    pub fn register<R: FromConfig + 'static>(&mut self) {
        self.factories
            .insert(R::MODULE_NAME, |props| Box::new(R::from_config(props)));
    }

    fn register_builtins(&mut self) {
        use crate::rules::ModifierOrder;

        self.register::<ModifierOrder>();
    }

    /// Create a rule from a module name and properties.
    /// Returns None if the module name is not recognized.
    pub fn create_rule(&self, module_name: &str, properties: &Properties) -> Option<Box<dyn Rule>> {
        self.factories
            .get(module_name)
            .map(|factory| factory(properties))
    }

    /// Check if a module name is registered.
    pub fn has_rule(&self, module_name: &str) -> bool {
        self.factories.contains_key(module_name)
    }

    /// Get all registered module names, sorted.
    pub fn module_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
