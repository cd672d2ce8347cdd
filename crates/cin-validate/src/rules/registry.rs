//! Code-keyed collection of rule definitions.

use std::collections::BTreeMap;

use cin_model::RuleCode;

use crate::error::RegistryError;
use crate::rules::definition::RuleDefinition;

/// Rules keyed by code. Iteration follows code order.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<RuleCode, RuleDefinition>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from definitions, rejecting repeated codes.
    pub fn from_rules<I>(rules: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = RuleDefinition>,
    {
        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule)?;
        }
        Ok(registry)
    }

    /// Adds a rule. Registering a code twice is an error and leaves the
    /// existing definition in place.
    pub fn register(&mut self, rule: RuleDefinition) -> Result<(), RegistryError> {
        if self.rules.contains_key(&rule.code) {
            return Err(RegistryError::DuplicateRule { code: rule.code });
        }
        self.rules.insert(rule.code.clone(), rule);
        Ok(())
    }

    /// Adds or replaces a rule, returning the definition it replaced.
    pub fn upsert(&mut self, rule: RuleDefinition) -> Option<RuleDefinition> {
        self.rules.insert(rule.code.clone(), rule)
    }

    pub fn remove(&mut self, code: &RuleCode) -> Option<RuleDefinition> {
        self.rules.remove(code)
    }

    /// Empties the registry.
    pub fn reset(&mut self) {
        self.rules.clear();
    }

    pub fn get(&self, code: &RuleCode) -> Option<&RuleDefinition> {
        self.rules.get(code)
    }

    pub fn contains(&self, code: &RuleCode) -> bool {
        self.rules.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.values()
    }

    pub fn codes(&self) -> impl Iterator<Item = &RuleCode> {
        self.rules.keys()
    }
}

impl<'a> IntoIterator for &'a RuleRegistry {
    type Item = &'a RuleDefinition;
    type IntoIter = std::collections::btree_map::Values<'a, RuleCode, RuleDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.values()
    }
}
