//! Capability registry.
//!
//! Capability names arrive from the backend as plain strings. Instead of
//! trusting arbitrary strings silently, consumers validate names against a
//! registry at startup: the builtin feature areas of the management system
//! plus anything registered by the embedding application.

use crate::{Capability, CapabilityError, PermissionSet};
use std::collections::BTreeSet;

/// Feature areas of the management system, in name order.
const BUILTIN_CAPABILITIES: &[&str] = &[
    "dashboard",
    "items",
    "notifications",
    "plots",
    "purchaseEntry",
    "purchases",
    "reports",
    "suppliers",
    "users",
    "vendors",
];

/// Known capability names.
///
/// # Example
///
/// ```
/// use sitegate_types::{Capability, CapabilityRegistry};
///
/// let mut registry = CapabilityRegistry::with_builtins();
/// let reports = Capability::new("reports").expect("name");
/// assert!(registry.contains(&reports));
///
/// let payroll = Capability::new("payroll").expect("name");
/// assert!(!registry.contains(&payroll));
/// registry.register(payroll.clone());
/// assert!(registry.contains(&payroll));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    names: BTreeSet<Capability>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the builtin feature areas.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self {
            names: BUILTIN_CAPABILITIES
                .iter()
                .map(|name| Capability::from_static(name))
                .collect(),
        }
    }

    /// Registers an additional capability name.
    pub fn register(&mut self, capability: Capability) {
        self.names.insert(capability);
    }

    /// Returns `true` if the capability name is known.
    #[must_use]
    pub fn contains(&self, capability: &Capability) -> bool {
        self.names.contains(capability)
    }

    /// Validates a single capability name.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::Unknown`] for names outside the registry.
    pub fn validate(&self, capability: &Capability) -> Result<(), CapabilityError> {
        if self.contains(capability) {
            Ok(())
        } else {
            Err(CapabilityError::Unknown(capability.as_str().to_string()))
        }
    }

    /// Validates every granted name of a custom permission set.
    ///
    /// Run at startup when an authoritative principal arrives, so a typo in
    /// backend permission data surfaces as a diagnosable error instead of a
    /// permanently dead menu entry.
    ///
    /// # Errors
    ///
    /// Returns the first unknown name encountered, in name order.
    pub fn validate_set(&self, set: &PermissionSet) -> Result<(), CapabilityError> {
        for capability in set.iter() {
            self.validate(capability)?;
        }
        Ok(())
    }

    /// Returns the number of known names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the known names in order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.names.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap(name: &str) -> Capability {
        Capability::new(name).expect("test capability name")
    }

    #[test]
    fn builtins_cover_feature_areas() {
        let registry = CapabilityRegistry::with_builtins();
        assert_eq!(registry.len(), BUILTIN_CAPABILITIES.len());
        for name in ["users", "reports", "purchaseEntry", "plots"] {
            assert!(registry.contains(&cap(name)), "missing builtin {name}");
        }
    }

    #[test]
    fn unknown_name_fails_validation() {
        let registry = CapabilityRegistry::with_builtins();
        let err = registry
            .validate(&cap("payroll"))
            .expect_err("payroll is not builtin");
        assert!(matches!(err, CapabilityError::Unknown(name) if name == "payroll"));
    }

    #[test]
    fn register_extends_the_set() {
        let mut registry = CapabilityRegistry::with_builtins();
        registry.register(cap("payroll"));
        assert!(registry.validate(&cap("payroll")).is_ok());
    }

    #[test]
    fn validate_set_flags_first_unknown_grant() {
        let registry = CapabilityRegistry::with_builtins();

        let good: PermissionSet = [cap("reports"), cap("plots")].into_iter().collect();
        assert!(registry.validate_set(&good).is_ok());

        let bad: PermissionSet = [cap("reports"), cap("payroll")].into_iter().collect();
        assert!(registry.validate_set(&bad).is_err());
    }

    #[test]
    fn empty_registry() {
        let registry = CapabilityRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains(&cap("users")));
    }
}
