//! Capability names and custom permission sets.
//!
//! A [`Capability`] is a named unit of access over a feature area of the
//! management system ("users", "reports", "purchaseEntry", ...). Identity is
//! the string name. The set is closed-ish: [`crate::CapabilityRegistry`]
//! validates names at startup, but the type itself only rejects the empty
//! string.
//!
//! A [`PermissionSet`] is the data-driven permission map carried by a
//! custom-role principal. On the wire it is a JSON object from capability
//! name to value; only entries whose value is the boolean `true` count as
//! granted. Everything else (`false`, `null`, numbers, strings, absent
//! keys) fails closed.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::ErrorCode;

/// Name of the capability gating user administration.
///
/// The operator role has a hard-coded carve-out on exactly this name.
pub const USER_ADMINISTRATION: &str = "users";

/// Errors for capability name handling.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// Capability names must be non-empty.
    #[error("capability name must not be empty")]
    EmptyName,

    /// The name is not known to the capability registry.
    #[error("unknown capability: {0}")]
    Unknown(String),
}

impl ErrorCode for CapabilityError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "CAP_EMPTY_NAME",
            Self::Unknown(_) => "CAP_UNKNOWN",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Both require a code or config change, not a retry.
        false
    }
}

/// A named unit of access over a feature area.
///
/// # Example
///
/// ```
/// use sitegate_types::Capability;
///
/// let reports = Capability::new("reports").expect("non-empty name");
/// assert_eq!(reports.as_str(), "reports");
///
/// assert!(Capability::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// Creates a capability from its name.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::EmptyName`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, CapabilityError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CapabilityError::EmptyName);
        }
        Ok(Self(name))
    }

    /// Creates a capability from a compile-time name.
    ///
    /// Used for the builtin registry table, where names are statically
    /// known to be non-empty.
    #[must_use]
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.is_empty());
        Self(name.to_string())
    }

    /// Returns the capability name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the user-administration capability.
    ///
    /// The operator role denies exactly this capability and allows all
    /// others.
    #[must_use]
    pub fn is_user_administration(&self) -> bool {
        self.0 == USER_ADMINISTRATION
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The data-driven permission map of a custom-role principal.
///
/// Internally stores only the granted names. Deserialization applies the
/// strict-true rule, so a set round-tripped through JSON preserves exactly
/// the granted entries.
///
/// # Example
///
/// ```
/// use sitegate_types::{Capability, PermissionSet};
///
/// let set: PermissionSet = serde_json::from_str(
///     r#"{"reports": true, "users": false, "items": "yes", "plots": 1}"#,
/// ).expect("valid json object");
///
/// let reports = Capability::new("reports").expect("name");
/// let users = Capability::new("users").expect("name");
/// let items = Capability::new("items").expect("name");
///
/// assert!(set.is_granted(&reports));
/// assert!(!set.is_granted(&users));  // false is not true
/// assert!(!set.is_granted(&items)); // "yes" is not the boolean true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    granted: BTreeSet<Capability>,
}

impl PermissionSet {
    /// Creates an empty set (every capability denied).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the capability is recorded as granted.
    ///
    /// Absent entries are denied; there is no wildcard.
    #[must_use]
    pub fn is_granted(&self, capability: &Capability) -> bool {
        self.granted.contains(capability)
    }

    /// Records a capability as granted.
    pub fn grant(&mut self, capability: Capability) {
        self.granted.insert(capability);
    }

    /// Removes a capability from the granted set.
    pub fn revoke(&mut self, capability: &Capability) {
        self.granted.remove(capability);
    }

    /// Returns the number of granted capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Returns `true` if nothing is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    /// Iterates over the granted capabilities in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.granted.iter()
    }
}

impl FromIterator<Capability> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
        }
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.granted.len()))?;
        for capability in &self.granted {
            map.serialize_entry(capability.as_str(), &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = PermissionSet;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from capability name to boolean")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut granted = BTreeSet::new();
                while let Some((name, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    // Strict-true rule: anything that is not the boolean
                    // `true` is treated as absent. Empty names fail closed
                    // the same way.
                    if value == serde_json::Value::Bool(true) {
                        if let Ok(capability) = Capability::new(name) {
                            granted.insert(capability);
                        }
                    }
                }
                Ok(PermissionSet { granted })
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}
