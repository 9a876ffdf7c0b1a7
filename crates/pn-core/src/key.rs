//! Property keys: `"<entity-kind>.<name>"` strings that identify one
//! array-valued attribute within an object's scope.

use core::fmt;
use std::str::FromStr;

use crate::error::{PnError, PnResult};

/// The two entity kinds a network is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Pore,
    Throat,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Pore => "pore",
            EntityKind::Throat => "throat",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed property key such as `pore.diameter` or `throat.conns`.
///
/// Keys are ordered and hashable so they can index stores and registries;
/// `Display` round-trips with [`PropKey::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropKey {
    kind: EntityKind,
    name: String,
}

impl PropKey {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for a pore-scoped key.
    pub fn pore(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Pore, name)
    }

    /// Shorthand for a throat-scoped key.
    pub fn throat(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Throat, name)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parse a `"pore.diameter"`-style string.
    pub fn parse(raw: &str) -> PnResult<Self> {
        let Some((prefix, name)) = raw.split_once('.') else {
            return Err(PnError::InvalidKey { raw: raw.into() });
        };
        if name.is_empty() {
            return Err(PnError::InvalidKey { raw: raw.into() });
        }
        let kind = match prefix {
            "pore" => EntityKind::Pore,
            "throat" => EntityKind::Throat,
            _ => return Err(PnError::InvalidKey { raw: raw.into() }),
        };
        Ok(Self::new(kind, name))
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.name)
    }
}

impl FromStr for PropKey {
    type Err = PnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PropKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PropKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PropKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}
