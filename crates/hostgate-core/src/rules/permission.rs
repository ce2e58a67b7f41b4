//! Decision and request-kind model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HostGateError, Result};

/// Three-valued decision for one slot of a rule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Fall through to a broader rule or ask the user.
    #[default]
    Undecided,
    Allow,
    Deny,
}

impl Permission {
    /// `true` iff the value is authoritative (`Allow` or `Deny`).
    pub fn is_decided(self) -> bool {
        !matches!(self, Permission::Undecided)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Undecided => "undecided",
            Permission::Allow => "allow",
            Permission::Deny => "deny",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = HostGateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "undecided" => Ok(Permission::Undecided),
            "allow" => Ok(Permission::Allow),
            "deny" => Ok(Permission::Deny),
            other => Err(HostGateError::BadRequest(format!(
                "unknown permission: {other} (expected allow|deny|undecided)"
            ))),
        }
    }
}

/// Network resource category that can carry its own override.
///
/// Ordinals are part of the persisted format: variants may only be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Image,
    Css,
    Script,
    Cookie,
    Frame,
    Xhr,
    Referrer,
    UnsecuredHttp,
}

/// Number of request kinds compiled into this build.
pub const NUM_KINDS: usize = RequestKind::ALL.len();

/// Slots per row: the global slot plus one per kind.
pub const NUM_SLOTS: usize = NUM_KINDS + 1;

impl RequestKind {
    /// All kinds in ordinal order.
    pub const ALL: [RequestKind; 8] = [
        RequestKind::Image,
        RequestKind::Css,
        RequestKind::Script,
        RequestKind::Cookie,
        RequestKind::Frame,
        RequestKind::Xhr,
        RequestKind::Referrer,
        RequestKind::UnsecuredHttp,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Slot index inside a row (slot 0 is the global decision).
    pub fn slot(self) -> usize {
        self.ordinal() + 1
    }

    /// Map a persisted ordinal back to a kind.
    ///
    /// An unknown ordinal means the data was written by an incompatible
    /// build and is reported instead of being clamped.
    pub fn from_ordinal(ordinal: usize) -> Result<Self> {
        Self::ALL
            .get(ordinal)
            .copied()
            .ok_or(HostGateError::InvalidRequestKind(ordinal))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Image => "image",
            RequestKind::Css => "css",
            RequestKind::Script => "script",
            RequestKind::Cookie => "cookie",
            RequestKind::Frame => "frame",
            RequestKind::Xhr => "xhr",
            RequestKind::Referrer => "referrer",
            RequestKind::UnsecuredHttp => "unsecured_http",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestKind {
    type Err = HostGateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| HostGateError::BadRequest(format!("unknown request kind: {s}")))
    }
}

/// Decoded rule row: one global decision plus one override per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionSet {
    pub global: Permission,
    pub kinds: [Permission; NUM_KINDS],
}

impl PermissionSet {
    /// All slots `Undecided`; what a never-written host pair reads as.
    pub const fn undecided() -> Self {
        Self {
            global: Permission::Undecided,
            kinds: [Permission::Undecided; NUM_KINDS],
        }
    }

    /// Build from a full slot array (slot 0 = global).
    pub fn from_slots(slots: &[Permission; NUM_SLOTS]) -> Self {
        let mut kinds = [Permission::Undecided; NUM_KINDS];
        kinds.copy_from_slice(&slots[1..]);
        Self {
            global: slots[0],
            kinds,
        }
    }

    pub fn to_slots(&self) -> [Permission; NUM_SLOTS] {
        let mut slots = [Permission::Undecided; NUM_SLOTS];
        slots[0] = self.global;
        slots[1..].copy_from_slice(&self.kinds);
        slots
    }

    /// Raw slot value; `None` addresses the global slot.
    pub fn get(&self, kind: Option<RequestKind>) -> Permission {
        match kind {
            None => self.global,
            Some(k) => self.kinds[k.ordinal()],
        }
    }

    pub fn set(&mut self, kind: Option<RequestKind>, permission: Permission) {
        match kind {
            None => self.global = permission,
            Some(k) => self.kinds[k.ordinal()] = permission,
        }
    }

    /// Decision for a concrete kind: the kind override if decided, else the
    /// global slot (which may itself be `Undecided`).
    pub fn effective(&self, kind: RequestKind) -> Permission {
        let own = self.kinds[kind.ordinal()];
        if own.is_decided() {
            own
        } else {
            self.global
        }
    }

    /// `true` when every slot is `Undecided`.
    pub fn is_empty(&self) -> bool {
        !self.global.is_decided() && self.kinds.iter().all(|p| !p.is_decided())
    }
}
