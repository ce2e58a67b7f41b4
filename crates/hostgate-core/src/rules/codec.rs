//! Packed row codec (pure functions).
//!
//! Layout: two bits per slot, slot 0 = global, slot `k + 1` = request kind
//! with ordinal `k`.
//!
//! | bits | decision  |
//! |------|-----------|
//! | `00` | Undecided |
//! | `01` | Undecided |
//! | `10` | Deny      |
//! | `11` | Allow     |
//!
//! `01` is reserved; it decodes as `Undecided` and is never written.
//! Updating one slot is always `(existing & encode_clear_mask(k)) | encode_set(k, p)`.

use super::permission::{Permission, PermissionSet, RequestKind, NUM_KINDS, NUM_SLOTS};

/// Width of one slot in bits.
pub const BITS_PER_SLOT: u32 = 2;

const SLOT_MASK: u32 = 0b11;
const ALLOW_BITS: u32 = 0b11;
const DENY_BITS: u32 = 0b10;

// Every slot must fit in the 32-bit column value.
const _: () = assert!(NUM_SLOTS as u32 * BITS_PER_SLOT <= u32::BITS);

fn slot_of(kind: Option<RequestKind>) -> usize {
    kind.map_or(0, RequestKind::slot)
}

fn shift_of(slot: usize) -> u32 {
    slot as u32 * BITS_PER_SLOT
}

/// Decode the raw two-bit group of a slot.
pub fn decode_bits(bits: u32) -> Permission {
    match bits & SLOT_MASK {
        ALLOW_BITS => Permission::Allow,
        DENY_BITS => Permission::Deny,
        _ => Permission::Undecided,
    }
}

/// Decode one slot of a packed value. Slots past the row width read as
/// `Undecided`.
pub fn decode_slot(packed: u32, slot: usize) -> Permission {
    if slot >= NUM_SLOTS {
        return Permission::Undecided;
    }
    decode_bits(packed >> shift_of(slot))
}

/// Decode a full row. Never fails.
pub fn decode(packed: u32) -> PermissionSet {
    let mut kinds = [Permission::Undecided; NUM_KINDS];
    for (i, p) in kinds.iter_mut().enumerate() {
        *p = decode_slot(packed, i + 1);
    }
    PermissionSet {
        global: decode_slot(packed, 0),
        kinds,
    }
}

/// Bits to OR into a row to record `permission` for `kind` (`None` = global).
/// `Undecided` yields 0.
pub fn encode_set(kind: Option<RequestKind>, permission: Permission) -> u32 {
    let bits = match permission {
        Permission::Allow => ALLOW_BITS,
        Permission::Deny => DENY_BITS,
        Permission::Undecided => return 0,
    };
    bits << shift_of(slot_of(kind))
}

/// All ones except the two bits of the targeted slot.
pub fn encode_clear_mask(kind: Option<RequestKind>) -> u32 {
    !(SLOT_MASK << shift_of(slot_of(kind)))
}

/// Replace exactly one slot of `existing`.
pub fn apply(existing: u32, kind: Option<RequestKind>, permission: Permission) -> u32 {
    (existing & encode_clear_mask(kind)) | encode_set(kind, permission)
}

/// Pack a whole row.
pub fn encode(set: &PermissionSet) -> u32 {
    let mut packed = encode_set(None, set.global);
    for kind in RequestKind::ALL {
        packed |= encode_set(Some(kind), set.kinds[kind.ordinal()]);
    }
    packed
}

/// Interpret a persisted integer column. Only the low 32 bits carry slots.
pub fn from_column(value: i64) -> u32 {
    value as u32
}

/// Widen a packed value for an integer column.
pub fn to_column(packed: u32) -> i64 {
    i64::from(packed)
}
