//! Top-level facade crate for hostgate.
//!
//! Re-exports the permission model and the rule stores so users can depend on a single crate.

pub mod core {
    pub use hostgate_core::*;
}

pub mod store {
    pub use hostgate_store::*;
}
