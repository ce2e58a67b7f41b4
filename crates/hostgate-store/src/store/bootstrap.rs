//! Default policy seeding shared by all backends.

use hostgate_core::error::Result;
use hostgate_core::{Permission, RequestKind};

use super::RuleStore;

/// Frame host of the browser-wide default row.
pub const BOOTSTRAP_FRAME_HOST: &str = "*";
/// Request host of the browser-wide default row.
pub const BOOTSTRAP_REQUEST_HOST: &str = "";

/// Slots written into the default row: deny everything except images and
/// stylesheets.
pub const BOOTSTRAP_RULES: [(Option<RequestKind>, Permission); 3] = [
    (None, Permission::Deny),
    (Some(RequestKind::Image), Permission::Allow),
    (Some(RequestKind::Css), Permission::Allow),
];

/// Seed the default row.
///
/// Backends decide *when* this runs: once per in-memory instance, or while
/// the persisted `permissions_initialized` flag is still false. Every write
/// is an absolute slot write, so re-running after a partial seed completes
/// the row.
pub fn seed_defaults(store: &dyn RuleStore) -> Result<()> {
    for (kind, permission) in BOOTSTRAP_RULES {
        store.store_permissions(BOOTSTRAP_FRAME_HOST, BOOTSTRAP_REQUEST_HOST, kind, permission)?;
    }
    tracing::info!("seeded default request rules");
    Ok(())
}
