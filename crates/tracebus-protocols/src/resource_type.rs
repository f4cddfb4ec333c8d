//! Well-known resource type names used by the agent's subsystems.

pub const DAEMON: &str = "daemon";
pub const RESOURCE_DB: &str = "resource_db";
pub const RESOURCE_MANAGER: &str = "resource_manager";
pub const NETWORK_SERVICE: &str = "network_service";
pub const RESOURCE_POOL: &str = "resource_pool";
pub const FACTORY: &str = "factory";
pub const STORAGE: &str = "storage";

/// All well-known types, in no particular order.
pub const ALL: &[&str] = &[
    DAEMON,
    RESOURCE_DB,
    RESOURCE_MANAGER,
    NETWORK_SERVICE,
    RESOURCE_POOL,
    FACTORY,
    STORAGE,
];
