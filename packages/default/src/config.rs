use crate::models::config::BboardConfig;
use tracing::debug;

pub fn debug_print_config(cfg: &BboardConfig) {
    debug!("🔧 Loaded Configuration:");

    if let Some(db) = &cfg.database {
        let masked: String = "*".repeat(db.password.chars().count());
        debug!("  [database]");
        debug!("    host = {}", db.host);
        debug!("    port = {}", db.port);
        debug!("    user = {}", db.user);
        debug!("    password = {}", masked);
        debug!("    name = {}", db.name);
        debug!("    max_connections = {}", db.max_connections);
        debug!("    acquire_timeout = {:?}", db.acquire_timeout);
    }

    if let Some(server) = &cfg.server {
        debug!("  [server]");
        debug!("    host = {}", server.host);
        debug!("    port = {}", server.port);
    }
}
