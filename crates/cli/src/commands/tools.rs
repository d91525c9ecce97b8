//! `notewright tools` — Connect to configured tool servers and show status.

use notewright_bridge::{ToolBridge, parse_server_configs};
use notewright_config::Settings;

pub async fn run() -> anyhow::Result<()> {
    let settings = Settings::load().map_err(|e| anyhow::anyhow!("Failed to load settings: {e}"))?;

    if !settings.enable_tool_servers {
        println!("Tool servers are disabled in settings.");
        return Ok(());
    }

    let servers = parse_server_configs(&settings.tool_servers);
    if servers.is_empty() {
        println!("No tool servers configured.");
        return Ok(());
    }

    let mut bridge = ToolBridge::new();
    bridge.connect(servers).await;

    println!();
    for status in bridge.server_status() {
        let state = if status.connected { "connected" } else { "disconnected" };
        println!("  {}: {} ({} tools)", status.name, state, status.tool_count);
    }
    println!();

    bridge.disconnect().await;
    Ok(())
}
