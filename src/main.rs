use simsar_console::gateway;
use simsar_console::modules;

#[tokio::main]
async fn main() -> Result<(), String> {
    modules::logger::init_logger();

    let mut config = match modules::config::load_console_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!("failed to load console config: {}. using defaults", err);
            let cfg = modules::config::ConsoleConfig::default();
            let _ = modules::config::save_console_config(&cfg);
            cfg
        }
    };

    if let Ok(value) = std::env::var("BACKEND_URL") {
        if !value.trim().is_empty() {
            config.backend_url = Some(value);
        }
    }

    if let Ok(value) = std::env::var("SIMSAR_ALLOW_LAN") {
        let enabled = matches!(value.as_str(), "1" | "true" | "yes" | "on");
        if enabled {
            config.allow_lan_access = true;
        }
    }

    if let Ok(value) = std::env::var("SIMSAR_PORT") {
        match value.parse::<u16>() {
            Ok(port) => config.port = port,
            Err(_) => tracing::warn!("ignoring invalid SIMSAR_PORT value: {}", value),
        }
    }

    if config.backend_origin().is_none() {
        tracing::warn!(
            "BACKEND_URL is not configured; proxied routes will fail per request, demo endpoints keep working"
        );
    }

    let bind_address = config.bind_address();
    let port = config.port;

    let (server, handle) = gateway::ConsoleServer::start(config)
        .await
        .map_err(|e| format!("failed to start console server: {}", e))?;

    tracing::info!("simsar-console listening on http://{}:{}", bind_address, port);

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {}", e))?;

    tracing::info!("shutdown requested, stopping server...");
    server.stop();
    let _ = handle.await;

    Ok(())
}
