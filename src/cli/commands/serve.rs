//! Web server command.

use console::style;

use crate::config::Settings;

/// Bind address used when neither the CLI nor the config names one.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Port used when a bind address names only a host.
const DEFAULT_PORT: u16 = 3030;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind);

    // Run database migrations first
    println!("{} Running database migrations...", style("→").cyan());
    let ctx = settings.create_db_context();
    match ctx.init_schema().await {
        Ok(()) => println!("  {} Database ready", style("✓").green()),
        Err(e) => {
            eprintln!("  {} Migration failed: {}", style("✗").red(), e);
            return Err(anyhow::anyhow!("Database migration failed: {}", e));
        }
    }

    println!(
        "{} Starting portalgrab server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3030
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
fn parse_bind_address(bind: &str) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(parse_bind_address("8080"), ("127.0.0.1".to_string(), 8080));
        assert_eq!(parse_bind_address("0.0.0.0"), ("0.0.0.0".to_string(), 3030));
        assert_eq!(
            parse_bind_address("0.0.0.0:9000"),
            ("0.0.0.0".to_string(), 9000)
        );
        assert_eq!(
            parse_bind_address(DEFAULT_BIND),
            ("127.0.0.1".to_string(), 3030)
        );
    }
}
