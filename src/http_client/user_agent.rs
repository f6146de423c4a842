//! User agent handling for HTTP requests.

pub const USER_AGENT: &str = concat!("portalgrab/", env!("CARGO_PKG_VERSION"));

/// Browser user agent used in impersonate mode.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Resolve user agent from config value.
/// - None => default portalgrab user agent
/// - "impersonate" => real browser user agent
/// - other => custom user agent string
pub fn resolve_user_agent(config: Option<&str>) -> String {
    match config {
        None => USER_AGENT.to_string(),
        Some("impersonate") => BROWSER_USER_AGENT.to_string(),
        Some(custom) => custom.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_user_agent_default() {
        assert!(resolve_user_agent(None).starts_with("portalgrab/"));
    }

    #[test]
    fn test_resolve_user_agent_impersonate() {
        let ua = resolve_user_agent(Some("impersonate"));
        assert!(ua.contains("Mozilla"));
    }

    #[test]
    fn test_resolve_user_agent_custom() {
        assert_eq!(resolve_user_agent(Some("MyBot/1.0")), "MyBot/1.0");
    }
}
