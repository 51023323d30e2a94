//! Configuration management for the web service
//!
//! Supports loading configuration from environment variables with fallback to defaults.

/// Server settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Address to bind, without port.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Name of the session cookie.
    pub session_cookie: String,
    /// Actix worker count.
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            session_cookie: "todo_session".to_string(),
            workers: 4,
        }
    }
}

/// Load [`ServerSettings`] from environment variables
///
/// Environment variables:
/// - `TODO_BIND_ADDR`: bind address (default: 127.0.0.1)
/// - `TODO_PORT`: listen port (default: 8080)
/// - `TODO_SESSION_COOKIE`: session cookie name (default: todo_session)
/// - `TODO_WORKERS`: actix worker count (default: 4)
pub fn load_server_settings() -> ServerSettings {
    let defaults = ServerSettings::default();
    ServerSettings {
        bind_addr: std::env::var("TODO_BIND_ADDR").unwrap_or(defaults.bind_addr),
        port: std::env::var("TODO_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port),
        session_cookie: std::env::var("TODO_SESSION_COOKIE").unwrap_or(defaults.session_cookie),
        workers: std::env::var("TODO_WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.workers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_settings_have_sensible_defaults() {
        let settings = ServerSettings::default();
        assert!(!settings.bind_addr.is_empty());
        assert!(settings.port > 0);
        assert!(!settings.session_cookie.is_empty());
        assert!(settings.workers > 0);
    }
}
