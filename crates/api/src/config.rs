//! Process configuration, read from the environment at startup.

use chrono::Duration;

/// Optional account seeded at startup so a fresh deployment has one ADMIN
/// to administer everyone else with.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Clone)]
pub struct ApiConfig {
    pub session_secret: String,
    pub bind_addr: String,
    pub session_ttl: Duration,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ApiConfig {
    /// Read configuration from the environment.
    ///
    /// Everything has a dev default; the signing secret warns loudly when
    /// it falls back because that default must never reach production.
    pub fn from_env() -> Self {
        let session_secret = std::env::var("MATREQ_SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("MATREQ_SESSION_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let bind_addr =
            std::env::var("MATREQ_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let ttl_minutes = std::env::var("MATREQ_SESSION_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(480);

        let bootstrap_admin = match (
            std::env::var("MATREQ_ADMIN_EMAIL"),
            std::env::var("MATREQ_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => Some(BootstrapAdmin {
                email,
                display_name: "Administrator".to_string(),
                password,
            }),
            _ => None,
        };

        Self {
            session_secret,
            bind_addr,
            session_ttl: Duration::minutes(ttl_minutes),
            bootstrap_admin,
        }
    }
}
