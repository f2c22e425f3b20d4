/// Fixed body served to uptime checks.
pub const HEALTH_BODY: &str = "Bot funcionando OK";

/// GET / and GET /health: liveness probe for the hosting platform.
pub async fn health() -> &'static str {
    HEALTH_BODY
}
