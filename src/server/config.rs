const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            host: std::env::var("HOST")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            request_body_limit: std::env::var("REQUEST_BODY_LIMIT_BYTES")
                .map(|raw| {
                    raw.parse::<usize>().map_err(|_| {
                        anyhow::anyhow!("REQUEST_BODY_LIMIT_BYTES must be a positive integer")
                    })
                })
                .unwrap_or(Ok(DEFAULT_BODY_LIMIT))
                .and_then(|limit| {
                    if limit == 0 {
                        anyhow::bail!("REQUEST_BODY_LIMIT_BYTES cannot be 0");
                    }
                    Ok(limit)
                })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Bind address: {}", config.bind_address());
        tracing::debug!("Request body limit: {} bytes", config.request_body_limit);

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
