/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// `json_override` comes from settings and wins over `LOG_FORMAT`.
    pub fn with_json_override(mut self, json_override: Option<bool>) -> Self {
        if let Some(json) = json_override {
            self.json_format = json;
        }
        self
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
