use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend_url: String,
    pub api_key: String,
    pub default_range_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            api_key: String::new(),
            default_range_days: 30,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backend_url.is_empty() {
            return Err(anyhow::anyhow!(
                "backend_url is not set. Run 'tally config set backend_url <url>'."
            ));
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "backend_url must start with http:// or https://"
            ));
        }

        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!(
                "api_key is not set. Run 'tally config set api_key <key>'."
            ));
        }

        let valid_ranges = [7, 30, 90];
        if !valid_ranges.contains(&self.default_range_days) {
            return Err(anyhow::anyhow!(
                "default_range_days must be one of: 7, 30, 90"
            ));
        }

        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "backend_url" => self.backend_url = value.trim_end_matches('/').to_string(),
            "api_key" => self.api_key = value.to_string(),
            "default_range_days" => {
                self.default_range_days = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("default_range_days must be a number"))?
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown config key '{}'. Valid keys: backend_url, api_key, default_range_days",
                    key
                ))
            }
        }
        Ok(())
    }
}
