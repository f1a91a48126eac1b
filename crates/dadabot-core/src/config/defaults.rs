//! Default value functions used by serde for config deserialization.

pub fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_webhook_host() -> String {
    "herokuapp.com".to_string()
}

pub fn default_seen_window() -> usize {
    1024
}

pub fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_server_port() -> u16 {
    5000
}
