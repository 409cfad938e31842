//! Default value functions used by serde for config deserialization.

pub fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_poll_timeout() -> u64 {
    60
}

pub fn default_true() -> bool {
    true
}

pub fn default_offset_path() -> String {
    "offset.json".to_string()
}

pub fn default_log_level() -> String {
    "debug".to_string()
}
