use std::collections::HashMap;

use anyhow::Result;

/// Full application configuration, read from the environment with `.env`
/// fallback (env wins). Sensitive fields (API keys) are never logged.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model backend: "gemini" (hosted, default) or "ollama" (local).
    pub backend: String,
    pub gemini_api_key: String,
    pub model: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    /// HTTP timeout for a single model call, in seconds.
    pub model_timeout_s: u64,

    /// Directory holding documents.json. Defaults to a process-local
    /// subdirectory of the OS temp dir so the data file never lands in the
    /// repository.
    pub data_dir: String,

    // Web server
    pub web_bind: String,
    pub web_port: u16,
    pub max_upload_mb: u64,
    /// Pre-built static UI bundle; served only when the directory exists.
    pub ui_dist_dir: String,
}

fn parse_dotenv() -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return map;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            map.insert(k.trim().to_string(), v.trim().to_string());
        }
    }
    map
}

fn get(key: &str, dotenv: &HashMap<String, String>) -> Option<String> {
    std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
}

fn get_str(key: &str, dotenv: &HashMap<String, String>, default: &str) -> String {
    get(key, dotenv).unwrap_or_else(|| default.to_string())
}

fn get_u16(key: &str, dotenv: &HashMap<String, String>, default: u16) -> u16 {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn get_u64(key: &str, dotenv: &HashMap<String, String>, default: u64) -> u64 {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let dotenv = parse_dotenv();

        let default_data_dir = std::env::temp_dir()
            .join("counsel-store")
            .to_string_lossy()
            .into_owned();

        Ok(Config {
            backend: get_str("BACKEND", &dotenv, "gemini"),
            gemini_api_key: get_str("GEMINI_API_KEY", &dotenv, ""),
            model: get_str("MODEL", &dotenv, "gemini-2.0-flash"),
            ollama_base_url: get_str("OLLAMA_BASE_URL", &dotenv, "http://localhost:11434"),
            ollama_model: get_str("OLLAMA_MODEL", &dotenv, "llama3.2-vision"),
            model_timeout_s: get_u64("MODEL_TIMEOUT_S", &dotenv, 120),
            data_dir: get_str("DATA_DIR", &dotenv, &default_data_dir),
            web_bind: get_str("WEB_BIND", &dotenv, "127.0.0.1"),
            web_port: get_u16("WEB_PORT", &dotenv, 3173),
            max_upload_mb: get_u64("MAX_UPLOAD_MB", &dotenv, 25),
            ui_dist_dir: get_str("UI_DIST_DIR", &dotenv, "ui/dist"),
        })
    }
}
