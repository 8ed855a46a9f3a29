use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub server_url: String,
    pub cookies: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            cookies: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("client.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("cookies") {
                settings.cookies = Some(v.clone());
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Ok(v) = std::env::var("COOKIES") {
        settings.cookies = Some(v);
    }
    if let Ok(v) = std::env::var("APP__COOKIES") {
        settings.cookies = Some(v);
    }

    settings
}

pub fn normalize_server_url(raw: &str) -> String {
    let raw = raw.trim();

    if raw.is_empty() {
        return Settings::default().server_url;
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_a_scheme_to_bare_host_ports() {
        assert_eq!(
            normalize_server_url("localhost:8000"),
            "http://localhost:8000"
        );
    }

    #[test]
    fn strips_trailing_slashes() {
        assert_eq!(
            normalize_server_url("https://example.org/"),
            "https://example.org"
        );
    }

    #[test]
    fn empty_input_falls_back_to_the_default() {
        assert_eq!(normalize_server_url("  "), Settings::default().server_url);
    }
}
