use std::{collections::HashMap, fs};

use widget_core::{ViewMode, WidgetConfig};

#[derive(Debug)]
pub struct Settings {
    pub feed_url: String,
    pub widget: WidgetConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: "http://127.0.0.1:8080/".into(),
            widget: WidgetConfig::default(),
        }
    }
}

/// Defaults, overlaid by `widget.toml`, overlaid by the environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("widget.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            if let Some(v) = file_cfg.get("feed_url").and_then(toml::Value::as_str) {
                settings.feed_url = v.to_string();
            }
            if let Some(v) = file_cfg
                .get("max_snippets_per_cell")
                .and_then(toml::Value::as_integer)
            {
                settings.widget.max_snippets_per_cell = snippet_limit(v);
            }
            if let Some(mode) = file_cfg
                .get("default_mode")
                .and_then(toml::Value::as_str)
                .and_then(parse_mode)
            {
                settings.widget.default_mode = mode;
            }
        }
    }

    if let Ok(v) = std::env::var("FEED_URL") {
        settings.feed_url = v;
    }
    if let Ok(v) = std::env::var("APP__FEED_URL") {
        settings.feed_url = v;
    }

    if let Ok(v) = std::env::var("APP__MAX_SNIPPETS_PER_CELL") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.widget.max_snippets_per_cell = snippet_limit(parsed);
        }
    }

    if let Some(mode) = std::env::var("APP__DEFAULT_MODE")
        .ok()
        .as_deref()
        .and_then(parse_mode)
    {
        settings.widget.default_mode = mode;
    }

    settings
}

/// Zero and negative values turn truncation off.
fn snippet_limit(raw: i64) -> Option<usize> {
    usize::try_from(raw).ok().filter(|limit| *limit > 0)
}

fn parse_mode(raw: &str) -> Option<ViewMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "grid" => Some(ViewMode::Grid),
        "list" => Some(ViewMode::List),
        _ => None,
    }
}
