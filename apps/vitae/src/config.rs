use anyhow::{Context, Result};

use crate::layout::{LayoutConfig, LayoutTuning};

/// Application configuration loaded from environment variables.
/// Every variable has a default, so the service starts on a bare environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Path of the CV data document.
    pub data_path: String,
    /// Directory served under /assets (logos, photo).
    pub assets_dir: String,
    pub rust_log: String,
    pub first_page_scale: f32,
    pub first_page_floor: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let tuning = LayoutTuning::default();
        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            data_path: env_or("CV_DATA_PATH", "data/cv.json"),
            assets_dir: env_or("ASSETS_DIR", "assets"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            first_page_scale: env_f32("LAYOUT_FIRST_PAGE_SCALE", tuning.first_page_scale)?,
            first_page_floor: env_f32("LAYOUT_FIRST_PAGE_FLOOR", tuning.first_page_floor)?,
        })
    }

    /// Layout configuration with the environment tuning overrides applied.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            tuning: LayoutTuning {
                first_page_scale: self.first_page_scale,
                first_page_floor: self.first_page_floor,
                ..LayoutTuning::default()
            },
            ..LayoutConfig::default()
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_f32(key: &str, default: f32) -> Result<f32> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<f32>()
            .with_context(|| format!("'{key}' must be a number")),
        Err(_) => Ok(default),
    }
}
