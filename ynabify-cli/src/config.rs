use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use ynabify_ingest::DEFAULT_DATE_TEMPLATE;

use crate::state::{ensure_ynabify_home, ynabify_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Cell separator of the bank export (ABN AMRO uses tabs)
    pub delimiter: char,
    /// Position template of the raw date cell, e.g. "YYYYMMDD"
    pub date_template: String,
    /// Rows handed to the converter at a time
    pub batch_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
    /// IANA zone deciding which calendar day the conversion happened on
    pub timezone: String,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            date_template: DEFAULT_DATE_TEMPLATE.to_string(),
            batch_size: 500,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            timezone: "UTC".to_string(),
        }
    }
}

impl InputSection {
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter {:?} must be a single ASCII character", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}

impl OutputSection {
    pub fn today(&self) -> Result<NaiveDate> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {}", self.timezone))?;
        Ok(Utc::now().with_timezone(&tz).date_naive())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ynabify_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    if cfg.input.batch_size == 0 {
        bail!("input.batch_size must be at least 1");
    }
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_ynabify_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}
