use anyhow::{Context, Result, bail};
use deltaconv_core::CurrencyCatalog;
use deltaconv_export::{CurrencyAliases, Dialect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputSection,
    /// Dialect of written files
    pub output: Dialect,
    pub currencies: CurrencySection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Overrides the per-format default (`,` for trade exports, `;` for crawler dumps)
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySection {
    /// Symbol listing replacing the built-in catalog, one symbol per line.
    /// Relative paths resolve against the config file's directory.
    pub catalog: Option<PathBuf>,
    /// Merged over the built-in aliases
    pub aliases: BTreeMap<String, String>,
}

impl Config {
    pub fn catalog(&self) -> Result<CurrencyCatalog> {
        match &self.currencies.catalog {
            None => Ok(CurrencyCatalog::builtin()),
            Some(p) => {
                let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
                let catalog =
                    CurrencyCatalog::parse(&s).with_context(|| format!("parse {}", p.display()))?;
                tracing::debug!(path = %p.display(), symbols = catalog.len(), "loaded currency catalog");
                Ok(catalog)
            }
        }
    }

    pub fn aliases(&self) -> CurrencyAliases {
        let mut aliases = CurrencyAliases::default();
        aliases.extend(self.currencies.aliases.clone());
        aliases
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(p) = self.currencies.catalog.as_mut() {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}

pub fn deltaconv_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".deltaconv"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(deltaconv_home()?.join("config.toml"))
}

/// Load `explicit` if given, else the default location. A missing default
/// file means defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => {
            if !p.exists() {
                bail!("config not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = config_path()?;
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };

    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let mut cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    if let Some(dir) = p.parent() {
        cfg.resolve_paths(dir);
    }
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn save_config(cfg: &Config, p: &Path) -> Result<()> {
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg)?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let mut cfg = Config::default();
    cfg.currencies
        .aliases
        .insert("IOTA".to_string(), "MIOTA".to_string());
    save_config(&cfg, &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
