use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub fn gasto_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("GASTO_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".gasto"))
}

pub fn ensure_gasto_home() -> Result<PathBuf> {
    let dir = gasto_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user: default_user(),
            currency: default_currency(),
        }
    }
}

fn default_user() -> String {
    "default".to_string()
}

fn default_currency() -> String {
    "R$".to_string()
}

pub fn associations_path() -> Result<PathBuf> {
    Ok(ensure_gasto_home()?.join("categorias_usuario.csv"))
}

pub fn ledger_path() -> Result<PathBuf> {
    Ok(ensure_gasto_home()?.join("gastos.csv"))
}

pub fn profile_path() -> Result<PathBuf> {
    Ok(ensure_gasto_home()?.join("profile.json"))
}

pub fn read_profile() -> Result<Profile> {
    let p = profile_path()?;
    if !p.exists() {
        return Ok(Profile::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn write_profile(profile: &Profile) -> Result<()> {
    let p = profile_path()?;
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
