//! Configuration for Parkir.
//!
//! Everything lives in `~/.parkir/config.toml`. Every section is optional; a
//! missing file means "use the defaults".
//!
//! ```toml
//! [app]
//! site_name = "Gambir"
//!
//! [tariffs.car]
//! first_hour = 5000
//! additional_hour = 4000
//!
//! [tariffs.motorcycle]
//! first_hour = 3000
//! additional_hour = 2000
//!
//! [penalty]
//! lost_ticket = 50000
//!
//! [history]
//! path = "~/.parkir/history/riwayat_parkir.json"
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use parkir_types::{Amount, Tariff, TariffTable, VehicleClass};

pub const DEFAULT_SITE_NAME: &str = "Parkir";
const HISTORY_FILE_NAME: &str = "riwayat_parkir.json";

#[derive(Debug, Default, Deserialize)]
pub struct ParkirConfig {
    pub app: Option<AppConfig>,
    pub tariffs: Option<TariffsConfig>,
    pub penalty: Option<PenaltyConfig>,
    pub history: Option<HistoryConfig>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Name printed in the session banner.
    pub site_name: Option<String>,
}

/// Per-class tariff overrides.
#[derive(Debug, Default, Deserialize)]
pub struct TariffsConfig {
    pub car: Option<TariffConfig>,
    pub motorcycle: Option<TariffConfig>,
}

/// Tariff override for one class. Unset fields keep the default.
#[derive(Debug, Default, Deserialize)]
pub struct TariffConfig {
    pub first_hour: Option<u64>,
    pub additional_hour: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PenaltyConfig {
    pub lost_ticket: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryConfig {
    /// History file location. A leading `~/` expands to the home directory.
    pub path: Option<String>,
}

impl TariffConfig {
    fn resolve(&self, default: Tariff) -> Tariff {
        Tariff::new(
            self.first_hour.map_or(default.first_hour, Amount::new),
            self.additional_hour
                .map_or(default.additional_hour, Amount::new),
        )
    }
}

impl TariffsConfig {
    fn for_class(&self, class: VehicleClass) -> Option<&TariffConfig> {
        match class {
            VehicleClass::Car => self.car.as_ref(),
            VehicleClass::Motorcycle => self.motorcycle.as_ref(),
        }
    }
}

impl ParkirConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn site_name(&self) -> &str {
        self.app
            .as_ref()
            .and_then(|app| app.site_name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_SITE_NAME)
    }

    /// Tariffs with configured values laid over the defaults.
    #[must_use]
    pub fn tariff_table(&self) -> TariffTable {
        let mut table = TariffTable::default();
        if let Some(tariffs) = &self.tariffs {
            for class in VehicleClass::ALL {
                if let Some(over) = tariffs.for_class(class) {
                    table.set(class, over.resolve(table.for_class(class)));
                }
            }
        }
        if let Some(penalty) = self.penalty.as_ref().and_then(|p| p.lost_ticket) {
            table.lost_ticket_penalty = Amount::new(penalty);
        }
        table
    }

    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.history
            .as_ref()
            .and_then(|history| history.path.as_deref())
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map_or_else(default_history_path, expand_home)
    }

    /// Persist a tariff for `class` into the config file at `path`.
    ///
    /// Uses `toml_edit` to preserve comments and formatting.
    /// Creates the config file and parent directory if they don't exist.
    pub fn persist_tariff(path: &Path, class: VehicleClass, tariff: Tariff) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = if path.exists() {
            fs::read_to_string(path)?
        } else {
            String::new()
        };

        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tariffs = ensure_table(doc.as_table_mut(), "tariffs")?;
        let entry = ensure_table(tariffs, class.config_key())?;
        entry["first_hour"] = toml_edit::value(to_toml_int(tariff.first_hour)?);
        entry["additional_hour"] = toml_edit::value(to_toml_int(tariff.additional_hour)?);

        parkir_utils::atomic_write(path, doc.to_string().as_bytes())?;
        tracing::info!(
            path = %path.display(),
            class = class.config_key(),
            first_hour = tariff.first_hour.value(),
            additional_hour = tariff.additional_hour.value(),
            "Persisted tariff"
        );
        Ok(())
    }
}

fn ensure_table<'a>(
    parent: &'a mut toml_edit::Table,
    key: &str,
) -> io::Result<&'a mut toml_edit::Table> {
    if !parent.contains_key(key) {
        let mut table = toml_edit::Table::new();
        table.set_implicit(true);
        parent.insert(key, toml_edit::Item::Table(table));
    }
    parent[key].as_table_mut().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("config key `{key}` is not a table"),
        )
    })
}

fn to_toml_int(amount: Amount) -> io::Result<i64> {
    i64::try_from(amount.value()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("tariff {} does not fit in a TOML integer", amount.value()),
        )
    })
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".parkir").join("config.toml"))
}

/// `~/.parkir/history/riwayat_parkir.json`, or `./history/...` without a home
/// directory.
#[must_use]
pub fn default_history_path() -> PathBuf {
    dirs::home_dir().map_or_else(
        || PathBuf::from("history").join(HISTORY_FILE_NAME),
        |home| home.join(".parkir").join("history").join(HISTORY_FILE_NAME),
    )
}
