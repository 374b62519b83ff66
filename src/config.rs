use crate::error::{GeoPlantError, Result};
use crate::logic::normalize::DecodingThresholds;
use crate::models::{ScoringMode, SiteProperties};
use dialoguer::{Confirm, Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub decoding: DecodingThresholds,
    #[serde(default)]
    pub site_defaults: SiteDefaultsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// PostGIS database holding the climate rasters and the plant table.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    8
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(value) => value.parse::<u16>().map_err(|_| {
            D::Error::custom(format!(
                "invalid port '{}' - ensure GEOPLANT_DB_PORT environment variable is set",
                value
            ))
        }),
    }
}

impl DatabaseConfig {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            database: "geoplant".into(),
            user: "postgres".into(),
            password: "".into(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Reverse geocoding (Nominatim-compatible API).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_geocoder_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `accept-language` for labels. Must match the world table's names for
    /// an anchor to replace its country in a ranking.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_enabled() -> bool {
    true
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org".into()
}

fn default_user_agent() -> String {
    format!("geoplant/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_language() -> String {
    "en".into()
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_geocoder_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,
    /// Score soil pH too. Off by default: site pH is a placeholder value.
    #[serde(default)]
    pub include_ph: bool,
}

/// Fixed site properties used until real soil/sun/elevation layers exist.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteDefaultsConfig {
    pub ph: f64,
    pub humidity: f64,
    pub sun_pct: f64,
    pub elevation_m: f64,
}

impl SiteDefaultsConfig {
    pub fn to_site(&self) -> SiteProperties {
        SiteProperties::placeholder(self.ph, self.humidity, self.sun_pct, self.elevation_m)
    }
}

impl Default for SiteDefaultsConfig {
    fn default() -> Self {
        let site = SiteProperties::default();
        Self {
            ph: site.ph,
            humidity: site.humidity,
            sun_pct: site.sun_pct,
            elevation_m: site.elevation_m,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Half-width of the local grid box, in degrees
    #[serde(default = "default_grid_span")]
    pub grid_span_deg: f64,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_grid_size() -> usize {
    5
}

fn default_grid_span() -> f64 {
    1.0
}

fn default_max_concurrency() -> usize {
    8
}

fn default_top_n() -> usize {
    crate::logic::ranking::DEFAULT_TOP_N
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            grid_span_deg: default_grid_span(),
            max_concurrency: default_max_concurrency(),
            top_n: default_top_n(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(GeoPlantError::Config(format!(
                "Config file not found at {:?}. Run `geoplant init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| GeoPlantError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML after substituting `${VAR}` placeholders from the environment.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GeoPlantError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.scan.grid_size == 0 {
            return Err(GeoPlantError::Config(
                "scan.grid_size must be at least 1".into(),
            ));
        }
        if !(self.scan.grid_span_deg.is_finite() && self.scan.grid_span_deg >= 0.0) {
            return Err(GeoPlantError::Config(
                "scan.grid_span_deg must be a non-negative number".into(),
            ));
        }
        if self.scan.max_concurrency == 0 {
            return Err(GeoPlantError::Config(
                "scan.max_concurrency must be at least 1".into(),
            ));
        }
        self.decoding.validate()
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("geoplant").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/geoplant/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GeoPlantError::Config("Cannot determine config directory".into()))?
            .join("geoplant");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up GeoPlant!");
        println!();

        println!("PostGIS climate database");
        let host: String = prompt("  Host", "localhost".to_string())?;
        let port: u16 = prompt("  Port", 5432)?;
        let database: String = prompt("  Database", "geoplant".to_string())?;
        let user: String = prompt("  User", "postgres".to_string())?;
        let password: String = Password::new()
            .with_prompt("  Password")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| GeoPlantError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Reverse geocoding");
        let geocoder_enabled = Confirm::new()
            .with_prompt("  Look up place names with Nominatim?")
            .default(true)
            .interact()
            .map_err(|e| GeoPlantError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Scoring");
        let strict = Confirm::new()
            .with_prompt("  Use strict threshold scoring instead of graduated penalties?")
            .default(false)
            .interact()
            .map_err(|e| GeoPlantError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            database: DatabaseConfig {
                host,
                port,
                database,
                user,
                password,
                ..Default::default()
            },
            geocoder: GeocoderConfig {
                enabled: geocoder_enabled,
                ..Default::default()
            },
            scoring: ScoringConfig {
                mode: if strict {
                    ScoringMode::Strict
                } else {
                    ScoringMode::Graduated
                },
                include_ph: false,
            },
            ..Default::default()
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| GeoPlantError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# GeoPlant Configuration\n# Generated by `geoplant init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

fn prompt<T>(label: &str, default: T) -> Result<T>
where
    T: Clone + ToString + std::str::FromStr,
    <T as std::str::FromStr>::Err: ToString,
{
    Input::new()
        .with_prompt(label)
        .default(default)
        .interact_text()
        .map_err(|e| GeoPlantError::Config(format!("Input error: {}", e)))
}
