use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Directory where generated report artifacts are written.
    pub artifacts_dir: String,
    /// Company identification used in AFD/AEJ headers.
    pub company_name: String,
    /// CNPJ, digits only. Mandatory for encoding; empty blocks report runs.
    pub company_cnpj: String,
    /// Default contractual minutes per workday for new employees.
    #[serde(default = "default_expected_minutes")]
    pub expected_minutes: i64,
    /// Default night-premium window for new employees ("HH:MM-HH:MM").
    #[serde(default = "default_night_window")]
    pub night_window: String,
    /// Daily overtime minutes beyond which a summary is flagged.
    #[serde(default = "default_overtime_cap")]
    pub daily_overtime_cap: i64,
}

fn default_expected_minutes() -> i64 {
    480
}
fn default_overtime_cap() -> i64 {
    120
}
fn default_night_window() -> String {
    "22:00-05:00".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            artifacts_dir: Self::artifacts_dir_default().to_string_lossy().to_string(),
            company_name: String::new(),
            company_cnpj: String::new(),
            expected_minutes: default_expected_minutes(),
            night_window: default_night_window(),
            daily_overtime_cap: default_overtime_cap(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("pontolog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".pontolog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("pontolog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("pontolog.sqlite")
    }

    fn artifacts_dir_default() -> PathBuf {
        Self::config_dir().join("artifacts")
    }

    /// Load configuration from file, or return defaults if not found or
    /// unreadable (a broken file must not keep the CLI from starting).
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_yaml::from_str(&content) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        crate::ui::messages::warning(format!(
                            "Failed to parse configuration file ({e}), using defaults"
                        ));
                        Config::default()
                    }
                },
                Err(e) => {
                    crate::ui::messages::warning(format!(
                        "Failed to read configuration file ({e}), using defaults"
                    ));
                    Config::default()
                }
            }
        } else {
            Config::default()
        }
    }

    /// Initialize configuration, database file and artifacts directory.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file (skipped in test mode so test DBs never touch
        // the user's real configuration)
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("config serialization failed: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        fs::create_dir_all(&config.artifacts_dir)?;

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
