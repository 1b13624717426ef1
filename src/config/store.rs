use crate::config::toml_config::{
    AppConfig, DEFAULT_FIRMWARE_VERSION, DEFAULT_HARDWARE_VERSION, DEFAULT_MODEL,
};
use crate::domain::model::DeviceProfile;
use crate::utils::error::Result;
use crate::utils::prompt;
use crate::utils::validation::{validate_non_empty_string, Validate};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./config";

/// The config file on disk. Read once at startup, written only on first run
/// and on explicit version updates.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads and validates the config file. A missing or broken file is an error.
    pub fn load(&self) -> Result<AppConfig> {
        tracing::debug!("Loading configuration from {}", self.path.display());
        let config = AppConfig::from_file(&self.path)?;
        config.validate()?;
        Ok(config)
    }

    /// 設定檔不存在時進入互動式初次設定
    pub fn load_or_init<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<AppConfig>
    where
        R: BufRead,
        W: Write,
    {
        if self.exists() {
            return self.load();
        }

        tracing::info!("No config file at {}, starting first-run setup", self.path.display());
        let config = self.interactive_setup(reader, writer)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, config.to_toml_string()?)?;
        tracing::debug!("Configuration saved to {}", self.path.display());
        Ok(())
    }

    pub fn update_firmware_version(&self, config: &mut AppConfig, new_version: &str) -> Result<()> {
        validate_non_empty_string("device.current_firmware_version", new_version)?;

        config.device.current_firmware_version = new_version.trim().to_string();
        self.save(config)?;
        tracing::info!("Stored firmware version is now {}", config.device.current_firmware_version);
        Ok(())
    }

    pub fn render(&self, config: &AppConfig) -> Result<String> {
        Ok(format!(
            "Configuration file: {}\nCurrent configuration:\n{}",
            self.path.display(),
            config.to_toml_string()?
        ))
    }

    fn interactive_setup<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<AppConfig>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(writer, "🔧 Welcome to the NVR firmware checker!")?;
        writeln!(writer, "Let's set up your device configuration.\n")?;

        writeln!(writer, "Device Information:")?;
        let model = prompt::ask_with_default(
            reader,
            writer,
            &format!("Enter your device model (e.g., {}): ", DEFAULT_MODEL),
            DEFAULT_MODEL,
        )?;
        let hardware_version = prompt::ask_with_default(
            reader,
            writer,
            &format!("Enter your hardware version (e.g., {}): ", DEFAULT_HARDWARE_VERSION),
            DEFAULT_HARDWARE_VERSION,
        )?;

        writeln!(writer, "\nCurrent Firmware Version:")?;
        writeln!(
            writer,
            "You can find this in your device's web interface under System > Device Info"
        )?;
        let current_version = match prompt::ask(
            reader,
            writer,
            &format!(
                "Enter your current firmware version (e.g., {}): ",
                DEFAULT_FIRMWARE_VERSION
            ),
        )? {
            Some(version) if !version.is_empty() => version,
            _ => {
                writeln!(writer, "Using default version: {}", DEFAULT_FIRMWARE_VERSION)?;
                DEFAULT_FIRMWARE_VERSION.to_string()
            }
        };

        let config = AppConfig::for_device(DeviceProfile::new(
            model,
            hardware_version,
            current_version,
        ));
        self.save(&config)?;

        writeln!(writer, "\n✅ Configuration saved to: {}", self.path.display())?;
        writeln!(writer, "   Model: {}", config.device.model)?;
        writeln!(writer, "   Hardware: {}", config.device.hardware_version)?;
        writeln!(
            writer,
            "   Current firmware: {}",
            config.device.current_firmware_version
        )?;
        writeln!(
            writer,
            "\nYou can modify this later by editing the config file or using --update-version"
        )?;

        Ok(config)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}
