//! The four command paths the binary dispatches to.

use crate::app::checker::{FirmwareChecker, EXIT_OK, EXIT_UPDATE_AVAILABLE};
use crate::config::store::ConfigStore;
use crate::config::toml_config::AppConfig;
use crate::core::comparator::compare_versions;
use crate::utils::error::Result;
use crate::utils::prompt;
use std::io::{self, BufRead, Write};

pub struct App {
    store: ConfigStore,
    config: AppConfig,
}

impl App {
    pub fn new(store: ConfigStore, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 自動檢查：回傳 1 代表有新版本
    pub async fn run_check<W: Write>(&self, checker: &FirmwareChecker, out: &mut W) -> Result<i32> {
        let outcome = checker.check_for_updates(&self.config.device, out).await?;

        if outcome.has_update() {
            writeln!(out, "\n🔔 Update available!")?;
        } else {
            writeln!(out, "\n✅ No updates needed")?;
            writeln!(out, "\n💡 Try: nvr-fw-check --manual")?;
            writeln!(out, "💡 Config: nvr-fw-check --config")?;
        }

        Ok(outcome.exit_code())
    }

    /// Manual check: the user looks the version up in the download center and
    /// types it in; the comparison is the same as the automatic path.
    pub fn run_manual<R, W, F>(&mut self, reader: &mut R, out: &mut W, open_url: F) -> Result<i32>
    where
        R: BufRead,
        W: Write,
        F: FnOnce(&str) -> io::Result<()>,
    {
        let download_center = self.config.vendor_site().download_center_url();
        let device = self.config.device.clone();

        writeln!(out, "Opening download center for manual check...")?;
        writeln!(out, "Look for model: {}", device.model)?;
        writeln!(out, "Hardware version: {}", device.hardware_version)?;

        if self.config.settings.auto_open_browser_on_manual {
            if let Err(e) = open_url(&download_center) {
                tracing::warn!("Could not open browser: {}", e);
                writeln!(out, "Open {} in your browser", download_center)?;
            }
        } else {
            writeln!(out, "Open {} in your browser", download_center)?;
        }

        let Some(latest) = ask_found_version(reader, out)? else {
            writeln!(out, "\n✅ No updates found")?;
            return Ok(EXIT_OK);
        };

        let comparison = compare_versions(&device.current_firmware_version, Some(latest.as_str()));
        writeln!(out, "\n{}", comparison.message)?;

        if !comparison.has_update {
            writeln!(out, "\n✅ No updates needed")?;
            return Ok(EXIT_OK);
        }

        if prompt::confirm(reader, out, "\nUpdate config with this version? (y/n): ")? {
            self.store.update_firmware_version(&mut self.config, &latest)?;
            writeln!(out, "Updated firmware version to: {}", latest)?;
        }
        writeln!(out, "\n🔔 Update available!")?;
        Ok(EXIT_UPDATE_AVAILABLE)
    }

    pub fn show_config<W: Write>(&self, out: &mut W) -> Result<i32> {
        writeln!(out, "{}", self.store.render(&self.config)?)?;
        Ok(EXIT_OK)
    }

    pub fn update_version<W: Write>(&mut self, new_version: &str, out: &mut W) -> Result<i32> {
        self.store.update_firmware_version(&mut self.config, new_version)?;
        writeln!(
            out,
            "Updated firmware version to: {}",
            self.config.device.current_firmware_version
        )?;
        Ok(EXIT_OK)
    }
}

/// 問使用者是否找到新版本；y 再問版本號，n 或輸入結束代表沒有
fn ask_found_version<R, W>(reader: &mut R, out: &mut W) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    loop {
        let Some(answer) = prompt::ask(reader, out, "\nDid you find a newer version? (y/n/version): ")?
        else {
            return Ok(None);
        };
        let answer = answer.to_lowercase();

        if answer == "y" {
            match prompt::ask(reader, out, "Enter the version you found: ")? {
                Some(version) if !version.is_empty() => return Ok(Some(version)),
                Some(_) => continue,
                None => return Ok(None),
            }
        } else if answer == "n" {
            return Ok(None);
        } else if answer.starts_with('v') || answer.chars().any(|c| c.is_ascii_digit()) {
            return Ok(Some(answer));
        } else {
            writeln!(out, "Please enter 'y', 'n', or the version number")?;
        }
    }
}
