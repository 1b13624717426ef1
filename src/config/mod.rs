pub mod store;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliArgs, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::store::DEFAULT_CONFIG_PATH;
    use clap::{ArgGroup, Parser};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "nvr-fw-check")]
    #[command(about = "Check whether a newer NVR firmware has been published")]
    #[command(group(ArgGroup::new("mode").args(["manual", "show_config", "update_version"])))]
    pub struct CliArgs {
        #[arg(long, help = "Look the version up yourself in the download center")]
        pub manual: bool,

        #[arg(long = "config", help = "Print the stored configuration")]
        pub show_config: bool,

        #[arg(long, value_name = "VERSION", help = "Overwrite the stored firmware version")]
        pub update_version: Option<String>,

        #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
        pub config_file: PathBuf,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Command {
        /// 自動檢查（無參數時的預設行為）
        Check,
        Manual,
        ShowConfig,
        UpdateVersion(String),
    }

    impl CliArgs {
        pub fn command(&self) -> Command {
            if self.manual {
                Command::Manual
            } else if self.show_config {
                Command::ShowConfig
            } else if let Some(version) = &self.update_version {
                Command::UpdateVersion(version.clone())
            } else {
                Command::Check
            }
        }
    }

}
