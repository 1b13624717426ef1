use clap::error::ErrorKind;
use clap::Parser;
use nvr_fw_check::app::checker::{EXIT_CONFIG_ERROR, EXIT_OK, EXIT_RUNTIME_ERROR, EXIT_USAGE};
use nvr_fw_check::app::browser::open_in_browser;
use nvr_fw_check::utils::logger;
use nvr_fw_check::{App, CheckerError, CliArgs, Command, ConfigStore, FirmwareChecker};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help / --version 正常結束，其餘參數錯誤一律 exit 1
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
                _ => EXIT_USAGE,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let store = ConfigStore::new(&args.config_file);
    let config = {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut stdout = std::io::stdout();
        match store.load_or_init(&mut reader, &mut stdout) {
            Ok(config) => config,
            Err(e) => exit_with_error(&store, &e),
        }
    };

    // 設定檔的 verbose_output 與命令列 -v 任一開啟即輸出除錯日誌
    logger::init_cli_logger(args.verbose || config.settings.verbose_output);
    tracing::debug!("CLI args: {:?}", args);

    let mut app = App::new(store.clone(), config);
    let mut stdout = std::io::stdout();

    let result = match args.command() {
        Command::Check => {
            tracing::info!("🚀 Starting automatic firmware check");
            match FirmwareChecker::from_config(app.config()) {
                Ok(checker) => app.run_check(&checker, &mut stdout).await,
                Err(e) => Err(e),
            }
        }
        Command::Manual => {
            let stdin = std::io::stdin();
            let mut reader = stdin.lock();
            app.run_manual(&mut reader, &mut stdout, open_in_browser)
        }
        Command::ShowConfig => app.show_config(&mut stdout),
        Command::UpdateVersion(version) if version.trim().is_empty() => {
            eprintln!("Usage: nvr-fw-check --update-version <version>");
            Ok(EXIT_USAGE)
        }
        Command::UpdateVersion(version) => app.update_version(&version, &mut stdout),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => exit_with_error(&store, &e),
    }
}

fn exit_with_error(store: &ConfigStore, e: &CheckerError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("   Config file: {}", store.path().display());
    eprintln!("💡 {}", e.recovery_suggestion());

    let code = if e.is_config_error() {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_RUNTIME_ERROR
    };
    std::process::exit(code);
}
