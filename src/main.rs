use anyhow::Context;
use clap::Parser;
use quote_sync::config::cli::{CliCommand, LogFormat};
use quote_sync::core::ConfigProvider;
use quote_sync::utils::error::ErrorSeverity;
use quote_sync::utils::{logger, validation::Validate};
use quote_sync::{
    CliConfig, Command, ConsoleDisplay, FileStore, HttpRemote, PersistenceStore,
    PresentationController, QuoteError, RemoteSync, Settings, SyncScheduler,
};
use std::io::BufRead;
use std::path::PathBuf;
use tokio::sync::mpsc;

type Controller = PresentationController<FileStore, HttpRemote, ConsoleDisplay>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    let settings = match cli.settings().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = run(cli.command(), settings).await {
        let Some(quote_error) = e.downcast_ref::<QuoteError>() else {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        };

        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            quote_error,
            quote_error.category(),
            quote_error.severity()
        );
        eprintln!("❌ {}", quote_error.user_friendly_message());
        eprintln!("💡 {}", quote_error.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match quote_error.severity() {
            ErrorSeverity::Low => 2,      // 輸入錯誤，資料未變動
            ErrorSeverity::Medium => 3,   // 網路錯誤，可稍後再試
            ErrorSeverity::High => 1,     // 配置錯誤
            ErrorSeverity::Critical => 4, // 系統錯誤
        };
        std::process::exit(exit_code);
    }
}

async fn run(command: CliCommand, settings: Settings) -> anyhow::Result<()> {
    let download_dir = match &command {
        CliCommand::Export { output_dir } => output_dir.clone(),
        _ => PathBuf::from("."),
    };

    let store = FileStore::new(settings.data_dir());
    let remote = HttpRemote::new(settings.api_endpoint(), settings.request_timeout())?;
    let sync = RemoteSync::with_fetch_limit(remote, settings.fetch_limit());
    let display = ConsoleDisplay::stdout(download_dir);
    let mut controller = PresentationController::new(PersistenceStore::new(store), sync, display)
        .with_notification_ttl(settings.notification_ttl());

    match command {
        CliCommand::Show { category } => {
            controller.load_state();
            match category {
                Some(category) => controller.change_filter(&category),
                None => controller.show_random(),
            };
        }
        CliCommand::Add { text, category } => {
            controller.load_state();
            controller.add_quote(&text, &category).await?;
        }
        CliCommand::List { category } => {
            controller.load_state();
            for quote in controller.repository().list_by_category(&category) {
                println!("{}", quote);
            }
        }
        CliCommand::Categories => {
            controller.load_state();
            controller.render_categories();
        }
        CliCommand::Filter { value } => {
            controller.load_state();
            controller.change_filter(&value);
        }
        CliCommand::Export { .. } => {
            controller.load_state();
            controller.export_now()?;
        }
        CliCommand::Import { file } => {
            controller.load_state();
            controller.import_file(&file)?;
        }
        CliCommand::Sync => {
            controller.load_state();
            controller.sync_now().await;
        }
        CliCommand::Watch => watch(controller, settings.sync_interval()).await?,
    }

    Ok(())
}

/// Interactive session: stdin commands and periodic syncs share one queue.
async fn watch(mut controller: Controller, interval: std::time::Duration) -> anyhow::Result<()> {
    tracing::info!("🚀 Starting interactive quote session");
    controller.initialize();
    println!("{}", quote_sync::app::commands::USAGE);

    let (tx, rx) = mpsc::channel(32);

    // 同步計時器：啟動時立即執行一次，之後每個週期一次
    let scheduler = SyncScheduler::start(interval, tx.clone(), Command::Sync);

    let ctrl_c_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_c_tx.send(Command::Quit).await;
        }
    });

    // 標準輸入用獨立執行緒讀取，避免阻塞 runtime 關閉
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || read_commands(tx))
        .context("failed to start stdin reader")?;

    controller.run(rx).await;
    scheduler.stop();
    Ok(())
}

fn read_commands(tx: mpsc::Sender<Command>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read stdin: {}", e);
                break;
            }
        };

        match Command::parse(&line) {
            Ok(Some(command)) => {
                if tx.blocking_send(command).is_err() {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("❌ {}", e.user_friendly_message()),
        }
    }

    let _ = tx.blocking_send(Command::Quit);
}
