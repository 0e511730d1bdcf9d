use clap::Parser;
use dataservice_info::core::ConfigProvider;
use dataservice_info::utils::error::{ErrorSeverity, ServiceInfoError};
use dataservice_info::utils::{logger, validation::Validate};
use dataservice_info::{
    CliConfig, DataServiceClient, LocalStorage, ServiceInformation, ServiceInformationSource,
    SnapshotStore, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = match CliConfig::parse().resolve_headers() {
        Ok(cli) => cli,
        Err(e) => exit_with(&e),
    };

    let toml_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 初始化日誌
    let verbose = cli.verbose || toml_config.as_ref().is_some_and(|c| c.verbose());
    if cli.json_logs || toml_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting dataservice-info");
    tracing::debug!(
        "Server: {}, config file: {:?}, snapshot: {:?}",
        cli.server_url,
        cli.config,
        cli.snapshot
    );

    let result = match &toml_config {
        Some(config) => run(config, &cli).await,
        None => run(&cli, &cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    cli: &CliConfig,
) -> dataservice_info::Result<()> {
    config.validate()?;

    let store = SnapshotStore::new(LocalStorage::new(config.output_path().to_string()));

    let info = match &cli.snapshot {
        Some(name) => {
            tracing::info!("📂 Reading snapshot '{}'", name);
            store.source(name.clone()).fetch().await?
        }
        None => {
            let client = DataServiceClient::new(config)?;
            tracing::info!("🔍 Querying {}", client.endpoint());
            client.fetch().await?
        }
    };

    if let Some(name) = &cli.save {
        store.save(name, &info).await?;
        tracing::info!("📁 Snapshot saved to: {}/{}", config.output_path(), name);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_details(&info);
    }

    if let Some(name) = &cli.compare {
        let previous = store.load(name).await?;
        let changes = info.changes_since(&previous);
        if changes.is_empty() {
            println!("No changes since '{}'", name);
        } else {
            println!(
                "Changed since '{}': {}",
                name,
                changes.changed_domains().join(", ")
            );
        }
    }

    Ok(())
}

fn print_details(info: &ServiceInformation) {
    let summary = info.to_string();
    if summary.is_empty() {
        println!("(server did not report a version)");
    } else {
        println!("{}", summary);
    }

    let security = if info.security_enabled { "enabled" } else { "disabled" };
    println!("  Server:           {}", info.server_name);
    println!("  Security:         {}", security);
    println!("  WSDL version:     {}", info.wsdl_version());
    println!("  Parts:            ~{}", info.part_count);
    println!("  Characteristics:  ~{}", info.characteristic_count);
    println!("  Measurements:     ~{}", info.measurement_count);
    println!("  Values:           ~{}", info.value_count);
    println!("  Features:         {}", info.feature_list.join(", "));
    println!("  Inspection plan:  {}", info.inspection_plan_timestamp.to_rfc3339());
    println!("  Measurement data: {}", info.measurement_timestamp.to_rfc3339());
    println!("  Configuration:    {}", info.configuration_timestamp.to_rfc3339());
}

fn exit_with(e: &ServiceInfoError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
