use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use refstore::config::StoreConfig;
use refstore::reference::ConversationReference;
use refstore::storage::LocalContainer;
use refstore::store::{AddOptions, ReferenceStore};

#[derive(Parser)]
#[command(name = "refstore")]
#[command(about = "Conversation reference store operations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Config file path")]
    config: Option<String>,

    #[arg(long, help = "Data directory path (overrides config)")]
    data: Option<String>,

    #[arg(long, help = "Container name (overrides config)")]
    container: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show store status
    Status,
    /// Fetch one reference by key
    Get { key: String },
    /// Store a reference read from a JSON file (or stdin)
    Add {
        key: String,
        #[arg(long, help = "Path to the JSON payload; stdin when omitted")]
        file: Option<String>,
        #[arg(long, help = "Replace an existing reference")]
        overwrite: bool,
    },
    /// Delete one reference by key
    Remove { key: String },
    /// List every stored reference
    List,
    GenerateConfig {
        #[arg(long, default_value = "refstore.toml", help = "Config file path")]
        output: String,
    },
}

async fn open_store(config: &StoreConfig) -> Result<ReferenceStore<LocalContainer>> {
    let container = LocalContainer::new(config.container_path());
    ReferenceStore::new(container)
        .await
        .context("Failed to open container")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("refstore=info")
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = StoreConfig::load_or_create(cli.config.as_deref())?;

    // Override config with CLI args if provided
    if let Some(data) = cli.data {
        config.data_directory = data.into();
    }
    if let Some(container) = cli.container {
        config.container = container;
    }

    // Ensure directories exist
    if let Err(e) = config.ensure_directories() {
        if cli.json {
            println!("{}", serde_json::json!({"error": format!("Failed to create directories: {}", e)}));
        } else {
            eprintln!("❌ Failed to create directories: {}", e);
        }
        return Err(e);
    }

    match cli.command {
        Commands::Status => {
            let container_path = config.container_path();
            let exists = container_path.exists();
            let object_count = if exists {
                std::fs::read_dir(&container_path)
                    .map(|entries| entries.filter_map(|e| e.ok()).count())
                    .unwrap_or(0)
            } else {
                0
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                    "status": if exists { "ready" } else { "not_initialized" },
                    "data_directory": config.data_directory,
                    "container": config.container,
                    "objects": object_count
                }))?);
            } else {
                println!("📊 Reference Store Status");
                println!("=========================");

                if !exists {
                    println!("❌ Status: Not initialized");
                    return Ok(());
                }

                println!("✅ Status: Ready");
                println!("   Data directory: {}", config.data_directory.display());
                println!("   Container: {}", config.container);
                println!("   Objects: {}", object_count);
            }
            Ok(())
        }
        Commands::Get { key } => {
            let store = open_store(&config).await?;
            match store.get(&key).await {
                Ok(Some(reference)) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&reference)?);
                    } else {
                        println!("🔍 Reference: {}", key);
                        println!("==============");
                        println!("{}", serde_json::to_string_pretty(&reference)?);
                    }
                    Ok(())
                }
                Ok(None) => {
                    if cli.json {
                        println!("{}", serde_json::json!({"error": "Reference not found"}));
                    } else {
                        println!("🔍 Reference: {}", key);
                        println!("==============");
                        println!("   Reference not found");
                    }
                    Ok(())
                }
                Err(e) => {
                    if cli.json {
                        println!("{}", serde_json::json!({"error": e.to_string()}));
                    } else {
                        println!("❌ Lookup failed: {}", e);
                    }
                    Err(e.into())
                }
            }
        }
        Commands::Add {
            key,
            file,
            overwrite,
        } => {
            let payload = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path))?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            let reference: ConversationReference =
                serde_json::from_str(&payload).context("Payload is not a conversation reference")?;

            let store = open_store(&config).await?;
            match store.add(&key, &reference, AddOptions { overwrite }).await {
                Ok(true) => {
                    info!("Stored reference under {}", key);
                    if cli.json {
                        println!("{}", serde_json::json!({"success": true, "key": key}));
                    } else {
                        println!("✅ Stored reference under: {}", key);
                    }
                    Ok(())
                }
                Ok(false) => {
                    if cli.json {
                        println!("{}", serde_json::json!({
                            "success": false,
                            "key": key,
                            "message": "Key already exists (use --overwrite to replace)"
                        }));
                    } else {
                        println!("⚠️  Key already exists: {}", key);
                        println!("   Use --overwrite to replace it");
                    }
                    Ok(())
                }
                Err(e) => {
                    if cli.json {
                        println!("{}", serde_json::json!({"error": e.to_string()}));
                    } else {
                        println!("❌ Store failed: {}", e);
                    }
                    Err(e.into())
                }
            }
        }
        Commands::Remove { key } => {
            let store = open_store(&config).await?;
            match store.remove(&key).await {
                Ok(removed) => {
                    if cli.json {
                        println!("{}", serde_json::json!({"removed": removed, "key": key}));
                    } else if removed {
                        println!("🗑️  Removed reference: {}", key);
                    } else {
                        println!("   No reference under: {}", key);
                    }
                    Ok(())
                }
                Err(e) => {
                    if cli.json {
                        println!("{}", serde_json::json!({"error": e.to_string()}));
                    } else {
                        println!("❌ Remove failed: {}", e);
                    }
                    Err(e.into())
                }
            }
        }
        Commands::List => {
            let store = open_store(&config).await?;
            match store.list(config.page_size_hint, None).await {
                Ok(page) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                            "count": page.records.len(),
                            "references": page.records
                        }))?);
                    } else {
                        println!("📋 Stored References");
                        println!("====================");

                        if page.records.is_empty() {
                            println!("   No references found");
                        } else {
                            println!("   Total: {}", page.records.len());
                            for reference in &page.records {
                                println!("   {}", reference.storage_key());
                            }
                        }
                    }
                    Ok(())
                }
                Err(e) => {
                    if cli.json {
                        println!("{}", serde_json::json!({"error": e.to_string()}));
                    } else {
                        println!("❌ Listing failed: {}", e);
                    }
                    Err(e.into())
                }
            }
        }
        Commands::GenerateConfig { output } => {
            let config = StoreConfig::default();
            match config.save(&output) {
                Ok(_) => {
                    if cli.json {
                        println!("{}", serde_json::json!({
                            "success": true,
                            "config_file": output,
                            "message": "Default configuration file created"
                        }));
                    } else {
                        println!("⚙️  Generate Configuration");
                        println!("========================");
                        println!("✅ Default configuration saved to: {}", output);
                        println!("   Edit the file to customize store settings");
                    }
                    Ok(())
                }
                Err(e) => {
                    if cli.json {
                        println!("{}", serde_json::json!({"error": e.to_string()}));
                    } else {
                        println!("❌ Failed to create config file: {}", e);
                    }
                    Err(e)
                }
            }
        }
    }
}
