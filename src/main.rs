use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sonar_mcp::config::{find_config_file, get_config, load_config, API_KEY_ENV};
use sonar_mcp::mcp::{McpServer, ToolRegistry};
use sonar_mcp::sonar::SonarClient;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sonar MCP - Expose Perplexity's Sonar search API as MCP tools
#[derive(Parser, Debug)]
#[command(name = "sonar-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server exposing Perplexity's Sonar search API as callable tools", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for the tool listing
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server (default; for Claude Desktop and other MCP clients)
    Serve {
        /// Run in stdio mode (for MCP clients like Claude Desktop)
        #[arg(long, default_value_t = true)]
        stdio: bool,

        /// Run in HTTP/SSE mode (overrides --stdio)
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode
        #[arg(long, short, default_value_t = 3000)]
        port: u16,

        /// Host to bind to for HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// List the tool catalog
    #[command(alias = "ls")]
    Tools {
        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Auto)]
        output: OutputFormat,
    },
}

/// Print all recognized environment variables
fn print_env_vars() {
    println!("Sonar MCP - Environment Variables");
    println!();
    println!("Required:");
    println!("  {}           Perplexity API key (bearer token)", API_KEY_ENV);
    println!();
    println!("Optional:");
    println!("  SONAR_MCP_API_URL            Override the upstream endpoint URL");
    println!("  SONAR_MCP_TIMEOUTS__SEARCH_SECS  Per-call timeout for search tools (default: 30)");
    println!("  SONAR_MCP_TIMEOUTS__QUICK_SECS   Per-call timeout for quick_search (default: 15)");
    println!("  RUST_LOG                     Logging level (e.g., debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export {}=\"pplx-your-key-here\"", API_KEY_ENV);
    std::process::exit(0);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
    }

    // Initialize tracing based on verbosity. Everything goes to stderr:
    // stdout belongs to the stdio transport.
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("sonar_mcp={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()
    };

    match cli.command.unwrap_or(Commands::Serve {
        stdio: true,
        http: false,
        port: 3000,
        host: "127.0.0.1".to_string(),
    }) {
        Commands::Serve {
            stdio,
            http,
            port,
            host,
        } => {
            // A missing credential is fatal here, before any serving.
            let client = Arc::new(SonarClient::new(&config).map_err(|e| {
                eprintln!("Error: {}", e);
                anyhow::anyhow!(e)
            })?);

            let server = McpServer::new(client, &config)?;

            // Use HTTP mode if --http flag is provided, otherwise stdio
            let use_http = http || !stdio;

            if use_http {
                let addr = format!("{}:{}", host, port);
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            } else {
                tracing::info!("Running MCP server in stdio mode");
                server.run().await?;
            }
        }

        Commands::Tools { output } => {
            // The catalog is listable without a credential; use a
            // placeholder key when none is configured.
            let mut listing_config = config.clone();
            if listing_config.api_key.is_none() {
                listing_config.api_key = Some("unconfigured".to_string());
            }
            let client = Arc::new(SonarClient::new(&listing_config)?);
            let registry = ToolRegistry::new(client, &listing_config);
            output_tools(&registry, output);
        }
    }

    Ok(())
}

fn output_tools(registry: &ToolRegistry, format: OutputFormat) {
    let mut tools = registry.all();
    tools.sort_by(|a, b| a.name.cmp(&b.name));

    let actual_format = if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name,
                        "description": t.description,
                        "input_schema": t.input_schema,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries).unwrap());
        }
        OutputFormat::Plain => {
            for tool in tools {
                println!("{}", tool.name);
            }
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Tool", "Description"]);

            for tool in tools {
                let description = if tool.description.len() > 80 {
                    format!("{}...", &tool.description[..77])
                } else {
                    tool.description.clone()
                };

                table.add_row(vec![
                    Cell::new(&tool.name).add_attribute(Attribute::Bold),
                    Cell::new(description),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Auto => unreachable!(),
    }
}
