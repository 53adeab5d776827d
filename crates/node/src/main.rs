//! Keystone Node CLI
//!
//! Bootstraps node identity and assembles the genesis file.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use keystone_crypto::{ExposeSecret, Mnemonic, SecretString};
use keystone_types::{AppState, GenesisDoc, GenesisValidator, PubKey};
use keystoned::{
    default_home_dir, export_genesis_file_with_time, initialize_node_validator_files_from_mnemonic,
    input, FilePv, NodeConfig, NodeKey,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Voting power given to this node in a genesis created by `init`
const DEFAULT_INIT_POWER: i64 = 10;

/// Keystone Daemon
#[derive(Parser)]
#[command(name = "keystoned")]
#[command(author = "Keystone Contributors")]
#[command(version)]
#[command(about = "Keystone Daemon", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Directory for config and data
    #[arg(long, global = true, default_value_os_t = default_home_dir())]
    home: PathBuf,

    /// The logging level (trace|debug|info|warn|error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// The logging format (json|plain)
    #[arg(long, global = true, default_value = "plain")]
    log_format: String,

    /// Disable colored logs
    #[arg(long, global = true, default_value = "false")]
    log_no_color: bool,

    /// Print out full stack trace on errors
    #[arg(long, global = true, default_value = "false")]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize node key, private validator and genesis files
    Init {
        /// Recover keys from a bip39 mnemonic instead of generating them
        #[arg(long, default_value = "false")]
        recover: bool,

        /// Read the mnemonic from this file instead of prompting
        #[arg(long, requires = "recover")]
        mnemonic_file: Option<PathBuf>,

        /// Chain ID of the genesis file (default: test-chain-<node id prefix>)
        #[arg(long)]
        chain_id: Option<String>,

        /// Moniker for this node
        #[arg(long)]
        moniker: Option<String>,

        /// Voting power of this node in the generated genesis
        #[arg(long, default_value_t = DEFAULT_INIT_POWER)]
        power: i64,
    },

    /// Genesis file management commands
    Genesis {
        #[command(subcommand)]
        command: GenesisCommands,
    },

    /// Validates the genesis file at the default location or at the location passed as an arg
    Validate {
        /// Path to genesis file (optional, uses default if not provided)
        #[arg(long)]
        genesis: Option<PathBuf>,
    },

    /// Print this node's id
    #[command(name = "show-node-id")]
    ShowNodeId,

    /// Print this node's validator public key
    #[command(name = "show-validator")]
    ShowValidator,

    /// Print a freshly generated 24-word mnemonic
    Mnemonic,
}

#[derive(Subcommand)]
enum GenesisCommands {
    /// Build, validate and write a genesis file
    Export {
        /// Chain ID of the network
        #[arg(long)]
        chain_id: String,

        /// Validator as PUBKEY_BASE64:POWER[:NAME] (repeatable)
        #[arg(long = "validator", value_parser = parse_validator)]
        validators: Vec<GenesisValidator>,

        /// JSON file holding the application state
        #[arg(long)]
        app_state: Option<PathBuf>,

        /// Genesis time (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_genesis_time)]
        genesis_time: Option<DateTime<Utc>>,

        /// Output path (default: the configured genesis path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_validator(s: &str) -> std::result::Result<GenesisValidator, String> {
    let mut parts = s.splitn(3, ':');
    let pub_key = parts.next().unwrap_or_default();
    let power = parts
        .next()
        .ok_or_else(|| format!("expected PUBKEY:POWER[:NAME], got {s:?}"))?;
    let name = parts.next().unwrap_or_default();

    let pub_key = PubKey::ed25519_from_base64(pub_key).map_err(|e| e.to_string())?;
    let power: i64 = power
        .parse()
        .map_err(|e| format!("invalid power {power:?}: {e}"))?;
    Ok(GenesisValidator::new(pub_key, power, name))
}

fn parse_genesis_time(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, &cli.log_format, cli.log_no_color);

    let result = match cli.command {
        Commands::Init {
            recover,
            mnemonic_file,
            chain_id,
            moniker,
            power,
        } => cmd_init(
            &cli.home,
            recover,
            mnemonic_file.as_deref(),
            chain_id,
            moniker,
            power,
        ),

        Commands::Genesis { command } => cmd_genesis(&cli.home, command),

        Commands::Validate { genesis } => cmd_validate(&cli.home, genesis),

        Commands::ShowNodeId => cmd_show_node_id(&cli.home),

        Commands::ShowValidator => cmd_show_validator(&cli.home),

        Commands::Mnemonic => cmd_mnemonic(),
    };

    if let Err(e) = &result {
        if cli.trace {
            eprintln!("Error: {:?}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(log_level: &str, log_format: &str, no_color: bool) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // Logs go to stderr; stdout carries command output.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color);

    match log_format {
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_init(
    home: &Path,
    recover: bool,
    mnemonic_file: Option<&Path>,
    chain_id: Option<String>,
    moniker: Option<String>,
    power: i64,
) -> Result<()> {
    let mut config = NodeConfig::load_or_default(home)?;
    if let Some(moniker) = moniker {
        config.moniker = moniker;
    }

    let mnemonic: SecretString = if recover {
        input::get_mnemonic(mnemonic_file)?
    } else {
        String::new().into()
    };

    let (node_id, pub_key) =
        initialize_node_validator_files_from_mnemonic(&config, mnemonic.expose_secret())
            .context("Failed to initialize node identity")?;
    drop(mnemonic);

    config.save()?;

    let genesis_path = config.genesis_path();
    let chain_id = if genesis_path.exists() {
        let existing = GenesisDoc::load(&genesis_path)?;
        info!(path = %genesis_path.display(), "Genesis file exists, leaving it unchanged");
        existing.chain_id
    } else {
        let chain_id = chain_id.unwrap_or_else(|| {
            let id = node_id.to_string();
            format!("test-chain-{}", &id[..6])
        });
        let validator = GenesisValidator::new(pub_key, power, config.moniker.clone());
        let app_state = AppState::from_bytes(b"{}")?;
        export_genesis_file_with_time(
            &genesis_path,
            &chain_id,
            vec![validator],
            Some(app_state),
            None,
        )
        .with_context(|| format!("Failed to write genesis file {}", genesis_path.display()))?;
        chain_id
    };

    println!("Successfully initialized node");
    println!();
    println!("  Home:       {}", home.display());
    println!("  Moniker:    {}", config.moniker);
    println!("  Chain ID:   {}", chain_id);
    println!("  Node ID:    {}", node_id);
    println!("  Validator:  {}", pub_key);
    println!("  Genesis:    {}", genesis_path.display());

    Ok(())
}

fn cmd_genesis(home: &Path, command: GenesisCommands) -> Result<()> {
    match command {
        GenesisCommands::Export {
            chain_id,
            validators,
            app_state,
            genesis_time,
            output,
        } => {
            let output = match output {
                Some(path) => path,
                None => NodeConfig::load_or_default(home)?.genesis_path(),
            };
            cmd_genesis_export(&chain_id, validators, app_state.as_deref(), genesis_time, &output)
        }
    }
}

fn cmd_genesis_export(
    chain_id: &str,
    validators: Vec<GenesisValidator>,
    app_state_file: Option<&Path>,
    genesis_time: Option<DateTime<Utc>>,
    output: &Path,
) -> Result<()> {
    let app_state = match app_state_file {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read app state file: {}", path.display()))?;
            Some(AppState::from_bytes(&bytes)?)
        }
        None => None,
    };

    let genesis =
        export_genesis_file_with_time(output, chain_id, validators, app_state, genesis_time)?;

    println!("Genesis file written to {}", output.display());
    println!();
    print_genesis_summary(&genesis);

    Ok(())
}

fn cmd_validate(home: &Path, genesis_path: Option<PathBuf>) -> Result<()> {
    let path = match genesis_path {
        Some(path) => path,
        None => NodeConfig::load_or_default(home)?.genesis_path(),
    };

    if !path.exists() {
        anyhow::bail!("Genesis file not found at {}", path.display());
    }

    let mut genesis = GenesisDoc::load(&path)?;
    genesis
        .validate_and_complete()
        .with_context(|| format!("Genesis file at {} is invalid", path.display()))?;

    println!("Genesis file at {} is valid", path.display());
    println!();
    print_genesis_summary(&genesis);

    Ok(())
}

fn print_genesis_summary(genesis: &GenesisDoc) {
    println!("  Chain ID:     {}", genesis.chain_id);
    println!("  Validators:   {}", genesis.validators.len());
    println!("  Total Power:  {}", genesis.total_voting_power());
    if let Some(time) = genesis.genesis_time {
        println!("  Genesis Time: {}", time.to_rfc3339());
    }
}

fn cmd_show_node_id(home: &Path) -> Result<()> {
    let config = NodeConfig::load_or_default(home)?;
    let node_key = NodeKey::load(&config.node_key_path())?;
    println!("{}", node_key.id());
    Ok(())
}

fn cmd_show_validator(home: &Path) -> Result<()> {
    let config = NodeConfig::load_or_default(home)?;
    let keypair = FilePv::load_key(&config.priv_validator_key_path())?;
    let pub_key = PubKey::from(keypair.public_key);
    println!("{}", serde_json::to_string(&pub_key)?);
    Ok(())
}

fn cmd_mnemonic() -> Result<()> {
    let mnemonic = Mnemonic::generate()?;
    input::display_mnemonic_warning(mnemonic.phrase());
    println!("{}", mnemonic.phrase());
    Ok(())
}
