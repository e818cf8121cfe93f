use anyhow::Result;
use clap::{Parser, Subcommand};
use token_creator::config::Config;
use token_creator::pages::views;
use token_creator::repository::Database;
use token_creator::request::TokenCreationForm;
use token_creator::session::{Route, SessionManager};
use token_creator::submitter::TokenCreationSubmitter;
use token_creator::wallet::WalletClient;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "tokenctl")]
#[command(about = "Create and manage whitelist-protected tokens", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect the wallet and remember the choice for future runs
    Connect,
    /// Create a new token through the factory contract
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        symbol: String,

        #[arg(long)]
        total_supply: String,

        /// Fee-exempt addresses, comma separated or repeated
        #[arg(long, value_delimiter = ',')]
        whitelist: Vec<String>,
    },
    /// Show the complete token guide
    Guide,
    /// Show details and next steps for a created token
    Details {
        #[arg(long)]
        address: String,

        #[arg(long)]
        tx: Option<String>,
    },
    /// Show the owner guide for an existing token
    Manage {
        #[arg(long)]
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Creation-flow errors are shown inline; they never crash the process.
    if let Err(e) = run(cli.command, &config).await {
        error!("Command failed: {}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Connect => cmd_connect(config).await,
        Commands::Create {
            name,
            symbol,
            total_supply,
            whitelist,
        } => cmd_create(config, name, symbol, total_supply, whitelist).await,
        Commands::Guide => {
            println!("{}", views::render_guide());
            Ok(())
        }
        Commands::Details { address, tx } => {
            println!(
                "{}",
                views::render_details(config.target_chain_id, &address, tx.as_deref())
            );
            Ok(())
        }
        Commands::Manage { address } => {
            println!("{}", views::render_manage(config.target_chain_id, &address));
            Ok(())
        }
    }
}

async fn cmd_connect(config: &Config) -> Result<()> {
    let target = config.target_network()?.clone();
    println!("{}", views::render_welcome(&target));

    let mut sessions = session_manager(config, target.clone())?;

    sessions.auto_reconnect_on_load().await;
    if !sessions.session().is_active {
        sessions.connect(true).await?;
    }

    if sessions.take_redirect() == Some(Route::CreateToken) {
        println!("{}", views::render_create_banner(&target));
    }

    Ok(())
}

async fn cmd_create(
    config: &Config,
    name: String,
    symbol: String,
    total_supply: String,
    whitelist: Vec<String>,
) -> Result<()> {
    let target = config.target_network()?.clone();

    let mut sessions = session_manager(config, target.clone())?;
    sessions.auto_reconnect_on_load().await;
    if sessions.session().is_active {
        sessions.refresh().await?;
    }
    if !sessions.session().is_active {
        sessions.connect(true).await?;
    }

    if sessions.take_redirect() == Some(Route::CreateToken) {
        println!("{}", views::render_create_banner(&target));
    }

    let mut form = TokenCreationForm {
        name,
        symbol,
        total_supply,
        ..TokenCreationForm::default()
    };
    for entry in &whitelist {
        if form.whitelist.add(entry)? {
            info!("Whitelisted {}", entry);
        }
    }

    let client = WalletClient::new(&config.wallet_rpc_url)?;
    let mut submitter = TokenCreationSubmitter::new(client, target);
    let session = sessions.session().clone();
    let result = submitter.create_token(&mut form, &session).await?;

    println!("{}", views::render_success(&result));
    println!(
        "{}",
        views::render_details(
            config.target_chain_id,
            &format!("{}", result.token_address),
            Some(&format!("{}", result.transaction_hash)),
        )
    );

    Ok(())
}

fn session_manager(
    config: &Config,
    target: token_creator::config::NetworkConfig,
) -> Result<SessionManager<WalletClient>> {
    let db = Database::new(&config.database_url)?;
    let client = WalletClient::new(&config.wallet_rpc_url)?;
    Ok(SessionManager::new(client, db, target))
}
