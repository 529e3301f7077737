//! Dompet command-line wallet.

mod render;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use dompet_client::{init_logging, ClientConfig, DompetClient};
use dompet_gateway::Registration;
use dompet_transport::AuthState;
use dompet_types::{Balance, ProfileImage, Service, TopUpAmount};
use dompet_utils::format_rupiah;

use crate::render::{Output, PaymentView};

/// Passwords shorter than this are refused before registration.
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Parser)]
#[command(name = "dompet", about = "Dompet wallet command-line client")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "DOMPET_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the wallet API.
    #[arg(long, env = "DOMPET_BASE_URL")]
    base_url: Option<String>,

    /// Directory holding the persisted session.
    #[arg(long, env = "DOMPET_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DOMPET_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "DOMPET_LOG_FORMAT")]
    log_format: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long, env = "DOMPET_EMAIL")]
        email: String,
        #[arg(long, env = "DOMPET_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account. Does not sign in.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, env = "DOMPET_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the session.
    Logout,
    /// Show the profile.
    Profile,
    /// Show the balance.
    Balance,
    /// List payable services.
    Services,
    /// List promotional banners.
    Banners,
    /// Top up the balance.
    Topup { amount: u64 },
    /// Pay for a service by its code.
    Pay { service_code: String },
    /// Show transaction history, most recent first.
    History {
        /// Page size (defaults to the configured size).
        #[arg(long)]
        limit: Option<u64>,
        /// Keep loading pages until the end.
        #[arg(long)]
        all: bool,
    },
    /// Change first and last name.
    UpdateProfile {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Upload a JPEG or PNG profile image (100 KB max).
    UploadImage { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format()?, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let output = if cli.json { Output::Json } else { Output::Human };
    let client = DompetClient::from_config(config)?;

    let result = run(&client, cli.command, output).await;
    if result.is_err() && client.session().snapshot().auth == AuthState::Expired {
        return result.context("session expired; run `dompet login` to sign in again");
    }
    result
}

/// File config (or defaults), then flag and environment overrides.
fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    config.validate()?;
    Ok(config)
}

fn require_session(client: &DompetClient) -> anyhow::Result<()> {
    if !client.is_authenticated() {
        bail!("not signed in; run `dompet login` first");
    }
    Ok(())
}

/// Refuse a payment the known balance cannot cover. Unknown services are
/// left for the server to reject.
fn ensure_affordable(balance: Option<Balance>, service: Option<&Service>) -> anyhow::Result<()> {
    let (Some(balance), Some(service)) = (balance, service) else {
        return Ok(());
    };
    if !balance.covers(service.service_tariff) {
        bail!(
            "insufficient balance for {}: {} needed, {} available",
            service.service_name,
            format_rupiah(service.service_tariff),
            format_rupiah(balance.amount())
        );
    }
    Ok(())
}

/// Print the wallet's success message, if the last command left one.
fn announce(client: &DompetClient, output: Output) {
    if output == Output::Human {
        if let Some(message) = client.wallet().snapshot().message {
            println!("{message}");
        }
    }
}

async fn run(client: &DompetClient, command: Command, output: Output) -> anyhow::Result<()> {
    let wallet = client.wallet();
    match command {
        Command::Login { email, password } => {
            client.session().sign_in(&email, &password).await?;
            println!("Signed in as {email}");
        }
        Command::Register {
            email,
            first_name,
            last_name,
            password,
        } => {
            if password.chars().count() < MIN_PASSWORD_LEN {
                bail!("password must be at least {MIN_PASSWORD_LEN} characters");
            }
            let form = Registration {
                email,
                first_name,
                last_name,
                password,
            };
            let confirmation = client.session().sign_up(&form).await?;
            println!("{confirmation}");
        }
        Command::Logout => {
            client.sign_out();
            println!("Signed out");
        }
        Command::Profile => {
            require_session(client)?;
            let profile = wallet.fetch_profile().await?;
            output.emit(&profile, render::profile)?;
        }
        Command::Balance => {
            require_session(client)?;
            let balance = wallet.fetch_balance().await?;
            output.emit(&balance, render::balance)?;
        }
        Command::Services => {
            require_session(client)?;
            let services = wallet.fetch_services().await?;
            output.emit(services.as_slice(), render::services)?;
        }
        Command::Banners => {
            let banners = wallet.fetch_banners().await?;
            output.emit(banners.as_slice(), render::banners)?;
        }
        Command::Topup { amount } => {
            require_session(client)?;
            let amount = TopUpAmount::checked(amount)?;
            let balance = wallet.top_up(amount).await?;
            announce(client, output);
            output.emit(&balance, render::balance)?;
        }
        Command::Pay { service_code } => {
            require_session(client)?;
            wallet.fetch_services().await?;
            wallet.fetch_balance().await?;
            let snapshot = wallet.snapshot();
            ensure_affordable(snapshot.balance, snapshot.service(&service_code))?;
            let outcome = wallet.make_transaction(&service_code).await?;
            announce(client, output);
            output.emit(&PaymentView::from(&outcome), render::payment)?;
        }
        Command::History { limit, all } => {
            require_session(client)?;
            let limit = limit.unwrap_or(client.config().history_page_size);
            wallet.load_first_page(limit).await?;
            if all {
                while wallet.load_next_page(limit).await? {}
            }
            let snapshot = wallet.snapshot();
            output.emit(snapshot.ledger.records(), render::records)?;
            if output == Output::Human && snapshot.ledger.has_more() {
                println!("(more available: use --all or a larger --limit)");
            }
        }
        Command::UpdateProfile {
            first_name,
            last_name,
        } => {
            require_session(client)?;
            let profile = wallet.update_profile(&first_name, &last_name).await?;
            announce(client, output);
            output.emit(&profile, render::profile)?;
        }
        Command::UploadImage { path } => {
            require_session(client)?;
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let image = ProfileImage::new(file_name, bytes)?;
            let profile = wallet.upload_image(&image).await?;
            announce(client, output);
            output.emit(&profile, render::profile)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "dompet",
            "--base-url",
            "http://localhost:9000",
            "--log-format",
            "json",
            "balance",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.history_page_size, 5);
    }

    #[test]
    fn history_flags_parse() {
        let cli = Cli::try_parse_from(["dompet", "history", "--limit", "10", "--all"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::History {
                limit: Some(10),
                all: true
            }
        ));
    }

    fn pln(tariff: u64) -> Service {
        Service {
            service_code: "PLN".to_string(),
            service_name: "Listrik".to_string(),
            service_icon: "https://minio.nutech-integrasi.com/take-home-test/services/Listrik.png"
                .to_string(),
            service_tariff: tariff,
        }
    }

    #[test]
    fn payment_beyond_balance_is_refused() {
        let err = ensure_affordable(Some(Balance::new(9_999)), Some(&pln(10_000))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "insufficient balance for Listrik: Rp 10.000 needed, Rp 9.999 available"
        );
    }

    #[test]
    fn exact_balance_or_unknown_data_is_allowed() {
        assert!(ensure_affordable(Some(Balance::new(10_000)), Some(&pln(10_000))).is_ok());
        assert!(ensure_affordable(None, Some(&pln(10_000))).is_ok());
        assert!(ensure_affordable(Some(Balance::ZERO), None).is_ok());
    }

    #[test]
    fn bad_log_format_fails_config() {
        let cli = Cli::try_parse_from(["dompet", "--log-format", "xml", "logout"]).unwrap();
        assert!(load_config(&cli).is_err());
    }
}
