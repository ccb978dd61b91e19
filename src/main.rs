use clap::{Parser, Subcommand};
use manual_pay::application::navigation::Route;
use manual_pay::application::workflow::Workflow;
use manual_pay::assistant::{chatbot, demo};
use manual_pay::config::{
    BACKEND_URL_VAR, Config, REQUEST_TIMEOUT_VAR, REQUIRE_TRANSACTION_ID_VAR,
};
use manual_pay::domain::notice::Notice;
use manual_pay::domain::ports::GatewayHandle;
use manual_pay::domain::submission::PaymentMethod;
use manual_pay::infrastructure::http::HttpGateway;
use manual_pay::infrastructure::in_memory::InMemoryGateway;
use manual_pay::interfaces::cli::render::PageWriter;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

const OFFLINE_BACKEND_URL: &str = "http://127.0.0.1/";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the manual-payments backend
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Refuse to submit a proof without a transaction id / UTR number
    #[arg(long, global = true)]
    require_transaction_id: bool,

    /// Request timeout in seconds (transport default when unset)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Use the built-in in-memory backend instead of HTTP
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the package summary and the UPI / bank transfer instructions
    Details {
        #[arg(long)]
        package: Option<String>,
    },
    /// Submit proof of payment and show the resulting verification status
    Checkout {
        #[arg(long)]
        package: Option<String>,
        /// upi or bank
        #[arg(long)]
        method: PaymentMethod,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Transaction id or UTR number
        #[arg(long)]
        transaction_id: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Check the verification status of an order
    Status {
        #[arg(long)]
        order_id: Option<String>,
    },
    /// Ask the FAQ chatbot a question
    Chat { message: Vec<String> },
    /// Run the live writing demo
    Demo {
        #[arg(long, default_value = "blog")]
        tool: String,
        #[arg(long, default_value_t = 10)]
        interval_ms: u64,
        input: Vec<String>,
    },
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,manual_pay=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Environment (and `.env`) first, command-line flags on top.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut defaults = Vec::new();
    if cli.offline {
        defaults.push(var(BACKEND_URL_VAR, OFFLINE_BACKEND_URL));
    }

    let mut overrides = Vec::new();
    if let Some(url) = &cli.backend_url {
        overrides.push(var(BACKEND_URL_VAR, url));
    }
    if cli.require_transaction_id {
        overrides.push(var(REQUIRE_TRANSACTION_ID_VAR, "true"));
    }
    if let Some(secs) = cli.timeout_secs {
        overrides.push(var(REQUEST_TIMEOUT_VAR, &secs.to_string()));
    }
    Ok(Config::from_env_layered(defaults, overrides)?)
}

fn var(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        eprintln!("{notice}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // The assistant commands need no backend
    match &cli.command {
        Command::Chat { message } => {
            println!("{}", chatbot::reply(&message.join(" ")));
            return Ok(());
        }
        Command::Demo {
            tool,
            interval_ms,
            input,
        } => {
            let typewriter = demo::generate(tool, &input.join(" "))?;
            let stdout = io::stdout();
            typewriter
                .play(Duration::from_millis(*interval_ms), |chunk| {
                    let mut out = stdout.lock();
                    out.write_all(chunk.as_bytes())?;
                    out.flush()
                })
                .await?;
            println!();
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(&cli)?;
    let gateway: GatewayHandle = if cli.offline {
        Arc::new(InMemoryGateway::default())
    } else {
        Arc::new(HttpGateway::new(config.clone())?)
    };
    let mut workflow = Workflow::new(gateway, config.validation);
    let stdout = io::stdout();
    let mut writer = PageWriter::new(stdout.lock());

    match cli.command {
        Command::Details { package } => {
            workflow.navigate(Route::Checkout { package }).await;
            let page = workflow.checkout_mut()?;
            print_notices(page.drain_notices());
            writer.write_checkout(page).into_diagnostic()?;
        }
        Command::Checkout {
            package,
            method,
            name,
            email,
            phone,
            transaction_id,
            notes,
        } => {
            workflow.navigate(Route::Checkout { package }).await;
            let route = {
                let page = workflow.checkout_mut()?;
                print_notices(page.drain_notices());
                page.select_method(method)?;
                page.confirm_payment_made()?;
                page.edit_form(|form| {
                    form.user_name = name.unwrap_or_default();
                    form.user_email = email.unwrap_or_default();
                    form.user_phone = phone.unwrap_or_default();
                    form.transaction_id = transaction_id.unwrap_or_default();
                    form.notes = notes.unwrap_or_default();
                })?;
                let outcome = page.submit().await;
                print_notices(page.drain_notices());
                outcome?
            };
            writer.write_redirect(&route).into_diagnostic()?;
            workflow.navigate(route).await;
            writer.write_status(workflow.status_mut()?).into_diagnostic()?;
        }
        Command::Status { order_id } => {
            workflow.navigate(Route::PaymentPending { order_id }).await;
            writer.write_status(workflow.status_mut()?).into_diagnostic()?;
        }
        Command::Chat { .. } | Command::Demo { .. } => {}
    }

    Ok(())
}
