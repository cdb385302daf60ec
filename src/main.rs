use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::animator::{JsonLinesSurface, ViewportAnimator};
use folio::api::{self, AppState};
use folio::client::RelayClient;
use folio::config::RelayConfig;
use folio::models::{ContactMessage, PageState, ScrollState};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio site scroll animator and contact-form mail relay")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the contact relay server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Submit a contact message to a running relay
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        /// Relay base URL (defaults to FOLIO_URL or http://127.0.0.1:3000)
        #[arg(long)]
        url: Option<String>,
    },
    /// Run the animator over a page layout and print the effects as JSON lines
    Animate {
        /// Page layout snapshot (JSON)
        layout: PathBuf,

        /// Scroll offsets to replay; the first one is the page load
        #[arg(short, long, default_value = "0", num_args = 1..)]
        scroll: Vec<f64>,

        /// Viewport height
        #[arg(short, long, default_value = "800")]
        viewport: f64,
    },
}

/// Initialize tracing; logs go to stderr so `animate` output stays clean on stdout
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting folio relay on port {}", port);

    let config = RelayConfig::from_env();
    if config.mail_user.is_none() || config.mail_pass.is_none() {
        tracing::warn!("MAIL_USER or MAIL_PASS not set; contact submissions will fail to send");
    }
    let app = api::create_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("folio relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn animate(layout: PathBuf, scroll: Vec<f64>, viewport: f64) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&layout)?;
    let page: PageState = serde_json::from_str(&raw)?;
    let mut animator = ViewportAnimator::new(page, JsonLinesSurface::new(std::io::stdout()));

    for (i, offset) in scroll.into_iter().enumerate() {
        let state = ScrollState::new(offset, viewport);
        let applied = if i == 0 {
            animator.on_load(state)
        } else {
            animator.on_scroll(state)
        };
        tracing::debug!("offset {} applied {} effects", offset, applied);
    }

    let active = animator.page().active_nav_links();
    tracing::info!("Active nav link: {}", active.first().copied().unwrap_or("none"));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(&host, port).await?,
        Some(Commands::Send {
            name,
            email,
            subject,
            message,
            url,
        }) => {
            let client = match url {
                Some(url) => RelayClient::new(url),
                None => RelayClient::from_env(),
            };
            let message = ContactMessage::new(name, email, subject, message);
            let confirmation = client.send_contact(&message).await?;
            println!("{}", confirmation);
        }
        Some(Commands::Animate {
            layout,
            scroll,
            viewport,
        }) => animate(layout, scroll, viewport)?,
        None => serve("127.0.0.1", 3000).await?,
    }

    Ok(())
}
