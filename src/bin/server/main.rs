#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Form mailer REST API

use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use clap::Parser;
use form_mailer::{
    domain::communication::{
        dispatcher::{EmailDispatcher, RetryPolicy},
        mailer::Mailer,
    },
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPMailer},
        http::{
            servers::{http::HttpServer, https::HttpsServer},
            state::{AppConfig, AppState, MailConfig},
            HttpServerConfig, Server,
        },
    },
};
use tracing::{info, warn};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The SMTP relay configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// Delivery configuration
    #[clap(flatten)]
    pub mail: MailConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mailer = Arc::new(SMTPMailer::new(args.smtp)?);

    if let Err(e) = mailer.verify().await {
        warn!(error = %e, "SMTP relay could not be verified; continuing");
    }

    let policy = RetryPolicy::new(
        args.mail.max_attempts,
        Duration::from_millis(args.mail.retry_base_delay_ms),
    );

    let state = AppState::new(
        AppConfig {
            admin_email: args.mail.admin_email,
        },
        EmailDispatcher::new(mailer, policy),
    );

    match (&args.server.cert_path, &args.server.key_path) {
        (Some(cert_path), Some(key_path)) => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| anyhow!("failed to install the TLS crypto provider"))?;

            info!("serving HTTPS");

            HttpsServer::new(args.server.port, cert_path, key_path, state)
                .await?
                .run()
                .await
        }
        _ => HttpServer::new(&args.server, state)?.run().await,
    }
}
