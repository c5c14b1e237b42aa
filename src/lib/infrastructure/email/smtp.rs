//! SMTP email service implementation

use std::{fmt, time::Duration};

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use clap::{ArgAction, Parser};
use lettre::{
    message::{
        header::ContentType, Attachment as AttachmentPart, Mailbox, MultiPart, SinglePart,
    },
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
        PoolConfig,
    },
    AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor,
};
use tracing::{debug, error, info};

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::{Mailer, MailerError, Message},
};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value_t = 587)]
    pub port: u16,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER")]
    pub username: String,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Connect with implicit TLS (usually port 465)
    #[clap(long = "smtp-secure", env = "SMTP_SECURE", default_value_t = false, action = ArgAction::Set)]
    pub secure: bool,

    /// Refuse to send unless the server offers STARTTLS
    #[clap(long = "smtp-starttls", env = "SMTP_STARTTLS", default_value_t = false, action = ArgAction::Set)]
    pub starttls: bool,

    /// Verify the TLS certificate
    #[clap(long = "smtp-verify-tls", env = "SMTP_VERIFY_TLS", default_value_t = true, action = ArgAction::Set)]
    pub verify_tls: bool,

    /// Maximum number of pooled connections to the relay
    #[clap(long = "smtp-max-connections", env = "SMTP_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Timeout in seconds for each SMTP command
    #[clap(long = "smtp-timeout-secs", env = "SMTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// SMTP mailer.
///
/// Owns a pooled async transport; clones share the same pool, so the process
/// holds exactly one set of relay connections.
#[derive(Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl fmt::Debug for SMTPMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SMTPMailer")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("secure", &self.config.secure)
            .field("max_connections", &self.config.max_connections)
            .field("transport", &"AsyncSmtpTransport")
            .finish()
    }
}

impl SMTPMailer {
    /// Create a new SMTP mailer and its connection pool
    pub fn new(config: SMTPConfig) -> anyhow::Result<Self> {
        let transport = transport(&config)?;

        Ok(Self { config, transport })
    }
}

/// Builds the pooled transport described by `config`. No connection is opened
/// until the first message is sent.
fn transport(config: &SMTPConfig) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
    let tls_parameters = TlsParameters::builder(config.host.clone())
        .dangerous_accept_invalid_certs(!config.verify_tls)
        .build()
        .context("failed to build TLS parameters")?;

    let tls = if config.secure {
        Tls::Wrapper(tls_parameters)
    } else if config.starttls {
        Tls::Required(tls_parameters)
    } else {
        Tls::Opportunistic(tls_parameters)
    };

    let credentials = Credentials::new(config.username.clone(), config.password.clone());

    let pool = PoolConfig::new()
        .min_idle(0)
        .max_size(config.max_connections.max(1))
        .idle_timeout(Duration::from_secs(60));

    Ok(
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .pool_config(pool)
            .build(),
    )
}

/// The `Message-ID` header value for `message`, stable across attempts
fn message_id(message: &Message) -> String {
    let domain = EmailAddress::new(message.to())
        .map(|address| address.domain().to_string())
        .unwrap_or_else(|_| "localhost".to_string());

    format!("<{}@{}>", message.id(), domain)
}

/// Converts an envelope into a MIME message: an alternative plain/HTML body,
/// wrapped in a mixed part when there are attachments.
fn build_email(message: &Message) -> Result<Email, MailerError> {
    let builder = Email::builder()
        .message_id(Some(message_id(message)))
        .from(parse_mailbox(message.from(), "sender")?)
        .to(parse_mailbox(message.to(), "recipient")?)
        .reply_to(parse_mailbox(message.reply_to(), "reply-to")?)
        .subject(message.subject());

    let body = match message.plain_body() {
        Some(plain) => MultiPart::alternative_plain_html(
            plain.to_string(),
            message.html_body().to_string(),
        ),
        None => MultiPart::alternative().singlepart(SinglePart::html(message.html_body().to_string())),
    };

    if message.attachments().is_empty() {
        return builder
            .multipart(body)
            .map_err(|e| MailerError::Fatal(anyhow!("failed to build email: {e}")));
    }

    let mut mixed = MultiPart::mixed().multipart(body);

    for attachment in message.attachments() {
        let bytes = attachment.decode().map_err(|e| {
            MailerError::Fatal(anyhow!(
                "attachment \"{}\" is not valid base64: {e}",
                attachment.filename
            ))
        })?;

        let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
            MailerError::Fatal(anyhow!(
                "attachment \"{}\" has an invalid content type: {e}",
                attachment.filename
            ))
        })?;

        mixed = mixed.singlepart(AttachmentPart::new(attachment.filename.clone()).body(bytes, content_type));
    }

    builder
        .multipart(mixed)
        .map_err(|e| MailerError::Fatal(anyhow!("failed to build email: {e}")))
}

fn parse_mailbox(address: &str, role: &str) -> Result<Mailbox, MailerError> {
    address
        .trim()
        .parse()
        .map_err(|_| MailerError::Validation(format!("Invalid {role} email: {address}")))
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send_email(&self, message: &Message) -> Result<String, MailerError> {
        let email = build_email(message)?;

        debug!(to = %message.to(), subject = %message.subject(), "sending email via SMTP");

        match self.transport.send(email).await {
            Ok(response) => {
                debug!(code = %response.code(), "relay accepted email");

                Ok(message_id(message))
            }
            Err(e) => {
                error!(error = %e, transient = e.is_transient(), permanent = e.is_permanent(), "SMTP send failed");

                Err(MailerError::Transient(anyhow!("SMTP error: {e}")))
            }
        }
    }

    #[mutants::skip]
    async fn verify(&self) -> Result<(), MailerError> {
        match self.transport.test_connection().await {
            Ok(true) => {
                info!(host = %self.config.host, "SMTP connection verified");
                Ok(())
            }
            Ok(false) => Err(MailerError::Transient(anyhow!(
                "SMTP server {} did not respond to NOOP",
                self.config.host
            ))),
            Err(e) => Err(MailerError::Transient(anyhow!(
                "SMTP verification failed: {e}"
            ))),
        }
    }
}
