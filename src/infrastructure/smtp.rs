use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Code;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::MailSettings;
use crate::domain::message::PayslipEmail;
use crate::domain::ports::MailTransport;
use crate::error::DispatchError;

/// Reply codes a relay uses to refuse the sender's credentials.
const AUTH_FAILURE_CODES: [&str; 3] = ["530", "534", "535"];

/// Mail transport speaking SMTP to the configured relay.
///
/// Every [`send`](MailTransport::send) opens its own session: connect,
/// upgrade with STARTTLS, authenticate as the sender, transmit, close.
pub struct SmtpMailTransport {
    settings: MailSettings,
}

impl SmtpMailTransport {
    pub fn new(settings: MailSettings) -> Self {
        Self { settings }
    }

    fn open_session(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DispatchError> {
        let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.relay_host)
            .map_err(|e| DispatchError::Transport(e.to_string()))?;
        Ok(builder
            .port(self.settings.relay_port)
            .credentials(Credentials::new(
                self.settings.sender.clone(),
                self.settings.credential.expose().to_string(),
            ))
            .build())
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, email: PayslipEmail) -> Result<(), DispatchError> {
        let message = compose(&email)?;
        let session = self.open_session()?;
        debug!(
            relay = %self.settings.relay_host,
            port = self.settings.relay_port,
            to = %email.to,
            "opening SMTP session"
        );
        session.send(message).await.map_err(classify)?;
        Ok(())
    }
}

/// Builds the MIME message: a plain-text body followed by the PDF.
pub fn compose(email: &PayslipEmail) -> Result<Message, DispatchError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| DispatchError::Local(format!("invalid sender address '{}': {e}", email.from)))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| DispatchError::Local(format!("invalid recipient address '{}': {e}", email.to)))?;
    let content_type = ContentType::parse(email.attachment.content_type)
        .map_err(|e| DispatchError::Local(format!("invalid attachment type: {e}")))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(email.body.clone()))
                .singlepart(
                    Attachment::new(email.attachment.filename.clone())
                        .body(email.attachment.content.clone(), content_type),
                ),
        )
        .map_err(|e| DispatchError::Local(format!("failed to build message: {e}")))
}

fn classify(error: lettre::transport::smtp::Error) -> DispatchError {
    classify_code(error.status(), error.to_string())
}

fn classify_code(code: Option<Code>, message: String) -> DispatchError {
    let rejected_login =
        code.is_some_and(|code| AUTH_FAILURE_CODES.contains(&code.to_string().as_str()));
    if rejected_login {
        DispatchError::Authentication(message)
    } else {
        DispatchError::Transport(message)
    }
}
