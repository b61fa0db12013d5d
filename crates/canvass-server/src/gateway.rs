//! Twilio outbound gateway.
//!
//! The only part of the system that talks to the messaging provider. The
//! orchestrator treats it as best-effort, so errors here surface as warnings
//! in the log and nothing else.

use canvass_engine::gateway::MessageGateway;
use thiserror::Error;

use crate::TwilioConfig;

#[derive(Debug, Error)]
pub enum TwilioError {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("twilio rejected the message: {status}")]
  Rejected { status: reqwest::StatusCode },
}

/// Sends messages through Twilio's REST API, re-attaching the channel prefix
/// the orchestrator stripped on the way in.
#[derive(Clone)]
pub struct TwilioGateway {
  http:   reqwest::Client,
  config: TwilioConfig,
}

impl TwilioGateway {
  pub fn new(config: TwilioConfig) -> Self {
    Self { http: reqwest::Client::new(), config }
  }

  fn messages_url(&self) -> String {
    format!(
      "{}/2010-04-01/Accounts/{}/Messages.json",
      self.config.api_base, self.config.account_sid
    )
  }

  /// The channel scheme of the configured sender (e.g. `"whatsapp"`).
  fn channel(&self) -> &str {
    self
      .config
      .from_address
      .split_once(':')
      .map(|(scheme, _)| scheme)
      .unwrap_or("whatsapp")
  }
}

impl MessageGateway for TwilioGateway {
  type Error = TwilioError;

  async fn send(&self, to: &str, body: &str) -> Result<(), TwilioError> {
    let to_address = format!("{}:{}", self.channel(), to);

    let response = self
      .http
      .post(self.messages_url())
      .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
      .form(&[
        ("From", self.config.from_address.as_str()),
        ("To", to_address.as_str()),
        ("Body", body),
      ])
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(TwilioError::Rejected { status: response.status() });
    }
    Ok(())
  }
}
