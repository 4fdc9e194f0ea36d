//! HTTP client for the internet roll server
//!
//! The wire protocol is plain text both ways: the request body is `key=value`
//! lines describing the dice, the response is newline-delimited lines from
//! which the rolled values are parsed. Anything that does not yield the
//! requested number of values is a server error.

use crate::core::config::RollServerConfig;
use crate::core::error::{Result, TabulaError};
use crate::roll::RollSpec;
use reqwest::Client;
use std::time::Duration;

pub struct RollClient {
    client: Client,
    config: RollServerConfig,
}

impl RollClient {
    pub fn new(config: RollServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Build the request body for one roll
    fn build_request_body(&self, spec: &RollSpec) -> String {
        let mut lines = vec![
            format!("number1={}", spec.n_dice),
            format!("type1={}", spec.n_sides),
            format!("modifier1={}", spec.plus),
        ];
        if let Some(email) = &self.config.email {
            lines.push(format!("email={}", email));
        }
        if let Some(password) = &self.config.password {
            lines.push(format!("password={}", password));
        }
        lines.push("Submit=Throw Dice".to_string());
        let mut body = lines.join("\n");
        body.push('\n');
        body
    }

    /// Pull rolled values out of the response lines: the first line carrying
    /// at least `n_dice` integer tokens supplies them, extra tokens ignored.
    fn parse_response(spec: &RollSpec, body: &str) -> Result<Vec<i64>> {
        for line in body.lines() {
            let values: Vec<i64> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .filter_map(|t| t.parse().ok())
                .collect();
            if values.len() >= spec.n_dice as usize {
                return Ok(values[..spec.n_dice as usize].to_vec());
            }
        }
        Err(TabulaError::RollServer(format!(
            "no line with {} results in server response",
            spec.n_dice
        )))
    }

    /// Run one request/response cycle. The per-die modifier is applied to the
    /// values the server returns.
    pub async fn roll(&self, spec: &RollSpec) -> Result<Vec<i64>> {
        if !self.config.supports(spec.n_dice, spec.n_sides) {
            return Err(TabulaError::RollServer(format!(
                "server does not support {}d{}",
                spec.n_dice, spec.n_sides
            )));
        }

        let body = self.build_request_body(spec);
        tracing::debug!(url = %self.config.url, dice = spec.n_dice, sides = spec.n_sides, "submitting roll");

        let response = self
            .client
            .post(&self.config.url)
            .header("content-type", "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TabulaError::RollServer(format!(
                "server returned status {}",
                response.status()
            )));
        }

        let text = response.text().await?;
        let values = Self::parse_response(spec, &text)?;
        Ok(values.into_iter().map(|v| v + spec.plus).collect())
    }
}
