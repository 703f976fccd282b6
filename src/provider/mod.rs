// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Story-generation provider clients.
//!
//! Only the connectivity check is needed by the interface layer: the setup
//! wizard asks a provider to list its models with the supplied key and turns
//! any failure into one of a handful of user-facing categories.

use std::{error::Error as _, time::Duration};

use reqwest::blocking::Client;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub(crate) enum ProviderError {
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("request failed: {detail}")]
    Http {
        detail: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(source: reqwest::Error) -> Self {
        ProviderError::Http {
            detail: describe_http_error(&source),
            source,
        }
    }
}

/// Flattens a reqwest error and its causes into one line. reqwest's own
/// message leaves out the cause, which is where refused connections and DNS
/// failures are named.
fn describe_http_error(error: &reqwest::Error) -> String {
    let mut text = error.to_string();
    if error.is_timeout() {
        text.push_str(": timed out");
    } else if error.is_connect() {
        text.push_str(": connection failed");
    }

    let mut cause = error.source();
    while let Some(e) = cause {
        text.push_str(": ");
        text.push_str(&e.to_string());
        cause = e.source();
    }
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthStyle {
    Bearer,
    ApiKeyHeader,
    QueryKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProviderDescriptor {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) base_url: &'static str,
    pub(crate) auth: AuthStyle,
}

const BUILTIN_PROVIDERS: [ProviderDescriptor; 4] = [
    ProviderDescriptor {
        id: "openai",
        name: "OpenAI",
        description: "GPT models via api.openai.com",
        base_url: "https://api.openai.com/v1",
        auth: AuthStyle::Bearer,
    },
    ProviderDescriptor {
        id: "anthropic",
        name: "Anthropic",
        description: "Claude models via api.anthropic.com",
        base_url: "https://api.anthropic.com/v1",
        auth: AuthStyle::ApiKeyHeader,
    },
    ProviderDescriptor {
        id: "gemini",
        name: "Google Gemini",
        description: "Gemini models via generativelanguage.googleapis.com",
        base_url: "https://generativelanguage.googleapis.com/v1beta",
        auth: AuthStyle::QueryKey,
    },
    ProviderDescriptor {
        id: "openrouter",
        name: "OpenRouter",
        description: "Many models behind one key",
        base_url: "https://openrouter.ai/api/v1",
        auth: AuthStyle::Bearer,
    },
];

pub(crate) fn list_builtin_providers() -> &'static [ProviderDescriptor] {
    &BUILTIN_PROVIDERS
}

pub(crate) fn find_provider(id: &str) -> Option<&'static ProviderDescriptor> {
    BUILTIN_PROVIDERS.iter().find(|p| p.id == id)
}

pub(crate) trait ProviderClient {
    fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Builds clients for provider ids. Shared with the command worker thread.
pub(crate) trait ProviderFactory: Send + Sync {
    fn providers(&self) -> &[ProviderDescriptor];

    fn construct(&self, provider_id: &str, secret: &str)
    -> Result<Box<dyn ProviderClient>, ProviderError>;
}

pub(crate) struct HttpProviderFactory;

impl ProviderFactory for HttpProviderFactory {
    fn providers(&self) -> &[ProviderDescriptor] {
        list_builtin_providers()
    }

    fn construct(
        &self,
        provider_id: &str,
        secret: &str,
    ) -> Result<Box<dyn ProviderClient>, ProviderError> {
        let descriptor = find_provider(provider_id)
            .ok_or_else(|| ProviderError::UnknownProvider(provider_id.to_string()))?;

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Box::new(HttpProvider {
            descriptor: *descriptor,
            secret: secret.to_string(),
            http,
        }))
    }
}

struct HttpProvider {
    descriptor: ProviderDescriptor,
    secret: String,
    http: Client,
}

impl ProviderClient for HttpProvider {
    fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/models", self.descriptor.base_url);
        let request = match self.descriptor.auth {
            AuthStyle::Bearer => self.http.get(url).bearer_auth(&self.secret),
            AuthStyle::ApiKeyHeader => self
                .http
                .get(url)
                .header("x-api-key", &self.secret)
                .header("anthropic-version", ANTHROPIC_VERSION),
            AuthStyle::QueryKey => self.http.get(url).query(&[("key", &self.secret)]),
        };

        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            tracing::info!(provider = self.descriptor.id, "connection test succeeded");
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(ProviderError::Status {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCategory {
    InvalidCredential,
    Network,
    RateLimited,
    Unknown,
}

impl ErrorCategory {
    /// Sorts an error into a category by looking for status codes and
    /// well-known phrases in its text.
    pub(crate) fn classify(error: &str) -> Self {
        let text = error.to_lowercase();
        let has = |markers: &[&str]| markers.iter().any(|m| text.contains(m));

        if has(&["401", "403", "unauthorized", "forbidden", "invalid api key", "invalid_api_key", "authentication"]) {
            ErrorCategory::InvalidCredential
        } else if has(&["429", "rate limit", "rate_limit", "too many requests", "quota"]) {
            ErrorCategory::RateLimited
        } else if has(&["timeout", "timed out", "connection", "connect", "dns", "network", "unreachable"]) {
            ErrorCategory::Network
        } else {
            ErrorCategory::Unknown
        }
    }

    pub(crate) fn message(self) -> &'static str {
        match self {
            ErrorCategory::InvalidCredential => {
                "The API key was rejected. Check that it is correct and still active."
            }
            ErrorCategory::Network => {
                "Could not reach the provider. Check your network connection."
            }
            ErrorCategory::RateLimited => {
                "The provider is rate limiting this key. Wait a moment and try again."
            }
            ErrorCategory::Unknown => "The connection test failed for an unknown reason.",
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// Factory whose clients never touch the network.
    pub(crate) struct FakeFactory;

    impl ProviderFactory for FakeFactory {
        fn providers(&self) -> &[ProviderDescriptor] {
            list_builtin_providers()
        }

        fn construct(
            &self,
            provider_id: &str,
            _secret: &str,
        ) -> Result<Box<dyn ProviderClient>, ProviderError> {
            Err(ProviderError::UnknownProvider(provider_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_markers() {
        assert_eq!(
            ErrorCategory::classify("HTTP 401: {\"error\":\"invalid api key\"}"),
            ErrorCategory::InvalidCredential
        );
        assert_eq!(
            ErrorCategory::classify("HTTP 429: Too Many Requests"),
            ErrorCategory::RateLimited
        );
        assert_eq!(
            ErrorCategory::classify("request failed: operation timed out"),
            ErrorCategory::Network
        );
        assert_eq!(ErrorCategory::classify("HTTP 500: oops"), ErrorCategory::Unknown);
    }

    #[test]
    fn test_refused_connection_is_a_network_error() {
        let client = HttpProvider {
            descriptor: ProviderDescriptor {
                base_url: "http://127.0.0.1:9/v1",
                ..BUILTIN_PROVIDERS[0]
            },
            secret: "sk-12345678".to_string(),
            http: Client::builder().timeout(Duration::from_secs(5)).build().unwrap(),
        };

        let error = client.test_connection().unwrap_err();
        assert!(matches!(error, ProviderError::Http { .. }));
        assert_eq!(ErrorCategory::classify(&error.to_string()), ErrorCategory::Network);
    }

    #[test]
    fn test_status_error_text_is_classifiable() {
        let error = ProviderError::Status {
            status: 403,
            body: String::new(),
        };
        assert_eq!(
            ErrorCategory::classify(&error.to_string()),
            ErrorCategory::InvalidCredential
        );
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = HttpProviderFactory.construct("nope", "key");
        assert!(matches!(result, Err(ProviderError::UnknownProvider(id)) if id == "nope"));
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let providers = list_builtin_providers();
        for (i, p) in providers.iter().enumerate() {
            assert!(providers[i + 1..].iter().all(|q| q.id != p.id));
            assert_eq!(find_provider(p.id), Some(p));
        }
    }
}
