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

//! Story provider setup wizard.
//!
//! Choose a provider, enter its API key, run a connectivity test, then
//! confirm. The test runs on the command worker; the wizard only records
//! which attempt it is waiting for, so a late answer from an abandoned
//! attempt is dropped.

mod event;
mod render;

use crate::{
    actions::{commands::AppCommand, events::TickKind},
    components::wizard::{Choice, StepOrder, TextField},
    provider::{ErrorCategory, ProviderDescriptor},
};

pub(crate) const KEY_MIN_CHARS: usize = 8;
pub(crate) const KEY_MAX_CHARS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiStep {
    Provider,
    ApiKey,
    Test,
    Summary,
}

impl StepOrder for ApiStep {
    const ORDER: &'static [Self] = &[ApiStep::Provider, ApiStep::ApiKey, ApiStep::Test, ApiStep::Summary];
}

impl ApiStep {
    pub(crate) fn title(self) -> &'static str {
        match self {
            ApiStep::Provider => "Provider",
            ApiStep::ApiKey => "API Key",
            ApiStep::Test => "Connection Test",
            ApiStep::Summary => "Summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TestState {
    Idle,
    Pending { request: u64, frames: u32 },
    Failed { category: ErrorCategory, detail: String },
}

/// The finished configuration handed to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiSetup {
    pub(crate) provider_id: String,
    pub(crate) secret: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiSetupWizard {
    pub(crate) step: ApiStep,
    pub(crate) providers: Vec<ProviderDescriptor>,
    pub(crate) provider: Choice,
    pub(crate) key_field: TextField,
    pub(crate) test: TestState,
    pub(crate) summary: Choice,
    next_request: u64,
    spinner_armed: bool,
}

impl ApiSetupWizard {
    /// `first_request` numbers this wizard's first connectivity attempt.
    /// Ids must not repeat across wizards, or a closed wizard's answer
    /// could be taken for this one's.
    pub(crate) fn new(providers: &[ProviderDescriptor], current: Option<&str>, first_request: u64) -> Self {
        let selected = current
            .and_then(|id| providers.iter().position(|p| p.id == id))
            .unwrap_or(0);

        Self {
            step: ApiStep::first(),
            providers: providers.to_vec(),
            provider: Choice::at(providers.len(), selected),
            key_field: TextField::masked(),
            test: TestState::Idle,
            summary: Choice::new(2),
            next_request: first_request,
            spinner_armed: false,
        }
    }

    pub(crate) fn selected_provider(&self) -> Option<&ProviderDescriptor> {
        self.providers.get(self.provider.selected())
    }

    fn validate_key(&mut self) -> bool {
        let count = self.key_field.value().trim().chars().count();
        let error = if count < KEY_MIN_CHARS {
            Some(format!("API key must be at least {KEY_MIN_CHARS} characters"))
        } else if count > KEY_MAX_CHARS {
            Some(format!("API key must be at most {KEY_MAX_CHARS} characters"))
        } else {
            None
        };

        let valid = error.is_none();
        self.key_field.error = error;
        valid
    }

    /// Starts a new connectivity attempt and returns the commands to run it.
    fn start_test(&mut self) -> Vec<AppCommand> {
        let Some(provider) = self.selected_provider() else {
            return vec![];
        };
        let provider_id = provider.id.to_string();

        let request = self.next_request;
        self.next_request += 1;
        self.test = TestState::Pending { request, frames: 0 };
        self.step = ApiStep::Test;

        tracing::info!(provider = %provider_id, request, "starting connection test");

        let mut commands = vec![AppCommand::TestConnection {
            request,
            provider_id,
            secret: self.key_field.value().trim().to_string(),
        }];
        commands.extend(self.arm_spinner());
        commands
    }

    fn arm_spinner(&mut self) -> Option<AppCommand> {
        if self.spinner_armed {
            return None;
        }
        self.spinner_armed = true;
        Some(AppCommand::schedule(TickKind::ConnectionSpinner))
    }

    /// Advances the waiting animation. Re-arms only while a test is pending.
    pub(crate) fn tick(mut self, kind: TickKind) -> (Self, Vec<AppCommand>) {
        if kind != TickKind::ConnectionSpinner {
            return (self, vec![]);
        }
        self.spinner_armed = false;

        if let TestState::Pending { frames, .. } = &mut self.test {
            *frames += 1;
            let command = self.arm_spinner();
            return (self, command.into_iter().collect());
        }
        (self, vec![])
    }

    /// Records the outcome of a connectivity attempt. Answers for anything
    /// other than the pending attempt are ignored.
    pub(crate) fn connection_tested(mut self, request: u64, result: Result<(), String>) -> Self {
        let pending = matches!(self.test, TestState::Pending { request: r, .. } if r == request);
        if !pending || self.step != ApiStep::Test {
            tracing::debug!(request, "ignoring stale connection test result");
            return self;
        }

        match result {
            Ok(()) => {
                self.test = TestState::Idle;
                self.summary = Choice::new(2);
                self.step = ApiStep::Summary;
            }
            Err(detail) => {
                let category = ErrorCategory::classify(&detail);
                tracing::warn!(?category, %detail, "connection test failed");
                self.test = TestState::Failed { category, detail };
            }
        }
        self
    }

    fn back_to(&mut self, step: ApiStep) {
        self.test = TestState::Idle;
        self.step = step;
    }

    fn result(&self) -> Option<ApiSetup> {
        Some(ApiSetup {
            provider_id: self.selected_provider()?.id.to_string(),
            secret: self.key_field.value().trim().to_string(),
        })
    }
}
