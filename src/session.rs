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

//! The root controller.
//!
//! A [`Session`] owns exactly one screen controller at a time. Every event
//! reaches the session first: force-quit and escape-from-game are handled
//! here, everything else is forwarded to the active screen, and completion
//! messages coming back decide which screen comes next.
//!
//! Timers armed by a screen carry the session epoch, which moves on every
//! screen change. A tick from an earlier epoch belongs to a screen that no
//! longer exists and is dropped.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    actions::{
        commands::AppCommand,
        events::{AppEvent, Tick},
    },
    components::{
        game::{GameMsg, GameScreen},
        menu::{MainAction, Menu, MenuMsg, SettingsAction, main_menu, settings_menu},
        theme_selector::{ThemeSelector, ThemeSelectorMsg},
        wizard::{ApiSetup, ApiSetupWizard, GameSetupWizard, WizardMsg},
    },
    config::{Settings, SettingsStore},
    model::{DebriefReport, GameConfig},
    provider::ProviderFactory,
    theme::ThemeRegistry,
};

pub(crate) const MIN_WIDTH: u16 = 80;
pub(crate) const MIN_HEIGHT: u16 = 24;

const CONTINUE_NOTICE: &str = "Saved stories cannot be resumed yet.";
const AUDIO_NOTICE: &str = "Audio settings are not available yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Loading,
    ApiSetup,
    MainMenu,
    Settings,
    ThemeSelector,
    GameSetup,
    Game,
}

/// The active screen controller.
#[derive(Debug, Clone)]
pub(crate) enum Screen {
    Loading,
    ApiSetup(ApiSetupWizard),
    MainMenu(Menu<MainAction>),
    Settings(Menu<SettingsAction>),
    ThemeSelector(ThemeSelector),
    GameSetup(GameSetupWizard),
    Game(GameScreen),
}

impl Screen {
    pub(crate) fn mode(&self) -> Mode {
        match self {
            Screen::Loading => Mode::Loading,
            Screen::ApiSetup(_) => Mode::ApiSetup,
            Screen::MainMenu(_) => Mode::MainMenu,
            Screen::Settings(_) => Mode::Settings,
            Screen::ThemeSelector(_) => Mode::ThemeSelector,
            Screen::GameSetup(_) => Mode::GameSetup,
            Screen::Game(_) => Mode::Game,
        }
    }
}

/// Collaborators the session calls out to.
pub(crate) struct Services {
    pub(crate) store: Box<dyn SettingsStore>,
    pub(crate) providers: Arc<dyn ProviderFactory>,
    pub(crate) themes: Arc<ThemeRegistry>,
}

#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) screen: Screen,
    pub(crate) prior_mode: Mode,
    pub(crate) width: u16,
    pub(crate) height: u16,
    /// Set once settings have been loaded after the first usable resize.
    pub(crate) ready: bool,
    pub(crate) settings: Settings,
    pub(crate) game_config: Option<GameConfig>,
    pub(crate) has_save_files: bool,
    epoch: u64,
    /// Next connection test id. Shared by every provider wizard so a closed
    /// wizard's late answer never matches a newer one.
    next_request: u64,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            screen: Screen::Loading,
            prior_mode: Mode::Loading,
            width: 0,
            height: 0,
            ready: false,
            settings: Settings::default(),
            game_config: None,
            has_save_files: false,
            epoch: 0,
            next_request: 1,
        }
    }

    pub(crate) fn mode(&self) -> Mode {
        self.screen.mode()
    }

    /// Whether the terminal is large enough to show anything but the size
    /// warning.
    pub(crate) fn fits(&self) -> bool {
        self.width >= MIN_WIDTH && self.height >= MIN_HEIGHT
    }

    /// Feeds one event through the session, returning the next session and
    /// the commands to carry out.
    pub(crate) fn update(self, event: AppEvent, services: &Services) -> (Self, Vec<AppCommand>) {
        let (mut session, commands) = match event {
            AppEvent::Key(key) => self.on_key(key, services),
            AppEvent::Resize(width, height) => self.on_resize(width, height, services),
            AppEvent::Tick(tick) => self.on_tick(tick),
            AppEvent::ConnectionTested { request, result } => {
                self.on_connection_tested(request, result)
            }
            AppEvent::RunEnded(report) => self.on_run_ended(*report),
            AppEvent::Error(message) => {
                tracing::warn!(%message, "background error");
                (self, vec![])
            }
        };

        let epoch = session.epoch;
        for command in &commands {
            if let AppCommand::TestConnection { request, .. } = command {
                session.next_request = session.next_request.max(request + 1);
            }
        }
        let commands = commands
            .into_iter()
            .map(|command| match command {
                AppCommand::ScheduleTick(tick) => AppCommand::ScheduleTick(Tick { epoch, ..tick }),
                other => other,
            })
            .collect();

        (session, commands)
    }

    /// Replaces the active screen, remembering where we came from.
    fn enter(&mut self, screen: Screen) {
        let from = self.mode();
        let to = screen.mode();
        tracing::info!(?from, ?to, "mode changed");

        self.prior_mode = from;
        self.screen = screen;
        self.epoch += 1;
    }

    /// Rebuilds the main menu from scratch, so selection and exit prompt
    /// start over.
    fn main_menu(&mut self, services: &Services) -> Menu<MainAction> {
        self.has_save_files = services.store.has_save_files(&self.settings);
        main_menu(self.has_save_files)
    }

    fn show_main_menu(&mut self, services: &Services) {
        let menu = self.main_menu(services);
        self.enter(Screen::MainMenu(menu));
    }

    fn show_main_menu_with_notice(&mut self, services: &Services, notice: String) {
        let menu = self.main_menu(services).with_notice(notice);
        self.enter(Screen::MainMenu(menu));
    }

    fn on_resize(mut self, width: u16, height: u16, services: &Services) -> (Self, Vec<AppCommand>) {
        self.width = width;
        self.height = height;

        if let Screen::Game(game) = &mut self.screen {
            game.set_terminal_height(height);
        }

        if !self.ready && self.fits() {
            self.ready = true;
            self.load_settings(services);
        } else if !self.fits() {
            tracing::debug!(width, height, "terminal below minimum size");
        }

        (self, vec![])
    }

    /// Loads settings and leaves the loading screen. A failed load is
    /// expected on first run and falls back to defaults.
    fn load_settings(&mut self, services: &Services) {
        self.settings = services.store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            Settings::default()
        });

        if let Err(e) = services.themes.set_current(&self.settings.theme_id) {
            tracing::warn!(error = %e, "stored theme not applied");
        }

        if services.store.is_configured(&self.settings) {
            self.show_main_menu(services);
        } else {
            tracing::info!("no story provider configured");
            let wizard = self.api_wizard(services);
            self.enter(Screen::ApiSetup(wizard));
        }
    }

    fn api_wizard(&self, services: &Services) -> ApiSetupWizard {
        ApiSetupWizard::new(
            services.providers.providers(),
            self.settings.provider_id.as_deref(),
            self.next_request,
        )
    }

    fn on_key(mut self, key: KeyEvent, services: &Services) -> (Self, Vec<AppCommand>) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            tracing::info!("force quit");
            return (self, vec![AppCommand::Quit]);
        }

        if !self.ready || !self.fits() {
            return (self, vec![]);
        }

        if key.code == KeyCode::Esc && self.mode() == Mode::Game {
            self.show_main_menu(services);
            return (self, vec![]);
        }

        tracing::trace!(?key, mode = ?self.mode(), "routing key");

        let screen = std::mem::replace(&mut self.screen, Screen::Loading);
        match screen {
            Screen::Loading => (self, vec![]),

            Screen::MainMenu(menu) => {
                let t = menu.update(key);
                self.screen = Screen::MainMenu(t.state);
                let mut commands = t.commands;
                match t.message {
                    Some(MenuMsg::Selected(action)) => self.main_action(action),
                    Some(MenuMsg::Quit) => commands.push(AppCommand::Quit),
                    Some(MenuMsg::Back) | None => {}
                }
                (self, commands)
            }

            Screen::Settings(menu) => {
                let t = menu.update(key);
                self.screen = Screen::Settings(t.state);
                let mut commands = t.commands;
                match t.message {
                    Some(MenuMsg::Selected(action)) => self.settings_action(action, services),
                    Some(MenuMsg::Back) => self.show_main_menu(services),
                    Some(MenuMsg::Quit) => commands.push(AppCommand::Quit),
                    None => {}
                }
                (self, commands)
            }

            Screen::ThemeSelector(selector) => {
                let t = selector.update(key);
                self.screen = Screen::ThemeSelector(t.state);
                match t.message {
                    Some(ThemeSelectorMsg::Applied(id)) => self.theme_applied(id, services),
                    Some(ThemeSelectorMsg::Cancelled) => self.enter(Screen::Settings(settings_menu())),
                    None => {}
                }
                (self, t.commands)
            }

            Screen::ApiSetup(wizard) => {
                let t = wizard.update(key);
                self.screen = Screen::ApiSetup(t.state);
                match t.message {
                    Some(WizardMsg::Done(setup)) => self.api_setup_done(setup, services),
                    Some(WizardMsg::Cancelled) => {
                        tracing::info!("provider setup cancelled");
                        self.leave_api_setup(services, None);
                    }
                    None => {}
                }
                (self, t.commands)
            }

            Screen::GameSetup(wizard) => {
                let t = wizard.update(key);
                self.screen = Screen::GameSetup(t.state);
                let mut commands = t.commands;
                match t.message {
                    Some(WizardMsg::Done(config)) => commands.extend(self.start_game(config)),
                    Some(WizardMsg::Cancelled) => {
                        self.game_config = None;
                        self.show_main_menu(services);
                    }
                    None => {}
                }
                (self, commands)
            }

            Screen::Game(game) => {
                let t = game.update(key);
                self.screen = Screen::Game(t.state);
                match t.message {
                    Some(GameMsg::NewGame) => self.enter(Screen::GameSetup(GameSetupWizard::new())),
                    Some(GameMsg::ReturnToMenu) => self.show_main_menu(services),
                    None => {}
                }
                (self, t.commands)
            }
        }
    }

    fn main_action(&mut self, action: MainAction) {
        match action {
            MainAction::NewGame => self.enter(Screen::GameSetup(GameSetupWizard::new())),
            MainAction::Continue => {
                tracing::info!("continue requested");
                self.set_main_notice(CONTINUE_NOTICE);
            }
            MainAction::Settings => self.enter(Screen::Settings(settings_menu())),
            // Exit is confirmed by the menu and arrives as a quit message
            MainAction::Exit => {}
        }
    }

    fn set_main_notice(&mut self, notice: &str) {
        if let Screen::MainMenu(menu) = &mut self.screen {
            menu.notice = Some(notice.to_string());
        }
    }

    fn settings_action(&mut self, action: SettingsAction, services: &Services) {
        match action {
            SettingsAction::Theme => {
                self.enter(Screen::ThemeSelector(ThemeSelector::new(Arc::clone(&services.themes))))
            }
            SettingsAction::ApiSetup => {
                let wizard = self.api_wizard(services);
                self.enter(Screen::ApiSetup(wizard));
            }
            SettingsAction::Audio => {
                tracing::info!("audio settings requested");
                if let Screen::Settings(menu) = &mut self.screen {
                    menu.notice = Some(AUDIO_NOTICE.to_string());
                }
            }
            SettingsAction::Back => self.show_main_menu(services),
        }
    }

    fn theme_applied(&mut self, id: String, services: &Services) {
        let name = services.themes.get(&id).map(|t| t.name).unwrap_or_default();
        tracing::info!(theme = %id, name, "theme applied");
        self.settings.theme_id = id;
        if let Err(e) = services.store.save(&self.settings) {
            tracing::warn!(error = %e, "failed to save theme choice");
        }
        self.enter(Screen::Settings(settings_menu()));
    }

    fn api_setup_done(&mut self, setup: ApiSetup, services: &Services) {
        let mut settings = self.settings.clone();
        let saved = services
            .store
            .encrypt_secret(&mut settings, &setup.provider_id, &setup.secret)
            .and_then(|_| services.store.save(&settings));

        match saved {
            Ok(()) => {
                tracing::info!(provider = %setup.provider_id, "provider configured");
                self.settings = settings;
                self.leave_api_setup(services, None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to store provider settings");
                self.leave_api_setup(services, Some(format!("Provider settings not saved: {e}")));
            }
        }
    }

    /// Returns to wherever the provider wizard was opened from.
    fn leave_api_setup(&mut self, services: &Services, notice: Option<String>) {
        if self.prior_mode == Mode::Settings {
            let menu = settings_menu();
            let menu = match notice {
                Some(notice) => menu.with_notice(notice),
                None => menu,
            };
            self.enter(Screen::Settings(menu));
        } else {
            match notice {
                Some(notice) => self.show_main_menu_with_notice(services, notice),
                None => self.show_main_menu(services),
            }
        }
    }

    fn start_game(&mut self, mut config: GameConfig) -> Vec<AppCommand> {
        config.freeze();
        tracing::info!(
            difficulty = ?config.difficulty(),
            length = ?config.length(),
            "starting game"
        );

        self.game_config = Some(config.clone());
        let (game, commands) = GameScreen::start(config, self.height);
        self.enter(Screen::Game(game));
        commands
    }

    fn on_tick(mut self, tick: Tick) -> (Self, Vec<AppCommand>) {
        if tick.epoch != self.epoch {
            tracing::trace!(kind = ?tick.kind, "dropping tick from an earlier screen");
            return (self, vec![]);
        }

        let screen = std::mem::replace(&mut self.screen, Screen::Loading);
        let (screen, commands) = match screen {
            Screen::ApiSetup(wizard) => {
                let (wizard, commands) = wizard.tick(tick.kind);
                (Screen::ApiSetup(wizard), commands)
            }
            Screen::Game(game) => {
                let (game, commands) = game.tick(tick.kind);
                (Screen::Game(game), commands)
            }
            other => (other, vec![]),
        };
        self.screen = screen;
        (self, commands)
    }

    fn on_connection_tested(mut self, request: u64, result: Result<(), String>) -> (Self, Vec<AppCommand>) {
        self.screen = match std::mem::replace(&mut self.screen, Screen::Loading) {
            Screen::ApiSetup(wizard) => Screen::ApiSetup(wizard.connection_tested(request, result)),
            other => {
                tracing::debug!(request, "connection result arrived after the wizard closed");
                other
            }
        };
        (self, vec![])
    }

    fn on_run_ended(mut self, report: DebriefReport) -> (Self, Vec<AppCommand>) {
        match std::mem::replace(&mut self.screen, Screen::Loading) {
            Screen::Game(game) => {
                let (game, commands) = game.run_ended(report);
                self.screen = Screen::Game(game);
                (self, commands)
            }
            other => {
                tracing::warn!(mode = ?other.mode(), "run ended outside the game screen");
                self.screen = other;
                (self, vec![])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::{
        actions::events::TickKind,
        components::{death::TRANSITION_FRAMES, game::GamePhase, wizard::api_setup::ApiStep},
        config::memory::MemoryStore,
        model::{DeathType, Difficulty, debrief::fixtures},
        provider::fake::FakeFactory,
    };

    fn services(store: MemoryStore) -> Services {
        Services {
            store: Box::new(store),
            providers: Arc::new(FakeFactory),
            themes: Arc::new(ThemeRegistry::new()),
        }
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn send(session: Session, services: &Services, event: AppEvent) -> (Session, Vec<AppCommand>) {
        session.update(event, services)
    }

    fn press(session: Session, services: &Services, code: KeyCode) -> Session {
        send(session, services, key(code)).0
    }

    fn type_text(mut session: Session, services: &Services, text: &str) -> Session {
        for c in text.chars() {
            session = press(session, services, KeyCode::Char(c));
        }
        session
    }

    fn ready(services: &Services) -> Session {
        send(Session::new(), services, AppEvent::Resize(100, 30)).0
    }

    fn ticks(commands: &[AppCommand]) -> Vec<Tick> {
        commands
            .iter()
            .filter_map(|c| match c {
                AppCommand::ScheduleTick(tick) => Some(*tick),
                _ => None,
            })
            .collect()
    }

    fn is_current(session: &Session, tick: &Tick) -> bool {
        tick.epoch == session.epoch
    }

    fn in_game(services: &Services) -> (Session, Vec<AppCommand>) {
        let session = press(ready(services), services, KeyCode::Char('1'));
        assert_eq!(session.mode(), Mode::GameSetup);
        let session = type_text(session, services, "abandoned hospital");
        let session = press(session, services, KeyCode::Enter);
        let session = press(session, services, KeyCode::Char('2'));
        let session = press(session, services, KeyCode::Char('1'));
        let session = press(session, services, KeyCode::Char('1'));
        send(session, services, key(KeyCode::Enter))
    }

    #[test]
    fn test_loading_waits_for_usable_size() {
        let services = services(MemoryStore::configured());
        let (session, _) = send(Session::new(), &services, AppEvent::Resize(60, 20));
        assert_eq!(session.mode(), Mode::Loading);
        assert!(!session.ready);

        // Keys do nothing while waiting
        let session = press(session, &services, KeyCode::Enter);
        assert_eq!(session.mode(), Mode::Loading);

        let (session, _) = send(session, &services, AppEvent::Resize(80, 24));
        assert!(session.ready);
        assert_eq!(session.mode(), Mode::MainMenu);
    }

    #[test]
    fn test_unconfigured_goes_to_provider_setup() {
        let services = services(MemoryStore::default());
        assert_eq!(ready(&services).mode(), Mode::ApiSetup);
    }

    #[test]
    fn test_load_failure_falls_back_to_defaults() {
        let services = services(MemoryStore {
            fail_load: true,
            ..MemoryStore::configured()
        });
        let session = ready(&services);
        assert_eq!(session.mode(), Mode::ApiSetup);
        assert_eq!(session.settings, Settings::default());
    }

    #[test]
    fn test_force_quit_works_everywhere() {
        let services = services(MemoryStore::configured());
        let ctrl_c = || AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        let (_, commands) = send(Session::new(), &services, ctrl_c());
        assert_eq!(commands, vec![AppCommand::Quit]);

        let (session, _) = in_game(&services);
        let (_, commands) = send(session, &services, ctrl_c());
        assert_eq!(commands, vec![AppCommand::Quit]);
    }

    #[test]
    fn test_keys_blocked_when_terminal_shrinks() {
        let services = services(MemoryStore::configured());
        let (session, _) = send(ready(&services), &services, AppEvent::Resize(79, 30));
        let before = match &session.screen {
            Screen::MainMenu(menu) => menu.selected(),
            _ => panic!("expected main menu"),
        };

        let session = press(session, &services, KeyCode::Down);
        let Screen::MainMenu(menu) = &session.screen else {
            panic!("expected main menu");
        };
        assert_eq!(menu.selected(), before);
    }

    #[test]
    fn test_exit_needs_confirmation() {
        let services = services(MemoryStore::configured());
        let (session, commands) = send(ready(&services), &services, key(KeyCode::Char('4')));
        assert!(commands.is_empty());

        let (session, commands) = send(session, &services, key(KeyCode::Char('n')));
        assert!(commands.is_empty());
        assert_eq!(session.mode(), Mode::MainMenu);

        let session = press(session, &services, KeyCode::Char('4'));
        let (_, commands) = send(session, &services, key(KeyCode::Char('y')));
        assert_eq!(commands, vec![AppCommand::Quit]);
    }

    #[test]
    fn test_continue_and_audio_are_acknowledged_only() {
        let services = services(MemoryStore {
            saves_present: true,
            ..MemoryStore::configured()
        });
        let session = press(ready(&services), &services, KeyCode::Char('2'));
        assert_eq!(session.mode(), Mode::MainMenu);
        let Screen::MainMenu(menu) = &session.screen else {
            panic!("expected main menu");
        };
        assert_eq!(menu.notice.as_deref(), Some(CONTINUE_NOTICE));

        let session = press(session, &services, KeyCode::Char('3'));
        let session = press(session, &services, KeyCode::Char('3'));
        assert_eq!(session.mode(), Mode::Settings);
        let Screen::Settings(menu) = &session.screen else {
            panic!("expected settings");
        };
        assert_eq!(menu.notice.as_deref(), Some(AUDIO_NOTICE));
    }

    #[test]
    fn test_game_setup_freezes_config_and_starts_game() {
        let services = services(MemoryStore::configured());
        let (session, commands) = in_game(&services);
        assert_eq!(session.mode(), Mode::Game);

        let config = session.game_config.as_ref().unwrap();
        assert!(config.is_frozen());
        assert_eq!(config.theme(), "abandoned hospital");
        assert_eq!(config.difficulty(), Difficulty::Hard);

        let ticks = ticks(&commands);
        assert_eq!(ticks.len(), 2);
        assert!(ticks.iter().all(|t| is_current(&session, t)));
    }

    #[test]
    fn test_game_setup_cancel_returns_to_menu() {
        let services = services(MemoryStore::configured());
        let session = press(ready(&services), &services, KeyCode::Char('1'));
        let session = press(session, &services, KeyCode::Esc);
        assert_eq!(session.mode(), Mode::MainMenu);
        assert!(session.game_config.is_none());
    }

    #[test]
    fn test_escape_in_game_rebuilds_menu_and_drops_stale_ticks() {
        let services = services(MemoryStore {
            saves_present: true,
            ..MemoryStore::configured()
        });
        let (session, commands) = in_game(&services);
        let stale = ticks(&commands)[0];

        let session = press(session, &services, KeyCode::Esc);
        assert_eq!(session.mode(), Mode::MainMenu);
        assert!(session.has_save_files);
        let Screen::MainMenu(menu) = &session.screen else {
            panic!("expected main menu");
        };
        assert_eq!(menu.selected(), 0);
        assert!(!menu.is_confirming_exit());

        let (_, commands) = send(session, &services, AppEvent::Tick(stale));
        assert!(commands.is_empty());
    }

    #[test]
    fn test_current_ticks_reach_the_game() {
        let services = services(MemoryStore::configured());
        let (session, commands) = in_game(&services);
        let elapsed = ticks(&commands)
            .into_iter()
            .find(|t| t.kind == TickKind::Elapsed)
            .unwrap();

        let (session, commands) = send(session, &services, AppEvent::Tick(elapsed));
        assert_eq!(ticks(&commands), vec![elapsed]);
        let Screen::Game(game) = &session.screen else {
            panic!("expected game");
        };
        assert!(matches!(game.phase, GamePhase::Playing(play) if play.elapsed_secs == 1));
    }

    #[test]
    fn test_run_end_plays_death_then_debrief() {
        let services = services(MemoryStore::configured());
        let (session, _) = in_game(&services);
        let report = fixtures::report(Difficulty::Hard, DeathType::RuleViolation, 1);
        let (mut session, mut commands) = send(session, &services, AppEvent::RunEnded(Box::new(report)));

        for _ in 0..TRANSITION_FRAMES {
            let tick = ticks(&commands)[0];
            assert_eq!(tick.kind, TickKind::DeathFrame);
            (session, commands) = send(session, &services, AppEvent::Tick(tick));
        }
        assert!(commands.is_empty());

        let session = press(session, &services, KeyCode::Enter);
        let Screen::Game(game) = &session.screen else {
            panic!("expected game");
        };
        assert!(matches!(game.phase, GamePhase::Debrief(_)));

        // Options, then the last entry
        let session = press(session, &services, KeyCode::BackTab);
        let session = press(session, &services, KeyCode::Down);
        let session = press(session, &services, KeyCode::Down);
        let session = press(session, &services, KeyCode::Enter);
        assert_eq!(session.mode(), Mode::MainMenu);
    }

    #[test]
    fn test_run_end_outside_game_is_ignored() {
        let services = services(MemoryStore::configured());
        let report = fixtures::report(Difficulty::Easy, DeathType::Exhaustion, 0);
        let (session, commands) = send(ready(&services), &services, AppEvent::RunEnded(Box::new(report)));
        assert!(commands.is_empty());
        assert_eq!(session.mode(), Mode::MainMenu);
    }

    #[test]
    fn test_theme_choice_is_applied_and_saved() {
        let services = services(MemoryStore::configured());
        let session = press(ready(&services), &services, KeyCode::Char('3'));
        let session = press(session, &services, KeyCode::Char('1'));
        assert_eq!(session.mode(), Mode::ThemeSelector);

        let session = press(session, &services, KeyCode::Char('2'));
        assert_eq!(session.mode(), Mode::Settings);
        assert_eq!(session.settings.theme_id, "crimson");
        assert!(services.themes.is_current("crimson"));
        assert_eq!(services.store.load().unwrap().theme_id, "crimson");
    }

    #[test]
    fn test_theme_selector_cancel_returns_to_settings() {
        let services = services(MemoryStore::configured());
        let session = press(ready(&services), &services, KeyCode::Char('3'));
        let session = press(session, &services, KeyCode::Char('1'));
        let session = press(session, &services, KeyCode::Esc);
        assert_eq!(session.mode(), Mode::Settings);
        assert!(services.themes.is_current("midnight"));
    }

    #[test]
    fn test_provider_setup_from_settings_saves_and_returns() {
        let services = services(MemoryStore::configured());
        let session = press(ready(&services), &services, KeyCode::Char('3'));
        let session = press(session, &services, KeyCode::Char('2'));
        assert_eq!(session.mode(), Mode::ApiSetup);

        let session = press(session, &services, KeyCode::Enter);
        let session = type_text(session, &services, "sk-12345678");
        let (session, commands) = send(session, &services, key(KeyCode::Enter));
        let request = commands
            .iter()
            .find_map(|c| match c {
                AppCommand::TestConnection { request, .. } => Some(*request),
                _ => None,
            })
            .unwrap();

        let (session, _) = send(
            session,
            &services,
            AppEvent::ConnectionTested { request, result: Ok(()) },
        );
        let Screen::ApiSetup(wizard) = &session.screen else {
            panic!("expected provider setup");
        };
        assert_eq!(wizard.step, ApiStep::Summary);

        let session = press(session, &services, KeyCode::Enter);
        assert_eq!(session.mode(), Mode::Settings);

        let stored = services.store.load().unwrap();
        assert_eq!(stored.provider_id.as_deref(), Some("openai"));
        assert_eq!(stored.encrypted_secret.as_deref(), Some("sealed:11"));
    }

    #[test]
    fn test_first_run_provider_setup_cancel_goes_to_menu() {
        let services = services(MemoryStore::default());
        let session = press(ready(&services), &services, KeyCode::Esc);
        assert_eq!(session.mode(), Mode::MainMenu);
    }

    #[test]
    fn test_late_connection_result_is_ignored() {
        let services = services(MemoryStore::configured());
        let session = press(ready(&services), &services, KeyCode::Char('3'));
        let session = press(session, &services, KeyCode::Char('2'));
        let session = press(session, &services, KeyCode::Enter);
        let session = type_text(session, &services, "sk-12345678");
        let session = press(session, &services, KeyCode::Enter);

        // Back to the key step, then out of the wizard
        let session = press(session, &services, KeyCode::Esc);
        let session = press(session, &services, KeyCode::Esc);
        let session = press(session, &services, KeyCode::Esc);
        assert_eq!(session.mode(), Mode::Settings);

        let (session, commands) = send(
            session,
            &services,
            AppEvent::ConnectionTested { request: 1, result: Ok(()) },
        );
        assert!(commands.is_empty());
        assert_eq!(session.mode(), Mode::Settings);
    }

    fn test_request(commands: &[AppCommand]) -> Option<u64> {
        commands.iter().find_map(|c| match c {
            AppCommand::TestConnection { request, .. } => Some(*request),
            _ => None,
        })
    }

    #[test]
    fn test_reopened_wizard_ignores_result_for_closed_one() {
        let services = services(MemoryStore::configured());
        let session = press(ready(&services), &services, KeyCode::Char('3'));
        let session = press(session, &services, KeyCode::Char('2'));
        let session = press(session, &services, KeyCode::Enter);
        let session = type_text(session, &services, "sk-first-key");
        let (session, commands) = send(session, &services, key(KeyCode::Enter));
        let first = test_request(&commands).unwrap();

        let session = press(session, &services, KeyCode::Esc);
        let session = press(session, &services, KeyCode::Esc);
        let session = press(session, &services, KeyCode::Esc);
        assert_eq!(session.mode(), Mode::Settings);

        let session = press(session, &services, KeyCode::Char('2'));
        assert_eq!(session.mode(), Mode::ApiSetup);
        let session = press(session, &services, KeyCode::Enter);
        let session = type_text(session, &services, "sk-second-key");
        let (session, commands) = send(session, &services, key(KeyCode::Enter));
        let second = test_request(&commands).unwrap();
        assert_ne!(first, second);

        let (session, _) = send(
            session,
            &services,
            AppEvent::ConnectionTested { request: first, result: Ok(()) },
        );
        let Screen::ApiSetup(wizard) = &session.screen else {
            panic!("expected provider setup");
        };
        assert_eq!(wizard.step, ApiStep::Test);

        let (session, _) = send(
            session,
            &services,
            AppEvent::ConnectionTested { request: second, result: Ok(()) },
        );
        let Screen::ApiSetup(wizard) = &session.screen else {
            panic!("expected provider setup");
        };
        assert_eq!(wizard.step, ApiStep::Summary);
    }
}
