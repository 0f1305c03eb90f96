//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Fetches run as spawned tasks against the shared `ApiClient` and send
//!   their results back tagged with screen + generation; the owning component
//!   decides whether the response is still current.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use grimoire_api::client::ApiClient;
use grimoire_api::model::{EntityId, NEUTRAL};

use crate::{
    action::{Action, ComponentId, DetailRequest, Screen},
    anim::ANIM_TICK_MS,
    app_state::AppState,
    browser::EntityBrowser,
    catalog::{
        BlacksmithCatalog, BuildingsCatalog, CardsCatalog, CreepsCatalog, HeroesCatalog,
        NeutralShopCatalog, ShopCatalog, TavernCatalog, UnitsCatalog,
    },
    component::Component,
    components::{
        help_overlay::HelpOverlay, menu::Menu, race_overview::RaceOverview,
        race_select::RaceSelect, rules::Rules,
    },
    fetch::{CollectionPayload, DetailPayload},
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    CollectionLoaded {
        screen: Screen,
        generation: u64,
        result: Result<CollectionPayload, String>,
    },
    DetailLoaded {
        screen: Screen,
        id: EntityId,
        generation: u64,
        result: Result<DetailPayload, String>,
    },
}

/// Route `$body` to the component owning `$screen`. Expands to direct field
/// access so disjoint borrows of `self.state` stay legal inside `$body`.
macro_rules! route_screen {
    ($self:ident, $screen:expr, $comp:ident => $body:expr) => {
        match $screen {
            Screen::Races => {
                let $comp = &mut $self.races;
                $body
            }
            Screen::Lobby => {
                let $comp = &mut $self.lobby;
                $body
            }
            Screen::Heroes => {
                let $comp = &mut $self.heroes;
                $body
            }
            Screen::Tavern => {
                let $comp = &mut $self.tavern;
                $body
            }
            Screen::Units => {
                let $comp = &mut $self.units;
                $body
            }
            Screen::Shop => {
                let $comp = &mut $self.shop;
                $body
            }
            Screen::NeutralShop => {
                let $comp = &mut $self.neutral_shop;
                $body
            }
            Screen::Blacksmith => {
                let $comp = &mut $self.blacksmith;
                $body
            }
            Screen::Cards => {
                let $comp = &mut $self.cards;
                $body
            }
            Screen::Buildings => {
                let $comp = &mut $self.buildings;
                $body
            }
            Screen::Creeps => {
                let $comp = &mut $self.creeps;
                $body
            }
            Screen::Rules => {
                let $comp = &mut $self.rules;
                $body
            }
        }
    };
}

pub struct App {
    state: AppState,
    client: ApiClient,

    races: RaceSelect,
    lobby: RaceOverview,
    heroes: EntityBrowser<HeroesCatalog>,
    tavern: EntityBrowser<TavernCatalog>,
    units: EntityBrowser<UnitsCatalog>,
    shop: EntityBrowser<ShopCatalog>,
    neutral_shop: EntityBrowser<NeutralShopCatalog>,
    blacksmith: EntityBrowser<BlacksmithCatalog>,
    cards: EntityBrowser<CardsCatalog>,
    buildings: EntityBrowser<BuildingsCatalog>,
    creeps: EntityBrowser<CreepsCatalog>,
    rules: Rules,

    menu: Menu,
    help: HelpOverlay,
    toast: ToastManager,

    tx: Option<mpsc::Sender<AppMessage>>,
    main_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(config: &grimoire_api::config::Config) -> Self {
        let client = ApiClient::new(config.api.base_url.clone());
        let state = AppState::new(client.base_url().to_string());
        Self {
            state,
            client,
            races: RaceSelect::new(),
            lobby: RaceOverview::new(),
            heroes: EntityBrowser::new(ComponentId::Heroes),
            tavern: EntityBrowser::new(ComponentId::Tavern),
            units: EntityBrowser::new(ComponentId::Units),
            shop: EntityBrowser::new(ComponentId::Shop),
            neutral_shop: EntityBrowser::new(ComponentId::NeutralShop),
            blacksmith: EntityBrowser::new(ComponentId::Blacksmith),
            cards: EntityBrowser::new(ComponentId::Cards),
            buildings: EntityBrowser::new(ComponentId::Buildings),
            creeps: EntityBrowser::new(ComponentId::Creeps),
            rules: Rules::new(),
            menu: Menu::new(),
            help: HelpOverlay::new(),
            toast: ToastManager::new(),
            tx: None,
            main_area: Rect::default(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.tx = Some(tx.clone());

        self.push_log("grimoire started".to_string());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // Populate the initial screen (races).
        for action in self.mount_screen(self.state.screen) {
            self.dispatch(action);
        }

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut anim_tick = tokio::time::interval(Duration::from_millis(ANIM_TICK_MS as u64));
        anim_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }

                _ = ui_tick.tick() => {
                    self.toast.tick();
                    needs_redraw = true;
                }

                _ = anim_tick.tick() => {
                    let actions = self.tick_screen();
                    for action in actions {
                        self.dispatch(action);
                    }
                    needs_redraw = self.screen_is_animating();
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Screen routing ────────────────────────────────────────────────────────

    fn mount_screen(&mut self, screen: Screen) -> Vec<Action> {
        route_screen!(self, screen, comp => comp.mount(&self.state))
    }

    fn unmount_screen(&mut self, screen: Screen) {
        route_screen!(self, screen, comp => comp.unmount())
    }

    fn key_to_screen(&mut self, key: KeyEvent) -> Vec<Action> {
        route_screen!(self, self.state.screen, comp => comp.handle_key(key, &self.state))
    }

    fn mouse_to_screen(&mut self, event: MouseEvent) -> Vec<Action> {
        let area = self.main_area;
        route_screen!(self, self.state.screen, comp => comp.handle_mouse(event, area, &self.state))
    }

    fn tick_screen(&mut self) -> Vec<Action> {
        route_screen!(self, self.state.screen, comp => comp.tick(ANIM_TICK_MS, &self.state))
    }

    fn screen_is_animating(&mut self) -> bool {
        route_screen!(self, self.state.screen, comp => comp.is_animating())
    }

    fn collection_to_screen(
        &mut self,
        screen: Screen,
        generation: u64,
        result: Result<CollectionPayload, String>,
    ) {
        if let Err(message) = &result {
            warn!("collection fetch for {screen:?} failed: {message}");
            self.state.logs.push(format!("{}: {message}", screen.title()));
        }
        route_screen!(self, screen, comp => comp.on_collection(generation, result))
    }

    fn detail_to_screen(
        &mut self,
        screen: Screen,
        id: EntityId,
        generation: u64,
        result: Result<DetailPayload, String>,
    ) {
        route_screen!(self, screen, comp => comp.on_detail(id, generation, result))
    }

    // ── Event handling ────────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let actions = self.handle_key(key);
                    for action in actions {
                        self.dispatch(action);
                    }
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    for action in actions {
                        self.dispatch(action);
                    }
                }
                _ => {}
            },
            AppMessage::CollectionLoaded {
                screen,
                generation,
                result,
            } => self.collection_to_screen(screen, generation, result),
            AppMessage::DetailLoaded {
                screen,
                id,
                generation,
                result,
            } => self.detail_to_screen(screen, id, generation, result),
        }
        true
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }
        if self.help.visible {
            return self.help.handle_key(key, &self.state);
        }
        if self.menu.visible {
            return self.menu.handle_key(key, &self.state);
        }
        if self.state.input_mode == InputMode::Filter {
            return self.key_to_screen(key);
        }
        match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Char('m') => vec![Action::ToggleMenu],
            KeyCode::Char('?') => vec![Action::ToggleHelp],
            KeyCode::Tab => vec![Action::SwitchScreen(self.state.screen.next())],
            KeyCode::BackTab => vec![Action::SwitchScreen(self.state.screen.prev())],
            KeyCode::Char(c @ ('0'..='9')) => match Screen::from_digit(c) {
                Some(screen) => vec![Action::SwitchScreen(screen)],
                None => self.key_to_screen(key),
            },
            _ => self.key_to_screen(key),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.help.visible || self.menu.visible {
            return Vec::new();
        }
        self.mouse_to_screen(event)
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleMenu => {
                if self.menu.visible {
                    self.menu.toggle();
                } else {
                    self.menu.open_at(self.state.screen);
                }
            }
            Action::ToggleHelp => self.help.toggle(),
            Action::OpenFilter => self.state.input_mode = InputMode::Filter,
            Action::CloseFilter => self.state.input_mode = InputMode::Normal,
            Action::SwitchScreen(screen) => self.switch_screen(screen),
            Action::ChooseFaction(name) => {
                info!("race chosen: {name}");
                self.state.logs.push(format!("rasa: {name}"));
                self.toast.success(format!("rasa: {name}"));
                self.state.faction = name;
                self.switch_screen(Screen::Lobby);
            }
            Action::FetchCollection { screen, generation } => {
                self.start_collection_fetch(screen, generation);
            }
            Action::FetchDetail {
                screen,
                id,
                request,
                generation,
            } => self.start_detail_fetch(screen, id, request, generation),
            Action::CopyToClipboard(text) => self.copy_to_clipboard(text),
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.unmount_screen(self.state.screen);
        self.state.screen = screen;
        self.state.input_mode = InputMode::Normal;
        let actions = self.mount_screen(screen);
        for action in actions {
            self.dispatch(action);
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => self.toast.success("copied to clipboard"),
            Err(e) => {
                warn!("clipboard error: {e}");
                self.toast.error("clipboard unavailable");
            }
        }
    }

    // ── Fetch tasks ───────────────────────────────────────────────────────────

    fn start_collection_fetch(&self, screen: Screen, generation: u64) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let client = self.client.clone();
        let faction = self.state.faction.clone();
        tokio::spawn(async move {
            let result = match screen {
                Screen::Races => client.races().await.map(CollectionPayload::Races),
                Screen::Lobby => client
                    .race(&faction)
                    .await
                    .map(|race| CollectionPayload::Race(Box::new(race))),
                Screen::Heroes => client.heroes(&faction).await.map(CollectionPayload::Heroes),
                Screen::Tavern => client.heroes(NEUTRAL).await.map(CollectionPayload::Heroes),
                Screen::Units => client.units(&faction).await.map(CollectionPayload::Units),
                Screen::Shop => client.items(&faction).await.map(CollectionPayload::Items),
                Screen::NeutralShop => client.items(NEUTRAL).await.map(CollectionPayload::Items),
                Screen::Blacksmith => client
                    .upgrades(&faction)
                    .await
                    .map(CollectionPayload::Upgrades),
                Screen::Cards => client.cards(&faction).await.map(CollectionPayload::Cards),
                Screen::Buildings => client
                    .buildings(&faction)
                    .await
                    .map(CollectionPayload::Buildings),
                Screen::Creeps => client.creeps().await.map(CollectionPayload::Creeps),
                // Rules is static — nothing to fetch.
                Screen::Rules => return,
            }
            .map_err(|e| e.to_string());

            let _ = tx
                .send(AppMessage::CollectionLoaded {
                    screen,
                    generation,
                    result,
                })
                .await;
        });
    }

    fn start_detail_fetch(
        &self,
        screen: Screen,
        id: EntityId,
        request: DetailRequest,
        generation: u64,
    ) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = match request {
                DetailRequest::Hero(id) => client
                    .hero(id)
                    .await
                    .map(|hero| DetailPayload::Abilities(hero.ability)),
                DetailRequest::Unit(id) => client
                    .unit(id)
                    .await
                    .map(|unit| DetailPayload::Abilities(unit.ability)),
                DetailRequest::Building(id) => client
                    .building(id)
                    .await
                    .map(|building| DetailPayload::Units(building.unit)),
                DetailRequest::Creep(id) => client
                    .creep(id)
                    .await
                    .map(|creep| DetailPayload::Creep(Box::new(creep))),
            }
            .map_err(|e| e.to_string());

            let _ = tx
                .send(AppMessage::DetailLoaded {
                    screen,
                    id,
                    generation,
                    result,
                })
                .await;
        });
    }

    fn push_log(&mut self, message: String) {
        info!("{message}");
        self.state.logs.push(message);
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);
        self.main_area = chunks[0];

        route_screen!(self, self.state.screen, comp => comp.draw(frame, chunks[0], &self.state));

        status_bar::draw_keys_bar(frame, chunks[1], self.state.input_mode, self.state.screen);
        status_bar::draw_log_bar(
            frame,
            chunks[2],
            self.state.last_log(),
            &self.state.faction,
        );

        if self.menu.visible {
            self.menu.draw(frame, area, &self.state);
        }
        if self.help.visible {
            self.help.draw(frame, area, &self.state);
        }
        self.toast.draw(frame, area);
    }
}
