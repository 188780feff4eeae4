//! The play session: owner of the one mutable cell in the game.
//!
//! RULES:
//!   - The session holds exactly one (GameState, Market) pair.
//!   - The pair is only ever replaced wholesale with the output of a
//!     completed action, day transition, or load.
//!   - Every submitted command is recorded in the event log, accepted or not.
//!   - After game over every further command is rejected.

use crate::{
    actions::{self, Step},
    command::PlayerCommand,
    config::SimConfig,
    engine::{self, DayAdvance},
    error::{ActionError, GameOver, SimError, SimResult},
    event::{EventLogEntry, GameEvent, Notice},
    farm::UpgradeTrack,
    market::Market,
    produce::Produce,
    snapshot::GameSnapshot,
    state::GameState,
    store::SaveStore,
    types::SessionId,
    upgrade::{self, UpgradeQuote},
};

/// What a submitted command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied {
        event:   GameEvent,
        notices: Vec<Notice>,
    },
    Rejected(ActionError),
    GameOver(GameOver),
}

pub struct Session {
    pub session_id: SessionId,
    seed:           u64,
    config:         SimConfig,
    state:          GameState,
    market:         Market,
    game_over:      Option<GameOver>,
    store:          SaveStore,
}

impl Session {
    pub fn new(session_id: SessionId, seed: u64, config: SimConfig, store: SaveStore) -> SimResult<Self> {
        let state = GameState::new_game(&config).map_err(SimError::Other)?;
        let market = Market::new(
            config.market.initial_prices.iter().map(|(&p, &price)| (p, price)),
            seed,
        )
        .with_max_drift_pct(config.market.max_drift_pct);

        let session = Self {
            session_id,
            seed,
            config,
            state,
            market,
            game_over: None,
            store,
        };
        session.record(&GameEvent::GameStarted {
            session_id: session.session_id.clone(),
            seed,
        })?;
        log::info!("day=1 session: started {} with seed {seed}", session.session_id);
        Ok(session)
    }

    /// Start a session under a fresh random id.
    pub fn start(seed: u64, config: SimConfig, store: SaveStore) -> SimResult<Self> {
        Self::new(uuid::Uuid::new_v4().to_string(), seed, config, store)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn market_delta(&self, produce: Produce) -> Option<i64> {
        self.market.delta(produce)
    }

    pub fn next_upgrade_cost(&self, track: UpgradeTrack) -> Option<UpgradeQuote> {
        upgrade::next_cost(&self.config.upgrades, &self.state.farm, track)
    }

    /// Run one command against the current pair.
    ///
    /// Errors are reserved for the event log write failing; a refused
    /// command comes back as `CommandOutcome::Rejected`.
    pub fn submit(&mut self, command: PlayerCommand) -> SimResult<CommandOutcome> {
        let day = self.state.day;

        if let Some(over) = &self.game_over {
            let err = ActionError::SessionEnded { day: over.day };
            return self.reject(&command, err);
        }

        let result = match &command {
            PlayerCommand::Plant { tile, produce } => actions::plant(&self.state, *tile, *produce),
            PlayerCommand::Harvest { tile } => actions::harvest(&self.state, *tile),
            PlayerCommand::Assign { family, produce, quantity } => actions::assign(
                &self.state,
                *family,
                *produce,
                *quantity,
                self.config.delivery_accounting,
            ),
            PlayerCommand::Sell { produce, quantity } => {
                actions::sell(&self.state, &self.market, *produce, *quantity)
            }
            PlayerCommand::BuyUpgrade { track } => {
                actions::buy_upgrade(&self.config.upgrades, &self.state, *track)
            }
            PlayerCommand::EndDay => return self.end_day(),
        };

        match result {
            Ok(Step { state, event }) => {
                self.record(&event)?;
                log::info!("day={day} session: {} applied: {event:?}", command.name());
                self.install(state, None);
                Ok(Self::applied(event))
            }
            Err(err) => self.reject(&command, err),
        }
    }

    fn end_day(&mut self) -> SimResult<CommandOutcome> {
        let day = self.state.day;
        match engine::end_day(&self.state, &self.market) {
            Ok(DayAdvance { state, market }) => {
                let event = GameEvent::DayEnded {
                    day,
                    next_day: state.day,
                    prices:   market.prices().clone(),
                };
                self.record(&event)?;
                log::info!("day={day} session: day ended, now day {}", state.day);
                self.install(state, Some(market));
                Ok(Self::applied(event))
            }
            Err(over) => {
                self.record(&GameEvent::GameEnded {
                    day,
                    family: over.family.clone(),
                    reason: over.reason.clone(),
                })?;
                log::info!("day={day} session: game over: {}", over.reason);
                self.game_over = Some(over.clone());
                Ok(CommandOutcome::GameOver(over))
            }
        }
    }

    fn reject(&self, command: &PlayerCommand, err: ActionError) -> SimResult<CommandOutcome> {
        let day = self.state.day;
        log::warn!("day={day} session: {} rejected: {err}", command.name());
        self.record(&GameEvent::CommandRejected {
            day,
            command: command.name().to_string(),
            reason:  err.to_string(),
        })?;
        Ok(CommandOutcome::Rejected(err))
    }

    fn applied(event: GameEvent) -> CommandOutcome {
        let notices = event.notices().to_vec();
        CommandOutcome::Applied { event, notices }
    }

    fn install(&mut self, state: GameState, market: Option<Market>) {
        if cfg!(debug_assertions) {
            for violation in state.check_invariants() {
                log::warn!("day={} session: invariant violated: {violation}", state.day);
            }
        }
        self.state = state;
        if let Some(market) = market {
            self.market = market;
        }
    }

    fn record(&self, event: &GameEvent) -> SimResult<()> {
        let entry = EventLogEntry {
            id:         None,
            session_id: self.session_id.clone(),
            day:        event.day(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.store.append_event(&entry)
    }

    // ── Persistence ────────────────────────────────────────────

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, &self.market)
    }

    /// Replace the current pair with one rebuilt from `snapshot`. On any
    /// error the current pair is left as it was.
    pub fn restore_snapshot(&mut self, snapshot: &GameSnapshot) -> SimResult<()> {
        self.restore_from(snapshot, None)
    }

    pub fn save(&self, slot: &str) -> SimResult<()> {
        let json = self.snapshot().to_json()?;
        self.store.save_snapshot(slot, &self.session_id, self.state.day, &json)?;
        log::info!("day={} session: saved to slot '{slot}'", self.state.day);
        Ok(())
    }

    pub fn load(&mut self, slot: &str) -> SimResult<()> {
        let json = self
            .store
            .load_snapshot(slot)?
            .ok_or_else(|| SimError::SlotNotFound { slot: slot.to_string() })?;
        let snapshot = GameSnapshot::from_json(&json)?;
        self.restore_from(&snapshot, Some(slot))
    }

    fn restore_from(&mut self, snapshot: &GameSnapshot, slot: Option<&str>) -> SimResult<()> {
        let (state, market) = snapshot.restore(self.seed, self.config.market.max_drift_pct)?;
        self.record(&GameEvent::GameLoaded {
            day:  state.day,
            slot: slot.map(str::to_string),
        })?;
        log::info!("day={} session: loaded snapshot", state.day);
        self.game_over = None;
        self.install(state, Some(market));
        Ok(())
    }
}
