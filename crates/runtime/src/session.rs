//! Run session - the composition root of one run.
//!
//! A [`RunSession`] owns the validated content tables, the player's stat
//! state, the upgrade ledger and the player ship's shield/durability model.
//! It wires them together explicitly: selections apply stat deltas, stat
//! changes are pushed into the ship model, and every notification is
//! republished on the [`EventBus`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use starfall_content::{Content, ContentFactory};
use starfall_core::{
    CatalogOffers, DamageOutcome, DurabilityEvent, DurabilityProfile, DurabilityShieldModel,
    GameConfig, GameError, ListenerId, OfferMode, OfferSource, Selection, StatChange, StatField,
    StatOffers, StatRegistry, StatState, UpgradeCatalog, UpgradeDefinition, UpgradeKey,
    UpgradeLedger, UpgradeOption,
};

use crate::api::{Result, RuntimeError, SharedSession};
use crate::events::{EconomyEvent, Event, EventBus};
use crate::rng::SessionRng;

/// Session configuration: rules plus the RNG seed.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub game: GameConfig,
    /// Fixed seed for reproducible offers. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new(game: GameConfig) -> Self {
        Self { game, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One run of the game for a single player ship.
#[derive(Debug)]
pub struct RunSession {
    config: GameConfig,
    registry: StatRegistry,
    catalog: UpgradeCatalog,
    stats: StatState,
    ledger: UpgradeLedger,
    ship: DurabilityShieldModel,
    rng: SessionRng,
    bus: EventBus,
    /// Ship notifications waiting to be republished on the bus.
    combat_events: Arc<Mutex<Vec<DurabilityEvent>>>,
}

impl RunSession {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    // ========================================================================
    // Economy
    // ========================================================================

    /// Credit upgrade points and open (or refresh) the offer.
    pub fn credit_points(&mut self, amount: i64) -> Result<&[UpgradeOption]> {
        {
            let source = offer_source(self.config.offer_mode, &self.registry, &self.catalog);
            self.ledger
                .credit_points(amount, source.as_ref(), &self.stats, &mut self.rng)?;
        }

        let balance = self.ledger.balance();
        let options = self.ledger.current_options();
        tracing::debug!(amount, balance, offered = options.len(), "credited upgrade points");
        if options.is_empty() {
            tracing::warn!(balance, "no upgrade left to offer");
        }

        self.bus.publish(Event::Economy(EconomyEvent::PointsCredited {
            amount: u32::try_from(amount).unwrap_or(u32::MAX),
            balance,
        }));
        self.bus.publish(Event::Economy(EconomyEvent::OfferOpened {
            options: options.to_vec(),
        }));
        Ok(self.ledger.current_options())
    }

    /// Buy the option at `index` of the open offer.
    ///
    /// A rejected selection leaves the session unchanged and is reported
    /// both as the error and as [`EconomyEvent::SelectionRejected`].
    pub fn select(&mut self, index: usize) -> Result<Selection> {
        let result = {
            let source = offer_source(self.config.offer_mode, &self.registry, &self.catalog);
            self.ledger
                .try_select(index, source.as_ref(), &mut self.stats, &mut self.rng)
        };

        let selection = match result {
            Ok(selection) => selection,
            Err(err) => {
                tracing::warn!(
                    index,
                    code = err.error_code(),
                    "upgrade selection rejected: {}",
                    err
                );
                self.bus.publish(Event::Economy(EconomyEvent::SelectionRejected {
                    index,
                    reason: err.to_string(),
                }));
                return Err(err.into());
            }
        };

        for change in &selection.changes {
            self.ship.apply_stat_change(change);
            self.bus.publish(Event::Stats(*change));
        }
        self.flush_combat_events();

        tracing::debug!(
            key = %selection.key,
            level = selection.level,
            balance = selection.balance,
            "upgrade selected"
        );
        self.bus.publish(Event::Economy(EconomyEvent::UpgradeSelected {
            key: selection.key.clone(),
            level: selection.level,
            balance: selection.balance,
        }));
        let follow_up = if selection.closed {
            EconomyEvent::OfferClosed
        } else {
            EconomyEvent::OfferOpened {
                options: self.ledger.current_options().to_vec(),
            }
        };
        self.bus.publish(Event::Economy(follow_up));

        Ok(selection)
    }

    pub fn balance(&self) -> u32 {
        self.ledger.balance()
    }

    pub fn current_options(&self) -> &[UpgradeOption] {
        self.ledger.current_options()
    }

    pub fn upgrade_level(&self, key: &UpgradeKey) -> u32 {
        self.ledger.level(key)
    }

    // ========================================================================
    // Ship
    // ========================================================================

    /// Damage the player ship at simulation time `now`.
    pub fn apply_damage(&mut self, amount: f32, now: f32) -> Result<DamageOutcome> {
        let outcome = self.ship.apply_damage(amount, now);
        self.flush_combat_events();

        let outcome = outcome?;
        if outcome.is_lethal() {
            tracing::info!(now, "player ship destroyed");
        }
        Ok(outcome)
    }

    /// Advance shield and durability regeneration.
    pub fn tick(&mut self, dt: f32, now: f32) {
        tracing::trace!(dt, now, "tick");
        self.ship.tick(dt, now);
        self.flush_combat_events();
    }

    /// Kill the ship without damage. Returns false if it was already dead.
    pub fn kill(&mut self, rewarded: bool) -> bool {
        let killed = self.ship.kill(rewarded);
        self.flush_combat_events();
        killed
    }

    pub fn restore_full(&mut self) {
        self.ship.restore_full();
        self.flush_combat_events();
    }

    pub fn is_dead(&self) -> bool {
        self.ship.is_dead()
    }

    fn flush_combat_events(&mut self) {
        let pending = std::mem::take(
            &mut *self
                .combat_events
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for event in pending {
            self.bus.publish(Event::Combat(event));
        }
    }

    // ========================================================================
    // Stat lookups (sentinel on misconfiguration)
    // ========================================================================

    /// Effective value of a stat; 0 if the field is not registered.
    pub fn stat_value(&self, field: StatField) -> f32 {
        if self.registry.contains(field) {
            self.stats.effective_value(field)
        } else {
            tracing::warn!(%field, "stat is not registered, using 0");
            0.0
        }
    }

    /// Effective value rendered for display; empty if the field is not
    /// registered.
    pub fn format_stat(&self, field: StatField) -> String {
        match self
            .registry
            .format_value(field, self.stats.effective_value(field))
        {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(code = err.error_code(), "{}", err);
                String::new()
            }
        }
    }

    /// Unit suffix of a stat; empty if the field is not registered.
    pub fn stat_unit(&self, field: StatField) -> &str {
        match self.registry.unit(field) {
            Ok(unit) => unit,
            Err(err) => {
                tracing::warn!(code = err.error_code(), "{}", err);
                ""
            }
        }
    }

    /// Catalog entry by id; logged and `None` if unknown.
    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDefinition> {
        match self.catalog.get(id) {
            Ok(def) => Some(def),
            Err(err) => {
                tracing::warn!(code = err.error_code(), "{}", err);
                None
            }
        }
    }

    /// Register a stat-changed listener on the player's stat state.
    pub fn subscribe_stats(&mut self, listener: impl FnMut(&StatChange) + Send + 'static) -> ListenerId {
        self.stats.subscribe(listener)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &StatRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &UpgradeCatalog {
        &self.catalog
    }

    pub fn stats(&self) -> &StatState {
        &self.stats
    }

    pub fn ledger(&self) -> &UpgradeLedger {
        &self.ledger
    }

    pub fn ship(&self) -> &DurabilityShieldModel {
        &self.ship
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Move the session behind a mutex for multi-threaded hosts.
    pub fn into_shared(self) -> SharedSession {
        SharedSession::new(self)
    }
}

fn offer_source<'a>(
    mode: OfferMode,
    registry: &'a StatRegistry,
    catalog: &'a UpgradeCatalog,
) -> Box<dyn OfferSource + 'a> {
    match mode {
        OfferMode::Stats => Box::new(StatOffers::new(registry)),
        OfferMode::Catalog => Box::new(CatalogOffers::new(catalog, registry)),
    }
}

/// Builder for [`RunSession`] with flexible content sources.
///
/// Content is taken from, in order of precedence: [`content`](Self::content),
/// [`data_dir`](Self::data_dir), then [`registry`](Self::registry) plus an
/// optional [`catalog`](Self::catalog). An explicit game config overrides
/// the one shipped with the content.
#[derive(Default)]
pub struct SessionBuilder {
    game_config: Option<GameConfig>,
    seed: Option<u64>,
    content: Option<Content>,
    data_dir: Option<PathBuf>,
    registry: Option<StatRegistry>,
    catalog: Option<UpgradeCatalog>,
    bus: Option<EventBus>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Override game config and seed
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.game_config = Some(config.game);
        self.seed = config.seed;
        self
    }

    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = Some(config);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use already loaded content
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    /// Load content from a data directory at build time
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn registry(mut self, registry: StatRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn catalog(mut self, catalog: UpgradeCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Publish on an existing bus instead of a fresh one
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Build the session and credit the configured starting points.
    pub fn build(self) -> Result<RunSession> {
        let (content_config, registry, catalog) = if let Some(content) = self.content {
            (Some(content.config), content.registry, content.catalog)
        } else if let Some(data_dir) = self.data_dir {
            let content = ContentFactory::new(&data_dir)
                .load_all()
                .map_err(RuntimeError::from_load)?;
            tracing::info!(
                data_dir = %data_dir.display(),
                stats = content.registry.len(),
                upgrades = content.catalog.len(),
                "loaded content"
            );
            (Some(content.config), content.registry, content.catalog)
        } else {
            let registry = self.registry.ok_or(RuntimeError::MissingContent)?;
            (None, registry, self.catalog.unwrap_or_default())
        };

        // Re-check the catalog against the registry actually in use.
        let catalog = UpgradeCatalog::load(catalog.iter().cloned(), Some(&registry))?;

        let config = self.game_config.or(content_config).unwrap_or_default();
        if config.offer_size == 0 {
            tracing::warn!("offer_size is 0, offers will always be empty");
        }
        if config.offer_mode == OfferMode::Catalog && catalog.is_empty() {
            tracing::warn!("catalog offers requested but the upgrade catalog is empty");
        }

        let stats = StatState::new(&registry);
        let (profile, missing) = DurabilityProfile::from_registered(&registry, &stats);
        for field in &missing {
            tracing::warn!(%field, "survival stat is not registered, ship uses its default");
        }
        if profile.max_durability <= 0.0 {
            tracing::warn!("ship starts with no durability and dies on its first hit");
        }
        let mut ship = DurabilityShieldModel::new(profile, config.regen_timer);
        let combat_events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&combat_events);
        ship.subscribe(move |event| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(*event);
        });

        let mut session = RunSession {
            ledger: UpgradeLedger::new(config.offer_size),
            config,
            registry,
            catalog,
            stats,
            ship,
            rng: SessionRng::new(self.seed),
            bus: self.bus.unwrap_or_default(),
            combat_events,
        };

        tracing::info!(
            offer_mode = ?session.config.offer_mode,
            regen_timer = ?session.config.regen_timer,
            offer_size = session.config.offer_size,
            seeded = self.seed.is_some(),
            "run session ready"
        );

        if session.config.starting_points > 0 {
            session.credit_points(i64::from(session.config.starting_points))?;
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use starfall_core::{StatDefinition, UpgradeType};

    use super::*;

    fn partial_registry() -> StatRegistry {
        StatRegistry::load_partial(vec![
            StatDefinition::new(StatField::MaxDurability, "Max Durability", 100.0, 50.0, 10).integer(),
            StatDefinition::new(StatField::MaxShield, "Max Shield", 100.0, 50.0, 10).integer(),
            StatDefinition::new(StatField::ShieldRegenRate, "Shield Regen", 20.0, 5.0, 8).with_unit("/s"),
        ])
        .unwrap()
    }

    #[test]
    fn build_requires_content() {
        let err = RunSession::builder().build().unwrap_err();
        assert!(matches!(err, RuntimeError::MissingContent));
    }

    #[test]
    fn lookups_fall_back_to_sentinels() {
        let session = RunSession::builder()
            .registry(partial_registry())
            .seed(1)
            .build()
            .unwrap();

        assert_eq!(session.stat_value(StatField::MaxShield), 100.0);
        assert_eq!(session.format_stat(StatField::ShieldRegenRate), "20");
        assert_eq!(session.stat_unit(StatField::ShieldRegenRate), "/s");

        assert_eq!(session.stat_value(StatField::Mass), 0.0);
        assert_eq!(session.format_stat(StatField::Mass), "");
        assert_eq!(session.stat_unit(StatField::Mass), "");
        assert!(session.upgrade("warp_drive").is_none());
    }

    #[test]
    fn catalog_is_checked_against_registry() {
        let catalog = UpgradeCatalog::load(
            vec![
                UpgradeDefinition::general("ballast", "Ballast", UpgradeType::Ship)
                    .with_modifier(StatField::Mass, 0.5),
            ],
            None,
        )
        .unwrap();

        let err = RunSession::builder()
            .registry(partial_registry())
            .catalog(catalog)
            .build()
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
    }

    #[test]
    fn ship_survives_a_table_without_durability() {
        let registry = StatRegistry::load_partial(vec![
            StatDefinition::new(StatField::MaxShield, "Max Shield", 100.0, 50.0, 10).integer(),
        ])
        .unwrap();
        let mut session = RunSession::builder().registry(registry).seed(1).build().unwrap();
        let combat_rx = session.bus().subscribe_channel(crate::events::Topic::Combat);

        assert!(!session.is_dead());
        assert_eq!(session.ship().max_durability(), 100.0);
        assert_eq!(session.stat_value(StatField::MaxDurability), 0.0);

        session.apply_damage(150.0, 0.0).unwrap();
        assert!(!session.is_dead());
        assert!(combat_rx.try_iter().all(|e| e != Event::Combat(DurabilityEvent::Died)));
    }

    #[test]
    fn starting_points_open_an_offer() {
        let session = RunSession::builder()
            .registry(partial_registry())
            .game_config(GameConfig::default().with_starting_points(2))
            .seed(3)
            .build()
            .unwrap();

        assert_eq!(session.balance(), 2);
        assert_eq!(session.current_options().len(), 3);
        assert!(session.ledger().phase().is_open());
    }
}
