//! Flow-normalization and scene-layout engine for a realtime household
//! energy distribution card.
//!
//! Every update tick the host feeds the current sensor readings through
//! [`flow::resolve`] to get a normalized [`FlowSnapshot`], then through
//! [`scene::layout`] to get the [`SceneDescription`] its renderer draws.
//! Both steps are pure and total: missing sensors, non-numeric states and
//! zero totals degrade to "no flow" rather than errors, because a dashboard
//! card must never crash the host page.
//!
//! Nothing survives between ticks except the host-supplied [`CardConfig`].

pub mod config;
pub mod flow;
pub mod locale;
pub mod render;
pub mod scene;

pub use config::{CardConfig, ConfigError, SensorId};
pub use flow::{FlowEdge, FlowSnapshot, Reading, ReadingProvider, StaticReadings};
pub use locale::{EnglishLocale, LabelKey, Localizer, NumberFormat, PlainFormat};
pub use scene::{ConnectorId, ConnectorSpec, NodeId, NodeSpec, PresenceVariant, SceneDescription};

/// Host-facing driver mirroring the card lifecycle: configure once, then
/// recompute the scene on every state-change notification.
#[derive(Debug, Default)]
pub struct EnergyFlowCard {
    config: Option<CardConfig>,
}

impl EnergyFlowCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the configuration. The next tick depends only on
    /// this configuration and the readings it fetches then.
    pub fn set_config(&mut self, config: CardConfig) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    /// One update tick with the default formatting and locale capabilities.
    ///
    /// Returns `None` before the first `set_config` (transient startup
    /// state, not an error): the card renders nothing for that tick.
    pub fn tick(&self, provider: &dyn ReadingProvider) -> Option<SceneDescription> {
        self.tick_with(provider, &PlainFormat, &EnglishLocale)
    }

    /// One update tick with host-supplied locale capabilities.
    pub fn tick_with(
        &self,
        provider: &dyn ReadingProvider,
        format: &dyn NumberFormat,
        locale: &dyn Localizer,
    ) -> Option<SceneDescription> {
        let config = self.config.as_ref()?;
        let snapshot = flow::resolve(config, provider, format);
        let mut scene = scene::layout(&snapshot, format, locale);
        scene.title = config.title.clone();
        Some(scene)
    }
}
