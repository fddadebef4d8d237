use sv_core::errors::Result;
use sv_drivers::{Drivers, DriversConfig};
use sv_repository::RepositoryConfig;
use sv_settings::Settings;
use sv_time::Timestamp;
use tracing::debug;

/// Drivers and settings of one simulation run.
///
/// Both stores share the scenario, unit and prefix configuration, and their
/// `today` always moves together.
#[derive(Debug, Clone)]
pub struct SimulationStore {
    drivers: Drivers,
    settings: Settings,
}

impl SimulationStore {
    /// Build both stores from one configuration; the settings store uses
    /// `config.repository`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](sv_core::Error::InvalidArgument) if the
    /// configuration does not validate.
    pub fn new(config: DriversConfig) -> Result<Self> {
        let settings = Settings::new(config.repository.clone())?;
        let drivers = Drivers::new(config)?;
        Ok(Self { drivers, settings })
    }

    /// Build both stores for `scenario` with every other option at its
    /// default.
    pub fn for_scenario(scenario: &str) -> Result<Self> {
        Self::new(RepositoryConfig::default().with_current_scenario(scenario).into())
    }

    /// The current simulated date.
    pub fn today(&self) -> Timestamp {
        self.drivers.today()
    }

    /// Advance the simulated date of both stores.
    pub fn set_today(&mut self, today: Timestamp) {
        debug!(%today, "simulation day");
        self.drivers.set_today(today);
        self.settings.set_today(today);
    }

    /// Tag subsequent writes to both stores with the module performing them.
    pub fn set_debug_module_info(&mut self, info: &str) {
        self.drivers.set_debug_module_info(info);
        self.settings.set_debug_module_info(info);
    }

    /// The drivers store.
    pub fn drivers(&self) -> &Drivers {
        &self.drivers
    }

    /// The drivers store, for writing.
    pub fn drivers_mut(&mut self) -> &mut Drivers {
        &mut self.drivers
    }

    /// The settings store.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The settings store, for writing.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}
