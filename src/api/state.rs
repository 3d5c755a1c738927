use std::sync::Arc;

use crate::{
    clock::HubClock,
    control::ControlService,
    sensors::SensorService,
    settings::SettingsService,
    store::Store,
    sunset::SunsetClient,
};

/// Services shared by every handler. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<SettingsService<Store, SunsetClient>>,
    pub sensors: Arc<SensorService<Store>>,
    pub control: Arc<ControlService<Store>>,
}

impl AppState {
    pub fn new(store: Store, sunset: SunsetClient, clock: HubClock) -> Self {
        Self::from_services(
            SettingsService::new(store.clone(), sunset),
            SensorService::new(store.clone(), clock),
            ControlService::new(store),
        )
    }

    pub fn from_services(
        settings: SettingsService<Store, SunsetClient>,
        sensors: SensorService<Store>,
        control: ControlService<Store>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            sensors: Arc::new(sensors),
            control: Arc::new(control),
        }
    }
}
