#![allow(dead_code)]

pub mod mock_notifier;

use std::sync::Arc;

use content_studio::config::Config;
use content_studio::controller::SessionController;
use content_studio::fixtures::FixtureData;
use content_studio::studio::{Studio, StudioHandle};
use mock_notifier::MockNotifier;

/// A running studio seeded with the builtin fixture
pub struct TestStudio {
    pub handle: StudioHandle,
    pub notifier: MockNotifier,
}

impl TestStudio {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn strict() -> Self {
        Self::with_config(Config {
            strict_ids: true,
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let fixture = FixtureData::builtin().expect("Builtin fixture must parse");
        let controller = SessionController::new(fixture, &config);
        let notifier = MockNotifier::new();
        let handle = Studio::spawn(controller, Arc::new(notifier.clone()));
        Self { handle, notifier }
    }
}
