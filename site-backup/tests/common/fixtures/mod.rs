//! This module provides reusable test utilities:
//! - Fake controller, pull and mail collaborators
//! - Mock controller HTTP server
//! - Test configuration builders
//! - Common test data

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fakes;
pub mod mock_controller;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use fakes::{FakeAuthenticator, FakePuller, FakeSiteLister, RecordingTransport};
pub use mock_controller::MockControllerServer;
pub use test_config::TestConfigBuilder;
pub use test_data::*;
