//! Application settings: the two API keys.

mod service;
mod traits;

pub use service::{SettingsService, SettingsServiceTrait};
pub use traits::SettingsRepositoryTrait;
