pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{counter::FileCounter, notifier::WebhookNotifier, registry::HttpRegistryClient};
pub use config::CliConfig;
pub use core::image::ImageResolver;
pub use core::lookup::LookupEngine;
pub use domain::model::{LookupFailure, LookupResult, NormalizedCertification, ResolvedImage};
pub use utils::error::{LookupError, Result};
