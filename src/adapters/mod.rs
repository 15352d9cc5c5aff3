// Adapters layer: concrete implementations for external systems (registry
// HTTP API, counter storage, webhook notification sink).

pub mod counter;
pub mod notifier;
pub mod registry;
