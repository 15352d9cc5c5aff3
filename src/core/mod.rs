pub mod image;
pub mod lookup;
pub mod normalize;

pub use crate::domain::model::{LookupFailure, LookupResult, NormalizedCertification, ResolvedImage};
pub use crate::domain::ports::{AnomalyNotifier, CertificationApi, ConfigProvider, RequestCounter};
pub use crate::utils::error::Result;
