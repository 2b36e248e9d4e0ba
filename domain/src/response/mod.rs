//! Response value objects - immutable results of a fan-out.
//!
//! - [`identity::ConnectorIdentity`] - `(service_name, model_name)` of a connector
//! - [`model_response::ModelResponse`] - one connector's successful answer
//! - [`aggregated::AggregatedResponse`] - every successful answer for one prompt

pub mod aggregated;
pub mod identity;
pub mod model_response;
