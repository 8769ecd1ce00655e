// camara-api: Async Rust client for the CAMARA network APIs

#[macro_use]
mod macros;

pub mod auth;
pub mod client;
pub mod error;
pub mod model;
pub mod request;
pub mod shape;
pub mod transport;
pub mod types;

pub mod connectivity_insights;
pub mod device_identifier;
pub mod device_status;
pub mod edge_discovery;
pub mod kyc;
pub mod location;
pub mod number_verification;
pub mod otp;
pub mod qod;
pub mod qos_profiles;
pub mod sim_swap;

pub use auth::{AuthStrategy, Credentials};
pub use client::CamaraClient;
pub use error::Error;
pub use model::{ApiEnum, CheckShape, Field, IntoField, Model};
pub use request::{Operation, Request, X_CORRELATOR};
pub use transport::{RetryPolicy, TlsMode, TransportConfig};
