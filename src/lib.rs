#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown
)]

//! gree_ac
//!
//! gree_ac is a client library for Gree smart air conditioners speaking the
//! vendor's encrypted JSON-over-UDP protocol.
//!
//! Main pieces:
//! - packet envelope build/parse (`packet`): base64(AES-ECB(JSON)) framing
//! - per-device symmetric cipher (`cipher`)
//! - validated command settings (`settings`)
//! - blocking request/response session (`client`), plus an async facade
//!   over it (`aio`)
//!
//! A short example:
//! ```no_run
//! use gree_ac::{CommandConfig, DeviceIdentity, GreeClient, TemperatureUnit};
//!
//! fn main() -> Result<(), gree_ac::GreeError> {
//!     let identity = DeviceIdentity::new("aa:bb:cc:dd:ee:ff", b"0123456789abcdef")?
//!         .with_host("192.168.1.42");
//!     let client = GreeClient::new(identity)?;
//!
//!     let mut config = CommandConfig::new();
//!     config.set_power(true);
//!     config.set_temperature(24, TemperatureUnit::Celsius)?;
//!     client.send_command(&config)?;
//!
//!     client.update_status()?;
//!     println!("{:?}", client.status()?);
//!     Ok(())
//! }
//! ```

pub mod aio;
pub mod cipher;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod packet;
pub mod settings;
pub mod transport;

pub use aio::AsyncGreeClient;
pub use cipher::AesCipher;
pub use client::GreeClient;
pub use endpoint::DeviceIdentity;
pub use error::GreeError;
pub use settings::{CommandConfig, Mode, TemperatureUnit};
