//! Client for the local API of Enphase Envoy solar monitoring units.
//!
//! ```no_run
//! # async fn example() -> envoy::Result {
//! let mut client = envoy::Client::builder()
//!     .address("envoy.local")
//!     .insecure_skip_verify(true)
//!     .build()?;
//! client.set_token("<JWT from Enphase Entrez>");
//! client.login().await?;
//! let production = client.production().await?;
//! if let Some(produced) = production.produced() {
//!     println!("producing {}", produced.w_now);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod models;
mod prelude;
pub mod quantity;
#[cfg(test)]
mod testing;

pub use self::{
    client::{Client, Scheme},
    error::{Error, Result},
};
