use std::time::Duration;

use clap::{Parser, Subcommand};
use envoy::{Client, Scheme};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the parts registered with the unit.
    #[clap(name = "inventory")]
    Inventory,

    /// Show the current production and consumption.
    #[clap(name = "production")]
    Production,
}

#[derive(Parser)]
pub struct ConnectionArgs {
    /// Unit address: `host` or `host:port`.
    #[clap(long, env = "ENVOY_ADDRESS")]
    pub address: String,

    #[clap(long, env = "ENVOY_SCHEME", value_enum, default_value_t = Scheme::Https)]
    pub scheme: Scheme,

    /// Bearer token issued by Enphase Entrez.
    #[clap(long, env = "ENVOY_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,

    /// Accept the unit's self-signed certificate.
    #[clap(long, env = "ENVOY_INSECURE")]
    pub insecure: bool,

    #[clap(long = "timeout-secs", env = "ENVOY_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,
}

impl ConnectionArgs {
    pub fn client(&self) -> envoy::Result<Client> {
        let mut client = Client::builder()
            .address(self.address.as_str())
            .scheme(self.scheme)
            .insecure_skip_verify(self.insecure)
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;
        client.set_token(self.token.as_str());
        Ok(client)
    }
}
