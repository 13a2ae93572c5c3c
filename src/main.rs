mod cli;
mod tables;

use anyhow::Context;
use clap::{Parser, crate_version};
use tracing::info;

use crate::{
    cli::{Args, Command},
    tables::{build_inventory_table, build_production_table},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let mut client = args.connection.client().context("failed to build the client")?;
    client.login().await.context("failed to log in")?;

    match args.command {
        Command::Inventory => {
            let inventory = client.inventory().await.context("failed to fetch the inventory")?;
            info!(n_groups = inventory.len(), "fetched the inventory");
            println!("{}", build_inventory_table(&inventory));
        }
        Command::Production => {
            let production =
                client.production().await.context("failed to fetch the production")?;
            if let Some(produced) = production.produced() {
                info!(power = %produced.w_now, lifetime = %produced.wh_lifetime, "producing");
            }
            if let Some(net) = production.net_consumption() {
                info!(power = %net.w_now, "net consumption");
            }
            println!("{}", build_production_table(&production));
        }
    }

    info!("done!");
    Ok(())
}
