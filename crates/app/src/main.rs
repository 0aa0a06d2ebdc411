//! Line-oriented front end for the inventory service.

mod command;
mod render;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use stocktrack_core::{DomainResult, Entity};
use stocktrack_infra::{
    InMemoryGateway, InventoryConfig, InventoryService, JsonFileGateway, PersistenceGateway,
    SyncStatus, Synced,
};
use stocktrack_inventory::{StockItem, available_filters, total_quantity};

use crate::command::{Command, HELP};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    stocktrack_observability::init();
    let config = InventoryConfig::from_env();

    match config.data_file.clone() {
        Some(path) => {
            tracing::info!(path = %path.display(), "using JSON file gateway");
            let service = InventoryService::hydrate(&config, JsonFileGateway::new(path))
                .await
                .context("failed to load inventory")?;
            run(service).await
        }
        None => run(InventoryService::new(&config, InMemoryGateway::new())).await,
    }
}

async fn run<G: PersistenceGateway>(mut service: InventoryService<G>) -> anyhow::Result<()> {
    let filters: Vec<_> = available_filters(service.categories())
        .iter()
        .map(|f| f.key())
        .collect();
    println!("Stock Management  (filters: {})", filters.join(", "));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(err) => {
                println!("error: {err:#}");
                continue;
            }
        };

        let currency = service.currency().to_string();
        match cmd {
            Command::Add(draft) => {
                let result = service.add(&draft).await;
                report_mutation("added", result);
            }
            Command::Set { id, quantity } => {
                let result = service.set_quantity(id, quantity).await;
                report_mutation("updated", result);
            }
            Command::Take { id, units } => {
                let result = service.remove_units(id, units).await;
                report_mutation("updated", result);
            }
            Command::Remove(id) => {
                let result = service.remove(id).await;
                report_mutation("removed", result);
            }
            Command::List => print!("{}", render::items(service.list(), &currency)),
            Command::History(filter) => {
                print!("{}", render::history(&service.filtered_history(&filter), &currency))
            }
            Command::Total => {}
            Command::Report => {
                let report = service.generate_report();
                println!("# {}", report.file_name());
                println!("{}", report.to_json_pretty()?);
            }
            Command::Retry => report_sync(&service.retry_pending().await),
            Command::Failed => print!("{}", render::failed(service.failed_writes())),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }

        println!(
            "Total Inventory Value: {} {currency} ({} units)",
            service.total_value(),
            total_quantity(service.list())
        );
        if service.pending_writes() > 0 {
            println!(
                "({} writes not yet saved; type 'retry')",
                service.pending_writes()
            );
        }
    }

    if let Some(notice) = render::exit_notice(service.pending_writes()) {
        tracing::warn!(
            pending_writes = service.pending_writes(),
            "exiting with unsaved writes"
        );
        println!("{notice}");
    }
    Ok(())
}

fn report_mutation(verb: &str, result: DomainResult<Synced<StockItem>>) {
    match result {
        Ok(Synced { value, sync }) => {
            println!(
                "{verb} {} ({}): quantity {}",
                value.name(),
                value.id(),
                value.quantity()
            );
            report_sync(&sync);
        }
        Err(err) if err.is_not_found() => println!("no such item; nothing changed"),
        Err(err) => println!("rejected: {err}"),
    }
}

fn report_sync(sync: &SyncStatus) {
    match sync {
        SyncStatus::Confirmed => {}
        SyncStatus::Pending {
            error,
            pending_writes,
        } => println!("warning: not saved ({error}); {pending_writes} writes pending"),
        SyncStatus::Failed {
            error,
            failed_writes,
        } => println!("warning: store refused {failed_writes} writes ({error}); type 'failed'"),
    }
}
