use crate::BackendArgs;
use crate::view::hit_rows;
use std::time::Duration;
use tabled::{Table, settings::Style};
use tracing::info;

pub async fn run(
    backends: &BackendArgs,
    polls: u32,
    interval_ms: u64,
    table: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let aggregator = backends.build()?;
    aggregator.init();
    info!("polling {} time(s)", polls);

    for poll in 0..polls {
        if poll > 0 {
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }

        match aggregator.refresh_hit_counts().await {
            None => println!("no data"),
            Some(snapshot) if table => {
                println!("{}", Table::new(hit_rows(&snapshot)).with(Style::psql()));
            }
            Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        }
    }
    Ok(())
}
