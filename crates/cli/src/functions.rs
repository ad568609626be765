use crate::BackendArgs;
use crate::view::FunctionRow;
use tabled::{Table, settings::Style};

pub async fn run(path: &str, backends: &BackendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let aggregator = backends.build()?;
    aggregator.init();

    let rows: Vec<FunctionRow> = aggregator
        .functions_in_file(path)
        .iter()
        .map(FunctionRow::from_record)
        .collect();

    if rows.is_empty() {
        println!("No functions known for {}.", path);
    } else {
        println!("{}", Table::new(&rows).with(Style::psql()));
    }
    Ok(())
}
