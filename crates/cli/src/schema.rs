use hitlens_memory::BackendFixture;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&BackendFixture::schema())?);
    Ok(())
}
