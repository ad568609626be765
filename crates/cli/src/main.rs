fn main() -> Result<(), Box<dyn std::error::Error>> {
    hitlens_cli::run()
}
