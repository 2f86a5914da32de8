use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = quickbooks_hedera::args::parse();
    quickbooks_hedera::cli::main(args).await
}
