use std::time::Duration;

use bvb_rs::{BvbClient, Market, SharesBuilder, flatten_info, parse_filter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    bvb_rs::init_tracing();

    // 1. A client with a 20-second timeout.
    let client = BvbClient::builder().timeout(Duration::from_secs(20)).build()?;

    // 2. A couple of shares with symbol info; unknown tickers are dropped.
    let shares = bvb_rs::get_share_info(&client, ["TLV", "SNP", "GOOGL"]).await?;
    println!("--- Share info ---");
    for share in &shares {
        println!(
            "{:<6} {:<40} {:>15} shares  sector: {}",
            share.symbol.as_str(),
            share.name.as_deref().unwrap_or("-"),
            share.total_shares.unwrap_or_default(),
            share.company.sector.as_deref().unwrap_or("-"),
        );
    }
    println!();

    // 3. Everything on the AeRO market.
    let markets: Vec<Market> = parse_filter(&["AERO"])?;
    let aero = SharesBuilder::new(&client)
        .markets(markets)
        .symbol_info(false)
        .fetch()
        .await?;
    println!("--- {} shares listed on AeRO ---", aero.len());
    for share in aero.iter().take(10) {
        println!("  {} ({})", share.symbol, share.company.name);
    }
    println!();

    // 4. One share with issue info and the issuer profile, printed as a flat row.
    let mut full = SharesBuilder::new(&client)
        .symbols("AAG")
        .issue_info(true)
        .company_details(true)
        .fetch()
        .await?;
    if let Some(aag) = full.pop() {
        println!("--- {} as a flat row ---", aag.symbol);
        for (key, value) in flatten_info(&aag.info()) {
            println!("  {key:<32} {value}");
        }
    }

    Ok(())
}
