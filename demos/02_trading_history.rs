use bvb_rs::{BvbClient, HistoryBuilder, Interval, Period};
use chrono::NaiveDate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    bvb_rs::init_tracing();

    let client = BvbClient::default();

    // 1. A fixed calendar year, through the convenience function.
    let bars = bvb_rs::get_trading_history(
        &client,
        "TLV",
        None,
        Some("2023-01-03"),
        Some("2023-12-31"),
    )
    .await?;
    println!("--- TLV 2023: {} trading days ---", bars.len());
    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        println!("  {} open  {}", first.date(), first.open);
        println!("  {} close {}", last.date(), last.close);
    }
    println!();

    // 2. The full history of a share, anchored at its first trading day.
    let mut shares = bvb_rs::SharesBuilder::new(&client)
        .symbols("AAG")
        .issue_info(true)
        .fetch()
        .await?;
    if let Some(aag) = shares.pop() {
        let max = HistoryBuilder::new(&client, &aag)
            .period(Period::Max)
            .fetch()
            .await?;
        println!(
            "--- AAG since {}: {} bars ---",
            aag.start_trading_date
                .map_or_else(|| "?".to_string(), |d| d.to_string()),
            max.len()
        );
    }
    println!();

    // 3. Weekly, unadjusted bars over an explicit window.
    let weekly = HistoryBuilder::new(&client, "SNP")
        .between(
            NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
            NaiveDate::from_ymd_opt(2024, 6, 30).ok_or("bad date")?,
        )
        .interval(Interval::W1)
        .adjusted(false)
        .fetch()
        .await?;
    println!("--- SNP weekly H1 2024 ---");
    for bar in &weekly {
        println!(
            "  {}  o {:>8}  h {:>8}  l {:>8}  c {:>8}  v {:>12}",
            bar.date(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        );
    }

    Ok(())
}
