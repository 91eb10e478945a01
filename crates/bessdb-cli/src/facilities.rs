//! The health-facility directory command.

use clap::Args;

use bessdb_core::query::{filter_facilities, page_slice, total_pages, FacilityFilter};
use bessdb_core::AppConfig;
use bessdb_feed::FeedClient;

#[derive(Debug, Args)]
pub struct FacilitiesArgs {
    /// Free-text search over name, address and district
    #[arg(long)]
    pub search: Option<String>,

    /// State filter (exact match against the feed value)
    #[arg(long)]
    pub state: Option<String>,

    /// Facility type filter, e.g. "Klinik Kesihatan" or "Hospital"
    #[arg(long = "type")]
    pub facility_type: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

pub async fn run(args: FacilitiesArgs, config: &AppConfig) -> anyhow::Result<()> {
    let client = FeedClient::new(config.request_timeout_secs, &config.user_agent)?;
    let records = client
        .fetch_facilities(&config.facilities_feed_url)
        .await?;
    tracing::info!(total = records.len(), "loaded health-facility feed");

    let filter = FacilityFilter {
        search: args.search,
        state: args.state,
        facility_type: args.facility_type,
    };
    let hits = filter_facilities(&records, &filter);
    let pages = total_pages(hits.len(), config.page_size);

    println!("{} facilities", hits.len());
    for facility in page_slice(&hits, args.page, config.page_size) {
        println!("{} ({})", facility.name, facility.facility_type);
        println!("  {} | {}, {}", facility.address, facility.district, facility.state);
        if !facility.phone.is_empty() {
            println!("  tel {}", facility.phone);
        }
        println!("  {}", facility.directions_url());
    }
    if pages > 1 {
        println!("page {} of {pages}", args.page.clamp(1, pages));
    }
    Ok(())
}
