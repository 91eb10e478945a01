//! The premises directory command: fetch, filter, paginate, render.

use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use bessdb_core::premise::maps_search_url;
use bessdb_core::query::{
    active_count, filter_premises, page_slice, page_window, total_pages, PremiseFilter,
    StatusFilter,
};
use bessdb_core::{AppConfig, Debouncer, PremiseRecord};
use bessdb_feed::FeedClient;

#[derive(Debug, Args)]
pub struct PremisesArgs {
    /// Free-text search over company, address, state and district
    #[arg(long)]
    pub search: Option<String>,

    /// State filter (exact match, case-insensitive)
    #[arg(long)]
    pub state: Option<String>,

    /// District filter; only meaningful together with --state
    #[arg(long)]
    pub district: Option<String>,

    /// Certificate status: all, active or expired
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Render style
    #[arg(long, value_enum, default_value_t = ViewMode::Card)]
    pub view: ViewMode,

    /// Read search terms from stdin, applying each after the debounce delay
    #[arg(long, short)]
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewMode {
    Card,
    List,
}

pub async fn run(args: PremisesArgs, config: &AppConfig) -> anyhow::Result<()> {
    let client = FeedClient::new(config.request_timeout_secs, &config.user_agent)?;
    let today = chrono::Local::now().date_naive();
    let records = client
        .fetch_premises(&config.premises_feed_url, today)
        .await?;
    tracing::info!(total = records.len(), "loaded certified-premises feed");

    let mut filter = PremiseFilter::default();
    filter.set_state(args.state);
    filter.district = args.district;
    filter.search = args.search;
    filter.status = args.status;

    if args.interactive {
        return interactive(&records, filter, args.view, config).await;
    }

    render_page(&records, &filter, args.page, args.view, config.page_size);
    Ok(())
}

/// Debounced search loop over stdin: every line replaces the pending query,
/// and the directory re-renders once input has been quiet for the configured
/// delay. A blank line clears the query; end-of-input exits.
async fn interactive(
    records: &[PremiseRecord],
    mut filter: PremiseFilter,
    view: ViewMode,
    config: &AppConfig,
) -> anyhow::Result<()> {
    enum Event {
        Line(Option<String>),
        Apply(String),
    }

    let mut debouncer: Debouncer<String> = Debouncer::new(Duration::from_millis(config.debounce_ms));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("type a search term and press Enter (blank clears, Ctrl-D exits)");

    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line?),
            query = debouncer.settled() => Event::Apply(query),
        };
        match event {
            Event::Line(Some(line)) => debouncer.push(line),
            Event::Line(None) => break,
            Event::Apply(query) => {
                let query = query.trim();
                filter.search = if query.is_empty() {
                    None
                } else {
                    Some(query.to_string())
                };
                // Filter changes reset pagination to the first page.
                render_page(records, &filter, 1, view, config.page_size);
            }
        }
    }
    Ok(())
}

fn render_page(
    records: &[PremiseRecord],
    filter: &PremiseFilter,
    page: usize,
    view: ViewMode,
    page_size: usize,
) {
    let hits = filter_premises(records, filter);
    let pages = total_pages(hits.len(), page_size);
    let visible = page_slice(&hits, page, page_size);

    println!(
        "{} premises ({} active)",
        hits.len(),
        active_count(&hits)
    );

    for record in visible {
        match view {
            ViewMode::Card => print_card(record),
            ViewMode::List => print_line(record),
        }
    }

    if pages > 1 {
        let page = page.clamp(1, pages);
        let window: Vec<String> = page_window(page, pages)
            .into_iter()
            .map(|n| {
                if n == page {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        println!("pages: {} (page {page} of {pages})", window.join(" "));
    }
}

fn print_card(record: &PremiseRecord) {
    let status = if record.is_active { "ACTIVE" } else { "EXPIRED" };
    println!("{} [{status}]", record.company_name);
    println!(
        "  {} | {}",
        bessdb_core::premise::collapse_lines(&record.business_address),
        bessdb_core::premise::normalize_state(&record.state)
    );
    if !record.phone.is_empty() {
        println!("  tel {}", record.phone);
    }
    println!(
        "  cert {} - {} | {}",
        record.certificate_date, record.expiry_date, record.serial_no
    );
    println!(
        "  {}",
        maps_search_url(&record.company_name, &record.business_address)
    );
}

fn print_line(record: &PremiseRecord) {
    let status = if record.is_active { "A" } else { "E" };
    println!(
        "{status} {} | {} | {}",
        record.company_name,
        bessdb_core::premise::normalize_state(&record.state),
        record.expiry_date
    );
}
