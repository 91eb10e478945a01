//! Map commands: area search and single-premise location, rendered as text.

use clap::Args;

use bessdb_core::{AppConfig, LatLng, LatLngBounds};
use bessdb_feed::FeedClient;
use bessdb_geocode::Resolver;
use bessdb_map::{MapSurface, Marker, MarkerController, MarkerIcon};

#[derive(Debug, Args)]
pub struct SearchAreaArgs {
    /// South-west viewport corner as "lat,lng"
    #[arg(long)]
    pub south_west: String,

    /// North-east viewport corner as "lat,lng"
    #[arg(long)]
    pub north_east: String,
}

#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Certificate serial number of the premise to locate
    #[arg(long)]
    pub serial: String,
}

/// Prints marker operations as lines instead of drawing them.
struct TerminalSurface;

impl MapSurface for TerminalSurface {
    fn clear_markers(&mut self) {}

    fn add_marker(&mut self, marker: Marker) {
        let status = match marker.icon {
            MarkerIcon::Active => "ACTIVE",
            MarkerIcon::Expired => "EXPIRED",
        };
        println!(
            "({:.4}, {:.4}) {} [{status}] {}",
            marker.position.lat, marker.position.lng, marker.popup.company_name, marker.popup.serial_no
        );
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        println!("view -> ({:.4}, {:.4}) zoom {zoom}", center.lat, center.lng);
    }
}

pub async fn run_search_area(args: SearchAreaArgs, config: &AppConfig) -> anyhow::Result<()> {
    let bounds = LatLngBounds::new(
        parse_latlng(&args.south_west)?,
        parse_latlng(&args.north_east)?,
    );

    let client = FeedClient::new(config.request_timeout_secs, &config.user_agent)?;
    let today = chrono::Local::now().date_naive();
    let records = client
        .fetch_premises(&config.premises_feed_url, today)
        .await?;

    let resolver = build_resolver(config)?;
    let mut controller =
        MarkerController::new(TerminalSurface, resolver, config.max_candidates);
    let summary = controller.search_area(bounds, &records).await;
    println!(
        "placed {} of {} candidates",
        summary.placed, summary.candidates
    );
    Ok(())
}

pub async fn run_locate(args: LocateArgs, config: &AppConfig) -> anyhow::Result<()> {
    let client = FeedClient::new(config.request_timeout_secs, &config.user_agent)?;
    let today = chrono::Local::now().date_naive();
    let records = client
        .fetch_premises(&config.premises_feed_url, today)
        .await?;

    let record = records
        .iter()
        .find(|r| r.serial_no.trim() == args.serial.trim())
        .ok_or_else(|| anyhow::anyhow!("no premise with serial \"{}\"", args.serial))?;

    let resolver = build_resolver(config)?;
    let mut controller =
        MarkerController::new(TerminalSurface, resolver, config.max_candidates);
    match controller.select_premise(record).await {
        Some(position) => {
            println!(
                "{} resolved to ({:.4}, {:.4})",
                record.company_name, position.lat, position.lng
            );
        }
        None => println!("{} could not be resolved", record.company_name),
    }
    Ok(())
}

fn build_resolver(config: &AppConfig) -> anyhow::Result<Resolver> {
    Ok(Resolver::new(
        &config.geocoder_url,
        &config.geocode_country,
        &config.user_agent,
        config.request_timeout_secs,
        config.geocode_pacing_ms,
    )?)
}

/// Parses a "lat,lng" pair.
fn parse_latlng(raw: &str) -> anyhow::Result<LatLng> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("expected \"lat,lng\", got \"{raw}\""))?;
    Ok(LatLng::new(
        lat.trim().parse::<f64>()?,
        lng.trim().parse::<f64>()?,
    ))
}
