//! SL journey planning from the command line.

#![allow(clippy::print_stdout)]

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trafiklab::domain::{
    LatLng, SL_EFA_PREFIX, Trip, convert_id_to_hafas, convert_site_id_to_efa,
};
use trafiklab::journeyplanner::{
    self, JourneyPlannerClient, JourneyPlannerConfig, Mode, ModeSelection, Place,
    StopFinderRequest,
};
use trafiklab::travelplanner::{TravelplannerClient, TravelplannerConfig, TripsRequest};

#[derive(Parser)]
#[command(name = "trafiklab")]
#[command(author, version, about = "SL journey planner client", long_about = None)]
struct Cli {
    /// Log request URLs
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find stops by name or around a position
    Stops {
        /// Search text; omit when searching by position
        name: Option<String>,

        /// Search around "lat,lng" instead
        #[arg(long)]
        near: Option<LatLng>,

        /// Location kinds to match
        #[arg(long, value_delimiter = ',', default_value = "stop")]
        filter: Vec<String>,
    },

    /// Plan a trip with the journey planner v2
    Trips {
        /// Site ID, EFA ID, search text or "lat,lng"
        origin: Place,
        destination: Place,

        /// Number of trips, 1 to 3
        #[arg(short, long, default_value = "3")]
        num: u32,

        /// Modes to avoid
        #[arg(long, value_delimiter = ',')]
        avoid: Vec<Mode>,

        /// Sent as X-Correlation-ID
        #[arg(long, env = "SL_CLIENT_ID")]
        client_id: Option<String>,
    },

    /// Plan a trip with the Travelplanner 3.1 API
    Travelplanner {
        /// Origin site ID
        origin: String,
        /// Destination site ID
        destination: String,

        #[arg(long, env = "SL_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Keep short connector walks
        #[arg(long)]
        raw: bool,
    },

    /// Print the HAFAS and EFA forms of a site ID
    Convert { site_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Stops { name, near, filter } => {
            let request = match (name, near) {
                (_, Some(position)) => StopFinderRequest::by_position(position, &filter)?,
                (Some(name), None) => StopFinderRequest::by_name(name, &filter)?,
                (None, None) => anyhow::bail!("give a name or --near"),
            };
            let client =
                JourneyPlannerClient::new(JourneyPlannerConfig::default().with_debug(cli.debug))?;
            let response = client.stop_finder(&request).await?;
            for location in &response.locations {
                let marker = if location.is_best { "*" } else { " " };
                println!("{marker} {:<18} {:<12} {}", location.id, location.kind, location.name);
            }
        }

        Commands::Trips {
            origin,
            destination,
            num,
            avoid,
            client_id,
        } => {
            let mut config = JourneyPlannerConfig::default().with_debug(cli.debug);
            if let Some(id) = client_id {
                config = config.with_client_id(id);
            }
            let client = JourneyPlannerClient::new(config)?;

            let mut request = journeyplanner::TripsRequest::new(origin, destination, Utc::now());
            request.num_trips = num;
            if !avoid.is_empty() {
                request.modes = ModeSelection::Avoid(avoid);
            }

            let response = client.trips(&request).await?;
            for journey in &response.journeys {
                let minutes = journey.duration().map(|d| d.num_minutes()).unwrap_or_default();
                println!(
                    "{} -> {}  {minutes} min, {} changes",
                    fmt_time(journey.departure()),
                    fmt_time(journey.arrival()),
                    journey.interchanges
                );
                for leg in &journey.legs {
                    let line = leg
                        .transportation
                        .as_ref()
                        .map(|t| t.name.as_str())
                        .unwrap_or("walk");
                    println!(
                        "    {line:<20} {} -> {}",
                        leg.origin.name, leg.destination.name
                    );
                }
            }
        }

        Commands::Travelplanner {
            origin,
            destination,
            api_key,
            raw,
        } => {
            let config = TravelplannerConfig::new(api_key).with_debug(cli.debug);
            let client = TravelplannerClient::new(config)?;
            let request = TripsRequest::between(origin, destination).departing_at(Utc::now());

            let mut response = client.trips(&request).await?;
            if !raw {
                response = response.combine_walks();
            }
            for trip in &response.trips {
                print_trip(trip)?;
            }
        }

        Commands::Convert { site_id } => {
            println!("hafas {}", convert_id_to_hafas(&site_id)?);
            println!("efa   {}", convert_site_id_to_efa(&site_id, SL_EFA_PREFIX)?);
        }
    }

    Ok(())
}

fn fmt_time(t: Option<chrono::DateTime<chrono_tz::Tz>>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn print_trip(trip: &Trip) -> anyhow::Result<()> {
    let departure = trip.departure()?.map(|t| t.realtime);
    let arrival = trip.arrival()?.map(|t| t.realtime);
    println!(
        "{} -> {}  {} changes, {} m walking{}",
        fmt_time(departure),
        fmt_time(arrival),
        trip.change_count(),
        trip.walk_distance(),
        if trip.has_cancellation() { "  CANCELLED" } else { "" }
    );

    trip.each_leg_contextual(|ctx| {
        let leg = ctx.leg;
        if leg.is_walk() {
            let to = ctx
                .next_transport
                .map(|next| next.line())
                .unwrap_or("destination");
            println!("    walk {} m to {to}", leg.distance);
        } else {
            let times = leg.origin.times()?;
            let delay = times
                .filter(|t| t.is_delayed())
                .map(|t| format!(" (+{} min)", t.delay().num_minutes()))
                .unwrap_or_default();
            println!(
                "    {:<12} {} -> {}{delay}",
                leg.line(),
                leg.origin.name,
                leg.destination.name
            );
        }
        Ok::<_, anyhow::Error>(())
    })
}
