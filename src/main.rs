use clap::{Parser, Subcommand};
use lazy_wander::request::{Budget, LatLng, Participants, Region, TransportMode, TravelStyle, TripDuration};
use lazy_wander::{
    parse_itinerary, AppConfig, GrammarVersion, GroundingLink, Metrics, ParsedItinerary,
    SavedTravelStore, TravelPlanner, TravelRequest,
};
use log::info;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lazy-wander", version, about = "Trips for people who would rather stay home")]
struct Cli {
    /// Print itineraries as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the model for a new itinerary
    Plan {
        #[arg(long, default_value = "seoul")]
        region: Region,
        #[arg(long, default_value = "day-trip")]
        duration: TripDuration,
        #[arg(long, default_value = "hermit")]
        style: TravelStyle,
        #[arg(long, default_value = "under-100k")]
        budget: Budget,
        #[arg(long, default_value = "solo")]
        participants: Participants,
        #[arg(long, default_value = "public")]
        transport: TransportMode,
        /// Skip restaurant recommendations
        #[arg(long)]
        no_food: bool,
        /// 1 (slightly bothered) to 5 (only the soul travels)
        #[arg(long, default_value_t = 4)]
        laziness: u8,
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Override the configured grammar
        #[arg(long)]
        grammar: Option<GrammarVersion>,
        /// Keep the result in the saved travel store
        #[arg(long)]
        save: bool,
    },
    /// Parse a saved model response from a file
    Parse {
        file: PathBuf,
        /// JSON array of {"title", "uri"} grounding links
        #[arg(long)]
        links: Option<PathBuf>,
        #[arg(long, default_value = "extended")]
        grammar: GrammarVersion,
    },
    /// List saved travels
    List,
    /// Re-open a saved travel
    Show { id: String },
    /// Delete a saved travel
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let store = SavedTravelStore::open(&config.storage_path);

    match cli.command {
        Command::Plan {
            region,
            duration,
            style,
            budget,
            participants,
            transport,
            no_food,
            laziness,
            lat,
            lng,
            grammar,
            save,
        } => {
            let request = TravelRequest {
                region,
                duration,
                style,
                budget,
                transport,
                participants,
                include_food: !no_food,
                laziness_level: laziness,
                location: lat.zip(lng).map(|(latitude, longitude)| LatLng {
                    latitude,
                    longitude,
                }),
            };

            let mut builder = TravelPlanner::builder().config(config);
            if let Some(grammar) = grammar {
                builder = builder.grammar(grammar);
            }
            let plan = builder.build()?.plan(&request).await?;

            print_itinerary(&plan.itinerary, cli.json)?;
            if save {
                let saved = store.save(&plan, region)?;
                info!("Saved to {}", store.path().display());
                println!("\nSaved as {}", saved.id);
            }
        }
        Command::Parse {
            file,
            links,
            grammar,
        } => {
            let text = fs::read_to_string(&file)?;
            let links: Vec<GroundingLink> = match links {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => Vec::new(),
            };
            print_itinerary(&parse_itinerary(&text, &links, grammar), cli.json)?;
        }
        Command::List => {
            let travels = store.list();
            if travels.is_empty() {
                println!("Nothing saved yet.");
            }
            for travel in travels {
                println!(
                    "{}  {}  {}  [{}]  lazy {}",
                    travel.id,
                    travel.saved_at.format("%Y-%m-%d"),
                    travel.title,
                    travel.region.as_str(),
                    travel.total_difficulty
                );
            }
        }
        Command::Show { id } => {
            let travel = store
                .get(&id)
                .ok_or_else(|| format!("No saved travel with id {}", id))?;
            print_itinerary(&travel.restore(), cli.json)?;
        }
        Command::Delete { id } => {
            if store.delete(&id)? {
                println!("Deleted {}", id);
            } else {
                println!("No saved travel with id {}", id);
            }
        }
    }

    Ok(())
}

fn print_itinerary(itinerary: &ParsedItinerary, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(itinerary)?);
        return Ok(());
    }

    println!("{}", itinerary.title);
    match itinerary.metrics {
        Metrics::Lazy { difficulty } => println!("Lazy score: {}/100", difficulty),
        Metrics::Extended(m) => println!(
            "{} | ~{} steps | {} moves | {}% indoors",
            "*".repeat(m.stars as usize),
            m.steps,
            m.movements,
            m.indoor
        ),
    }
    println!("{}", itinerary.comment);

    for day in &itinerary.days {
        println!("\nDay {}", day.day);
        for (i, activity) in day.activities.iter().enumerate() {
            println!("  {}. {}", i + 1, activity.name);
            if !activity.desc.is_empty() {
                println!("     {}", activity.desc.replace('\n', "\n     "));
            }
            if !activity.tip.is_empty() {
                println!("     Tip: {}", activity.tip.replace('\n', "\n     "));
            }
            if let Some(photo) = activity.photo {
                println!("     Photo spot: {}/5", photo);
            }
            if let Some(link) = &activity.map_link {
                println!("     Map: {}", link.uri);
            }
        }
    }
    Ok(())
}
