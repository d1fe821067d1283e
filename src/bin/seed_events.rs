//! Seeding Tool
//!
//! Writes a random season of fixtures through the repository.
//! Run with: cargo run --bin seed_events --release -- --events 1000

use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use sports_events::{db, Config, Event, EventRepository, PgEventTable};

const TEAMS: [(&str, &str, &str); 8] = [
    ("Lions", "Detroit", "USA"),
    ("Bears", "Chicago", "USA"),
    ("Packers", "Green Bay", "USA"),
    ("Vikings", "Minneapolis", "USA"),
    ("Maple Leafs", "Toronto", "Canada"),
    ("Canadiens", "Montreal", "Canada"),
    ("Arsenal", "London", "UK"),
    ("Celtic", "Glasgow", "UK"),
];

const SPORTS: [&str; 3] = ["football", "hockey", "soccer"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let event_count: i64 = args
        .iter()
        .position(|a| a == "--events")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);

    let config = Config::from_env()?;

    println!("Seeding {} events", event_count);
    let pool = db::shared_pool(&config).await?;
    let repository = EventRepository::new(Arc::new(PgEventTable::new(pool.clone())));

    let mut rng = rand::thread_rng();
    let season_start = Utc::now();
    let start = Instant::now();
    let mut success_count = 0u64;

    for i in 0..event_count {
        let mut pair = TEAMS.choose_multiple(&mut rng, 2);
        let (Some(home), Some(away)) = (pair.next(), pair.next()) else {
            continue;
        };

        // Spread fixtures over a season, one hour apart at minimum
        let kickoff = season_start + Duration::hours(i) + Duration::minutes(rng.gen_range(0..60));
        let event = Event::new(home.0, kickoff.timestamp_millis())
            .with_event_id(i + 1)
            .with_sport(SPORTS[rng.gen_range(0..SPORTS.len())])
            .with_away_team(away.0)
            .with_city(home.1)
            .with_country(home.2);

        match repository.save_or_update_event(&event).await {
            Ok(()) => success_count += 1,
            Err(e) => eprintln!("Failed to save {}: {}", event.key(), e),
        }

        if (i + 1) % 1000 == 0 {
            println!("Saved {} events...", i + 1);
        }
    }

    let elapsed = start.elapsed();
    let rate = success_count as f64 / elapsed.as_secs_f64();

    println!("\n=== Seed Results ===");
    println!("Requested: {}", event_count);
    println!("Successful: {}", success_count);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} events/sec", rate);

    db::close_shared_pool().await;
    Ok(())
}
