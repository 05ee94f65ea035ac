//! Basic usage example for tailorfind-rs
//!
//! This example demonstrates how to:
//! - Run the filter engine directly on a record set
//! - Toggle distance filters
//! - Drive a directory screen with two concurrent sources

use std::sync::Arc;
use std::time::Duration;
use tailorfind_rs::prelude::*;

fn sample_records() -> Vec<ProviderRecord> {
    let mut savile = ProviderRecord::new("t-1", "Savile Row Bespoke").with_location(51.5107, -0.1406);
    savile.address_line1 = Some("12 Savile Row".into());
    savile.city = Some("London".into());

    let mut hackney = ProviderRecord::new("t-2", "Hackney Alterations").with_location(51.545, -0.0553);
    hackney.phone = Some("020 7946 0018".into());

    let mut nowhere = ProviderRecord::new("t-3", "Mobile Stitch Van");
    nowhere.has_location = true;

    let leeds = ProviderRecord::new("t-4", "Leeds Tailoring Co").with_location(53.7997, -1.5492);

    vec![leeds, nowhere, hackney, savile]
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== tailorfind-rs Basic Usage Example ===\n");

    // Example 1: The engine on its own
    println!("--- Example 1: Name search without location ---");
    let records = RecordState::loaded(sample_records());
    let out = derive(&records, "st", None, &LocationState::Idle);
    for row in &out.rows {
        println!("- {}", row.record.name);
    }
    println!();

    // Example 2: Distances and a radius filter
    println!("--- Example 2: Within 5 km of Piccadilly Circus ---");
    let here = LocationState::Fixed(LocationSnapshot::new(51.5101, -0.1342));
    let catalog = FilterCatalog::default();
    let mut selection = FilterSelection::none();
    selection.toggle_id(&catalog, "within-5km");
    let out = derive(&records, "", selection.active(), &here);
    for row in &out.rows {
        println!("- {} ({:.2} km)", row.record.name, row.distance_km.unwrap_or_default());
    }
    println!();

    // Example 3: Same filter, location denied
    println!("--- Example 3: Filter active, location denied ---");
    let out = derive(&records, "", selection.active(), &LocationState::Denied);
    println!("{} rows: {}", out.rows.len(), out.message().unwrap_or_default());
    println!();

    // Example 4: A full screen activation
    println!("--- Example 4: Directory screen ---");
    let mut screen = DirectoryScreen::activate(
        Arc::new(StaticRecordProvider::new(sample_records()).with_delay(Duration::from_millis(50))),
        Arc::new(StaticLocationProvider::granted(LocationSnapshot::new(51.5101, -0.1342))),
    );
    screen.toggle_filter("within-10km");
    println!("Before sources settle: {:?}", screen.outcome().status);
    let out = screen.settled().await;
    for row in &out.rows {
        println!("- {} ({:.2} km)", row.record.name, row.distance_km.unwrap_or_default());
    }

    Ok(())
}
