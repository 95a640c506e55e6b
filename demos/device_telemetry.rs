//! Write and read back telemetry of a device.
//!
//! Run with: cargo run --example device_telemetry -- <device-id>

use chrono::{Duration, Utc};
use cloudthing_rs::models::{DataPoint, EventPoint, TelemetryOwner};
use cloudthing_rs::{CloudThingClient, RequestOptions, TimeRange};

#[tokio::main]
async fn main() -> cloudthing_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let host = std::env::var("CLOUDTHING_HOST").expect("CLOUDTHING_HOST required");
    let username = std::env::var("CLOUDTHING_USERNAME").expect("CLOUDTHING_USERNAME required");
    let password = std::env::var("CLOUDTHING_PASSWORD").expect("CLOUDTHING_PASSWORD required");
    let device_id = std::env::args().nth(1).expect("usage: device_telemetry <device-id>");

    let client = CloudThingClient::new(&host)?;
    client.set_basic_auth(&username, &password).await?;

    let device = client.devices().get_by_id(&device_id, None).await?;
    let telemetry = client.telemetry();
    let now = Utc::now();

    telemetry
        .write_data(
            &device,
            &[
                DataPoint::new("temperature", now, 21.5),
                DataPoint::new("humidity", now, 40),
            ],
        )
        .await?;
    telemetry
        .write_events(
            &device,
            &[EventPoint::new("door", now, serde_json::json!({ "open": true }))],
        )
        .await?;

    let window = RequestOptions::new()
        .paginate(1, 100)
        .time_range(TimeRange::between(now - Duration::hours(1), now + Duration::minutes(1)));

    let data = telemetry.data(&device, Some(window.clone())).await?;
    println!("=== Data ({} samples) ===", data.params.size);
    for point in &data.items {
        println!("{}  {:<12} {}", point.time, point.key.as_deref().unwrap_or("-"), point.value);
    }

    // Key-scoped series have their own link
    let temperature = telemetry
        .list_by_link::<DataPoint>(&device.data_key_link("temperature"), Some(window.clone()))
        .await?;
    println!("\ntemperature only: {} samples", temperature.items.len());

    let events = telemetry.events(&device, Some(window)).await?;
    println!("\n=== Events ({}) ===", events.params.size);
    for event in &events.items {
        println!("{}  {}", event.time, event.payload);
    }

    Ok(())
}
