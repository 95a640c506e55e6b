//! Expand relations, edit a resource and save it back.
//!
//! Run with: cargo run --example expand_and_save -- <cluster-id>

use cloudthing_rs::models::Resource;
use cloudthing_rs::{CloudThingClient, RequestOptions};

#[tokio::main]
async fn main() -> cloudthing_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let host = std::env::var("CLOUDTHING_HOST").expect("CLOUDTHING_HOST required");
    let username = std::env::var("CLOUDTHING_USERNAME").expect("CLOUDTHING_USERNAME required");
    let password = std::env::var("CLOUDTHING_PASSWORD").expect("CLOUDTHING_PASSWORD required");
    let cluster_id = std::env::args().nth(1).expect("usage: expand_and_save <cluster-id>");

    let client = CloudThingClient::new(&host)?;
    client.set_basic_auth(&username, &password).await?;

    // 1. Fetch the cluster with its application and first 50 devices embedded
    let options = RequestOptions::new()
        .expand("application")
        .expand_paged("devices", 1, 50);
    let mut cluster = client.clusters().get_by_id(&cluster_id, Some(options)).await?;

    println!("=== Cluster {} ===", cluster.id());
    if let Some(app) = cluster.application.get() {
        println!("Application:  {}", app.name);
    }
    for device in cluster.devices.get().into_iter().flatten() {
        println!("Device:       {} (activated: {:?})", device.id(), device.activated);
    }

    // 2. Follow a relation that was not expanded
    let (expanded, href) = cluster.tenant.link();
    println!("Tenant link:  {href} (expanded: {expanded})");
    let tenant = client.tenant().resolve(&cluster.tenant).await?;
    println!("Tenant name:  {}", tenant.name);

    // 3. Edit and save; the embedded devices survive the round trip
    cluster.description = format!("edited at {}", chrono::Utc::now());
    cluster.save().await?;
    println!(
        "\nSaved. Devices still expanded: {}",
        cluster.devices.is_expanded()
    );

    Ok(())
}
