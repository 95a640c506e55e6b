//! Basic authentication example.
//!
//! This example demonstrates how to authenticate against a CloudThing tenant
//! and list its applications and their clusters.
//!
//! Run with: cargo run --example basic_auth

use cloudthing_rs::models::Resource;
use cloudthing_rs::CloudThingClient;

#[tokio::main]
async fn main() -> cloudthing_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get the tenant host and credentials from environment variables
    let host = std::env::var("CLOUDTHING_HOST")
        .expect("CLOUDTHING_HOST environment variable required");
    let username = std::env::var("CLOUDTHING_USERNAME")
        .expect("CLOUDTHING_USERNAME environment variable required");
    let password = std::env::var("CLOUDTHING_PASSWORD")
        .expect("CLOUDTHING_PASSWORD environment variable required");

    println!("Connecting to {host}...");

    let client = CloudThingClient::new(&host)?;
    client.set_basic_auth(&username, &password).await?;

    println!(
        "Successfully authenticated for tenant {}",
        client.tenant_id().await.unwrap_or_default()
    );

    let tenant = client.tenant().get(None).await?;
    println!("Tenant: {} ({})", tenant.name, tenant.short_name);

    let applications = client.applications().list(None).await?;
    println!("\nFound {} application(s):", applications.params.size);

    for app in &applications.items {
        println!("  - {} [{}]", app.name, app.id());

        let clusters = client.clusters().list_by_application(app.id(), None).await?;
        for cluster in &clusters.items {
            println!("      cluster {} ({})", cluster.name, cluster.id());
        }
    }

    client.revoke_token().await?;
    println!("\nDone!");
    Ok(())
}
