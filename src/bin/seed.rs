//! Mock-data seeder.
//!
//! Signs up one throwaway account and inserts twenty random spending
//! locations with one to three random amounts each, for manual testing of
//! the dashboard and neighborhood views. Not part of the served application.

use dotenvy::dotenv;
use rand::Rng;
use spendscape::{
    config::database,
    core::{amount, location, user},
    errors::Result,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const NAME_PREFIXES: [&str; 26] = [
    "Acme", "Buster's", "Café", "Diner", "Eatery", "Fusion", "Grocery", "Hangout", "Ice Cream",
    "Jazz", "Kiosk", "Lounge", "Market", "Nook", "Outpost", "Pizzeria", "Quick Stop", "Restaurant",
    "Store", "Taco", "Uptown", "Village", "Waffle", "Xpress", "Yum", "Zest",
];

const LOCATION_COUNT: usize = 20;
const MAX_AMOUNT: f64 = 500.0;

fn random_location_name(rng: &mut impl Rng) -> String {
    let prefix = NAME_PREFIXES[rng.gen_range(0..NAME_PREFIXES.len())];
    format!("{prefix} {}", rng.gen_range(0..1000))
}

fn random_amount(rng: &mut impl Rng) -> f64 {
    (rng.r#gen::<f64>() * MAX_AMOUNT * 100.0).round() / 100.0
}

fn random_recent_date(rng: &mut impl Rng) -> String {
    let days_ago = rng.gen_range(0..30);
    (chrono::Utc::now() - chrono::Duration::days(days_ago))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv().ok();

    std::fs::create_dir_all("data").ok();
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;

    let email = format!("mockuser-{}@example.com", uuid::Uuid::new_v4());
    let password = "mockPassword123";

    info!("Inserting mock user...");
    let mock_user = user::create_user(
        &db,
        user::NewUser {
            email: email.clone(),
            first_name: "Mock".to_string(),
            last_name: "User".to_string(),
            bank: "Test Bank".to_string(),
            current_balance: 10_000.0,
            address: "123 Test Street, Test City, TS 12345".to_string(),
            password: password.to_string(),
        },
    )
    .await?;
    info!("Mock user created with id {}", mock_user.id);

    let mut rng = rand::thread_rng();
    let mut amount_count = 0usize;
    for _ in 0..LOCATION_COUNT {
        let name = random_location_name(&mut rng);
        let created = location::create_location(&db, &mock_user.id, &name, "Test").await?;

        for _ in 0..rng.gen_range(1..=3) {
            let value = random_amount(&mut rng);
            let date = random_recent_date(&mut rng);
            amount::create_amount(&db, &created.id, value, Some(date), None).await?;
            amount_count += 1;
        }
    }

    info!("Inserted {LOCATION_COUNT} mock locations with {amount_count} amounts.");
    info!("You can now sign in with:");
    info!("  email: {email}");
    info!("  password: {password}");

    Ok(())
}
