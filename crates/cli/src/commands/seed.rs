//! Seed the remote store with demo products.

use rust_decimal::Decimal;
use tracing::info;

use fresh_harvest_admin::config::SupabaseAdminConfig;
use fresh_harvest_admin::supabase::AdminClient;
use fresh_harvest_core::product::NewProduct;

/// The demo product set.
fn demo_products() -> Vec<NewProduct> {
    fn p(name: &str, cents: i64, category: &str, unit: &str, image: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            category: category.to_string(),
            unit: unit.to_string(),
            image: image.to_string(),
        }
    }

    vec![
        p("Organic Apples", 350, "Fruits", "1 kg", "https://images.example/apples.jpg"),
        p("Bananas", 120, "Fruits", "1 dozen", "https://images.example/bananas.jpg"),
        p("Baby Spinach", 250, "Vegetables", "250 g", "https://images.example/spinach.jpg"),
        p("Heirloom Tomatoes", 420, "Vegetables", "1 kg", "https://images.example/tomatoes.jpg"),
        p("Free-Range Eggs", 480, "Dairy & Eggs", "1 dozen", "https://images.example/eggs.jpg"),
        p("Whole Milk", 310, "Dairy & Eggs", "1 l", "https://images.example/milk.jpg"),
        p("Sourdough Loaf", 550, "Bakery", "800 g", "https://images.example/sourdough.jpg"),
        p("Wildflower Honey", 890, "Pantry", "500 g", "https://images.example/honey.jpg"),
    ]
}

/// Insert the demo products into the remote `products` table.
///
/// # Errors
///
/// Returns an error if environment variables are missing or any insert
/// fails. Inserts are sequential; a failure stops the run with the
/// earlier products already in place.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = SupabaseAdminConfig::from_env()?;
    let client = AdminClient::new(&config)?;

    let products = demo_products();
    info!(count = products.len(), "Seeding products");

    for product in &products {
        client.insert_product(product).await?;
        info!(name = %product.name, "Inserted product");
    }

    info!("Seeding complete");
    Ok(())
}
