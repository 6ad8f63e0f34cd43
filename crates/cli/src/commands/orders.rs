//! Print recent orders from the remote store.

#![allow(clippy::print_stdout)] // table output is the command's purpose

use fresh_harvest_admin::config::SupabaseAdminConfig;
use fresh_harvest_admin::mirror::compute_stats;
use fresh_harvest_admin::supabase::AdminClient;

/// Print the most recent orders with status and total.
///
/// # Errors
///
/// Returns an error if environment variables are missing or the remote
/// list fails.
pub async fn list(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = SupabaseAdminConfig::from_env()?;
    let client = AdminClient::new(&config)?;

    let orders = client.list_orders().await?;
    let stats = compute_stats(&orders);

    println!(
        "{} orders, {} pending, revenue ${} (excl. cancelled)",
        stats.total_orders, stats.pending_orders, stats.total_revenue
    );
    println!();

    for order in orders.iter().take(limit) {
        let note = order.note.as_deref().unwrap_or("-");
        println!(
            "#{:<6} {:<20} {:<10} ${:<8} {:<10} {}",
            order.id,
            order.customer_name,
            order.status,
            order.total_amount,
            order.created_at.format("%Y-%m-%d"),
            note
        );
    }

    Ok(())
}
