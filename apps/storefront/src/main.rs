//! # Storefront Entry Point
//!
//! Drives the store once against the configured catalog and logs what a
//! shopper would see.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (file, then `STOREFRONT_*` environment)
//! 3. Build the store (HTTP catalog, notifier)
//! 4. Fetch the catalog and log its categories
//! 5. Add the first product to the cart and log the totals
//!
//! Only configuration and wiring failures exit non-zero. A failed catalog
//! fetch is reported the way the store reports it and the run still ends
//! cleanly.

use std::process::ExitCode;

use storefront_app::{build_store, init_tracing, AppResult};
use storefront_catalog::StorefrontConfig;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Storefront failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    info!("Starting storefront");

    let config = StorefrontConfig::load(None)?;
    let store = build_store(&config)?;

    let snapshot = store.fetch_products().await;
    if let Some(message) = &snapshot.error {
        warn!(%message, "Catalog unavailable");
        return Ok(());
    }
    info!(
        products = snapshot.products.len(),
        categories = ?snapshot.categories(),
        "Catalog loaded"
    );

    let Some(first) = snapshot.products.first() else {
        info!("Catalog is empty, nothing to add");
        return Ok(());
    };
    store.add_to_cart(first, 1, None, None);

    let totals = store.cart_totals();
    info!(
        lines = totals.item_count,
        quantity = totals.total_quantity,
        total = %totals.total,
        "Cart totals"
    );
    Ok(())
}
