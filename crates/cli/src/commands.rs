//! CLI command implementations over the engine facade.

use grindctrl_engine::state::AddToCartOptions;
use grindctrl_engine::{EngineConfig, Session, ShippingForm};

/// Print the catalog the engine would load with the current configuration.
pub fn catalog() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let session = Session::new(&config);
    let catalog = session.state().catalog();

    println!(
        "{} products in {} categories",
        catalog.products.len(),
        catalog.categories.len()
    );
    for product in &catalog.products {
        println!(
            "  {}  {}  {}  {}",
            product.id,
            product.name,
            product.price.display(),
            if product.in_stock { "in stock" } else { "out of stock" },
        );
    }
    Ok(())
}

/// List the persisted order history, optionally filtered by contact details.
pub fn orders(
    phone: Option<String>,
    email: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let session = Session::new(&config);

    let listed: Vec<_> = if phone.is_some() || email.is_some() {
        session.lookup_orders(phone.as_deref(), email.as_deref())
    } else {
        session.history().orders().iter().collect()
    };

    if listed.is_empty() {
        println!("no orders recorded");
        return Ok(());
    }
    for order in listed {
        println!(
            "{}  {}  {} EGP  {}  {}",
            order.order_id, order.date, order.total, order.status, order.product,
        );
    }
    Ok(())
}

/// Add the first catalog product to the cart and drive a full checkout.
///
/// With no webhook configured this exercises the simulated-delivery path;
/// with one configured it sends the real payload.
pub async fn checkout(
    email: &str,
    phone: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let mut session = Session::new(&config);

    let product_id = session
        .state()
        .catalog()
        .products
        .first()
        .map(|p| p.id.clone())
        .ok_or("catalog is empty")?;

    session.state_mut().add_to_cart(
        &product_id,
        AddToCartOptions {
            quantity,
            size: None,
            color: None,
        },
    )?;
    tracing::info!(
        total = %session.state().cart_total(),
        count = session.state().cart_count(),
        "cart ready"
    );

    session.state_mut().open_checkout()?;
    session.state_mut().submit_shipping(&ShippingForm {
        first_name: "Smoke".to_string(),
        last_name: "Test".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: "1 Test Street".to_string(),
        city: "Cairo".to_string(),
        postal_code: "11511".to_string(),
        note: "CLI smoke test order".to_string(),
    })?;
    session.state_mut().submit_payment(None)?;

    let order = session.place_order().await?;
    println!("{}", serde_json::to_string_pretty(&order)?);
    Ok(())
}
