//! Cart commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use farm_cache::Store;
use farm_commerce::cart::{CartState, CartStore};
use farm_commerce::catalog::{resolve_image_url, Product};
use farm_commerce::checkout::{default_address, Address};
use farm_commerce::ids::AddressId;
use farm_commerce::CommerceError;
use serde_json::{json, Map, Value};

use super::{AddArgs, CartArgs, CartCommand, OrderArgs};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    ctx.output.debug(&format!("Cart storage: {}", ctx.data_dir().display()));

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&cart, ctx),
        CartCommand::Add(add) => add_item(add, &mut cart, ctx),
        CartCommand::Remove { id } => {
            let present = cart.contains(id);
            cart.remove_item(id)?;
            if present {
                ctx.output.success(&format!("Removed product {}", id));
            } else {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
            print_summary(cart.state(), ctx);
            Ok(())
        }
        CartCommand::Update { id, quantity } => {
            if !cart.contains(id) {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
                print_summary(cart.state(), ctx);
                return Ok(());
            }
            cart.update_quantity(id, quantity)?;
            if quantity <= 0 {
                ctx.output.success(&format!("Removed product {}", id));
            } else {
                ctx.output
                    .success(&format!("Set product {} quantity to {}", id, quantity));
            }
            print_summary(cart.state(), ctx);
            Ok(())
        }
        CartCommand::Clear { yes } => clear_cart(yes, &mut cart, ctx),
        CartCommand::Order(order) => order_request(order, &cart, ctx),
    }
}

fn show_cart<S: Store>(cart: &CartStore<S>, ctx: &Context) -> Result<()> {
    let base_url = &ctx.config.api.base_url;

    if ctx.output.is_json() {
        let items: Vec<Value> = cart
            .entries()
            .iter()
            .map(|entry| {
                json!({
                    "product": entry.product,
                    "quantity": entry.quantity,
                    "line_total": entry.line_total().to_decimal(),
                    "image": resolve_image_url(&entry.product.image_url, base_url),
                })
            })
            .collect();
        ctx.output.json(&json!({
            "items": items,
            "total_items": cart.total_items(),
            "total_price": cart.total_price().to_decimal(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [6, 28, 6, 16, 16];
    ctx.output
        .table_row(&["ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for entry in cart.entries() {
        let id = entry.product.id.to_string();
        let quantity = entry.quantity.to_string();
        let price = entry.product.price.display();
        let subtotal = entry.line_total().display();
        ctx.output.table_row(
            &[&id, &entry.product.name, &quantity, &price, &subtotal],
            &widths,
        );
    }

    if ctx.output.is_verbose() {
        ctx.output.header("Details");
        for entry in cart.entries() {
            let product = &entry.product;
            ctx.output.list_item(&format!("{} ({})", product.name, stock_badge(product.stock)));
            if !product.farmer_name.is_empty() {
                ctx.output.kv("farmer", &product.farmer_name);
            }
            if !product.category.is_empty() {
                ctx.output.kv("category", &product.category);
            }
            let image = resolve_image_url(&product.image_url, base_url);
            if !image.is_empty() {
                ctx.output.kv("image", &image);
            }
        }
    }

    print_summary(cart.state(), ctx);
    Ok(())
}

fn add_item<S: Store>(args: AddArgs, cart: &mut CartStore<S>, ctx: &Context) -> Result<()> {
    let record = match args.record.as_deref() {
        Some(raw) => serde_json::from_str(raw).context("Invalid product record JSON")?,
        None => record_from_flags(&args),
    };

    let product = Product::from_raw(&record)?;
    let product_id = product.id;
    cart.add_item(product, args.quantity)?;

    // An existing entry keeps its record, so report what is stored.
    if let Some(entry) = cart.get(product_id) {
        ctx.output.success(&format!(
            "Added {} x {} (now {} in cart)",
            args.quantity, entry.product.name, entry.quantity
        ));
    }

    print_summary(cart.state(), ctx);
    Ok(())
}

/// Build a `snake_case` product record from the add flags.
fn record_from_flags(args: &AddArgs) -> Value {
    let mut record = Map::new();
    if let Some(id) = args.id {
        record.insert("id".into(), json!(id));
    }
    if let Some(price) = args.price {
        record.insert("price".into(), json!(price));
    }
    if let Some(name) = &args.name {
        record.insert("name".into(), json!(name));
    }
    if let Some(category) = &args.category {
        record.insert("category".into(), json!(category));
    }
    if let Some(image_url) = &args.image_url {
        record.insert("image_url".into(), json!(image_url));
    }
    Value::Object(record)
}

fn clear_cart<S: Store>(yes: bool, cart: &mut CartStore<S>, ctx: &Context) -> Result<()> {
    if !cart.is_empty() && !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", cart.total_items()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    cart.clear()?;
    ctx.output.success("Cart cleared");
    print_summary(cart.state(), ctx);
    Ok(())
}

fn order_request<S: Store>(args: OrderArgs, cart: &CartStore<S>, ctx: &Context) -> Result<()> {
    let address_id = match (args.address_id, &args.addresses) {
        (Some(id), _) => Some(id),
        (None, Some(path)) => pick_default_address(path, ctx)?,
        (None, None) => None,
    };

    let request = match cart.to_order_request(address_id) {
        Ok(request) => request,
        Err(CommerceError::EmptyCart) => bail!("Cannot create an order from an empty cart"),
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&request);
        return Ok(());
    }

    ctx.output.header("Order Request");
    ctx.output.kv("lines", &request.items.len().to_string());
    ctx.output.kv("units", &request.total_quantity().to_string());
    match request.address_id {
        Some(id) => ctx.output.kv("address_id", &id.to_string()),
        None => ctx.output.kv("address_id", "(account default)"),
    }
    ctx.output.blank();
    ctx.output.json(&request);
    Ok(())
}

fn pick_default_address(path: &Path, ctx: &Context) -> Result<Option<AddressId>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read addresses: {}", path.display()))?;
    let raw: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse addresses: {}", path.display()))?;

    let Value::Array(records) = raw else {
        bail!("Addresses file must contain a JSON array");
    };

    let mut addresses = Vec::with_capacity(records.len());
    for record in &records {
        match Address::from_raw(record) {
            Ok(address) => addresses.push(address),
            Err(e) => ctx.output.warn(&format!("Skipping address: {}", e)),
        }
    }

    let chosen = default_address(&addresses);
    if let Some(address) = chosen {
        ctx.output.info(&format!("Delivering to {}", address.one_line()));
    }
    Ok(chosen.map(|a| a.id))
}

fn print_summary(state: &CartState, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "entries": state.len(),
            "total_items": state.total_items(),
            "total_price": state.total_price().to_decimal(),
        }));
        return;
    }

    ctx.output.blank();
    ctx.output.kv("items", &state.total_items().to_string());
    ctx.output.kv("total", &state.total_price().display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::AddArgs;

    fn flags() -> AddArgs {
        AddArgs {
            id: Some(4),
            name: Some("Shallots".into()),
            price: Some(3500.0),
            category: None,
            image_url: Some("shallots.png".into()),
            record: None,
            quantity: 1,
        }
    }

    #[test]
    fn test_record_from_flags() {
        let record = record_from_flags(&flags());
        assert_eq!(
            record,
            json!({"id": 4, "name": "Shallots", "price": 3500.0, "image_url": "shallots.png"})
        );

        let product = Product::from_raw(&record).unwrap();
        assert_eq!(product.name, "Shallots");
        assert_eq!(product.price.amount_minor, 350_000);
    }
}
