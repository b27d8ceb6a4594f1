//! Cart commands.
//!
//! Each command runs against an already opened [`CartStore`] and writes its
//! result to `out`. Mutations are persisted by the store itself.

use std::io::Write;

use fishmarket_cart::{CartStore, Storage};
use fishmarket_core::{LineItem, ProductId};

use crate::Command;

/// Execute one command.
///
/// # Errors
///
/// Returns an error if the input is rejected by the cart (invalid id,
/// quantity or price), checkout is attempted on an empty cart, or writing
/// the output fails.
pub fn run<S: Storage>(
    command: Command,
    store: &mut CartStore<S>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Add {
            id,
            species,
            form,
            price,
            quantity,
            seller,
            available,
        } => {
            let item = LineItem {
                id: ProductId::parse(&id)?,
                species,
                form,
                price,
                quantity,
                seller_name: seller,
                available_quantity: available,
            };
            store.add(item)?;
            if let Some(line) = store.get(&id) {
                writeln!(out, "{id}: quantity {}", line.quantity)?;
                if line.exceeds_available() {
                    writeln!(
                        out,
                        "note: exceeds seller availability ({})",
                        line.available_quantity
                    )?;
                }
            }
        }
        Command::Update { id, quantity } => {
            store.update_quantity(&id, quantity)?;
            match store.get(&id) {
                Some(line) => writeln!(out, "{id}: quantity {}", line.quantity)?,
                None => writeln!(out, "{id}: not in cart")?,
            }
        }
        Command::Remove { id } => {
            store.remove(&id);
            writeln!(out, "{id}: removed")?;
        }
        Command::Clear => {
            store.clear();
            writeln!(out, "cart cleared")?;
        }
        Command::Show { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(store.cart())?)?;
            } else {
                show_table(store, out)?;
            }
        }
        Command::Total => writeln!(out, "{}", store.total_price())?,
        Command::Checkout => {
            let summary = store.checkout()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        }
    }

    if !store.last_save_ok() {
        tracing::warn!("Cart changes were not saved and will be lost on exit");
    }
    Ok(())
}

fn show_table<S: Storage>(store: &CartStore<S>, out: &mut impl Write) -> std::io::Result<()> {
    if store.count() == 0 {
        return writeln!(out, "cart is empty");
    }

    writeln!(
        out,
        "{:<16} {:<20} {:<10} {:>10} {:>8}  SELLER",
        "ID", "SPECIES", "FORM", "PRICE", "QTY"
    )?;
    for item in store.items() {
        writeln!(
            out,
            "{:<16} {:<20} {:<10} {:>10} {:>8}  {}",
            item.id.as_str(),
            item.species,
            item.form,
            item.price,
            item.quantity,
            item.seller_name
        )?;
    }
    writeln!(out)?;
    writeln!(out, "items: {}", store.count())?;
    writeln!(out, "total: {}", store.total_price())
}
