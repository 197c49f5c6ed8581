//! Cart operations on the file-backed cart.
//!
//! The cart lives in `$MERCADO_CART_DIR/storage.json` under the same key a
//! browser would use, so the file can be inspected or shared.

use mercado_core::{Cart, ProductId};
use mercado_storefront::{ClientConfig, FileStorage, cart};

fn open() -> Result<Cart<FileStorage>, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    Ok(Cart::new(FileStorage::in_dir(&config.cart_dir)))
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the cart file cannot be written.
pub fn add(id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let count = open()?.add(id)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Producto agregado al carrito ({count})");
    }
    Ok(())
}

/// Remove every unit of a product.
///
/// # Errors
///
/// Returns an error if the cart file cannot be written.
pub fn remove(id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let count = open()?.remove(id)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{count}");
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart file cannot be written.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    open()?.clear()?;

    #[allow(clippy::print_stdout)]
    {
        println!("0");
    }
    Ok(())
}

/// Print the badge count.
///
/// # Errors
///
/// Returns an error if configuration is invalid.
pub fn count() -> Result<(), Box<dyn std::error::Error>> {
    let count = open()?.count();

    #[allow(clippy::print_stdout)]
    {
        println!("{count}");
    }
    Ok(())
}

/// Resolve and print the cart.
///
/// # Errors
///
/// Returns an error if configuration is invalid or rendering fails.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let cart = open()?;
    let html = cart::render_cart(&cart, &super::client()?).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{html}");
    }
    Ok(())
}

/// Simulated checkout.
///
/// # Errors
///
/// Returns an error if the cart cannot be cleared or rendering fails.
pub async fn checkout() -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = open()?;
    let html = cart::checkout(&mut cart, &super::client()?).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Compra simulada finalizada. Carrito vacío.");
        println!("{html}");
    }
    Ok(())
}
