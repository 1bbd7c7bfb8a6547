use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use storefront_core::{CartLine, Product, ProductId};
use storefront_engine::AtomicFileWriter;
use storefront_logging::{store_error, store_info, store_warn};

const CART_FILENAME: &str = ".storefront_cart.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedLine {
    id: String,
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    price_cents: u64,
    quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedCart {
    lines: Vec<PersistedLine>,
}

/// Reads the saved cart. Missing or unreadable files give an empty cart.
pub(crate) fn load_cart(state_dir: &Path) -> Vec<CartLine> {
    let path = state_dir.join(CART_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Vec::new();
        }
        Err(err) => {
            store_warn!("Failed to read saved cart from {:?}: {}", path, err);
            return Vec::new();
        }
    };

    let cart: PersistedCart = match ron::from_str(&content) {
        Ok(cart) => cart,
        Err(err) => {
            store_warn!("Failed to parse saved cart from {:?}: {}", path, err);
            return Vec::new();
        }
    };

    let lines: Vec<CartLine> = cart
        .lines
        .into_iter()
        .map(|line| CartLine {
            product: Product {
                id: ProductId::new(line.id),
                name: line.name,
                category: line.category,
                image_url: line.image_url,
                description: line.description,
                price_cents: line.price_cents,
            },
            quantity: line.quantity,
        })
        .collect();

    store_info!("Loaded {} cart line(s) from {:?}", lines.len(), path);
    lines
}

pub(crate) fn save_cart(state_dir: &Path, lines: &[CartLine]) {
    let cart = PersistedCart {
        lines: lines
            .iter()
            .map(|line| PersistedLine {
                id: line.product.id.as_str().to_string(),
                name: line.product.name.clone(),
                category: line.product.category.clone(),
                image_url: line.product.image_url.clone(),
                description: line.product.description.clone(),
                price_cents: line.product.price_cents,
                quantity: line.quantity,
            })
            .collect(),
    };

    let content = match ron::ser::to_string_pretty(&cart, ron::ser::PrettyConfig::new()) {
        Ok(text) => text,
        Err(err) => {
            store_error!("Failed to serialize cart: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(state_dir);
    if let Err(err) = writer.write(CART_FILENAME, &content) {
        store_error!("Failed to save cart to {:?}: {}", state_dir, err);
    }
}
