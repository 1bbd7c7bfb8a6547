use crate::{Product, ProductId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total_cents(&self) -> u64 {
        self.product.price_cents.saturating_mul(u64::from(self.quantity))
    }
}

/// Shopping cart, ordered by first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from saved lines, merging repeated products and
    /// dropping zero quantities.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity > 0 {
                cart.add_quantity(line.product, line.quantity);
            }
        }
        cart
    }

    /// Adds one unit; an existing line is incremented instead of duplicated.
    pub fn add_item(&mut self, product: Product) {
        self.add_quantity(product, 1);
    }

    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product.id != id);
        self.lines.len() != before
    }

    /// Quantity 0 removes the line. Returns false for unknown ids.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }
        match self.lines.iter_mut().find(|line| &line.product.id == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines. Widened so saturated lines cannot overflow.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn subtotal_cents(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::line_total_cents)
            .fold(0, u64::saturating_add)
    }

    fn add_quantity(&mut self, product: Product, quantity: u32) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product, quantity }),
        }
    }
}
