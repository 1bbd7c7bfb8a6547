use crate::{Cart, ProductId};

pub const MISSING_SHIPPING_FIELDS: &str = "Please fill in your name, phone and address.";
pub const DEFAULT_COUNTRY: &str = "Cambodia";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStep {
    #[default]
    Cart,
    Shipping,
    Payment,
}

impl CheckoutStep {
    fn next(self) -> Self {
        match self {
            CheckoutStep::Cart => CheckoutStep::Shipping,
            CheckoutStep::Shipping | CheckoutStep::Payment => CheckoutStep::Payment,
        }
    }

    fn previous(self) -> Self {
        match self {
            CheckoutStep::Cart | CheckoutStep::Shipping => CheckoutStep::Cart,
            CheckoutStep::Payment => CheckoutStep::Shipping,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingField {
    Name,
    Phone,
    Email,
    Address,
    Country,
}

impl ShippingField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(ShippingField::Name),
            "phone" => Some(ShippingField::Phone),
            "email" => Some(ShippingField::Email),
            "address" => Some(ShippingField::Address),
            "country" => Some(ShippingField::Country),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ShippingInfo {
    pub fn set(&mut self, field: ShippingField, value: String) {
        let slot = match field {
            ShippingField::Name => &mut self.name,
            ShippingField::Phone => &mut self.phone,
            ShippingField::Email => &mut self.email,
            ShippingField::Address => &mut self.address,
            ShippingField::Country => &mut self.country,
        };
        *slot = value;
    }

    /// Name, phone and address must be non-blank.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.phone, &self.address]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_wire(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload of the single order-submission call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderInput {
    pub shipping: ShippingInfo,
    pub items: Vec<OrderItem>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub is_success: bool,
    pub message: Option<String>,
}

/// Linear Cart -> Shipping -> Payment wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    shipping: ShippingInfo,
    payment_method: PaymentMethod,
    submitting: bool,
    validation_error: Option<String>,
    completed: bool,
}

impl CheckoutWizard {
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advances one step; leaving Shipping requires the mandatory fields.
    pub fn next(&mut self) -> bool {
        if self.step == CheckoutStep::Shipping && !self.shipping.is_complete() {
            self.validation_error = Some(MISSING_SHIPPING_FIELDS.to_string());
            return false;
        }
        self.validation_error = None;
        let next = self.step.next();
        let moved = next != self.step;
        self.step = next;
        moved
    }

    pub fn back(&mut self) -> bool {
        self.validation_error = None;
        let previous = self.step.previous();
        let moved = previous != self.step;
        self.step = previous;
        moved
    }

    pub fn edit_shipping(&mut self, field: ShippingField, value: String) {
        self.shipping.set(field, value);
    }

    pub fn select_payment(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Builds the order and marks the wizard as submitting. `None` when not on
    /// the payment step, already submitting, or the cart is empty.
    pub fn begin_submit(&mut self, cart: &Cart) -> Option<OrderInput> {
        if self.step != CheckoutStep::Payment || self.submitting || cart.is_empty() {
            return None;
        }
        self.validation_error = None;
        self.submitting = true;
        Some(OrderInput {
            shipping: self.shipping.clone(),
            items: cart
                .lines()
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product.id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            payment_method: self.payment_method,
        })
    }

    pub fn finish_submit(&mut self, success: bool) {
        self.submitting = false;
        if success {
            self.completed = true;
        }
    }

    /// Starts a fresh checkout, keeping the shipping details.
    pub fn restart(&mut self) {
        self.step = CheckoutStep::Cart;
        self.submitting = false;
        self.validation_error = None;
        self.completed = false;
    }
}
