use storefront_core::{
    Category, Msg, PaymentMethod, ProductId, ShippingField, SortKey, ALL_CATEGORIES,
};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  search <text>        run a new search          type <text>     edit search box only
  category <slug|all>  filter by category        sort <key>      relevance|priceAsc|priceDesc|newest
  browse <slug>        open a category listing   categories      list category slugs
  price <min> <max>    commit price range        drag <min> <max> move the slider without searching
  more                 load the next page        retry           retry the failed page
  open | close         open or close the results view
  add <n>              add result n to the cart  remove <id>     remove a cart line
  qty <id> <n>         set quantity              clear           empty the cart
  next | back          move through checkout     restart         start checkout over
  ship <field> <text>  name|phone|email|address|country
  pay <cash|card>      choose payment method     paynow          place the order
  dismiss              hide the last alert       help | quit";

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    /// Reopen the results view with the last committed criteria.
    Open,
    Help,
    Categories,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let dispatch = |msg: Msg| -> Result<Option<Command>, CommandError> {
        Ok(Some(Command::Dispatch(vec![msg])))
    };
    match word.to_ascii_lowercase().as_str() {
        "search" => Ok(Some(Command::Dispatch(vec![
            Msg::QueryEdited(rest.to_string()),
            Msg::QuerySubmitted,
        ]))),
        "type" => dispatch(Msg::QueryEdited(rest.to_string())),
        "category" if rest.is_empty() || rest.eq_ignore_ascii_case(ALL_CATEGORIES) => {
            dispatch(Msg::CategoryChanged(ALL_CATEGORIES.to_string()))
        }
        "category" => match Category::parse(rest) {
            Some(category) => dispatch(Msg::CategoryChanged(category.as_wire().to_string())),
            None => Err(CommandError::Usage("category <slug>|all; `categories` lists slugs")),
        },
        "browse" => match Category::from_slug(rest) {
            Some(category) => dispatch(Msg::CategoryBrowsed(category)),
            None => Err(CommandError::Usage("browse <slug>; `categories` lists slugs")),
        },
        "categories" => Ok(Some(Command::Categories)),
        "sort" => match SortKey::parse(rest) {
            Some(key) => dispatch(Msg::SortChanged(key)),
            None => Err(CommandError::Usage("sort relevance|priceAsc|priceDesc|newest")),
        },
        "price" => {
            let (min, max) = two_numbers(rest).ok_or(CommandError::Usage("price <min> <max>"))?;
            dispatch(Msg::PriceRangeCommitted { min, max })
        }
        "drag" => {
            let (min, max) = two_numbers(rest).ok_or(CommandError::Usage("drag <min> <max>"))?;
            dispatch(Msg::PriceRangeDragged { min, max })
        }
        "more" => dispatch(Msg::LoadMoreRequested),
        "retry" => dispatch(Msg::RetryRequested),
        "open" => Ok(Some(Command::Open)),
        "close" => dispatch(Msg::ViewClosed),
        "add" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => dispatch(Msg::AddResultToCart { index: n - 1 }),
            _ => Err(CommandError::Usage("add <result number>")),
        },
        "remove" if !rest.is_empty() => dispatch(Msg::RemoveFromCart(ProductId::new(rest))),
        "remove" => Err(CommandError::Usage("remove <product id>")),
        "qty" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next().map(str::parse::<u32>), parts.next()) {
                (Some(id), Some(Ok(quantity)), None) => dispatch(Msg::CartQuantityChanged {
                    id: ProductId::new(id),
                    quantity,
                }),
                _ => Err(CommandError::Usage("qty <product id> <quantity>")),
            }
        }
        "clear" => dispatch(Msg::CartCleared),
        "next" => dispatch(Msg::CheckoutNext),
        "back" => dispatch(Msg::CheckoutBack),
        "restart" => dispatch(Msg::CheckoutRestarted),
        "ship" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match ShippingField::parse(field) {
                Some(field) => dispatch(Msg::ShippingEdited {
                    field,
                    value: value.trim().to_string(),
                }),
                None => Err(CommandError::Usage(
                    "ship name|phone|email|address|country <value>",
                )),
            }
        }
        "pay" => match PaymentMethod::parse(rest) {
            Some(method) => dispatch(Msg::PaymentMethodSelected(method)),
            None => Err(CommandError::Usage("pay cash|card")),
        },
        "paynow" => dispatch(Msg::PayNowClicked),
        "dismiss" => dispatch(Msg::AlertDismissed),
        "help" | "?" => Ok(Some(Command::Help)),
        "quit" | "exit" => Ok(Some(Command::Quit)),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}

/// One line per category: slug, display name and API value.
pub fn category_list() -> String {
    Category::ALL
        .into_iter()
        .map(|category| {
            format!(
                "  {:<14} {:<14} {}",
                category.slug(),
                category.display_name(),
                category.as_wire()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn two_numbers(raw: &str) -> Option<(u32, u32)> {
    let mut parts = raw.split_whitespace().map(str::parse::<u32>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(a)), Some(Ok(b)), None) => Some((a, b)),
        _ => None,
    }
}
