use regex::Regex;
use std::fmt;

/// A payload slot that is either a validated value or explicitly left alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Set(T),
    Unset,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<T> Field<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Field::Set(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Field::Set(v) => Some(v),
            Field::Unset => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Set(v),
            None => Field::Unset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketType {
    Vip,
    Usual,
    Budgetary,
    Cheap,
}

impl TicketType {
    pub const ALL: [TicketType; 4] = [
        TicketType::Vip,
        TicketType::Usual,
        TicketType::Budgetary,
        TicketType::Cheap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Vip => "VIP",
            TicketType::Usual => "USUAL",
            TicketType::Budgetary => "BUDGETARY",
            TicketType::Cheap => "CHEAP",
        }
    }

    pub fn listing() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub height: f64,
    pub passport_id: String,
}

/// Ticket fields attached to `add`/`update`-style requests.
///
/// Create mode fills every field; update mode leaves declined fields
/// [`Field::Unset`] so the collection store keeps their current values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TicketPayload {
    pub name: Field<String>,
    pub coordinates: Field<Coordinates>,
    pub price: Field<f64>,
    pub ticket_type: Field<TicketType>,
    pub person: Field<Person>,
    pub discount: Field<i64>,
}

impl TicketPayload {
    pub fn is_complete(&self) -> bool {
        self.name.is_set()
            && self.coordinates.is_set()
            && self.price.is_set()
            && self.ticket_type.is_set()
            && self.person.is_set()
            && self.discount.is_set()
    }

    pub fn set_count(&self) -> usize {
        [
            self.name.is_set(),
            self.coordinates.is_set(),
            self.price.is_set(),
            self.ticket_type.is_set(),
            self.person.is_set(),
            self.discount.is_set(),
        ]
        .iter()
        .filter(|s| **s)
        .count()
    }
}

pub const MIN_X: f64 = -500.0;
pub const MAX_Y: i64 = 500;
pub const MAX_DISCOUNT: i64 = 100;

pub fn parse_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    Ok(name.to_string())
}

pub fn parse_x(raw: &str) -> Result<f64, String> {
    let x = parse_finite(raw, "x")?;
    if x <= MIN_X {
        return Err(format!("x must be greater than {}", MIN_X));
    }
    Ok(x)
}

pub fn parse_y(raw: &str) -> Result<i64, String> {
    let y = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("y must be an integer, got '{}'", raw.trim()))?;
    if y > MAX_Y {
        return Err(format!("y must not exceed {}", MAX_Y));
    }
    Ok(y)
}

pub fn parse_price(raw: &str) -> Result<f64, String> {
    let price = parse_finite(raw, "price")?;
    if price <= 0.0 {
        return Err("price must be greater than 0".to_string());
    }
    Ok(price)
}

pub fn parse_ticket_type(raw: &str) -> Result<TicketType, String> {
    let wanted = raw.trim();
    TicketType::ALL
        .iter()
        .copied()
        .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            format!(
                "unknown ticket type '{}', expected one of: {}",
                wanted,
                TicketType::listing()
            )
        })
}

pub fn parse_height(raw: &str) -> Result<f64, String> {
    let height = parse_finite(raw, "height")?;
    if height <= 0.0 {
        return Err("height must be greater than 0".to_string());
    }
    Ok(height)
}

pub fn parse_passport_id(raw: &str) -> Result<String, String> {
    let id = raw.trim();
    let valid = Regex::new(r"^[A-Za-z0-9]{7,50}$")
        .ok()
        .map(|re| re.is_match(id))
        .unwrap_or(false);
    if !valid {
        return Err("passport id must be 7 to 50 letters or digits".to_string());
    }
    Ok(id.to_string())
}

pub fn parse_discount(raw: &str) -> Result<i64, String> {
    let discount = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("discount must be an integer, got '{}'", raw.trim()))?;
    if !(1..=MAX_DISCOUNT).contains(&discount) {
        return Err(format!("discount must be between 1 and {}", MAX_DISCOUNT));
    }
    Ok(discount)
}

fn parse_finite(raw: &str, what: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("{} must be a number, got '{}'", what, trimmed)),
    }
}
