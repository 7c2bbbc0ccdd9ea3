//! Value objects and custom validation rules shared by request bodies.

use std::borrow::Cow;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::ValidationError;

/// SKU (Stock Keeping Unit) value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    pub const MAX_LEN: usize = 50;

    pub fn new(value: impl Into<String>) -> Result<Self, SkuError> {
        let value = value.into().trim().to_uppercase();
        if value.is_empty() { return Err(SkuError::Empty); }
        if value.chars().count() > Self::MAX_LEN { return Err(SkuError::TooLong); }
        if value.chars().any(char::is_whitespace) { return Err(SkuError::Whitespace); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl TryFrom<String> for Sku {
    type Error = SkuError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Sku> for String {
    fn from(sku: Sku) -> Self { sku.0 }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum SkuError { Empty, TooLong, Whitespace }
impl std::error::Error for SkuError {}
impl fmt::Display for SkuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "SKU empty"),
            Self::TooLong => write!(f, "SKU too long"),
            Self::Whitespace => write!(f, "SKU contains spaces"),
        }
    }
}

/// Builds a URL slug from a display name: `"Новые Кружки 2"` → `"novye-kruzhki-2"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().to_lowercase().chars() {
        match ch {
            'a'..='z' | '0'..='9' => slug.push(ch),
            _ => match transliterate(ch) {
                Some(latin) => slug.push_str(latin),
                None if !slug.ends_with('-') && !slug.is_empty() => slug.push('-'),
                None => {}
            },
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a", 'б' => "b", 'в' => "v", 'г' => "g", 'д' => "d", 'е' => "e", 'ё' => "e",
        'ж' => "zh", 'з' => "z", 'и' => "i", 'й' => "y", 'к' => "k", 'л' => "l", 'м' => "m",
        'н' => "n", 'о' => "o", 'п' => "p", 'р' => "r", 'с' => "s", 'т' => "t", 'у' => "u",
        'ф' => "f", 'х' => "h", 'ц' => "ts", 'ч' => "ch", 'ш' => "sh", 'щ' => "sch", 'ъ' => "",
        'ы' => "y", 'ь' => "", 'э' => "e", 'ю' => "yu", 'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid { Ok(()) } else { Err(error("slug", "Only lowercase latin letters, digits and dashes")) }
}

pub fn validate_sku(value: &str) -> Result<(), ValidationError> {
    Sku::new(value).map(|_| ()).map_err(|e| match e {
        SkuError::Empty => error("sku", "SKU is required"),
        SkuError::TooLong => error("sku", "SKU is longer than 50 characters"),
        SkuError::Whitespace => error("sku", "SKU must not contain spaces"),
    })
}

pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() { return Err(error("price", "Price cannot be negative")); }
    if value.scale() > 2 && value.normalize().scale() > 2 {
        return Err(error("price", "At most two decimal places"));
    }
    Ok(())
}

/// Discount in percent, `0..=100`.
pub fn validate_discount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value > Decimal::ONE_HUNDRED {
        return Err(error("discount", "Discount must be between 0 and 100 percent"));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let allowed = value.chars().all(|c| c.is_ascii_digit() || "+-() ".contains(c));
    if allowed && (10..=15).contains(&digits) { Ok(()) } else { Err(error("phone", "Invalid phone number")) }
}
