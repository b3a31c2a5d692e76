//! User-facing notifications.
//!
//! The cart store never notifies anyone. Surfaces decide which [`Notice`]s to
//! show after calling it: web responses carry them in an `HX-Trigger` header,
//! JSON responses embed them in the body.

use std::str::FromStr;

use axum::http::HeaderValue;
use serde::Serialize;

use crate::cart::CheckoutFailure;

/// Display language for notices and the cart panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

/// Error returned when parsing an unsupported locale code.
#[derive(Debug, thiserror::Error)]
#[error("unsupported locale: {0} (expected fr or en)")]
pub struct UnknownLocale(String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Self::Fr),
            "en" => Ok(Self::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn success(title: &str, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.to_string(),
            description: description.into(),
        }
    }

    fn warning(title: &str, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.to_string(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn item_added(name: &str, year: i32, locale: Locale) -> Self {
        match locale {
            Locale::Fr => Self::success(
                "Ajouté au panier",
                format!("{name} ({year}) a été ajouté à votre panier"),
            ),
            Locale::En => Self::success(
                "Added to cart",
                format!("{name} ({year}) has been added to your cart"),
            ),
        }
    }

    #[must_use]
    pub fn item_removed(locale: Locale) -> Self {
        match locale {
            Locale::Fr => Self::success("Article retiré", "L'article a été retiré de votre panier"),
            Locale::En => Self::success("Item removed", "The item has been removed from your cart"),
        }
    }

    #[must_use]
    pub fn cart_cleared(locale: Locale) -> Self {
        match locale {
            Locale::Fr => Self::success(
                "Panier vidé",
                "Tous les articles ont été retirés de votre panier",
            ),
            Locale::En => Self::success(
                "Cart cleared",
                "All items have been removed from your cart",
            ),
        }
    }

    #[must_use]
    pub fn order_placed(locale: Locale) -> Self {
        match locale {
            Locale::Fr => Self::success(
                "Commande passée",
                "Votre commande a été traitée avec succès!",
            ),
            Locale::En => Self::success(
                "Order placed",
                "Your order has been processed successfully!",
            ),
        }
    }

    #[must_use]
    pub fn checkout_failed(failure: &CheckoutFailure, locale: Locale) -> Self {
        let description = match (failure, locale) {
            (CheckoutFailure::EmptyCart, Locale::Fr) => "Votre panier est vide".to_string(),
            (CheckoutFailure::EmptyCart, Locale::En) => "Your cart is empty".to_string(),
            (other, _) => other.to_string(),
        };
        match locale {
            Locale::Fr => Self::warning("Commande non passée", description),
            Locale::En => Self::warning("Order not placed", description),
        }
    }

    #[must_use]
    pub fn save_failed(locale: Locale) -> Self {
        match locale {
            Locale::Fr => Self::warning(
                "Panier non enregistré",
                "Votre panier sera conservé pendant cette session mais n'a pas pu être enregistré",
            ),
            Locale::En => Self::warning(
                "Cart not saved",
                "Your cart is kept for this session but could not be saved",
            ),
        }
    }
}

/// Build the `HX-Trigger` header value (`{"notify":[...]}`) for `notices`.
///
/// Header values must be visible ASCII, so non-ASCII characters are written
/// as JSON `\u` escapes.
#[must_use]
pub fn hx_trigger(notices: &[Notice]) -> Option<HeaderValue> {
    if notices.is_empty() {
        return None;
    }
    let json = serde_json::json!({ "notify": notices }).to_string();
    HeaderValue::from_str(&escape_non_ascii(&json)).ok()
}

fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_added_mentions_name_and_year() {
        let notice = Notice::item_added("Château Pétrus", 2015, Locale::Fr);
        assert_eq!(notice.title, "Ajouté au panier");
        assert_eq!(
            notice.description,
            "Château Pétrus (2015) a été ajouté à votre panier"
        );

        let notice = Notice::item_added("Château Pétrus", 2015, Locale::En);
        assert_eq!(notice.title, "Added to cart");
    }

    #[test]
    fn test_checkout_failed_is_a_warning() {
        let notice = Notice::checkout_failed(&CheckoutFailure::EmptyCart, Locale::En);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.description, "Your cart is empty");
    }

    #[test]
    fn test_hx_trigger_is_ascii_and_round_trips() {
        let notices = [Notice::item_added("Dom Pérignon Vintage", 2012, Locale::Fr)];
        let header = hx_trigger(&notices).unwrap();
        let raw = header.to_str().unwrap();
        assert!(raw.is_ascii());

        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(
            value["notify"][0]["description"],
            "Dom Pérignon Vintage (2012) a été ajouté à votre panier"
        );
        assert_eq!(value["notify"][0]["level"], "success");
    }

    #[test]
    fn test_hx_trigger_empty_is_none() {
        assert!(hx_trigger(&[]).is_none());
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" fr ".parse::<Locale>().unwrap(), Locale::Fr);
        assert!("de".parse::<Locale>().is_err());
    }
}
