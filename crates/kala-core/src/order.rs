//! # Order Links
//!
//! Builds the WhatsApp messages and `wa.me` deep links the storefront uses
//! in place of a checkout. Links are only built here; nothing is opened.
//!
//! ## Ordering Flow
//! ```text
//! Product detail page
//!      │  colour? size? quantity (1..=stock)
//!      ▼
//! OrderRequest ──► message() ──► whatsapp_link(digits, message)
//!                                        │
//!                                        ▼
//!              https://wa.me/919479988471?text=Hi%20Drik%20Kala...
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Base of every deep link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Contact page "chat with us" message.
pub const CONTACT_GREETING: &str =
    "Hi! I'd like to get in touch with Drik Kala. Could you please help me?";

/// Floating WhatsApp button message.
pub const FLOAT_GREETING: &str = "Hi Drik Kala! ✨ I'd like to know more about your beautiful \
    collections. Could you please help me?";

const NOT_SPECIFIED: &str = "Not specified";

/// One order placed from the product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub product_name: String,
    pub price: i64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: i64,
}

impl OrderRequest {
    /// Multi-line order message. Missing or blank options read "Not specified".
    pub fn message(&self) -> String {
        let option = |value: &Option<String>| -> String {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(NOT_SPECIFIED)
                .to_string()
        };

        format!(
            "Hi Drik Kala! ✨\n\
             I'd like to order:\n\
             - Product: {}\n\
             - Color: {}\n\
             - Size: {}\n\
             - Quantity: {}\n\
             - Price: ₹{}\n\
             \n\
             Please confirm availability.",
            self.product_name,
            option(&self.color),
            option(&self.size),
            self.quantity,
            self.price,
        )
    }
}

/// Collections page quick enquiry about one product.
pub fn collection_enquiry_message(product_name: &str, price: i64) -> String {
    format!(
        "Hi! I'm interested in ordering \"{}\" (₹{}). Could you please provide more details \
         about availability and sizes?",
        product_name, price
    )
}

/// Keeps only the digits of a display-formatted number.
///
/// ```rust
/// use kala_core::order::whatsapp_digits;
///
/// assert_eq!(whatsapp_digits("+91 94799 88471"), "919479988471");
/// ```
pub fn whatsapp_digits(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

/// `https://wa.me/<digits>?text=<percent-encoded message>`.
pub fn whatsapp_link(number_digits: &str, message: &str) -> String {
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE_URL,
        number_digits,
        urlencoding::encode(message)
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_WHATSAPP_NUMBER;

    #[test]
    fn test_order_message_defaults_missing_options() {
        let order = OrderRequest {
            product_name: "Festive Silk Dress".to_string(),
            price: 4999,
            color: None,
            size: Some("  ".to_string()),
            quantity: 2,
        };
        assert_eq!(
            order.message(),
            "Hi Drik Kala! ✨\nI'd like to order:\n- Product: Festive Silk Dress\n\
             - Color: Not specified\n- Size: Not specified\n- Quantity: 2\n- Price: ₹4999\n\n\
             Please confirm availability."
        );
    }

    #[test]
    fn test_order_message_with_options() {
        let order = OrderRequest {
            product_name: "Elegant Floral Kurti".to_string(),
            price: 2499,
            color: Some("Navy Blue".to_string()),
            size: Some("M".to_string()),
            quantity: 1,
        };
        let message = order.message();
        assert!(message.contains("- Color: Navy Blue\n"));
        assert!(message.contains("- Size: M\n"));
    }

    #[test]
    fn test_link_percent_encodes_message() {
        let link = whatsapp_link(DEFAULT_WHATSAPP_NUMBER, "Hi there & more\n?");
        assert_eq!(
            link,
            "https://wa.me/919479988471?text=Hi%20there%20%26%20more%0A%3F"
        );
    }

    #[test]
    fn test_link_encodes_unicode() {
        let link = whatsapp_link("1", "₹");
        assert_eq!(link, "https://wa.me/1?text=%E2%82%B9");
    }

    #[test]
    fn test_collection_enquiry_message() {
        assert_eq!(
            collection_enquiry_message("Contemporary Co-ord Set", 3299),
            "Hi! I'm interested in ordering \"Contemporary Co-ord Set\" (₹3299). Could you \
             please provide more details about availability and sizes?"
        );
    }

    #[test]
    fn test_greetings() {
        assert!(FLOAT_GREETING.starts_with("Hi Drik Kala! ✨ I'd like"));
        assert!(FLOAT_GREETING.ends_with("Could you please help me?"));
        assert!(CONTACT_GREETING.contains("get in touch"));
    }
}
