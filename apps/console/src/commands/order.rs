//! # Order Link Commands
//!
//! Builds WhatsApp deep links. Nothing is sent: the link is printed for the
//! operator (or a customer) to open.
//!
//! ```text
//! order 3 --color Gold --size M --quantity 2
//!     │
//!     ├── product exists?          no ──► NOT_FOUND
//!     ├── quantity in 1..=stock?   no ──► VALIDATION_ERROR
//!     ├── color / size offered?    no ──► VALIDATION_ERROR
//!     ▼
//! https://wa.me/919479988471?text=Hi%20Drik%20Kala%21...
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use kala_core::order::{
    collection_enquiry_message, whatsapp_link, CONTACT_GREETING, FLOAT_GREETING,
};
use kala_core::validation::validate_quantity;
use kala_core::{CoreError, OrderRequest, ValidationError};

/// A ready-to-open WhatsApp link and the text it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppLink {
    pub message: String,
    pub url: String,
}

/// Which fixed greeting to link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    /// Contact page button.
    Contact,
    /// Floating button shown on every page.
    Float,
}

/// Chosen options from the product detail page.
#[derive(Debug, Clone, Default)]
pub struct OrderOptions {
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: i64,
}

async fn link(state: &AppState, message: String) -> WhatsAppLink {
    let number = state.whatsapp_number().await;
    WhatsAppLink {
        url: whatsapp_link(&number, &message),
        message,
    }
}

/// Checks a chosen option against what the product offers. Products without
/// options accept anything.
fn check_option(field: &str, chosen: Option<&str>, offered: &[String]) -> ApiResult<()> {
    match chosen {
        Some(value) if !offered.is_empty() && !offered.iter().any(|o| o == value) => {
            Err(ValidationError::NotAllowed {
                field: field.to_string(),
                allowed: offered.to_vec(),
            }
            .into())
        }
        _ => Ok(()),
    }
}

/// Order link from the product detail page.
pub async fn order_link(
    state: &AppState,
    product_id: &str,
    options: OrderOptions,
) -> ApiResult<WhatsAppLink> {
    debug!(product_id = %product_id, quantity = options.quantity, "order_link command");

    let request = {
        let catalog = state.catalog.lock().await;
        let product = catalog
            .by_id(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        validate_quantity(options.quantity)?;
        if options.quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: options.quantity,
            }
            .into());
        }
        check_option("color", options.color.as_deref(), &product.colors)?;
        check_option("size", options.size.as_deref(), &product.sizes)?;

        OrderRequest {
            product_name: product.name.clone(),
            price: product.price,
            color: options.color,
            size: options.size,
            quantity: options.quantity,
        }
    };

    Ok(link(state, request.message()).await)
}

/// Quick enquiry link from the collections page.
pub async fn enquiry_link(state: &AppState, product_id: &str) -> ApiResult<WhatsAppLink> {
    let message = {
        let catalog = state.catalog.lock().await;
        let product = catalog
            .by_id(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        collection_enquiry_message(&product.name, product.price)
    };

    Ok(link(state, message).await)
}

/// Link for one of the fixed greetings. The float button can be switched
/// off in settings.
pub async fn greeting_link(state: &AppState, greeting: Greeting) -> ApiResult<WhatsAppLink> {
    let message = match greeting {
        Greeting::Contact => CONTACT_GREETING,
        Greeting::Float => {
            if !state.settings.lock().await.get().enable_whatsapp_float {
                return Err(ApiError::validation(
                    "The floating WhatsApp button is disabled in settings",
                ));
            }
            FLOAT_GREETING
        }
    };

    Ok(link(state, message.to_string()).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_option() {
        let offered = vec!["S".to_string(), "M".to_string()];
        assert!(check_option("size", Some("M"), &offered).is_ok());
        assert!(check_option("size", None, &offered).is_ok());
        assert!(check_option("size", Some("XL"), &offered).is_err());
        assert!(check_option("size", Some("XL"), &[]).is_ok());
    }
}
