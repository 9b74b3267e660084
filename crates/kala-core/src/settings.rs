//! # Website Settings
//!
//! The single site-wide appearance/content record and its partial update.
//!
//! ## Merge Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load:    defaults ◄── persisted fields   (missing keys keep default)  │
//! │  update:  current  ◄── patch fields       (None keeps current)         │
//! │  reset:   defaults                                                      │
//! │                                                                         │
//! │  businessHours is replaced as a whole map, never merged per day.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here validates colour, font or URL syntax; values are passed
//! through to the presentation layer as given.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Business Hours
// =============================================================================

/// Opening hours, one free-form string per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BusinessHours {
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

impl Default for BusinessHours {
    fn default() -> Self {
        let weekday = "10:00 AM - 7:00 PM".to_string();
        BusinessHours {
            monday: weekday.clone(),
            tuesday: weekday.clone(),
            wednesday: weekday.clone(),
            thursday: weekday.clone(),
            friday: weekday,
            saturday: "10:00 AM - 6:00 PM".to_string(),
            sunday: "11:00 AM - 5:00 PM".to_string(),
        }
    }
}

impl BusinessHours {
    /// `(day, hours)` pairs in calendar order, Monday first.
    pub fn days(&self) -> [(&'static str, &str); 7] {
        [
            ("Monday", &self.monday),
            ("Tuesday", &self.tuesday),
            ("Wednesday", &self.wednesday),
            ("Thursday", &self.thursday),
            ("Friday", &self.friday),
            ("Saturday", &self.saturday),
            ("Sunday", &self.sunday),
        ]
    }
}

// =============================================================================
// Website Settings
// =============================================================================

/// Site-wide configuration record.
///
/// `#[serde(default)]` gives the field-level merge of persisted values over
/// defaults: a stored record missing a key loads with that key's default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct WebsiteSettings {
    // Brand
    pub brand_name: String,
    pub brand_tagline: String,
    pub logo: String,

    // Colors
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,

    // Typography
    pub heading_font: String,
    pub body_font: String,
    pub font_size: String,

    // Layout
    pub max_width: String,
    pub padding: String,
    pub border_radius: String,

    // Background
    pub background_image: String,
    pub background_overlay: String,

    // Contact
    pub whatsapp_number: String,
    pub instagram_handle: String,
    pub email: String,
    pub business_hours: BusinessHours,

    // Content
    pub home_hero_title: String,
    pub home_hero_subtitle: String,
    pub about_content: String,
    pub contact_message: String,

    // Feature flags
    #[serde(rename = "enableWhatsAppFloat")]
    pub enable_whatsapp_float: bool,
    pub enable_reviews: bool,
    pub enable_newsletter: bool,
    pub enable_social_links: bool,
}

impl Default for WebsiteSettings {
    fn default() -> Self {
        WebsiteSettings {
            brand_name: "DRIK KALA".to_string(),
            brand_tagline: "by Drishti".to_string(),
            logo: String::new(),

            primary_color: "#0f0f0f".to_string(),
            secondary_color: "#1a1a2e".to_string(),
            accent_color: "#d4af37".to_string(),
            background_color: "#0a0a0a".to_string(),
            text_color: "#ffffff".to_string(),

            heading_font: "Playfair Display".to_string(),
            body_font: "Inter".to_string(),
            font_size: "16px".to_string(),

            max_width: "1280px".to_string(),
            padding: "1rem".to_string(),
            border_radius: "0.75rem".to_string(),

            background_image: String::new(),
            background_overlay: "rgba(15, 15, 15, 0.8)".to_string(),

            whatsapp_number: "+91 94799 88471".to_string(),
            instagram_handle: "@drik_kala_".to_string(),
            email: "info@drikkala.com".to_string(),
            business_hours: BusinessHours::default(),

            home_hero_title: "Discover Your Style".to_string(),
            home_hero_subtitle: "Handcrafted fashion pieces that tell your story".to_string(),
            about_content: "Drik Kala brings you the finest handcrafted fashion pieces, \
                carefully curated to reflect your unique style and personality."
                .to_string(),
            contact_message: "We'd love to hear from you! Whether you have questions about \
                our products, need styling advice, or want to collaborate, we're here to help."
                .to_string(),

            enable_whatsapp_float: true,
            enable_reviews: true,
            enable_newsletter: false,
            enable_social_links: true,
        }
    }
}

impl WebsiteSettings {
    /// CSS custom properties the presentation layer applies to the document
    /// root after every load or update, in a fixed order.
    ///
    /// ## Example
    /// ```rust
    /// use kala_core::WebsiteSettings;
    ///
    /// let tokens = WebsiteSettings::default().theme_tokens();
    /// assert_eq!(tokens[2], ("--accent-color", "#d4af37".to_string()));
    /// ```
    pub fn theme_tokens(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--primary-color", self.primary_color.clone()),
            ("--secondary-color", self.secondary_color.clone()),
            ("--accent-color", self.accent_color.clone()),
            ("--background-color", self.background_color.clone()),
            ("--text-color", self.text_color.clone()),
            ("--max-width", self.max_width.clone()),
            ("--padding", self.padding.clone()),
            ("--border-radius", self.border_radius.clone()),
            ("--font-size", self.font_size.clone()),
        ]
    }
}

// =============================================================================
// Settings Patch
// =============================================================================

/// Partial settings update. Unknown keys fail deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsPatch {
    pub brand_name: Option<String>,
    pub brand_tagline: Option<String>,
    pub logo: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub heading_font: Option<String>,
    pub body_font: Option<String>,
    pub font_size: Option<String>,
    pub max_width: Option<String>,
    pub padding: Option<String>,
    pub border_radius: Option<String>,
    pub background_image: Option<String>,
    pub background_overlay: Option<String>,
    pub whatsapp_number: Option<String>,
    pub instagram_handle: Option<String>,
    pub email: Option<String>,
    pub business_hours: Option<BusinessHours>,
    pub home_hero_title: Option<String>,
    pub home_hero_subtitle: Option<String>,
    pub about_content: Option<String>,
    pub contact_message: Option<String>,
    #[serde(rename = "enableWhatsAppFloat")]
    pub enable_whatsapp_float: Option<bool>,
    pub enable_reviews: Option<bool>,
    pub enable_newsletter: Option<bool>,
    pub enable_social_links: Option<bool>,
}

/// Copies every `Some` field of the patch over the target.
macro_rules! merge_fields {
    ($patch:ident => $target:ident; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

impl SettingsPatch {
    /// Shallow merge into `settings`.
    pub fn apply_to(self, settings: &mut WebsiteSettings) {
        let patch = self;
        merge_fields!(patch => settings;
            brand_name, brand_tagline, logo,
            primary_color, secondary_color, accent_color, background_color, text_color,
            heading_font, body_font, font_size,
            max_width, padding, border_radius,
            background_image, background_overlay,
            whatsapp_number, instagram_handle, email, business_hours,
            home_hero_title, home_hero_subtitle, about_content, contact_message,
            enable_whatsapp_float, enable_reviews, enable_newsletter, enable_social_links,
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_storefront() {
        let s = WebsiteSettings::default();
        assert_eq!(s.brand_name, "DRIK KALA");
        assert_eq!(s.accent_color, "#d4af37");
        assert_eq!(s.business_hours.friday, "10:00 AM - 7:00 PM");
        assert_eq!(s.business_hours.sunday, "11:00 AM - 5:00 PM");
        assert!(s.enable_whatsapp_float);
        assert!(!s.enable_newsletter);
    }

    #[test]
    fn test_partial_record_loads_over_defaults() {
        let s: WebsiteSettings =
            serde_json::from_str(r##"{"brandName": "Drik", "accentColor": "#fff"}"##).unwrap();
        assert_eq!(s.brand_name, "Drik");
        assert_eq!(s.accent_color, "#fff");
        assert_eq!(s.primary_color, "#0f0f0f");
        assert_eq!(s.business_hours, BusinessHours::default());
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let json = serde_json::to_value(WebsiteSettings::default()).unwrap();
        assert_eq!(json["enableWhatsAppFloat"], true);
        assert_eq!(json["businessHours"]["saturday"], "10:00 AM - 6:00 PM");
        assert_eq!(json["homeHeroTitle"], "Discover Your Style");
    }

    #[test]
    fn test_patch_changes_only_named_field() {
        let mut s = WebsiteSettings::default();
        let patch: SettingsPatch = serde_json::from_str(r##"{"accentColor": "#fff"}"##).unwrap();
        patch.apply_to(&mut s);

        assert_eq!(s.accent_color, "#fff");
        assert_eq!(
            WebsiteSettings {
                accent_color: "#d4af37".to_string(),
                ..s
            },
            WebsiteSettings::default()
        );
    }

    #[test]
    fn test_patch_replaces_business_hours_whole() {
        let mut s = WebsiteSettings::default();
        let closed = BusinessHours {
            monday: "Closed".to_string(),
            tuesday: "Closed".to_string(),
            wednesday: "Closed".to_string(),
            thursday: "Closed".to_string(),
            friday: "Closed".to_string(),
            saturday: "Closed".to_string(),
            sunday: "Closed".to_string(),
        };
        SettingsPatch {
            business_hours: Some(closed.clone()),
            ..Default::default()
        }
        .apply_to(&mut s);
        assert_eq!(s.business_hours, closed);
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        assert!(serde_json::from_str::<SettingsPatch>(r#"{"favicon": "x.ico"}"#).is_err());
        let ok: SettingsPatch = serde_json::from_str(r#"{"enableWhatsAppFloat": false}"#).unwrap();
        assert_eq!(ok.enable_whatsapp_float, Some(false));
    }

    #[test]
    fn test_theme_tokens_order() {
        let names: Vec<&str> = WebsiteSettings::default()
            .theme_tokens()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                "--primary-color",
                "--secondary-color",
                "--accent-color",
                "--background-color",
                "--text-color",
                "--max-width",
                "--padding",
                "--border-radius",
                "--font-size",
            ]
        );
    }
}
