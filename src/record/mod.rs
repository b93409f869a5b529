//! Product record types and post-extraction validation
//!
//! The extraction boundary returns a [`RawProduct`]: the record shape
//! before any guarantee holds. [`ProductRecord::from_raw`] turns it into
//! the final record by enforcing price invariants at construction time,
//! validating the category against the taxonomy, cleaning the text
//! fields and repairing scheme-relative URLs.

mod error;
mod normalize;

pub use error::RecordError;
pub use normalize::{clean_text, fix_url};

use crate::taxonomy::{Category, Taxonomy};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A product price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Current selling price
    pub amount: f64,

    /// ISO currency code (USD, GBP, EUR, ...)
    pub currency: String,

    /// Original price when the product is on sale
    #[serde(default)]
    pub compare_at_amount: Option<f64>,
}

impl Price {
    /// Enforce the price invariants: a non-negative amount, and a
    /// compare-at amount no lower than the selling price
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.amount < 0.0 {
            return Err(RecordError::NegativeAmount(self.amount));
        }
        if let Some(compare_at) = self.compare_at_amount {
            if compare_at < self.amount {
                return Err(RecordError::CompareAtBelowAmount {
                    compare_at,
                    amount: self.amount,
                });
            }
        }
        Ok(())
    }
}

/// A purchasable product variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Size value (e.g. "M", "32x30", "One Size")
    #[serde(default)]
    pub size: Option<String>,

    /// SKU or product identifier for this variant
    #[serde(default)]
    pub sku: Option<String>,

    /// Color name for this variant
    #[serde(default)]
    pub color: Option<String>,

    /// Price when it differs from the main price
    #[serde(default)]
    pub price: Option<Price>,

    /// Whether the variant is in stock
    #[serde(default = "default_true")]
    pub available: bool,
}

/// Category shape as returned by the extraction boundary, before
/// taxonomy validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    /// The free-text category path
    pub name: String,
}

/// A product record as returned by the extraction boundary, before any
/// invariant holds
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    /// Product title as displayed on the page
    pub name: String,

    /// Main price
    pub price: Price,

    /// Full product description
    pub description: String,

    /// Bullet points, specifications or highlighted features
    #[serde(default)]
    pub key_features: Vec<String>,

    /// Product image URLs
    #[serde(default)]
    pub image_urls: Vec<String>,

    /// Product video URL, when available
    #[serde(default)]
    pub video_url: Option<String>,

    /// Free-text category, validated against the taxonomy later
    pub category: RawCategory,

    /// Brand or manufacturer name
    pub brand: String,

    /// Available color options
    #[serde(default)]
    pub colors: Vec<String>,

    /// All purchasable combinations
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A validated, normalized product record
///
/// Invariants: the category is a taxonomy member, prices are
/// non-negative with compare-at no lower than the selling price, and no
/// URL field retains a scheme-relative form.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    /// Product title as displayed on the page
    pub name: String,

    /// Main price
    pub price: Price,

    /// Full product description, cleaned
    pub description: String,

    /// Bullet points, specifications or highlighted features, cleaned
    pub key_features: Vec<String>,

    /// Product image URLs with explicit schemes
    pub image_urls: Vec<String>,

    /// Product video URL with an explicit scheme, when available
    pub video_url: Option<String>,

    /// Validated taxonomy category
    pub category: Category,

    /// Brand or manufacturer name
    pub brand: String,

    /// Available color options
    pub colors: Vec<String>,

    /// All purchasable combinations
    pub variants: Vec<Variant>,
}

impl ProductRecord {
    /// Validate and normalize a freshly extracted record
    ///
    /// # Arguments
    ///
    /// * `raw` - The record as returned by the extraction boundary
    /// * `taxonomy` - The category vocabulary to validate against
    ///
    /// # Returns
    ///
    /// The validated record, or the first invariant violation
    pub fn from_raw(raw: RawProduct, taxonomy: &Taxonomy) -> Result<Self, RecordError> {
        raw.price.validate()?;
        for variant in &raw.variants {
            if let Some(price) = &variant.price {
                price.validate()?;
            }
        }

        let category = taxonomy.validate(&raw.category.name)?;

        Ok(Self {
            name: raw.name,
            price: raw.price,
            description: clean_text(&raw.description),
            key_features: raw
                .key_features
                .iter()
                .map(|feature| clean_text(feature))
                .collect(),
            image_urls: raw.image_urls.iter().map(|url| fix_url(url)).collect(),
            video_url: raw.video_url.map(|url| fix_url(&url)),
            category,
            brand: raw.brand,
            colors: raw.colors,
            variants: raw.variants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;
    use serde_json::json;

    fn sample_taxonomy() -> Taxonomy {
        Taxonomy::new(
            [
                "Apparel & Accessories > Clothing > Pants",
                "Apparel & Accessories > Shoes",
            ]
            .map(String::from),
        )
        .unwrap()
    }

    fn sample_raw() -> RawProduct {
        serde_json::from_value(json!({
            "name": "Test Product",
            "price": {"amount": 99.99, "currency": "USD"},
            "description": "A   test\r\n\r\nproduct",
            "key_features": ["Feature   1", "Feature 2"],
            "image_urls": ["//cdn.example.com/a.jpg", "https://example.com/b.jpg"],
            "video_url": "//cdn.example.com/v.mp4",
            "category": {"name": "Apparel & Accessories > Shoes"},
            "brand": "TestBrand",
            "colors": ["Red", "Blue"],
            "variants": [{"size": "M", "color": "Red"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_price_validation() {
        let price = Price {
            amount: 29.95,
            currency: "USD".to_string(),
            compare_at_amount: Some(39.95),
        };
        assert!(price.validate().is_ok());
    }

    #[test]
    fn test_price_negative_amount_rejected() {
        let price = Price {
            amount: -1.0,
            currency: "USD".to_string(),
            compare_at_amount: None,
        };
        assert!(matches!(
            price.validate(),
            Err(RecordError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_price_compare_at_below_amount_rejected() {
        let price = Price {
            amount: 29.95,
            currency: "USD".to_string(),
            compare_at_amount: Some(19.95),
        };
        assert!(matches!(
            price.validate(),
            Err(RecordError::CompareAtBelowAmount { .. })
        ));
    }

    #[test]
    fn test_variant_defaults() {
        let variant: Variant = serde_json::from_value(json!({})).unwrap();
        assert!(variant.size.is_none());
        assert!(variant.sku.is_none());
        assert!(variant.color.is_none());
        assert!(variant.price.is_none());
        assert!(variant.available);
    }

    #[test]
    fn test_from_raw_normalizes_fields() {
        let record = ProductRecord::from_raw(sample_raw(), &sample_taxonomy()).unwrap();

        assert_eq!(record.description, "A test\nproduct");
        assert_eq!(record.key_features, vec!["Feature 1", "Feature 2"]);
        assert_eq!(record.image_urls[0], "https://cdn.example.com/a.jpg");
        assert_eq!(record.image_urls[1], "https://example.com/b.jpg");
        assert_eq!(
            record.video_url.as_deref(),
            Some("https://cdn.example.com/v.mp4")
        );
        assert_eq!(record.category.name(), "Apparel & Accessories > Shoes");
    }

    #[test]
    fn test_from_raw_passes_absent_video_url_through() {
        let raw: RawProduct = serde_json::from_value(json!({
            "name": "Test Product",
            "price": {"amount": 10.0, "currency": "USD"},
            "description": "No video",
            "category": {"name": "Apparel & Accessories > Shoes"},
            "brand": "TestBrand",
            "video_url": null
        }))
        .unwrap();

        let record = ProductRecord::from_raw(raw, &sample_taxonomy()).unwrap();
        assert!(record.video_url.is_none());
    }

    #[test]
    fn test_from_raw_fuzzy_matches_category() {
        let mut raw = sample_raw();
        raw.category.name = "Apparel & Accessories > Clothing > Pant".to_string();
        let record = ProductRecord::from_raw(raw, &sample_taxonomy()).unwrap();
        assert_eq!(
            record.category.name(),
            "Apparel & Accessories > Clothing > Pants"
        );
    }

    #[test]
    fn test_from_raw_rejects_invalid_category() {
        let mut raw = sample_raw();
        raw.category.name = "Completely Invalid Category That Doesnt Exist".to_string();
        let err = ProductRecord::from_raw(raw, &sample_taxonomy()).unwrap_err();
        assert!(matches!(err, RecordError::Category(_)));
    }

    #[test]
    fn test_from_raw_validates_variant_prices() {
        let mut raw = sample_raw();
        raw.variants.push(Variant {
            size: None,
            sku: None,
            color: None,
            price: Some(Price {
                amount: -5.0,
                currency: "USD".to_string(),
                compare_at_amount: None,
            }),
            available: true,
        });
        assert!(ProductRecord::from_raw(raw, &sample_taxonomy()).is_err());
    }

    #[test]
    fn test_record_serializes_nested_shapes() {
        let record = ProductRecord::from_raw(sample_raw(), &sample_taxonomy()).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["price"]["amount"], 99.99);
        assert_eq!(value["category"]["name"], "Apparel & Accessories > Shoes");
        assert_eq!(value["variants"][0]["size"], "M");
        assert_eq!(value["variants"][0]["available"], true);
    }
}
