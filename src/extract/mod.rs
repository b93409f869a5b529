//! Generative product extraction
//!
//! Sends an assembled page payload across the extraction boundary: a
//! fixed system instruction, the payload as user content, and a response
//! schema matching the pre-normalization record shape. The model's JSON
//! answer is decoded into a [`RawProduct`] for validation downstream.

use crate::error::{Error, Result};
use crate::gemini::{Client, Content, GenerationConfig};
use crate::preprocess::Payload;
use crate::record::RawProduct;
use serde_json::json;
use tracing::{debug, instrument};

/// System instruction for product extraction
pub const EXTRACT_PROMPT: &str = r#"Extract product information from the provided page content into the specified schema.

## Field Guidelines:

**name**: The product title/name as displayed on the page

**price**:
- amount: Current selling price as a number
- currency: ISO currency code (USD, GBP, EUR, etc.)
- compare_at_amount: Original price if on sale, otherwise null

**description**: Full product description text

**key_features**: List of bullet points, specifications, or highlighted features

**image_urls**: ALL product image URLs at full resolution (not thumbnails). Look for:
- Main product images
- Alternate angle images
- Color variant images
- Zoom/high-res versions

**video_url**: Product video URL if available, otherwise null

**category**: MUST be an exact match from Google Product Taxonomy. Use full path with " > " separators.
Valid examples for reference:
- "Apparel & Accessories > Clothing > Pants"
- "Apparel & Accessories > Shoes"
- "Hardware > Tools > Drills > Handheld Power Drills"
- "Home & Garden > Lighting > Lamps"
- "Home & Garden > Decor > Rugs"
- "Furniture > Chairs"
- "Electronics > Electronics Accessories"
DO NOT invent categories. Use the most specific matching category that exists.

**brand**: The brand or manufacturer name

**colors**: List of available color options (e.g., ["Black", "Navy", "Iron"])

**variants**: All purchasable combinations. Each variant should include:
- sku: Product SKU/ID for this variant if available
- size: Size value (e.g., "M", "32x30", "One Size")
- color: Color name for this variant
- price: Price if different from main price, otherwise null
- available: true if in stock, false if out of stock

## Data Sources:
Look for structured data first (JSON-LD, meta tags), then fall back to page content.
"#;

/// Response schema for the pre-normalization record shape, in the
/// Gemini OpenAPI schema dialect
pub fn product_schema() -> serde_json::Value {
    let price = json!({
        "type": "OBJECT",
        "properties": {
            "amount": {"type": "NUMBER"},
            "currency": {"type": "STRING"},
            "compare_at_amount": {"type": "NUMBER", "nullable": true}
        },
        "required": ["amount", "currency"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "name": {"type": "STRING"},
            "price": price,
            "description": {"type": "STRING"},
            "key_features": {"type": "ARRAY", "items": {"type": "STRING"}},
            "image_urls": {"type": "ARRAY", "items": {"type": "STRING"}},
            "video_url": {"type": "STRING", "nullable": true},
            "category": {
                "type": "OBJECT",
                "properties": {"name": {"type": "STRING"}},
                "required": ["name"]
            },
            "brand": {"type": "STRING"},
            "colors": {"type": "ARRAY", "items": {"type": "STRING"}},
            "variants": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "size": {"type": "STRING", "nullable": true},
                        "sku": {"type": "STRING", "nullable": true},
                        "color": {"type": "STRING", "nullable": true},
                        "price": price,
                        "available": {"type": "BOOLEAN"}
                    }
                }
            }
        },
        "required": ["name", "price", "description", "category", "brand"]
    })
}

/// Product extractor over the generative boundary
#[derive(Clone)]
pub struct Extractor {
    client: Client,
    model: String,
}

impl Extractor {
    /// Create an extractor for a model
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Extract a raw product record from an assembled payload
    ///
    /// # Arguments
    ///
    /// * `payload` - The preprocessed page payload
    ///
    /// # Returns
    ///
    /// The schema-conformant record before validation, or a dispatch error
    #[instrument(skip(self, payload), fields(model = %self.model))]
    pub async fn extract(&self, payload: &Payload) -> Result<RawProduct> {
        let system = Content::new().with_text(EXTRACT_PROMPT);
        let user = Content::new().with_role("user").with_text(&payload.text);
        let config = GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(product_schema()),
            ..Default::default()
        };

        let response = self
            .client
            .generate_content(&self.model, Some(system), vec![user], Some(config))
            .await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Extraction used {} prompt + {} candidate tokens",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        let text = response.text();
        if text.is_empty() {
            return Err(Error::UnexpectedResponse(
                "model returned no candidates".to_string(),
            ));
        }

        let raw: RawProduct = serde_json::from_str(&text)?;
        Ok(raw)
    }
}
