//! Canonical product record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CommerceError;
use crate::ids::{FarmerId, ProductId};
use crate::money::{Currency, Money};
use crate::normalize::{FieldAlias, RawRecord};

const ID: FieldAlias = FieldAlias::new("id", "ID");
const NAME: FieldAlias = FieldAlias::new("name", "Name");
const DESCRIPTION: FieldAlias = FieldAlias::new("description", "Description");
const PRICE: FieldAlias = FieldAlias::new("price", "Price");
const STOCK: FieldAlias = FieldAlias::new("stock", "Stock");
const IMAGE_URL: FieldAlias = FieldAlias::new("image_url", "ImageURL");
const CATEGORY: FieldAlias = FieldAlias::new("category", "Category");
const FARMER_ID: FieldAlias = FieldAlias::new("farmer_id", "FarmerID");
const FARMER_NAME: FieldAlias = FieldAlias::new("farmer_name", "FarmerName");
const IS_PRE_ORDER: FieldAlias = FieldAlias::new("is_pre_order", "IsPreOrder");
const HARVEST_DATE: FieldAlias = FieldAlias::new("harvest_date", "HarvestDate");
const IS_SUBSCRIPTION: FieldAlias = FieldAlias::new("is_subscription", "IsSubscription");
const SUBSCRIPTION_PERIOD: FieldAlias =
    FieldAlias::new("subscription_period", "SubscriptionPeriod");

/// Every product field with its alternate spelling.
pub const PRODUCT_FIELDS: [FieldAlias; 13] = [
    ID,
    NAME,
    DESCRIPTION,
    PRICE,
    STOCK,
    IMAGE_URL,
    CATEGORY,
    FARMER_ID,
    FARMER_NAME,
    IS_PRE_ORDER,
    HARVEST_DATE,
    IS_SUBSCRIPTION,
    SUBSCRIPTION_PERIOD,
];

/// A product listed by a farmer.
///
/// Serializes to the canonical `snake_case` shape with `price` as a bare
/// number of major units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    #[serde(with = "crate::money::major_units")]
    pub price: Money,
    /// Units on hand as last reported by the backend.
    pub stock: i64,
    /// Image path or absolute URL.
    pub image_url: String,
    /// Category label (e.g., "Sayuran").
    pub category: String,
    /// Owning farmer.
    pub farmer_id: Option<FarmerId>,
    /// Owning farmer's display name.
    pub farmer_name: String,
    /// Sold before harvest.
    pub is_pre_order: bool,
    /// Expected harvest, for pre-orders.
    pub harvest_date: Option<NaiveDate>,
    /// Sold as a recurring subscription.
    pub is_subscription: bool,
    /// Subscription cadence (e.g., "weekly", "monthly").
    pub subscription_period: Option<String>,
}

impl Product {
    /// Create a product with the required fields; everything else defaults.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            stock: 0,
            image_url: String::new(),
            category: String::new(),
            farmer_id: None,
            farmer_name: String::new(),
            is_pre_order: false,
            harvest_date: None,
            is_subscription: false,
            subscription_period: None,
        }
    }

    /// Normalize a loosely typed product record.
    ///
    /// Each field is read from its `snake_case` name, falling back to the
    /// `UpperCamelCase` name. `id` and `price` are required and `price`
    /// must be a finite, non-negative number; every other field defaults
    /// when absent.
    ///
    /// ```
    /// use farm_commerce::catalog::Product;
    /// use serde_json::json;
    ///
    /// let product = Product::from_raw(&json!({"ID": 3, "Name": "Kale", "Price": 15000})).unwrap();
    /// assert_eq!(product.id.get(), 3);
    /// assert_eq!(product.name, "Kale");
    /// ```
    pub fn from_raw(raw: &Value) -> Result<Self, CommerceError> {
        let record = RawRecord::from_value(raw, "product")?;

        let id = ProductId::new(record.require_u64(ID)?);
        let amount = record.require_f64(PRICE)?;
        if amount < 0.0 {
            return Err(CommerceError::InvalidField {
                field: PRICE.canonical,
                reason: format!("must not be negative, got {}", amount),
            });
        }
        let price = Money::from_decimal(amount, Currency::default()).ok_or_else(|| {
            CommerceError::InvalidField {
                field: PRICE.canonical,
                reason: format!("out of range: {}", amount),
            }
        })?;

        Ok(Self {
            id,
            name: record.string(NAME),
            description: record.string(DESCRIPTION),
            price,
            stock: record.i64(STOCK),
            image_url: record.string(IMAGE_URL),
            category: record.string(CATEGORY),
            farmer_id: record.opt_u64(FARMER_ID).map(FarmerId::new),
            farmer_name: record.string(FARMER_NAME),
            is_pre_order: record.bool(IS_PRE_ORDER),
            harvest_date: record.opt_date(HARVEST_DATE),
            is_subscription: record.bool(IS_SUBSCRIPTION),
            subscription_period: record.opt_string(SUBSCRIPTION_PERIOD),
        })
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the image path.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Set the owning farmer.
    pub fn with_farmer(mut self, farmer_id: FarmerId, farmer_name: impl Into<String>) -> Self {
        self.farmer_id = Some(farmer_id);
        self.farmer_name = farmer_name.into();
        self
    }

    /// Check if the backend reported stock on hand.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical() -> Value {
        json!({
            "id": 1,
            "name": "Organic Spinach",
            "description": "Fresh from Lembang",
            "price": 1000,
            "stock": 40,
            "image_url": "spinach.jpg",
            "category": "Sayuran",
            "farmer_id": 9,
            "farmer_name": "Pak Budi",
            "is_pre_order": true,
            "harvest_date": "2025-03-01",
            "is_subscription": false,
            "subscription_period": null
        })
    }

    fn alternate() -> Value {
        json!({
            "ID": 1,
            "Name": "Organic Spinach",
            "Description": "Fresh from Lembang",
            "Price": 1000,
            "Stock": 40,
            "ImageURL": "spinach.jpg",
            "Category": "Sayuran",
            "FarmerID": 9,
            "FarmerName": "Pak Budi",
            "IsPreOrder": true,
            "HarvestDate": "2025-03-01T06:00:00+07:00",
            "IsSubscription": false
        })
    }

    #[test]
    fn test_from_raw_canonical() {
        let product = Product::from_raw(&canonical()).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Money::new(100_000, Currency::IDR));
        assert_eq!(product.farmer_id, Some(FarmerId::new(9)));
        assert!(product.is_pre_order);
        assert_eq!(product.harvest_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(product.subscription_period, None);
    }

    #[test]
    fn test_alternate_casing_matches_canonical() {
        let a = Product::from_raw(&canonical()).unwrap();
        let b = Product::from_raw(&alternate()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalization_idempotent() {
        let once = Product::from_raw(&alternate()).unwrap();
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = Product::from_raw(&serialized).unwrap();
        assert_eq!(once, twice);
        assert_eq!(serde_json::to_value(&twice).unwrap(), serialized);
    }

    #[test]
    fn test_serializes_canonical_field_names() {
        let product = Product::new(ProductId::new(5), "Tomato", Money::new(250_000, Currency::IDR));
        let value = serde_json::to_value(&product).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), PRODUCT_FIELDS.len());
        for alias in PRODUCT_FIELDS {
            assert!(object.contains_key(alias.canonical), "missing {}", alias.canonical);
        }
        assert_eq!(value["price"].as_f64(), Some(2500.0));
    }

    #[test]
    fn test_partial_record_defaults() {
        let product = Product::from_raw(&json!({"id": 2, "price": 500.5})).unwrap();
        assert_eq!(product.name, "");
        assert_eq!(product.stock, 0);
        assert_eq!(product.farmer_id, None);
        assert!(!product.is_subscription);
        assert_eq!(product.price.amount_minor, 50_050);
    }

    #[test]
    fn test_missing_price_rejected() {
        let err = Product::from_raw(&json!({"id": 2, "name": "Leek"})).unwrap_err();
        assert!(matches!(err, CommerceError::MissingField("price")));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Product::from_raw(&json!({"id": 2, "price": -1})).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidField { field: "price", .. }));
    }

    #[test]
    fn test_missing_id_rejected() {
        let err = Product::from_raw(&json!({"Name": "Leek", "Price": 1})).unwrap_err();
        assert!(matches!(err, CommerceError::MissingField("id")));
    }

    #[test]
    fn test_builders() {
        let product = Product::new(ProductId::new(1), "Carrot", Money::zero(Currency::IDR))
            .with_category("Sayuran")
            .with_image_url("carrot.png")
            .with_farmer(FarmerId::new(4), "Bu Sari");
        assert_eq!(product.category, "Sayuran");
        assert_eq!(product.farmer_name, "Bu Sari");
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_backend_harvest_date_kept() {
        let product =
            Product::from_raw(&json!({"id": 1, "price": 1000, "harvest_date": "2025-03-01"}))
                .unwrap();
        assert_eq!(product.harvest_date, NaiveDate::from_ymd_opt(2025, 3, 1));

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["harvest_date"], "2025-03-01");
    }
}
