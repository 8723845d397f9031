//! Shipping address record.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CommerceError;
use crate::ids::{AddressId, UserId};
use crate::normalize::{FieldAlias, RawRecord};

const ID: FieldAlias = FieldAlias::new("id", "ID");
const USER_ID: FieldAlias = FieldAlias::new("user_id", "UserID");
const LABEL: FieldAlias = FieldAlias::new("label", "Label");
const RECIPIENT_NAME: FieldAlias = FieldAlias::new("recipient_name", "RecipientName");
const PHONE_NUMBER: FieldAlias = FieldAlias::new("phone_number", "PhoneNumber");
const STREET: FieldAlias = FieldAlias::new("street", "Street");
const CITY: FieldAlias = FieldAlias::new("city", "City");
const PROVINCE: FieldAlias = FieldAlias::new("province", "Province");
const POSTAL_CODE: FieldAlias = FieldAlias::new("postal_code", "PostalCode");
const IS_DEFAULT: FieldAlias = FieldAlias::new("is_default", "IsDefault");
const CREATED_AT: FieldAlias = FieldAlias::new("created_at", "CreatedAt");
const UPDATED_AT: FieldAlias = FieldAlias::new("updated_at", "UpdatedAt");

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Address ID.
    pub id: AddressId,
    /// Owner.
    pub user_id: Option<UserId>,
    /// Short label (e.g., "Rumah", "Kantor").
    pub label: String,
    /// Person receiving the delivery.
    pub recipient_name: String,
    /// Contact number for the courier.
    pub phone_number: String,
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// Province.
    pub province: String,
    /// Postal code.
    pub postal_code: String,
    /// Used when checkout does not pick an address.
    pub is_default: bool,
    /// When the address was saved.
    pub created_at: Option<DateTime<FixedOffset>>,
    /// When the address was last edited.
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Address {
    /// Normalize a loosely typed address record.
    ///
    /// Only `id` is required.
    pub fn from_raw(raw: &Value) -> Result<Self, CommerceError> {
        let record = RawRecord::from_value(raw, "address")?;
        Ok(Self {
            id: AddressId::new(record.require_u64(ID)?),
            user_id: record.opt_u64(USER_ID).map(UserId::new),
            label: record.string(LABEL),
            recipient_name: record.string(RECIPIENT_NAME),
            phone_number: record.string(PHONE_NUMBER),
            street: record.string(STREET),
            city: record.string(CITY),
            province: record.string(PROVINCE),
            postal_code: record.string(POSTAL_CODE),
            is_default: record.bool(IS_DEFAULT),
            created_at: record.opt_timestamp(CREATED_AT),
            updated_at: record.opt_timestamp(UPDATED_AT),
        })
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        [
            self.street.as_str(),
            self.city.as_str(),
            self.province.as_str(),
            self.postal_code.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Pick the default address, falling back to the first one.
pub fn default_address(addresses: &[Address]) -> Option<&Address> {
    addresses
        .iter()
        .find(|a| a.is_default)
        .or_else(|| addresses.first())
}
