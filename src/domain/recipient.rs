use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RecipientId(pub i64);

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub Uuid);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The signed-in dashboard user on whose behalf recipients are managed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
}

impl User {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("{0} is not a recipient field")]
pub struct UnknownField(pub String);

/// Every editable attribute of a recipient, named the way it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientField {
    FirstNames,
    LastNames,
    EmailAddress,
    TelephoneNumber,
    #[serde(rename = "street_1")]
    Street1,
    #[serde(rename = "street_2")]
    Street2,
    City,
    Region,
    PostalCode,
    #[serde(rename = "country_iso3")]
    CountryIso3,
    BankAccountNumber,
    BankRoutingNumber,
    BankName,
    SwiftBic,
    #[serde(rename = "bank_street_1")]
    BankStreet1,
    #[serde(rename = "bank_street_2")]
    BankStreet2,
    BankCity,
    BankRegion,
    #[serde(rename = "bank_country_iso3")]
    BankCountryIso3,
}

impl RecipientField {
    pub const ALL: [RecipientField; 19] = [
        RecipientField::FirstNames,
        RecipientField::LastNames,
        RecipientField::EmailAddress,
        RecipientField::TelephoneNumber,
        RecipientField::Street1,
        RecipientField::Street2,
        RecipientField::City,
        RecipientField::Region,
        RecipientField::PostalCode,
        RecipientField::CountryIso3,
        RecipientField::BankAccountNumber,
        RecipientField::BankRoutingNumber,
        RecipientField::BankName,
        RecipientField::SwiftBic,
        RecipientField::BankStreet1,
        RecipientField::BankStreet2,
        RecipientField::BankCity,
        RecipientField::BankRegion,
        RecipientField::BankCountryIso3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientField::FirstNames => "first_names",
            RecipientField::LastNames => "last_names",
            RecipientField::EmailAddress => "email_address",
            RecipientField::TelephoneNumber => "telephone_number",
            RecipientField::Street1 => "street_1",
            RecipientField::Street2 => "street_2",
            RecipientField::City => "city",
            RecipientField::Region => "region",
            RecipientField::PostalCode => "postal_code",
            RecipientField::CountryIso3 => "country_iso3",
            RecipientField::BankAccountNumber => "bank_account_number",
            RecipientField::BankRoutingNumber => "bank_routing_number",
            RecipientField::BankName => "bank_name",
            RecipientField::SwiftBic => "swift_bic",
            RecipientField::BankStreet1 => "bank_street_1",
            RecipientField::BankStreet2 => "bank_street_2",
            RecipientField::BankCity => "bank_city",
            RecipientField::BankRegion => "bank_region",
            RecipientField::BankCountryIso3 => "bank_country_iso3",
        }
    }
}

impl fmt::Display for RecipientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipientField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecipientField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

pub const DEFAULT_COUNTRY_ISO3: &str = "USA";

/// The descriptive part of a recipient. Every attribute is optional; a blank
/// value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct RecipientDetails {
    pub first_names: Option<String>,
    pub last_names: Option<String>,
    pub email_address: Option<String>,
    pub telephone_number: Option<String>,
    pub street_1: Option<String>,
    pub street_2: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country_iso3: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_routing_number: Option<String>,
    pub bank_name: Option<String>,
    pub swift_bic: Option<String>,
    pub bank_street_1: Option<String>,
    pub bank_street_2: Option<String>,
    pub bank_city: Option<String>,
    pub bank_region: Option<String>,
    pub bank_country_iso3: Option<String>,
}

impl RecipientDetails {
    /// The blank record the add dialog starts from.
    pub fn empty_form() -> Self {
        let mut details = Self::default();
        for field in RecipientField::ALL {
            *details.slot_mut(field) = Some(String::new());
        }
        details.country_iso3 = Some(DEFAULT_COUNTRY_ISO3.to_owned());
        details
    }

    pub fn get(&self, field: RecipientField) -> Option<&str> {
        let slot = match field {
            RecipientField::FirstNames => &self.first_names,
            RecipientField::LastNames => &self.last_names,
            RecipientField::EmailAddress => &self.email_address,
            RecipientField::TelephoneNumber => &self.telephone_number,
            RecipientField::Street1 => &self.street_1,
            RecipientField::Street2 => &self.street_2,
            RecipientField::City => &self.city,
            RecipientField::Region => &self.region,
            RecipientField::PostalCode => &self.postal_code,
            RecipientField::CountryIso3 => &self.country_iso3,
            RecipientField::BankAccountNumber => &self.bank_account_number,
            RecipientField::BankRoutingNumber => &self.bank_routing_number,
            RecipientField::BankName => &self.bank_name,
            RecipientField::SwiftBic => &self.swift_bic,
            RecipientField::BankStreet1 => &self.bank_street_1,
            RecipientField::BankStreet2 => &self.bank_street_2,
            RecipientField::BankCity => &self.bank_city,
            RecipientField::BankRegion => &self.bank_region,
            RecipientField::BankCountryIso3 => &self.bank_country_iso3,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, field: RecipientField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// True when the field holds something other than whitespace.
    pub fn is_present(&self, field: RecipientField) -> bool {
        self.get(field).is_some_and(|value| !value.trim().is_empty())
    }

    /// Copies every `Some` attribute of `changes` over this record.
    pub fn apply(&mut self, changes: &RecipientDetails) {
        for field in RecipientField::ALL {
            if let Some(value) = changes.get(field) {
                self.set(field, Some(value.to_owned()));
            }
        }
    }

    fn slot_mut(&mut self, field: RecipientField) -> &mut Option<String> {
        match field {
            RecipientField::FirstNames => &mut self.first_names,
            RecipientField::LastNames => &mut self.last_names,
            RecipientField::EmailAddress => &mut self.email_address,
            RecipientField::TelephoneNumber => &mut self.telephone_number,
            RecipientField::Street1 => &mut self.street_1,
            RecipientField::Street2 => &mut self.street_2,
            RecipientField::City => &mut self.city,
            RecipientField::Region => &mut self.region,
            RecipientField::PostalCode => &mut self.postal_code,
            RecipientField::CountryIso3 => &mut self.country_iso3,
            RecipientField::BankAccountNumber => &mut self.bank_account_number,
            RecipientField::BankRoutingNumber => &mut self.bank_routing_number,
            RecipientField::BankName => &mut self.bank_name,
            RecipientField::SwiftBic => &mut self.swift_bic,
            RecipientField::BankStreet1 => &mut self.bank_street_1,
            RecipientField::BankStreet2 => &mut self.bank_street_2,
            RecipientField::BankCity => &mut self.bank_city,
            RecipientField::BankRegion => &mut self.bank_region,
            RecipientField::BankCountryIso3 => &mut self.bank_country_iso3,
        }
    }
}

/// A persisted recipient. The id is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipient {
    recipient_id: RecipientId,
    pub user_id: UserId,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub details: RecipientDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipient {
    pub fn new(
        recipient_id: RecipientId,
        user_id: UserId,
        details: RecipientDetails,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            recipient_id,
            user_id,
            details,
            created_at,
            updated_at,
        }
    }

    pub fn recipient_id(&self) -> RecipientId {
        self.recipient_id
    }
}

/// What the edit buffer holds: a recipient that may not have been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientDraft {
    pub recipient_id: Option<RecipientId>,
    pub details: RecipientDetails,
}

impl RecipientDraft {
    pub fn empty() -> Self {
        Self {
            recipient_id: None,
            details: RecipientDetails::empty_form(),
        }
    }
}

impl From<&Recipient> for RecipientDraft {
    fn from(recipient: &Recipient) -> Self {
        Self {
            recipient_id: Some(recipient.recipient_id),
            details: recipient.details.clone(),
        }
    }
}

/// A partial update keyed by id. `None` attributes are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientUpdate {
    pub recipient_id: RecipientId,
    pub updated_recipient: RecipientDetails,
}
