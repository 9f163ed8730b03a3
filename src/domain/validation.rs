use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    RecipientEmail, RecipientName,
    recipient::{DEFAULT_COUNTRY_ISO3, RecipientDetails, RecipientField},
};

/// Field-level problems with a candidate recipient, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<RecipientField, String>);

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: RecipientField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: RecipientField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecipientField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: RecipientField, message: &str) {
        self.0.insert(field, message.to_owned());
    }
}

/// Runs every rule against `details`. Nothing short-circuits, so the result
/// lists all problems at once.
pub fn validate(details: &RecipientDetails) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    check_name(
        details,
        RecipientField::FirstNames,
        "First name is required",
        &mut errors,
    );
    check_name(
        details,
        RecipientField::LastNames,
        "Last name is required",
        &mut errors,
    );

    let email = details.get(RecipientField::EmailAddress).unwrap_or_default();
    if details.is_present(RecipientField::EmailAddress) && RecipientEmail::parse(email).is_err() {
        errors.insert(
            RecipientField::EmailAddress,
            "Please enter a valid email address",
        );
    }

    let has_account_number = details.is_present(RecipientField::BankAccountNumber);

    if has_account_number && !details.is_present(RecipientField::BankRoutingNumber) {
        errors.insert(
            RecipientField::BankRoutingNumber,
            "Routing number is required when account number is provided",
        );
    }

    let is_international = details.is_present(RecipientField::CountryIso3)
        && details.country_iso3.as_deref().map(str::trim) != Some(DEFAULT_COUNTRY_ISO3);

    // Only enforced once an account number exists; a routing number alone does
    // not make the transfer international.
    if is_international && has_account_number && !details.is_present(RecipientField::SwiftBic) {
        errors.insert(
            RecipientField::SwiftBic,
            "SWIFT/BIC code is required for international transfers",
        );
    }

    errors
}

pub fn is_valid(details: &RecipientDetails) -> bool {
    validate(details).is_valid()
}

fn check_name(
    details: &RecipientDetails,
    field: RecipientField,
    missing: &str,
    errors: &mut ValidationErrors,
) {
    if RecipientName::parse(details.get(field).unwrap_or_default()).is_err() {
        errors.insert(field, missing);
    }
}
