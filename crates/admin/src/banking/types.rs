//! Wire types for the customer service.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use banking_console_core::{CustomerId, CustomerStatus, Email, Income, PhoneNumber};

// =============================================================================
// Customer Records
// =============================================================================

/// A customer record as returned by the customer service.
///
/// The console only ever holds read-only copies; every field the service
/// might send as `null` decodes to its empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Identifier assigned by the service.
    pub id: CustomerId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<PhoneNumber>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default)]
    pub income: Option<Income>,
    /// Only present for full registrations.
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    /// Registration date (simple registrations).
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Date of birth (full registrations).
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl Customer {
    /// Income used for aggregation; a missing income counts as zero.
    #[must_use]
    pub fn income_or_zero(&self) -> Income {
        self.income.unwrap_or_default()
    }

    /// Account status derived from the `active` flag.
    #[must_use]
    pub const fn status(&self) -> CustomerStatus {
        CustomerStatus::from_active(self.active)
    }

    /// "City, Country" with empty parts skipped.
    #[must_use]
    pub fn location(&self) -> String {
        [self.city.trim(), self.country.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Decode `null` as the type's default instead of failing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Registration Input Types
// =============================================================================

/// Fields shared by both registration paths, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub email: Email,
    pub phone_number: PhoneNumber,
    pub address: String,
    pub country: String,
    pub city: String,
    pub income: Income,
}

/// Body of `POST /CreateAccount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleRegistration {
    #[serde(flatten)]
    pub details: CustomerDetails,
    /// Registration date; the form defaults it to today.
    pub date: NaiveDate,
}

/// Body of `POST /`; the service rejects customers younger than 18.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullRegistration {
    #[serde(flatten)]
    pub details: CustomerDetails,
    pub date_of_birth: NaiveDate,
}

/// Body of `PUT /update/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<Income>,
}

impl CustomerUpdate {
    /// True when no field would be sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.income.is_none()
    }
}

// =============================================================================
// Mutation Results
// =============================================================================

/// Which cached views a mutation made stale.
///
/// The client never re-fetches on its own; whoever receives this value is
/// responsible for rebuilding the affected view-models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "re-fetch the views named by the invalidation"]
pub enum Invalidation {
    /// Every customer list (all, sorted, active, high income) is stale.
    CustomerLists,
    /// One customer's record is stale, and with it every list.
    Customer(CustomerId),
}

impl Invalidation {
    /// Whether the detail view for `id` must be rebuilt.
    #[must_use]
    pub fn affects_customer(self, id: CustomerId) -> bool {
        match self {
            Self::CustomerLists => false,
            Self::Customer(changed) => changed == id,
        }
    }
}

/// Result of a mutating call: the service's answer plus the views it invalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the invalidation must be consumed"]
pub struct MutationOutcome<T> {
    pub record: T,
    pub invalidation: Invalidation,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn details() -> CustomerDetails {
        CustomerDetails {
            name: "Jane Doe".to_string(),
            email: Email::parse("jane@bank.example").unwrap(),
            phone_number: PhoneNumber::parse("9876543210").unwrap(),
            address: "1 Main St".to_string(),
            country: "India".to_string(),
            city: "Pune".to_string(),
            income: Income::new(120_000),
        }
    }

    #[test]
    fn test_customer_decodes_service_payload() {
        let customer: Customer = serde_json::from_value(json!({
            "id": 2,
            "name": "B",
            "email": "b@bank.example",
            "phoneNumber": 9.87654321E9,
            "address": null,
            "city": "Pune",
            "country": "India",
            "income": 150000,
            "age": null,
            "active": true,
            "date": "2024-03-01",
            "someFutureField": "ignored"
        }))
        .unwrap();

        assert_eq!(customer.id, CustomerId::new(2));
        assert_eq!(customer.address, "");
        assert_eq!(customer.phone_number.as_ref().unwrap().as_str(), "9876543210");
        assert_eq!(customer.income, Some(Income::new(150_000)));
        assert_eq!(customer.age, None);
        assert_eq!(customer.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(customer.status(), CustomerStatus::Active);
    }

    #[test]
    fn test_customer_missing_fields_default() {
        let customer: Customer = serde_json::from_value(json!({ "id": 9 })).unwrap();
        assert!(!customer.active);
        assert_eq!(customer.income_or_zero(), Income::ZERO);
        assert_eq!(customer.location(), "");
    }

    #[test]
    fn test_location_skips_empty_parts() {
        let mut customer: Customer = serde_json::from_value(json!({ "id": 1 })).unwrap();
        customer.city = "Pune".to_string();
        assert_eq!(customer.location(), "Pune");
        customer.country = "India".to_string();
        assert_eq!(customer.location(), "Pune, India");
    }

    #[test]
    fn test_simple_registration_body() {
        let body = serde_json::to_value(SimpleRegistration {
            details: details(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "name": "Jane Doe",
                "email": "jane@bank.example",
                "phoneNumber": 9_876_543_210_u64,
                "address": "1 Main St",
                "country": "India",
                "city": "Pune",
                "income": 120_000,
                "date": "2026-01-05"
            })
        );
    }

    #[test]
    fn test_full_registration_body_uses_date_of_birth() {
        let body = serde_json::to_value(FullRegistration {
            details: details(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 7, 14).unwrap(),
        })
        .unwrap();

        assert_eq!(body["dateOfBirth"], "1990-07-14");
        assert!(body.get("date").is_none());
    }

    #[test]
    fn test_update_omits_absent_fields() {
        let update = CustomerUpdate {
            city: Some("Mumbai".to_string()),
            income: Some(Income::new(90_000)),
            ..CustomerUpdate::default()
        };

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "city": "Mumbai", "income": 90_000 })
        );
        assert!(!update.is_empty());
        assert!(CustomerUpdate::default().is_empty());
    }

    #[test]
    fn test_invalidation_scope() {
        let id = CustomerId::new(3);
        assert!(!Invalidation::CustomerLists.affects_customer(id));
        assert!(Invalidation::Customer(id).affects_customer(id));
        assert!(!Invalidation::Customer(id).affects_customer(CustomerId::new(4)));
    }
}
