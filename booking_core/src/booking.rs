//! # Booking Record
//!
//! The booking data collected by the earlier wizard steps. It arrives
//! pre-validated and is treated as read-only here; the only logic is the
//! display composition of names, locations and addresses.
//!
//! JSON field names are camelCase to match what the collection steps emit:
//!
//! ```json
//! {
//!   "student": { "firstName": "Omar", "secondName": "Adel", "thirdName": "Samir",
//!                "fourthName": "Hassan", "age": 11, "gender": "Male" },
//!   "country": "Egypt",
//!   "city": "Cairo",
//!   "address": { "buildingNumber": "12", "streetName": "Nile St",
//!                "districtName": "Zamalek", "floorNumber": "3" },
//!   "payment": { "method": "vodafone", "transactionId": "TXN-88213" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::payment::PaymentMethod;

/// Student identity fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub first_name: String,
    pub second_name: String,
    pub third_name: String,
    pub fourth_name: String,
    pub age: u32,
    pub gender: String,
}

impl StudentInfo {
    /// The four name parts joined by single spaces
    pub fn full_name(&self) -> String {
        [
            self.first_name.as_str(),
            self.second_name.as_str(),
            self.third_name.as_str(),
            self.fourth_name.as_str(),
        ]
        .join(" ")
    }
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub building_number: String,
    pub street_name: String,
    pub district_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment_number: Option<String>,
}

impl Address {
    /// One-line address.
    ///
    /// Floor and apartment segments are appended only when present and
    /// non-empty, floor first.
    ///
    /// ```rust
    /// use booking_core::booking::Address;
    ///
    /// let mut address = Address {
    ///     building_number: "12".into(),
    ///     street_name: "Nile St".into(),
    ///     district_name: "Zamalek".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(address.line(), "12 Nile St, Zamalek");
    ///
    /// address.floor_number = Some("3".into());
    /// address.apartment_number = Some("7B".into());
    /// assert_eq!(address.line(), "12 Nile St, Zamalek, Floor 3, Apt 7B");
    /// ```
    pub fn line(&self) -> String {
        let mut line = format!(
            "{} {}, {}",
            self.building_number, self.street_name, self.district_name
        );
        if let Some(floor) = present(&self.floor_number) {
            line.push_str(", Floor ");
            line.push_str(floor);
        }
        if let Some(apt) = present(&self.apartment_number) {
            line.push_str(", Apt ");
            line.push_str(apt);
        }
        line
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Chosen payment method and the externally assigned transaction id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Raw method selector (e.g. `"vodafone"`)
    pub method: String,
    pub transaction_id: String,
}

impl PaymentDetails {
    pub fn payment_method(&self) -> PaymentMethod {
        PaymentMethod::from_selector(&self.method)
    }
}

/// Everything the earlier booking steps collected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub student: StudentInfo,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub address: Address,
    pub payment: PaymentDetails,
}

impl BookingRecord {
    /// "City, Country" when a city is known, otherwise just the country
    pub fn location(&self) -> String {
        match present(&self.city) {
            Some(city) => format!("{}, {}", city, self.country),
            None => self.country.clone(),
        }
    }

    /// Parse a booking record from JSON text
    pub fn from_json(json: &str) -> BookingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a booking record from a JSON file
    pub fn load(path: &Path) -> BookingResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| BookingError::file_error("read", path.display().to_string(), e.to_string()))?;
        let record = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded booking record");
        Ok(record)
    }

    /// Demo booking used when the front ends are started without a file
    pub fn sample() -> Self {
        BookingRecord {
            student: StudentInfo {
                first_name: "Omar".to_string(),
                second_name: "Adel".to_string(),
                third_name: "Samir".to_string(),
                fourth_name: "Hassan".to_string(),
                age: 11,
                gender: "Male".to_string(),
            },
            country: "Egypt".to_string(),
            city: Some("Cairo".to_string()),
            address: Address {
                building_number: "12".to_string(),
                street_name: "Nile Street".to_string(),
                district_name: "Zamalek".to_string(),
                floor_number: Some("3".to_string()),
                apartment_number: Some("7B".to_string()),
            },
            payment: PaymentDetails {
                method: "vodafone".to_string(),
                transaction_id: "TXN-482913".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const JSON: &str = r#"{
        "student": { "firstName": "Laila", "secondName": "Mona", "thirdName": "Karim",
                     "fourthName": "Nabil", "age": 12, "gender": "Female" },
        "country": "Egypt",
        "address": { "buildingNumber": "4", "streetName": "Tahrir St", "districtName": "Dokki" },
        "payment": { "method": "endc", "transactionId": "TX-1" }
    }"#;

    #[test]
    fn test_parse_upstream_json() {
        let record = BookingRecord::from_json(JSON).unwrap();
        assert_eq!(record.student.full_name(), "Laila Mona Karim Nabil");
        assert_eq!(record.city, None);
        assert_eq!(record.address.floor_number, None);
        assert_eq!(record.payment.payment_method(), PaymentMethod::EndCash);
    }

    #[test]
    fn test_address_without_floor_or_apartment() {
        let record = BookingRecord::from_json(JSON).unwrap();
        let line = record.address.line();
        assert_eq!(line, "4 Tahrir St, Dokki");
        assert!(!line.contains(", Floor"));
        assert!(!line.contains(", Apt"));
    }

    #[test]
    fn test_address_with_floor_and_apartment_in_order() {
        let mut address = BookingRecord::from_json(JSON).unwrap().address;
        address.apartment_number = Some("9".to_string());
        address.floor_number = Some("2".to_string());
        assert_eq!(address.line(), "4 Tahrir St, Dokki, Floor 2, Apt 9");
    }

    #[test]
    fn test_address_with_only_apartment() {
        let mut address = BookingRecord::from_json(JSON).unwrap().address;
        address.apartment_number = Some("9".to_string());
        assert_eq!(address.line(), "4 Tahrir St, Dokki, Apt 9");
    }

    #[test]
    fn test_empty_optional_segments_are_omitted() {
        let mut address = BookingRecord::from_json(JSON).unwrap().address;
        address.floor_number = Some(String::new());
        assert_eq!(address.line(), "4 Tahrir St, Dokki");
    }

    #[test]
    fn test_location() {
        let mut record = BookingRecord::from_json(JSON).unwrap();
        assert_eq!(record.location(), "Egypt");
        record.city = Some("Giza".to_string());
        assert_eq!(record.location(), "Giza, Egypt");
    }

    #[test]
    fn test_invalid_json() {
        let err = BookingRecord::from_json("{\"student\": 3}").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_sample_serializes_camel_case() {
        let json = serde_json::to_string(&BookingRecord::sample()).unwrap();
        assert!(json.contains("\"transactionId\""));
        assert!(json.contains("\"floorNumber\""));
    }
}
