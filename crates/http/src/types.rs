//! Request and response bodies of the booking API gateway

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `POST /users/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `POST /users/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Access token issued by `POST /users/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// A bookable zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub closure_reason: Option<String>,
    #[serde(default)]
    pub closed_until: Option<String>,
}

fn default_true() -> bool {
    true
}

/// A booking as returned by the history and mutation endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub status: String,
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub zone_address: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// `POST /bookings/by-time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub zone_id: i64,
    pub date: NaiveDate,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

/// `POST /bookings/cancel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    pub booking_id: i64,
}

/// `POST /bookings/{id}/extend`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendBookingRequest {
    pub extend_hours: u8,
    pub extend_minutes: u8,
}

impl Default for ExtendBookingRequest {
    fn default() -> Self {
        Self {
            extend_hours: 1,
            extend_minutes: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_booking_serializes_iso_date() {
        let request = CreateBookingRequest {
            zone_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start_hour: 10,
            start_minute: 0,
            end_hour: 12,
            end_minute: 30,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "zone_id": 1,
                "date": "2024-01-01",
                "start_hour": 10,
                "start_minute": 0,
                "end_hour": 12,
                "end_minute": 30
            })
        );
    }

    #[test]
    fn zone_tolerates_missing_optional_fields() {
        let zone: Zone = serde_json::from_value(json!({ "id": 1, "name": "Zone 1" })).unwrap();
        assert!(zone.is_active);
        assert_eq!(zone.address, None);
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let token: TokenResponse =
            serde_json::from_value(json!({ "access_token": "abc" })).unwrap();
        assert_eq!(token.token_type, "bearer");
    }
}
