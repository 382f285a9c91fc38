//! Booking client methods

use super::{ApiClient, ClientError};
use crate::types::{
    Booking, CancelBookingRequest, CreateBookingRequest, ExtendBookingRequest, Zone,
};
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// List bookable zones
    pub async fn zones(&self) -> Result<Vec<Zone>, ClientError> {
        let request = self.request(Method::GET, "/bookings/zones");
        self.execute(request).await
    }

    /// List the places of a zone
    pub async fn zone_places(&self, zone_id: i64) -> Result<Vec<Value>, ClientError> {
        let request = self.request(Method::GET, &format!("/bookings/zones/{zone_id}/places"));
        self.execute(request).await
    }

    /// List the slots of a place, optionally restricted to one day
    pub async fn place_slots(
        &self,
        place_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Value>, ClientError> {
        let mut request = self.request(Method::GET, &format!("/bookings/places/{place_id}/slots"));
        if let Some(date) = date {
            request = request.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }
        self.execute(request).await
    }

    /// Bookings of the current user
    pub async fn booking_history(&self) -> Result<Vec<Booking>, ClientError> {
        let request = self.request(Method::GET, "/bookings/history");
        self.execute(request).await
    }

    /// Book a zone for a time range
    pub async fn create_booking(
        &self,
        booking: &CreateBookingRequest,
    ) -> Result<Booking, ClientError> {
        let request = self.request(Method::POST, "/bookings/by-time").json(booking);
        self.execute(request).await
    }

    /// Cancel a booking
    pub async fn cancel_booking(&self, booking_id: i64) -> Result<Booking, ClientError> {
        let request = self
            .request(Method::POST, "/bookings/cancel")
            .json(&CancelBookingRequest { booking_id });
        self.execute(request).await
    }

    /// Extend an active booking
    pub async fn extend_booking(
        &self,
        booking_id: i64,
        extension: &ExtendBookingRequest,
    ) -> Result<Booking, ClientError> {
        let request = self
            .request(Method::POST, &format!("/bookings/{booking_id}/extend"))
            .json(extension);
        self.execute(request).await
    }
}
