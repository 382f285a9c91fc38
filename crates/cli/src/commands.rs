//! CLI commands

use booking_http::ApiClient;
use booking_http::client::error::ClientError;
use booking_http::types::{
    CreateBookingRequest, ExtendBookingRequest, LoginRequest, RegisterRequest,
};
use chrono::{NaiveDate, NaiveTime, Timelike};
use clap::Subcommand;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and remember the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// List bookable zones
    Zones,

    /// List the places of a zone
    Places {
        zone_id: i64,
    },

    /// List the slots of a place
    Slots {
        place_id: i64,
        /// Only slots on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show your bookings
    History,

    /// Book a zone for a time range
    Book {
        #[arg(long)]
        zone: i64,
        /// Day of the booking (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// End time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
    },

    /// Cancel a booking
    Cancel {
        booking_id: i64,
    },

    /// Extend an active booking
    Extend {
        booking_id: i64,
        #[arg(long, default_value_t = 1)]
        hours: u8,
        #[arg(long, default_value_t = 0)]
        minutes: u8,
    },

    /// Show the notifications of a user
    Notifications {
        user_id: i64,
    },
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|err| format!("expected HH:MM, got '{value}': {err}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl Commands {
    /// Message shown when a failure carries no usable text
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::Register { .. } => "Registration failed",
            Self::Login { .. } => "Login failed",
            Self::Logout => "Logout failed",
            Self::Zones | Self::Places { .. } | Self::Slots { .. } => {
                "Could not load availability"
            }
            Self::History => "Could not load your bookings",
            Self::Book { .. } => "Could not create the booking",
            Self::Cancel { .. } => "Could not cancel the booking",
            Self::Extend { .. } => "Could not extend the booking",
            Self::Notifications { .. } => "Could not load notifications",
        }
    }

    pub async fn execute(&self, client: &ApiClient) -> Result<(), ClientError> {
        match self {
            Self::Register {
                name,
                email,
                password,
            } => {
                let request = RegisterRequest {
                    name: name.clone(),
                    email: email.clone(),
                    password: password.clone(),
                };
                print_json(&client.register(&request).await?)
            }
            Self::Login { email, password } => {
                let request = LoginRequest {
                    email: email.clone(),
                    password: password.clone(),
                };
                client.login(&request).await?;
                println!("Logged in as {email}");
                Ok(())
            }
            Self::Logout => {
                client.logout()?;
                println!("Logged out");
                Ok(())
            }
            Self::Zones => print_json(&client.zones().await?),
            Self::Places { zone_id } => print_json(&client.zone_places(*zone_id).await?),
            Self::Slots { place_id, date } => {
                print_json(&client.place_slots(*place_id, *date).await?)
            }
            Self::History => print_json(&client.booking_history().await?),
            Self::Book {
                zone,
                date,
                start,
                end,
            } => {
                let request = booking_request(*zone, *date, *start, *end);
                print_json(&client.create_booking(&request).await?)
            }
            Self::Cancel { booking_id } => print_json(&client.cancel_booking(*booking_id).await?),
            Self::Extend {
                booking_id,
                hours,
                minutes,
            } => {
                let extension = ExtendBookingRequest {
                    extend_hours: *hours,
                    extend_minutes: *minutes,
                };
                print_json(&client.extend_booking(*booking_id, &extension).await?)
            }
            Self::Notifications { user_id } => {
                print_json(&client.user_notifications(*user_id).await?)
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)] // hour < 24, minute < 60
fn booking_request(
    zone_id: i64,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> CreateBookingRequest {
    CreateBookingRequest {
        zone_id,
        date,
        start_hour: start.hour() as u8,
        start_minute: start.minute() as u8,
        end_hour: end.hour() as u8,
        end_minute: end.minute() as u8,
    }
}
