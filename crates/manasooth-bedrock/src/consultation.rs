//! Simulated consultation booking. No calendar or model is involved; about
//! one request in ten is turned away as if every slot were taken.

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

const HIGH_DEMAND: &str = "Sorry, we were unable to book the consultation at this time due to high demand. Please try selecting a different slot or try again later.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingRequest {
    /// Requested day, e.g. `2025-06-01`.
    pub date: String,
    /// Requested slot, e.g. `10:30 AM`.
    pub time: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub booking_id: Option<String>,
}

/// Chance that a booking is turned away.
pub const DECLINE_RATE: f64 = 0.1;

/// Book a slot. `decline` is the high-demand draw, made by the caller so
/// that it can be fixed in tests; `rng` supplies the booking ID suffix.
pub fn book_consultation<R: Rng>(
    request: &BookingRequest,
    decline: bool,
    now: jiff::Timestamp,
    rng: &mut R,
) -> BookingOutcome {
    info!(date = %request.date, time = %request.time, "consultation booking requested");

    if decline {
        info!("consultation booking declined");
        return BookingOutcome {
            success: false,
            message: HIGH_DEMAND.to_string(),
            booking_id: None,
        };
    }

    let booking_id = booking_id(now, rng);
    info!(booking_id = %booking_id, "consultation booked");
    BookingOutcome {
        success: true,
        message: format!(
            "Consultation successfully booked for {} at {}. Your Booking ID is {}. Please check your email for confirmation (simulated).",
            request.date, request.time, booking_id
        ),
        booking_id: Some(booking_id),
    }
}

/// `MANA-<base36 epoch millis>-<5 random alphanumerics>`, upper case.
pub fn booking_id<R: Rng>(now: jiff::Timestamp, rng: &mut R) -> String {
    let millis = u64::try_from(now.as_millisecond()).unwrap_or(0);
    let suffix: String = (0..5)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_uppercase())
        .collect();
    format!("MANA-{}-{suffix}", base36(millis))
}

/// Epoch millis in base 36, the way browsers print `Date.now().toString(36)`.
fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
