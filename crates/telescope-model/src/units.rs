// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Unit conversions.
//!
//! Call-center figures are usually quoted as calls per hour and average
//! handling times in seconds, while every formula works with per-second
//! rates. These helpers perform the conversions and nothing else; validation
//! happens when the resulting rates enter `TrafficParameters`.

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Converts a per-hour volume into a per-second rate.
///
/// ```rust
/// use telescope_model::units::per_hour;
/// assert_eq!(per_hour(7200.0), 2.0);
/// ```
#[inline]
pub fn per_hour(volume: f64) -> f64 {
    volume / SECONDS_PER_HOUR
}

/// Converts a per-second rate into a per-hour volume.
#[inline]
pub fn to_per_hour(rate: f64) -> f64 {
    rate * SECONDS_PER_HOUR
}

/// Converts an average handling time in seconds into a service rate.
///
/// ```rust
/// use telescope_model::units::rate_from_handle_time;
/// assert_eq!(rate_from_handle_time(250.0), 0.004);
/// ```
#[inline]
pub fn rate_from_handle_time(seconds: f64) -> f64 {
    1.0 / seconds
}

/// Converts a service rate into an average handling time in seconds.
#[inline]
pub fn handle_time_from_rate(rate: f64) -> f64 {
    1.0 / rate
}
