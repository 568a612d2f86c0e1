//! Display-precision helpers for serialized results.
//!
//! Results keep full `f64` precision in memory. These `serialize_with`
//! adapters round at the JSON boundary only, matching the precision the
//! web client has always received.

use serde::Serializer;

/// Round `value` to `decimals` places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn serialize_rounded<S: Serializer>(value: f64, decimals: i32, serializer: S) -> Result<S::Ok, S::Error> {
    if decimals == 0 && value.is_finite() {
        serializer.serialize_i64(value.round() as i64)
    } else {
        serializer.serialize_f64(round_to(value, decimals))
    }
}

pub fn dp0<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serialize_rounded(*value, 0, serializer)
}

pub fn dp1<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serialize_rounded(*value, 1, serializer)
}

pub fn dp2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serialize_rounded(*value, 2, serializer)
}

pub fn dp3<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serialize_rounded(*value, 3, serializer)
}

pub fn dp4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serialize_rounded(*value, 4, serializer)
}
