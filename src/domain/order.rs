use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

const ORDER_PREFIX: &str = "ORD";
const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Client-side order reference shown on the checkout page.
///
/// Generated once per page visit as `ORD` followed by the upper-case base-36 encoding
/// of the creation time in milliseconds. Two ids created in the same millisecond collide;
/// the backend issues the authoritative order id on submit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        Self::from_millis(millis)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(format!("{ORDER_PREFIX}{}", to_base36(millis)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // digits are ASCII
    String::from_utf8_lossy(&digits).into_owned()
}
