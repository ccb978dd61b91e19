use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Serialize, Serializer};
use std::fmt;

/// Id of the package used when the requested one is missing or unknown.
pub const DEFAULT_PACKAGE_ID: &str = "pro";

/// Price of a package in INR.
///
/// Enterprise deals are negotiated, so their price is `Custom` rather than a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAmount {
    Inr(Decimal),
    Custom,
}

impl PackageAmount {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            PackageAmount::Inr(value) => Some(*value),
            PackageAmount::Custom => None,
        }
    }
}

impl fmt::Display for PackageAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageAmount::Inr(value) => write!(f, "{}", value.normalize()),
            PackageAmount::Custom => f.write_str("Custom"),
        }
    }
}

// Numbers go out as JSON numbers, "Custom" as a string.
impl Serialize for PackageAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PackageAmount::Inr(value) => rust_decimal::serde::float::serialize(value, serializer),
            PackageAmount::Custom => serializer.serialize_str("Custom"),
        }
    }
}

/// A static catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub id: &'static str,
    pub name: &'static str,
    pub amount: PackageAmount,
    pub features: &'static [&'static str],
}

/// The packages offered on the pricing page, in display order.
pub fn catalog() -> [Package; 3] {
    [
        Package {
            id: "starter",
            name: "Starter",
            amount: PackageAmount::Inr(dec!(2400)),
            features: &[
                "10,000 words/month",
                "5 AI tools",
                "Basic templates",
                "Email support",
            ],
        },
        Package {
            id: "pro",
            name: "Pro",
            amount: PackageAmount::Inr(dec!(6500)),
            features: &[
                "100,000 words/month",
                "20+ AI tools",
                "Priority support",
                "Team collaboration",
            ],
        },
        Package {
            id: "enterprise",
            name: "Enterprise",
            amount: PackageAmount::Custom,
            features: &[
                "Unlimited words",
                "All features",
                "Dedicated support",
                "Custom AI training",
            ],
        },
    ]
}

/// Looks up a package by id, falling back to Pro when the id is absent or unknown.
pub fn lookup(package_id: Option<&str>) -> Package {
    let packages = catalog();
    let wanted = package_id.unwrap_or(DEFAULT_PACKAGE_ID);
    packages
        .iter()
        .find(|p| p.id == wanted)
        .or_else(|| packages.iter().find(|p| p.id == DEFAULT_PACKAGE_ID))
        .cloned()
        .unwrap_or_else(|| packages[1].clone())
}
