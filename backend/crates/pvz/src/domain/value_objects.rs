//! Domain Value Objects
//!
//! Closed vocabularies of the pickup point domain and listing parameters.
//! Wire spellings are the storage spellings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cities where pickup points may be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "Москва")]
    Moscow,
    #[serde(rename = "Санкт-Петербург")]
    SaintPetersburg,
    #[serde(rename = "Казань")]
    Kazan,
}

impl City {
    pub const ALL: [City; 3] = [City::Moscow, City::SaintPetersburg, City::Kazan];

    pub const fn code(&self) -> &'static str {
        match self {
            City::Moscow => "Москва",
            City::SaintPetersburg => "Санкт-Петербург",
            City::Kazan => "Казань",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "электроника")]
    Electronics,
    #[serde(rename = "одежда")]
    Clothes,
    #[serde(rename = "обувь")]
    Shoes,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Electronics,
        ProductType::Clothes,
        ProductType::Shoes,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            ProductType::Electronics => "электроника",
            ProductType::Clothes => "одежда",
            ProductType::Shoes => "обувь",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// `in_progress → close`, exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatus {
    InProgress,
    Close,
}

impl ReceptionStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            ReceptionStatus::InProgress => "in_progress",
            ReceptionStatus::Close => "close",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "in_progress" => Some(ReceptionStatus::InProgress),
            "close" => Some(ReceptionStatus::Close),
            _ => None,
        }
    }
}

macro_rules! display_via_code {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    )*};
}

display_via_code!(City, ProductType, ReceptionStatus);

/// Inclusive reception start window; either bound may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// `None` when `start` is after `end`
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Option<Self> {
        match (start, end) {
            (Some(s), Some(e)) if s > e => None,
            _ => Some(Self { start, end }),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|s| at >= s) && self.end.is_none_or(|e| at <= e)
    }
}

/// 1-based page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub limit: u32,
}

impl Page {
    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.limit)
    }
}
