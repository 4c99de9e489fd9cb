//! Tour model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Tour categories offered by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TourType {
    General,
    Wildlife,
    #[serde(rename = "Winter Sports")]
    WinterSports,
    Birding,
}

impl TourType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourType::General => "General",
            TourType::Wildlife => "Wildlife",
            TourType::WinterSports => "Winter Sports",
            TourType::Birding => "Birding",
        }
    }
}

impl std::fmt::Display for TourType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TourType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "General" => Ok(TourType::General),
            "Wildlife" => Ok(TourType::Wildlife),
            "Winter Sports" => Ok(TourType::WinterSports),
            "Birding" => Ok(TourType::Birding),
            _ => Err(format!("Invalid tour type: {}", s)),
        }
    }
}

// SQLx conversion for TourType (stored as TEXT)
impl sqlx::Type<Postgres> for TourType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for TourType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for TourType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Tour record
///
/// Start and end dates are calendar-date strings with no timezone
/// semantics, matching what the booking forms submit. The price is a
/// numeric amount in the principal currency unit; display formatting is
/// left to the client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: uuid::Uuid,
    pub tour_name: String,
    pub tour_type: TourType,
    pub start_date: String,
    pub end_date: String,
    pub price: Decimal,
    pub available_seats: i32,
    pub description: String,
    pub highlights: String,
    pub image: Option<String>,
    pub is_planned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tour fields submitted through the admin add/update forms
#[derive(Debug, Clone)]
pub struct TourInput {
    pub tour_name: String,
    pub tour_type: TourType,
    pub start_date: String,
    pub end_date: String,
    pub price: Decimal,
    pub available_seats: i32,
    pub description: String,
    pub highlights: String,
    pub is_planned: bool,
}

impl TourInput {
    /// Reject an end date that precedes the start date, when both fields
    /// parse as calendar dates. Free-form date strings pass through.
    pub fn validate_dates(&self) -> Result<(), String> {
        let start = chrono::NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d");
        let end = chrono::NaiveDate::parse_from_str(&self.end_date, "%Y-%m-%d");
        if let (Ok(start), Ok(end)) = (start, end) {
            if end < start {
                return Err("End date cannot precede start date".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(start: &str, end: &str) -> TourInput {
        TourInput {
            tour_name: "Markha Valley Trek".to_string(),
            tour_type: TourType::General,
            start_date: start.to_string(),
            end_date: end.to_string(),
            price: dec!(15000),
            available_seats: 12,
            description: "Classic tea-house trek".to_string(),
            highlights: "Gandala Pass,Hankar village".to_string(),
            is_planned: true,
        }
    }

    #[test]
    fn tour_type_round_trips_display_strings() {
        for t in [
            TourType::General,
            TourType::Wildlife,
            TourType::WinterSports,
            TourType::Birding,
        ] {
            assert_eq!(t.as_str().parse::<TourType>().unwrap(), t);
        }
        assert!("Trekking".parse::<TourType>().is_err());
    }

    #[test]
    fn end_date_before_start_date_is_rejected() {
        assert!(input("2025-06-01", "2025-06-05").validate_dates().is_ok());
        assert!(input("2025-06-05", "2025-06-01").validate_dates().is_err());
        // non-ISO strings are not interpreted
        assert!(input("June 2025", "May 2025").validate_dates().is_ok());
    }
}
