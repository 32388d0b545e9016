use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, ensure, non_blank};

crate::text_enum!(UnitType {
    Apartment => "APARTMENT",
    Studio => "STUDIO",
    Penthouse => "PENTHOUSE",
    Commercial => "COMMERCIAL",
    Storage => "STORAGE",
    Parking => "PARKING",
});

crate::text_enum!(OccupancyStatus {
    Vacant => "VACANT",
    Occupied => "OCCUPIED",
    UnderRenovation => "UNDER_RENOVATION",
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnitFields {
    pub property_id: Uuid,
    pub apartment_number: String,
    pub floor: Option<i32>,
    pub room_count: Option<i32>,
    #[serde(default = "default_unit_type")]
    pub unit_type: UnitType,
    #[schema(value_type = Option<String>)]
    pub area: Option<Decimal>,
    #[serde(default = "default_occupancy")]
    pub occupancy_status: OccupancyStatus,
    #[serde(default)]
    pub is_occupied: bool,
    #[schema(value_type = Option<String>)]
    pub current_rent: Option<Decimal>,
    pub notes: Option<String>,
}

fn default_unit_type() -> UnitType {
    UnitType::Apartment
}

fn default_occupancy() -> OccupancyStatus {
    OccupancyStatus::Vacant
}

impl UnitFields {
    pub fn validate(&self) -> RuleResult {
        non_blank(&self.apartment_number, "apartment_number")?;
        if let Some(rooms) = self.room_count {
            ensure(rooms >= 0, "room_count must not be negative")?;
        }
        if let Some(area) = self.area {
            ensure(area >= Decimal::ZERO, "area must not be negative")?;
        }
        if let Some(rent) = self.current_rent {
            ensure(rent >= Decimal::ZERO, "current_rent must not be negative")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Unit {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: UnitFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UnitPatch {
    pub apartment_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<i32>)]
    pub floor: DoubleOption<i32>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<i32>)]
    pub room_count: DoubleOption<i32>,
    pub unit_type: Option<UnitType>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub area: DoubleOption<Decimal>,
    pub occupancy_status: Option<OccupancyStatus>,
    pub is_occupied: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub current_rent: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl UnitPatch {
    pub fn apply(self, f: &mut UnitFields) {
        set_if(self.apartment_number, &mut f.apartment_number);
        self.floor.apply_to(&mut f.floor);
        self.room_count.apply_to(&mut f.room_count);
        set_if(self.unit_type, &mut f.unit_type);
        self.area.apply_to(&mut f.area);
        set_if(self.occupancy_status, &mut f.occupancy_status);
        set_if(self.is_occupied, &mut f.is_occupied);
        self.current_rent.apply_to(&mut f.current_rent);
        self.notes.apply_to(&mut f.notes);
    }
}

/// Total order on apartment numbers: integers by value first, then every
/// other label lexically.
pub fn compare_apartment_numbers(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_apartment_numbers_sort_numerically() {
        let mut v = vec!["10", "2", "1", "B", "A"];
        v.sort_by(|a, b| compare_apartment_numbers(a, b));
        assert_eq!(v[..3], ["1", "2", "10"]);
        assert_eq!(compare_apartment_numbers("A", "B"), Ordering::Less);
    }

    #[test]
    fn mixed_apartment_labels_sort_without_cycles() {
        assert_eq!(compare_apartment_numbers("2", "10"), Ordering::Less);
        assert_eq!(compare_apartment_numbers("10", "1a"), Ordering::Less);
        assert_eq!(compare_apartment_numbers("1a", "2"), Ordering::Greater);

        let mut v: Vec<String> = (1..=40)
            .flat_map(|n| [n.to_string(), format!("{n}a")])
            .chain((60..100).map(|n| n.to_string()))
            .rev()
            .collect();
        v.sort_by(|a, b| compare_apartment_numbers(a, b));
        assert_eq!(v.len(), 120);
        assert_eq!(v[0], "1");
        assert_eq!(v[79], "99");
        assert_eq!(v[80], "10a");
        assert!(v[80..].iter().all(|s| s.ends_with('a')));
        assert!(v.windows(2).all(|w| compare_apartment_numbers(&w[0], &w[1]) != Ordering::Greater));
    }

    #[test]
    fn unit_defaults_to_vacant_apartment() {
        let json = format!(
            r#"{{"property_id":"{}","apartment_number":"3"}}"#,
            Uuid::new_v4()
        );
        let f: UnitFields = serde_json::from_str(&json).unwrap();
        assert_eq!(f.unit_type, UnitType::Apartment);
        assert_eq!(f.occupancy_status, OccupancyStatus::Vacant);
        assert!(!f.is_occupied);
        assert!(f.validate().is_ok());
    }
}
