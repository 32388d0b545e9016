use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option};

/// Land-registry identifiers (gush = block, chelka = parcel).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PlotInfoFields {
    pub gush: Option<String>,
    pub chelka: Option<String>,
    pub sub_chelka: Option<String>,
    pub registry_number: Option<String>,
    pub registry_office: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlotInfo {
    pub id: Uuid,
    pub account_id: Uuid,
    pub property_id: Uuid,
    #[serde(flatten)]
    pub fields: PlotInfoFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PlotInfoPatch {
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub gush: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub chelka: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub sub_chelka: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub registry_number: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub registry_office: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl PlotInfoPatch {
    pub fn apply(self, f: &mut PlotInfoFields) {
        self.gush.apply_to(&mut f.gush);
        self.chelka.apply_to(&mut f.chelka);
        self.sub_chelka.apply_to(&mut f.sub_chelka);
        self.registry_number.apply_to(&mut f.registry_number);
        self.registry_office.apply_to(&mut f.registry_office);
        self.notes.apply_to(&mut f.notes);
    }
}
