use std::collections::HashMap;

use uuid::Uuid;

use crate::application::dto::units::{UnitFilter, UnitRecord, UnitView};
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::lease_repository::LeaseRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::application::ports::unit_repository::UnitRepository;
use crate::domain::leases::{Lease, LeaseStatus};
use crate::domain::units::{Unit, UnitFields, UnitPatch, compare_apartment_numbers};

const ENTITY: &str = "Unit";

pub struct ListUnits<'a, R, L>
where
    R: UnitRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub repo: &'a R,
    pub leases: &'a L,
}

impl<'a, R, L> ListUnits<'a, R, L>
where
    R: UnitRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, filter: &UnitFilter) -> ServiceResult<Vec<UnitView>> {
        let records = self.repo.list(account_id, filter).await?;
        let ids: Vec<Uuid> = records.iter().map(|r| r.unit.id).collect();
        let active = self
            .leases
            .list_for_units(account_id, &ids, &[LeaseStatus::Active])
            .await?;
        Ok(with_active_leases(records, active))
    }
}

pub struct GetUnit<'a, R, L>
where
    R: UnitRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub repo: &'a R,
    pub leases: &'a L,
}

impl<'a, R, L> GetUnit<'a, R, L>
where
    R: UnitRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<UnitView> {
        let record = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let active = self
            .leases
            .list_for_units(account_id, &[id], &[LeaseStatus::Active])
            .await?;
        let mut views = with_active_leases(vec![record], active);
        views.pop().or_not_found(ENTITY)
    }
}

/// Joins each unit with its active lease and sorts by address, then apartment number.
pub(crate) fn with_active_leases(records: Vec<UnitRecord>, active: Vec<Lease>) -> Vec<UnitView> {
    let mut by_unit: HashMap<Uuid, Lease> = HashMap::new();
    for lease in active {
        by_unit.entry(lease.fields.unit_id).or_insert(lease);
    }
    let mut views: Vec<UnitView> = records
        .into_iter()
        .map(|r| UnitView {
            active_lease: by_unit.remove(&r.unit.id),
            unit: r.unit,
            property_address: r.property_address,
        })
        .collect();
    views.sort_by(|a, b| {
        a.property_address.cmp(&b.property_address).then_with(|| {
            compare_apartment_numbers(&a.unit.fields.apartment_number, &b.unit.fields.apartment_number)
        })
    });
    views
}

pub struct CreateUnit<'a, R, P>
where
    R: UnitRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> CreateUnit<'a, R, P>
where
    R: UnitRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, fields: UnitFields) -> ServiceResult<Unit> {
        fields.validate()?;
        self.properties
            .get(account_id, fields.property_id)
            .await?
            .or_not_found("Property")?;
        ensure_number_free(self.repo, account_id, &fields, None).await?;
        Ok(self.repo.insert(account_id, &fields).await?)
    }
}

pub struct UpdateUnit<'a, R: UnitRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UnitRepository + ?Sized> UpdateUnit<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid, patch: UnitPatch) -> ServiceResult<Unit> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.unit.fields;
        patch.apply(&mut fields);
        fields.validate()?;
        ensure_number_free(self.repo, account_id, &fields, Some(id)).await?;
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct DeleteUnit<'a, R: UnitRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UnitRepository + ?Sized> DeleteUnit<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let leases = self.repo.count_leases(account_id, id).await?;
        if leases > 0 {
            return Err(ServiceError::conflict(format!(
                "Cannot delete unit with {leases} lease(s)"
            )));
        }
        self.repo.delete(account_id, id).await?;
        Ok(())
    }
}

async fn ensure_number_free<R: UnitRepository + ?Sized>(
    repo: &R,
    account_id: Uuid,
    fields: &UnitFields,
    exclude: Option<Uuid>,
) -> ServiceResult<()> {
    let taken = repo
        .find_by_number(account_id, fields.property_id, &fields.apartment_number, exclude)
        .await?;
    match taken {
        Some(_) => Err(ServiceError::conflict(format!(
            "Apartment {} already exists in this property",
            fields.apartment_number
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::leases::LeaseFields;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn record(address: &str, number: &str) -> UnitRecord {
        let fields: UnitFields = serde_json::from_value(serde_json::json!({
            "property_id": Uuid::nil(),
            "apartment_number": number,
        }))
        .unwrap();
        UnitRecord {
            unit: Unit {
                id: Uuid::new_v4(),
                account_id: Uuid::nil(),
                fields,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            property_address: address.into(),
        }
    }

    fn active_lease(unit_id: Uuid) -> Lease {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        Lease {
            id: Uuid::new_v4(),
            account_id: Uuid::nil(),
            fields: LeaseFields {
                unit_id,
                tenant_id: Uuid::new_v4(),
                start_date: d("2024-01-01"),
                end_date: d("2024-12-31"),
                monthly_rent: dec!(4000),
                payment_to: "Owner".into(),
                notes: None,
            },
            status: LeaseStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn units_sort_by_address_then_numeric_apartment() {
        let records = vec![
            record("הרצל 10", "10"),
            record("ביאליק 3", "1"),
            record("הרצל 10", "2"),
        ];
        let views = with_active_leases(records, vec![]);
        let order: Vec<(&str, &str)> = views
            .iter()
            .map(|v| (v.property_address.as_str(), v.unit.fields.apartment_number.as_str()))
            .collect();
        assert_eq!(order, vec![("ביאליק 3", "1"), ("הרצל 10", "2"), ("הרצל 10", "10")]);
    }

    #[test]
    fn active_lease_is_attached_to_its_unit_only() {
        let records = vec![record("A", "1"), record("A", "2")];
        let leased = records[1].unit.id;
        let views = with_active_leases(records, vec![active_lease(leased)]);
        assert!(views[0].active_lease.is_none());
        assert_eq!(views[1].active_lease.as_ref().map(|l| l.fields.unit_id), Some(leased));
    }
}
