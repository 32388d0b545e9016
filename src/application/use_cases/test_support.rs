use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::dto::mortgages::MortgageFilter;
use crate::application::dto::owners::{OwnerListItem, OwnershipRecord};
use crate::application::dto::pagination::PageRequest;
use crate::application::dto::properties::{PropertyFilter, PropertyListItem};
use crate::application::ports::bank_account_repository::BankAccountRepository;
use crate::application::ports::investment_company_repository::InvestmentCompanyRepository;
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::application::ports::owner_repository::OwnerRepository;
use crate::application::ports::ownership_repository::OwnershipRepository;
use crate::application::ports::plot_info_repository::PlotInfoRepository;
use crate::application::ports::property_repository::{OccupancyCounts, PropertyRepository};
use crate::application::ports::valuation_repository::ValuationRepository;
use crate::domain::bank_accounts::{BankAccount, BankAccountFields};
use crate::domain::investment_companies::{InvestmentCompany, InvestmentCompanyFields};
use crate::domain::mortgages::{Mortgage, MortgageFields, MortgagePayment, PaymentFields};
use crate::domain::owners::{Owner, OwnerFields};
use crate::domain::ownerships::{Ownership, OwnershipFields};
use crate::domain::plot_info::{PlotInfo, PlotInfoFields};
use crate::domain::properties::{Property, PropertyFields};
use crate::domain::valuations::{Valuation, ValuationFields};

pub fn owner_fields(name: &str) -> OwnerFields {
    serde_json::from_value(serde_json::json!({ "name": name })).unwrap()
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[derive(Default)]
pub struct MemProperties {
    rows: Mutex<Vec<Property>>,
    units: Mutex<HashMap<Uuid, i64>>,
}

impl MemProperties {
    pub fn seed(&self, account_id: Uuid, address: &str) -> Uuid {
        let property = Property {
            id: Uuid::new_v4(),
            account_id,
            fields: PropertyFields::new(address),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = property.id;
        self.rows.lock().unwrap().push(property);
        id
    }

    pub fn set_unit_count(&self, id: Uuid, count: i64) {
        self.units.lock().unwrap().insert(id, count);
    }

    pub fn estimate_of(&self, id: Uuid) -> Option<(Decimal, NaiveDate)> {
        let rows = self.rows.lock().unwrap();
        let p = rows.iter().find(|p| p.id == id)?;
        Some((p.fields.estimated_value?, p.fields.last_valuation_date?))
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn matching(&self, pred: impl Fn(&Property) -> bool) -> Vec<Property> {
        self.rows.lock().unwrap().iter().filter(|p| pred(p)).cloned().collect()
    }

    fn unit_count(&self, id: Uuid) -> i64 {
        self.units.lock().unwrap().get(&id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl PropertyRepository for MemProperties {
    async fn list(
        &self,
        account_id: Uuid,
        _filter: &PropertyFilter,
        _page: PageRequest,
    ) -> anyhow::Result<(Vec<PropertyListItem>, i64)> {
        let items: Vec<PropertyListItem> = self
            .matching(|p| p.account_id == account_id)
            .into_iter()
            .map(|property| PropertyListItem {
                unit_count: self.unit_count(property.id),
                property,
            })
            .collect();
        let total = items.len() as i64;
        Ok((items, total))
    }

    async fn list_all(&self, account_id: Uuid) -> anyhow::Result<Vec<Property>> {
        Ok(self.matching(|p| p.account_id == account_id))
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Property>> {
        Ok(self.matching(|p| p.account_id == account_id && p.id == id).into_iter().next())
    }

    async fn find_by_address(&self, account_id: Uuid, address: &str) -> anyhow::Result<Option<Property>> {
        Ok(self
            .matching(|p| p.account_id == account_id && same_text(&p.fields.address, address))
            .into_iter()
            .next())
    }

    async fn count_owned(&self, account_id: Uuid, ids: &[Uuid]) -> anyhow::Result<i64> {
        Ok(self.matching(|p| p.account_id == account_id && ids.contains(&p.id)).len() as i64)
    }

    async fn count_units(&self, _account_id: Uuid, id: Uuid) -> anyhow::Result<i64> {
        Ok(self.unit_count(id))
    }

    async fn insert(&self, account_id: Uuid, fields: &PropertyFields) -> anyhow::Result<Property> {
        let property = Property {
            id: Uuid::new_v4(),
            account_id,
            fields: fields.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(property.clone());
        Ok(property)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &PropertyFields,
    ) -> anyhow::Result<Option<Property>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(p) = rows.iter_mut().find(|p| p.account_id == account_id && p.id == id) else {
            return Ok(None);
        };
        p.fields = fields.clone();
        Ok(Some(p.clone()))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| !(p.account_id == account_id && p.id == id));
        Ok(rows.len() != before)
    }

    async fn set_valuation(
        &self,
        account_id: Uuid,
        id: Uuid,
        value: Decimal,
        date: NaiveDate,
    ) -> anyhow::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(p) = rows.iter_mut().find(|p| p.account_id == account_id && p.id == id) {
            p.fields.estimated_value = Some(value);
            p.fields.last_valuation_date = Some(date);
        }
        Ok(())
    }

    async fn occupancy_counts(&self, account_id: Uuid) -> anyhow::Result<OccupancyCounts> {
        Ok(OccupancyCounts {
            total_properties: self.matching(|p| p.account_id == account_id).len() as i64,
            ..OccupancyCounts::default()
        })
    }
}

#[derive(Default)]
pub struct MemOwners {
    rows: Mutex<Vec<Owner>>,
    shares: Mutex<HashMap<Uuid, i64>>,
}

impl MemOwners {
    pub fn seed(&self, account_id: Uuid, name: &str) -> Uuid {
        let owner = Owner {
            id: Uuid::new_v4(),
            account_id,
            fields: owner_fields(name),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = owner.id;
        self.rows.lock().unwrap().push(owner);
        id
    }

    pub fn set_share_count(&self, id: Uuid, count: i64) {
        self.shares.lock().unwrap().insert(id, count);
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn matching(&self, pred: impl Fn(&Owner) -> bool) -> Vec<Owner> {
        self.rows.lock().unwrap().iter().filter(|o| pred(o)).cloned().collect()
    }

    fn share_count(&self, id: Uuid) -> i64 {
        self.shares.lock().unwrap().get(&id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl OwnerRepository for MemOwners {
    async fn list(
        &self,
        account_id: Uuid,
        _search: Option<&str>,
        _page: PageRequest,
    ) -> anyhow::Result<(Vec<OwnerListItem>, i64)> {
        let items: Vec<OwnerListItem> = self
            .matching(|o| o.account_id == account_id)
            .into_iter()
            .map(|owner| OwnerListItem {
                ownership_count: self.share_count(owner.id),
                owner,
            })
            .collect();
        let total = items.len() as i64;
        Ok((items, total))
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Owner>> {
        Ok(self.matching(|o| o.account_id == account_id && o.id == id).into_iter().next())
    }

    async fn find_by_name(&self, account_id: Uuid, name: &str) -> anyhow::Result<Option<Owner>> {
        Ok(self
            .matching(|o| o.account_id == account_id && same_text(&o.fields.name, name))
            .into_iter()
            .next())
    }

    async fn find_by_email(
        &self,
        account_id: Uuid,
        email: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        Ok(self
            .matching(|o| {
                o.account_id == account_id
                    && o.fields.email.as_deref() == Some(email)
                    && Some(o.id) != exclude
            })
            .first()
            .map(|o| o.id))
    }

    async fn insert(&self, account_id: Uuid, fields: &OwnerFields) -> anyhow::Result<Owner> {
        let owner = Owner {
            id: Uuid::new_v4(),
            account_id,
            fields: fields.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(owner.clone());
        Ok(owner)
    }

    async fn update(&self, account_id: Uuid, id: Uuid, fields: &OwnerFields) -> anyhow::Result<Option<Owner>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(o) = rows.iter_mut().find(|o| o.account_id == account_id && o.id == id) else {
            return Ok(None);
        };
        o.fields = fields.clone();
        Ok(Some(o.clone()))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|o| !(o.account_id == account_id && o.id == id));
        Ok(rows.len() != before)
    }

    async fn count_ownerships(&self, _account_id: Uuid, id: Uuid) -> anyhow::Result<i64> {
        Ok(self.share_count(id))
    }
}

#[derive(Default)]
pub struct MemOwnerships {
    rows: Mutex<Vec<Ownership>>,
}

impl MemOwnerships {
    pub fn all(&self) -> Vec<Ownership> {
        self.rows.lock().unwrap().clone()
    }

    fn records(&self, pred: impl Fn(&Ownership) -> bool) -> Vec<OwnershipRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| pred(s))
            .cloned()
            .map(|ownership| OwnershipRecord {
                ownership,
                owner_name: String::new(),
                property_address: String::new(),
            })
            .collect()
    }
}

#[async_trait]
impl OwnershipRepository for MemOwnerships {
    async fn list_for_property(&self, account_id: Uuid, property_id: Uuid) -> anyhow::Result<Vec<OwnershipRecord>> {
        Ok(self.records(|s| s.account_id == account_id && s.fields.property_id == property_id))
    }

    async fn list_for_owner(&self, account_id: Uuid, owner_id: Uuid) -> anyhow::Result<Vec<OwnershipRecord>> {
        Ok(self.records(|s| s.account_id == account_id && s.fields.owner_id == owner_id))
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Ownership>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.account_id == account_id && s.id == id)
            .cloned())
    }

    async fn find_pair(&self, account_id: Uuid, property_id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| {
                s.account_id == account_id
                    && s.fields.property_id == property_id
                    && s.fields.owner_id == owner_id
            })
            .map(|s| s.id))
    }

    async fn insert(&self, account_id: Uuid, fields: &OwnershipFields) -> anyhow::Result<Ownership> {
        let ownership = Ownership {
            id: Uuid::new_v4(),
            account_id,
            fields: fields.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(ownership.clone());
        Ok(ownership)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &OwnershipFields,
    ) -> anyhow::Result<Option<Ownership>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(s) = rows.iter_mut().find(|s| s.account_id == account_id && s.id == id) else {
            return Ok(None);
        };
        s.fields = fields.clone();
        Ok(Some(s.clone()))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| !(s.account_id == account_id && s.id == id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemMortgages {
    rows: Mutex<Vec<Mortgage>>,
    payments: Mutex<Vec<MortgagePayment>>,
}

impl MemMortgages {
    pub fn all(&self) -> Vec<Mortgage> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl MortgageRepository for MemMortgages {
    async fn list(
        &self,
        account_id: Uuid,
        _filter: &MortgageFilter,
        _page: PageRequest,
    ) -> anyhow::Result<(Vec<Mortgage>, i64)> {
        let rows: Vec<Mortgage> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.account_id == account_id)
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn list_with_principal_paid(&self, account_id: Uuid) -> anyhow::Result<Vec<(Mortgage, Decimal)>> {
        let payments = self.payments.lock().unwrap();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.account_id == account_id)
            .map(|m| {
                let paid: Decimal = payments
                    .iter()
                    .filter(|p| p.mortgage_id == m.id)
                    .filter_map(|p| p.fields.principal)
                    .sum();
                (m.clone(), paid)
            })
            .collect())
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Mortgage>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.account_id == account_id && m.id == id)
            .cloned())
    }

    async fn insert(&self, account_id: Uuid, fields: &MortgageFields) -> anyhow::Result<Mortgage> {
        let mortgage = Mortgage {
            id: Uuid::new_v4(),
            account_id,
            fields: fields.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(mortgage.clone());
        Ok(mortgage)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &MortgageFields,
    ) -> anyhow::Result<Option<Mortgage>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(m) = rows.iter_mut().find(|m| m.account_id == account_id && m.id == id) else {
            return Ok(None);
        };
        m.fields = fields.clone();
        Ok(Some(m.clone()))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| !(m.account_id == account_id && m.id == id));
        Ok(rows.len() != before)
    }

    async fn list_payments(&self, account_id: Uuid, mortgage_id: Uuid) -> anyhow::Result<Vec<MortgagePayment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.account_id == account_id && p.mortgage_id == mortgage_id)
            .cloned()
            .collect())
    }

    async fn count_payments(&self, account_id: Uuid, mortgage_id: Uuid) -> anyhow::Result<i64> {
        Ok(self.list_payments(account_id, mortgage_id).await?.len() as i64)
    }

    async fn insert_payment(
        &self,
        account_id: Uuid,
        mortgage_id: Uuid,
        fields: &PaymentFields,
    ) -> anyhow::Result<MortgagePayment> {
        let payment = MortgagePayment {
            id: Uuid::new_v4(),
            account_id,
            mortgage_id,
            fields: fields.clone(),
            created_at: Utc::now(),
        };
        self.payments.lock().unwrap().push(payment.clone());
        Ok(payment)
    }

    async fn delete_payment(&self, account_id: Uuid, mortgage_id: Uuid, payment_id: Uuid) -> anyhow::Result<bool> {
        let mut payments = self.payments.lock().unwrap();
        let before = payments.len();
        payments.retain(|p| !(p.account_id == account_id && p.mortgage_id == mortgage_id && p.id == payment_id));
        Ok(payments.len() != before)
    }

    async fn payments_between(
        &self,
        account_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<(NaiveDate, Decimal)>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.account_id == account_id)
            .filter(|p| from.is_none_or(|f| p.fields.payment_date >= f))
            .filter(|p| to.is_none_or(|t| p.fields.payment_date <= t))
            .map(|p| (p.fields.payment_date, p.fields.amount))
            .collect())
    }
}

#[derive(Default)]
pub struct MemPlots {
    rows: Mutex<Vec<PlotInfo>>,
}

impl MemPlots {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn find(&self, pred: impl Fn(&PlotInfo) -> bool) -> Option<PlotInfo> {
        self.rows.lock().unwrap().iter().find(|p| pred(p)).cloned()
    }
}

#[async_trait]
impl PlotInfoRepository for MemPlots {
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<PlotInfo>> {
        Ok(self.find(|p| p.account_id == account_id && p.id == id))
    }

    async fn get_by_property(&self, account_id: Uuid, property_id: Uuid) -> anyhow::Result<Option<PlotInfo>> {
        Ok(self.find(|p| p.account_id == account_id && p.property_id == property_id))
    }

    async fn insert(&self, account_id: Uuid, property_id: Uuid, fields: &PlotInfoFields) -> anyhow::Result<PlotInfo> {
        let plot = PlotInfo {
            id: Uuid::new_v4(),
            account_id,
            property_id,
            fields: fields.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(plot.clone());
        Ok(plot)
    }

    async fn update(&self, account_id: Uuid, id: Uuid, fields: &PlotInfoFields) -> anyhow::Result<Option<PlotInfo>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(p) = rows.iter_mut().find(|p| p.account_id == account_id && p.id == id) else {
            return Ok(None);
        };
        p.fields = fields.clone();
        Ok(Some(p.clone()))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| !(p.account_id == account_id && p.id == id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemValuations {
    rows: Mutex<Vec<Valuation>>,
}

impl MemValuations {
    /// Newest first, ties broken by insertion order.
    fn for_property(&self, account_id: Uuid, property_id: Uuid) -> Vec<Valuation> {
        let mut rows: Vec<Valuation> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.account_id == account_id && v.fields.property_id == property_id)
            .cloned()
            .collect();
        rows.reverse();
        rows.sort_by(|a, b| b.fields.valuation_date.cmp(&a.fields.valuation_date));
        rows
    }
}

#[async_trait]
impl ValuationRepository for MemValuations {
    async fn list_for_property(&self, account_id: Uuid, property_id: Uuid) -> anyhow::Result<Vec<Valuation>> {
        Ok(self.for_property(account_id, property_id))
    }

    async fn latest_for_property(&self, account_id: Uuid, property_id: Uuid) -> anyhow::Result<Option<Valuation>> {
        Ok(self.for_property(account_id, property_id).into_iter().next())
    }

    async fn latest_values(&self, account_id: Uuid) -> anyhow::Result<Vec<(Uuid, Decimal)>> {
        let mut properties: Vec<Uuid> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.account_id == account_id)
            .map(|v| v.fields.property_id)
            .collect();
        properties.sort();
        properties.dedup();
        Ok(properties
            .into_iter()
            .filter_map(|id| {
                self.for_property(account_id, id)
                    .first()
                    .map(|v| (id, v.fields.estimated_value))
            })
            .collect())
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Valuation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.account_id == account_id && v.id == id)
            .cloned())
    }

    async fn list_between(
        &self,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Valuation>> {
        let mut rows: Vec<Valuation> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.account_id == account_id)
            .filter(|v| start.is_none_or(|s| v.fields.valuation_date >= s))
            .filter(|v| end.is_none_or(|e| v.fields.valuation_date <= e))
            .cloned()
            .collect();
        rows.sort_by_key(|v| v.fields.valuation_date);
        Ok(rows)
    }

    async fn insert(&self, account_id: Uuid, fields: &ValuationFields) -> anyhow::Result<Valuation> {
        let valuation = Valuation {
            id: Uuid::new_v4(),
            account_id,
            fields: fields.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(valuation.clone());
        Ok(valuation)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &ValuationFields,
    ) -> anyhow::Result<Option<Valuation>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(v) = rows.iter_mut().find(|v| v.account_id == account_id && v.id == id) else {
            return Ok(None);
        };
        v.fields = fields.clone();
        Ok(Some(v.clone()))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|v| !(v.account_id == account_id && v.id == id));
        Ok(rows.len() != before)
    }
}

/// No investment companies and no bank accounts.
#[derive(Default)]
pub struct NoLinks;

#[async_trait]
impl InvestmentCompanyRepository for NoLinks {
    async fn list(&self, _account_id: Uuid) -> anyhow::Result<Vec<(InvestmentCompany, i64)>> {
        Ok(Vec::new())
    }

    async fn get(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<Option<InvestmentCompany>> {
        Ok(None)
    }

    async fn find_by_name(&self, _account_id: Uuid, _name: &str, _exclude: Option<Uuid>) -> anyhow::Result<Option<Uuid>> {
        Ok(None)
    }

    async fn insert(&self, _account_id: Uuid, _fields: &InvestmentCompanyFields) -> anyhow::Result<InvestmentCompany> {
        anyhow::bail!("read-only")
    }

    async fn update(
        &self,
        _account_id: Uuid,
        _id: Uuid,
        _fields: &InvestmentCompanyFields,
    ) -> anyhow::Result<Option<InvestmentCompany>> {
        anyhow::bail!("read-only")
    }

    async fn delete(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<bool> {
        anyhow::bail!("read-only")
    }

    async fn count_properties(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<i64> {
        Ok(0)
    }
}

#[async_trait]
impl BankAccountRepository for NoLinks {
    async fn list(&self, _account_id: Uuid, _active_only: bool) -> anyhow::Result<Vec<BankAccount>> {
        Ok(Vec::new())
    }

    async fn get(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<Option<BankAccount>> {
        Ok(None)
    }

    async fn find_duplicate(
        &self,
        _account_id: Uuid,
        _bank_name: &str,
        _account_number: &str,
        _exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        Ok(None)
    }

    async fn insert(&self, _account_id: Uuid, _fields: &BankAccountFields) -> anyhow::Result<BankAccount> {
        anyhow::bail!("read-only")
    }

    async fn update(
        &self,
        _account_id: Uuid,
        _id: Uuid,
        _fields: &BankAccountFields,
    ) -> anyhow::Result<Option<BankAccount>> {
        anyhow::bail!("read-only")
    }

    async fn delete(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<bool> {
        anyhow::bail!("read-only")
    }

    async fn count_mortgages(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<i64> {
        Ok(0)
    }
}
