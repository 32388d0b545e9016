use uuid::Uuid;

use crate::application::dto::matching::AddressMatch;
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::property_repository::PropertyRepository;
use crate::domain::matching::best_match;
use crate::domain::properties::Property;

const MAX_ADDRESSES: usize = 1000;

pub struct MatchAddresses<'a, R: PropertyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PropertyRepository + ?Sized> MatchAddresses<'a, R> {
    pub async fn execute(&self, account_id: Uuid, addresses: &[String]) -> ServiceResult<Vec<AddressMatch>> {
        if addresses.len() > MAX_ADDRESSES {
            return Err(ServiceError::bad_request(format!(
                "at most {MAX_ADDRESSES} addresses per request"
            )));
        }
        let properties = self.repo.list_all(account_id).await?;
        Ok(match_all(addresses, &properties))
    }
}

pub(crate) fn match_all(addresses: &[String], properties: &[Property]) -> Vec<AddressMatch> {
    addresses
        .iter()
        .map(|address| match best_match(address, properties, |p| p.fields.address.as_str()) {
            Some((property, score)) => AddressMatch {
                address: address.clone(),
                property_id: Some(property.id),
                property_address: Some(property.fields.address.clone()),
                score,
            },
            None => AddressMatch {
                address: address.clone(),
                property_id: None,
                property_address: None,
                score: 0,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::properties::PropertyFields;
    use chrono::Utc;

    fn property(address: &str) -> Property {
        Property {
            id: Uuid::new_v4(),
            account_id: Uuid::nil(),
            fields: PropertyFields::new(address),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn each_address_gets_its_best_property_or_nothing() {
        let properties = vec![property("הרצל 10, תל אביב"), property("ביאליק 3, רמת גן")];
        let matches = match_all(
            &["הרצל 10".to_string(), "דיזנגוף 99".to_string()],
            &properties,
        );
        assert_eq!(matches[0].property_id, Some(properties[0].id));
        assert_eq!(matches[0].score, 100);
        assert_eq!(matches[1].property_id, None);
        assert_eq!(matches[1].score, 0);
    }
}
