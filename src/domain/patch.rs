use serde::{Deserialize, Deserializer};

/// PATCH field state for nullable columns: absent keeps the stored value,
/// `null` clears it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DoubleOption<T> {
    #[default]
    NotProvided,
    Null,
    Some(T),
}

impl<T> DoubleOption<T> {
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            DoubleOption::NotProvided => {}
            DoubleOption::Null => *target = None,
            DoubleOption::Some(v) => *target = Some(v),
        }
    }

    pub fn is_provided(&self) -> bool {
        !matches!(self, DoubleOption::NotProvided)
    }
}

pub fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

/// Overwrites `target` when the patch carries a value.
pub fn set_if<T>(value: Option<T>, target: &mut T) {
    if let Some(v) = value {
        *target = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_double_option")]
        notes: DoubleOption<String>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        let null: Body = serde_json::from_str(r#"{"notes":null}"#).unwrap();
        let set: Body = serde_json::from_str(r#"{"notes":"x"}"#).unwrap();
        assert_eq!(absent.notes, DoubleOption::NotProvided);
        assert_eq!(null.notes, DoubleOption::Null);
        assert_eq!(set.notes, DoubleOption::Some("x".to_string()));
    }

    #[test]
    fn apply_to_keeps_clears_or_sets() {
        let mut v = Some(1);
        DoubleOption::NotProvided.apply_to(&mut v);
        assert_eq!(v, Some(1));
        DoubleOption::Some(2).apply_to(&mut v);
        assert_eq!(v, Some(2));
        DoubleOption::Null.apply_to(&mut v);
        assert_eq!(v, None);
    }
}
