use chrono::NaiveDate;
use hifi_core::errors::CoreError;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
///
/// Hyphens are accepted in place of underscores (`like-new`, `mid-range`).
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| CoreError::validation(format!("invalid {field} '{raw}': {error}")).into())
}

pub fn parse_optional_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|r| parse_enum(r, field)).transpose()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| {
            CoreError::validation(format!("invalid {field} '{raw}' (expected YYYY-MM-DD): {error}"))
                .into()
        })
}

#[cfg(test)]
mod tests {
    use hifi_core::enums::{BudgetTier, Category, Condition};

    use super::*;

    #[test]
    fn parses_snake_case_enum() {
        let category: Category = parse_enum("headphones", "category").expect("should parse");
        assert_eq!(category, Category::Headphones);
    }

    #[test]
    fn parses_hyphenated_and_uppercase() {
        let condition: Condition = parse_enum("Like-New", "condition").expect("should parse");
        assert_eq!(condition, Condition::LikeNew);
        let tier: BudgetTier = parse_enum("summit-fi", "tier").expect("should parse");
        assert_eq!(tier, BudgetTier::SummitFi);
    }

    #[test]
    fn errors_name_the_field() {
        let err = parse_enum::<Category>("turntable", "category").expect_err("should fail");
        assert!(err.to_string().contains("invalid category 'turntable'"));
    }

    #[test]
    fn optional_enum_passes_none_through() {
        let none: Option<Condition> = parse_optional_enum(None, "condition").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn dates() {
        assert_eq!(
            parse_date("2024-03-01", "date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_date("03/01/2024", "date").is_err());
    }
}
