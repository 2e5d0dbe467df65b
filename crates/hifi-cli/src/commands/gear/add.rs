use hifi_core::entities::NewGear;
use hifi_core::enums::{Category, Condition};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub component: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub name: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: Option<f64>,
    pub date: Option<&'a str>,
    pub condition: Option<&'a str>,
    pub notes: Option<&'a str>,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let input = to_new_gear(params)?;
    let gear = ctx.service.add_gear(&ctx.user_id, &input).await?;
    output(&gear, flags.format)
}

fn to_new_gear(params: &Params<'_>) -> anyhow::Result<NewGear> {
    let gear = NewGear {
        component_id: params.component.map(str::to_string),
        custom_brand: params.brand.map(str::to_string),
        custom_name: params.name.map(str::to_string),
        custom_category: parse_optional_enum::<Category>(params.category, "category")?,
        purchase_price: params.price,
        purchase_date: params.date.map(|d| parse_date(d, "date")).transpose()?,
        condition: parse_optional_enum::<Condition>(params.condition, "condition")?,
        notes: params.notes.map(str::to_string),
    };
    gear.validate()?;
    Ok(gear)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hifi_core::enums::Category;

    use super::*;
    use crate::commands::shared::fixtures::seed_component;

    fn empty<'a>() -> Params<'a> {
        Params {
            component: None,
            brand: None,
            name: None,
            category: None,
            price: None,
            date: None,
            condition: None,
            notes: None,
        }
    }

    #[test]
    fn custom_gear_needs_brand_name_and_category() {
        let params = Params {
            brand: Some("DIY"),
            name: Some("Cmoy"),
            ..empty()
        };
        assert!(to_new_gear(&params).is_err());

        let params = Params {
            category: Some("amp"),
            date: Some("2024-03-01"),
            ..params
        };
        let gear = to_new_gear(&params).unwrap();
        assert_eq!(gear.custom_category, Some(Category::Amp));
        assert_eq!(gear.purchase_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn rejects_bad_date() {
        let params = Params {
            component: Some("cmp-1"),
            date: Some("03/01/2024"),
            ..empty()
        };
        let err = to_new_gear(&params).unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }

    #[tokio::test]
    async fn catalog_gear_is_owned_by_acting_user() {
        let ctx = AppContext::in_memory().await;
        let component =
            seed_component(&ctx, "Sennheiser", "HD 600", Category::Headphones, 399.0).await;
        let params = Params {
            component: Some(&component.id),
            price: Some(250.0),
            condition: Some("very-good"),
            ..empty()
        };
        let input = to_new_gear(&params).unwrap();
        let gear = ctx.service.add_gear(&ctx.user_id, &input).await.unwrap();

        assert_eq!(gear.user_id, ctx.user_id);
        assert_eq!(gear.condition, Condition::VeryGood);
        assert!(gear.is_active);
    }
}
