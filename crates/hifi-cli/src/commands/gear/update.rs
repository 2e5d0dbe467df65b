use hifi_core::enums::Condition;
use hifi_core::errors::CoreError;
use hifi_db::updates::gear::GearUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_enum};
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub id: &'a str,
    pub brand: Option<&'a str>,
    pub name: Option<&'a str>,
    pub price: Option<f64>,
    pub date: Option<&'a str>,
    pub condition: Option<&'a str>,
    pub notes: Option<&'a str>,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(params)?;

    let mut builder = GearUpdateBuilder::new();
    if let Some(brand) = params.brand {
        builder = builder.custom_brand(Some(brand.to_string()));
    }
    if let Some(name) = params.name {
        builder = builder.custom_name(Some(name.to_string()));
    }
    if let Some(price) = params.price {
        builder = builder.purchase_price(Some(price));
    }
    if let Some(date) = params.date {
        builder = builder.purchase_date(Some(parse_date(date, "date")?));
    }
    if let Some(condition) = params.condition {
        builder = builder.condition(parse_enum::<Condition>(condition, "condition")?);
    }
    if let Some(notes) = params.notes {
        builder = builder.notes(Some(notes.to_string()));
    }

    let gear = ctx.service.update_gear(params.id, builder.build()).await?;
    output(&gear, flags.format)
}

fn validate_update_params(params: &Params<'_>) -> Result<(), CoreError> {
    if params.brand.is_none()
        && params.name.is_none()
        && params.price.is_none()
        && params.date.is_none()
        && params.condition.is_none()
        && params.notes.is_none()
    {
        return Err(CoreError::validation(
            "at least one of --brand, --name, --price, --date, --condition or --notes must be provided",
        ));
    }
    Ok(())
}
