use hifi_core::enums::{AlertType, Condition};
use hifi_core::errors::CoreError;
use hifi_db::updates::alert::AlertUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub id: &'a str,
    pub alert_type: Option<&'a str>,
    pub target: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_condition: Option<&'a str>,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(params)?;

    let mut builder = AlertUpdateBuilder::new();
    if let Some(alert_type) = params.alert_type {
        builder = builder.alert_type(parse_enum::<AlertType>(alert_type, "alert type")?);
    }
    if let Some(target) = params.target {
        builder = builder.target_price(Some(target));
    }
    if let Some(min) = params.min {
        builder = builder.price_min(Some(min));
    }
    if let Some(max) = params.max {
        builder = builder.price_max(Some(max));
    }
    if let Some(condition) = params.min_condition {
        // `any` drops the condition floor.
        let condition = if condition.eq_ignore_ascii_case("any") {
            None
        } else {
            Some(parse_enum::<Condition>(condition, "min condition")?)
        };
        builder = builder.min_condition(condition);
    }

    let alert = ctx.service.update_alert(params.id, builder.build()).await?;
    output(&alert, flags.format)
}

fn validate_update_params(params: &Params<'_>) -> Result<(), CoreError> {
    if params.alert_type.is_none()
        && params.target.is_none()
        && params.min.is_none()
        && params.max.is_none()
        && params.min_condition.is_none()
    {
        return Err(CoreError::validation(
            "at least one of --type, --target, --min, --max or --min-condition must be provided",
        ));
    }
    Ok(())
}
