use hifi_core::entities::NewAlert;
use hifi_core::enums::{AlertType, Condition};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub component: &'a str,
    pub alert_type: &'a str,
    pub target: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_condition: Option<&'a str>,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let input = to_new_alert(params)?;
    let alert = ctx.service.create_alert(&ctx.user_id, &input).await?;
    output(&alert, flags.format)
}

fn to_new_alert(params: &Params<'_>) -> anyhow::Result<NewAlert> {
    let alert = NewAlert {
        component_id: params.component.to_string(),
        alert_type: parse_enum::<AlertType>(params.alert_type, "alert type")?,
        target_price: params.target,
        price_min: params.min,
        price_max: params.max,
        min_condition: parse_optional_enum::<Condition>(params.min_condition, "min condition")?,
    };
    alert.validate()?;
    Ok(alert)
}
