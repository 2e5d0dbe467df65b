mod create;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AlertCommands;
use crate::commands::shared::ack::Deleted;
use crate::context::AppContext;
use crate::output::output;

/// Handle `hifi alert`.
pub async fn handle(
    action: &AlertCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AlertCommands::Create {
            component,
            alert_type,
            target,
            min,
            max,
            min_condition,
        } => {
            let params = create::Params {
                component,
                alert_type,
                target: *target,
                min: *min,
                max: *max,
                min_condition: min_condition.as_deref(),
            };
            create::run(&params, ctx, flags).await
        }
        AlertCommands::Get { id } => output(&ctx.service.get_alert(id).await?, flags.format),
        AlertCommands::List { active } => {
            let alerts = ctx.service.list_alerts(&ctx.user_id, *active).await?;
            output(&alerts, flags.format)
        }
        AlertCommands::Update {
            id,
            alert_type,
            target,
            min,
            max,
            min_condition,
        } => {
            let params = update::Params {
                id,
                alert_type: alert_type.as_deref(),
                target: *target,
                min: *min,
                max: *max,
                min_condition: min_condition.as_deref(),
            };
            update::run(&params, ctx, flags).await
        }
        AlertCommands::Enable { id } => {
            output(&ctx.service.set_alert_active(id, true).await?, flags.format)
        }
        AlertCommands::Disable { id } => {
            output(&ctx.service.set_alert_active(id, false).await?, flags.format)
        }
        AlertCommands::Delete { id } => {
            ctx.service.delete_alert(id).await?;
            output(&Deleted::new(id), flags.format)
        }
        AlertCommands::Check => {
            let report = ctx.service.check_alerts(Some(&ctx.user_id)).await?;
            if !report.triggered.is_empty() {
                tracing::info!(triggered = report.triggered.len(), "price alerts fired");
            }
            output(&report, flags.format)
        }
        AlertCommands::History { id } => {
            output(&ctx.service.alert_history(id).await?, flags.format)
        }
    }
}
