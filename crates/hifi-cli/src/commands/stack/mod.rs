mod update;

use hifi_core::enums::StackPurpose;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StackCommands;
use crate::commands::shared::ack::Deleted;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MemberRemoved<'a> {
    stack_id: &'a str,
    gear_id: &'a str,
    removed: bool,
}

/// Handle `hifi stack`.
pub async fn handle(
    action: &StackCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StackCommands::Create {
            name,
            description,
            purpose,
        } => {
            let purpose = parse_enum::<StackPurpose>(purpose, "purpose")?;
            let stack = ctx
                .service
                .create_stack(&ctx.user_id, name, description.as_deref(), purpose)
                .await?;
            output(&stack, flags.format)
        }
        StackCommands::Get { id } => output(&ctx.service.get_stack(id).await?, flags.format),
        StackCommands::List => output(&ctx.service.list_stacks(&ctx.user_id).await?, flags.format),
        StackCommands::Update {
            id,
            name,
            description,
            purpose,
        } => {
            let params = update::Params {
                id,
                name: name.as_deref(),
                description: description.as_deref(),
                purpose: purpose.as_deref(),
            };
            update::run(&params, ctx, flags).await
        }
        StackCommands::Add {
            stack,
            gear,
            position,
        } => {
            let member = ctx.service.add_gear_to_stack(stack, gear, *position).await?;
            output(&member, flags.format)
        }
        StackCommands::Remove { stack, gear } => {
            ctx.service.remove_gear_from_stack(stack, gear).await?;
            output(
                &MemberRemoved {
                    stack_id: stack,
                    gear_id: gear,
                    removed: true,
                },
                flags.format,
            )
        }
        StackCommands::Delete { id } => {
            ctx.service.delete_stack(id).await?;
            output(&Deleted::new(id), flags.format)
        }
    }
}
