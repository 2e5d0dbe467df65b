use hifi_core::enums::StackPurpose;
use hifi_core::errors::CoreError;
use hifi_db::updates::stack::StackUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub purpose: Option<&'a str>,
}

pub async fn run(params: &Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(params)?;

    let mut builder = StackUpdateBuilder::new();
    if let Some(name) = params.name {
        builder = builder.name(name);
    }
    if let Some(description) = params.description {
        // An empty description clears it.
        let description = Some(description.trim()).filter(|d| !d.is_empty());
        builder = builder.description(description.map(str::to_string));
    }
    if let Some(purpose) = params.purpose {
        builder = builder.purpose(parse_enum::<StackPurpose>(purpose, "purpose")?);
    }

    let stack = ctx.service.update_stack(params.id, builder.build()).await?;
    output(&stack, flags.format)
}

fn validate_update_params(params: &Params<'_>) -> Result<(), CoreError> {
    if params.name.is_none() && params.description.is_none() && params.purpose.is_none() {
        return Err(CoreError::validation(
            "at least one of --name, --description or --purpose must be provided",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::shared::fixtures::json_flags;

    #[test]
    fn rejects_noop_update() {
        let params = Params {
            id: "stk-1",
            name: None,
            description: None,
            purpose: None,
        };
        assert!(validate_update_params(&params).is_err());
    }

    #[tokio::test]
    async fn blank_description_clears_it() {
        let ctx = AppContext::in_memory().await;
        let stack = ctx
            .service
            .create_stack(&ctx.user_id, "Desk", Some("main rig"), StackPurpose::Desktop)
            .await
            .unwrap();

        let params = Params {
            id: &stack.id,
            name: None,
            description: Some("   "),
            purpose: Some("studio"),
        };
        run(&params, &ctx, &json_flags()).await.unwrap();

        let updated = ctx.service.get_stack_record(&stack.id).await.unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.purpose, StackPurpose::Studio);
        assert_eq!(updated.name, "Desk");
    }
}
