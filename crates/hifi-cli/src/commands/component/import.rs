use std::path::Path;

use hifi_core::entities::NewComponent;
use hifi_core::responses::ImportReport;
use hifi_db::repos::UpsertOutcome;

use crate::cli::GlobalFlags;
use crate::commands::shared::jsonl::read_records;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = import_components(Path::new(file), ctx).await?;
    output(&report, flags.format)
}

/// Upsert every component in a JSONL file. Bad lines are reported, not fatal.
pub async fn import_components(path: &Path, ctx: &AppContext) -> anyhow::Result<ImportReport> {
    let records = read_records::<NewComponent>(path)?;
    let mut report = ImportReport::default();

    for record in records {
        report.read += 1;
        let result = match record.value {
            Ok(component) => ctx
                .service
                .upsert_component(&component)
                .await
                .map_err(|e| e.to_string()),
            Err(parse_error) => Err(parse_error),
        };
        match result {
            Ok((_, UpsertOutcome::Inserted)) => report.inserted += 1,
            Ok((_, UpsertOutcome::Updated)) => report.updated += 1,
            Ok((_, UpsertOutcome::Skipped)) => report.skipped += 1,
            Err(error) => {
                tracing::warn!(line = record.line, %error, "component import line rejected");
                report.skipped += 1;
                report.errors.push(format!("line {}: {error}", record.line));
            }
        }
    }

    tracing::debug!(
        read = report.read,
        inserted = report.inserted,
        updated = report.updated,
        "component import finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn imports_and_refreshes_catalog() {
        let ctx = AppContext::in_memory().await;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"brand":"Sennheiser","name":"HD 600","category":"headphones","price_new":399,"impedance":300}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"brand":"Schiit","name":"Magni","category":"amp","price_new":109}}"#
        )
        .unwrap();
        writeln!(file, r#"{{"brand":"Nobody","name":"Free","category":"dac","price_new":-5}}"#)
            .unwrap();

        let report = import_components(file.path(), &ctx).await.unwrap();
        assert_eq!(report.read, 3);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("line 3:"));

        // same brand and name, different case: refresh instead of insert
        let mut again = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            again,
            r#"{{"brand":"sennheiser","name":"hd 600","category":"headphones","price_new":349}}"#
        )
        .unwrap();
        let report = import_components(again.path(), &ctx).await.unwrap();
        assert_eq!((report.inserted, report.updated), (0, 1));
        assert_eq!(ctx.service.catalog().await.unwrap().len(), 2);
    }
}
