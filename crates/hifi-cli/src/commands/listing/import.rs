use std::path::Path;

use hifi_core::entities::NewListing;
use hifi_core::responses::ImportReport;
use hifi_db::repos::UpsertOutcome;

use crate::cli::GlobalFlags;
use crate::commands::shared::jsonl::read_records;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = import_listings(Path::new(file), ctx).await?;
    output(&report, flags.format)
}

/// Upsert every listing in a JSONL file, keyed by URL.
///
/// Sold and removed listings already stored are counted as skipped.
pub async fn import_listings(path: &Path, ctx: &AppContext) -> anyhow::Result<ImportReport> {
    let records = read_records::<NewListing>(path)?;
    let mut report = ImportReport::default();

    for record in records {
        report.read += 1;
        let result = match record.value {
            Ok(listing) => ctx
                .service
                .upsert_listing(&listing)
                .await
                .map(|(_, outcome)| outcome)
                .map_err(|e| e.to_string()),
            Err(parse_error) => Err(parse_error),
        };
        match result {
            Ok(UpsertOutcome::Inserted) => report.inserted += 1,
            Ok(UpsertOutcome::Updated) => report.updated += 1,
            Ok(UpsertOutcome::Skipped) => report.skipped += 1,
            Err(error) => {
                tracing::warn!(line = record.line, %error, "listing import line rejected");
                report.skipped += 1;
                report.errors.push(format!("line {}: {error}", record.line));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use hifi_core::enums::{Category, ListingStatus};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::shared::fixtures::seed_component;

    #[tokio::test]
    async fn imports_refreshes_and_respects_sold() {
        let ctx = AppContext::in_memory().await;
        let component = seed_component(&ctx, "Schiit", "Magni", Category::Amp, 109.0).await;

        let line = |url: &str, price: u32| {
            format!(
                r#"{{"component_id":"{}","source":"manual","url":"{url}","title":"Magni","price":{price},"condition":"good"}}"#,
                component.id
            )
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", line("https://example.com/a", 80)).unwrap();
        writeln!(file, "{}", line("https://example.com/b", 75)).unwrap();
        writeln!(
            file,
            r#"{{"component_id":"cmp-missing","source":"manual","url":"https://example.com/c","title":"x","price":10,"condition":"good"}}"#
        )
        .unwrap();
        let report = import_listings(file.path(), &ctx).await.unwrap();
        assert_eq!((report.read, report.inserted, report.skipped), (3, 2, 1));

        let stored = ctx
            .service
            .find_listing_by_url("https://example.com/b")
            .await
            .unwrap()
            .unwrap();
        ctx.service
            .transition_listing(&stored.id, ListingStatus::Sold)
            .await
            .unwrap();

        let mut again = tempfile::NamedTempFile::new().unwrap();
        writeln!(again, "{}", line("https://example.com/a", 70)).unwrap();
        writeln!(again, "{}", line("https://example.com/b", 60)).unwrap();
        let report = import_listings(again.path(), &ctx).await.unwrap();
        assert_eq!((report.updated, report.skipped), (1, 1));
        assert!(report.errors.is_empty());
    }
}
