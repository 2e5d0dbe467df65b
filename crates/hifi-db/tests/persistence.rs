//! End-to-end repository flows against an on-disk database.

use std::time::Duration;

use hifi_core::entities::{NewAlert, NewComponent, NewGear, NewListing};
use hifi_core::enums::{AlertType, Category, Condition, ListingSource, ListingStatus, StackPurpose};
use hifi_db::repos::UpsertOutcome;
use hifi_db::service::HiService;
use pretty_assertions::assert_eq;

fn component(brand: &str, name: &str, category: Category, price: f64) -> NewComponent {
    NewComponent {
        brand: brand.into(),
        name: name.into(),
        category,
        price_new: Some(price),
        price_used_min: None,
        price_used_max: None,
        sound_signature: None,
        impedance: None,
        sensitivity: None,
        needs_amp: false,
        driver_type: None,
        expert_grade: None,
        value_rating: None,
        why_recommended: None,
    }
}

fn listing(component_id: &str, url: &str, price: f64) -> NewListing {
    NewListing {
        component_id: component_id.into(),
        source: ListingSource::Reddit,
        external_id: Some(url.rsplit('/').next().unwrap_or_default().to_string()),
        url: url.into(),
        title: format!("[WTS] item for ${price}"),
        price,
        condition: Condition::VeryGood,
        location: Some("US-CA".into()),
        seller_username: Some("seller".into()),
        seller_feedback: Some(12),
        is_bundle: false,
        bundle_group_id: None,
        bundle_total_price: None,
        posted_at: None,
    }
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hifinder.db");
    let path = path.to_str().unwrap();

    let component_id = {
        let svc = HiService::new_local(path, Duration::from_secs(60)).await.unwrap();
        let (c, outcome) = svc
            .upsert_component(&component("Moondrop", "Blessing 2", Category::Iem, 320.0))
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);
        svc.upsert_listing(&listing(&c.id, "https://reddit.com/r/AVexchange/1", 250.0))
            .await
            .unwrap();
        c.id
    };

    let svc = HiService::new_local(path, Duration::from_secs(60)).await.unwrap();
    let c = svc.get_component(&component_id).await.unwrap();
    assert_eq!(c.name, "Blessing 2");
    let summary = svc.price_summary(&component_id).await.unwrap();
    assert_eq!(summary.available_count, 1);
}

#[tokio::test]
async fn collection_workflow() {
    let svc = HiService::new_local(":memory:", Duration::ZERO).await.unwrap();
    let (hd600, _) = svc
        .upsert_component(&component("Sennheiser", "HD 600", Category::Headphones, 399.0))
        .await
        .unwrap();
    let (magni, _) = svc
        .upsert_component(&component("Schiit", "Magni", Category::Amp, 110.0))
        .await
        .unwrap();

    let headphones = svc
        .add_gear(
            "alice",
            &NewGear {
                component_id: Some(hd600.id.clone()),
                purchase_price: Some(300.0),
                ..NewGear::default()
            },
        )
        .await
        .unwrap();
    let amp = svc
        .add_gear(
            "alice",
            &NewGear {
                component_id: Some(magni.id.clone()),
                purchase_price: Some(100.0),
                ..NewGear::default()
            },
        )
        .await
        .unwrap();

    let stack = svc
        .create_stack("alice", "Desk", None, StackPurpose::Desktop)
        .await
        .unwrap();
    svc.add_gear_to_stack(&stack.id, &amp.id, None).await.unwrap();
    svc.add_gear_to_stack(&stack.id, &headphones.id, None).await.unwrap();
    let detail = svc.get_stack(&stack.id).await.unwrap();
    assert_eq!(detail.gear.len(), 2);
    assert_eq!(detail.gear[0].gear.id, amp.id);

    let value = svc.collection_value("alice").await.unwrap();
    assert_eq!(value.item_count, 2);
    assert!((value.estimated_value - 509.0).abs() < 1e-9);

    svc.create_alert(
        "alice",
        &NewAlert {
            component_id: hd600.id.clone(),
            alert_type: AlertType::Exact,
            target_price: Some(250.0),
            price_min: None,
            price_max: None,
            min_condition: None,
        },
    )
    .await
    .unwrap();
    svc.upsert_listing(&listing(&hd600.id, "https://reddit.com/r/AVexchange/2", 245.0))
        .await
        .unwrap();
    let report = svc.check_alerts(Some("alice")).await.unwrap();
    assert_eq!(report.triggered.len(), 1);

    let l = svc
        .find_listing_by_url("https://reddit.com/r/AVexchange/2")
        .await
        .unwrap()
        .unwrap();
    svc.transition_listing(&l.id, ListingStatus::Sold).await.unwrap();

    // Zero TTL: stats always reflect the latest write.
    let stats = svc.market_stats().await.unwrap();
    assert_eq!(stats.listings_by_status.get("sold"), Some(&1));
    assert_eq!(stats.mean_asking_price, None);
}
