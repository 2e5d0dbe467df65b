//! Shared test utilities for hifi-db unit tests.

pub(crate) mod helpers {
    use hifi_core::entities::{Component, NewComponent, NewGear, NewListing, UsedListing, UserGear};
    use hifi_core::enums::{Category, Condition, ListingSource, SoundSignature};

    use crate::HiDb;
    use crate::service::{DEFAULT_STATS_TTL, HiService};

    /// Create an in-memory HiService.
    pub async fn test_service() -> HiService {
        let db = HiDb::open_local(":memory:").await.unwrap();
        HiService::from_db(db, DEFAULT_STATS_TTL)
    }

    pub fn new_component(brand: &str, name: &str, category: Category, price: f64) -> NewComponent {
        NewComponent {
            brand: brand.into(),
            name: name.into(),
            category,
            price_new: Some(price),
            price_used_min: None,
            price_used_max: None,
            sound_signature: Some(SoundSignature::Neutral),
            impedance: None,
            sensitivity: None,
            needs_amp: false,
            driver_type: Some("dynamic".into()),
            expert_grade: None,
            value_rating: None,
            why_recommended: None,
        }
    }

    /// Insert a headphone priced at `price`.
    pub async fn seed_component(svc: &HiService, brand: &str, name: &str, price: f64) -> Component {
        let (component, _) = svc
            .upsert_component(&new_component(brand, name, Category::Headphones, price))
            .await
            .unwrap();
        component
    }

    pub fn new_listing(component_id: &str, url: &str, price: f64) -> NewListing {
        NewListing {
            component_id: component_id.into(),
            source: ListingSource::Manual,
            external_id: None,
            url: url.into(),
            title: format!("listing at {price}"),
            price,
            condition: Condition::Good,
            location: None,
            seller_username: None,
            seller_feedback: None,
            is_bundle: false,
            bundle_group_id: None,
            bundle_total_price: None,
            posted_at: None,
        }
    }

    pub async fn seed_listing(svc: &HiService, component_id: &str, url: &str, price: f64) -> UsedListing {
        let (listing, _) = svc
            .upsert_listing(&new_listing(component_id, url, price))
            .await
            .unwrap();
        listing
    }

    pub async fn seed_gear(svc: &HiService, user: &str, component_id: &str, paid: f64) -> UserGear {
        svc.add_gear(
            user,
            &NewGear {
                component_id: Some(component_id.into()),
                purchase_price: Some(paid),
                ..NewGear::default()
            },
        )
        .await
        .unwrap()
    }
}
