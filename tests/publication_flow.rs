//! Publication state machine and persistence flows: the media gate,
//! forbidden transitions, optimistic concurrency, and the specialized
//! table vs attribute-bag routing.

mod common;

use common::{FixedMedia, MarketFixture};
use serde_json::json;
use vitrine::validation::types::AttrMap;
use vitrine::{
    CategoryType, Listing, ListingService, ListingStatus, StatusError, UpdateOutcome,
    UpdateRequest, VitrineError,
};

fn attrs(pairs: &[(&str, serde_json::Value)]) -> AttrMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn valid_pet_specifics() -> AttrMap {
    attrs(&[
        ("category", json!("dog")),
        ("listing_type", json!("sale")),
        ("microchipped", json!(true)),
    ])
}

#[test]
fn active_to_draft_is_rejected_regardless_of_payload_validity() {
    let fixture = MarketFixture::new().unwrap();
    let service = ListingService::new(&fixture.store, &fixture.registry, &fixture.vehicles);
    let mut listing = Listing::new("pets-dogs", "Good dog");
    listing.status = ListingStatus::Active;
    fixture.store.put_listing(&listing).unwrap();

    let request = UpdateRequest {
        status: Some(ListingStatus::Draft),
        specifics: Some(valid_pet_specifics()),
        ..UpdateRequest::default()
    };
    let err = service
        .update(&listing.id, &request, &FixedMedia::with(&listing.id, 3))
        .unwrap_err();
    match err {
        VitrineError::Status(StatusError::InvalidTransition { from, to }) => {
            assert_eq!(from, ListingStatus::Active);
            assert_eq!(to, ListingStatus::Draft);
        }
        other => panic!("expected invalid transition, got {:?}", other),
    }
}

#[test]
fn publishing_without_media_is_rejected_independent_of_specifics() {
    let fixture = MarketFixture::new().unwrap();
    let service = ListingService::new(&fixture.store, &fixture.registry, &fixture.vehicles);
    let listing = Listing::new("pets-dogs", "Good dog");
    fixture.store.put_listing(&listing).unwrap();

    let request = UpdateRequest {
        status: Some(ListingStatus::Active),
        specifics: Some(valid_pet_specifics()),
        ..UpdateRequest::default()
    };
    let err = service
        .update(&listing.id, &request, &FixedMedia::empty())
        .unwrap_err();
    assert!(matches!(err, VitrineError::Status(StatusError::MediaRequired)));

    // the rejected transition must not have persisted anything
    let reloaded = fixture.store.get_listing(&listing.id).unwrap().unwrap();
    assert_eq!(reloaded.status, ListingStatus::Draft);
    assert!(fixture
        .store
        .get_specifics(&listing.id, CategoryType::Pets)
        .unwrap()
        .is_none());
}

#[test]
fn media_check_is_fresh_at_call_time() {
    let fixture = MarketFixture::new().unwrap();
    let service = ListingService::new(&fixture.store, &fixture.registry, &fixture.vehicles);
    let listing = Listing::new("pets-dogs", "Good dog");
    fixture.store.put_listing(&listing).unwrap();

    let request = UpdateRequest {
        status: Some(ListingStatus::Active),
        ..UpdateRequest::default()
    };

    let mut media = FixedMedia::empty();
    assert!(service.update(&listing.id, &request, &media).is_err());

    // media uploaded between the two submissions
    media.set(&listing.id, 1);
    let outcome = service.update(&listing.id, &request, &media).unwrap();
    match outcome {
        UpdateOutcome::Updated(updated) => assert_eq!(updated.status, ListingStatus::Active),
        UpdateOutcome::Rejected(errors) => panic!("unexpected rejection: {:?}", errors),
    }
}

#[test]
fn blocked_cannot_be_requested() {
    let fixture = MarketFixture::new().unwrap();
    let service = ListingService::new(&fixture.store, &fixture.registry, &fixture.vehicles);
    let listing = Listing::new("pets-dogs", "Good dog");
    fixture.store.put_listing(&listing).unwrap();

    let request = UpdateRequest {
        status: Some(ListingStatus::Blocked),
        ..UpdateRequest::default()
    };
    let err = service
        .update(&listing.id, &request, &FixedMedia::with(&listing.id, 1))
        .unwrap_err();
    assert!(matches!(
        err,
        VitrineError::Status(StatusError::BlockedStatusRequested)
    ));
}

#[test]
fn concurrent_edits_conflict_on_stale_version() {
    let fixture = MarketFixture::new().unwrap();
    let service = ListingService::new(&fixture.store, &fixture.registry, &fixture.vehicles);
    let listing = Listing::new("pets-dogs", "Good dog");
    fixture.store.put_listing(&listing).unwrap();
    let media = FixedMedia::with(&listing.id, 1);

    // first tab saves; the row is now at version 1
    let first = UpdateRequest {
        specifics: Some(valid_pet_specifics()),
        ..UpdateRequest::default()
    };
    service.update(&listing.id, &first, &media).unwrap();

    // second tab, opened against version 1, saves and bumps to 2
    let second = UpdateRequest {
        specifics: Some(valid_pet_specifics()),
        expected_version: Some(1),
        ..UpdateRequest::default()
    };
    service.update(&listing.id, &second, &media).unwrap();

    // the first tab retries with its stale version and loses
    let stale = UpdateRequest {
        specifics: Some(valid_pet_specifics()),
        expected_version: Some(1),
        ..UpdateRequest::default()
    };
    let err = service.update(&listing.id, &stale, &media).unwrap_err();
    assert!(matches!(err, VitrineError::Conflict(_)));
}

#[test]
fn specialized_categories_route_to_their_own_table() {
    let fixture = MarketFixture::new().unwrap();
    let service = ListingService::new(&fixture.store, &fixture.registry, &fixture.vehicles);
    let listing = Listing::new("transport-cars-used", "Corolla 2005");
    fixture.store.put_listing(&listing).unwrap();

    let request = UpdateRequest {
        specifics: Some(attrs(&[
            ("make", json!("Toyota")),
            ("model", json!("Corolla")),
            ("year", json!(2005)),
            ("mileage", json!(120_000)),
            ("condition", json!("good")),
        ])),
        ..UpdateRequest::default()
    };
    service
        .update(&listing.id, &request, &FixedMedia::with(&listing.id, 1))
        .unwrap();

    let row = fixture
        .store
        .get_specifics(&listing.id, CategoryType::Vehicle)
        .unwrap()
        .unwrap();
    assert_eq!(row.category_type, CategoryType::Vehicle);
    // the listing row itself carries no embedded payload
    let reloaded = fixture.store.get_listing(&listing.id).unwrap().unwrap();
    assert!(reloaded.specifics.is_none());
}

#[test]
fn category_change_deletes_foreign_specifics() {
    let fixture = MarketFixture::new().unwrap();
    let service = ListingService::new(&fixture.store, &fixture.registry, &fixture.vehicles);
    let listing = Listing::new("transport-cars", "Was a car");
    fixture.store.put_listing(&listing).unwrap();
    let media = FixedMedia::with(&listing.id, 1);

    let as_car = UpdateRequest {
        specifics: Some(attrs(&[
            ("make", json!("Toyota")),
            ("model", json!("Corolla")),
            ("year", json!(2005)),
            ("mileage", json!(50_000)),
            ("condition", json!("excellent")),
        ])),
        ..UpdateRequest::default()
    };
    service.update(&listing.id, &as_car, &media).unwrap();
    assert!(fixture
        .store
        .get_specifics(&listing.id, CategoryType::Vehicle)
        .unwrap()
        .is_some());

    // recategorized to pets: the vehicle row must be deleted
    let as_pet = UpdateRequest {
        category_slug: Some("pets-dogs".to_string()),
        specifics: Some(valid_pet_specifics()),
        ..UpdateRequest::default()
    };
    service.update(&listing.id, &as_pet, &media).unwrap();

    assert!(fixture
        .store
        .get_specifics(&listing.id, CategoryType::Vehicle)
        .unwrap()
        .is_none());
    assert!(fixture
        .store
        .get_specifics(&listing.id, CategoryType::Pets)
        .unwrap()
        .is_some());
}

#[test]
fn empty_specifics_clear_the_payload() {
    let fixture = MarketFixture::new().unwrap();
    let service = ListingService::new(&fixture.store, &fixture.registry, &fixture.vehicles);
    let listing = Listing::new("pets-dogs", "Good dog");
    fixture.store.put_listing(&listing).unwrap();
    let media = FixedMedia::with(&listing.id, 1);

    let fill = UpdateRequest {
        specifics: Some(valid_pet_specifics()),
        ..UpdateRequest::default()
    };
    service.update(&listing.id, &fill, &media).unwrap();

    let clear = UpdateRequest {
        specifics: Some(AttrMap::new()),
        ..UpdateRequest::default()
    };
    service.update(&listing.id, &clear, &media).unwrap();
    assert!(fixture
        .store
        .get_specifics(&listing.id, CategoryType::Pets)
        .unwrap()
        .is_none());
}
