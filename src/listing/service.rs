//! Listing update orchestration
//!
//! The single flow behind the listing-update endpoint: base field
//! checks, category classification, specifics validation, codec write
//! with the optimistic version check, and the gated status transition.
//! Validation failures come back as one combined `Rejected` list;
//! state-machine rejections abort with a `StatusError`.

use chrono::Utc;
use log::info;

use crate::catalog::registry::FieldRegistry;
use crate::error::{VitrineError, VitrineResult};
use crate::listing::status::{check_transition, ensure_media, MediaInventory, StatusError};
use crate::listing::types::{Listing, ListingStatus};
use crate::reference::vehicles::VehicleCatalog;
use crate::schema::classifier::CategoryType;
use crate::specifics::codec;
use crate::specifics::store::SpecificsStore;
use crate::validation::types::{codes, AttrMap, FieldError, ValidationResult};
use crate::validation::Validator;

/// A partial update to a listing; unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub category_slug: Option<String>,
    pub specifics: Option<AttrMap>,
    pub status: Option<ListingStatus>,
    /// Version of the specifics row the edit form was opened against.
    pub expected_version: Option<u64>,
}

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Updated(Listing),
    Rejected(Vec<FieldError>),
}

pub struct ListingService<'a> {
    store: &'a SpecificsStore,
    registry: &'a FieldRegistry,
    vehicles: &'a VehicleCatalog,
}

impl<'a> ListingService<'a> {
    #[must_use]
    pub fn new(
        store: &'a SpecificsStore,
        registry: &'a FieldRegistry,
        vehicles: &'a VehicleCatalog,
    ) -> Self {
        Self {
            store,
            registry,
            vehicles,
        }
    }

    fn check_base_fields(request: &UpdateRequest, errors: &mut Vec<FieldError>) {
        if let Some(title) = &request.title {
            if title.trim().chars().count() < 3 {
                errors.push(FieldError::new(
                    "title",
                    codes::INVALID,
                    "title must be at least 3 characters",
                ));
            }
        }
        if let Some(description) = &request.description {
            if description.trim().chars().count() < 10 {
                errors.push(FieldError::new(
                    "description",
                    codes::INVALID,
                    "description must be at least 10 characters",
                ));
            }
        }
        if let Some(price) = request.price {
            if !price.is_finite() || price < 0.0 {
                errors.push(FieldError::new("price", codes::INVALID, "price must be non-negative"));
            }
        }
    }

    /// Applies an update to a listing.
    ///
    /// # Errors
    /// `VitrineError::Status` for state-machine rejections (blocked
    /// listing, forbidden transition, missing media), `NotFound` for an
    /// unknown listing id, `Conflict` for a stale specifics version.
    /// Input problems are returned as `UpdateOutcome::Rejected`.
    pub fn update(
        &self,
        listing_id: &str,
        request: &UpdateRequest,
        media: &dyn MediaInventory,
    ) -> VitrineResult<UpdateOutcome> {
        let mut listing = self
            .store
            .get_listing(listing_id)?
            .ok_or_else(|| VitrineError::NotFound(format!("listing '{}'", listing_id)))?;

        if listing.status == ListingStatus::Blocked {
            return Err(StatusError::ListingBlocked.into());
        }

        let mut errors = Vec::new();
        Self::check_base_fields(request, &mut errors);

        let category_changed = request
            .category_slug
            .as_ref()
            .is_some_and(|slug| *slug != listing.category_slug);
        let category_slug = request
            .category_slug
            .clone()
            .unwrap_or_else(|| listing.category_slug.clone());
        let category = CategoryType::classify(&category_slug);

        // validate specifics before touching anything
        let mut validated = None;
        if let Some(submitted) = &request.specifics {
            if !submitted.is_empty() {
                let validator = Validator::new(self.registry, self.vehicles);
                match validator.validate(category, submitted)? {
                    ValidationResult::Valid(specifics) => validated = Some(specifics),
                    ValidationResult::Invalid(mut field_errors) => {
                        errors.append(&mut field_errors);
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Ok(UpdateOutcome::Rejected(errors));
        }

        // fail the stale tab before any base field is persisted; the
        // store re-checks authoritatively inside the upsert
        if let Some(expected) = request.expected_version {
            let current = self
                .store
                .get_specifics(listing_id, category)?
                .map(|row| row.version);
            if current != Some(expected) {
                return Err(VitrineError::Conflict(format!(
                    "specifics for listing '{}' changed (expected version {}, found {})",
                    listing_id,
                    expected,
                    current.map_or("none".to_string(), |v| v.to_string()),
                )));
            }
        }

        // status transition is checked, and the media precondition probed,
        // immediately before the commit below
        if let Some(next) = request.status {
            check_transition(listing.status, next)?;
            if next == ListingStatus::Active {
                ensure_media(media, listing_id)?;
            }
        }

        if let Some(title) = &request.title {
            listing.title = title.trim().to_string();
        }
        if let Some(description) = &request.description {
            listing.description = Some(description.trim().to_string());
        }
        if let Some(price) = request.price {
            listing.price = Some(price);
        }
        if let Some(location) = &request.location {
            let trimmed = location.trim();
            listing.location = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        }
        if category_changed {
            listing.category_slug = category_slug.clone();
        }
        let previous_status = listing.status;
        if let Some(next) = request.status {
            listing.status = next;
        }
        listing.updated_at = Utc::now();
        self.store.put_listing(&listing)?;

        if category_changed {
            self.store.reroute_category(listing_id, category)?;
        }

        if let Some(specifics) = validated {
            let canonical = codec::encode(self.registry, category, &specifics);
            self.store
                .upsert_specifics(listing_id, category, canonical, request.expected_version)?;
        } else if request.specifics.as_ref().is_some_and(AttrMap::is_empty) {
            // an explicit empty map clears the payload
            self.store.delete_specifics(listing_id, category)?;
        }

        if let Some(next) = request.status {
            if next != previous_status {
                info!(
                    "listing_status_change listing={} from={} to={}",
                    listing_id, previous_status, next
                );
            }
        }

        let updated = self
            .store
            .get_listing(listing_id)?
            .ok_or_else(|| VitrineError::NotFound(format!("listing '{}'", listing_id)))?;
        Ok(UpdateOutcome::Updated(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct FixedMedia(HashMap<String, u64>);

    impl MediaInventory for FixedMedia {
        fn media_count(&self, listing_id: &str) -> VitrineResult<u64> {
            Ok(*self.0.get(listing_id).unwrap_or(&0))
        }
    }

    fn media_with(listing_id: &str, count: u64) -> FixedMedia {
        FixedMedia([(listing_id.to_string(), count)].into_iter().collect())
    }

    fn fixture() -> (SpecificsStore, FieldRegistry, &'static VehicleCatalog) {
        (
            SpecificsStore::temporary().unwrap(),
            FieldRegistry::builtin(),
            VehicleCatalog::builtin(),
        )
    }

    #[test]
    fn publish_without_media_is_rejected() {
        let (store, registry, vehicles) = fixture();
        let service = ListingService::new(&store, &registry, vehicles);
        let listing = Listing::new("pets-dogs", "Sweet dog");
        store.put_listing(&listing).unwrap();

        let request = UpdateRequest {
            status: Some(ListingStatus::Active),
            ..UpdateRequest::default()
        };
        let err = service
            .update(&listing.id, &request, &media_with(&listing.id, 0))
            .unwrap_err();
        assert!(matches!(err, VitrineError::Status(StatusError::MediaRequired)));

        // with media attached the same request goes through
        let outcome = service
            .update(&listing.id, &request, &media_with(&listing.id, 2))
            .unwrap();
        match outcome {
            UpdateOutcome::Updated(updated) => assert_eq!(updated.status, ListingStatus::Active),
            UpdateOutcome::Rejected(errors) => panic!("unexpected rejection: {:?}", errors),
        }
    }

    #[test]
    fn active_to_draft_is_rejected_regardless_of_payload() {
        let (store, registry, vehicles) = fixture();
        let service = ListingService::new(&store, &registry, vehicles);
        let mut listing = Listing::new("pets-dogs", "Sweet dog");
        listing.status = ListingStatus::Active;
        store.put_listing(&listing).unwrap();

        let request = UpdateRequest {
            status: Some(ListingStatus::Draft),
            ..UpdateRequest::default()
        };
        let err = service
            .update(&listing.id, &request, &media_with(&listing.id, 5))
            .unwrap_err();
        assert!(matches!(
            err,
            VitrineError::Status(StatusError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn invalid_specifics_reject_the_whole_update() {
        let (store, registry, vehicles) = fixture();
        let service = ListingService::new(&store, &registry, vehicles);
        let listing = Listing::new("pets-dogs", "Sweet dog");
        store.put_listing(&listing).unwrap();

        let request = UpdateRequest {
            title: Some("New title".to_string()),
            specifics: Some(
                [
                    ("category".to_string(), json!("dog")),
                    ("listing_type".to_string(), json!("sale")),
                    ("microchipped".to_string(), json!(false)),
                ]
                .into_iter()
                .collect(),
            ),
            ..UpdateRequest::default()
        };
        let outcome = service
            .update(&listing.id, &request, &media_with(&listing.id, 1))
            .unwrap();
        let errors = match outcome {
            UpdateOutcome::Rejected(errors) => errors,
            UpdateOutcome::Updated(_) => panic!("expected rejection"),
        };
        assert_eq!(errors[0].field_path, "microchipped");

        // the title change must not have been applied
        let reloaded = store.get_listing(&listing.id).unwrap().unwrap();
        assert_eq!(reloaded.title, "Sweet dog");
    }

    #[test]
    fn valid_specifics_are_persisted_canonically() {
        let (store, registry, vehicles) = fixture();
        let service = ListingService::new(&store, &registry, vehicles);
        let listing = Listing::new("transport-cars", "Reliable Corolla");
        store.put_listing(&listing).unwrap();

        let request = UpdateRequest {
            specifics: Some(
                [
                    ("make".to_string(), json!("Toyota")),
                    ("model".to_string(), json!("Corolla")),
                    ("year".to_string(), json!(2005)),
                    ("mileage".to_string(), json!(120_000)),
                    ("condition".to_string(), json!("good")),
                ]
                .into_iter()
                .collect(),
            ),
            ..UpdateRequest::default()
        };
        service
            .update(&listing.id, &request, &media_with(&listing.id, 1))
            .unwrap();

        let row = store
            .get_specifics(&listing.id, CategoryType::Vehicle)
            .unwrap()
            .unwrap();
        assert_eq!(row.values.get("vehicle_mileage_km"), Some(&json!(120_000)));
        assert_eq!(row.values.get("vehicle_body_type"), Some(&json!("sedan")));
        assert_eq!(row.version, 1);
    }

    #[test]
    fn blocked_listing_rejects_any_update() {
        let (store, registry, vehicles) = fixture();
        let service = ListingService::new(&store, &registry, vehicles);
        let mut listing = Listing::new("pets-dogs", "Sweet dog");
        listing.status = ListingStatus::Blocked;
        store.put_listing(&listing).unwrap();

        let request = UpdateRequest {
            title: Some("Nicer title".to_string()),
            ..UpdateRequest::default()
        };
        let err = service
            .update(&listing.id, &request, &media_with(&listing.id, 1))
            .unwrap_err();
        assert!(matches!(err, VitrineError::Status(StatusError::ListingBlocked)));
    }
}
