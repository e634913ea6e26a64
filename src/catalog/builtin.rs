//! Built-in field catalog
//!
//! Field definitions for all ten verticals. This is configuration data;
//! deployments may replace or extend it with a JSON catalog file. Bounds
//! and patterns encode the Belgian legal constraints the marketplace
//! operates under (4-digit postcodes, EPC certificates, VAT numbers,
//! 3-month rental deposit cap).

use chrono::{Datelike, Utc};

use crate::catalog::registry::FieldRegistry;
use crate::catalog::types::{FieldBuilder, FieldDefinition, FieldType};

const CONDITIONS: &[&str] = &["new", "like_new", "good", "fair", "for_parts"];
const DELIVERY_OPTIONS: &[&str] = &[
    "pickup_only",
    "delivery_available",
    "shipping_national",
    "shipping_international",
];

fn text(key: &str) -> FieldBuilder {
    FieldBuilder::new(key, FieldType::Text)
}

fn textarea(key: &str) -> FieldBuilder {
    FieldBuilder::new(key, FieldType::Textarea)
}

fn number(key: &str) -> FieldBuilder {
    FieldBuilder::new(key, FieldType::Number)
}

fn int(key: &str) -> FieldBuilder {
    FieldBuilder::new(key, FieldType::Number).integer()
}

fn select(key: &str, codes: &[&str]) -> FieldBuilder {
    FieldBuilder::new(key, FieldType::Select).options(codes)
}

fn multiselect(key: &str, codes: &[&str]) -> FieldBuilder {
    FieldBuilder::new(key, FieldType::Multiselect).options(codes)
}

fn boolean(key: &str) -> FieldBuilder {
    FieldBuilder::new(key, FieldType::Boolean)
}

fn date(key: &str) -> FieldBuilder {
    FieldBuilder::new(key, FieldType::Date)
}

fn shared() -> Vec<FieldDefinition> {
    vec![
        select("condition", CONDITIONS).required().build(),
        multiselect("delivery_options", DELIVERY_OPTIONS).build(),
        text("brand").max(100.0).build(),
        text("model").max(200.0).build(),
        text("color").max(100.0).build(),
        text("material").max(200.0).build(),
    ]
}

fn property(current_year: f64) -> Vec<FieldDefinition> {
    let d = "property";
    vec![
        select(
            "property_type",
            &[
                "apartment", "house", "villa", "townhouse", "studio", "loft", "duplex",
                "penthouse", "land", "commercial", "office", "garage", "parking_space", "storage",
            ],
        )
        .domain(d)
        .required()
        .group("classification")
        .build(),
        select("listing_type", &["sale", "rent"])
            .domain(d)
            .required()
            .group("classification")
            .build(),
        number("area_sqm").domain(d).required().unit("m2").range(1.0, 10_000.0).group("dimensions").build(),
        number("land_area_sqm").domain(d).unit("m2").min(1.0).group("dimensions").build(),
        int("rooms").domain(d).range(0.0, 20.0).group("dimensions").build(),
        int("bedrooms").domain(d).range(0.0, 15.0).group("dimensions").build(),
        number("bathrooms").domain(d).range(0.0, 10.0).group("dimensions").build(),
        int("year_built").domain(d).range(1800.0, current_year).group("building").build(),
        int("renovation_year").domain(d).range(1800.0, current_year).group("building").build(),
        int("floor").domain(d).range(-3.0, 150.0).group("building").build(),
        int("total_floors").domain(d).min(1.0).group("building").build(),
        select("epc_rating", &["A++", "A+", "A", "B", "C", "D", "E", "F", "G"])
            .domain(d)
            .group("energy")
            .build(),
        text("epc_cert_number")
            .domain(d)
            .pattern("^[0-9]{8}-[0-9]{7}-[0-9]{2}$")
            .group("energy")
            .build(),
        int("epc_kwh_per_sqm_year").domain(d).min(1.0).group("energy").build(),
        multiselect(
            "heating_type",
            &["gas", "electric", "oil", "heat_pump", "solar", "wood", "district", "none"],
        )
        .domain(d)
        .group("energy")
        .build(),
        boolean("double_glazing").domain(d).group("energy").build(),
        number("rent_monthly").domain(d).unit("eur").min(1.0).group("rental").build(),
        number("rent_charges_monthly").domain(d).unit("eur").min(0.0).group("rental").build(),
        number("deposit_months").domain(d).range(0.0, 3.0).group("rental").build(),
        int("lease_duration_months").domain(d).range(1.0, 120.0).group("rental").build(),
        date("available_from").domain(d).group("rental").build(),
        select("furnished", &["unfurnished", "semi_furnished", "fully_furnished"])
            .domain(d)
            .group("rental")
            .build(),
        text("postcode")
            .domain(d)
            .required()
            .pattern("^[1-9][0-9]{3}$")
            .group("location")
            .build(),
        text("municipality").domain(d).required().min(1.0).max(100.0).group("location").build(),
        text("neighborhood").domain(d).max(100.0).group("location").build(),
        int("parking_spaces").domain(d).range(0.0, 10.0).group("parking").build(),
        multiselect("parking_type", &["garage", "carport", "street", "underground"])
            .domain(d)
            .group("parking")
            .build(),
        number("terrace_sqm").domain(d).unit("m2").min(1.0).group("outdoor").build(),
        number("garden_sqm").domain(d).unit("m2").min(1.0).group("outdoor").build(),
        select("garden_orientation", &["north", "south", "east", "west"])
            .domain(d)
            .group("outdoor")
            .build(),
        boolean("elevator").domain(d).group("features").build(),
        boolean("cellar").domain(d).group("features").build(),
        boolean("pet_friendly").domain(d).group("policies").build(),
        boolean("smoking_allowed").domain(d).group("policies").build(),
    ]
}

fn job() -> Vec<FieldDefinition> {
    let d = "job";
    vec![
        text("job_category").domain(d).required().min(1.0).group("classification").build(),
        text("cp_code").domain(d).max(20.0).group("classification").build(),
        text("contract_type").domain(d).required().min(1.0).group("classification").build(),
        select("employment_type", &["full_time", "part_time", "freelance", "internship"])
            .domain(d)
            .required()
            .group("classification")
            .build(),
        number("hours_per_week").domain(d).range(1.0, 80.0).group("schedule").build(),
        select("remote_option", &["none", "hybrid", "full_remote"])
            .domain(d)
            .group("schedule")
            .build(),
        number("salary_min").domain(d).unit("eur").min(0.0).group("compensation").build(),
        number("salary_max").domain(d).unit("eur").min(0.0).group("compensation").build(),
        text("salary_currency").domain(d).min(3.0).max(3.0).group("compensation").build(),
        select("salary_period", &["hour", "month", "year"]).domain(d).group("compensation").build(),
        boolean("salary_negotiable").domain(d).group("compensation").build(),
        int("experience_years_min").domain(d).min(0.0).group("requirements").build(),
        select("education_level", &["none", "high_school", "bachelor", "master", "phd"])
            .domain(d)
            .group("requirements")
            .build(),
        multiselect(
            "languages_required",
            &["nl", "fr", "en", "de", "es", "it", "pt", "ru", "ar", "zh"],
        )
        .domain(d)
        .group("requirements")
        .build(),
        boolean("driving_license_required").domain(d).group("requirements").build(),
        multiselect(
            "license_types",
            &["AM", "A1", "A2", "A", "B", "BE", "C", "CE", "D", "DE", "G"],
        )
        .domain(d)
        .group("requirements")
        .build(),
        text("company_name").domain(d).max(200.0).group("company").build(),
        select("company_size", &["startup", "small", "medium", "large", "enterprise"])
            .domain(d)
            .group("company")
            .build(),
        date("application_deadline").domain(d).group("application").build(),
        text("contact_email")
            .domain(d)
            .pattern("^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$")
            .group("application")
            .build(),
        text("contact_phone").domain(d).max(30.0).group("application").build(),
        text("application_url")
            .domain(d)
            .pattern("^https?://")
            .group("application")
            .build(),
    ]
}

fn electronics(current_year: f64) -> Vec<FieldDefinition> {
    let d = "electronics";
    vec![
        select(
            "device_type",
            &[
                "phone", "tablet", "laptop", "desktop", "camera", "tv", "audio", "console",
                "watch", "monitor", "printer", "other",
            ],
        )
        .domain(d)
        .required()
        .group("device")
        .build(),
        int("release_year").domain(d).range(2000.0, current_year + 1.0).group("device").build(),
        number("memory_gb").domain(d).unit("gb").range(1.0, 1024.0).group("specs").build(),
        number("storage_gb").domain(d).unit("gb").range(1.0, 16_384.0).group("specs").build(),
        text("processor").domain(d).max(200.0).group("specs").build(),
        number("screen_size_inch").domain(d).unit("inch").range(1.0, 150.0).group("specs").build(),
        text("resolution").domain(d).max(50.0).group("specs").build(),
        select(
            "battery_condition",
            &["excellent", "good", "average", "poor", "needs_replacement"],
        )
        .domain(d)
        .group("condition")
        .build(),
        int("hours_of_use").domain(d).min(0.0).group("condition").build(),
        boolean("factory_locked").domain(d).group("status").build(),
        boolean("original_box").domain(d).group("completeness").build(),
        boolean("original_charger").domain(d).group("completeness").build(),
        date("warranty_until").domain(d).group("warranty").build(),
        text("imei").domain(d).pattern("^[0-9]{15}$").hidden().group("identifiers").build(),
        text("serial_number").domain(d).max(100.0).hidden().group("identifiers").build(),
    ]
}

fn fashion() -> Vec<FieldDefinition> {
    let d = "fashion";
    vec![
        select("gender", &["women", "men", "unisex"]).domain(d).group("classification").build(),
        select("age_category", &["baby", "toddler", "kids", "teens", "adults"])
            .domain(d)
            .group("classification")
            .build(),
        select(
            "clothing_type",
            &[
                "dress", "shirt", "blouse", "t_shirt", "sweater", "jacket", "coat", "pants",
                "jeans", "skirt", "shorts", "suit", "shoes", "boots", "sneakers", "bag",
                "accessory", "underwear", "swimwear", "sportswear",
            ],
        )
        .domain(d)
        .required()
        .group("classification")
        .build(),
        text("size_eu").domain(d).max(20.0).group("sizing").build(),
        text("size_be").domain(d).max(20.0).group("sizing").build(),
        text("size_uk").domain(d).max(20.0).group("sizing").build(),
        text("size_us").domain(d).max(20.0).group("sizing").build(),
        text("size_label").domain(d).max(20.0).group("sizing").build(),
        number("chest_bust_cm").domain(d).unit("cm").range(1.0, 200.0).group("measurements").build(),
        number("waist_cm").domain(d).unit("cm").range(1.0, 200.0).group("measurements").build(),
        number("hips_cm").domain(d).unit("cm").range(1.0, 200.0).group("measurements").build(),
        select("season", &["spring_summer", "autumn_winter", "all_season"])
            .domain(d)
            .group("details")
            .build(),
        text("pattern").domain(d).max(100.0).group("details").build(),
        textarea("defects").domain(d).max(500.0).group("condition").build(),
        boolean("original_tags").domain(d).group("provenance").build(),
        boolean("designer").domain(d).group("provenance").build(),
        boolean("vintage").domain(d).group("provenance").build(),
        text("vintage_decade").domain(d).max(20.0).group("provenance").build(),
    ]
}

fn home() -> Vec<FieldDefinition> {
    let d = "home";
    vec![
        select(
            "furniture_type",
            &[
                "sofa", "chair", "table", "bed", "wardrobe", "shelf", "desk", "cabinet",
                "decoration", "lighting", "kitchen", "appliance",
            ],
        )
        .domain(d)
        .required()
        .group("classification")
        .build(),
        number("width_cm").domain(d).unit("cm").range(1.0, 1000.0).group("dimensions").build(),
        number("height_cm").domain(d).unit("cm").range(1.0, 1000.0).group("dimensions").build(),
        number("depth_cm").domain(d).unit("cm").range(1.0, 1000.0).group("dimensions").build(),
        boolean("assembly_required").domain(d).group("details").build(),
    ]
}

fn pets() -> Vec<FieldDefinition> {
    let d = "pets";
    vec![
        select("category", &["dog", "cat", "bird", "fish", "rodent", "reptile", "other"])
            .domain(d)
            .required()
            .group("classification")
            .build(),
        select("listing_type", &["sale", "adoption", "lost", "found"])
            .domain(d)
            .required()
            .group("classification")
            .build(),
        text("species").domain(d).max(100.0).group("classification").build(),
        text("breed").domain(d).max(100.0).group("classification").build(),
        int("age_years").domain(d).range(0.0, 50.0).group("details").build(),
        int("age_months").domain(d).range(0.0, 11.0).group("details").build(),
        select("gender", &["male", "female", "unknown"]).domain(d).group("details").build(),
        boolean("microchipped").domain(d).group("legal").build(),
        text("microchip_number").domain(d).max(20.0).hidden().group("legal").build(),
        boolean("vaccinated").domain(d).group("legal").build(),
        boolean("pet_passport").domain(d).group("legal").build(),
        boolean("neutered_spayed").domain(d).group("health").build(),
        textarea("health_issues").domain(d).max(1000.0).group("health").build(),
        textarea("temperament").domain(d).max(1000.0).group("health").build(),
        number("adoption_fee").domain(d).unit("eur").min(0.0).group("adoption").build(),
        boolean("good_with_kids").domain(d).group("adoption").build(),
        date("last_seen_date").domain(d).group("lost_found").build(),
        text("last_seen_location").domain(d).max(500.0).group("lost_found").build(),
        textarea("distinctive_marks").domain(d).max(500.0).group("lost_found").build(),
    ]
}

fn sports() -> Vec<FieldDefinition> {
    let d = "sports";
    vec![
        select(
            "sport_type",
            &[
                "cycling", "fitness", "running", "swimming", "team_sports", "winter_sports",
                "water_sports", "outdoor", "combat_sports", "racket_sports", "other",
            ],
        )
        .domain(d)
        .required()
        .group("classification")
        .build(),
        text("item_type").domain(d).required().min(1.0).max(100.0).group("classification").build(),
        text("size").domain(d).max(50.0).group("details").build(),
        int("frame_size_cm").domain(d).unit("cm").range(1.0, 100.0).group("bike").build(),
        number("wheel_size_inch").domain(d).unit("inch").range(1.0, 36.0).group("bike").build(),
        int("gears").domain(d).range(0.0, 30.0).group("bike").build(),
    ]
}

fn services() -> Vec<FieldDefinition> {
    let d = "services";
    vec![
        select(
            "service_category",
            &[
                "home_services", "beauty_wellness", "education_tutoring", "it_tech", "events",
                "transport_moving", "professional", "other",
            ],
        )
        .domain(d)
        .required()
        .group("classification")
        .build(),
        text("service_type").domain(d).required().min(1.0).max(200.0).group("classification").build(),
        number("price_per_hour").domain(d).unit("eur").min(1.0).group("pricing").build(),
        number("price_per_session").domain(d).unit("eur").min(1.0).group("pricing").build(),
        boolean("price_negotiable").domain(d).group("pricing").build(),
        boolean("provider_certified").domain(d).group("provider").build(),
        int("experience_years").domain(d).range(0.0, 70.0).group("provider").build(),
        boolean("vat_registered").domain(d).group("legal").build(),
        text("vat_number").domain(d).pattern("^(BE)?0?[0-9]{10}$").group("legal").build(),
        boolean("insurance").domain(d).group("legal").build(),
        multiselect(
            "available_days",
            &["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"],
        )
        .domain(d)
        .group("availability")
        .build(),
        text("available_hours").domain(d).max(100.0).group("availability").build(),
        select(
            "location_service",
            &["client_location", "provider_location", "remote", "flexible"],
        )
        .domain(d)
        .group("availability")
        .build(),
    ]
}

fn baby_kids() -> Vec<FieldDefinition> {
    let d = "baby_kids";
    vec![
        select(
            "item_type",
            &[
                "stroller", "car_seat", "crib", "high_chair", "baby_carrier", "playpen", "toy",
                "clothing", "books", "gear",
            ],
        )
        .domain(d)
        .required()
        .group("classification")
        .build(),
        text("age_range").domain(d).max(100.0).group("classification").build(),
        multiselect("safety_standards", &["EN71", "CE", "EN1888", "ECE_R44", "ECE_R129"])
            .domain(d)
            .group("safety")
            .build(),
        text("safety_cert_url").domain(d).pattern("^https?://").group("safety").build(),
        select("recall_status", &["safe", "recalled", "unknown"]).domain(d).group("safety").build(),
        boolean("cleanable").domain(d).group("hygiene").build(),
        boolean("washable").domain(d).group("hygiene").build(),
        boolean("sterilized").domain(d).group("hygiene").build(),
    ]
}

fn vehicle() -> Vec<FieldDefinition> {
    let d = "vehicle";
    vec![
        text("make").domain(d).required().min(1.0).max(100.0).group("identity").build(),
        int("year").domain(d).required().min(1900.0).group("identity").build(),
        number("mileage")
            .domain(d)
            .required()
            .unit("km")
            .range(0.0, 2_000_000.0)
            .group("usage")
            .build(),
        select("condition", &["new", "excellent", "good", "needs_repair"])
            .domain(d)
            .required()
            .group("usage")
            .build(),
        // Derived display fields, recomputed from the reference catalog on
        // every validation; registered so the codec keeps them.
        number("vehicle_mileage_km").domain(d).unit("km").derived().build(),
        text("vehicle_body_type").domain(d).derived().build(),
        text("vehicle_country").domain(d).derived().build(),
    ]
}

/// Builds the complete built-in registry.
///
/// # Panics
/// Panics if the built-in catalog itself is inconsistent (duplicate keys,
/// select without options) — a programmer error caught by the test below.
#[must_use]
pub fn registry() -> FieldRegistry {
    let current_year = f64::from(Utc::now().year());
    let mut registry = FieldRegistry::new();
    let groups = [
        shared(),
        property(current_year),
        job(),
        electronics(current_year),
        fashion(),
        home(),
        pets(),
        sports(),
        services(),
        baby_kids(),
        vehicle(),
    ];
    for def in groups.into_iter().flatten() {
        let key = def.storage_key();
        registry
            .register(def)
            .unwrap_or_else(|e| panic!("built-in catalog invalid at '{}': {}", key, e));
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_consistent() {
        let registry = registry();
        assert!(registry.len() > 120);
    }

    #[test]
    fn scoped_condition_shadows_shared_one() {
        let registry = registry();
        let vehicle = registry.lookup_scoped(Some("vehicle"), "condition").unwrap();
        assert!(vehicle.option_code("needs_repair").is_some());
        assert!(vehicle.option_code("like_new").is_none());

        let fashion = registry.lookup_scoped(Some("fashion"), "condition").unwrap();
        assert!(fashion.option_code("like_new").is_some());
    }

    #[test]
    fn belgian_constraints_present() {
        let registry = registry();
        let postcode = registry.lookup_scoped(Some("property"), "postcode").unwrap();
        assert_eq!(postcode.pattern.as_deref(), Some("^[1-9][0-9]{3}$"));
        let deposit = registry.lookup_scoped(Some("property"), "deposit_months").unwrap();
        assert_eq!(deposit.max_value, Some(3.0));
        let vat = registry.lookup_scoped(Some("services"), "vat_number").unwrap();
        assert!(vat.pattern.is_some());
    }
}
