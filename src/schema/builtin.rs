//! Built-in category schemas
//!
//! Declarative multi-step forms for each vertical, composed from the
//! built-in field catalog. Like the catalog these are configuration
//! defaults; deployments override them with a JSON schema file.

use serde_json::json;

use crate::schema::classifier::CategoryType;
use crate::schema::store::SchemaStore;
use crate::schema::types::{
    CategorySchema, GroupLayout, SchemaFieldRef, SchemaGroup, SchemaStep,
};

fn f(field_key: &str) -> SchemaFieldRef {
    SchemaFieldRef::new(field_key)
}

fn group(key: &str, layout: GroupLayout, fields: Vec<SchemaFieldRef>) -> SchemaGroup {
    SchemaGroup {
        key: key.to_string(),
        label_key: None,
        layout,
        fields,
    }
}

fn step(key: &str, groups: Vec<SchemaGroup>) -> SchemaStep {
    SchemaStep {
        key: key.to_string(),
        label_key: None,
        description_key: None,
        groups,
    }
}

fn schema(steps: Vec<SchemaStep>) -> CategorySchema {
    CategorySchema { version: 1, steps }
}

fn property() -> CategorySchema {
    schema(vec![
        step(
            "basics",
            vec![
                group(
                    "classification",
                    GroupLayout::Double,
                    vec![f("property_type"), f("listing_type")],
                ),
                group(
                    "dimensions",
                    GroupLayout::Grid,
                    vec![
                        f("area_sqm"),
                        f("land_area_sqm"),
                        f("rooms"),
                        f("bedrooms"),
                        f("bathrooms"),
                    ],
                ),
            ],
        ),
        step(
            "building",
            vec![
                group(
                    "building",
                    GroupLayout::Double,
                    vec![f("year_built"), f("renovation_year"), f("floor"), f("total_floors")],
                ),
                group(
                    "energy",
                    GroupLayout::Double,
                    vec![
                        f("epc_rating"),
                        f("epc_cert_number"),
                        f("epc_kwh_per_sqm_year"),
                        f("heating_type"),
                        f("double_glazing"),
                    ],
                ),
            ],
        ),
        step(
            "rental",
            vec![group(
                "rental",
                GroupLayout::Double,
                vec![
                    f("rent_monthly").when("listing_type", json!("rent")),
                    f("rent_charges_monthly").when("listing_type", json!("rent")),
                    f("deposit_months").when("listing_type", json!("rent")),
                    f("lease_duration_months").when("listing_type", json!("rent")),
                    f("available_from").when("listing_type", json!("rent")),
                    f("furnished").when("listing_type", json!("rent")),
                    f("pet_friendly").when("listing_type", json!("rent")),
                    f("smoking_allowed").when("listing_type", json!("rent")),
                ],
            )],
        ),
        step(
            "location",
            vec![
                group(
                    "location",
                    GroupLayout::Double,
                    vec![f("postcode"), f("municipality"), f("neighborhood")],
                ),
                group(
                    "outdoor",
                    GroupLayout::Grid,
                    vec![
                        f("parking_spaces"),
                        f("parking_type"),
                        f("terrace_sqm"),
                        f("garden_sqm"),
                        f("garden_orientation"),
                        f("elevator"),
                        f("cellar"),
                    ],
                ),
            ],
        ),
    ])
}

fn job() -> CategorySchema {
    schema(vec![
        step(
            "role",
            vec![
                group(
                    "classification",
                    GroupLayout::Double,
                    vec![f("job_category"), f("cp_code"), f("contract_type"), f("employment_type")],
                ),
                group(
                    "schedule",
                    GroupLayout::Double,
                    vec![f("hours_per_week"), f("remote_option")],
                ),
            ],
        ),
        step(
            "compensation",
            vec![group(
                "compensation",
                GroupLayout::Grid,
                vec![
                    f("salary_min"),
                    f("salary_max"),
                    f("salary_currency"),
                    f("salary_period"),
                    f("salary_negotiable"),
                ],
            )],
        ),
        step(
            "requirements",
            vec![
                group(
                    "requirements",
                    GroupLayout::Double,
                    vec![
                        f("experience_years_min"),
                        f("education_level"),
                        f("languages_required"),
                        f("driving_license_required"),
                        f("license_types").when("driving_license_required", json!(true)),
                    ],
                ),
                group(
                    "company",
                    GroupLayout::Double,
                    vec![f("company_name"), f("company_size")],
                ),
                group(
                    "application",
                    GroupLayout::Double,
                    vec![
                        f("application_deadline"),
                        f("contact_email"),
                        f("contact_phone"),
                        f("application_url"),
                    ],
                ),
            ],
        ),
    ])
}

fn electronics() -> CategorySchema {
    let battery_devices = vec![json!("phone"), json!("tablet"), json!("laptop"), json!("watch")];
    schema(vec![
        step(
            "device",
            vec![
                group(
                    "device",
                    GroupLayout::Double,
                    vec![f("device_type"), f("brand"), f("model"), f("release_year")],
                ),
                group(
                    "specs",
                    GroupLayout::Grid,
                    vec![
                        f("memory_gb"),
                        f("storage_gb"),
                        f("processor"),
                        f("screen_size_inch"),
                        f("resolution"),
                    ],
                ),
            ],
        ),
        step(
            "condition",
            vec![
                group(
                    "condition",
                    GroupLayout::Double,
                    vec![
                        f("condition"),
                        f("battery_condition").when_any("device_type", battery_devices),
                        f("hours_of_use").when_any("device_type", vec![json!("tv"), json!("monitor")]),
                        f("factory_locked").when_any(
                            "device_type",
                            vec![json!("phone"), json!("tablet")],
                        ),
                    ],
                ),
                group(
                    "completeness",
                    GroupLayout::Double,
                    vec![f("original_box"), f("original_charger"), f("warranty_until")],
                ),
                group(
                    "identifiers",
                    GroupLayout::Double,
                    vec![f("imei"), f("serial_number")],
                ),
                group("delivery", GroupLayout::Single, vec![f("delivery_options")]),
            ],
        ),
    ])
}

fn fashion() -> CategorySchema {
    schema(vec![
        step(
            "item",
            vec![
                group(
                    "classification",
                    GroupLayout::Double,
                    vec![f("gender"), f("age_category"), f("clothing_type"), f("brand")],
                ),
                group(
                    "sizing",
                    GroupLayout::Grid,
                    vec![f("size_label"), f("size_eu"), f("size_be"), f("size_uk"), f("size_us")],
                ),
            ],
        ),
        step(
            "details",
            vec![
                group(
                    "details",
                    GroupLayout::Double,
                    vec![f("color"), f("material"), f("pattern"), f("season")],
                ),
                group(
                    "condition",
                    GroupLayout::Double,
                    vec![f("condition"), f("defects")],
                ),
                group(
                    "provenance",
                    GroupLayout::Double,
                    vec![
                        f("original_tags"),
                        f("designer"),
                        f("vintage"),
                        f("vintage_decade").when("vintage", json!(true)),
                    ],
                ),
                group("delivery", GroupLayout::Single, vec![f("delivery_options")]),
            ],
        ),
    ])
}

fn home() -> CategorySchema {
    schema(vec![step(
        "item",
        vec![
            group(
                "classification",
                GroupLayout::Double,
                vec![f("furniture_type"), f("brand"), f("material"), f("color")],
            ),
            group(
                "dimensions",
                GroupLayout::Grid,
                vec![f("width_cm"), f("height_cm"), f("depth_cm")],
            ),
            group(
                "details",
                GroupLayout::Double,
                vec![f("condition"), f("assembly_required"), f("delivery_options")],
            ),
        ],
    )])
}

fn pets() -> CategorySchema {
    let lost_found = vec![json!("lost"), json!("found")];
    schema(vec![
        step(
            "animal",
            vec![
                group(
                    "classification",
                    GroupLayout::Double,
                    vec![f("category"), f("listing_type"), f("species"), f("breed")],
                ),
                group(
                    "details",
                    GroupLayout::Grid,
                    vec![f("age_years"), f("age_months"), f("gender")],
                ),
            ],
        ),
        step(
            "health",
            vec![
                group(
                    "legal",
                    GroupLayout::Double,
                    vec![f("microchipped"), f("microchip_number"), f("vaccinated"), f("pet_passport")],
                ),
                group(
                    "health",
                    GroupLayout::Single,
                    vec![f("neutered_spayed"), f("health_issues"), f("temperament")],
                ),
            ],
        ),
        step(
            "situation",
            vec![
                group(
                    "adoption",
                    GroupLayout::Double,
                    vec![
                        f("adoption_fee").when("listing_type", json!("adoption")),
                        f("good_with_kids").when("listing_type", json!("adoption")),
                    ],
                ),
                group(
                    "lost_found",
                    GroupLayout::Double,
                    vec![
                        f("last_seen_date").when_any("listing_type", lost_found.clone()),
                        f("last_seen_location").when_any("listing_type", lost_found),
                        f("distinctive_marks"),
                    ],
                ),
            ],
        ),
    ])
}

fn sports() -> CategorySchema {
    schema(vec![step(
        "item",
        vec![
            group(
                "classification",
                GroupLayout::Double,
                vec![f("sport_type"), f("item_type"), f("brand"), f("size")],
            ),
            group(
                "bike",
                GroupLayout::Grid,
                vec![
                    f("frame_size_cm").when("sport_type", json!("cycling")),
                    f("wheel_size_inch").when("sport_type", json!("cycling")),
                    f("gears").when("sport_type", json!("cycling")),
                ],
            ),
            group(
                "details",
                GroupLayout::Double,
                vec![f("condition"), f("delivery_options")],
            ),
        ],
    )])
}

fn services() -> CategorySchema {
    schema(vec![
        step(
            "service",
            vec![
                group(
                    "classification",
                    GroupLayout::Double,
                    vec![f("service_category"), f("service_type")],
                ),
                group(
                    "pricing",
                    GroupLayout::Grid,
                    vec![f("price_per_hour"), f("price_per_session"), f("price_negotiable")],
                ),
            ],
        ),
        step(
            "provider",
            vec![
                group(
                    "provider",
                    GroupLayout::Double,
                    vec![f("provider_certified"), f("experience_years")],
                ),
                group(
                    "legal",
                    GroupLayout::Double,
                    vec![
                        f("vat_registered"),
                        f("vat_number").when("vat_registered", json!(true)),
                        f("insurance"),
                    ],
                ),
                group(
                    "availability",
                    GroupLayout::Double,
                    vec![f("available_days"), f("available_hours"), f("location_service")],
                ),
            ],
        ),
    ])
}

fn baby_kids() -> CategorySchema {
    let safety_critical = vec![
        json!("car_seat"),
        json!("crib"),
        json!("high_chair"),
        json!("baby_carrier"),
        json!("playpen"),
    ];
    schema(vec![step(
        "item",
        vec![
            group(
                "classification",
                GroupLayout::Double,
                vec![f("item_type"), f("age_range"), f("brand")],
            ),
            group(
                "safety",
                GroupLayout::Double,
                vec![
                    f("safety_standards").when_any("item_type", safety_critical.clone()),
                    f("safety_cert_url").when_any("item_type", safety_critical),
                    f("recall_status"),
                ],
            ),
            group(
                "hygiene",
                GroupLayout::Grid,
                vec![f("cleanable"), f("washable"), f("sterilized")],
            ),
            group(
                "details",
                GroupLayout::Double,
                vec![f("condition"), f("delivery_options")],
            ),
        ],
    )])
}

fn vehicle() -> CategorySchema {
    schema(vec![step(
        "vehicle",
        vec![
            group(
                "identity",
                GroupLayout::Double,
                vec![f("make"), f("model"), f("year")],
            ),
            group(
                "usage",
                GroupLayout::Double,
                vec![f("mileage"), f("condition")],
            ),
        ],
    )])
}

/// Builds the store of built-in schemas for every non-generic vertical.
#[must_use]
pub fn store() -> SchemaStore {
    let mut store = SchemaStore::new();
    store.insert(CategoryType::Property, property());
    store.insert(CategoryType::Job, job());
    store.insert(CategoryType::Electronics, electronics());
    store.insert(CategoryType::Fashion, fashion());
    store.insert(CategoryType::Home, home());
    store.insert(CategoryType::Pets, pets());
    store.insert(CategoryType::Sports, sports());
    store.insert(CategoryType::Services, services());
    store.insert(CategoryType::BabyKids, baby_kids());
    store.insert(CategoryType::Vehicle, vehicle());
    store
}
