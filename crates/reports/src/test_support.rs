//! Fixtures for the layout tests.

use chrono::{TimeZone, Utc};
use horology_core::watch::{CaseMaterial, MovementType};
use horology_db::models::brand::BrandSummary;
use horology_db::models::complication::ComplicationSummary;
use horology_db::models::watch::WatchDetail;
use rust_decimal::Decimal;

pub fn sample_watch(id: i64, reference: &str, price: i64) -> WatchDetail {
    let created = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let brand = BrandSummary {
        id: 1,
        name: "Patek Philippe".to_string(),
        country: "Switzerland".to_string(),
        founded_year: 1839,
        logo: None,
        logo_url: None,
        description: String::new(),
        watch_count: 1,
    };
    WatchDetail {
        id,
        model_name: "Nautilus".to_string(),
        reference_number: reference.to_string(),
        price: Decimal::new(price, 0),
        case_diameter: 40,
        movement_type: MovementType::Automatic,
        movement_display: MovementType::Automatic.label(),
        case_material: CaseMaterial::Steel,
        material_display: CaseMaterial::Steel.label(),
        water_resistance: 120,
        description: "Integrated bracelet sports watch.".to_string(),
        image: None,
        image_url: None,
        serial_number: format!("SN-{:08}", id),
        brand: brand.id,
        brand_name: brand.name.clone(),
        brand_country: brand.country.clone(),
        brand_obj: brand,
        complications: Vec::new(),
        created_at: created,
        updated_at: created,
    }
}

pub fn with_complications(mut watch: WatchDetail, names: &[&str]) -> WatchDetail {
    watch.complications = names
        .iter()
        .enumerate()
        .map(|(i, name)| ComplicationSummary {
            id: i as i64 + 1,
            name: name.to_string(),
            description: String::new(),
            watch_count: 1,
        })
        .collect();
    watch
}
