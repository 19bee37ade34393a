//! Integration tests for the catalog repositories.
//!
//! Runs against a real database created per test by `sqlx::test`:
//! - Watch creation with complications and detail loading
//! - Filtered listing, search and ordering
//! - Unique, check and foreign key constraint violations
//! - Cascades and aggregate queries
//!
//! Ignored by default. Run with `cargo test -p horology-db -- --ignored`
//! and `DATABASE_URL` pointing at a server that allows creating databases.

use horology_core::search::{Ordering, SortDirection};
use horology_core::watch::{CaseMaterial, MovementType};
use horology_db::models::brand::{CreateBrand, UpdateBrand};
use horology_db::models::complication::CreateComplication;
use horology_db::models::watch::{CreateWatch, UpdateWatch, WatchFilter};
use horology_db::repositories::watch_repo::{is_serial_conflict, DEFAULT_WATCH_ORDERING};
use horology_db::repositories::{BrandRepo, ComplicationRepo, StatsRepo, WatchRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_brand(name: &str, country: &str) -> CreateBrand {
    CreateBrand {
        name: name.to_string(),
        country: country.to_string(),
        founded_year: 1905,
        description: None,
        logo: None,
    }
}

fn new_watch(brand_id: i64, reference: &str, price: i64) -> CreateWatch {
    CreateWatch {
        brand_id,
        model_name: format!("Model {reference}"),
        reference_number: reference.to_string(),
        price: Decimal::new(price, 0),
        case_diameter: 40,
        movement_type: MovementType::Automatic,
        case_material: CaseMaterial::Steel,
        water_resistance: 100,
        description: String::new(),
        image: None,
        serial_number: None,
        complication_ids: Vec::new(),
    }
}

async fn insert_watch(pool: &PgPool, input: &CreateWatch, serial: &str) -> i64 {
    WatchRepo::create(pool, input, serial).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Watches
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_watch_with_complications(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Omega", "Switzerland"))
        .await
        .unwrap();
    let chrono = ComplicationRepo::create(
        &pool,
        &CreateComplication {
            name: "Chronograph".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    let mut input = new_watch(brand.id, "311.30.42.30.01.005", 7_000);
    input.complication_ids = vec![chrono.id, chrono.id];
    let watch = WatchRepo::create(&pool, &input, "SN-00000001").await.unwrap();

    assert_eq!(watch.serial_number, "SN-00000001");
    assert_eq!(watch.movement_type, MovementType::Automatic);

    let detail = WatchRepo::find_detail(&pool, watch.id).await.unwrap().unwrap();
    assert_eq!(detail.brand_name, "Omega");
    assert_eq!(detail.brand_obj.watch_count, 1);
    assert_eq!(detail.complication_names(), vec!["Chronograph"]);
    assert_eq!(detail.complications[0].watch_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_reference_rejected(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Rolex", "Switzerland"))
        .await
        .unwrap();
    insert_watch(&pool, &new_watch(brand.id, "126610LN", 10_000), "SN-00000001").await;

    let err = WatchRepo::create(&pool, &new_watch(brand.id, "126610LN", 11_000), "SN-00000002")
        .await
        .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_watches_reference_number"));
    assert!(!is_serial_conflict(&err));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_serial_rejected(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Tudor", "Switzerland"))
        .await
        .unwrap();
    insert_watch(&pool, &new_watch(brand.id, "M79030N", 4_000), "SN-12345678").await;

    assert!(WatchRepo::serial_exists(&pool, "SN-12345678").await.unwrap());
    assert!(!WatchRepo::serial_exists(&pool, "SN-87654321").await.unwrap());

    let err = WatchRepo::create(&pool, &new_watch(brand.id, "M79230R", 4_200), "SN-12345678")
        .await
        .unwrap_err();
    assert_eq!(
        err.as_database_error().unwrap().constraint(),
        Some("uq_watches_serial_number")
    );
    assert!(is_serial_conflict(&err));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_check_constraints_enforced(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Seiko", "Japan"))
        .await
        .unwrap();

    let mut small = new_watch(brand.id, "SRPD55", 300);
    small.case_diameter = 19;
    let err = WatchRepo::create(&pool, &small, "SN-00000001").await.unwrap_err();
    assert_eq!(err.as_database_error().unwrap().code().as_deref(), Some("23514"));

    let mut negative = new_watch(brand.id, "SRPD57", -1);
    negative.case_diameter = 42;
    let err = WatchRepo::create(&pool, &negative, "SN-00000002").await.unwrap_err();
    assert_eq!(
        err.as_database_error().unwrap().constraint(),
        Some("ck_watches_price_non_negative")
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unknown_brand_is_fk_violation(pool: PgPool) {
    let err = WatchRepo::create(&pool, &new_watch(999_999, "X-1", 100), "SN-00000001")
        .await
        .unwrap_err();
    assert_eq!(err.as_database_error().unwrap().code().as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_replaces_complications(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Zenith", "Switzerland"))
        .await
        .unwrap();
    let a = ComplicationRepo::create(
        &pool,
        &CreateComplication {
            name: "Date".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let b = ComplicationRepo::create(
        &pool,
        &CreateComplication {
            name: "Moonphase".to_string(),
            description: Some("Lunar cycle".to_string()),
        },
    )
    .await
    .unwrap();

    let mut input = new_watch(brand.id, "03.3100.3600", 9_000);
    input.complication_ids = vec![a.id];
    let id = insert_watch(&pool, &input, "SN-00000001").await;

    let update = UpdateWatch {
        brand_id: None,
        model_name: Some("Chronomaster Sport".to_string()),
        reference_number: None,
        price: Some(Decimal::new(1_050_000, 2)),
        case_diameter: None,
        movement_type: None,
        case_material: Some(CaseMaterial::Ceramic),
        water_resistance: None,
        description: None,
        image: None,
        complication_ids: Some(vec![b.id]),
    };
    let updated = WatchRepo::update(&pool, id, &update).await.unwrap().unwrap();
    assert_eq!(updated.model_name, "Chronomaster Sport");
    assert_eq!(updated.case_material, CaseMaterial::Ceramic);
    assert_eq!(updated.price, Decimal::new(10_500, 0));

    let names: Vec<String> = ComplicationRepo::list_for_watch(&pool, id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Moonphase".to_string()]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_nonexistent_returns_none(pool: PgPool) {
    let update = UpdateBrand {
        name: Some("Ghost".to_string()),
        country: None,
        founded_year: None,
        description: None,
        logo: None,
    };
    assert!(BrandRepo::update(&pool, 999_999, &update).await.unwrap().is_none());
    assert!(!WatchRepo::delete(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_brand_cascades_to_watches(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Breguet", "Switzerland"))
        .await
        .unwrap();
    let id = insert_watch(&pool, &new_watch(brand.id, "5177BB", 20_000), "SN-00000001").await;

    assert!(BrandRepo::delete(&pool, brand.id).await.unwrap());
    assert!(WatchRepo::find_by_id(&pool, id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_price_lte_filter(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Longines", "Switzerland"))
        .await
        .unwrap();
    insert_watch(&pool, &new_watch(brand.id, "L1", 1_000), "SN-00000001").await;
    insert_watch(&pool, &new_watch(brand.id, "L2", 5_000), "SN-00000002").await;
    insert_watch(&pool, &new_watch(brand.id, "L3", 9_000), "SN-00000003").await;

    let filter = WatchFilter {
        price_lte: Some(Decimal::new(5_000, 0)),
        ..WatchFilter::default()
    };
    let rows = WatchRepo::list(&pool, &filter, DEFAULT_WATCH_ORDERING, 20, 0)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.price <= Decimal::new(5_000, 0)));
    assert_eq!(WatchRepo::count(&pool, &filter).await.unwrap(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_search_matches_all_terms_across_fields(pool: PgPool) {
    let ap = BrandRepo::create(&pool, &new_brand("Audemars Piguet", "Switzerland"))
        .await
        .unwrap();
    let gs = BrandRepo::create(&pool, &new_brand("Grand Seiko", "Japan"))
        .await
        .unwrap();

    let mut oak = new_watch(ap.id, "15500ST", 30_000);
    oak.model_name = "Royal Oak".to_string();
    insert_watch(&pool, &oak, "SN-00000001").await;

    let mut snow = new_watch(gs.id, "SBGA211", 6_000);
    snow.model_name = "Snowflake".to_string();
    snow.description = "Spring Drive with a textured dial".to_string();
    insert_watch(&pool, &snow, "SN-00000002").await;

    let filter = WatchFilter {
        search: Some("piguet oak".to_string()),
        ..WatchFilter::default()
    };
    let rows = WatchRepo::list(&pool, &filter, DEFAULT_WATCH_ORDERING, 20, 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].model_name, "Royal Oak");

    let filter = WatchFilter {
        search: Some("TEXTURED".to_string()),
        ..WatchFilter::default()
    };
    let rows = WatchRepo::list(&pool, &filter, DEFAULT_WATCH_ORDERING, 20, 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].brand_name, "Grand Seiko");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_country_and_complication_filters(pool: PgPool) {
    let swiss = BrandRepo::create(&pool, &new_brand("IWC", "Switzerland"))
        .await
        .unwrap();
    let german = BrandRepo::create(&pool, &new_brand("Nomos", "Germany"))
        .await
        .unwrap();
    let gmt = ComplicationRepo::create(
        &pool,
        &CreateComplication {
            name: "GMT".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    let mut pilot = new_watch(swiss.id, "IW3777", 6_000);
    pilot.complication_ids = vec![gmt.id];
    insert_watch(&pool, &pilot, "SN-00000001").await;
    insert_watch(&pool, &new_watch(german.id, "Tangente", 2_000), "SN-00000002").await;

    let by_country = WatchFilter {
        brand_country_contains: Some("germ".to_string()),
        ..WatchFilter::default()
    };
    assert_eq!(WatchRepo::count(&pool, &by_country).await.unwrap(), 1);

    let by_complication = WatchFilter {
        complications: Some(gmt.id),
        ..WatchFilter::default()
    };
    let rows = WatchRepo::list(&pool, &by_complication, DEFAULT_WATCH_ORDERING, 20, 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].reference_number, "IW3777");
    assert_eq!(rows[0].complication_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_ordering_and_pagination(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Cartier", "France"))
        .await
        .unwrap();
    for (i, price) in [3_000, 1_000, 2_000].into_iter().enumerate() {
        let serial = format!("SN-0000000{i}");
        insert_watch(&pool, &new_watch(brand.id, &format!("C{i}"), price), &serial).await;
    }

    let by_price = Ordering {
        field: "price",
        direction: SortDirection::Asc,
    };
    let filter = WatchFilter::default();
    let first = WatchRepo::list(&pool, &filter, by_price, 2, 0).await.unwrap();
    let rest = WatchRepo::list(&pool, &filter, by_price, 2, 2).await.unwrap();

    let prices: Vec<Decimal> = first.iter().chain(rest.iter()).map(|r| r.price).collect();
    assert_eq!(
        prices,
        vec![Decimal::new(1_000, 0), Decimal::new(2_000, 0), Decimal::new(3_000, 0)]
    );
    assert_eq!(rest.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_details_follow_requested_order(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Panerai", "Italy"))
        .await
        .unwrap();
    let a = insert_watch(&pool, &new_watch(brand.id, "PAM01312", 8_000), "SN-00000001").await;
    let b = insert_watch(&pool, &new_watch(brand.id, "PAM00985", 9_000), "SN-00000002").await;

    let details = WatchRepo::find_details_by_ids(&pool, &[b, 999_999, a])
        .await
        .unwrap();
    let ids: Vec<i64> = details.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![b, a]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_brand_search_and_watch_count(pool: PgPool) {
    let jlc = BrandRepo::create(&pool, &new_brand("Jaeger-LeCoultre", "Switzerland"))
        .await
        .unwrap();
    BrandRepo::create(&pool, &new_brand("Citizen", "Japan"))
        .await
        .unwrap();
    insert_watch(&pool, &new_watch(jlc.id, "Q3978480", 9_000), "SN-00000001").await;

    let ordering = Ordering {
        field: "name",
        direction: SortDirection::Asc,
    };
    let rows = BrandRepo::list(&pool, Some("swiss"), ordering, 20, 0).await.unwrap();
    assert!(rows.is_empty());

    let rows = BrandRepo::list(&pool, Some("switz"), ordering, 20, 0).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].watch_count, 1);
    assert_eq!(BrandRepo::count(&pool, None).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Aggregates and export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_stats_aggregates(pool: PgPool) {
    let cheap = BrandRepo::create(&pool, &new_brand("Swatch", "Switzerland"))
        .await
        .unwrap();
    let dear = BrandRepo::create(&pool, &new_brand("Patek Philippe", "Switzerland"))
        .await
        .unwrap();
    BrandRepo::create(&pool, &new_brand("Empty", "Nowhere"))
        .await
        .unwrap();

    let mut quartz = new_watch(cheap.id, "SO28B100", 100);
    quartz.movement_type = MovementType::Quartz;
    insert_watch(&pool, &quartz, "SN-00000001").await;
    insert_watch(&pool, &new_watch(dear.id, "5711", 30_000), "SN-00000002").await;
    insert_watch(&pool, &new_watch(dear.id, "5712", 40_000), "SN-00000003").await;

    let counts = StatsRepo::movement_counts(&pool).await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].movement_type, MovementType::Automatic);
    assert_eq!(counts[0].count, 2);

    let prices = StatsRepo::top_brand_average_prices(&pool, 5).await.unwrap();
    assert_eq!(prices.len(), 2);
    assert_eq!(prices[0].brand_name, "Patek Philippe");
    assert_eq!(prices[0].average_price, Decimal::new(35_000, 0));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_export_rows_carry_complication_ids(pool: PgPool) {
    let brand = BrandRepo::create(&pool, &new_brand("Oris", "Switzerland"))
        .await
        .unwrap();
    let date = ComplicationRepo::create(
        &pool,
        &CreateComplication {
            name: "Date".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let mut input = new_watch(brand.id, "01 733 7730", 2_000);
    input.complication_ids = vec![date.id];
    insert_watch(&pool, &input, "SN-00000001").await;
    insert_watch(&pool, &new_watch(brand.id, "01 400 7763", 3_000), "SN-00000002").await;

    let rows = WatchRepo::list_export_rows(&pool).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].complication_ids, vec![date.id]);
    assert!(rows[1].complication_ids.is_empty());
    assert_eq!(rows[0].movement_type, "AUTO");
}
