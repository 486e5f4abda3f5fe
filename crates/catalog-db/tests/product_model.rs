//! Product model tests against a real SQLite database.
//!
//! Each test gets its own in-memory database, so there is no shared state
//! to clean up between tests.

use catalog_core::factory::ProductFactory;
use catalog_core::{Category, DataValidationError, Price, Product};
use catalog_db::{Database, DbConfig, DbError, ProductStore};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::collections::HashSet;

async fn setup() -> (Database, ProductStore) {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    let store = db.products();
    (db, store)
}

async fn create_batch(store: &ProductStore, count: usize) -> Vec<Product> {
    let mut products = ProductFactory::build_batch(count);
    for product in products.iter_mut() {
        store.create(product).await.unwrap();
    }
    products
}

#[tokio::test]
async fn test_create_a_product() {
    let product = Product::new(
        "Fedora",
        "A red hat",
        "12.50".parse().unwrap(),
        true,
        Category::Cloths,
    );
    assert_eq!(product.to_string(), "<Product Fedora id=[None]>");
    assert_eq!(product.id(), None);
    assert_eq!(product.name, "Fedora");
    assert_eq!(product.description, "A red hat");
    assert!(product.available);
    assert_eq!(product.price.amount(), Decimal::new(1250, 2));
    assert_eq!(product.category, Category::Cloths);
}

#[tokio::test]
async fn test_add_a_product() {
    let (_db, store) = setup().await;
    assert!(store.all().await.unwrap().is_empty());

    let mut product = ProductFactory::build();
    store.create(&mut product).await.unwrap();
    assert!(product.id().is_some());

    let products = store.all().await.unwrap();
    assert_eq!(products.len(), 1);
    let stored = &products[0];
    assert_eq!(stored.id(), product.id());
    assert_eq!(stored.name, product.name);
    assert_eq!(stored.description, product.description);
    assert_eq!(stored.price, product.price);
    assert_eq!(stored.available, product.available);
    assert_eq!(stored.category, product.category);
}

#[tokio::test]
async fn test_read_a_product() {
    let (_db, store) = setup().await;
    let mut product = ProductFactory::build();
    store.create(&mut product).await.unwrap();

    let found = store
        .find(product.id().unwrap())
        .await
        .unwrap()
        .expect("product was just created");
    assert_eq!(found, product);
}

#[tokio::test]
async fn test_update_a_product() {
    let (_db, store) = setup().await;
    let mut product = ProductFactory::build();
    store.create(&mut product).await.unwrap();
    let original_id = product.id();

    product.description = "New description".to_string();
    store.update(&product).await.unwrap();
    assert_eq!(product.id(), original_id);

    let products = store.all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id(), original_id);
    assert_eq!(products[0].description, "New description");
}

#[tokio::test]
async fn test_update_without_id_fails() {
    let (_db, store) = setup().await;
    let product = ProductFactory::build();

    let err = store.update(&product).await.unwrap_err();
    assert!(err.is_validation());
    assert!(store.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_a_product() {
    let (_db, store) = setup().await;
    let mut product = ProductFactory::build();
    store.create(&mut product).await.unwrap();
    assert_eq!(store.all().await.unwrap().len(), 1);

    store.delete(&product).await.unwrap();
    assert!(store.all().await.unwrap().is_empty());
    assert!(store.find(product.id().unwrap()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_products() {
    let (_db, store) = setup().await;
    assert!(store.all().await.unwrap().is_empty());

    create_batch(&store, 5).await;
    assert_eq!(store.all().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_ids_are_unique() {
    let (_db, store) = setup().await;
    let products = create_batch(&store, 25).await;

    let ids: HashSet<_> = products.iter().filter_map(Product::id).collect();
    assert_eq!(ids.len(), 25);
}

#[tokio::test]
async fn test_find_a_product_by_name() {
    let (_db, store) = setup().await;
    create_batch(&store, 5).await;

    let products = store.all().await.unwrap();
    let name = products[0].name.clone();
    let expected = products.iter().filter(|p| p.name == name).count();

    let found = store.find_by_name(name.as_str());
    assert_eq!(found.count().await.unwrap() as usize, expected);
    for product in found.fetch_all().await.unwrap() {
        assert_eq!(product.name, name);
    }
}

#[tokio::test]
async fn test_find_a_product_by_availability() {
    let (_db, store) = setup().await;
    let products = create_batch(&store, 10).await;

    let available = products[0].available;
    let expected = products.iter().filter(|p| p.available == available).count();

    let found = store.find_by_availability(available);
    assert_eq!(found.count().await.unwrap() as usize, expected);
    for product in found.fetch_all().await.unwrap() {
        assert_eq!(product.available, available);
    }
}

#[tokio::test]
async fn test_find_a_product_by_category() {
    let (_db, store) = setup().await;
    let products = create_batch(&store, 10).await;

    let category = products[0].category;
    let expected = products.iter().filter(|p| p.category == category).count();

    let found = store.find_by_category(category);
    assert_eq!(found.count().await.unwrap() as usize, expected);
    for product in found.fetch_all().await.unwrap() {
        assert_eq!(product.category, category);
    }
}

#[tokio::test]
async fn test_find_a_product_by_price() {
    let (_db, store) = setup().await;
    let products = create_batch(&store, 10).await;

    let price = products[0].price;
    let expected = products.iter().filter(|p| p.price == price).count();

    let found = store.find_by_price(price);
    assert_eq!(found.count().await.unwrap() as usize, expected);
    for product in found.fetch_all().await.unwrap() {
        assert_eq!(product.price, price);
    }
}

#[tokio::test]
async fn test_find_by_price_from_text() {
    let (_db, store) = setup().await;
    let mut product = Product::new(
        "Hat",
        "",
        Price::new(Decimal::new(125, 1)).unwrap(),
        true,
        Category::Cloths,
    );
    store.create(&mut product).await.unwrap();

    let found = store
        .find_by_price_str("12.50")
        .unwrap()
        .fetch_all()
        .await
        .unwrap();
    assert_eq!(found, vec![product]);
}

#[tokio::test]
async fn test_deserialize_a_product() {
    let product = ProductFactory::build();
    let data = json!({
        "name": product.name,
        "description": product.description,
        "price": product.price.to_string(),
        "available": product.available,
        "category": product.category.name(),
    });

    let mut new_product = ProductFactory::build();
    new_product.deserialize(&data).unwrap();
    assert_eq!(new_product.name, product.name);
    assert_eq!(new_product.description, product.description);
    assert_eq!(new_product.price, product.price);
    assert_eq!(new_product.available, product.available);
    assert_eq!(new_product.category, product.category);

    let mut bad = data.clone();
    bad["available"] = json!("Maybe");
    assert!(matches!(
        new_product.deserialize(&bad),
        Err(DataValidationError::InvalidType { .. })
    ));

    let mut bad = data.clone();
    bad["category"] = json!("SPACESHUTTLE");
    assert!(matches!(
        new_product.deserialize(&bad),
        Err(DataValidationError::InvalidCategory(_))
    ));

    let mut bad = data.clone();
    bad.as_object_mut().unwrap().remove("name");
    assert_eq!(
        new_product.deserialize(&bad),
        Err(DataValidationError::missing("name"))
    );

    assert!(matches!(
        new_product.deserialize(&Value::String("not a product".into())),
        Err(DataValidationError::BadPayload(_))
    ));
}

#[tokio::test]
async fn test_serialize_round_trip_through_store() {
    let (_db, store) = setup().await;
    let mut product = ProductFactory::build();
    store.create(&mut product).await.unwrap();

    let stored = store.find(product.id().unwrap()).await.unwrap().unwrap();
    let data = stored.serialize();
    assert_eq!(data["id"], json!(product.id().unwrap().to_string()));

    let mut copy = ProductFactory::build();
    copy.deserialize(&data).unwrap();
    assert_eq!(copy.name, product.name);
    assert_eq!(copy.price, product.price);
    assert_eq!(copy.category, product.category);
    assert_eq!(copy.id(), None);
}

#[tokio::test]
async fn test_deserialized_payload_can_be_created() {
    let (_db, store) = setup().await;
    let mut product = Product::from_payload(&json!({
        "name": "Banana",
        "description": "",
        "price": 0.5,
        "available": false,
        "category": "FOOD",
    }))
    .unwrap();

    store.create(&mut product).await.unwrap();

    let found = store.find_by_category(Category::Food).fetch_all().await.unwrap();
    assert_eq!(found, vec![product]);
    assert_eq!(found[0].price.to_string(), "0.50");
}

#[tokio::test]
async fn test_closed_database_is_storage_error() {
    let (db, store) = setup().await;
    db.close().await;

    let mut product = ProductFactory::build();
    let err = store.create(&mut product).await.unwrap_err();
    assert!(!err.is_validation());
    assert!(matches!(err, DbError::ConnectionFailed(_)));
    assert!(product.id().is_none());
}

#[tokio::test]
async fn test_failed_insert_rolls_back_and_keeps_id_empty() {
    let (db, store) = setup().await;
    sqlx::query(
        "CREATE TRIGGER reject_products BEFORE INSERT ON products \
         BEGIN SELECT RAISE(ABORT, 'inserts disabled'); END",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let mut product = ProductFactory::build();
    let err = store.create(&mut product).await.unwrap_err();

    assert!(!err.is_validation());
    assert!(product.id().is_none());
    assert_eq!(store.count().await.unwrap(), 0);
}
