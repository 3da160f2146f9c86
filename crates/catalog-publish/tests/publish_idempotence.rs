use anyhow::Result;
use async_trait::async_trait;
use catalog_generate::{GenerateOptions, SyntheticBatch, Vocabulary, generate_batch};
use catalog_publish::{
    CatalogDocument, CatalogStore, InMemoryCatalogStore, KeyFilter, PublishError, publish,
};

fn batch(seed: u64) -> Result<SyntheticBatch> {
    let vocabulary = Vocabulary {
        categories: vec!["Granos".to_string(), "Lacteos".to_string()],
        suppliers: vec!["Sur".to_string(), "Norte".to_string()],
    };
    Ok(generate_batch(&vocabulary, &GenerateOptions { seed })?)
}

fn existing(id: i64) -> CatalogDocument {
    CatalogDocument {
        id,
        nombre: format!("Existing {id}"),
        precio_compra: 1.0,
        categoria: "Granos".to_string(),
        stock: 1,
        proveedor: "Sur".to_string(),
        precio_venta_publico: 1.1,
        margen_absoluto: 0.1,
        margen_porcentual: 0.1,
    }
}

#[tokio::test]
async fn publishing_twice_keeps_one_copy_of_the_range() -> Result<()> {
    let store = InMemoryCatalogStore::new();
    let batch = batch(42)?;

    let first = publish(&store, &batch).await?;
    assert_eq!(first.purged, 0);
    assert_eq!(first.inserted, 100);
    assert_eq!(first.verified, 100);
    assert!(!first.count_mismatch);

    let second = publish(&store, &batch).await?;
    assert_eq!(second.existing_total, 100);
    assert_eq!(second.purged, 100);
    assert_eq!(second.verified, 100);
    assert_eq!(store.count(&KeyFilter::from(500..=599)).await?, 100);
    Ok(())
}

#[tokio::test]
async fn documents_outside_the_range_are_untouched() -> Result<()> {
    let store =
        InMemoryCatalogStore::with_documents(vec![existing(1), existing(499), existing(550), existing(600)]);

    let report = publish(&store, &batch(7)?).await?;
    assert_eq!(report.existing_total, 4);
    assert_eq!(report.purged, 1);
    assert_eq!(store.count(&KeyFilter::All).await?, 103);
    assert_eq!(store.count(&KeyFilter::Eq(600)).await?, 1);

    let replaced: Vec<CatalogDocument> = store
        .documents()
        .into_iter()
        .filter(|doc| doc.id == 550)
        .collect();
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced[0].nombre, "Product_550");
    Ok(())
}

struct UnreachableStore;

#[async_trait]
impl CatalogStore for UnreachableStore {
    fn backend(&self) -> &'static str {
        "unreachable"
    }

    async fn count(&self, _filter: &KeyFilter) -> Result<u64, PublishError> {
        Err(PublishError::StoreUnavailable {
            backend: "unreachable",
            message: "connection refused".to_string(),
        })
    }

    async fn delete(&self, _filter: &KeyFilter) -> Result<u64, PublishError> {
        panic!("purge must not run when the store is unreachable");
    }

    async fn insert_many(&self, _documents: &[CatalogDocument]) -> Result<u64, PublishError> {
        panic!("insert must not run when the store is unreachable");
    }
}

#[tokio::test]
async fn unreachable_store_aborts_before_mutation() -> Result<()> {
    let err = publish(&UnreachableStore, &batch(42)?)
        .await
        .expect_err("connectivity check fails");
    assert!(matches!(err, PublishError::StoreUnavailable { .. }));
    Ok(())
}

/// Accepts deletes without removing anything.
struct IgnoresPurge(InMemoryCatalogStore);

#[async_trait]
impl CatalogStore for IgnoresPurge {
    fn backend(&self) -> &'static str {
        "ignores-purge"
    }

    async fn count(&self, filter: &KeyFilter) -> Result<u64, PublishError> {
        self.0.count(filter).await
    }

    async fn delete(&self, _filter: &KeyFilter) -> Result<u64, PublishError> {
        Ok(0)
    }

    async fn insert_many(&self, documents: &[CatalogDocument]) -> Result<u64, PublishError> {
        self.0.insert_many(documents).await
    }
}

#[tokio::test]
async fn verification_mismatch_is_reported_not_raised() -> Result<()> {
    let store = IgnoresPurge(InMemoryCatalogStore::new());
    let batch = batch(42)?;

    publish(&store, &batch).await?;
    let report = publish(&store, &batch).await?;

    assert!(report.count_mismatch);
    assert_eq!(report.expected, 100);
    assert_eq!(report.verified, 200);
    Ok(())
}
