use catalog_core::{CellValue, Dataset, columns};
use catalog_generate::{
    GenerateOptions, GenerationError, SyntheticBatch, Vocabulary, generate_batch, write_batch_csv,
};

fn cleaned_catalog() -> Dataset {
    let columns = ["id", "categoria", "proveedor"]
        .iter()
        .map(|name| name.to_string())
        .collect();
    Dataset::from_rows(columns, vec![
        vec![CellValue::Int(1), CellValue::text("Granos"), CellValue::text("Sur")],
        vec![CellValue::Int(2), CellValue::text("Lacteos"), CellValue::text("Norte")],
        vec![CellValue::Int(3), CellValue::text("Granos"), CellValue::text("unknown supplier")],
    ])
    .expect("cleaned catalog")
}

#[test]
fn vocabulary_keeps_first_seen_order() {
    let vocabulary = Vocabulary::from_dataset(&cleaned_catalog());
    assert_eq!(vocabulary.categories, vec!["Granos", "Lacteos"]);
    assert_eq!(vocabulary.suppliers, vec!["Sur", "Norte", "unknown supplier"]);
}

#[test]
fn same_seed_reproduces_the_batch() {
    let vocabulary = Vocabulary::from_dataset(&cleaned_catalog());
    let options = GenerateOptions { seed: 42 };

    let first = generate_batch(&vocabulary, &options).expect("first batch");
    let second = generate_batch(&vocabulary, &options).expect("second batch");
    assert_eq!(first, second);

    let other = generate_batch(&vocabulary, &GenerateOptions { seed: 43 }).expect("other batch");
    assert_ne!(first.records, other.records);
}

#[test]
fn margins_are_derived_from_rounded_prices() {
    let vocabulary = Vocabulary::from_dataset(&cleaned_catalog());
    let batch = generate_batch(&vocabulary, &GenerateOptions::default()).expect("batch");

    for record in &batch.records {
        let expected = ((record.precio_compra * 1.12) * 100.0).round_ties_even() / 100.0;
        assert_eq!(record.precio_venta_publico, expected);
        assert_eq!(
            record.margen_absoluto,
            record.precio_venta_publico - record.precio_compra
        );
        assert_eq!(
            record.margen_porcentual,
            record.margen_absoluto / record.precio_compra
        );
        assert_eq!(record.precio_compra, (record.precio_compra * 100.0).round() / 100.0);
        assert!(vocabulary.categories.contains(&record.categoria));
        assert!(vocabulary.suppliers.contains(&record.proveedor));
    }
}

#[test]
fn single_value_vocabulary_fills_every_row() {
    let vocabulary = Vocabulary {
        categories: vec!["Granos".to_string()],
        suppliers: vec!["Sur".to_string()],
    };
    let batch = generate_batch(&vocabulary, &GenerateOptions::default()).expect("batch");
    assert!(batch.records.iter().all(|record| record.categoria == "Granos"));
    assert!(batch.records.iter().all(|record| record.proveedor == "Sur"));
}

#[test]
fn empty_categories_fail_before_sampling() {
    let vocabulary = Vocabulary {
        categories: Vec::new(),
        suppliers: vec!["Sur".to_string()],
    };
    let err = generate_batch(&vocabulary, &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, GenerationError::EmptyVocabulary { column } if column == "categoria"));
}

#[test]
fn batch_dataset_carries_margin_columns() {
    let vocabulary = Vocabulary::from_dataset(&cleaned_catalog());
    let batch = generate_batch(&vocabulary, &GenerateOptions::default()).expect("batch");
    let dataset = batch.to_dataset();

    assert_eq!(dataset.len(), 100);
    assert!(dataset.has_column(columns::MARGEN_ABSOLUTO));
    assert!(dataset.has_column(columns::MARGEN_PORCENTUAL));
    assert_eq!(dataset.get(0, columns::ID), Some(&CellValue::Int(500)));
    assert_eq!(SyntheticBatch::key_range(), 500..=599);
}

#[test]
fn csv_output_is_byte_stable() {
    let vocabulary = Vocabulary::from_dataset(&cleaned_catalog());
    let batch = generate_batch(&vocabulary, &GenerateOptions::default()).expect("batch");

    let mut dir = std::env::temp_dir();
    dir.push(format!("catalog_generate_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("temp dir");

    let first = dir.join("first.csv");
    let second = dir.join("second.csv");
    let bytes = write_batch_csv(&first, &batch).expect("write first");
    write_batch_csv(&second, &batch).expect("write second");

    let contents = std::fs::read_to_string(&first).expect("read csv");
    assert_eq!(bytes as usize, contents.len());
    assert!(contents.starts_with(
        "id,nombre,precio_compra,categoria,stock,proveedor,precio_venta_publico,margen_absoluto,margen_porcentual\n"
    ));
    assert_eq!(contents.lines().count(), 101);
    assert_eq!(contents, std::fs::read_to_string(&second).expect("read csv"));
}
