use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use catalog_core::columns;

use crate::errors::GenerationError;
use crate::model::{
    GenerateOptions, PURCHASE_PRICE_MAX, PURCHASE_PRICE_MIN, STOCK_MAX_EXCLUSIVE, STOCK_MIN,
    SYNTHETIC_BATCH_SIZE, SYNTHETIC_ID_START, SYNTHETIC_MARGIN, SyntheticBatch, SyntheticRecord,
    Vocabulary,
};

/// Generate the synthetic batch for `options.seed`.
///
/// Draws are taken column by column from a single stream: every purchase
/// price first, then categories, stock and suppliers. Changing that order
/// changes the output for a given seed.
pub fn generate_batch(
    vocabulary: &Vocabulary,
    options: &GenerateOptions,
) -> Result<SyntheticBatch, GenerationError> {
    if vocabulary.categories.is_empty() {
        return Err(GenerationError::EmptyVocabulary {
            column: columns::CATEGORIA.to_string(),
        });
    }
    if vocabulary.suppliers.is_empty() {
        return Err(GenerationError::EmptyVocabulary {
            column: columns::PROVEEDOR.to_string(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let size = SYNTHETIC_BATCH_SIZE;

    let prices: Vec<f64> = (0..size)
        .map(|_| round2(rng.random_range(PURCHASE_PRICE_MIN..PURCHASE_PRICE_MAX)))
        .collect();
    let categories: Vec<&str> = (0..size)
        .map(|_| pick(&mut rng, &vocabulary.categories))
        .collect();
    let stock: Vec<i64> = (0..size)
        .map(|_| rng.random_range(STOCK_MIN..STOCK_MAX_EXCLUSIVE))
        .collect();
    let suppliers: Vec<&str> = (0..size)
        .map(|_| pick(&mut rng, &vocabulary.suppliers))
        .collect();

    let records = (0..size)
        .map(|idx| {
            let id = SYNTHETIC_ID_START + idx as i64;
            let precio_compra = prices[idx];
            let precio_venta_publico = round2(precio_compra * (1.0 + SYNTHETIC_MARGIN));
            let margen_absoluto = precio_venta_publico - precio_compra;
            SyntheticRecord {
                id,
                nombre: format!("Product_{id}"),
                precio_compra,
                categoria: categories[idx].to_string(),
                stock: stock[idx],
                proveedor: suppliers[idx].to_string(),
                precio_venta_publico,
                margen_absoluto,
                margen_porcentual: margen_absoluto / precio_compra,
            }
        })
        .collect::<Vec<_>>();

    info!(
        event = "batch_generated",
        seed = options.seed,
        rows = records.len(),
        categories = vocabulary.categories.len(),
        suppliers = vocabulary.suppliers.len(),
    );

    Ok(SyntheticBatch {
        seed: options.seed,
        records,
    })
}

fn pick<'a>(rng: &mut ChaCha8Rng, values: &'a [String]) -> &'a str {
    values[rng.random_range(0..values.len())].as_str()
}

/// Round half to even at two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
