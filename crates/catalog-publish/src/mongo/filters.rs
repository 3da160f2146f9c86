use mongodb::bson::{Document, doc};

use crate::filter::KeyFilter;

pub(crate) fn to_document(filter: &KeyFilter) -> Document {
    match *filter {
        KeyFilter::All => doc! {},
        KeyFilter::Eq(id) => doc! { "_id": id },
        KeyFilter::Range { min, max } => doc! { "_id": { "$gte": min, "$lte": max } },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_filter_uses_inclusive_operators() {
        let filter = to_document(&KeyFilter::Range { min: 500, max: 599 });
        assert_eq!(filter, doc! { "_id": { "$gte": 500_i64, "$lte": 599_i64 } });
    }

    #[test]
    fn all_filter_is_empty() {
        assert!(to_document(&KeyFilter::All).is_empty());
    }
}
