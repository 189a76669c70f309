//! Listing filter for the paginated product query.
//!
//! Filters are a closed set of tagged variants mapped to parameterized SQL
//! fragments. Limit and offset always occupy `$1`/`$2`; a value-carrying
//! filter contributes its value as `$3`.

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFilter {
    /// No predicate; every product is in scope.
    All,
    /// Products belonging to one category.
    Category(Uuid),
    /// Products belonging to one sub-category.
    SubCategory(Uuid),
    /// Products of one brand.
    Brand(Uuid),
    /// Products flagged as featured. Needs no extra parameter.
    Featured,
}

impl ProductFilter {
    /// SQL predicate fragment for the WHERE clause, or `None` for `All`.
    pub fn predicate(&self) -> Option<&'static str> {
        match self {
            ProductFilter::All => None,
            ProductFilter::Category(_) => Some("category_id = $3"),
            ProductFilter::SubCategory(_) => Some("sub_category_id = $3"),
            ProductFilter::Brand(_) => Some("brand_id = $3"),
            ProductFilter::Featured => Some("featured = true"),
        }
    }

    /// The value bound as `$3`, if this filter carries one.
    pub fn bind_value(&self) -> Option<Uuid> {
        match self {
            ProductFilter::Category(id)
            | ProductFilter::SubCategory(id)
            | ProductFilter::Brand(id) => Some(*id),
            ProductFilter::All | ProductFilter::Featured => None,
        }
    }

    /// Total number of bind parameters of the listing statement built with
    /// this filter: limit and offset, plus the filter value when present.
    pub fn bind_count(&self) -> usize {
        2 + usize::from(self.bind_value().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_filters_bind_three_parameters() {
        let id = Uuid::new_v4();
        for filter in [
            ProductFilter::Category(id),
            ProductFilter::SubCategory(id),
            ProductFilter::Brand(id),
        ] {
            assert_eq!(filter.bind_count(), 3);
            assert_eq!(filter.bind_value(), Some(id));
            assert!(filter.predicate().unwrap().ends_with("= $3"));
        }
    }

    #[test]
    fn all_and_featured_bind_two_parameters() {
        assert_eq!(ProductFilter::All.bind_count(), 2);
        assert_eq!(ProductFilter::All.predicate(), None);
        assert_eq!(ProductFilter::Featured.bind_count(), 2);
        assert_eq!(ProductFilter::Featured.predicate(), Some("featured = true"));
    }
}
