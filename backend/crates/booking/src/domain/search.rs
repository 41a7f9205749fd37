//! Property Search
//!
//! Builds the listing query from optional filters. The builder is pure: it
//! returns SQL text and positional parameters, and the repository binds them
//! in order.
//!
//! Placeholders are numbered by the length of the parameter list right after
//! each push, so `$n` always refers to the value just added.

use kernel::id::UserId;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

const BASE_QUERY: &str = "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating\n\
     FROM properties\n\
     LEFT OUTER JOIN property_reviews ON properties.id = property_id\n\
     WHERE 1 = 1";

/// Requested page size, falling back to `default` when missing or not
/// positive and capped at `max`
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    match limit {
        Some(n) if n > 0 => n.min(max),
        _ => default,
    }
}

/// Dollars to cents, saturating on overflow
pub fn dollars_to_cents(dollars: i32) -> i32 {
    dollars.saturating_mul(100)
}

/// Filters of `GET /api/properties`
///
/// Prices are in dollars; the `cost_per_night` column holds cents. A zero
/// price or rating counts as unset, as does a blank city.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySearch {
    pub city: Option<String>,
    pub owner_id: Option<UserId>,
    pub minimum_price_per_night: Option<i32>,
    pub maximum_price_per_night: Option<i32>,
    pub minimum_rating: Option<f64>,
    pub limit: Option<i64>,
}

/// A value bound to one `$n` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SearchParam {
    Text(String),
    Int(i32),
    Float(f64),
    BigInt(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub sql: String,
    pub params: Vec<SearchParam>,
}

impl SearchQuery {
    fn new() -> Self {
        Self {
            sql: BASE_QUERY.to_string(),
            params: Vec::new(),
        }
    }

    /// Push `param` and append `clause` with `$n` filled in
    fn push(&mut self, clause: &str, param: SearchParam) {
        self.params.push(param);
        self.sql.push('\n');
        self.sql
            .push_str(&clause.replace("$n", &format!("${}", self.params.len())));
    }

    fn append(&mut self, clause: &str) {
        self.sql.push('\n');
        self.sql.push_str(clause);
    }
}

impl PropertySearch {
    /// City filter, `None` when blank
    pub fn city_filter(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }

    pub fn minimum_price(&self) -> Option<i32> {
        self.minimum_price_per_night.filter(|&dollars| dollars != 0)
    }

    pub fn maximum_price(&self) -> Option<i32> {
        self.maximum_price_per_night.filter(|&dollars| dollars != 0)
    }

    pub fn rating_filter(&self) -> Option<f64> {
        self.minimum_rating.filter(|&rating| rating != 0.0)
    }

    /// Row limit bound into the query
    ///
    /// Bound as given; callers clamp it against their configured bounds.
    pub fn page_size(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn to_query(&self) -> SearchQuery {
        let mut query = SearchQuery::new();

        if let Some(city) = self.city_filter() {
            query.push(
                "AND city LIKE $n",
                SearchParam::Text(format!("%{city}%")),
            );
        }

        if let Some(owner_id) = self.owner_id {
            query.push("AND owner_id = $n", SearchParam::Int(owner_id.get()));
        }

        if let Some(min) = self.minimum_price() {
            query.push(
                "AND cost_per_night >= $n",
                SearchParam::Int(dollars_to_cents(min)),
            );
        }

        if let Some(max) = self.maximum_price() {
            query.push(
                "AND cost_per_night <= $n",
                SearchParam::Int(dollars_to_cents(max)),
            );
        }

        query.append("GROUP BY properties.id");

        if let Some(rating) = self.rating_filter() {
            query.push("HAVING avg(rating) >= $n", SearchParam::Float(rating));
        }

        query.push(
            "ORDER BY cost_per_night LIMIT $n",
            SearchParam::BigInt(self.page_size()),
        );

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters() {
        let query = PropertySearch::default().to_query();

        assert!(query.sql.starts_with("SELECT properties.*"));
        assert!(query.sql.contains("LEFT OUTER JOIN property_reviews"));
        assert!(query.sql.contains("WHERE 1 = 1\nGROUP BY properties.id"));
        assert!(query.sql.ends_with("ORDER BY cost_per_night LIMIT $1"));
        assert!(!query.sql.contains("HAVING"));
        assert_eq!(query.params, vec![SearchParam::BigInt(DEFAULT_LIMIT)]);
    }

    #[test]
    fn test_all_filters_in_order() {
        let search = PropertySearch {
            city: Some("Vancouver".to_string()),
            owner_id: Some(UserId::new(7)),
            minimum_price_per_night: Some(50),
            maximum_price_per_night: Some(200),
            minimum_rating: Some(4.0),
            limit: Some(20),
        };
        let query = search.to_query();

        let expected = [
            "AND city LIKE $1",
            "AND owner_id = $2",
            "AND cost_per_night >= $3",
            "AND cost_per_night <= $4",
            "GROUP BY properties.id",
            "HAVING avg(rating) >= $5",
            "ORDER BY cost_per_night LIMIT $6",
        ];
        let mut last = 0;
        for clause in expected {
            let pos = query.sql.find(clause).unwrap_or_else(|| panic!("missing {clause}"));
            assert!(pos > last, "{clause} out of order");
            last = pos;
        }

        assert_eq!(
            query.params,
            vec![
                SearchParam::Text("%Vancouver%".to_string()),
                SearchParam::Int(7),
                SearchParam::Int(5000),
                SearchParam::Int(20000),
                SearchParam::Float(4.0),
                SearchParam::BigInt(20),
            ]
        );
    }

    #[test]
    fn test_placeholders_follow_parameter_count() {
        let search = PropertySearch {
            maximum_price_per_night: Some(100),
            minimum_rating: Some(3.5),
            ..Default::default()
        };
        let query = search.to_query();

        assert!(query.sql.contains("AND cost_per_night <= $1"));
        assert!(query.sql.contains("HAVING avg(rating) >= $2"));
        assert!(query.sql.ends_with("LIMIT $3"));
        assert_eq!(query.params.len(), 3);
    }

    #[test]
    fn test_rating_only_goes_after_group_by() {
        let search = PropertySearch {
            minimum_rating: Some(4.5),
            ..Default::default()
        };
        let sql = search.to_query().sql;

        let group_by = sql.find("GROUP BY").unwrap();
        let having = sql.find("HAVING avg(rating) >= $1").unwrap();
        assert!(having > group_by);
    }

    #[test]
    fn test_blank_city_is_ignored() {
        for city in ["", "   ", "\t"] {
            let search = PropertySearch {
                city: Some(city.to_string()),
                ..Default::default()
            };
            let query = search.to_query();
            assert!(!query.sql.contains("LIKE"));
            assert_eq!(query.params.len(), 1);
        }
    }

    #[test]
    fn test_city_is_trimmed() {
        let search = PropertySearch {
            city: Some("  Ottawa ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            search.to_query().params[0],
            SearchParam::Text("%Ottawa%".to_string())
        );
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, DEFAULT_LIMIT, MAX_LIMIT), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIMIT, MAX_LIMIT), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(-3), DEFAULT_LIMIT, MAX_LIMIT), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(4), DEFAULT_LIMIT, MAX_LIMIT), 4);
        assert_eq!(clamp_limit(Some(5000), DEFAULT_LIMIT, MAX_LIMIT), MAX_LIMIT);
    }

    #[test]
    fn test_limit_is_bound_as_given() {
        let with_limit = |limit| PropertySearch {
            limit,
            ..Default::default()
        };

        assert_eq!(
            with_limit(None).to_query().params,
            vec![SearchParam::BigInt(DEFAULT_LIMIT)]
        );
        assert_eq!(
            with_limit(Some(300)).to_query().params,
            vec![SearchParam::BigInt(300)]
        );
    }

    #[test]
    fn test_price_conversion_saturates() {
        assert_eq!(dollars_to_cents(120), 12000);
        assert_eq!(dollars_to_cents(0), 0);
        assert_eq!(dollars_to_cents(i32::MAX), i32::MAX);
    }

    #[test]
    fn test_zero_filters_add_no_clause() {
        let search = PropertySearch {
            minimum_price_per_night: Some(0),
            maximum_price_per_night: Some(0),
            minimum_rating: Some(0.0),
            ..Default::default()
        };
        let query = search.to_query();

        assert!(!query.sql.contains("cost_per_night >="));
        assert!(!query.sql.contains("cost_per_night <="));
        assert!(!query.sql.contains("HAVING"));
        assert!(query.sql.ends_with("ORDER BY cost_per_night LIMIT $1"));
        assert_eq!(query.params, vec![SearchParam::BigInt(DEFAULT_LIMIT)]);
    }
}
