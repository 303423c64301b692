//! Rating aggregation — the canonical `(rating, totalReviews)` pair for an
//! app, recomputed from its full review set on every write.
//!
//! Recomputing from scratch is O(n) per submission but keeps the aggregate
//! exactly consistent with stored reviews. Review volume per app is small.

use crate::model::Review;

/// Aggregate computed from a review set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Mean star rating, rounded half-up to one decimal, e.g. "4.3".
    pub rating: String,
    pub total_reviews: i64,
}

/// Compute the aggregate for a review set.
///
/// Returns `None` for an empty set: an app with no reviews keeps its seeded
/// default rating, so the caller must not write anything back.
pub fn aggregate(reviews: &[Review]) -> Option<Aggregate> {
    if reviews.is_empty() {
        return None;
    }
    let sum: i64 = reviews.iter().map(|r| r.rating).sum();
    let mean = sum as f64 / reviews.len() as f64;
    // Half-up to one decimal. f64::round is half-away-from-zero, which for
    // non-negative means is exactly half-up (format! would round half-even).
    let tenths = (mean * 10.0).round();
    Some(Aggregate {
        rating: format!("{:.1}", tenths / 10.0),
        total_reviews: reviews.len() as i64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn review(rating: i64) -> Review {
        Review {
            id: String::new(),
            app_id: String::new(),
            user_name: "u".to_string(),
            user_avatar: String::new(),
            rating,
            content: "c".to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn empty_set_yields_none() {
        assert_eq!(aggregate(&[]), None);
    }

    #[test]
    fn single_review_is_its_own_mean() {
        let agg = aggregate(&[review(5)]).unwrap();
        assert_eq!(agg.rating, "5.0");
        assert_eq!(agg.total_reviews, 1);
    }

    #[test]
    fn mean_of_five_and_three_is_four() {
        let agg = aggregate(&[review(5), review(3)]).unwrap();
        assert_eq!(agg.rating, "4.0");
        assert_eq!(agg.total_reviews, 2);
    }

    #[test]
    fn thirds_round_to_one_decimal() {
        // (3 + 4 + 4) / 3 = 3.666… → 3.7
        let agg = aggregate(&[review(3), review(4), review(4)]).unwrap();
        assert_eq!(agg.rating, "3.7");
    }

    #[test]
    fn exact_midpoint_rounds_up() {
        // (4 + 4 + 4 + 5) / 4 = 4.25 → 4.3 half-up (4.2 under half-even)
        let agg = aggregate(&[review(4), review(4), review(4), review(5)]).unwrap();
        assert_eq!(agg.rating, "4.3");
    }

    #[test]
    fn exact_tenth_is_unchanged() {
        let agg = aggregate(&[review(4), review(5)]).unwrap();
        assert_eq!(agg.rating, "4.5");
    }

    proptest! {
        #[test]
        fn rating_stays_in_star_range(ratings in prop::collection::vec(1i64..=5, 1..64)) {
            let reviews: Vec<Review> = ratings.iter().map(|&r| review(r)).collect();
            let agg = aggregate(&reviews).unwrap();
            let value: f64 = agg.rating.parse().unwrap();
            prop_assert!((1.0..=5.0).contains(&value));
            prop_assert_eq!(agg.total_reviews, reviews.len() as i64);
        }

        #[test]
        fn rating_has_one_fractional_digit(ratings in prop::collection::vec(1i64..=5, 1..64)) {
            let reviews: Vec<Review> = ratings.iter().map(|&r| review(r)).collect();
            let agg = aggregate(&reviews).unwrap();
            let (_, frac) = agg.rating.split_once('.').unwrap();
            prop_assert_eq!(frac.len(), 1);
        }
    }
}
