use bazaar_types::api::ReviewSummary;
use bazaar_types::models::Review;

/// Read-only statistics over a listing's reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewCalculationService;

impl ReviewCalculationService {
    /// Arithmetic mean of the ratings; 0 when there are none.
    pub fn average_rating(&self, reviews: &[Review]) -> f64 {
        if reviews.is_empty() {
            return 0.0;
        }
        let total: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
        total / reviews.len() as f64
    }

    pub fn count(&self, reviews: &[Review]) -> usize {
        reviews.len()
    }

    pub fn is_empty(&self, reviews: &[Review]) -> bool {
        reviews.is_empty()
    }

    pub fn summarize(&self, reviews: &[Review]) -> ReviewSummary {
        ReviewSummary {
            count: self.count(reviews),
            average_rating: self.average_rating(reviews),
        }
    }
}
