//! Popularity enrichment
//!
//! Attaches the number of prior observation datasets to every surviving
//! candidate, one request at a time. Any failure aborts the run: a missing
//! count would silently change the ranking.

use tracing::{debug, info};

use super::client::PlanetPageSource;
use super::designation::Designation;
use super::parser::parse_sample_count;
use crate::error::{PlannerError, Result};
use crate::module::transit::TransitCandidate;

/// Look up the sample count of a single object.
pub async fn fetch_sample_count<S>(source: &S, object: &str) -> Result<u32>
where
    S: PlanetPageSource + ?Sized,
{
    let designation = Designation::parse(object)?;

    let html = source
        .fetch_planet_page(&designation)
        .await
        .map_err(|e| PlannerError::enrichment(object, format!("{:#}", e)))?;

    let count = parse_sample_count(&html)
        .map_err(|e| PlannerError::enrichment(object, format!("{:#}", e)))?;

    debug!("{}: {} samples", object, count);
    Ok(count)
}

/// Enrich all candidates sequentially, keeping their order.
pub async fn enrich_candidates<S>(
    candidates: Vec<TransitCandidate>,
    source: &S,
) -> Result<Vec<TransitCandidate>>
where
    S: PlanetPageSource + ?Sized,
{
    let mut enriched = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let count = fetch_sample_count(source, &candidate.object).await?;
        enriched.push(candidate.with_sample_count(count));
    }

    info!("Enriched {} candidates with sample counts", enriched.len());
    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::transit::Moment;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FixedPages {
        counts: HashMap<String, &'static str>,
        requested: Mutex<Vec<String>>,
    }

    impl FixedPages {
        fn new(counts: &[(&str, &'static str)]) -> Self {
            Self {
                counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PlanetPageSource for FixedPages {
        async fn fetch_planet_page(&self, designation: &Designation) -> anyhow::Result<String> {
            self.requested
                .lock()
                .unwrap()
                .push(format!("{}/{}", designation.star, designation.planet));
            let count = self
                .counts
                .get(&designation.star)
                .ok_or_else(|| anyhow::anyhow!("connection refused"))?;
            Ok(format!(
                r#"<form action="etd.php"><table>
                <tr><td>Star</td><td>Planet</td><td>Period</td><td>Samples</td></tr>
                <tr><td>{}</td><td>{}</td><td>1.0</td><td>{}</td></tr>
                </table></form>"#,
                designation.star, designation.planet, count
            ))
        }
    }

    fn candidate(object: &str) -> TransitCandidate {
        let at = |h| Moment::new(Utc.with_ymd_and_hms(2023, 6, 19, h, 0, 0).unwrap(), 40);
        TransitCandidate::new(object, 0.02, at(19), at(20), at(21)).unwrap()
    }

    #[tokio::test]
    async fn test_enrich_sets_counts_in_order() {
        let source = FixedPages::new(&[("WASP-10", "42"), ("TrES-1", "3")]);
        let enriched = enrich_candidates(vec![candidate("WASP-10 b"), candidate("TrES-1 b")], &source)
            .await
            .unwrap();

        assert_eq!(enriched[0].sample_count, Some(42));
        assert_eq!(enriched[1].sample_count, Some(3));
        assert_eq!(
            *source.requested.lock().unwrap(),
            vec!["WASP-10/b".to_string(), "TrES-1/b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_network_failure_aborts_enrichment() {
        let source = FixedPages::new(&[("WASP-10", "42")]);
        let err = enrich_candidates(vec![candidate("TrES-1 b"), candidate("WASP-10 b")], &source)
            .await
            .unwrap_err();

        match err {
            PlannerError::EnrichmentUnavailable { object, message } => {
                assert_eq!(object, "TrES-1 b");
                assert!(message.contains("connection refused"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // Nothing after the failing candidate is requested.
        assert_eq!(source.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unexpected_page_shape_aborts_enrichment() {
        let source = FixedPages::new(&[("WASP-10", "unknown")]);
        let err = fetch_sample_count(&source, "WASP-10 b").await.unwrap_err();
        assert!(matches!(err, PlannerError::EnrichmentUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_multi_letter_designator_never_reaches_the_service() {
        let source = FixedPages::new(&[]);
        let err = fetch_sample_count(&source, "Kepler-1658 bc").await.unwrap_err();
        assert!(matches!(err, PlannerError::InvalidDesignation { .. }));
        assert!(source.requested.lock().unwrap().is_empty());
    }
}
