//! Planning run
//!
//! raw table → candidates → admissible candidates → enriched → ranked.
//! Stages run strictly one after another; enrichment only starts once the
//! whole table has been filtered.

use tracing::info;

use crate::error::{PlannerError, Result};
use crate::module::popularity::{PlanetPageSource, enrich_candidates};
use crate::module::ranking::rank_by_priority;
use crate::module::transit::parser::parse_transit_table;
use crate::module::transit::{FilterThresholds, TransitCandidate, TransitTableSource, apply_filters};

pub struct TransitPlanner<T, P> {
    table_source: T,
    planet_source: P,
    thresholds: FilterThresholds,
    reference_year: i32,
}

impl<T, P> TransitPlanner<T, P>
where
    T: TransitTableSource,
    P: PlanetPageSource,
{
    pub fn new(
        table_source: T,
        planet_source: P,
        thresholds: FilterThresholds,
        reference_year: i32,
    ) -> Self {
        Self {
            table_source,
            planet_source,
            thresholds,
            reference_year,
        }
    }

    /// Admissible candidates in table order, before enrichment.
    pub async fn admissible_candidates(&self) -> Result<Vec<TransitCandidate>> {
        let html = self
            .table_source
            .fetch_transit_page()
            .await
            .map_err(|e| PlannerError::TransitTableUnavailable {
                message: format!("{:#}", e),
            })?;

        let candidates = parse_transit_table(&html, self.reference_year)?;
        Ok(apply_filters(candidates, &self.thresholds))
    }

    /// The full run: admissible candidates, enriched and ranked.
    pub async fn run(&self) -> Result<Vec<TransitCandidate>> {
        let admissible = self.admissible_candidates().await?;
        let enriched = enrich_candidates(admissible, &self.planet_source).await?;
        let ranked = rank_by_priority(enriched);

        info!("{} transits ranked for observation", ranked.len());
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::popularity::Designation;
    use crate::module::renderer::{OutputFormat, TransitRenderer};
    use async_trait::async_trait;
    use chrono::{FixedOffset, NaiveTime};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FixedTable(String);

    #[async_trait]
    impl TransitTableSource for FixedTable {
        async fn fetch_transit_page(&self) -> anyhow::Result<String> {
            Ok(self.0.clone())
        }
    }

    struct UnreachableTable;

    #[async_trait]
    impl TransitTableSource for UnreachableTable {
        async fn fetch_transit_page(&self) -> anyhow::Result<String> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    #[derive(Default)]
    struct FixedPlanetPages {
        counts: HashMap<String, u32>,
        requested: Mutex<Vec<String>>,
    }

    impl FixedPlanetPages {
        fn with(counts: &[(&str, u32)]) -> Self {
            Self {
                counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PlanetPageSource for FixedPlanetPages {
        async fn fetch_planet_page(&self, designation: &Designation) -> anyhow::Result<String> {
            self.requested.lock().unwrap().push(designation.star.clone());
            let count = self
                .counts
                .get(&designation.star)
                .ok_or_else(|| anyhow::anyhow!("HTTP 404"))?;
            Ok(format!(
                r#"<html><body><form action="etd.php" method="post"><table>
                <tr><td>Star</td><td>Planet</td><td>Period</td><td>Samples</td></tr>
                <tr><td>{}</td><td>{}</td><td>3.5</td><td>{}</td></tr>
                </table></form></body></html>"#,
                designation.star, designation.planet, count
            ))
        }
    }

    fn thresholds() -> FilterThresholds {
        FilterThresholds {
            min_magnitude_depth: 0.01,
            elevation_threshold_degrees: 20,
            min_start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            max_end_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
        }
    }

    fn row(object: &str, begin: &str, center: &str, end: &str, depth: &str) -> String {
        format!(
            r#"<tr valign="top"><td><a href="planet.php?id=1">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>2.3</td><td>12.1</td><td>{}</td></tr>"#,
            object, begin, center, end, depth
        )
    }

    fn table(rows: &[String]) -> String {
        format!(
            r#"<html><body><div class="center"><table>
            <tr valign="top"><th>Object</th><th>Begin</th><th>Center</th><th>End</th></tr>
            {}
            </table></div></body></html>"#,
            rows.concat()
        )
    }

    /// One too shallow, one crossing the meridian, one admissible.
    fn three_row_table() -> String {
        table(&[
            row("TrES-3 b", "19:1040°,E", "19.06. 19:5545°,SE", "20:4050°,S", "0.004"),
            row("WASP-2 b", "19:3030°,SE", "19.06. 20:1555°,S", "21:0035°,SW", "0.025"),
            row("HAT-P-23 b", "20:0525°,E", "19.06. 20:5534°,SE", "21:4542°,SE", "0.018"),
        ])
    }

    #[tokio::test]
    async fn test_end_to_end_single_admissible_row() {
        let planets = FixedPlanetPages::with(&[("HAT-P-23", 31)]);
        let planner = TransitPlanner::new(FixedTable(three_row_table()), planets, thresholds(), 2023);

        let ranked = planner.run().await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].object, "HAT-P-23 b");
        assert_eq!(ranked[0].magnitude_depth, 0.018);
        assert_eq!(ranked[0].sample_count, Some(31));
        assert_eq!(ranked[0].elevations(), [25, 34, 42]);

        // Rejected candidates are never looked up.
        assert_eq!(
            *planner.planet_source.requested.lock().unwrap(),
            vec!["HAT-P-23".to_string()]
        );

        let mut out = Vec::new();
        TransitRenderer::new(FixedOffset::east_opt(7200).unwrap())
            .render(OutputFormat::Csv, &ranked, &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "HAT-P-23 b;0.018;31;2023-06-19 22:05;25;2023-06-19 22:55;34;2023-06-19 23:45;42"
        );
    }

    #[tokio::test]
    async fn test_ranking_puts_least_observed_first() {
        let html = table(&[
            row("HAT-P-23 b", "20:0525°,E", "19.06. 20:5534°,SE", "21:4542°,SE", "0.018"),
            row("WASP-10 b", "19:0530°,E", "20.06. 19:5535°,SE", "20:4540°,SE", "0.030"),
            row("Qatar-1 b", "18:3025°,E", "21.06. 19:0528°,SE", "19:4032°,SE", "0.021"),
        ]);
        let planets =
            FixedPlanetPages::with(&[("HAT-P-23", 31), ("WASP-10", 4), ("Qatar-1", 31)]);
        let planner = TransitPlanner::new(FixedTable(html), planets, thresholds(), 2023);

        let ranked = planner.run().await.unwrap();
        let names: Vec<&str> = ranked.iter().map(|c| c.object.as_str()).collect();
        assert_eq!(names, vec!["WASP-10 b", "HAT-P-23 b", "Qatar-1 b"]);
    }

    #[tokio::test]
    async fn test_unreachable_table_aborts_run() {
        let planner =
            TransitPlanner::new(UnreachableTable, FixedPlanetPages::default(), thresholds(), 2023);
        let err = planner.run().await.unwrap_err();
        assert!(matches!(err, PlannerError::TransitTableUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_enrichment_failure_aborts_run() {
        let planner = TransitPlanner::new(
            FixedTable(three_row_table()),
            FixedPlanetPages::default(),
            thresholds(),
            2023,
        );
        let err = planner.run().await.unwrap_err();
        assert!(matches!(err, PlannerError::EnrichmentUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_format_change_aborts_before_enrichment() {
        let html = table(&[
            row("HAT-P-23 b", "20:0525°,E", "19.06. 20:5534°,SE", "21:4542°,SE", "0.018"),
            row("WASP-10 b", "19h05", "20.06. 19:5535°,SE", "20:4540°,SE", "0.030"),
        ]);
        let planets = FixedPlanetPages::with(&[("HAT-P-23", 31), ("WASP-10", 4)]);
        let planner = TransitPlanner::new(FixedTable(html), planets, thresholds(), 2023);

        let err = planner.run().await.unwrap_err();
        assert!(matches!(err, PlannerError::UnparsableTimeText { .. }));
        assert!(planner.planet_source.requested.lock().unwrap().is_empty());
    }
}
