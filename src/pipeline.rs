use crate::types::{ExhibitionRecord, ExhibitionSource, Museum};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

/// What one adapter contributed to a run
#[derive(Debug, Serialize)]
pub struct SourceOutcome {
    pub museum: Museum,
    pub records: usize,
    pub error: Option<String>,
}

/// Result of a complete run across all requested sources
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub outcomes: Vec<SourceOutcome>,
    #[serde(skip)]
    pub records: Vec<ExhibitionRecord>,
}

impl RunSummary {
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    pub fn unresolved_dates(&self) -> usize {
        self.records.iter().filter(|r| !r.dates.is_resolved()).count()
    }

    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }
}

pub struct Pipeline;

impl Pipeline {
    /// Run every source one after another. A failing source is logged and
    /// recorded; the others still run.
    pub async fn run(sources: Vec<Box<dyn ExhibitionSource>>) -> RunSummary {
        let mut summary = RunSummary::default();

        for source in sources {
            let museum = source.museum();
            let span = info_span!("source", museum = %museum);
            println!("📡 Fetching {} ...", museum.display_name());

            let started = Instant::now();
            let result = source.fetch_exhibitions().instrument(span).await;

            match result {
                Ok(records) => {
                    info!(
                        museum = %museum,
                        "Fetched {} exhibitions in {:.1}s",
                        records.len(),
                        started.elapsed().as_secs_f64()
                    );
                    summary.outcomes.push(SourceOutcome {
                        museum,
                        records: records.len(),
                        error: None,
                    });
                    summary.records.extend(records);
                    println!("   running total: {}", summary.records.len());
                }
                Err(e) => {
                    error!(museum = %museum, "Source failed: {}", e);
                    println!("⚠️  {} failed: {}", museum.display_name(), e);
                    summary.outcomes.push(SourceOutcome {
                        museum,
                        records: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        info!(
            "Run finished: {} exhibitions from {} sources ({} failed, {} with unresolved dates)",
            summary.total_records(),
            summary.outcomes.len(),
            summary.failed_sources().count(),
            summary.unresolved_dates()
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ScraperError};
    use crate::normalize::{DateNormalizer, FubonDates};
    use crate::types::RawListing;

    struct StubSource {
        museum: Museum,
        dates: Vec<&'static str>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl ExhibitionSource for StubSource {
        fn museum(&self) -> Museum {
            self.museum
        }

        async fn fetch_exhibitions(&self) -> Result<Vec<ExhibitionRecord>> {
            if self.fail {
                return Err(ScraperError::Api {
                    message: "boom".to_string(),
                });
            }
            Ok(self
                .dates
                .iter()
                .map(|raw| {
                    let listing = RawListing {
                        date_text: raw.to_string(),
                        ..Default::default()
                    };
                    ExhibitionRecord::from_listing(self.museum, listing, FubonDates.normalize(raw))
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_failed_source_does_not_stop_run() {
        let sources: Vec<Box<dyn ExhibitionSource>> = vec![
            Box::new(StubSource {
                museum: Museum::Fubon,
                dates: vec!["2025.10.23 - 2026.4.20", "TBD"],
                fail: false,
            }),
            Box::new(StubSource {
                museum: Museum::Tfam,
                dates: vec![],
                fail: true,
            }),
            Box::new(StubSource {
                museum: Museum::Moca,
                dates: vec!["2025.12.24"],
                fail: false,
            }),
        ];

        let summary = Pipeline::run(sources).await;
        assert_eq!(summary.total_records(), 3);
        assert_eq!(summary.unresolved_dates(), 1);
        assert_eq!(summary.outcomes.len(), 3);

        let failed: Vec<_> = summary.failed_sources().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].museum, Museum::Tfam);
        assert!(failed[0].error.as_deref().unwrap().contains("boom"));

        // Source order is preserved
        assert_eq!(summary.records[2].museum, Museum::Moca.display_name());
    }
}
