use crate::datasources::ClimateProvider;
use crate::logic::rules::RulesEngine;
use crate::models::{PlantProfile, SamplePoint, ScanReport, ScanSample, ScoringOptions};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// `grid_size × grid_size` points spread evenly over `±span` degrees around
/// a center. Latitudes clamp at the poles, longitudes wrap at the antimeridian.
pub fn local_grid(lat: f64, lon: f64, grid_size: usize, span: f64) -> Vec<SamplePoint> {
    let offsets: Vec<f64> = match grid_size {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n)
            .map(|i| -span + 2.0 * span * i as f64 / (n - 1) as f64)
            .collect(),
    };

    let mut points = Vec::with_capacity(offsets.len() * offsets.len());
    for dlat in &offsets {
        for dlon in &offsets {
            let plat = (lat + dlat).clamp(-90.0, 90.0);
            let plon = wrap_longitude(lon + dlon);
            points.push(SamplePoint::new(
                format!("{:.2},{:.2}", plat, plon),
                plat,
                plon,
            ));
        }
    }
    dedup_points(points)
}

fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Drop repeated location ids, keeping the first occurrence.
pub fn dedup_points(points: Vec<SamplePoint>) -> Vec<SamplePoint> {
    let mut seen = HashSet::new();
    points
        .into_iter()
        .filter(|p| seen.insert(p.location_id.clone()))
        .collect()
}

/// Scores one plant at many points with bounded concurrency.
pub struct Scanner<C> {
    climate: Arc<C>,
    engine: Arc<RulesEngine>,
    max_concurrency: usize,
}

impl<C> Scanner<C>
where
    C: ClimateProvider + 'static,
{
    pub fn new(climate: Arc<C>, engine: Arc<RulesEngine>, max_concurrency: usize) -> Self {
        Self {
            climate,
            engine,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Score `plant` at every point with the default rainfed/survival policy.
    ///
    /// Points without climate data are skipped, not scored. Samples come back
    /// in input order.
    pub async fn scan(&self, plant: &PlantProfile, points: Vec<SamplePoint>) -> ScanReport {
        let points = dedup_points(points);
        let total = points.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let plant = Arc::new(plant.clone());
        let mut tasks = JoinSet::new();

        for (index, point) in points.into_iter().enumerate() {
            let climate = Arc::clone(&self.climate);
            let engine = Arc::clone(&self.engine);
            let plant = Arc::clone(&plant);
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                let reading = climate.fetch_climate(point.lat, point.lon).await;
                let Some(reading) = reading else {
                    tracing::debug!(location = %point.location_id, "No climate data, skipping");
                    return None;
                };

                let result = engine.score(&plant, &reading, ScoringOptions::default());
                tracing::debug!(
                    location = %point.location_id,
                    score = result.score,
                    "Scored sample"
                );

                Some((
                    index,
                    ScanSample {
                        location_id: point.location_id,
                        lat: point.lat,
                        lon: point.lon,
                        score: result.score,
                        status: result.status,
                    },
                ))
            });
        }

        let mut scored = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(entry)) => scored.push(entry),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Scan task failed"),
            }
        }

        scored.sort_by_key(|(index, _)| *index);
        let samples: Vec<ScanSample> = scored.into_iter().map(|(_, s)| s).collect();
        let skipped = total - samples.len();

        tracing::info!(
            plant = %plant.name,
            points = total,
            scored = samples.len(),
            skipped,
            "Scan complete"
        );

        ScanReport::new(samples, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::memory::MemoryClimate;
    use crate::logic::locations;
    use crate::logic::rules::fixtures;

    fn scanner(climate: MemoryClimate) -> Scanner<MemoryClimate> {
        Scanner::new(Arc::new(climate), Arc::new(RulesEngine::default()), 4)
    }

    #[test]
    fn default_grid_has_25_points() {
        let grid = local_grid(47.0, 8.0, 5, 1.0);
        assert_eq!(grid.len(), 25);
        assert_eq!(grid[0].lat, 46.0);
        assert_eq!(grid[0].lon, 7.0);
        assert_eq!(grid[24].lat, 48.0);
        assert_eq!(grid[24].lon, 9.0);
        assert_eq!(grid[12].location_id, "47.00,8.00");
    }

    #[test]
    fn single_cell_grid_is_the_center() {
        let grid = local_grid(10.0, 20.0, 1, 1.0);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].lat, 10.0);
        assert_eq!(grid[0].lon, 20.0);
    }

    #[test]
    fn grid_clamps_and_wraps() {
        let grid = local_grid(89.5, 179.5, 5, 2.0);
        for p in &grid {
            assert!((-90.0..=90.0).contains(&p.lat));
            assert!((-180.0..=180.0).contains(&p.lon));
        }
        assert!(grid.iter().any(|p| p.lon < -179.0));
        // Both rows past the pole collapse onto 90°, the second is dropped
        assert_eq!(grid.len(), 20);
    }

    #[test]
    fn wraps_longitude() {
        assert_eq!(wrap_longitude(181.0), -179.0);
        assert_eq!(wrap_longitude(-181.0), 179.0);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(540.0), 180.0);
    }

    #[tokio::test]
    async fn all_ocean_scan_is_empty() {
        let report = scanner(MemoryClimate::ocean())
            .scan(&fixtures::plant(), local_grid(0.0, -30.0, 5, 1.0))
            .await;
        assert!(report.is_empty());
        assert_eq!(report.skipped, 25);
    }

    #[tokio::test]
    async fn ocean_points_are_skipped_not_zeroed() {
        let points: Vec<SamplePoint> = locations::world_points().into_iter().take(10).collect();
        let mut climate = MemoryClimate::ocean();
        for p in points.iter().skip(1) {
            climate = climate.with(p.lat, p.lon, fixtures::climate());
        }

        let report = scanner(climate).scan(&fixtures::plant(), points.clone()).await;

        assert_eq!(report.samples.len(), 9);
        assert_eq!(report.skipped, 1);
        assert!(report.is_partial());
        assert!(report.samples.iter().all(|s| s.location_id != points[0].location_id));
        let ids: Vec<&str> = report.samples.iter().map(|s| s.location_id.as_str()).collect();
        let expected: Vec<&str> = points[1..].iter().map(|p| p.location_id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn duplicate_points_are_sampled_once() {
        let points = vec![
            SamplePoint::new("A", 1.0, 1.0),
            SamplePoint::new("A", 1.0, 1.0),
            SamplePoint::new("B", 2.0, 2.0),
        ];
        let report = scanner(MemoryClimate::everywhere(fixtures::climate()))
            .scan(&fixtures::plant(), points)
            .await;
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.skipped, 0);
        assert!(report.samples.iter().all(|s| s.score == 100));
    }
}
