use challengize_config::Stage;
use prometheus::{
    core::Collector as _,
    Encoder,
    Gauge,
    GaugeVec,
    Opts,
    Registry,
    TextEncoder,
};

const USER_LABELS: [&str; 3] = ["user", "team", "stage"];
const TEAM_LABELS: [&str; 2] = ["team", "stage"];

/// Current scores, ready to be scraped.
///
/// Cloning is cheap and every clone shares the same samples, so one handle goes to the scheduler
/// and one to the HTTP endpoint. The gauges synchronize internally; a reader sees either the old or
/// the new value of a sample.
///
/// Samples are only ever overwritten. A user that vanishes from the dashboard keeps its last value
/// until the process restarts.
#[derive(Clone)]
pub struct ScoreRegistry {
    registry: Registry,
    user_points: GaugeVec,
    team_points: GaugeVec,
    last_refresh: Gauge,
}

impl ScoreRegistry {
    /// Creates the registry. `namespace` prefixes all metric names, e.g. `challengize_user_points`.
    ///
    /// Fails if the namespace does not yield valid metric names.
    pub fn new(namespace: Option<&str>) -> Result<Self, prometheus::Error> {
        let opts = |name: &str, help: &str| {
            let opts = Opts::new(name, help);
            match namespace {
                Some(namespace) => opts.namespace(namespace),
                None => opts,
            }
        };
        let registry = Registry::new();

        let user_points = GaugeVec::new(opts("user_points", "Number of points"), &USER_LABELS)?;
        registry.register(Box::new(user_points.clone()))?;

        let team_points = GaugeVec::new(opts("team_points", "Number of points of a team"), &TEAM_LABELS)?;
        registry.register(Box::new(team_points.clone()))?;

        let last_refresh = Gauge::with_opts(opts("last_refresh", "Timestamp of last successful refresh"))?;
        registry.register(Box::new(last_refresh.clone()))?;

        Ok(Self {
            registry,
            user_points,
            team_points,
            last_refresh,
        })
    }

    pub fn set_user_points(&self, user: &str, team: &str, stage: Stage, points: i64) {
        self.user_points
            .with_label_values(&[user, team, &stage.to_string()])
            .set(points as f64);
    }

    pub fn set_team_points(&self, team: &str, stage: Stage, points: i64) {
        self.team_points
            .with_label_values(&[team, &stage.to_string()])
            .set(points as f64);
    }

    /// Records a successful refresh at `timestamp` (Unix seconds). Older timestamps are ignored.
    pub fn set_last_refresh(&self, timestamp: i64) {
        let timestamp = timestamp as f64;
        if timestamp > self.last_refresh.get() {
            self.last_refresh.set(timestamp);
        }
    }

    pub fn user_points(&self, user: &str, team: &str, stage: Stage) -> Option<f64> {
        let stage = stage.to_string();
        sample_value(&self.user_points, &[("user", user), ("team", team), ("stage", &stage)])
    }

    pub fn team_points(&self, team: &str, stage: Stage) -> Option<f64> {
        let stage = stage.to_string();
        sample_value(&self.team_points, &[("team", team), ("stage", &stage)])
    }

    /// Unix seconds of the last fully successful cycle, `0` before the first one.
    pub fn last_refresh(&self) -> i64 {
        self.last_refresh.get() as i64
    }

    pub fn user_sample_count(&self) -> usize {
        sample_count(&self.user_points)
    }

    pub fn team_sample_count(&self) -> usize {
        sample_count(&self.team_points)
    }

    /// All samples in the Prometheus text exposition format.
    pub fn snapshot(&self) -> String {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&families, &mut buffer) {
            error!(error = %e, "Prometheus text encoder failed");
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

fn sample_value(gauges: &GaugeVec, labels: &[(&str, &str)]) -> Option<f64> {
    gauges
        .collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .find(|metric| {
            let pairs = metric.get_label();
            pairs.len() == labels.len()
                && labels.iter().all(|(name, value)| {
                    pairs
                        .iter()
                        .any(|pair| pair.get_name() == *name && pair.get_value() == *value)
                })
        })
        .map(|metric| metric.get_gauge().get_value())
}

fn sample_count(gauges: &GaugeVec) -> usize {
    gauges
        .collect()
        .iter()
        .map(|family| family.get_metric().len())
        .sum()
}
