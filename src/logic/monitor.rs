//! Monitor Loop
//!
//! Owns the full polling cycle: fetch readings, drop noise, sanitize,
//! classify, assess, and report on the adaptive cadence. One cycle is
//! straight-line code; all state lives in this struct, nothing is
//! shared or global.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::features::FeatureVector;
use super::model::EmergencyClassifier;
use super::noise::RateOfChangeFilter;
use super::reading::SensorReading;
use super::risk::{self, RiskLevel};
use super::store::SensorSource;
use super::telemetry::{ReportSchedule, TelemetryReport, TelemetrySink, TelemetryState};
use crate::config::AgentConfig;

// ============================================================================
// SETTINGS & STATS
// ============================================================================

/// Loop parameters, usually derived from `AgentConfig`
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub home_id: i64,
    pub device_id: i64,
    pub poll_interval: Duration,
    pub schedule: ReportSchedule,
    pub reporting_enabled: bool,
}

impl MonitorSettings {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            home_id: config.home_id,
            device_id: config.device_id,
            poll_interval: config.poll_interval,
            schedule: ReportSchedule {
                normal_interval: config.normal_interval,
                risk_interval: config.risk_interval,
            },
            reporting_enabled: config.reporting_enabled,
        }
    }
}

/// Counters for one monitor run, logged at shutdown
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MonitorStats {
    pub cycles: u64,
    pub skipped_no_reading: u64,
    pub fetch_failures: u64,
    pub noise_rejected: u64,
    pub assessed: u64,
    pub reports_sent: u64,
    pub report_failures: u64,
}

/// What one cycle did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// Store had no current reading
    NoReading,
    /// Store fetch failed; cycle skipped
    FetchFailed,
    /// Reading rejected as sensor noise
    NoiseRejected,
    /// Reading ran the full pipeline; `reported` tells whether telemetry
    /// went out
    Assessed { level: RiskLevel, reported: bool },
}

// ============================================================================
// MONITOR
// ============================================================================

/// The polling orchestrator
pub struct Monitor<S, K, C> {
    settings: MonitorSettings,
    filter: RateOfChangeFilter,
    state: TelemetryState,
    stats: MonitorStats,
    source: S,
    sink: K,
    classifier: C,
}

impl<S, K, C> Monitor<S, K, C>
where
    S: SensorSource,
    K: TelemetrySink,
    C: EmergencyClassifier,
{
    pub fn new(settings: MonitorSettings, source: S, sink: K, classifier: C) -> Self {
        Self {
            settings,
            filter: RateOfChangeFilter::default(),
            state: TelemetryState::new(),
            stats: MonitorStats::default(),
            source,
            sink,
            classifier,
        }
    }

    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    pub fn current_level(&self) -> RiskLevel {
        self.state.current_level
    }

    /// Run one full cycle: fetch, filter, classify, assess, maybe report
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.stats.cycles += 1;

        let latest = match self.source.fetch_latest().await {
            Ok(Some(reading)) => reading,
            Ok(None) => {
                log::debug!("store has no current reading");
                self.stats.skipped_no_reading += 1;
                return CycleOutcome::NoReading;
            }
            Err(e) => {
                log::warn!("fetch failed: {}", e);
                self.stats.fetch_failures += 1;
                return CycleOutcome::FetchFailed;
            }
        };

        // Absent previous passes the filter as a first reading; a failed
        // fetch skips the cycle.
        let previous = match self.source.fetch_previous().await {
            Ok(previous) => previous,
            Err(e) => {
                log::warn!("previous fetch failed: {}", e);
                self.stats.fetch_failures += 1;
                return CycleOutcome::FetchFailed;
            }
        };

        if !self.filter.accepts(&latest, previous.as_ref()) {
            self.stats.noise_rejected += 1;
            return CycleOutcome::NoiseRejected;
        }

        log::debug!(
            "reading {} device={} controller={} temp={:?} humidity={:?} gas={:?} button={}",
            latest.timestamp,
            latest.device_id,
            latest.controller,
            latest.temperature,
            latest.humidity,
            latest.gas,
            latest.button
        );

        let features = FeatureVector::from_reading(&latest);
        let prediction = self.classifier.classify(&features);
        if prediction.emergency {
            log::warn!(
                "EMERGENCY predicted ({:.1}% probability)",
                prediction.probability * 100.0
            );
        } else {
            log::debug!(
                "no emergency predicted ({:.1}% probability)",
                prediction.probability * 100.0
            );
        }

        let assessment = risk::assess(&prediction, &latest);
        if assessment.level != self.state.current_level {
            log::info!(
                "risk level {} -> {} ({})",
                self.state.current_level,
                assessment.level,
                assessment.reason
            );
        } else {
            log::debug!("risk level {} ({})", assessment.level, assessment.reason);
        }
        self.state.current_level = assessment.level;
        self.stats.assessed += 1;

        let reported = self.maybe_report(&features, &latest, assessment.level).await;

        CycleOutcome::Assessed {
            level: assessment.level,
            reported,
        }
    }

    /// Send the report when the cadence says so. A failed send leaves
    /// the cadence clock untouched, so the next cycle retries naturally.
    async fn maybe_report(
        &mut self,
        features: &FeatureVector,
        reading: &SensorReading,
        level: RiskLevel,
    ) -> bool {
        if !self.settings.reporting_enabled {
            return false;
        }

        let now = Instant::now();
        if !self.state.is_due(now, &self.settings.schedule, level) {
            return false;
        }

        let report = TelemetryReport::new(
            self.settings.home_id,
            self.settings.device_id,
            features,
            reading,
            level,
        );

        match self.sink.report(&report).await {
            Ok(()) => {
                self.state.mark_sent(now);
                self.stats.reports_sent += 1;
                log::info!("telemetry report sent (status={})", level);
                true
            }
            Err(e) => {
                self.stats.report_failures += 1;
                log::warn!("telemetry report failed: {}", e);
                false
            }
        }
    }

    /// Poll until the shutdown future resolves. The current cycle always
    /// finishes; only the sleep between cycles is interruptible.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        log::info!(
            "monitor loop started (poll every {:?})",
            self.settings.poll_interval
        );
        tokio::pin!(shutdown);

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("shutdown requested, stopping");
                    break;
                }
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }

        log::info!(
            "monitor stopped after {} cycles ({} assessed, {} reports sent, {} noise rejected, {} fetch failures)",
            self.stats.cycles,
            self.stats.assessed,
            self.stats.reports_sent,
            self.stats.noise_rejected,
            self.stats.fetch_failures
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::Prediction;
    use crate::logic::store::FetchError;
    use crate::logic::telemetry::ReportError;
    use chrono::Utc;
    use std::sync::Mutex;

    struct ScriptedSource {
        latest: Option<SensorReading>,
        previous: Option<SensorReading>,
        fail_latest: bool,
        fail_previous: bool,
    }

    impl ScriptedSource {
        fn serving(latest: SensorReading) -> Self {
            Self {
                latest: Some(latest),
                previous: None,
                fail_latest: false,
                fail_previous: false,
            }
        }
    }

    impl SensorSource for ScriptedSource {
        async fn fetch_latest(&self) -> Result<Option<SensorReading>, FetchError> {
            if self.fail_latest {
                return Err(FetchError::Status(500));
            }
            Ok(self.latest.clone())
        }

        async fn fetch_previous(&self) -> Result<Option<SensorReading>, FetchError> {
            if self.fail_previous {
                return Err(FetchError::Status(500));
            }
            Ok(self.previous.clone())
        }
    }

    struct RecordingSink {
        sent: Mutex<Vec<TelemetryReport>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl TelemetrySink for RecordingSink {
        async fn report(&self, report: &TelemetryReport) -> Result<(), ReportError> {
            if self.fail {
                return Err(ReportError::Status(503));
            }
            self.sent.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    struct FixedClassifier {
        emergency: bool,
        probability: f64,
    }

    impl EmergencyClassifier for FixedClassifier {
        fn classify(&self, _features: &FeatureVector) -> Prediction {
            Prediction {
                emergency: self.emergency,
                probability: self.probability,
            }
        }
    }

    fn quiet_classifier() -> FixedClassifier {
        FixedClassifier {
            emergency: false,
            probability: 0.05,
        }
    }

    fn reading(temperature: f64, gas: f64) -> SensorReading {
        SensorReading {
            device_id: "esp32-07".to_string(),
            controller: "hub-a".to_string(),
            temperature: Some(temperature),
            humidity: Some(50.0),
            gas: Some(gas),
            button: false,
            motion: Some(vec![false]),
            cmk: Some(vec![false]),
            timestamp: Utc::now(),
        }
    }

    fn settings() -> MonitorSettings {
        MonitorSettings {
            home_id: 7,
            device_id: 3,
            poll_interval: Duration::from_secs(1),
            schedule: ReportSchedule::default(),
            reporting_enabled: true,
        }
    }

    #[tokio::test]
    async fn test_first_assessed_cycle_reports_immediately() {
        let source = ScriptedSource::serving(reading(24.0, 300.0));
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), quiet_classifier());

        let outcome = monitor.run_cycle().await;
        assert_eq!(
            outcome,
            CycleOutcome::Assessed {
                level: RiskLevel::Normal,
                reported: true
            }
        );
        assert_eq!(monitor.sink.sent_count(), 1);
        assert!(monitor.state.last_send.is_some());

        let sent = monitor.sink.sent.lock().unwrap();
        assert_eq!(sent[0].home.status, "normal");
        assert_eq!(sent[0].home_id, 7);
    }

    #[tokio::test]
    async fn test_normal_cadence_suppresses_back_to_back_sends() {
        let source = ScriptedSource::serving(reading(24.0, 300.0));
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), quiet_classifier());

        monitor.run_cycle().await;
        let second = monitor.run_cycle().await;

        assert_eq!(
            second,
            CycleOutcome::Assessed {
                level: RiskLevel::Normal,
                reported: false
            }
        );
        assert_eq!(monitor.sink.sent_count(), 1);
        let stats = monitor.stats();
        assert_eq!(stats.cycles, 2);
        assert_eq!(stats.assessed, 2);
        assert_eq!(stats.reports_sent, 1);
    }

    #[tokio::test]
    async fn test_elevated_level_uses_fast_cadence() {
        let mut latest = reading(40.0, 800.0);
        latest.motion = Some(vec![true]);
        let source = ScriptedSource::serving(latest);
        let classifier = FixedClassifier {
            emergency: true,
            probability: 0.9,
        };
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), classifier);

        monitor.run_cycle().await;
        assert_eq!(monitor.current_level(), RiskLevel::High);
        assert_eq!(monitor.sink.sent_count(), 1);

        // Pretend the last send happened 2 s ago: past the 1 s risk
        // interval, still well inside the 10 s normal interval
        monitor.state.last_send =
            Some(Instant::now().checked_sub(Duration::from_secs(2)).unwrap());

        let outcome = monitor.run_cycle().await;
        assert_eq!(
            outcome,
            CycleOutcome::Assessed {
                level: RiskLevel::High,
                reported: true
            }
        );
        assert_eq!(monitor.sink.sent_count(), 2);

        let sent = monitor.sink.sent.lock().unwrap();
        assert_eq!(sent[1].home.status, "high");
    }

    #[tokio::test]
    async fn test_noise_rejection_abandons_cycle() {
        let mut source = ScriptedSource::serving(reading(55.0, 300.0));
        source.previous = Some(reading(25.0, 300.0));
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), quiet_classifier());

        let outcome = monitor.run_cycle().await;
        assert_eq!(outcome, CycleOutcome::NoiseRejected);
        assert_eq!(monitor.sink.sent_count(), 0);
        assert_eq!(monitor.stats.noise_rejected, 1);
        assert_eq!(monitor.stats.assessed, 0);
        assert_eq!(monitor.current_level(), RiskLevel::Normal);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_cycle() {
        let mut source = ScriptedSource::serving(reading(24.0, 300.0));
        source.fail_latest = true;
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), quiet_classifier());

        let outcome = monitor.run_cycle().await;
        assert_eq!(outcome, CycleOutcome::FetchFailed);
        assert_eq!(monitor.stats.fetch_failures, 1);
        assert_eq!(monitor.sink.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_no_reading_skips_cycle() {
        let source = ScriptedSource {
            latest: None,
            previous: None,
            fail_latest: false,
            fail_previous: false,
        };
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), quiet_classifier());

        let outcome = monitor.run_cycle().await;
        assert_eq!(outcome, CycleOutcome::NoReading);
        assert_eq!(monitor.stats.skipped_no_reading, 1);
    }

    #[tokio::test]
    async fn test_previous_fetch_failure_skips_cycle() {
        let mut source = ScriptedSource::serving(reading(24.0, 300.0));
        source.fail_previous = true;
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), quiet_classifier());

        let outcome = monitor.run_cycle().await;
        assert_eq!(outcome, CycleOutcome::FetchFailed);
        assert_eq!(monitor.stats.fetch_failures, 1);
        assert_eq!(monitor.stats.assessed, 0);
        assert_eq!(monitor.sink.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_report_failure_keeps_retrying() {
        let source = ScriptedSource::serving(reading(24.0, 300.0));
        let mut monitor =
            Monitor::new(settings(), source, RecordingSink::failing(), quiet_classifier());

        let first = monitor.run_cycle().await;
        assert_eq!(
            first,
            CycleOutcome::Assessed {
                level: RiskLevel::Normal,
                reported: false
            }
        );
        // The clock never started, so the very next cycle tries again
        assert!(monitor.state.last_send.is_none());

        monitor.run_cycle().await;
        assert_eq!(monitor.stats.report_failures, 2);
        assert_eq!(monitor.stats.reports_sent, 0);
    }

    #[tokio::test]
    async fn test_reporting_disabled_assesses_without_sending() {
        let mut settings = settings();
        settings.reporting_enabled = false;
        let source = ScriptedSource::serving(reading(50.0, 300.0));
        let mut monitor = Monitor::new(settings, source, RecordingSink::new(), quiet_classifier());

        let outcome = monitor.run_cycle().await;
        assert_eq!(
            outcome,
            CycleOutcome::Assessed {
                level: RiskLevel::Low,
                reported: false
            }
        );
        assert_eq!(monitor.current_level(), RiskLevel::Low);
        assert_eq!(monitor.sink.sent_count(), 0);
        assert!(monitor.state.last_send.is_none());
    }

    #[tokio::test]
    async fn test_button_reading_reports_high_with_channels() {
        let mut latest = reading(24.0, 300.0);
        latest.button = true;
        latest.motion = Some(vec![true, false]);
        let source = ScriptedSource::serving(latest);
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), quiet_classifier());

        let outcome = monitor.run_cycle().await;
        assert_eq!(
            outcome,
            CycleOutcome::Assessed {
                level: RiskLevel::High,
                reported: true
            }
        );

        let sent = monitor.sink.sent.lock().unwrap();
        let value = serde_json::to_value(&sent[0]).unwrap();
        assert_eq!(value["home"]["status"], "high");
        assert_eq!(value["sensors"]["6"], 1);
        assert_eq!(value["sensors"]["4"], 1);
    }

    #[tokio::test]
    async fn test_level_recovers_to_normal() {
        let mut latest = reading(24.0, 300.0);
        latest.button = true;
        let source = ScriptedSource::serving(latest);
        let mut monitor = Monitor::new(settings(), source, RecordingSink::new(), quiet_classifier());

        monitor.run_cycle().await;
        assert_eq!(monitor.current_level(), RiskLevel::High);

        // Button released: the level drops straight back, no latching
        monitor.source.latest = Some(reading(24.0, 300.0));
        monitor.run_cycle().await;
        assert_eq!(monitor.current_level(), RiskLevel::Normal);
    }
}
