//! 追踪初始化与操作计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub labels_generated: u64,
    pub label_parse_failures: u64,
    pub range_validation_failures: u64,
    pub tile_validation_failures: u64,
    pub tiles_placed: u64,
    pub seed_shifts: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    labels_generated: AtomicU64,
    label_parse_failures: AtomicU64,
    range_validation_failures: AtomicU64,
    tile_validation_failures: AtomicU64,
    tiles_placed: AtomicU64,
    seed_shifts: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            labels_generated: AtomicU64::new(0),
            label_parse_failures: AtomicU64::new(0),
            range_validation_failures: AtomicU64::new(0),
            tile_validation_failures: AtomicU64::new(0),
            tiles_placed: AtomicU64::new(0),
            seed_shifts: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            labels_generated: self.labels_generated.load(Ordering::Relaxed),
            label_parse_failures: self.label_parse_failures.load(Ordering::Relaxed),
            range_validation_failures: self.range_validation_failures.load(Ordering::Relaxed),
            tile_validation_failures: self.tile_validation_failures.load(Ordering::Relaxed),
            tiles_placed: self.tiles_placed.load(Ordering::Relaxed),
            seed_shifts: self.seed_shifts.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 记录成功产出的轴标签个数。
pub fn record_labels_generated(count: u64) {
    metrics().labels_generated.fetch_add(count, Ordering::Relaxed);
}

/// 记录标签解析失败次数。
pub fn record_label_parse_failure() {
    metrics()
        .label_parse_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录范围校验失败次数。
pub fn record_range_validation_failure() {
    metrics()
        .range_validation_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录瓦片放置校验失败次数。
pub fn record_tile_validation_failure() {
    metrics()
        .tile_validation_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录成功放置的瓦片次数。
pub fn record_tile_placed() {
    metrics().tiles_placed.fetch_add(1, Ordering::Relaxed);
}

/// 记录种子平移事务提交次数。
pub fn record_seed_shift() {
    metrics().seed_shifts.fetch_add(1, Ordering::Relaxed);
}
