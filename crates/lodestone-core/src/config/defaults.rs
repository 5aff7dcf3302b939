// Single source of truth for all default values.

// --- Circuit breaker ---
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;
pub const DEFAULT_SUCCESS_THRESHOLD: u32 = 3;
pub const DEFAULT_BASE_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_TIMEOUT_MS: u64 = 300_000; // 5 minutes
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

// --- Retrieval ---
pub const DEFAULT_VECTOR_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_GRAPH_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_RESULT_LIMIT: usize = 8;
pub const DEFAULT_MAX_QUERY_CHARS: usize = 2_000;

// --- Scoring ---
pub const DEFAULT_SATURATION_POINT: usize = 5;
pub const DEFAULT_COVERAGE_WEIGHT: f64 = 0.5;

// --- Fusion ---
pub const DEFAULT_FUSION_STRATEGY: &str = "advanced_hybrid";
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.6;
pub const DEFAULT_GRAPH_WEIGHT: f64 = 0.4;
pub const DEFAULT_MINORITY_BLEND: f64 = 0.2;
pub const DEFAULT_FUSION_FLOOR: f64 = 0.05;
pub const DEFAULT_CITATION_BOOST: f64 = 0.25;
pub const DEFAULT_CORROBORATION_BOOST: f64 = 0.2;
pub const DEFAULT_CORROBORATION_MIN_FRAGMENTS: usize = 3;
pub const DEFAULT_AGREEMENT_BAND: f64 = 0.2;
pub const DEFAULT_MAX_FUSED_FRAGMENTS: usize = 12;
pub const DEFAULT_SINGLE_PATH_QUALITY_PENALTY: f64 = 0.5;

// --- Thresholds ---
pub const DEFAULT_OFF_DOMAIN_THRESHOLD: f64 = 0.2;
pub const DEFAULT_HIGH_CONFIDENCE_THRESHOLD: f64 = 0.7;

// --- Generation ---
pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 30_000;

// --- Server ---
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CLIENT_TIMEOUT_MS: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
