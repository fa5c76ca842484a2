// =============================================================================
// =============================================================================

/// Version string written into new configuration files
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// =============================================================================

/// Number of coded amino acids
pub const ALPHABET_SIZE: u32 = 20;

/// Residues that make a term ambiguous
pub const AMBIGUOUS_RESIDUES: [u8; 2] = [b'X', b'.'];

/// Default term length in residues
pub const DEFAULT_K: usize = 10;

/// Default maximum simplicity score kept by the filter
pub const DEFAULT_MAX_SCORE: f64 = 0.3;

/// Default minimum simplicity level to unmask
pub const DEFAULT_SIMPLICITY_CUTOFF: f64 = 3.0;

// =============================================================================
// =============================================================================

/// Edges of the score histogram; the last bin is closed
pub const SCORE_BIN_EDGES: [f64; 12] = [
    0.0, 0.01, 0.03, 0.1, 0.3, 1.0, 1.3, 2.0, 3.0, 4.0, 5.0, 100.0,
];

/// Number of bins in the masked-fraction histogram
pub const NUM_MASK_HISTOGRAM_BINS: usize = 25;

/// Residues per unit used when reporting term rates
pub const UNIT_MULTIPLIER: f64 = 3.0e6;

/// Unit name used when reporting term rates
pub const UNIT_NAME: &str = "Mbasepair";

// =============================================================================
// =============================================================================

/// Suffix of persisted term tables
pub const TERMS_SUFFIX: &str = "_terms.tsv";

/// Suffix of frequency histograms
pub const FREQ_HIST_SUFFIX: &str = "_freqhist.csv";

/// Suffix of score histograms
pub const SCORE_HIST_SUFFIX: &str = "_scorehist.tsv";

/// Suffix of intersection histograms
pub const INTERSECT_HIST_SUFFIX: &str = "_intersect.tsv";

/// Suffix of masked-fraction histograms
pub const MASK_HIST_SUFFIX: &str = "-hist.tsv";

// =============================================================================
// =============================================================================

/// Environment variable naming the configuration file
pub const CONFIG_FILE_ENVVAR: &str = "TERMSIFT_CONFIG";

/// Configuration file used when neither a flag nor the environment names one
pub const DEFAULT_CONFIG_PATH: &str = ".termsift/config.yaml";

/// Special set name that expands to every configured set
pub const ALL_SETS: &str = "all";
