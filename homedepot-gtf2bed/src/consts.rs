pub const GTF2BED_CMD: &str = "gtf-to-bed";

pub const DEFAULT_FEATURE_TYPE: &str = "gene";
pub const DEFAULT_UPSTREAM: i64 = 2000;
pub const DEFAULT_DOWNSTREAM: i64 = 2000;
pub const DEFAULT_ANCHOR: &str = "start";
pub const DEFAULT_ATTR_ID: &str = "gene_id";
pub const DEFAULT_INPUT_TYPE: &str = "GTF";

pub const ANNOTATION_COLUMNS: usize = 9;
