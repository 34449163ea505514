pub const DOWNSAMPLE_CMD: &str = "downsample";

pub const DEFAULT_THREADS: usize = 8;
