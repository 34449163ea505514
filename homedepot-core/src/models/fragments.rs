use std::fmt::{self, Display};
use std::str::FromStr;

///
/// The identifying part of a fragment: `(chrom, start, end, barcode)`.
/// Two fragment records with the same key are the same physical fragment.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
pub struct FragmentKey {
    pub chr: String,
    pub start: u64,
    pub end: u64,
    pub barcode: String,
}

///
/// One row of a fragment file: a fragment key together with how many times
/// it was observed.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Fragment {
    pub key: FragmentKey,
    pub count: u64,
}

impl Fragment {
    pub fn new(chr: &str, start: u64, end: u64, barcode: &str, count: u64) -> Self {
        Fragment {
            key: FragmentKey {
                chr: chr.to_string(),
                start,
                end,
                barcode: barcode.to_string(),
            },
            count,
        }
    }
}

impl FromStr for Fragment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim_end_matches(['\r', '\n']).split('\t').collect();
        if parts.len() != 5 {
            return Err(format!(
                "expected 5 tab-separated columns (chrom, start, end, barcode, count), found {}",
                parts.len()
            ));
        }

        let start = parts[1]
            .parse::<u64>()
            .map_err(|_| format!("start is not a non-negative integer: {:?}", parts[1]))?;
        let end = parts[2]
            .parse::<u64>()
            .map_err(|_| format!("end is not a non-negative integer: {:?}", parts[2]))?;
        let count = parts[4]
            .parse::<u64>()
            .map_err(|_| format!("count is not a non-negative integer: {:?}", parts[4]))?;

        Ok(Fragment::new(parts[0], start, end, parts[3], count))
    }
}

impl Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chr, self.start, self.end, self.barcode
        )
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.key, self.count)
    }
}
