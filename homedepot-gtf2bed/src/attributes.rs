use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static GTF_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s*(\S+)\s+"([^"]+)"\s*;?"#).expect("valid GTF attribute regex"));

static GFF_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+?)=([^;]+);?").expect("valid GFF attribute regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum AnnotationFormat {
    GTF,
    GFF,
}

impl FromStr for AnnotationFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gtf" => Ok(AnnotationFormat::GTF),
            "gff" | "gff3" => Ok(AnnotationFormat::GFF),
            _ => Err(format!("Invalid annotation format: {}", s)),
        }
    }
}

impl Display for AnnotationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationFormat::GTF => write!(f, "GTF"),
            AnnotationFormat::GFF => write!(f, "GFF"),
        }
    }
}

///
/// Parse the attribute column of a GTF (`key "value";`) or GFF (`key=value;`) row
/// into a tag-value map. On duplicate keys the last occurrence wins.
///
pub fn parse_attributes(attributes: &str, format: AnnotationFormat) -> HashMap<String, String> {
    let pattern = match format {
        AnnotationFormat::GTF => &*GTF_ATTRIBUTE,
        AnnotationFormat::GFF => &*GFF_ATTRIBUTE,
    };

    pattern
        .captures_iter(attributes)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}
