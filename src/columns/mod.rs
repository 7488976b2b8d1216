//! Column specifications: the abstract type schema a table is seeded from.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Default character count for `varchar` columns
pub const DEFAULT_VARCHAR_LENGTH: usize = 100;
/// Default word count for `words` columns
pub const DEFAULT_WORD_COUNT: usize = 1;
/// Default upper bound for `integer` and `float` columns
pub const DEFAULT_MAX_VALUE: f64 = 1000.0;

/// Generation strategy selected by a column's type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Next name from the names corpus
    Name,
    /// Random words from the words corpus
    Words,
    /// Random alphanumeric string
    Varchar,
    Boolean,
    Integer,
    Float,
    /// Recognized but not generated; the column is left out of the record
    Date,
    /// Any other tag; generates NULL
    Unknown,
}

/// Tag lookup table, matched case-insensitively
const TYPE_TAGS: &[(&str, ColumnType)] = &[
    ("name", ColumnType::Name),
    ("words", ColumnType::Words),
    ("varchar", ColumnType::Varchar),
    ("boolean", ColumnType::Boolean),
    ("integer", ColumnType::Integer),
    ("float", ColumnType::Float),
    ("date", ColumnType::Date),
];

impl ColumnType {
    /// Resolve a type tag; unrecognized tags map to `Unknown`.
    ///
    /// Matching ignores case but not surrounding whitespace.
    pub fn from_tag(tag: &str) -> Self {
        TYPE_TAGS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, ty)| *ty)
            .unwrap_or(ColumnType::Unknown)
    }

    /// Canonical tag, or None for `Unknown`
    pub fn tag(&self) -> Option<&'static str> {
        TYPE_TAGS
            .iter()
            .find(|(_, ty)| ty == self)
            .map(|(name, _)| *name)
    }

    /// All recognized tags, for help and error messages
    pub fn known_tags() -> impl Iterator<Item = &'static str> {
        TYPE_TAGS.iter().map(|(name, _)| *name)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag().unwrap_or("unknown"))
    }
}

/// Per-column type descriptor as written in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type tag (name, words, varchar, boolean, integer, float, date)
    #[serde(rename = "type")]
    pub tag: String,

    /// Character count (varchar) or word count (words)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    /// Upper bound for integer and float columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl TypeDescriptor {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            length: None,
            max: None,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn kind(&self) -> ColumnType {
        ColumnType::from_tag(&self.tag)
    }

    /// Length, falling back to `default` when absent or zero
    pub fn length_or(&self, default: usize) -> usize {
        match self.length {
            Some(n) if n > 0 => n,
            _ => default,
        }
    }

    /// Max, falling back to `DEFAULT_MAX_VALUE` when absent or zero
    pub fn max_or_default(&self) -> f64 {
        match self.max {
            Some(m) if m != 0.0 => m,
            _ => DEFAULT_MAX_VALUE,
        }
    }

    /// Reject bounds the generator cannot sample from
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(max) = self.max {
            if !max.is_finite() || max < 0.0 {
                anyhow::bail!("max must be a finite non-negative number, got {}", max);
            }
        }
        Ok(())
    }
}

/// Ordered mapping from column name to type descriptor.
///
/// Document order is kept so generated column lists match the plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSpec {
    columns: Vec<(String, TypeDescriptor)>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces an existing column of the same name
    pub fn column(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, descriptor: TypeDescriptor) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = descriptor,
            None => self.columns.push((name, descriptor)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.columns.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for ColumnSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, descriptor) in &self.columns {
            map.serialize_entry(name, descriptor)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColumnSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColumnSpecVisitor;

        impl<'de> Visitor<'de> for ColumnSpecVisitor {
            type Value = ColumnSpec;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column names to type descriptors")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ColumnSpec, A::Error> {
                let mut columns: Vec<(String, TypeDescriptor)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, descriptor)) =
                    access.next_entry::<String, TypeDescriptor>()?
                {
                    if columns.iter().any(|(n, _)| *n == name) {
                        return Err(de::Error::custom(format!("duplicate column '{}'", name)));
                    }
                    columns.push((name, descriptor));
                }
                Ok(ColumnSpec { columns })
            }
        }

        deserializer.deserialize_map(ColumnSpecVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_is_case_insensitive() {
        assert_eq!(ColumnType::from_tag("VarChar"), ColumnType::Varchar);
        assert_eq!(ColumnType::from_tag("INTEGER"), ColumnType::Integer);
        assert_eq!(ColumnType::from_tag("date"), ColumnType::Date);
        assert_eq!(ColumnType::from_tag("uuid"), ColumnType::Unknown);
        assert_eq!(ColumnType::from_tag(" name"), ColumnType::Unknown);
    }

    #[test]
    fn test_zero_bounds_fall_back_to_defaults() {
        let d = TypeDescriptor::new("varchar").with_length(0).with_max(0.0);
        assert_eq!(d.length_or(DEFAULT_VARCHAR_LENGTH), DEFAULT_VARCHAR_LENGTH);
        assert_eq!(d.max_or_default(), DEFAULT_MAX_VALUE);
    }

    #[test]
    fn test_negative_max_is_rejected() {
        assert!(TypeDescriptor::new("integer").with_max(-5.0).validate().is_err());
        assert!(TypeDescriptor::new("integer").with_max(5.0).validate().is_ok());
    }
}
