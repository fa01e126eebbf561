//! Points in configuration space.
//!
//! A [`Configuration`] is an immutable, fixed-length coordinate vector. Its
//! [`ConfigKey`] is derived from the exact bit patterns of the coordinates,
//! so two configurations share a key only if their coordinates are equal.

use crate::error::{Result, RrtError};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Index, str::FromStr};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    values: Vec<f64>,
}

/// Exact, hashable identity of a [`Configuration`]'s coordinates.
///
/// `-0.0` and `0.0` map to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigKey(Box<[u64]>);

impl Configuration {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The all-zero configuration with `dim` coordinates.
    pub fn origin(dim: usize) -> Self {
        Self::new(vec![0.0; dim])
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn check_dim(&self, other: &Configuration) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(RrtError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        Ok(())
    }

    /// Euclidean distance to `other`.
    ///
    /// ### Errors
    /// [`RrtError::DimensionMismatch`] if the two lengths differ.
    pub fn distance(&self, other: &Configuration) -> Result<f64> {
        self.check_dim(other)?;
        let d2: f64 = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Ok(d2.sqrt())
    }

    /// Euclidean norm from the origin.
    pub fn length(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Exact map key for these coordinates.
    ///
    /// Built from the IEEE-754 bits of each value, so it never depends on
    /// how the numbers print.
    pub fn identity(&self) -> ConfigKey {
        let bits = self
            .values
            .iter()
            .map(|&v| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
            .collect();
        ConfigKey(bits)
    }

    /// Canonical text form, e.g. `[1.0, -2.5]`.
    ///
    /// Floats are printed with the shortest representation that parses back
    /// to the same value, so [`Configuration::decode`] is lossless.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses the text form produced by [`Configuration::encode`].
    ///
    /// Whitespace around the brackets and between coordinates is ignored;
    /// `[]` decodes to a zero-dimensional configuration.
    ///
    /// ### Errors
    /// [`RrtError::Decode`] if the brackets are missing or a coordinate is
    /// not a float.
    pub fn decode(text: &str) -> Result<Self> {
        let inner = text
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| RrtError::Decode(format!("expected `[...]`, got `{text}`")))?;

        if inner.trim().is_empty() {
            return Ok(Self::new(Vec::new()));
        }

        let values = inner
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| RrtError::Decode(format!("bad coordinate `{}`: {e}", part.trim())))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(values))
    }

    /// Little-endian IEEE-754 encoding, 8 bytes per coordinate.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    /// Inverse of [`Configuration::to_bytes`].
    ///
    /// ### Errors
    /// [`RrtError::Decode`] if `bytes.len()` is not a multiple of 8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 8 != 0 {
            return Err(RrtError::Decode(format!(
                "byte length {} is not a multiple of 8",
                bytes.len()
            )));
        }

        let values = bytes
            .chunks_exact(8)
            .map(|chunk| {
                <[u8; 8]>::try_from(chunk)
                    .map(f64::from_le_bytes)
                    .map_err(|_| RrtError::Decode("truncated coordinate".to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(values))
    }
}

impl From<Vec<f64>> for Configuration {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl Index<usize> for Configuration {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v:?}")?;
        }
        write!(f, "]")
    }
}

impl FromStr for Configuration {
    type Err = RrtError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    #[test]
    fn length_of_four_tens_is_twenty() {
        let c = Configuration::new(vec![10.0, 10.0, 10.0, 10.0]);
        assert_relative_eq!(c.length(), 20.0);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Configuration::new(vec![0.0, 0.0]);
        let b = Configuration::new(vec![3.0, 4.0]);
        assert_relative_eq!(a.distance(&b).unwrap(), 5.0);
        assert_relative_eq!(b.distance(&a).unwrap(), 5.0);
        assert_eq!(a.distance(&a).unwrap(), 0.0);
    }

    #[test]
    fn distance_rejects_mismatched_dimensions() {
        let a = Configuration::new(vec![0.0, 0.0]);
        let b = Configuration::new(vec![1.0, 2.0, 3.0]);
        let err = a.distance(&b).unwrap_err();
        assert!(matches!(
            err,
            RrtError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn identity_distinguishes_coordinates() {
        let a = Configuration::new(vec![10.0, 10.0, 10.0, 10.0]);
        let b = Configuration::new(vec![10.0, 10.0, 10.0, 10.0]);
        let c = Configuration::new(vec![11.0, 10.0, 10.0, 10.0]);
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn identity_separates_values_that_print_alike() {
        // Both would render as "0.3" with short fixed-precision formatting.
        let a = Configuration::new(vec![0.1 + 0.2]);
        let b = Configuration::new(vec![0.3]);
        assert_ne!(a.identity(), b.identity());

        let mut map = HashMap::new();
        map.insert(a.identity(), 1);
        map.insert(b.identity(), 2);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn identity_folds_negative_zero() {
        let a = Configuration::new(vec![0.0, -0.0]);
        let b = Configuration::new(vec![-0.0, 0.0]);
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn text_codec_is_lossless() {
        let c = Configuration::new(vec![0.1 + 0.2, -25.0, 1e-300, 7.123456789012345]);
        let text = c.encode();
        let back = Configuration::decode(&text).unwrap();
        assert_eq!(back.distance(&c).unwrap(), 0.0);
        assert_eq!(back.identity(), c.identity());
    }

    #[test]
    fn text_form_is_bracketed_list() {
        let c = Configuration::new(vec![1.0, -2.5]);
        assert_eq!(c.to_string(), "[1.0, -2.5]");
        let parsed: Configuration = " [ 1.0 ,-2.5 ] ".parse().unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn decode_rejects_malformed_text() {
        assert!(matches!(
            Configuration::decode("1.0, 2.0"),
            Err(RrtError::Decode(_))
        ));
        assert!(matches!(
            Configuration::decode("[1.0, abc]"),
            Err(RrtError::Decode(_))
        ));
        assert_eq!(Configuration::decode("[]").unwrap().dim(), 0);
    }

    #[test]
    fn byte_codec_is_lossless() {
        let c = Configuration::new(vec![8.0, -20.000000000000004, f64::MIN_POSITIVE]);
        let bytes = c.to_bytes();
        assert_eq!(bytes.len(), 24);
        let back = Configuration::from_bytes(&bytes).unwrap();
        assert_eq!(back.distance(&c).unwrap(), 0.0);
    }

    #[test]
    fn from_bytes_rejects_partial_coordinate() {
        assert!(matches!(
            Configuration::from_bytes(&[0u8; 9]),
            Err(RrtError::Decode(_))
        ));
    }
}
