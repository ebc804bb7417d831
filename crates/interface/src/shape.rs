//! Tensor shapes.

use serde::Serialize;
use std::fmt;

/// One axis of a tensor shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Dimension {
    /// A concrete size.
    Fixed(i64),
    /// A named size resolved at runtime (e.g. `batch`).
    Symbolic(String),
    /// Neither a size nor a name was recorded.
    Unknown,
}

impl Dimension {
    pub fn as_fixed(&self) -> Option<i64> {
        match self {
            Self::Fixed(size) => Some(*size),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(size) => write!(f, "{size}"),
            Self::Symbolic(name) => f.write_str(name),
            Self::Unknown => f.write_str("?"),
        }
    }
}

/// Ordered list of dimensions. An empty shape is a scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Shape(pub Vec<Dimension>);

impl Shape {
    pub fn new(dims: Vec<Dimension>) -> Self {
        Self(dims)
    }

    /// Shape made only of fixed sizes.
    pub fn fixed(dims: impl IntoIterator<Item = i64>) -> Self {
        Self(dims.into_iter().map(Dimension::Fixed).collect())
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// True when every axis has a non-negative fixed size.
    pub fn is_static(&self) -> bool {
        self.0
            .iter()
            .all(|d| matches!(d, Dimension::Fixed(size) if *size >= 0))
    }

    /// Number of elements, if every axis is fixed and the product fits.
    pub fn element_count(&self) -> Option<u64> {
        self.0.iter().try_fold(1u64, |acc, d| {
            let size = u64::try_from(d.as_fixed()?).ok()?;
            acc.checked_mul(size)
        })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dim}")?;
        }
        f.write_str("]")
    }
}

impl From<Vec<Dimension>> for Shape {
    fn from(dims: Vec<Dimension>) -> Self {
        Self(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mixed_shape() {
        let shape = Shape::new(vec![
            Dimension::Symbolic("batch".to_string()),
            Dimension::Fixed(3),
            Dimension::Unknown,
            Dimension::Fixed(640),
        ]);
        assert_eq!(shape.to_string(), "[batch, 3, ?, 640]");
        assert_eq!(shape.rank(), 4);
        assert!(!shape.is_static());
        assert_eq!(shape.element_count(), None);
    }

    #[test]
    fn test_scalar_shape() {
        let shape = Shape::default();
        assert_eq!(shape.to_string(), "[]");
        assert_eq!(shape.rank(), 0);
        assert!(shape.is_static());
        assert_eq!(shape.element_count(), Some(1));
    }

    #[test]
    fn test_element_count() {
        assert_eq!(Shape::fixed([1, 3, 224, 224]).element_count(), Some(150_528));
        assert_eq!(Shape::fixed([2, -1]).element_count(), None);
        assert!(!Shape::fixed([2, -1]).is_static());
        assert_eq!(Shape::fixed([i64::MAX, i64::MAX, 4]).element_count(), None);
    }

    #[test]
    fn test_dimension_json() {
        let shape = Shape::new(vec![
            Dimension::Symbolic("n".to_string()),
            Dimension::Fixed(8),
            Dimension::Unknown,
        ]);
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, r#"["n",8,null]"#);
    }
}
