//! Tagged delay values: plain scalars or rise/fall transition pairs.
//!
//! Upstream delay maps carry either a single `delay` per arc side or a
//! separate `delay_r`/`delay_f` pair when the producing tool reports
//! transition polarity. The shape is resolved once at ingestion; all
//! downstream arithmetic is component-wise and shape-checked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A delay measurement in nanoseconds, either a scalar or a rise/fall pair.
///
/// The two sides of one comparison record always have matching shape;
/// combining mismatched shapes is a [`ShapeError`].
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum DelayValue {
    /// A single delay value with no transition polarity.
    Scalar(f64),
    /// Separate delays for rising and falling transitions.
    RiseFall {
        /// Delay of the rising transition.
        rise: f64,
        /// Delay of the falling transition.
        fall: f64,
    },
}

impl DelayValue {
    /// Returns the shape tag of this value.
    pub fn shape(&self) -> DelayShape {
        match self {
            DelayValue::Scalar(_) => DelayShape::Scalar,
            DelayValue::RiseFall { .. } => DelayShape::RiseFall,
        }
    }

    /// Returns a zero value of the given shape.
    pub fn zero(shape: DelayShape) -> Self {
        match shape {
            DelayShape::Scalar => DelayValue::Scalar(0.0),
            DelayShape::RiseFall => DelayValue::RiseFall {
                rise: 0.0,
                fall: 0.0,
            },
        }
    }

    /// Component-wise sum. Fails if the shapes differ.
    pub fn checked_add(self, other: DelayValue) -> Result<DelayValue, ShapeError> {
        match (self, other) {
            (DelayValue::Scalar(a), DelayValue::Scalar(b)) => Ok(DelayValue::Scalar(a + b)),
            (
                DelayValue::RiseFall { rise: ar, fall: af },
                DelayValue::RiseFall { rise: br, fall: bf },
            ) => Ok(DelayValue::RiseFall {
                rise: ar + br,
                fall: af + bf,
            }),
            (a, b) => Err(ShapeError {
                left: a.shape(),
                right: b.shape(),
            }),
        }
    }

    /// Divides every component by `divisor`.
    pub fn scaled_down(self, divisor: f64) -> DelayValue {
        match self {
            DelayValue::Scalar(v) => DelayValue::Scalar(v / divisor),
            DelayValue::RiseFall { rise, fall } => DelayValue::RiseFall {
                rise: rise / divisor,
                fall: fall / divisor,
            },
        }
    }

    /// Returns the components in a fixed order: scalar, or rise then fall.
    pub fn components(&self) -> Vec<f64> {
        match *self {
            DelayValue::Scalar(v) => vec![v],
            DelayValue::RiseFall { rise, fall } => vec![rise, fall],
        }
    }
}

impl fmt::Display for DelayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayValue::Scalar(v) => write!(f, "{v}"),
            DelayValue::RiseFall { rise, fall } => write!(f, "r{rise}/f{fall}"),
        }
    }
}

/// The shape of a [`DelayValue`]: scalar or rise/fall pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DelayShape {
    /// A single delay value.
    Scalar,
    /// A rise/fall delay pair.
    RiseFall,
}

impl fmt::Display for DelayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayShape::Scalar => write!(f, "scalar"),
            DelayShape::RiseFall => write!(f, "rise/fall"),
        }
    }
}

/// Error combining delay values of mismatched shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mismatched delay shapes: {left} vs {right}")]
pub struct ShapeError {
    /// Shape of the left-hand operand.
    pub left: DelayShape,
    /// Shape of the right-hand operand.
    pub right: DelayShape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_scalars() {
        let a = DelayValue::Scalar(1.5);
        let b = DelayValue::Scalar(2.5);
        assert_eq!(a.checked_add(b).unwrap(), DelayValue::Scalar(4.0));
    }

    #[test]
    fn add_rise_fall() {
        let a = DelayValue::RiseFall {
            rise: 1.0,
            fall: 2.0,
        };
        let b = DelayValue::RiseFall {
            rise: 0.5,
            fall: 0.5,
        };
        assert_eq!(
            a.checked_add(b).unwrap(),
            DelayValue::RiseFall {
                rise: 1.5,
                fall: 2.5
            }
        );
    }

    #[test]
    fn add_mismatched_shapes() {
        let a = DelayValue::Scalar(1.0);
        let b = DelayValue::RiseFall {
            rise: 1.0,
            fall: 1.0,
        };
        let err = a.checked_add(b).unwrap_err();
        assert_eq!(err.left, DelayShape::Scalar);
        assert_eq!(err.right, DelayShape::RiseFall);
        assert_eq!(
            format!("{err}"),
            "mismatched delay shapes: scalar vs rise/fall"
        );
    }

    #[test]
    fn scaled_down() {
        let sum = DelayValue::RiseFall {
            rise: 3.0,
            fall: 4.0,
        };
        assert_eq!(
            sum.scaled_down(2.0),
            DelayValue::RiseFall {
                rise: 1.5,
                fall: 2.0
            }
        );
    }

    #[test]
    fn zero_matches_shape() {
        assert_eq!(
            DelayValue::zero(DelayShape::Scalar),
            DelayValue::Scalar(0.0)
        );
        assert_eq!(
            DelayValue::zero(DelayShape::RiseFall).shape(),
            DelayShape::RiseFall
        );
    }

    #[test]
    fn components_order() {
        let v = DelayValue::RiseFall {
            rise: 0.1,
            fall: 0.2,
        };
        assert_eq!(v.components(), vec![0.1, 0.2]);
        assert_eq!(DelayValue::Scalar(0.3).components(), vec![0.3]);
    }
}
