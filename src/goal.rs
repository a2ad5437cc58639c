//! Output modes of the pipeline.
//!
//! Each [`Goal`] names the stage whose matrix the caller wants back:
//!
//! | name     | result                          |
//! |----------|---------------------------------|
//! | `sym`    | affinity matrix `A` (n×n)       |
//! | `ddg`    | degree matrix `D` (n×n)         |
//! | `norm`   | normalized similarity `W` (n×n) |
//! | `symnmf` | converged factor `H` (n×k)      |

use std::fmt;
use std::str::FromStr;

use crate::cluster::{similarity, SymNmf};
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Pipeline output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    /// Affinity matrix.
    Sym,
    /// Diagonal degree matrix.
    Ddg,
    /// Normalized similarity matrix.
    Norm,
    /// Converged SymNMF factor.
    SymNmf,
}

const GOALS: [(&str, Goal); 4] = [
    ("sym", Goal::Sym),
    ("ddg", Goal::Ddg),
    ("norm", Goal::Norm),
    ("symnmf", Goal::SymNmf),
];

impl Goal {
    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        // Table rows follow declaration order.
        GOALS[self as usize].0
    }

    /// Whether this goal needs a cluster count.
    pub fn needs_k(self) -> bool {
        self == Goal::SymNmf
    }

    /// Run the pipeline up to this goal's stage.
    ///
    /// `model` is only consulted for [`Goal::SymNmf`].
    pub fn run(self, points: &Matrix, model: &SymNmf) -> Result<Matrix> {
        match self {
            Goal::Sym => similarity::affinity(points),
            Goal::Ddg => similarity::degree(&similarity::affinity(points)?),
            Goal::Norm => similarity::normalized_similarity(points),
            Goal::SymNmf => Ok(model.fit_points(points)?.factor),
        }
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GOALS
            .iter()
            .find_map(|&(name, g)| (name == s).then_some(g))
            .ok_or_else(|| Error::UnknownGoal(s.to_string()))
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Matrix {
        Matrix::from_rows(&[
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_roundtrip() {
        for (_, g) in GOALS {
            assert_eq!(g.name().parse::<Goal>().unwrap(), g);
            assert_eq!(g.to_string(), g.name());
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "kmeans".parse::<Goal>().unwrap_err();
        assert!(matches!(err, Error::UnknownGoal(ref s) if s == "kmeans"));
        assert!("SYM".parse::<Goal>().is_err());
        assert!("".parse::<Goal>().is_err());
    }

    #[test]
    fn test_run_shapes() {
        let x = points();
        let model = SymNmf::new(2).with_seed(0);
        assert_eq!(Goal::Sym.run(&x, &model).unwrap().shape(), (4, 4));
        assert_eq!(Goal::Ddg.run(&x, &model).unwrap().shape(), (4, 4));
        assert_eq!(Goal::Norm.run(&x, &model).unwrap().shape(), (4, 4));
        assert_eq!(Goal::SymNmf.run(&x, &model).unwrap().shape(), (4, 2));
    }

    #[test]
    fn test_run_ddg_is_diagonal() {
        let d = Goal::Ddg.run(&points(), &SymNmf::new(1)).unwrap();
        assert!(d.is_symmetric());
        assert_eq!(d[(0, 3)], 0.0);
        assert!(d[(0, 0)] > 0.0);
    }

    #[test]
    fn test_needs_k() {
        assert!(Goal::SymNmf.needs_k());
        assert!(!Goal::Norm.needs_k());
    }
}
