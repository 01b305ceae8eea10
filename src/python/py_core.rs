//! Core type bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::{AgentId, EnvError, MoveKind, MoveSignature};

/// Map environment errors onto Python exceptions.
///
/// Caller mistakes (bad ids, bad agents, illegal moves) raise `ValueError`.
/// Lifecycle and capacity problems raise `RuntimeError`.
pub fn to_py_err(err: EnvError) -> PyErr {
    match err {
        EnvError::IllegalAction { .. }
        | EnvError::IllegalMove { .. }
        | EnvError::UnknownActionId(_)
        | EnvError::UnknownAgent(_)
        | EnvError::InvalidConfig(_) => PyValueError::new_err(err.to_string()),
        EnvError::CapacityExhausted { .. }
        | EnvError::StaleStep
        | EnvError::CorruptSnapshot(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Parse an agent name such as `"player_0"`.
pub fn parse_agent(name: &str) -> PyResult<AgentId> {
    name.parse::<AgentId>().map_err(to_py_err)
}

/// Python wrapper for MoveSignature.
#[pyclass(name = "MoveSignature")]
#[derive(Clone, Debug)]
pub struct PyMoveSignature(pub MoveSignature);

#[pymethods]
impl PyMoveSignature {
    /// Create a move signature.
    ///
    /// # Arguments
    /// - from_square, to_square: Flat row-major square indices
    /// - move_kind: 0 quiet, 1 capture, 2 promote, 3 capture-promote, 4 special
    /// - promotion_piece: Piece code placed on promotion, 0 if none
    /// - special_code: Engine-defined extra discriminator
    #[new]
    #[pyo3(signature = (from_square, to_square, move_kind = 0, promotion_piece = 0, special_code = 0))]
    fn new(
        from_square: u8,
        to_square: u8,
        move_kind: u8,
        promotion_piece: u8,
        special_code: u16,
    ) -> PyResult<Self> {
        let kind = MoveKind::try_from(move_kind).map_err(PyValueError::new_err)?;
        Ok(Self(MoveSignature::new(
            from_square,
            to_square,
            kind,
            promotion_piece,
            special_code,
        )))
    }

    #[getter]
    fn from_square(&self) -> u8 {
        self.0.from_square
    }

    #[getter]
    fn to_square(&self) -> u8 {
        self.0.to_square
    }

    #[getter]
    fn move_kind(&self) -> u8 {
        self.0.move_kind.into()
    }

    #[getter]
    fn promotion_piece(&self) -> u8 {
        self.0.promotion_piece
    }

    #[getter]
    fn special_code(&self) -> u16 {
        self.0.special_code
    }

    fn __repr__(&self) -> String {
        format!("MoveSignature({})", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}
