//! Python bindings for the environment layer.
//!
//! # Quick Start
//!
//! ```python
//! import power_chess_env as pce
//!
//! env = pce.DuelEnv(board_side=6)
//! env.reset(seed=7)
//! while not env.terminated(env.agent_selection):
//!     agent = env.agent_selection
//!     obs = env.observe(agent)
//!     env.step(env.sample_action(agent))
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_env;

pub use py_core::*;
pub use py_env::*;

/// power_chess_env: two-player board game environments for RL training.
#[pymodule]
fn power_chess_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMoveSignature>()?;
    m.add_class::<PyDuelEnv>()?;
    Ok(())
}
