//! Environment bindings for Python.

use numpy::{PyArray1, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{ActionId, AgentId, EnvConfig, DEFAULT_MAX_ACTIONS};
use crate::env::{EnvPhase, EnvironmentController, StepStatus};
use crate::games::duel::{DuelConfig, PawnDuel};
use crate::rules::BoardEngine;

use super::py_core::{parse_agent, to_py_err, PyMoveSignature};

/// Python wrapper for the pawn duel environment.
///
/// Follows the agent-cycling convention: read `agent_selection`, call
/// `observe`, then `step` with an index into the action mask.
#[pyclass(name = "DuelEnv")]
pub struct PyDuelEnv {
    env: EnvironmentController<PawnDuel>,
}

#[pymethods]
impl PyDuelEnv {
    /// Create a new environment.
    ///
    /// # Arguments
    /// - board_side: Rows and columns of the board (4-16)
    /// - max_plies: Plies before the game is drawn
    /// - max_actions: Size of the discrete action space
    /// - max_episode_steps: Optional truncation limit
    /// - seed: Default seed for `reset` and `sample_action`
    #[new]
    #[pyo3(signature = (
        board_side = 6,
        max_plies = 200,
        max_actions = DEFAULT_MAX_ACTIONS,
        max_episode_steps = None,
        seed = None
    ))]
    fn new(
        board_side: usize,
        max_plies: u32,
        max_actions: usize,
        max_episode_steps: Option<u32>,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        if !(4..=16).contains(&board_side) {
            return Err(PyValueError::new_err("board_side must be 4-16"));
        }
        let engine = PawnDuel::new(
            DuelConfig::default()
                .with_board_side(board_side)
                .with_max_plies(max_plies),
        );
        let mut config = EnvConfig::default().with_max_actions(max_actions);
        config.max_episode_steps = max_episode_steps;
        config.seed = seed;
        config.validate().map_err(to_py_err)?;

        Ok(Self {
            env: EnvironmentController::new(engine, config),
        })
    }

    /// Start a new episode.
    #[pyo3(signature = (seed = None))]
    fn reset(&mut self, seed: Option<u64>) -> PyResult<()> {
        self.env.reset(seed).map_err(to_py_err)
    }

    /// Play `action` for the current agent.
    ///
    /// Returns one of "continued", "terminated", "truncated", "dead_step".
    fn step(&mut self, action: u32) -> PyResult<&'static str> {
        let status = self.env.step(ActionId::new(action)).map_err(to_py_err)?;
        Ok(match status {
            StepStatus::Continued => "continued",
            StepStatus::Terminated => "terminated",
            StepStatus::Truncated => "truncated",
            StepStatus::DeadStep => "dead_step",
        })
    }

    /// Play a move given by its signature instead of its id.
    fn step_move(&mut self, signature: &PyMoveSignature) -> PyResult<()> {
        self.env.step_move(&signature.0).map_err(to_py_err)?;
        Ok(())
    }

    /// Observation for `agent`.
    ///
    /// Returns a dict with:
    /// - observation: uint8 array of shape (side, side)
    /// - action_mask: int8 array of shape (max_actions,)
    fn observe<'py>(&self, py: Python<'py>, agent: &str) -> PyResult<Bound<'py, PyDict>> {
        let obs = self.env.observe(parse_agent(agent)?);
        let side = obs.side;

        let board = PyArray1::from_vec_bound(py, obs.board)
            .reshape([side, side])
            .map_err(|e| PyValueError::new_err(format!("{}", e)))?;
        let mask: Vec<i8> = obs.action_mask.iter().map(|&b| b as i8).collect();
        let mask = PyArray1::from_vec_bound(py, mask);

        let dict = PyDict::new_bound(py);
        dict.set_item("observation", board)?;
        dict.set_item("action_mask", mask)?;
        Ok(dict)
    }

    /// Uniformly sample a legal action for `agent` (default: the agent to
    /// move), or None if it has none.
    #[pyo3(signature = (agent = None))]
    fn sample_action(&mut self, agent: Option<&str>) -> PyResult<Option<u32>> {
        let agent = match agent {
            Some(name) => parse_agent(name)?,
            None => match self.env.agent_selection() {
                Some(agent) => agent,
                None => return Ok(None),
            },
        };
        Ok(self.env.sample_action(agent).map(ActionId::raw))
    }

    /// Reward from the most recent step.
    fn reward(&self, agent: &str) -> PyResult<f32> {
        Ok(self.env.reward(parse_agent(agent)?))
    }

    fn cumulative_reward(&self, agent: &str) -> PyResult<f32> {
        Ok(self.env.cumulative_reward(parse_agent(agent)?))
    }

    fn terminated(&self, agent: &str) -> PyResult<bool> {
        Ok(self.env.terminated(parse_agent(agent)?))
    }

    fn truncated(&self, agent: &str) -> PyResult<bool> {
        Ok(self.env.truncated(parse_agent(agent)?))
    }

    /// Legal action ids for `agent`, ascending.
    fn legal_actions(&self, agent: &str) -> PyResult<Vec<u32>> {
        let agent = parse_agent(agent)?;
        Ok(self.env.legal_actions(agent).iter().map(|a| a.raw()).collect())
    }

    /// Decode an action id back into its move signature.
    fn decode(&self, action: u32) -> PyResult<PyMoveSignature> {
        self.env
            .codec()
            .decode(ActionId::new(action))
            .map(PyMoveSignature)
            .map_err(to_py_err)
    }

    /// Forget every action mapping. `reset` must be called afterwards.
    fn reset_codec(&mut self) {
        self.env.reset_codec();
    }

    fn action_space_size(&self, agent: &str) -> PyResult<usize> {
        Ok(self.env.action_space_size(parse_agent(agent)?))
    }

    /// The agent whose turn it is, None before the first reset.
    #[getter]
    fn agent_selection(&self) -> Option<String> {
        self.env.agent_selection().map(|a| a.name().to_string())
    }

    /// Live agents.
    #[getter]
    fn agents(&self) -> Vec<String> {
        names(self.env.agents())
    }

    #[getter]
    fn possible_agents(&self) -> Vec<String> {
        names(self.env.possible_agents())
    }

    /// Number of distinct moves seen so far.
    #[getter]
    fn codec_size(&self) -> usize {
        self.env.codec().size()
    }

    #[getter]
    fn steps_taken(&self) -> u32 {
        self.env.steps_taken()
    }

    fn __repr__(&self) -> String {
        let phase = match self.env.phase() {
            EnvPhase::Uninitialized => "uninitialized",
            EnvPhase::Active => "active",
            EnvPhase::Terminated => "terminated",
        };
        format!(
            "DuelEnv(side={}, phase={}, steps={}, codec={}/{})",
            self.env.engine().board_side(),
            phase,
            self.env.steps_taken(),
            self.env.codec().size(),
            self.env.codec().capacity()
        )
    }
}

fn names(agents: &[AgentId]) -> Vec<String> {
    agents.iter().map(|a| a.name().to_string()).collect()
}
