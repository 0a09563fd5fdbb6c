//! Population evaluator
//!
//! Runs one game per candidate policy in lockstep until every game is over
//! and reports each agent's fitness in input order. Within a tick the agents
//! run on the rayon pool; the end of that parallel pass is the tick barrier,
//! after which finished agents leave the active set.

use rayon::prelude::*;
use tracing::{debug, warn};

use super::config::EvaluatorConfig;
use super::error::EvaluationError;
use super::fitness::FitnessTracker;
use super::observation::create_observation;
use super::policy::{select_action, Policy};
use crate::game::GameEngine;

/// Outcome of one agent in a generation
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReport {
    pub fitness: f64,
    /// Fruit eaten
    pub score: u32,
    /// Ticks the agent was stepped while alive
    pub ticks: u32,
    /// Set when the agent was dropped for a contract violation or a full board
    pub error: Option<EvaluationError>,
}

/// Outcome of a whole generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// One entry per agent, in input order
    pub agents: Vec<AgentReport>,
    /// Ticks until the active set emptied
    pub ticks: u32,
}

impl GenerationReport {
    /// Final fitness per agent, in input order
    pub fn fitness(&self) -> Vec<f64> {
        self.agents.iter().map(|agent| agent.fitness).collect()
    }

    pub fn best_fitness(&self) -> f64 {
        self.agents
            .iter()
            .map(|agent| agent.fitness)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.agents.is_empty() {
            0.0
        } else {
            self.agents.iter().map(|agent| agent.fitness).sum::<f64>() / self.agents.len() as f64
        }
    }

    pub fn best_score(&self) -> u32 {
        self.agents.iter().map(|agent| agent.score).max().unwrap_or(0)
    }

    /// Index of the fittest agent; ties go to the lowest index
    pub fn champion(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, agent) in self.agents.iter().enumerate() {
            if best.map_or(true, |(_, fitness)| agent.fitness > fitness) {
                best = Some((idx, agent.fitness));
            }
        }
        best.map(|(idx, _)| idx)
    }

    pub fn error_count(&self) -> usize {
        self.agents.iter().filter(|agent| agent.error.is_some()).count()
    }
}

struct ActiveAgent<P> {
    index: usize,
    policy: P,
    engine: GameEngine,
    tracker: FitnessTracker,
    error: Option<EvaluationError>,
}

impl<P: Policy> ActiveAgent<P> {
    /// Step, decide the next heading, then account fitness
    ///
    /// A failed step or a bad policy output freezes fitness at its value from
    /// before this tick.
    fn tick(&mut self) {
        let was_alive = self.engine.is_alive();

        if let Err(err) = self.engine.step() {
            self.error = Some(err.into());
            return;
        }

        if self.engine.is_alive() {
            let observation = create_observation(self.engine.state());
            let scores = self.policy.evaluate(&observation);
            match select_action(&scores) {
                Ok(direction) => self.engine.set_direction(direction),
                Err(err) => {
                    self.error = Some(err);
                    return;
                }
            }
        }

        self.tracker.record(was_alive, self.engine.state());
    }

    fn is_finished(&self) -> bool {
        self.error.is_some() || !self.engine.is_alive()
    }

    fn into_report(self) -> AgentReport {
        let state = self.engine.state();
        AgentReport {
            fitness: self.tracker.fitness(),
            score: state.score,
            ticks: state.steps,
            error: self.error,
        }
    }
}

/// Evaluates a population of policies, one game each
///
/// Holds no state between generations.
#[derive(Debug, Clone, Default)]
pub struct PopulationEvaluator {
    config: EvaluatorConfig,
}

impl PopulationEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Run every (policy, game) pair until all games are over
    pub fn evaluate<P>(&self, agents: Vec<(P, GameEngine)>) -> GenerationReport
    where
        P: Policy + Send,
    {
        let total = agents.len();
        let mut reports: Vec<Option<AgentReport>> = vec![None; total];

        let mut active: Vec<ActiveAgent<P>> = agents
            .into_iter()
            .enumerate()
            .map(|(index, (policy, engine))| ActiveAgent {
                index,
                policy,
                engine,
                tracker: FitnessTracker::new(self.config.fitness.clone()),
                error: None,
            })
            .collect();

        let mut ticks = 0;
        while !active.is_empty() {
            ticks += 1;

            if self.config.parallel {
                active.par_iter_mut().for_each(|agent| agent.tick());
            } else {
                active.iter_mut().for_each(|agent| agent.tick());
            }

            let (finished, remaining): (Vec<_>, Vec<_>) =
                active.into_iter().partition(|agent| agent.is_finished());
            active = remaining;

            for agent in finished {
                let index = agent.index;
                let report = agent.into_report();
                match &report.error {
                    Some(err) => warn!(agent = index, tick = ticks, %err, "agent dropped"),
                    None => debug!(
                        agent = index,
                        tick = ticks,
                        score = report.score,
                        fitness = report.fitness,
                        "agent finished"
                    ),
                }
                reports[index] = Some(report);
            }
        }

        let agents: Vec<AgentReport> = reports.into_iter().flatten().collect();
        debug_assert_eq!(agents.len(), total);

        GenerationReport { agents, ticks }
    }
}
