//! Training statistics tracking across generations
//!
//! This module keeps rolling windows over per-generation results so training
//! progress can be logged without holding every report.

use std::collections::VecDeque;

use crate::neuro::GenerationReport;

/// Training statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use evo_snake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(10);
/// stats.record_generation(12.5, 3.0, 4, 120);
///
/// assert_eq!(stats.total_generations(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Best fitness per generation (rolling window)
    best_fitness: VecDeque<f64>,

    /// Mean fitness per generation (rolling window)
    mean_fitness: VecDeque<f64>,

    /// Best score per generation (rolling window)
    best_scores: VecDeque<u32>,

    /// Highest fitness ever recorded
    record_fitness: f64,

    /// Highest score ever recorded
    record_score: u32,

    /// Total number of generations completed
    total_generations: usize,

    /// Total number of ticks simulated
    total_ticks: u64,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a new training statistics tracker
    ///
    /// # Arguments
    ///
    /// * `window_size` - Number of recent generations to keep for rolling averages
    pub fn new(window_size: usize) -> Self {
        Self {
            best_fitness: VecDeque::with_capacity(window_size),
            mean_fitness: VecDeque::with_capacity(window_size),
            best_scores: VecDeque::with_capacity(window_size),
            record_fitness: f64::NEG_INFINITY,
            record_score: 0,
            total_generations: 0,
            total_ticks: 0,
            window_size: window_size.max(1),
        }
    }

    /// Record the outcome of a generation
    pub fn record_generation(
        &mut self,
        best_fitness: f64,
        mean_fitness: f64,
        best_score: u32,
        ticks: u32,
    ) {
        Self::push_deque(&mut self.best_fitness, best_fitness, self.window_size);
        Self::push_deque(&mut self.mean_fitness, mean_fitness, self.window_size);
        Self::push_deque(&mut self.best_scores, best_score, self.window_size);
        self.record_fitness = self.record_fitness.max(best_fitness);
        self.record_score = self.record_score.max(best_score);
        self.total_generations += 1;
        self.total_ticks += u64::from(ticks);
    }

    /// Record a generation straight from the evaluator's report
    pub fn record_report(&mut self, report: &GenerationReport) {
        self.record_generation(
            report.best_fitness(),
            report.mean_fitness(),
            report.best_score(),
            report.ticks,
        );
    }

    /// Mean of the per-generation best fitness over the window
    pub fn mean_best_fitness(&self) -> f64 {
        Self::mean(&self.best_fitness)
    }

    /// Mean of the per-generation mean fitness over the window
    pub fn mean_population_fitness(&self) -> f64 {
        Self::mean(&self.mean_fitness)
    }

    /// Mean of the per-generation best score over the window
    pub fn mean_best_score(&self) -> f64 {
        let sum: u32 = self.best_scores.iter().sum();
        if self.best_scores.is_empty() {
            0.0
        } else {
            f64::from(sum) / self.best_scores.len() as f64
        }
    }

    /// Highest fitness seen, or 0.0 before the first generation
    pub fn record_fitness(&self) -> f64 {
        if self.total_generations == 0 {
            0.0
        } else {
            self.record_fitness
        }
    }

    pub fn record_score(&self) -> u32 {
        self.record_score
    }

    pub fn total_generations(&self) -> usize {
        self.total_generations
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a summary of the current statistics
    ///
    /// ```rust
    /// use evo_snake::metrics::TrainingStats;
    ///
    /// let mut stats = TrainingStats::new(10);
    /// stats.record_generation(12.5, 3.0, 4, 120);
    /// assert!(stats.format_summary().contains("Best: 12.50"));
    /// ```
    pub fn format_summary(&self) -> String {
        format!(
            "Generations: {} | Ticks: {} | Best: {:.2} | Mean: {:.2} | Score: {:.2} | Record: {:.2} / {}",
            self.total_generations,
            self.total_ticks,
            self.mean_best_fitness(),
            self.mean_population_fitness(),
            self.mean_best_score(),
            self.record_fitness(),
            self.record_score,
        )
    }

    fn mean(deque: &VecDeque<f64>) -> f64 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f64>() / deque.len() as f64
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuro::AgentReport;

    #[test]
    fn test_new() {
        let stats = TrainingStats::new(100);
        assert_eq!(stats.window_size(), 100);
        assert_eq!(stats.total_generations(), 0);
        assert_eq!(stats.total_ticks(), 0);
        assert_eq!(stats.record_fitness(), 0.0);
    }

    #[test]
    fn test_record_generation() {
        let mut stats = TrainingStats::new(100);
        stats.record_generation(10.0, 2.0, 3, 50);

        assert_eq!(stats.total_generations(), 1);
        assert_eq!(stats.total_ticks(), 50);
        assert!((stats.mean_best_fitness() - 10.0).abs() < 1e-9);
        assert!((stats.mean_population_fitness() - 2.0).abs() < 1e-9);
        assert!((stats.mean_best_score() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = TrainingStats::new(3);

        stats.record_generation(1.0, 0.0, 1, 10);
        stats.record_generation(2.0, 0.0, 2, 10);
        stats.record_generation(3.0, 0.0, 3, 10);
        assert!((stats.mean_best_fitness() - 2.0).abs() < 1e-9);

        // A 4th generation evicts the first
        stats.record_generation(4.0, 0.0, 4, 10);

        assert_eq!(stats.total_generations(), 4);
        assert!((stats.mean_best_fitness() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_records_survive_window() {
        let mut stats = TrainingStats::new(1);
        stats.record_generation(9.0, 1.0, 7, 10);
        stats.record_generation(-1.0, -2.0, 0, 10);

        assert_eq!(stats.record_fitness(), 9.0);
        assert_eq!(stats.record_score(), 7);
        assert!((stats.mean_best_fitness() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_report() {
        let report = GenerationReport {
            agents: vec![
                AgentReport {
                    fitness: 4.0,
                    score: 1,
                    ticks: 30,
                    error: None,
                },
                AgentReport {
                    fitness: 2.0,
                    score: 0,
                    ticks: 12,
                    error: None,
                },
            ],
            ticks: 30,
        };
        let mut stats = TrainingStats::new(10);

        stats.record_report(&report);

        assert!((stats.mean_best_fitness() - 4.0).abs() < 1e-9);
        assert!((stats.mean_population_fitness() - 3.0).abs() < 1e-9);
        assert_eq!(stats.record_score(), 1);
        assert_eq!(stats.total_ticks(), 30);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = TrainingStats::new(100);
        stats.record_generation(15.5, 1.25, 5, 150);

        let summary = stats.format_summary();
        assert!(summary.contains("Generations: 1"));
        assert!(summary.contains("Ticks: 150"));
        assert!(summary.contains("Best: 15.50"));
        assert!(summary.contains("Mean: 1.25"));
        assert!(summary.contains("Score: 5.00"));
        assert!(summary.contains("Record: 15.50 / 5"));
    }
}
