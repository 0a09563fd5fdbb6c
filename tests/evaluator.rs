use evo_snake::game::{DeathCause, Direction, GameConfig, GameEngine, GameState, Position, Snake};
use evo_snake::neuro::{
    EvaluatorConfig, FitnessConfig, FnPolicy, Observation, PopulationEvaluator, ReplayDriver,
    TickRate,
};

fn always_right() -> FnPolicy<fn(&Observation) -> Vec<f32>> {
    FnPolicy(|_: &Observation| vec![1.0, 0.0, 0.0, 0.0])
}

/// Snake on row 5 heading right with its head at `head_x`
fn runner(head_x: i32) -> GameEngine {
    let state = GameState::new(
        Snake::new(Position::new(head_x, 5), Direction::Right, 4),
        Position::new(0, 14),
        15,
        15,
    );
    GameEngine::with_state(GameConfig::default().with_seed(1), state).unwrap()
}

#[test]
fn test_generation_runs_until_last_agent_dies() {
    let agents = vec![
        (always_right(), runner(10)),
        (always_right(), runner(3)),
        (always_right(), runner(6)),
    ];

    let report = PopulationEvaluator::default().evaluate(agents);

    assert_eq!(report.ticks, 12);
    let ticks: Vec<u32> = report.agents.iter().map(|agent| agent.ticks).collect();
    assert_eq!(ticks, vec![5, 12, 9]);

    for agent in &report.agents {
        let expected = f64::from(agent.ticks) * 0.1 - 1.0;
        assert!(
            (agent.fitness - expected).abs() < 1e-9,
            "fitness {} != {}",
            agent.fitness,
            expected
        );
        assert!(agent.error.is_none());
    }
    assert_eq!(report.champion(), Some(1));
}

#[test]
fn test_custom_fitness_weights() {
    let config = EvaluatorConfig {
        parallel: false,
        fitness: FitnessConfig {
            survival_reward: 1.0,
            growth_reward: 0.0,
            death_penalty: 10.0,
        },
    };

    let report = PopulationEvaluator::new(config).evaluate(vec![(always_right(), runner(10))]);

    assert_eq!(report.agents[0].fitness, 5.0 - 10.0);
}

#[test]
fn test_eating_rewards_growth() {
    // Fruit two cells ahead of the head
    let state = GameState::new(
        Snake::new(Position::new(10, 5), Direction::Right, 4),
        Position::new(12, 5),
        15,
        15,
    );
    let engine = GameEngine::with_state(GameConfig::default().with_seed(2), state).unwrap();

    let report = PopulationEvaluator::default().evaluate(vec![(always_right(), engine)]);
    let agent = &report.agents[0];

    assert!(agent.score >= 1);
    assert!(agent.fitness >= 2.0 + f64::from(agent.ticks) * 0.1 - 1.0 - 1e-9);
}

#[test]
fn test_replay_matches_evaluation() {
    let mut driver = ReplayDriver::new(always_right(), runner(6), TickRate::default());
    let state = driver.run_to_end().unwrap();

    assert!(!state.is_alive);
    assert_eq!(state.steps, 9);
    assert_eq!(driver.ticks(), 9);

    // Finished replays stay finished
    let info = driver.tick().unwrap();
    assert!(info.death.is_none());
    assert_eq!(driver.ticks(), 9);
}

#[test]
fn test_fifteen_by_fifteen_game_from_start() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(42)).unwrap();

    assert_eq!(engine.state().snake.head(), Position::new(10, 5));
    assert_eq!(engine.state().snake.len(), 4);
    assert_eq!(engine.state().snake.direction, Direction::Right);

    // Heading up from row 5 reaches the top wall on the sixth tick
    engine.move_up();
    let mut death = None;
    for _ in 0..6 {
        let info = engine.step().unwrap();
        if info.death.is_some() {
            death = info.death;
            break;
        }
    }

    // Fruit may be eaten on the way, but the wall is still six ticks out
    assert_eq!(death, Some(DeathCause::Wall));
    assert_eq!(engine.state().steps, 6);
}
