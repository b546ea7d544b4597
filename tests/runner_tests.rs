use schedforge::catalog::{Activity, Catalog, Facilitator, Room};
use schedforge::config::{FitnessWeights, GaParams};
use schedforge::fitness::Evaluator;
use schedforge::ga::runner::should_stop;
use schedforge::ga::{Engine, GenerationStats};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn engine(catalog: Catalog, params: GaParams) -> Engine {
    let evaluator = Evaluator::new(Arc::new(catalog), FitnessWeights::default()).unwrap();
    Engine::new(Arc::new(evaluator), params).unwrap()
}

fn tiny_catalog() -> Catalog {
    let act = |name: &str, enrollment: u32| Activity {
        name: name.to_string(),
        enrollment,
        preferred: vec!["F1".to_string()],
        others: vec!["F2".to_string()],
        needs_lab: false,
        needs_projector: false,
    };
    let room = |name: &str, capacity: u32| Room {
        name: name.to_string(),
        capacity,
        has_lab: false,
        has_projector: false,
    };
    Catalog {
        activities: vec![act("A1", 20), act("A2", 30), act("A3", 25)],
        rooms: vec![room("North 1", 25), room("South 2", 35)],
        time_slots: vec!["10 AM".to_string(), "11 AM".to_string()],
        facilitators: vec![Facilitator::named("F1"), Facilitator::named("F2")],
        section_pairs: vec![],
        cross_pairs: vec![],
        split_buildings: vec![],
    }
}

// --- STOPPING POLICY ---

#[test]
fn test_stop_policy_honors_min_generations() {
    let params = GaParams {
        min_generations: 5,
        max_generations: 100,
        ..GaParams::default()
    };
    // Deep in convergence, but still before the floor.
    assert!(!should_stop(&params, 3, 0.0));
    assert!(!should_stop(&params, 4, -5.0));
}

#[test]
fn test_stop_policy_triggers_on_low_improvement() {
    let params = GaParams {
        min_generations: 5,
        max_generations: 100,
        ..GaParams::default()
    };
    // Improvement stays healthy through generation 6, drops at 7.
    assert!(!should_stop(&params, 5, 4.2));
    assert!(!should_stop(&params, 6, 1.3));
    assert!(should_stop(&params, 7, 0.6));
}

#[test]
fn test_stop_policy_single_bad_generation_suffices() {
    let params = GaParams {
        min_generations: 5,
        max_generations: 100,
        ..GaParams::default()
    };
    // A lone regression stops the run; no smoothing window.
    assert!(should_stop(&params, 10, -2.0));
}

#[test]
fn test_stop_policy_caps_at_max_generations() {
    let params = GaParams {
        min_generations: 5,
        max_generations: 100,
        ..GaParams::default()
    };
    // Generation 99 is the hundredth; nothing gets bred past it.
    assert!(should_stop(&params, 99, 50.0));
    assert!(should_stop(&params, 100, 50.0));
}

#[test]
fn test_stop_policy_never_stops_at_generation_zero() {
    let params = GaParams {
        min_generations: 0,
        max_generations: 100,
        ..GaParams::default()
    };
    assert!(!should_stop(&params, 0, 0.0));
}

// --- DETERMINISM ---

#[test]
fn test_identical_seed_identical_run() {
    let params = GaParams {
        population_size: 30,
        mutation_rate: 0.05,
        min_generations: 3,
        max_generations: 12,
        ..GaParams::default()
    };
    let run_a = engine(Catalog::sla(), params.clone()).run(Some(777), &|_: &GenerationStats| true);
    let run_b = engine(Catalog::sla(), params).run(Some(777), &|_: &GenerationStats| true);

    assert_eq!(run_a.history, run_b.history);
    assert_eq!(run_a.best_schedule, run_b.best_schedule);
    assert_eq!(run_a.best_fitness, run_b.best_fitness);
}

#[test]
fn test_different_seeds_diverge() {
    let params = GaParams {
        population_size: 30,
        min_generations: 2,
        max_generations: 5,
        ..GaParams::default()
    };
    let run_a = engine(Catalog::sla(), params.clone()).run(Some(1), &|_: &GenerationStats| true);
    let run_b = engine(Catalog::sla(), params).run(Some(2), &|_: &GenerationStats| true);
    assert_ne!(run_a.history, run_b.history);
}

// --- END TO END ---

#[test]
fn test_end_to_end_small_catalog() {
    let catalog = tiny_catalog();
    let params = GaParams {
        population_size: 10,
        mutation_rate: 0.1,
        min_generations: 3,
        max_generations: 20,
        ..GaParams::default()
    };
    let result = engine(catalog.clone(), params).run(Some(42), &|_: &GenerationStats| true);

    assert!(result.history.len() >= 3 && result.history.len() <= 20);
    assert!(result.best_schedule.is_valid(&catalog));
    assert_eq!(result.best_schedule.slots.len(), 3);
    assert!(result.best_fitness.is_finite());

    // Generations are numbered consecutively from zero.
    for (i, stats) in result.history.iter().enumerate() {
        assert_eq!(stats.generation, i);
        assert!(stats.best >= stats.avg && stats.avg >= stats.worst);
    }
    assert_eq!(result.history[0].improvement_percent, 0.0);
}

#[test]
fn test_best_of_final_generation_is_reported() {
    // No elitism: the returned fitness must be the max of the last
    // generation, not the best ever seen.
    let params = GaParams {
        population_size: 20,
        mutation_rate: 0.2,
        min_generations: 2,
        max_generations: 8,
        ..GaParams::default()
    };
    let evaluator =
        Arc::new(Evaluator::new(Arc::new(Catalog::sla()), FitnessWeights::default()).unwrap());
    let result = Engine::new(evaluator.clone(), params)
        .unwrap()
        .run(Some(9), &|_: &GenerationStats| true);

    let last = result.history.last().unwrap();
    assert_eq!(result.best_fitness, last.best);
    assert_eq!(evaluator.evaluate(&result.best_schedule), result.best_fitness);
}

#[test]
fn test_adaptive_mutation_never_increases() {
    let params = GaParams {
        population_size: 40,
        mutation_rate: 0.08,
        min_generations: 25,
        max_generations: 25,
        mutation_halve_interval: 5,
        ..GaParams::default()
    };
    let result = engine(Catalog::sla(), params).run(Some(3), &|_: &GenerationStats| true);

    let mut prev = f32::INFINITY;
    for stats in &result.history {
        assert!(stats.mutation_rate <= prev);
        assert!(stats.mutation_rate >= 0.001);
        prev = stats.mutation_rate;
    }
}

#[test]
fn test_callback_abort_stops_the_run() {
    let params = GaParams {
        population_size: 10,
        min_generations: 50,
        max_generations: 50,
        ..GaParams::default()
    };
    let seen = AtomicUsize::new(0);
    let result = engine(Catalog::sla(), params).run(Some(4), &|stats: &GenerationStats| {
        seen.fetch_add(1, Ordering::SeqCst);
        stats.generation < 2
    });

    assert_eq!(seen.load(Ordering::SeqCst), 3);
    assert_eq!(result.history.len(), 3);
}

#[test]
fn test_average_fitness_improves_on_sla() {
    // Statistical sanity: selection pressure should lift the average
    // between the first and last generation for typical seeds.
    let params = GaParams {
        population_size: 100,
        mutation_rate: 0.01,
        min_generations: 30,
        max_generations: 30,
        ..GaParams::default()
    };
    let mut improved = 0;
    for seed in 0..5u64 {
        let result = engine(Catalog::sla(), params.clone()).run(Some(seed), &|_: &GenerationStats| true);
        let first = result.history.first().unwrap().avg;
        let last = result.history.last().unwrap().avg;
        if last > first {
            improved += 1;
        }
    }
    assert!(improved >= 4, "average improved in only {}/5 runs", improved);
}
