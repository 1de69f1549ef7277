use fuzzy_priority::{
    Deadline, DefuzzificationOp, Difficulty, FuzzyError, Importance, Priority, PriorityConfig, PriorityEngine,
    TaskInputs, TaskTerm,
};

fn engine() -> PriorityEngine {
    PriorityEngine::new().unwrap()
}

fn engine_with(defuzzification: DefuzzificationOp) -> PriorityEngine {
    PriorityEngine::with_config(&PriorityConfig {
        defuzzification,
        ..PriorityConfig::default()
    })
    .unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

#[test]
fn far_unimportant_task_scores_at_the_floor() {
    let engine = engine();
    let far = engine.fuzzify(engine.deadline(), 30.).unwrap();
    let unimportant = engine.fuzzify(engine.importance(), 0.).unwrap();

    assert_eq!(far.get(Deadline::Far), 1.);
    assert_eq!(unimportant.get(Importance::Low), 1.);

    let result = engine.prioritize(30., 0., 0.);

    // Discrete centroid of the unclipped very_low trapezoid on the unit grid.
    assert_close(result.score, 487. / 54.);
    assert!((result.score - 9.29).abs() < 0.5);
    assert_eq!(result.label, Priority::VeryLow);
}

#[test]
fn urgent_critical_task_scores_at_the_ceiling() {
    let engine = engine();
    let outputs = engine.evaluate(0., 10., 10.);

    // Rules 1 and 9 fire at full strength.
    assert_eq!(outputs.firing_strengths()[0], 1.);
    assert_eq!(outputs.firing_strengths()[8], 1.);
    assert_eq!(outputs.activation(Priority::VeryHigh), 1.);

    let result = engine.prioritize(0., 10., 10.);

    assert_close(result.score, 100. - 487. / 54.);
    assert!((result.score - 90.71).abs() < 0.5);
    assert_eq!(result.label, Priority::VeryHigh);
}

#[test]
fn piecewise_centre_of_gravity_matches_documented_extremes() {
    let engine = engine_with(DefuzzificationOp::Cog);

    let floor = engine.prioritize(30., 0., 0.);
    let ceiling = engine.prioritize(0., 10., 10.);

    assert_close(floor.score, 65. / 7.);
    assert_eq!(floor.rounded_score(), 9.29);
    assert_eq!(ceiling.rounded_score(), 90.71);
}

#[test]
fn cog_accounts_for_clip_crossings_between_grid_points() {
    // very_high clipped at 0.5 kinks at 82.5, off the unit grid.
    let engine = engine_with(DefuzzificationOp::Cog);
    let result = engine.prioritize(2., 8., 5.);

    assert_close(result.score, 1896.875 / 21.25);
    assert_eq!(result.label, Priority::VeryHigh);
}

#[test]
fn maximum_based_defuzzifiers() {
    assert_close(engine_with(DefuzzificationOp::Mom).prioritize(0., 10., 10.).score, 95.);
    assert_close(engine_with(DefuzzificationOp::Som).prioritize(0., 10., 10.).score, 90.);
    assert_close(engine_with(DefuzzificationOp::Lom).prioritize(0., 10., 10.).score, 100.);
    assert_close(engine_with(DefuzzificationOp::Boa).prioritize(30., 0., 0.).score, 8.75);
}

#[test]
fn balanced_task_lands_on_medium() {
    let engine = engine();
    let outputs = engine.evaluate(5., 5., 5.);

    assert_eq!(outputs.activation(Priority::Medium), 0.6);
    assert_eq!(outputs.activation(Priority::High), 0.);
    assert_close(outputs.crisp(), 50.);
    assert_eq!(engine.prioritize(5., 5., 5.).label, Priority::Medium);
}

#[test]
fn partially_close_deadline_clips_very_high() {
    let engine = engine();
    let outputs = engine.evaluate(2., 8., 5.);

    assert_eq!(outputs.activation(Priority::VeryHigh), 0.5);
    assert!(outputs.aggregate().all(|(_, m)| m <= 0.5));

    let result = engine.prioritize(2., 8., 5.);

    assert!(result.score > 85.);
    assert_eq!(result.label, Priority::VeryHigh);
}

#[test]
fn overlapping_far_rules_both_fire() {
    let engine = engine();
    let outputs = engine.evaluate(25., 9., 9.);

    // Rule 4 and its coverage twin 14 agree; max aggregation keeps one height.
    assert_eq!(outputs.firing_strengths()[3], 1.);
    assert_eq!(outputs.firing_strengths()[13], 1.);
    assert_eq!(outputs.activation(Priority::High), 1.);
    assert_close(outputs.crisp(), 70.);
}

#[test]
fn urgency_never_lowers_priority() {
    let engine = engine();
    let mut previous = engine.prioritize(20., 9., 9.).score;

    for step in (0..80).rev() {
        let days = f64::from(step) / 4.;
        let score = engine.prioritize(days, 9., 9.).score;

        assert!(score >= previous - 1e-9, "score fell from {previous} to {score} at {days} days");
        previous = score;
    }

    assert!(previous > 90.);
}

#[test]
fn out_of_range_inputs_are_clamped_and_echoed() {
    let engine = engine();
    let clamped = engine.prioritize(-5., 15., 20.);
    let bounded = engine.prioritize(0., 10., 10.);

    assert_eq!(clamped, bounded);
    assert_eq!(clamped.inputs, TaskInputs::new(0., 10., 10.));

    let high = engine.prioritize(45., -1., -3.);

    assert_eq!(high.inputs, TaskInputs::new(30., 0., 0.));
    assert_eq!(high.label, Priority::VeryLow);
}

#[test]
fn result_serialises_with_rounded_score() {
    let result = engine().prioritize(30., 0., 0.);
    let json = serde_json::to_value(result).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "score": 9.02,
            "label": "very_low",
            "inputs": { "days_to_deadline": 30.0, "importance": 0.0, "difficulty": 0.0 }
        })
    );
    assert_ne!(result.score, 9.02);
}

#[test]
fn labels_break_ties_towards_lower_priority() {
    let engine = engine();

    // very_low and low both hold 1/3 at 20; low and medium both hold 1/3 at 40.
    assert_eq!(engine.label_for(20.), Priority::VeryLow);
    assert_eq!(engine.label_for(40.), Priority::Low);
    assert_eq!(engine.label_for(60.), Priority::Medium);
    assert_eq!(engine.label_for(80.), Priority::High);
    assert_eq!(engine.label_for(-10.), Priority::VeryLow);
    assert_eq!(engine.label_for(140.), Priority::VeryHigh);
}

#[test]
fn fuzzification_of_rating_boundaries() {
    let engine = engine();
    let difficulty = engine.fuzzify(engine.difficulty(), 3.5).unwrap();

    assert_eq!(difficulty.get(Difficulty::Easy), 0.25);
    assert_eq!(difficulty.get(Difficulty::Moderate), 0.25);
    assert_eq!(difficulty.get(Difficulty::Hard), 0.);

    let deadline = engine.fuzzify(engine.deadline(), 12.).unwrap();

    assert_eq!(deadline.get(Deadline::Moderate), 2. / 7.);
    assert_eq!(deadline.get(Deadline::Far), 0.2);
    assert_eq!(deadline.get(Deadline::Close), 0.);
}

#[test]
fn batch_matches_sequential_and_keeps_order() {
    let engine = engine();
    let tasks: Vec<_> = (0..=30)
        .map(|day| TaskInputs::new(f64::from(day), f64::from(day % 11), f64::from((day * 7) % 11)))
        .collect();

    let batch = engine.prioritize_many(&tasks);
    let sequential: Vec<_> = tasks
        .iter()
        .map(|t| engine.prioritize(t.days_to_deadline, t.importance, t.difficulty))
        .collect();

    assert_eq!(batch, sequential);
}

#[test]
fn shared_engine_across_threads() {
    let engine = engine();
    let expected = engine.prioritize(3., 7., 4.);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.prioritize(3., 7., 4.)))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn fine_grid_from_toml_config() {
    let config = PriorityConfig::from_toml_str("step = 0.5").unwrap();
    let engine = PriorityEngine::with_config(&config).unwrap();
    let result = engine.prioritize(30., 0., 0.);

    assert_eq!(result.label, Priority::VeryLow);
    assert!((result.score - 9.29).abs() < 0.5);
    assert_eq!(engine.system().output_variable().universe().points().len(), 201);
}

#[test]
fn every_rule_fires_into_its_own_consequent() {
    use Priority::*;

    // (rule, days, importance, difficulty, consequent, propositions)
    let table = [
        (0, 0., 10., 5., VeryHigh, 2),
        (1, 0., 5., 5., High, 2),
        (2, 7., 10., 5., High, 2),
        (3, 25., 10., 10., High, 3),
        (4, 25., 10., 0., Medium, 3),
        (5, 25., 0., 5., VeryLow, 2),
        (6, 7., 0., 5., Low, 2),
        (7, 0., 0., 5., Medium, 2),
        (8, 0., 10., 10., VeryHigh, 3),
        (9, 0., 5., 0., High, 3),
        (10, 7., 5., 5., Medium, 2),
        (11, 25., 0., 10., VeryLow, 3),
        (12, 25., 5., 0., Low, 3),
        (13, 25., 10., 5., High, 2),
        (14, 7., 10., 5., High, 2),
        (15, 25., 5., 5., Low, 3),
    ];
    let engine = engine();
    let rules: Vec<_> = engine.system().rules().iter().collect();

    assert_eq!(rules.len(), table.len());

    for (i, days, importance, difficulty, consequent, arity) in table {
        let outputs = engine.evaluate(days, importance, difficulty);

        assert_eq!(outputs.firing_strengths()[i], 1., "rule {i} at ({days}, {importance}, {difficulty})");
        assert_eq!(outputs.activation(consequent), 1., "rule {i} consequent {consequent}");
        assert_eq!(rules[i].consequence(), &engine.priority().is::<TaskTerm>(consequent), "rule {i}");
        assert_eq!(rules[i].premise().propositions().len(), arity, "rule {i}");
    }
}

#[test]
fn partial_premises_take_the_weakest_antecedent() {
    let engine = engine();
    let outputs = engine.evaluate(8., 2., 5.);

    // moderate(8) = 6/7 while low(2) = 1, so moderate and low fires at 6/7.
    assert_close(outputs.firing_strengths()[6], 6. / 7.);
    assert_close(outputs.activation(Priority::Low), 6. / 7.);
    assert_eq!(outputs.activation(Priority::Medium), 0.);
}

#[test]
fn golden_scores() {
    let engine = engine();
    let cases = [
        ((0., 0., 0.), 50., Priority::Medium),
        ((8., 2., 5.), 30., Priority::Low),
        ((12., 5., 2.), 41.705882352941146, Priority::Medium),
        ((5., 5., 5.), 50., Priority::Medium),
        ((25., 9., 9.), 70., Priority::High),
    ];

    for ((days, importance, difficulty), score, label) in cases {
        let result = engine.prioritize(days, importance, difficulty);

        assert!(
            (result.score - score).abs() < 1e-6,
            "({days}, {importance}, {difficulty}): expected {score}, got {}",
            result.score
        );
        assert_eq!(result.label, label);
    }

    assert_eq!(engine.prioritize(12., 5., 2.).rounded_score(), 41.71);
}

#[test]
fn oversized_grid_from_toml_config_is_rejected() {
    let config = PriorityConfig::from_toml_str("step = 1e-300").unwrap();

    assert!(matches!(
        PriorityEngine::with_config(&config),
        Err(FuzzyError::InvalidUniverse { .. })
    ));

    let config = PriorityConfig::from_toml_str("step = 1e-9").unwrap();

    assert!(PriorityEngine::with_config(&config).is_err());
}
