use beacon_motion_core::{
    config::CounterCfg,
    counter::{format_counter, CounterSpec, CounterState},
    page::{PageSpec, StatsSpec},
    Config, CoreEvent, CounterId, Engine, Inputs,
};
use beacon_motion_core::page::CounterNode;

fn run_to_end(target: u64) -> Vec<String> {
    let mut c = CounterSpec::new(CounterId(0), "n", target, &CounterCfg::default());
    let mut frames = Vec::new();
    let mut frame = c.start();
    while let Some(f) = frame {
        frames.push(f.text);
        if f.done {
            break;
        }
        frame = c.tick();
    }
    frames
}

fn frame_value(text: &str) -> u64 {
    text.trim_end_matches('+').parse().unwrap()
}

#[test]
fn last_frame_is_exact_target_for_any_divisibility() {
    for target in [1u64, 3, 7, 49, 50, 51, 99, 120, 333, 1234, 10_000, 987_654] {
        let frames = run_to_end(target);
        assert_eq!(frames.last().unwrap(), &format_counter(target, "+"), "target={target}");
        assert!(frames.len() <= 51, "target={target} took {} frames", frames.len());
        // Intermediate frames never overshoot and never go backwards.
        let values: Vec<u64> = frames.iter().map(|f| frame_value(f)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "target={target}");
        assert!(values[..values.len() - 1].iter().all(|v| *v < target));
    }
}

#[test]
fn zero_target_renders_single_frame() {
    assert_eq!(run_to_end(0), vec!["0+".to_string()]);
}

#[test]
fn target_120_counts_in_steps_of_2_4() {
    let frames = run_to_end(120);
    assert_eq!(&frames[..3], &["2+", "4+", "7+"]);
    assert_eq!(frames.last().map(String::as_str), Some("120+"));
    assert!(frames.len() >= 50);
}

#[test]
fn second_start_is_rejected() {
    let mut c = CounterSpec::new(CounterId(0), "n", 10, &CounterCfg::default());
    assert!(c.start().is_some());
    assert!(c.start().is_none());
    while c.tick().is_some() {}
    assert_eq!(c.state(), CounterState::Finished);
    assert!(c.start().is_none());
}

#[test]
fn custom_steps_and_suffix() {
    let cfg = CounterCfg {
        step_count: 4,
        tick_interval_ms: 10,
        suffix: "%".into(),
    };
    let mut c = CounterSpec::new(CounterId(0), "n", 10, &cfg);
    let mut frames = vec![c.start().unwrap().text];
    while let Some(f) = c.tick() {
        frames.push(f.text);
    }
    assert_eq!(frames, vec!["2%", "5%", "7%", "10%"]);
}

fn stats_page(targets: &[u64]) -> PageSpec {
    PageSpec {
        stats: Some(StatsSpec {
            container: "stats".into(),
            counters: targets
                .iter()
                .enumerate()
                .map(|(i, t)| CounterNode {
                    node: format!("stat-{i}"),
                    target: *t,
                })
                .collect(),
        }),
        ..PageSpec::default()
    }
}

#[test]
fn engine_ticks_every_30ms_after_trigger() {
    let mut eng = Engine::new(Config::default()).unwrap();
    eng.mount(stats_page(&[120])).unwrap();

    let out = eng.update(0, Inputs::default().visible("stats", 0.6));
    assert_eq!(out.texts_for("stat-0").collect::<Vec<_>>(), vec!["2+"]);

    // Nothing renders before the next tick is due.
    assert_eq!(eng.update(29, Inputs::default()).texts_for("stat-0").count(), 0);
    assert_eq!(
        eng.update(1, Inputs::default()).texts_for("stat-0").collect::<Vec<_>>(),
        vec!["4+"]
    );

    let out = eng.update(10_000, Inputs::default());
    assert_eq!(out.texts_for("stat-0").last(), Some("120+"));
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::CounterFinished { value: 120, .. })));
    assert_eq!(eng.pending_timers(), 0);
}

#[test]
fn one_large_step_runs_every_tick_in_order() {
    let mut eng = Engine::new(Config::default()).unwrap();
    eng.mount(stats_page(&[120, 0])).unwrap();
    eng.update(0, Inputs::default().visible("stats", 1.0));
    let out = eng.update(5_000, Inputs::default());
    let frames: Vec<u64> = out.texts_for("stat-0").map(frame_value).collect();
    assert!(frames.len() >= 49);
    assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*frames.last().unwrap(), 120);
    // The zero counter finished on trigger and never ticks again.
    assert_eq!(out.texts_for("stat-1").count(), 0);
}

#[test]
fn retrigger_runs_counters_once() {
    let mut eng = Engine::new(Config::default()).unwrap();
    eng.mount(stats_page(&[50, 20])).unwrap();

    let mut started = 0;
    for fraction in [0.6, 0.1, 0.9, 0.7] {
        let out = eng.update(30, Inputs::default().visible("stats", fraction));
        started += out
            .events
            .iter()
            .filter(|e| matches!(e, CoreEvent::CounterStarted { .. }))
            .count();
    }
    assert_eq!(started, 2);
}

#[test]
fn reduced_motion_jumps_to_final_frame() {
    let cfg = Config {
        reduced_motion: true,
        ..Config::default()
    };
    let mut eng = Engine::new(cfg).unwrap();
    eng.mount(stats_page(&[120, 7])).unwrap();
    let out = eng.update(0, Inputs::default().visible("stats", 0.8));
    assert_eq!(out.texts_for("stat-0").collect::<Vec<_>>(), vec!["120+"]);
    assert_eq!(out.texts_for("stat-1").collect::<Vec<_>>(), vec!["7+"]);
    assert_eq!(eng.pending_timers(), 0);
}
