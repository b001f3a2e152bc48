// Effect state machines driven end to end through their presentation traits.

use portfolio_fx::counter::{CounterAnimation, NumberSlot, Phase, Tick};
use portfolio_fx::particles::{ParticleField, ParticleLayer, ParticleSpec};
use portfolio_fx::typing::{TextSlot, Typewriter, TypingSpeeds};
use portfolio_fx::FxConfig;

struct Sink;

impl TextSlot for Sink {
    fn set_text(&mut self, _text: &str) {}
}

#[test]
fn typewriter_phrase_sequence_has_period_equal_to_phrase_count() {
    let cfg = FxConfig::default();
    let mut tw = Typewriter::new(cfg.phrases.clone(), TypingSpeeds::from_config(&cfg)).unwrap();
    let mut order = vec![tw.text_index()];
    while order.len() < cfg.phrases.len() * 3 {
        let before = tw.text_index();
        tw.advance(&mut Sink);
        let len = tw.current_phrase().chars().count();
        assert!(tw.char_index() <= len);
        if tw.text_index() != before {
            order.push(tw.text_index());
        }
    }
    let n = cfg.phrases.len();
    for (i, idx) in order.iter().enumerate() {
        assert_eq!(*idx, i % n);
    }
}

#[test]
fn typewriter_renders_full_phrase_before_deleting() {
    struct Last(String);
    impl TextSlot for Last {
        fn set_text(&mut self, text: &str) {
            self.0 = text.to_string();
        }
    }
    let mut tw = Typewriter::new(vec!["Problem Solver".into()], TypingSpeeds::default()).unwrap();
    let mut slot = Last(String::new());
    let mut delay = 0;
    while !tw.is_deleting() {
        delay = tw.advance(&mut slot);
    }
    assert_eq!(slot.0, "Problem Solver");
    assert_eq!(delay, 2000);
}

#[derive(Default)]
struct Stat(Option<u32>, usize);

impl NumberSlot for Stat {
    fn set_number(&mut self, value: u32) {
        self.0 = Some(value);
        self.1 += 1;
    }
}

#[test]
fn completed_counter_is_idempotent() {
    let mut anim = CounterAnimation::new(1500, 100);
    let mut stat = Stat::default();
    assert!(anim.start());
    while anim.tick(&mut stat) == Tick::Continue {}
    assert_eq!(stat.0, Some(1500));
    let writes = stat.1;

    for _ in 0..3 {
        assert!(!anim.start());
        assert_eq!(anim.tick(&mut stat), Tick::Finished);
    }
    assert_eq!(stat.0, Some(1500));
    assert_eq!(stat.1, writes);
    assert_eq!(anim.phase(), Phase::Done);
}

#[derive(Default)]
struct Nodes {
    generation: usize,
    live: usize,
}

impl ParticleLayer for Nodes {
    fn clear(&mut self) {
        self.generation += 1;
        self.live = 0;
    }
    fn spawn(&mut self, _spec: &ParticleSpec) {
        self.live += 1;
    }
}

#[test]
fn particles_regenerate_only_past_threshold() {
    let cfg = FxConfig::default();
    let mut field = ParticleField::new(cfg.particle_count, cfg.particle_resize_threshold, 1000.0);
    let mut nodes = Nodes::default();
    let mut rng = || 0.3;
    field.populate(&mut nodes, &mut rng);
    assert_eq!(nodes.live, 50);

    for width in [1050.0, 950.0, 1199.0, 801.0] {
        assert!(!field.resized(width, &mut nodes, &mut rng));
    }
    assert_eq!(nodes.generation, 0);

    assert!(field.resized(1201.0, &mut nodes, &mut rng));
    assert_eq!(nodes.generation, 1);
    assert_eq!(nodes.live, 50);
}
