//! Scripted stand-in engine.
//!
//! The viewer binds whichever engine backend the build provides; this one
//! exists so the shipped binary runs (and the whole control surface can be
//! exercised) without an external simulation backend. It implements no
//! fitness, mutation, or selection math: agents drift along
//! their heading with a bounded wobble, and `train()` rescatters the world
//! and reports synthetic scores.

use std::cell::Cell;
use std::f32::consts::TAU;

use evoscope::controller::EngineFactory;
use evoscope::engine::{AgentState, Engine, FoodState, StrategyKind, WorldSnapshot};

const AGENTS: usize = 40;
const FOODS: usize = 60;
const STEP_DIST: f32 = 0.0015;
const WOBBLE: f32 = 0.08;

pub struct DemoEngine {
    rng_seed: u64,
    generation: u32,
    agents: Vec<AgentState>,
    foods: Vec<FoodState>,
}

impl DemoEngine {
    pub fn new(kind: StrategyKind, seed: u64) -> Self {
        // Variants share the scripted behavior; folding the kind into the
        // seed keeps their default worlds distinct.
        let mut engine = Self {
            rng_seed: seed ^ ((kind as u64 + 1) << 32),
            generation: 0,
            agents: Vec::with_capacity(AGENTS),
            foods: Vec::with_capacity(FOODS),
        };
        engine.scatter();
        engine
    }

    fn scatter(&mut self) {
        let mut agents = Vec::with_capacity(AGENTS);
        for _ in 0..AGENTS {
            agents.push(AgentState {
                x: self.sample_uniform(0.0, 1.0),
                y: self.sample_uniform(0.0, 1.0),
                heading: self.sample_uniform(0.0, TAU),
            });
        }
        self.agents = agents;

        let mut foods = Vec::with_capacity(FOODS);
        for _ in 0..FOODS {
            foods.push(FoodState {
                x: self.sample_uniform(0.0, 1.0),
                y: self.sample_uniform(0.0, 1.0),
            });
        }
        self.foods = foods;
    }

    fn sample_uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.rng_next_f32()
    }

    fn rng_next_f32(&mut self) -> f32 {
        self.rng_seed = self
            .rng_seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        let mantissa = ((self.rng_seed >> 11) as u32) >> 8; // 24 bits
        (mantissa as f32) / ((1u32 << 24) as f32)
    }
}

fn wrap01(v: f32) -> f32 {
    let r = v.fract();
    if r < 0.0 {
        r + 1.0
    } else {
        r
    }
}

impl Engine for DemoEngine {
    fn world(&self) -> WorldSnapshot {
        WorldSnapshot {
            agents: self.agents.clone(),
            foods: self.foods.clone(),
        }
    }

    fn step(&mut self) {
        for i in 0..self.agents.len() {
            let wobble = self.sample_uniform(-WOBBLE, WOBBLE);
            let agent = &mut self.agents[i];
            agent.heading += wobble;
            // Move toward the glyph tip: heading 0 is "up" the y axis.
            agent.x = wrap01(agent.x - agent.heading.sin() * STEP_DIST);
            agent.y = wrap01(agent.y + agent.heading.cos() * STEP_DIST);
        }
    }

    fn train(&mut self) -> String {
        self.generation += 1;

        let mut scores: Vec<f32> = (0..AGENTS).map(|_| self.sample_uniform(0.0, 1.0)).collect();
        scores.sort_by(|a, b| a.total_cmp(b));

        let min = scores[0];
        let max = scores[scores.len() - 1];
        let avg = scores.iter().sum::<f32>() / scores.len() as f32;
        let median = (scores[scores.len() / 2] + scores[(scores.len() - 1) / 2]) / 2.0;

        self.scatter();

        format!(
            "generation {:>3}: min={:.2}, max={:.2}, avg={:.2}, median={:.2}",
            self.generation, min, max, avg, median
        )
    }
}

/// Factory handed to the strategy controller. Every construction gets a
/// fresh seed so repeated selections of the same variant start from
/// observably different initial state.
pub fn engine_factory() -> EngineFactory {
    let next_seed = Cell::new(0x5EED_0001u64);
    Box::new(move |kind| {
        let seed = next_seed.get();
        next_seed.set(seed.wrapping_add(0x9E37_79B9));
        Box::new(DemoEngine::new(kind, seed))
    })
}
