//! Ownership and hot-swapping of the live engine instance.

use crate::engine::{Engine, StrategyKind};
use crate::event_log::EventLog;

/// Builds a fresh engine for a strategy variant. Constructors take no
/// arguments; each call returns a new instance with its own initial state.
pub type EngineFactory = Box<dyn Fn(StrategyKind) -> Box<dyn Engine>>;

/// Holds the one live engine and the strategy it was built as.
///
/// The two always change together: selecting a strategy drops the old
/// engine and installs a fresh one of the new kind in the same call, so
/// there is never a moment where the handle and the selection disagree.
pub struct StrategyController {
    factory: EngineFactory,
    engine: Box<dyn Engine>,
    selected: StrategyKind,
}

impl StrategyController {
    /// Build the controller with a fresh engine of `initial`, logging it
    /// as the active strategy.
    pub fn new(factory: EngineFactory, initial: StrategyKind, log: &mut EventLog) -> Self {
        let engine = (factory)(initial);
        let controller = Self {
            factory,
            engine,
            selected: initial,
        };
        controller.announce(log);
        controller
    }

    pub fn selected(&self) -> StrategyKind {
        self.selected
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> &mut dyn Engine {
        self.engine.as_mut()
    }

    /// Switch to `kind` with a fresh engine instance.
    ///
    /// Selecting the already-active strategy is a full reset, not a no-op:
    /// the old instance is dropped either way.
    pub fn select(&mut self, kind: StrategyKind, log: &mut EventLog) {
        self.engine = (self.factory)(kind);
        self.selected = kind;
        tracing::info!(strategy = %kind, "engine replaced");
        self.announce(log);
    }

    /// Rebuild a fresh engine of the currently selected strategy.
    pub fn reset(&mut self, log: &mut EventLog) {
        self.select(self.selected, log);
    }

    fn announce(&self, log: &mut EventLog) {
        log.push(format!("strategy: {} (fresh engine)", self.selected));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::WorldSnapshot;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Engine double that reports which factory call built it.
    struct Marked {
        kind: StrategyKind,
        instance: u32,
    }

    impl Engine for Marked {
        fn world(&self) -> WorldSnapshot {
            WorldSnapshot::default()
        }

        fn step(&mut self) {}

        fn train(&mut self) -> String {
            format!("{} #{}", self.kind, self.instance)
        }
    }

    fn marked_factory() -> (EngineFactory, Rc<Cell<u32>>) {
        let built = Rc::new(Cell::new(0));
        let counter = Rc::clone(&built);
        let factory: EngineFactory = Box::new(move |kind| {
            counter.set(counter.get() + 1);
            Box::new(Marked {
                kind,
                instance: counter.get(),
            })
        });
        (factory, built)
    }

    #[test]
    fn reselecting_builds_a_distinct_fresh_instance() {
        let (factory, built) = marked_factory();
        let mut log = EventLog::new();
        let mut ctrl = StrategyController::new(factory, StrategyKind::Rank, &mut log);

        ctrl.select(StrategyKind::Rank, &mut log);
        ctrl.select(StrategyKind::Rank, &mut log);

        assert_eq!(built.get(), 3);
        assert_eq!(ctrl.engine_mut().train(), "rank #3");
    }

    #[test]
    fn reset_uses_the_last_selected_strategy() {
        let (factory, _) = marked_factory();
        let mut log = EventLog::new();
        let mut ctrl = StrategyController::new(factory, StrategyKind::RouletteWheel, &mut log);

        ctrl.select(StrategyKind::Rank, &mut log);
        ctrl.reset(&mut log);

        assert_eq!(ctrl.selected(), StrategyKind::Rank);
        assert!(ctrl.engine_mut().train().starts_with("rank"));
    }

    #[test]
    fn every_switch_logs_the_active_strategy() {
        let (factory, _) = marked_factory();
        let mut log = EventLog::new();
        let mut ctrl = StrategyController::new(factory, StrategyKind::RouletteWheel, &mut log);

        ctrl.select(StrategyKind::Rank, &mut log);
        ctrl.reset(&mut log);

        assert_eq!(
            log.entries(),
            [
                "strategy: roulettewheel (fresh engine)",
                "strategy: rank (fresh engine)",
                "strategy: rank (fresh engine)",
            ]
        );
    }
}
