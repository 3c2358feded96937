//! The core `Engine` trait implemented by every simulation in the workspace.
//!
//! The trait is object-safe so engines can be driven as `dyn Engine` by the
//! registry, the CLI run loop, and snapshot rendering.

use crate::error::EngineError;
use crate::field::Field;
use serde_json::Value;

/// Core trait for step-based grid simulations.
///
/// Each engine advances an owned grid state one tick at a time and exposes a
/// primary scalar [`Field`] for display. Multi-substrate engines additionally
/// expose their channel triple through [`Engine::substrates`], and
/// interactive engines accept pointer-driven perturbations through
/// [`Engine::disturb`].
///
/// This trait is **object-safe**: `Box<dyn Engine>` and `&mut dyn Engine`
/// both work for runtime polymorphism.
pub trait Engine {
    /// Advance the simulation by one step.
    fn step(&mut self) -> Result<(), EngineError>;

    /// The primary scalar field output of the engine.
    fn field(&self) -> &Field;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// The three substrate concentration fields, for engines that have them.
    ///
    /// Returns `None` by default. Three-species engines override this so the
    /// rendering layer can blend all channels into one color per cell.
    fn substrates(&self) -> Option<[&Field; 3]> {
        None
    }

    /// Inject a localized perturbation centered at `(row, col)`.
    ///
    /// Forwarded from pointer-down/drag events by the interactive surface.
    /// The default implementation is a no-op; engines without a disturbance
    /// operator simply ignore the event.
    fn disturb(&mut self, row: isize, col: isize) -> Result<(), EngineError> {
        let _ = (row, col);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal engine used to verify trait defaults and object safety.
    struct MockEngine {
        field: Field,
        step_count: usize,
    }

    impl MockEngine {
        fn new() -> Self {
            Self {
                field: Field::new(4, 4).unwrap(),
                step_count: 0,
            }
        }
    }

    impl Engine for MockEngine {
        fn step(&mut self) -> Result<(), EngineError> {
            self.step_count += 1;
            Ok(())
        }

        fn field(&self) -> &Field {
            &self.field
        }

        fn params(&self) -> Value {
            json!({"step_count": self.step_count})
        }

        fn param_schema(&self) -> Value {
            json!({
                "step_count": {
                    "type": "integer",
                    "default": 0,
                    "description": "Number of steps executed"
                }
            })
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let engine: Box<dyn Engine> = Box::new(MockEngine::new());
        assert_eq!(engine.field().width(), 4);
        assert_eq!(engine.field().height(), 4);
    }

    #[test]
    fn mock_engine_step_advances_state() {
        let mut engine = MockEngine::new();
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.step_count, 2);
    }

    #[test]
    fn default_substrates_is_none() {
        let engine = MockEngine::new();
        assert!(engine.substrates().is_none());
    }

    #[test]
    fn default_disturb_is_a_no_op() {
        let mut engine = MockEngine::new();
        let before = engine.field().clone();
        engine.disturb(2, 2).unwrap();
        engine.disturb(-50, 900).unwrap();
        assert_eq!(engine.field(), &before);
        assert_eq!(engine.step_count, 0);
    }

    #[test]
    fn dyn_engine_mut_reference_works() {
        let mut engine = MockEngine::new();
        let engine_ref: &mut dyn Engine = &mut engine;
        engine_ref.step().unwrap();
        engine_ref.disturb(0, 0).unwrap();
        assert_eq!(engine_ref.params()["step_count"], 1);
    }
}
