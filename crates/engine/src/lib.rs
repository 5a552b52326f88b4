//! Bill-splitting ("warikan") calculation engine.
//!
//! Turns a total amount, a people count and a [`SplitPattern`] into a
//! [`CalculationResult`] telling what the organizer and every other
//! participant pays, plus the leftover yen.
//!
//! ```rust
//! use engine::{CalculationInput, Engine, SplitPattern, Yen};
//!
//! let engine = Engine::new();
//! let input = CalculationInput::new(
//!     Yen::new(5000),
//!     4,
//!     SplitPattern::OrganizerMore { burden_percent: 20 },
//! );
//! let result = engine.calculate(&input).unwrap();
//! assert_eq!(result.organizer_payment, Yen::new(1502));
//! assert_eq!(result.participant_payment, Yen::new(1166));
//! assert!(result.is_balanced());
//! ```
use std::sync::Arc;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::EngineError;
pub use input::{
    CalculationInput, MAX_BURDEN_PERCENT, MAX_PEOPLE, MAX_REDUCTION_PERCENT, MAX_TOTAL_AMOUNT,
    MIN_PEOPLE, MIN_PERCENT, MIN_TOTAL_AMOUNT,
};
pub use money::Yen;
pub use pattern::{SplitKind, SplitPattern};
pub use result::CalculationResult;

mod clock;
mod error;
mod input;
mod money;
mod pattern;
mod result;
mod split;

type ResultEngine<T> = Result<T, EngineError>;

/// Stateless calculator.
///
/// The only thing an engine holds is the [`Clock`] used to stamp results, so
/// it is cheap to clone and can be shared freely between threads.
#[derive(Clone, Debug)]
pub struct Engine {
    clock: Arc<dyn Clock>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine stamping results with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
        }
    }

    /// Return a builder for `Engine`. Help to build the struct.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The clock stamping results, for records created alongside them.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Validates `input` and applies its split pattern.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidInput`] when an amount, the people count or the
    /// pattern parameter is out of range. Degenerate pattern parameters are
    /// not errors: they produce an equal split.
    pub fn calculate(&self, input: &CalculationInput) -> ResultEngine<CalculationResult> {
        input.validate()?;

        let split = split::split(input.total_amount, input.number_of_people, input.pattern);
        Ok(CalculationResult {
            pattern: split.pattern,
            total_amount: input.total_amount,
            number_of_people: input.number_of_people,
            per_person: split.participant_payment,
            remainder: split.remainder,
            organizer_payment: split.organizer_payment,
            participant_payment: split.participant_payment,
            timestamp: self.clock.now(),
        })
    }
}

/// The builder for `Engine`
#[derive(Debug, Default)]
pub struct EngineBuilder {
    clock: Option<Arc<dyn Clock>>,
}

impl EngineBuilder {
    /// Pass the clock used to stamp results.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> EngineBuilder {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the `Engine`, defaulting to the system clock.
    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        }
    }
}

/// Runs a calculation on a system-clock engine.
///
/// # Errors
///
/// Same as [`Engine::calculate`].
pub fn calculate(input: &CalculationInput) -> ResultEngine<CalculationResult> {
    Engine::new().calculate(input)
}
