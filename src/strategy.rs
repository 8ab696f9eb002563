use tracing::trace;

/// One way of reading a record out of a single input (a row of cells, or a block of text).
///
/// A strategy either recognizes its input and returns one output, or declines with `None`.
pub trait Strategy<I: ?Sized>: Send + Sync {
    type Output;

    fn name(&self) -> &'static str;

    fn attempt(&self, input: &I) -> Option<Self::Output>;
}

/// Strategies tried in registration order; the first that recognizes the input wins.
pub struct StrategyChain<I: ?Sized, O> {
    strategies: Vec<Box<dyn Strategy<I, Output = O>>>,
}

impl<I: ?Sized, O> StrategyChain<I, O> {
    pub fn new() -> Self {
        Self { strategies: Vec::new() }
    }

    pub fn with<S>(mut self, strategy: S) -> Self
    where
        S: Strategy<I, Output = O> + 'static,
    {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn first_match(&self, input: &I) -> Option<O> {
        self.strategies.iter().find_map(|strategy| {
            let output = strategy.attempt(input);
            if output.is_some() {
                trace!(strategy = strategy.name(), "Strategy matched");
            }
            output
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

impl<I: ?Sized, O> Default for StrategyChain<I, O> {
    fn default() -> Self {
        Self::new()
    }
}
