//! Randomized User-Agent selection.

use rand::seq::IndexedRandom;

/// Pool of User-Agent strings to rotate through.
#[derive(Debug, Clone, Default)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    pub fn new(agents: Vec<String>) -> Self {
        let agents = agents
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        Self { agents }
    }

    /// Pick a random agent, or `None` when the pool is empty.
    pub fn pick(&self) -> Option<&str> {
        self.agents.choose(&mut rand::rng()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
