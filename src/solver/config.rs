use crate::solver::restart::{RestartPolicy, DEFAULT_FIXED_INTERVAL};

pub struct Config {
    pub restart_policy: RestartPolicy,
    pub restart_interval: usize,
}

impl Config {
    pub fn new(restart_policy: RestartPolicy, restart_interval: usize) -> Self {
        Config {
            restart_policy,
            restart_interval,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            restart_policy: RestartPolicy::FixedInterval,
            restart_interval: DEFAULT_FIXED_INTERVAL,
        }
    }
}
