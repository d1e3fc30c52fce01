use clap::ValueEnum;

/// spec.md §4.5's recommended fixed restart interval.
pub const DEFAULT_FIXED_INTERVAL: usize = 700;
const GEOMETRIC_INTERVAL_SIZE: usize = 100;
const GEOMETRIC_MAGNIFICATION_FACTOR: f64 = 1.5;

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum RestartPolicy {
    #[clap(name = "fixed-interval")]
    FixedInterval,
    #[clap(name = "geometric")]
    Geometric,
    #[clap(name = "luby")]
    Luby,
    #[clap(name = "no-restarts")]
    NoRestarts,
}

#[derive(Debug, Clone)]
pub struct Restarter {
    num_restarts: usize,
    conflicts_since_last_restart: usize,
    policy: RestartPolicy,
    fixed_interval: usize,
}

impl Restarter {
    pub fn new(policy: RestartPolicy, fixed_interval: usize) -> Self {
        Restarter {
            num_restarts: 0,
            conflicts_since_last_restart: 0,
            policy,
            fixed_interval,
        }
    }

    pub fn conflict(&mut self) {
        self.conflicts_since_last_restart += 1;
    }

    pub fn check_if_restart_necessary(&mut self) -> bool {
        let necessary = match self.policy {
            RestartPolicy::FixedInterval => self.fixed_interval_necessary(),
            RestartPolicy::Geometric => self.geometric_necessary(),
            RestartPolicy::Luby => self.luby_necessary(),
            RestartPolicy::NoRestarts => false,
        };

        if necessary {
            self.conflicts_since_last_restart = 0;
            self.num_restarts += 1;
        }
        necessary
    }

    fn fixed_interval_necessary(&self) -> bool {
        self.conflicts_since_last_restart >= self.fixed_interval
    }

    fn geometric_necessary(&self) -> bool {
        (self.conflicts_since_last_restart as f64)
            >= (GEOMETRIC_INTERVAL_SIZE as f64
                * GEOMETRIC_MAGNIFICATION_FACTOR.powi(self.num_restarts as i32))
    }

    fn luby_necessary(&self) -> bool {
        self.conflicts_since_last_restart >= 32 * Self::luby(self.num_restarts + 1)
    }

    fn luby(i: usize) -> usize {
        for k in 1..32 {
            if i == (1 << k) - 1 {
                return 1 << (k - 1);
            }
        }

        let mut k = 1;
        loop {
            if (1 << (k - 1)) <= i && i < (1 << k) - 1 {
                return Self::luby(i - (1 << (k - 1)) + 1);
            }
            k += 1;
        }
    }
}
