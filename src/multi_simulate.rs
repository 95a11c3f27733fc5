//! Parallel trajectory fan-out: N independent trajectories, each reduced by
//! a caller-supplied function, surfaced lazily in submission order.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::simulation::{Network, Simulation};

/// The lazy, length-`N` sequence of reducer outputs produced by
/// [`crate::Vessel::multi_simulate`].
///
/// Each element was computed on its own OS thread, with its own
/// [`Simulation`] and RNG. Elements are yielded in submission order:
/// pulling element `i` blocks only on worker `i`, never on workers `j > i`.
/// Workers are not scoped to the iterator's lifetime -- dropping the
/// iterator early does not cancel outstanding work.
pub struct MultiSimulate<R> {
    receivers: VecDeque<Receiver<thread::Result<R>>>,
}

impl<R: Send + 'static> MultiSimulate<R> {
    pub(crate) fn spawn<F>(network: Arc<Network>, count: usize, f: F) -> Self
    where
        F: Fn(Simulation<SmallRng>) -> R + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let mut receivers = VecDeque::with_capacity(count);

        for worker in 0..count {
            let (tx, rx) = mpsc::channel();
            let network = Arc::clone(&network);
            let f = Arc::clone(&f);

            thread::spawn(move || {
                log::trace!("multi_simulate worker {worker} starting");
                let simulation = Simulation::new(network, SmallRng::from_entropy());
                let result = panic::catch_unwind(AssertUnwindSafe(|| f(simulation)));
                log::trace!("multi_simulate worker {worker} finished");
                // The receiver may already have been dropped if the consumer
                // stopped pulling results; that is not an error for us.
                let _ = tx.send(result);
            });

            receivers.push_back(rx);
        }

        Self { receivers }
    }
}

impl<R> Iterator for MultiSimulate<R> {
    type Item = R;

    fn next(&mut self) -> Option<Self::Item> {
        let rx = self.receivers.pop_front()?;
        match rx.recv() {
            Ok(Ok(value)) => Some(value),
            Ok(Err(payload)) => panic::resume_unwind(payload),
            Err(_) => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.receivers.len(), Some(self.receivers.len()))
    }
}

impl<R> ExactSizeIterator for MultiSimulate<R> {}
