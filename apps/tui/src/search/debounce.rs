use std::time::Duration;

use tokio::task::JoinHandle;

/// A value emitted by [`Debouncer`] once its quiet period elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<T> {
    generation: u64,
    pub value: T,
}

/// Collapses a burst of values into the last one, emitted `delay` after the
/// burst ends.
///
/// Every [`schedule`](Self::schedule) aborts the previously pending timer.
/// Because an aborted timer may already have pushed its emission into a
/// channel, each emission carries a generation number and only the one
/// matching the latest schedule is [`accept`](Self::accept)ed.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    _value: std::marker::PhantomData<fn(T)>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
            _value: std::marker::PhantomData,
        }
    }

    /// Restart the quiet period with `value`; `emit` runs when it elapses.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, value: T, emit: F)
    where
        F: FnOnce(Debounced<T>) + Send + 'static,
    {
        self.cancel();

        let generation = self.generation;
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            emit(Debounced { generation, value });
        }));
    }

    /// Drop the pending emission, if any. Emissions already in flight become
    /// stale.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Unwraps `fired` if it belongs to the latest schedule.
    pub fn accept(&mut self, fired: Debounced<T>) -> Option<T> {
        if fired.generation != self.generation {
            tracing::trace!(
                fired = fired.generation,
                current = self.generation,
                "discarding superseded debounce"
            );
            return None;
        }

        self.pending = None;
        Some(fired.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
